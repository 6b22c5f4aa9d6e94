//! Binary glTF 2.0 scene export.
//!
//! One mesh, node and material per component, so viewers keep component
//! identity and color. Geometry stays Z-up in the buffers; a root node
//! turns the whole plant into glTF's Y-up frame.

use std::f32::consts::FRAC_1_SQRT_2;
use std::fs;
use std::io::Write;
use std::path::Path;

use config::constants::rgba_to_f32;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::scene::Scene;

const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Rotation of -90° about X: Z-up to Y-up.
const Z_UP_TO_Y_UP: [f32; 4] = [-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2];

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Gltf {
    asset: Asset,
    #[serde(default)]
    scene: usize,
    #[serde(default)]
    scenes: Vec<GltfScene>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    meshes: Vec<GltfMesh>,
    #[serde(default)]
    materials: Vec<Material>,
    #[serde(default)]
    accessors: Vec<Accessor>,
    #[serde(default)]
    buffer_views: Vec<BufferView>,
    #[serde(default)]
    buffers: Vec<Buffer>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Asset {
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generator: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GltfScene {
    nodes: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mesh: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<[f32; 4]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GltfMesh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    primitives: Vec<Primitive>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Primitive {
    attributes: Attributes,
    indices: usize,
    material: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct Attributes {
    #[serde(rename = "POSITION")]
    position: usize,
    #[serde(rename = "NORMAL", default, skip_serializing_if = "Option::is_none")]
    normal: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    pbr_metallic_roughness: Pbr,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pbr {
    base_color_factor: [f32; 4],
    #[serde(default)]
    metallic_factor: f32,
    #[serde(default)]
    roughness_factor: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<[f32; 3]>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: usize,
    byte_offset: usize,
    byte_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Buffer {
    byte_length: usize,
}

/// Accumulates the binary chunk and its views.
#[derive(Default)]
struct BinBuilder {
    bytes: Vec<u8>,
    views: Vec<BufferView>,
}

impl BinBuilder {
    fn push<T: Copy>(&mut self, values: &[T], to_le: impl Fn(T) -> [u8; 4], target: u32) -> usize {
        let byte_offset = self.bytes.len();
        for &value in values {
            self.bytes.extend_from_slice(&to_le(value));
        }
        self.views.push(BufferView {
            buffer: 0,
            byte_offset,
            byte_length: self.bytes.len() - byte_offset,
            target: Some(target),
        });
        self.views.len() - 1
    }
}

fn vec3_bounds(values: &[f32]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for point in values.chunks_exact(3) {
        for axis in 0..3 {
            min[axis] = min[axis].min(point[axis]);
            max[axis] = max[axis].max(point[axis]);
        }
    }
    (min, max)
}

fn padded(mut chunk: Vec<u8>, pad: u8) -> Vec<u8> {
    while chunk.len() % 4 != 0 {
        chunk.push(pad);
    }
    chunk
}

/// Encodes `scene` as a GLB byte stream.
pub fn encode_glb(scene: &Scene) -> Result<Vec<u8>, EngineError> {
    let mut bin = BinBuilder::default();
    let mut gltf = Gltf {
        asset: Asset {
            version: "2.0".to_string(),
            generator: Some(concat!("plant-engine ", env!("CARGO_PKG_VERSION")).to_string()),
        },
        ..Gltf::default()
    };

    let mut children = Vec::with_capacity(scene.len());
    for component in scene.components() {
        let mesh = component.mesh().clone().with_normals();
        let positions = mesh.vertices_f32();
        let normals = mesh.normals_f32().unwrap_or_default();
        let indices = mesh.indices_u32();
        let (min, max) = vec3_bounds(&positions);
        let vertex_count = mesh.vertex_count();

        let position_view = bin.push(&positions, f32::to_le_bytes, ARRAY_BUFFER);
        let normal_view = bin.push(&normals, f32::to_le_bytes, ARRAY_BUFFER);
        let index_view = bin.push(&indices, u32::to_le_bytes, ELEMENT_ARRAY_BUFFER);

        let first_accessor = gltf.accessors.len();
        gltf.accessors.extend([
            Accessor {
                buffer_view: position_view,
                component_type: FLOAT,
                count: vertex_count,
                kind: "VEC3".to_string(),
                min: Some(min),
                max: Some(max),
            },
            Accessor {
                buffer_view: normal_view,
                component_type: FLOAT,
                count: vertex_count,
                kind: "VEC3".to_string(),
                min: None,
                max: None,
            },
            Accessor {
                buffer_view: index_view,
                component_type: UNSIGNED_INT,
                count: indices.len(),
                kind: "SCALAR".to_string(),
                min: None,
                max: None,
            },
        ]);

        let material = gltf.materials.len();
        gltf.materials.push(Material {
            name: Some(component.kind().to_string()),
            pbr_metallic_roughness: Pbr {
                base_color_factor: rgba_to_f32(component.color()),
                metallic_factor: 0.0,
                roughness_factor: 0.8,
            },
        });

        let mesh_index = gltf.meshes.len();
        gltf.meshes.push(GltfMesh {
            name: Some(component.label().to_string()),
            primitives: vec![Primitive {
                attributes: Attributes {
                    position: first_accessor,
                    normal: Some(first_accessor + 1),
                },
                indices: first_accessor + 2,
                material,
            }],
        });

        // Node 0 is the root; component nodes follow
        children.push(gltf.nodes.len() + 1);
        gltf.nodes.push(Node {
            name: Some(component.label().to_string()),
            mesh: Some(mesh_index),
            children: Vec::new(),
            rotation: None,
        });
    }

    gltf.nodes.insert(
        0,
        Node {
            name: Some("plant".to_string()),
            mesh: None,
            children,
            rotation: Some(Z_UP_TO_Y_UP),
        },
    );
    gltf.scenes.push(GltfScene { nodes: vec![0] });
    gltf.buffers.push(Buffer {
        byte_length: bin.bytes.len(),
    });
    gltf.buffer_views = bin.views;

    let json = padded(serde_json::to_vec(&gltf)?, b' ');
    let bin = padded(bin.bytes, 0);
    let total = 12 + 8 + json.len() + 8 + bin.len();

    let mut out = Vec::with_capacity(total);
    for word in [GLB_MAGIC, GLB_VERSION, total as u32] {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    Ok(out)
}

/// Writes `scene` into an already opened file.
pub fn write_glb(writer: &mut impl Write, path: &Path, scene: &Scene) -> Result<(), EngineError> {
    let bytes = encode_glb(scene)?;
    writer
        .write_all(&bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| EngineError::io(path, e))
}

/// What a GLB file says about one component.
#[derive(Debug, Clone, PartialEq)]
pub struct GlbComponent {
    pub name: String,
    pub color: [f32; 4],
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Z-up bounds from the position accessor.
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Component-level summary of an exported scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlbSummary {
    pub components: Vec<GlbComponent>,
}

impl GlbSummary {
    /// Union of every component's bounds, or `None` when empty.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        self.components
            .iter()
            .map(|c| (c.min, c.max))
            .reduce(|(min_a, max_a), (min_b, max_b)| {
                (
                    std::array::from_fn(|i| min_a[i].min(min_b[i])),
                    std::array::from_fn(|i| max_a[i].max(max_b[i])),
                )
            })
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, EngineError> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| EngineError::malformed("GLB", format!("truncated at byte {offset}")))
}

/// Parses a GLB stream back into a component summary.
pub fn decode_glb(bytes: &[u8]) -> Result<GlbSummary, EngineError> {
    if read_u32(bytes, 0)? != GLB_MAGIC {
        return Err(EngineError::malformed("GLB", "bad magic"));
    }
    if read_u32(bytes, 4)? != GLB_VERSION {
        return Err(EngineError::malformed("GLB", "unsupported version"));
    }
    if read_u32(bytes, 8)? as usize != bytes.len() {
        return Err(EngineError::malformed("GLB", "length field disagrees with file size"));
    }

    let json_len = read_u32(bytes, 12)? as usize;
    if read_u32(bytes, 16)? != CHUNK_JSON {
        return Err(EngineError::malformed("GLB", "first chunk is not JSON"));
    }
    let json = bytes
        .get(20..20 + json_len)
        .ok_or_else(|| EngineError::malformed("GLB", "JSON chunk overruns file"))?;
    let gltf: Gltf = serde_json::from_slice(json)?;

    let bin_offset = 20 + json_len;
    let bin_len = read_u32(bytes, bin_offset)? as usize;
    if read_u32(bytes, bin_offset + 4)? != CHUNK_BIN {
        return Err(EngineError::malformed("GLB", "second chunk is not BIN"));
    }
    let declared = gltf.buffers.first().map_or(0, |b| b.byte_length);
    if bin_len < declared || bytes.len() < bin_offset + 8 + bin_len {
        return Err(EngineError::malformed("GLB", "binary chunk shorter than buffer"));
    }

    let root = gltf
        .scenes
        .get(gltf.scene)
        .and_then(|s| s.nodes.first())
        .and_then(|&n| gltf.nodes.get(n))
        .ok_or_else(|| EngineError::malformed("GLB", "scene has no root node"))?;

    let missing = |what: &str| EngineError::malformed("GLB", format!("dangling {what} reference"));

    let components = root
        .children
        .iter()
        .map(|&child| {
            let node = gltf.nodes.get(child).ok_or_else(|| missing("node"))?;
            let mesh = node
                .mesh
                .and_then(|m| gltf.meshes.get(m))
                .ok_or_else(|| missing("mesh"))?;
            let primitive = mesh.primitives.first().ok_or_else(|| missing("primitive"))?;
            let material = gltf
                .materials
                .get(primitive.material)
                .ok_or_else(|| missing("material"))?;
            let position = gltf
                .accessors
                .get(primitive.attributes.position)
                .ok_or_else(|| missing("accessor"))?;
            let indices = gltf
                .accessors
                .get(primitive.indices)
                .ok_or_else(|| missing("accessor"))?;

            Ok(GlbComponent {
                name: node.name.clone().unwrap_or_default(),
                color: material.pbr_metallic_roughness.base_color_factor,
                vertex_count: position.count,
                triangle_count: indices.count / 3,
                min: position.min.unwrap_or_default(),
                max: position.max.unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    Ok(GlbSummary { components })
}

pub fn read_glb_summary(path: &Path) -> Result<GlbSummary, EngineError> {
    let bytes = fs::read(path).map_err(|e| EngineError::io(path, e))?;
    decode_glb(&bytes)
}
