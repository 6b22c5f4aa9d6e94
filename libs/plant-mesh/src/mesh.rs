//! # Mesh
//!
//! Indexed triangle soup with optional per-vertex color and normal
//! channels. Transforms consume the mesh and hand back the moved value, so
//! a primitive reused across trains can never be aliased and mutated behind
//! another component's back.

use config::constants::{DEFAULT_COLOR, DEGENERATE_AREA_EPSILON};
use glam::{DMat4, DVec3};

use crate::error::MeshError;

/// Plant geometry in world units.
///
/// Positions are f64 throughout; narrowing to f32 only happens in the
/// export helpers.
///
/// # Example
///
/// ```rust
/// use plant_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut quad = Mesh::new();
/// for corner in [DVec3::ZERO, DVec3::X, DVec3::X + DVec3::Y, DVec3::Y] {
///     quad.add_vertex(corner);
/// }
/// quad.add_triangle(0, 1, 2);
/// quad.add_triangle(0, 2, 3);
///
/// let lifted = quad.translated(DVec3::Z);
/// assert_eq!(lifted.vertex(2), DVec3::new(1.0, 1.0, 1.0));
/// assert_eq!(lifted.surface_area(), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    /// Counter-clockwise when seen from outside.
    triangles: Vec<[u32; 3]>,
    /// One RGBA entry per vertex when present.
    colors: Option<Vec<[f32; 4]>>,
    /// One unit normal per vertex when present.
    normals: Option<Vec<DVec3>>,
}

fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    0.5 * (b - a).cross(c - a).length()
}

fn flatten_f32(points: &[DVec3]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect()
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty mesh with room reserved for the given counts.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            ..Self::default()
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when nothing would be drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    fn corners(&self, tri: &[u32; 3]) -> [DVec3; 3] {
        tri.map(|i| self.vertices[i as usize])
    }

    /// Returns the mesh with every vertex passed through `f`.
    ///
    /// Used for non-affine edits such as clamping a sphere into a dome.
    /// Normals are dropped since they no longer match.
    pub fn map_vertices(mut self, f: impl Fn(DVec3) -> DVec3) -> Self {
        self.vertices.iter_mut().for_each(|v| *v = f(*v));
        self.normals = None;
        self
    }

    /// Returns the mesh with every vertex set to `color`.
    pub fn with_uniform_color(mut self, color: [f32; 4]) -> Self {
        self.colors = Some(vec![color; self.vertices.len()]);
        self
    }

    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.colors.as_deref()
    }

    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Returns the mesh with area-weighted smooth vertex normals.
    pub fn with_normals(mut self) -> Self {
        let mut sums = vec![DVec3::ZERO; self.vertices.len()];
        for tri in &self.triangles {
            let [a, b, c] = self.corners(tri);
            // Unnormalized cross product weights by area
            let face = (b - a).cross(c - a);
            for &i in tri {
                sums[i as usize] += face;
            }
        }
        self.normals = Some(sums.into_iter().map(DVec3::normalize_or_zero).collect());
        self
    }

    /// Axis-aligned `(min, max)`; both corners are the origin for an empty
    /// mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((&first, rest)) = self.vertices.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        rest.iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
    }

    /// Sum of triangle areas.
    pub fn surface_area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = self.corners(tri);
                triangle_area(a, b, c)
            })
            .sum()
    }

    /// Area-weighted centroid of the surface.
    ///
    /// Each triangle contributes its centroid weighted by its area. When the
    /// mesh has no area (e.g. only degenerate triangles) the plain vertex
    /// mean is returned instead. An empty mesh yields the origin.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plant_mesh::primitives::create_cube;
    /// use glam::DVec3;
    ///
    /// let cube = create_cube(DVec3::splat(2.0), false).unwrap();
    /// assert!((cube.centroid() - DVec3::ONE).length() < 1e-9);
    /// ```
    pub fn centroid(&self) -> DVec3 {
        let (weighted, total_area) = self.triangles.iter().fold(
            (DVec3::ZERO, 0.0),
            |(weighted, total), tri| {
                let [a, b, c] = self.corners(tri);
                let area = triangle_area(a, b, c);
                (weighted + (a + b + c) / 3.0 * area, total + area)
            },
        );

        if total_area > DEGENERATE_AREA_EPSILON {
            weighted / total_area
        } else if self.vertices.is_empty() {
            DVec3::ZERO
        } else {
            self.vertices.iter().sum::<DVec3>() / self.vertices.len() as f64
        }
    }

    /// Returns the mesh with `matrix` applied to positions and normals.
    pub fn transformed(mut self, matrix: &DMat4) -> Self {
        self.vertices
            .iter_mut()
            .for_each(|v| *v = matrix.transform_point3(*v));

        if let Some(normals) = &mut self.normals {
            let inverse_transpose = matrix.inverse().transpose();
            normals
                .iter_mut()
                .for_each(|n| *n = inverse_transpose.transform_vector3(*n).normalize_or_zero());
        }

        self
    }

    /// Returns the mesh moved by `offset`.
    pub fn translated(mut self, offset: DVec3) -> Self {
        self.vertices.iter_mut().for_each(|v| *v += offset);
        self
    }

    /// Appends `other`, re-indexing its triangles.
    ///
    /// A color channel on either side survives; the side without one is
    /// padded with the default color. Normals survive only when both sides
    /// carry them.
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.vertices.len();
        let shift = base as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.triangles
            .extend(other.triangles.iter().map(|tri| tri.map(|i| i + shift)));

        self.colors = match (self.colors.take(), &other.colors) {
            (None, None) => None,
            (own, theirs) => {
                let mut colors = own.unwrap_or_else(|| vec![DEFAULT_COLOR; base]);
                match theirs {
                    Some(theirs) => colors.extend_from_slice(theirs),
                    None => colors.resize(base + other.vertices.len(), DEFAULT_COLOR),
                }
                Some(colors)
            }
        };

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut own), Some(theirs)) => {
                own.extend_from_slice(theirs);
                Some(own)
            }
            (None, Some(theirs)) if base == 0 => Some(theirs.clone()),
            _ => None,
        };
    }

    /// Concatenates meshes into one, without welding vertices.
    ///
    /// Fails if the combined vertex count no longer fits a `u32` index.
    pub fn concatenate<'a>(meshes: impl IntoIterator<Item = &'a Mesh>) -> Result<Mesh, MeshError> {
        let meshes: Vec<&Mesh> = meshes.into_iter().collect();
        let vertex_count: usize = meshes.iter().map(|m| m.vertex_count()).sum();
        let triangle_count: usize = meshes.iter().map(|m| m.triangle_count()).sum();

        if vertex_count > u32::MAX as usize {
            return Err(MeshError::TooManyVertices {
                count: vertex_count,
                max: u32::MAX as usize,
            });
        }

        let mut combined = Mesh::with_capacity(vertex_count, triangle_count);
        for mesh in meshes {
            combined.merge(mesh);
        }
        Ok(combined)
    }

    /// Strict check: indices in range, finite vertices, and no triangle
    /// with a repeated index or (near) zero area.
    pub fn validate(&self) -> bool {
        self.check_indices().is_ok()
            && self.triangles.iter().all(|tri| {
                let [i, j, k] = *tri;
                if i == j || j == k || i == k {
                    return false;
                }
                let [a, b, c] = self.corners(tri);
                (b - a).cross(c - a).length() >= DEGENERATE_AREA_EPSILON
            })
    }

    /// Checks that every triangle index is in range and every vertex is
    /// finite. Weaker than [`Mesh::validate`]: flattened triangles pass.
    pub fn check_indices(&self) -> Result<(), MeshError> {
        if let Some(position) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::validation(format!(
                "vertex {position} is not finite"
            )));
        }

        let limit = self.vertices.len();
        if let Some(index) = self
            .triangles
            .iter()
            .position(|tri| tri.iter().any(|&i| i as usize >= limit))
        {
            return Err(MeshError::validation(format!(
                "triangle {index} references a vertex outside 0..{limit}"
            )));
        }

        Ok(())
    }

    /// Positions as `[x, y, z, x, y, z, ...]`.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten_f32(&self.vertices)
    }

    /// Indices as `[a, b, c, a, b, c, ...]`.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Normals flattened like [`Mesh::vertices_f32`], if present.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_deref().map(flatten_f32)
    }
}
