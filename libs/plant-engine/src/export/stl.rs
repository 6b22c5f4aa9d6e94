//! Binary STL of the merged solid.
//!
//! 80-byte header, little-endian triangle count, then 50 bytes per facet:
//! normal, three vertices (f32 triplets) and a zero attribute word.

use std::fs;
use std::path::Path;

use glam::DVec3;
use plant_mesh::Mesh;

use crate::error::EngineError;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

fn push_f32_triplet(bytes: &mut Vec<u8>, value: DVec3) {
    for component in value.to_array() {
        bytes.extend_from_slice(&(component as f32).to_le_bytes());
    }
}

/// Encodes `mesh` with `name` written into the header.
///
/// # Example
///
/// ```rust
/// use plant_engine::export::stl::encode_binary_stl;
/// use plant_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let cube = create_cube(DVec3::ONE, true).unwrap();
/// let bytes = encode_binary_stl(&cube, "cube");
/// assert_eq!(bytes.len(), 84 + 12 * 50);
/// ```
pub fn encode_binary_stl(mesh: &Mesh, name: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + 4 + mesh.triangle_count() * FACET_LEN);

    let mut header = [0u8; HEADER_LEN];
    let name = name.as_bytes();
    let len = name.len().min(HEADER_LEN);
    header[..len].copy_from_slice(&name[..len]);
    bytes.extend_from_slice(&header);

    bytes.extend_from_slice(&(mesh.triangle_count() as u32).to_le_bytes());

    for tri in mesh.triangles() {
        let [a, b, c] = tri.map(|i| mesh.vertex(i));
        let normal = (b - a).cross(c - a).normalize_or_zero();

        push_f32_triplet(&mut bytes, normal);
        push_f32_triplet(&mut bytes, a);
        push_f32_triplet(&mut bytes, b);
        push_f32_triplet(&mut bytes, c);
        bytes.extend_from_slice(&0u16.to_le_bytes());
    }

    bytes
}

pub fn write_binary_stl(path: &Path, mesh: &Mesh, name: &str) -> Result<(), EngineError> {
    fs::write(path, encode_binary_stl(mesh, name)).map_err(|e| EngineError::io(path, e))
}

fn read_f32(bytes: &[u8], offset: usize) -> f64 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    f32::from_le_bytes(word) as f64
}

/// Decodes a binary STL into an unwelded mesh: three vertices per facet.
pub fn decode_binary_stl(bytes: &[u8]) -> Result<Mesh, EngineError> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(EngineError::malformed("STL", "file shorter than header"));
    }

    let mut count = [0u8; 4];
    count.copy_from_slice(&bytes[HEADER_LEN..HEADER_LEN + 4]);
    let facets = u32::from_le_bytes(count) as usize;

    let expected = HEADER_LEN + 4 + facets * FACET_LEN;
    if bytes.len() != expected {
        return Err(EngineError::malformed(
            "STL",
            format!("{facets} facets need {expected} bytes, found {}", bytes.len()),
        ));
    }

    let mut mesh = Mesh::with_capacity(facets * 3, facets);
    for facet in bytes[HEADER_LEN + 4..].chunks_exact(FACET_LEN) {
        let mut corners = [0u32; 3];
        for (corner, index) in corners.iter_mut().enumerate() {
            // Skip the 12-byte normal
            let offset = 12 + corner * 12;
            *index = mesh.add_vertex(DVec3::new(
                read_f32(facet, offset),
                read_f32(facet, offset + 4),
                read_f32(facet, offset + 8),
            ));
        }
        mesh.add_triangle(corners[0], corners[1], corners[2]);
    }

    Ok(mesh)
}

pub fn read_binary_stl(path: &Path) -> Result<Mesh, EngineError> {
    let bytes = fs::read(path).map_err(|e| EngineError::io(path, e))?;
    decode_binary_stl(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plant_mesh::primitives::create_cube;

    #[test]
    fn test_header_and_count() {
        let cube = create_cube(DVec3::ONE, false).unwrap();
        let bytes = encode_binary_stl(&cube, "wtp");
        assert_eq!(&bytes[..3], b"wtp");
        assert!(bytes[3..80].iter().all(|&b| b == 0));
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 12);
    }

    #[test]
    fn test_long_name_truncated() {
        let cube = create_cube(DVec3::ONE, false).unwrap();
        let name = "x".repeat(200);
        assert_eq!(encode_binary_stl(&cube, &name).len(), 84 + 12 * 50);
    }

    #[test]
    fn test_decode_keeps_bounds() {
        let cube = create_cube(DVec3::new(2.0, 4.0, 6.0), true).unwrap();
        let decoded = decode_binary_stl(&encode_binary_stl(&cube, "box")).unwrap();
        assert_eq!(decoded.triangle_count(), 12);
        assert_eq!(decoded.vertex_count(), 36);
        assert_eq!(decoded.bounding_box(), cube.bounding_box());
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let cube = create_cube(DVec3::ONE, false).unwrap();
        let bytes = encode_binary_stl(&cube, "cube");
        assert!(matches!(
            decode_binary_stl(&bytes[..bytes.len() - 1]),
            Err(EngineError::MalformedExport { format: "STL", .. })
        ));
        assert!(decode_binary_stl(&bytes[..40]).is_err());
    }
}
