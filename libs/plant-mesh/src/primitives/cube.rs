//! # Box Primitive
//!
//! Generates mesh for axis-aligned rectangular boxes.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Corner order: bottom ring (z = min) then top ring (z = max), both
/// counter-clockwise seen from above.
const FACES: [[u32; 3]; 12] = [
    // Bottom (z = min), viewed from below
    [0, 2, 1],
    [0, 3, 2],
    // Top (z = max)
    [4, 5, 6],
    [4, 6, 7],
    // Front (y = min)
    [0, 1, 5],
    [0, 5, 4],
    // Back (y = max)
    [2, 3, 7],
    [2, 7, 6],
    // Left (x = min)
    [3, 0, 4],
    [3, 4, 7],
    // Right (x = max)
    [1, 2, 6],
    [1, 6, 5],
];

/// Creates a rectangular box mesh.
///
/// # Arguments
///
/// * `extents` - Dimensions along [x, y, z]
/// * `center` - If true, center at origin; if false, min corner at origin
///
/// # Returns
///
/// A mesh with 8 vertices and 12 triangles with outward winding.
///
/// # Example
///
/// ```rust
/// use plant_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let mesh = create_cube(DVec3::new(100.0, 80.0, 40.0), true).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_cube(extents: DVec3, center: bool) -> Result<Mesh, MeshError> {
    if !(extents.x > 0.0 && extents.y > 0.0 && extents.z > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Box extents must be positive: {extents:?}"
        )));
    }

    let (min, max) = if center {
        (-extents / 2.0, extents / 2.0)
    } else {
        (DVec3::ZERO, extents)
    };

    let mut mesh = Mesh::with_capacity(8, FACES.len());
    for z in [min.z, max.z] {
        mesh.add_vertex(DVec3::new(min.x, min.y, z));
        mesh.add_vertex(DVec3::new(max.x, min.y, z));
        mesh.add_vertex(DVec3::new(max.x, max.y, z));
        mesh.add_vertex(DVec3::new(min.x, max.y, z));
    }
    for [a, b, c] in FACES {
        mesh.add_triangle(a, b, c);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_box_not_centered() {
        let mesh = create_cube(DVec3::new(10.0, 20.0, 30.0), false).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_box_centered() {
        let mesh = create_cube(DVec3::new(100.0, 80.0, 40.0), true).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-50.0, -40.0, -20.0));
        assert_eq!(max, DVec3::new(50.0, 40.0, 20.0));
    }

    #[test]
    fn test_box_validates() {
        let mesh = create_cube(DVec3::splat(3.0), true).unwrap();
        assert!(mesh.validate());
    }

    #[test]
    fn test_box_outward_winding() {
        // Signed volume is positive when every face winds outward
        let mesh = create_cube(DVec3::splat(2.0), true).unwrap();
        let volume: f64 = mesh
            .triangles()
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| mesh.vertex(i));
                a.dot(b.cross(c)) / 6.0
            })
            .sum();
        assert!((volume - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_zero_extent_is_degenerate() {
        let err = create_cube(DVec3::new(0.0, 10.0, 10.0), false).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_box_negative_extent() {
        assert!(create_cube(DVec3::new(-5.0, 10.0, 10.0), false).is_err());
    }
}
