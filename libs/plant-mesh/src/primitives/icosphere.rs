//! # Icosphere Primitive
//!
//! Generates spheres by repeatedly subdividing an icosahedron and pushing
//! the new vertices back onto the sphere. Used for tank domes, where the
//! even triangle distribution clips cleanly at the equator.

use std::collections::HashMap;

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Subdivision levels above this explode the triangle count (20 * 4^n).
const MAX_SUBDIVISIONS: u32 = 6;

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [DVec3; 12] {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    [
        DVec3::new(-1.0, t, 0.0),
        DVec3::new(1.0, t, 0.0),
        DVec3::new(-1.0, -t, 0.0),
        DVec3::new(1.0, -t, 0.0),
        DVec3::new(0.0, -1.0, t),
        DVec3::new(0.0, 1.0, t),
        DVec3::new(0.0, -1.0, -t),
        DVec3::new(0.0, 1.0, -t),
        DVec3::new(t, 0.0, -1.0),
        DVec3::new(t, 0.0, 1.0),
        DVec3::new(-t, 0.0, -1.0),
        DVec3::new(-t, 0.0, 1.0),
    ]
}

/// Creates an icosphere mesh centered at the origin.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `subdivisions` - Number of 1-to-4 triangle splits applied
///
/// # Returns
///
/// A closed mesh with `20 * 4^subdivisions` triangles.
///
/// # Example
///
/// ```rust
/// use plant_mesh::primitives::create_icosphere;
///
/// let mesh = create_icosphere(5.0, 2).unwrap();
/// assert_eq!(mesh.triangle_count(), 320);
/// assert_eq!(mesh.vertex_count(), 162);
/// ```
pub fn create_icosphere(radius: f64, subdivisions: u32) -> Result<Mesh, MeshError> {
    if !(radius > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Sphere radius must be positive: {radius}"
        )));
    }

    if subdivisions > MAX_SUBDIVISIONS {
        return Err(MeshError::degenerate(format!(
            "Sphere subdivisions must be at most {MAX_SUBDIVISIONS}: {subdivisions}"
        )));
    }

    // Work on the unit sphere, scale at the end
    let mut points: Vec<DVec3> = icosahedron_vertices()
        .iter()
        .map(|v| v.normalize())
        .collect();
    let mut faces: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, points: &mut Vec<DVec3>| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = ((points[a as usize] + points[b as usize]) / 2.0).normalize();
                points.push(mid);
                (points.len() - 1) as u32
            })
        };

        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut points);
            let bc = midpoint(b, c, &mut points);
            let ca = midpoint(c, a, &mut points);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    let mut mesh = Mesh::with_capacity(points.len(), faces.len());
    for p in points {
        mesh.add_vertex(p * radius);
    }
    for [a, b, c] in faces {
        mesh.add_triangle(a, b, c);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_base() {
        let mesh = create_icosphere(1.0, 0).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        assert!(mesh.validate());
    }

    #[test]
    fn test_vertices_on_sphere() {
        let radius = 7.5;
        let mesh = create_icosphere(radius, 2).unwrap();
        for v in mesh.vertices() {
            assert!((v.length() - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_outward_winding() {
        let mesh = create_icosphere(1.0, 1).unwrap();
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.vertex(i));
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_invalid_radius() {
        assert!(create_icosphere(0.0, 2).is_err());
        assert!(create_icosphere(-1.0, 2).is_err());
    }

    #[test]
    fn test_subdivision_limit() {
        assert!(create_icosphere(1.0, MAX_SUBDIVISIONS + 1).is_err());
    }
}
