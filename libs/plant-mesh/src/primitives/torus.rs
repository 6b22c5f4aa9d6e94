//! # Torus Primitive
//!
//! Generates a full torus lying in the XY plane, axis along Z. Elbow
//! fittings are approximated with one of these.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a torus mesh centered at the origin.
///
/// # Arguments
///
/// * `major_radius` - Distance from the Z axis to the tube center
/// * `minor_radius` - Tube radius
/// * `major_sections` - Segments around the Z axis
/// * `minor_sections` - Segments around the tube
///
/// # Example
///
/// ```rust
/// use plant_mesh::primitives::create_torus;
///
/// let mesh = create_torus(7.5, 3.0, 32, 16).unwrap();
/// assert_eq!(mesh.vertex_count(), 32 * 16);
/// assert_eq!(mesh.triangle_count(), 2 * 32 * 16);
/// ```
pub fn create_torus(
    major_radius: f64,
    minor_radius: f64,
    major_sections: u32,
    minor_sections: u32,
) -> Result<Mesh, MeshError> {
    if !(minor_radius > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Torus minor radius must be positive: {minor_radius}"
        )));
    }

    if !(major_radius > minor_radius) {
        return Err(MeshError::degenerate(format!(
            "Torus major radius must exceed minor radius: R={major_radius}, r={minor_radius}"
        )));
    }

    if major_sections < 3 || minor_sections < 3 {
        return Err(MeshError::degenerate(format!(
            "Torus sections must be at least 3: {major_sections}x{minor_sections}"
        )));
    }

    // Indices are u32, so the ring count has to fit one
    let vertex_count = major_sections as usize * minor_sections as usize;
    if vertex_count > u32::MAX as usize {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: u32::MAX as usize,
        });
    }

    let (m, n) = (major_sections, minor_sections);
    let mut mesh = Mesh::with_capacity(vertex_count, 2 * vertex_count);

    for i in 0..m {
        let phi = TAU * i as f64 / m as f64;
        for j in 0..n {
            let theta = TAU * j as f64 / n as f64;
            let ring = major_radius + minor_radius * theta.cos();
            mesh.add_vertex(DVec3::new(
                ring * phi.cos(),
                ring * phi.sin(),
                minor_radius * theta.sin(),
            ));
        }
    }

    let index = |i: u32, j: u32| (i % m) * n + (j % n);
    for i in 0..m {
        for j in 0..n {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i + 1, j + 1);
            let d = index(i, j + 1);
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }

    Ok(mesh)
}
