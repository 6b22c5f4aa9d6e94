//! # Cylinder Primitive
//!
//! Generates closed cylinders along the Z axis. Pipes, nozzle stages and
//! tank bodies are all built from this.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a closed cylinder mesh along Z.
///
/// # Arguments
///
/// * `radius` - Radius of both caps
/// * `height` - Length along Z
/// * `center` - If true, spans z in [-h/2, h/2]; otherwise [0, h]
/// * `sections` - Number of segments around the circumference
///
/// # Example
///
/// ```rust
/// use plant_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(2.0, 10.0, false, 32).unwrap();
/// let (min, max) = mesh.bounding_box();
/// assert_eq!(min.z, 0.0);
/// assert_eq!(max.z, 10.0);
/// ```
pub fn create_cylinder(
    radius: f64,
    height: f64,
    center: bool,
    sections: u32,
) -> Result<Mesh, MeshError> {
    if !(height > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Cylinder height must be positive: {height}"
        )));
    }

    if !(radius > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Cylinder radius must be positive: {radius}"
        )));
    }

    if sections < 3 {
        return Err(MeshError::degenerate(format!(
            "Cylinder sections must be at least 3: {sections}"
        )));
    }

    let (z_bottom, z_top) = if center {
        (-height / 2.0, height / 2.0)
    } else {
        (0.0, height)
    };

    let n = sections as usize;
    let mut mesh = Mesh::with_capacity(2 * n, 4 * n);

    let ring = |mesh: &mut Mesh, z: f64| -> Vec<u32> {
        (0..sections)
            .map(|j| {
                let theta = TAU * j as f64 / sections as f64;
                mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), z))
            })
            .collect()
    };
    let bottom = ring(&mut mesh, z_bottom);
    let top = ring(&mut mesh, z_top);

    // Side wall
    for j in 0..n {
        let k = (j + 1) % n;
        mesh.add_triangle(bottom[j], bottom[k], top[k]);
        mesh.add_triangle(bottom[j], top[k], top[j]);
    }

    // Caps as fans, bottom facing -Z and top facing +Z
    for j in 1..n - 1 {
        mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
        mesh.add_triangle(top[0], top[j], top[j + 1]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_basic() {
        let mesh = create_cylinder(5.0, 10.0, false, 32).unwrap();
        assert_eq!(mesh.vertex_count(), 64);
        assert_eq!(mesh.triangle_count(), 2 * 32 + 2 * 30);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_centered() {
        let mesh = create_cylinder(5.0, 10.0, true, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min.z, -5.0);
        assert_eq!(max.z, 5.0);
    }

    #[test]
    fn test_cylinder_radius_bounds() {
        let mesh = create_cylinder(5.0, 10.0, false, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert!((max.x - 5.0).abs() < 1e-12);
        assert!(min.x >= -5.0 - 1e-12);
        assert!(max.y <= 5.0 + 1e-12);
    }

    #[test]
    fn test_cylinder_invalid_height() {
        assert!(create_cylinder(5.0, 0.0, false, 32).is_err());
    }

    #[test]
    fn test_cylinder_invalid_radius() {
        assert!(create_cylinder(0.0, 10.0, false, 32).is_err());
        assert!(create_cylinder(f64::NAN, 10.0, false, 32).is_err());
    }

    #[test]
    fn test_cylinder_too_few_sections() {
        assert!(create_cylinder(5.0, 10.0, false, 2).is_err());
    }
}
