use crate::math::Vec3;
use std::f64::consts::{PI, TAU};

/// Model space vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Texture coordinates, `v = 0` at the top row of the image
    pub uv: [f64; 2],
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Unit UV sphere centred on the origin with poles on the Y-axis
    pub fn sphere(segments: usize) -> Self {
        let width = segments.max(3);
        let height = (segments / 2).max(2);
        let mut mesh = Mesh::default();

        for iy in 0..=height {
            let v = iy as f64 / height as f64;
            let (sin_lat, cos_lat) = (v * PI).sin_cos();
            for ix in 0..=width {
                let u = ix as f64 / width as f64;
                let (sin_lon, cos_lon) = (u * TAU).sin_cos();
                let position = [-cos_lon * sin_lat, cos_lat, sin_lon * sin_lat];
                mesh.vertices.push(MeshVertex {
                    position,
                    normal: position,
                    uv: [u, v],
                });
            }
        }

        let row = width + 1;
        for iy in 0..height {
            for ix in 0..width {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // The pole rows collapse into single triangles
                if iy != 0 {
                    mesh.triangles.push([a, b, d]);
                }
                if iy != height - 1 {
                    mesh.triangles.push([b, c, d]);
                }
            }
        }
        mesh
    }

    /// Flat annulus in the XY plane facing +Z
    pub fn ring(inner_radius: f64, outer_radius: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let mut mesh = Mesh::default();

        for (v, radius) in [(0.0, inner_radius), (1.0, outer_radius)] {
            for i in 0..=segments {
                let u = i as f64 / segments as f64;
                let (sin, cos) = (u * TAU).sin_cos();
                mesh.vertices.push(MeshVertex {
                    position: [radius * cos, radius * sin, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [u, v],
                });
            }
        }

        let row = segments + 1;
        for i in 0..segments {
            let inner = i;
            let outer = row + i;
            mesh.triangles.push([inner, outer, outer + 1]);
            mesh.triangles.push([inner, outer + 1, inner + 1]);
        }
        mesh
    }
}
