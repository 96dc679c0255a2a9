use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side geometry ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

fn sphere_vertices(radius: f32, segments: u32, rings: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let phi = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let theta = u * TAU;
            let n = [-theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin()];
            vertices.push(Vertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
                uv: [u, v],
            });
        }
    }
    vertices
}

/// Triangle-list UV sphere with outward normals and counter-clockwise
/// front faces seen from outside.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let vertices = sphere_vertices(radius, segments, rings);
    let stride = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            // Skip the degenerate triangles at the poles.
            if r != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if r != rings - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData { vertices, indices }
}

/// Line-list lattice of meridians and parallels for the wireframe shell.
pub fn sphere_wireframe(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let vertices = sphere_vertices(radius, segments, rings);
    let stride = segments + 1;
    let mut indices = Vec::new();
    for r in 0..=rings {
        for s in 0..segments {
            let a = r * stride + s;
            // Parallels collapse to a point at the poles.
            if r != 0 && r != rings {
                indices.extend_from_slice(&[a, a + 1]);
            }
            if r != rings {
                indices.extend_from_slice(&[a, a + stride]);
            }
        }
    }
    MeshData { vertices, indices }
}

/// Unit quad in the XY plane centred on the origin, facing +Z, with the
/// image's top row at +Y.
pub fn unit_quad() -> MeshData {
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex {
            position: [-0.5, -0.5, 0.0],
            normal: n,
            uv: [0.0, 1.0],
        },
        Vertex {
            position: [0.5, -0.5, 0.0],
            normal: n,
            uv: [1.0, 1.0],
        },
        Vertex {
            position: [0.5, 0.5, 0.0],
            normal: n,
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [-0.5, 0.5, 0.0],
            normal: n,
            uv: [0.0, 0.0],
        },
    ];
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
