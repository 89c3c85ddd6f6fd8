use glam::Vec3;

use crate::gpu::device::{StepMode, VertexFormat, VertexStream};

/// Vertices in the unit cube (4 per face, so each face gets its own UVs
/// and normal).
pub const CUBE_VERTEX_COUNT: usize = 24;
/// Indices in the unit cube (two triangles per face).
pub const CUBE_INDEX_COUNT: usize = 36;
/// Height of the floor plane.
pub const FLOOR_Y: f32 = -5.0;
/// Half-extent of the floor along X and Z.
pub const FLOOR_HALF_EXTENT: f32 = 50.0;

/// Cube vertex: position, texture coordinate, face normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Object-space position on the `[-0.5, 0.5]` cube.
    pub position: [f32; 3],
    /// Per-face texture coordinate.
    pub uv: [f32; 2],
    /// Outward face normal.
    pub normal: [f32; 3],
}

/// Floor vertex: position and texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

/// (normal, u axis, v axis) per face. `v` points down the texture.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::NEG_Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::NEG_Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::NEG_Y),
    (Vec3::Y, Vec3::X, Vec3::Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
];

/// Corner UVs in quad order.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// The textured unit cube shared by all 24 mobile parts.
#[must_use]
pub fn cube_vertices() -> [CubeVertex; CUBE_VERTEX_COUNT] {
    std::array::from_fn(|i| {
        let (normal, u_axis, v_axis) = FACES[i / 4];
        let uv = QUAD_UVS[i % 4];
        let position = normal * 0.5
            + u_axis * (uv[0] - 0.5)
            + v_axis * (uv[1] - 0.5);
        CubeVertex {
            position: position.to_array(),
            uv,
            normal: normal.to_array(),
        }
    })
}

/// Two triangles per face over [`cube_vertices`].
#[must_use]
pub fn cube_indices() -> [u32; CUBE_INDEX_COUNT] {
    std::array::from_fn(|i| {
        let base = (i / 6 * 4) as u32;
        base + [0, 1, 2, 0, 2, 3][i % 6]
    })
}

/// The floor quad.
pub const FLOOR_VERTICES: [FloorVertex; 4] = [
    FloorVertex {
        position: [-FLOOR_HALF_EXTENT, FLOOR_Y, -FLOOR_HALF_EXTENT],
        uv: [0.0, 0.0],
    },
    FloorVertex {
        position: [FLOOR_HALF_EXTENT, FLOOR_Y, -FLOOR_HALF_EXTENT],
        uv: [1.0, 0.0],
    },
    FloorVertex {
        position: [FLOOR_HALF_EXTENT, FLOOR_Y, FLOOR_HALF_EXTENT],
        uv: [1.0, 1.0],
    },
    FloorVertex {
        position: [-FLOOR_HALF_EXTENT, FLOOR_Y, FLOOR_HALF_EXTENT],
        uv: [0.0, 1.0],
    },
];

/// Floor triangles.
pub const FLOOR_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Per-vertex stream for [`CubeVertex`] (locations 0..=2).
#[must_use]
pub fn cube_stream() -> VertexStream {
    VertexStream::packed(
        StepMode::Vertex,
        0,
        &[
            VertexFormat::Float32x3,
            VertexFormat::Float32x2,
            VertexFormat::Float32x3,
        ],
    )
}

/// Per-instance stream for the mobile records (locations 3..=7).
#[must_use]
pub fn instance_stream() -> VertexStream {
    VertexStream::packed(
        StepMode::Instance,
        3,
        &[
            VertexFormat::Float32x4,
            VertexFormat::Float32x4,
            VertexFormat::Float32x4,
            VertexFormat::Float32x4,
            VertexFormat::Float32,
        ],
    )
}

/// Per-vertex stream for [`FloorVertex`] (locations 0..=1).
#[must_use]
pub fn floor_stream() -> VertexStream {
    VertexStream::packed(
        StepMode::Vertex,
        0,
        &[VertexFormat::Float32x3, VertexFormat::Float32x2],
    )
}
