//! Static scene data: the unit cube every mobile part is drawn from, the
//! floor quad, vertex stream layouts and procedural textures.

mod geometry;
mod textures;

pub use geometry::{
    cube_indices, cube_stream, cube_vertices, floor_stream, instance_stream,
    CubeVertex, FloorVertex, CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT,
    FLOOR_HALF_EXTENT, FLOOR_INDICES, FLOOR_VERTICES, FLOOR_Y,
};
pub use textures::{
    floor_checker, MobileTextures, TextureImage, CHECKER_DARK, CHECKER_LIGHT,
    CHECKER_SQUARE, FLOOR_TEXTURE_SIZE, MOBILE_TEXTURE_SIZE,
};
