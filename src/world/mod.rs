//! The tile world
//!
//! A map file is parsed into a [`MapFile`] (pure text work), then resolved
//! into a [`Flooring`]: a grid of tile stacks whose textures live in a
//! [`TextureCache`] owned by the flooring itself.

pub mod flooring;
pub mod map_file;
pub mod sprites;
pub mod texture_cache;

pub use flooring::Flooring;
pub use map_file::MapFile;
pub use sprites::SpriteKey;
pub use texture_cache::{TextureCache, TextureId};

/// Edge length of one map tile, in sheet pixels and world pixels
pub const TILE_SIZE: u32 = 16;
