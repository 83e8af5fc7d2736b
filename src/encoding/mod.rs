pub mod tile_grid;

pub use tile_grid::{GridError, PixelSource, TileGrid, UNKNOWN_TILE};
