pub mod catalog;
pub mod palette;

pub use catalog::{TileCatalog, TileEntry, TILES};
pub use palette::{resolve_palette, ResolvedPalette};
