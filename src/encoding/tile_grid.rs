use std::collections::HashMap;

use image::RgbaImage;
use tile_dither::Rgba;

use crate::tiles::TileCatalog;

/// Tile name given to pixels whose color is not in the catalog.
pub const UNKNOWN_TILE: &str = "";

/// Anything with dimensions and a per-pixel RGBA accessor.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn rgba(&self, x: u32, y: u32) -> Rgba;
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgba(&self, x: u32, y: u32) -> Rgba {
        self.get_pixel(x, y).0
    }
}

/// A structural problem in an encoded grid.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: {tiles} tile entries but {amounts} run lengths")]
    RowShape {
        row: usize,
        tiles: usize,
        amounts: usize,
    },

    #[error("row {row}: runs cover {covered} pixels, expected {width}")]
    RowWidth { row: usize, covered: u64, width: u32 },

    #[error("row {row}: run {run} has zero length")]
    EmptyRun { row: usize, run: usize },

    #[error("row {row}: runs {run} and {next} share tile index {index}", next = .run + 1)]
    SplitRun { row: usize, run: usize, index: u32 },

    #[error("row {row}: tile index {index} is outside the tile map ({len} entries)")]
    IndexOutOfRange { row: usize, index: u32, len: usize },

    #[error("tile map lists {name:?} more than once")]
    DuplicateTile { name: String },

    #[error("{width}x{height} chunks is too large to express in pixels")]
    TooLarge { width: u32, height: u32 },
}

/// First-seen-order index over tile names.
///
/// `names[i]` is the tile with index `i`; `lookup` is the inverse.
#[derive(Debug, Default)]
struct TileIndex {
    names: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl TileIndex {
    fn index_of(&mut self, name: &str) -> u32 {
        if let Some(&index) = self.lookup.get(name) {
            return index;
        }
        let index = self.names.len() as u32;
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), index);
        index
    }
}

/// A run-length encoded tile grid in save-file layout.
///
/// Rows are stored bottom-first: `tile_array[0]` is the last image row.
/// `tile_array[r]` and `tile_amounts[r]` are parallel (tile index, run
/// length) sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGrid {
    pub tile_map: Vec<String>,
    pub tile_array: Vec<Vec<u32>>,
    pub tile_amounts: Vec<Vec<u32>>,
}

impl TileGrid {
    /// Encode an image against the catalog.
    ///
    /// Pixels are scanned top row first, left to right; tile indices are
    /// handed out in that order. Colors without a catalog entry become
    /// [`UNKNOWN_TILE`] and are indexed like any other tile.
    pub fn encode<P: PixelSource + ?Sized>(image: &P, catalog: &TileCatalog) -> Self {
        let width = image.width();
        let height = image.height();

        let mut index = TileIndex::default();
        let mut tile_array = vec![Vec::new(); height as usize];
        let mut tile_amounts = vec![Vec::new(); height as usize];

        for y in 0..height {
            let row = (height - 1 - y) as usize;
            let mut open_run: Option<(u32, u32)> = None;

            for x in 0..width {
                let name = catalog
                    .save_id_for_color(image.rgba(x, y))
                    .unwrap_or(UNKNOWN_TILE);
                let num = index.index_of(name);

                open_run = match open_run {
                    Some((prev, len)) if prev == num => Some((prev, len + 1)),
                    Some((prev, len)) => {
                        tile_array[row].push(prev);
                        tile_amounts[row].push(len);
                        Some((num, 1))
                    }
                    None => Some((num, 1)),
                };
            }

            if let Some((prev, len)) = open_run {
                tile_array[row].push(prev);
                tile_amounts[row].push(len);
            }
        }

        tracing::debug!(
            width,
            height,
            tiles = index.names.len(),
            runs = tile_array.iter().map(Vec::len).sum::<usize>(),
            "Encoded tile grid"
        );

        Self {
            tile_map: index.names,
            tile_array,
            tile_amounts,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.tile_array.len()
    }

    /// Undo the run-length encoding and the vertical flip, giving one tile
    /// name per pixel with the top image row first.
    ///
    /// Indices outside the tile map expand to [`UNKNOWN_TILE`]; run
    /// [`validate`](Self::validate) first when the grid is untrusted.
    pub fn expand(&self) -> Vec<Vec<&str>> {
        self.tile_array
            .iter()
            .zip(&self.tile_amounts)
            .rev()
            .map(|(tiles, amounts)| {
                let mut row = Vec::new();
                for (&index, &amount) in tiles.iter().zip(amounts) {
                    let name = self
                        .tile_map
                        .get(index as usize)
                        .map(String::as_str)
                        .unwrap_or(UNKNOWN_TILE);
                    row.extend(std::iter::repeat(name).take(amount as usize));
                }
                row
            })
            .collect()
    }

    /// Check the structural invariants for a `width` x `height` pixel grid.
    ///
    /// The unknown tile is a legal entry and is not rejected here.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), GridError> {
        for (found, expected) in [
            (self.tile_array.len(), height as usize),
            (self.tile_amounts.len(), height as usize),
        ] {
            if found != expected {
                return Err(GridError::RowCount { expected, found });
            }
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.tile_map {
            if !seen.insert(name.as_str()) {
                return Err(GridError::DuplicateTile { name: name.clone() });
            }
        }

        for (row, (tiles, amounts)) in self.tile_array.iter().zip(&self.tile_amounts).enumerate() {
            if tiles.len() != amounts.len() {
                return Err(GridError::RowShape {
                    row,
                    tiles: tiles.len(),
                    amounts: amounts.len(),
                });
            }

            for (run, &index) in tiles.iter().enumerate() {
                if index as usize >= self.tile_map.len() {
                    return Err(GridError::IndexOutOfRange {
                        row,
                        index,
                        len: self.tile_map.len(),
                    });
                }
                if amounts[run] == 0 {
                    return Err(GridError::EmptyRun { row, run });
                }
                if run > 0 && tiles[run - 1] == index {
                    return Err(GridError::SplitRun {
                        row,
                        run: run - 1,
                        index,
                    });
                }
            }

            let covered: u64 = amounts.iter().map(|&a| a as u64).sum();
            if covered != width as u64 {
                return Err(GridError::RowWidth {
                    row,
                    covered,
                    width,
                });
            }
        }

        Ok(())
    }

    /// Pixel count per tile, in tile map order.
    pub fn tile_counts(&self) -> Vec<(&str, u64)> {
        let mut counts = vec![0u64; self.tile_map.len()];
        for (tiles, amounts) in self.tile_array.iter().zip(&self.tile_amounts) {
            for (&index, &amount) in tiles.iter().zip(amounts) {
                if let Some(count) = counts.get_mut(index as usize) {
                    *count += amount as u64;
                }
            }
        }
        self.tile_map
            .iter()
            .map(String::as_str)
            .zip(counts)
            .collect()
    }
}
