//! Encoding properties of the tile grid over whole images.

mod common;

use common::fixtures::{self, colors};
use common::assert_valid_grid;
use pretty_assertions::assert_eq;
use wboxer::encoding::{TileGrid, UNKNOWN_TILE};
use wboxer::tiles::{resolve_palette, TileCatalog};

fn expected_names(image: &image::RgbaImage) -> Vec<Vec<&'static str>> {
    let catalog = TileCatalog::global();
    (0..image.height())
        .map(|y| {
            (0..image.width())
                .map(|x| {
                    catalog
                        .save_id_for_color(image.get_pixel(x, y).0)
                        .unwrap_or(UNKNOWN_TILE)
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_uniform_image() {
    let image = fixtures::uniform(64, 64, colors::GRASS_LOW);
    let grid = TileGrid::encode(&image, TileCatalog::global());

    assert_eq!(grid.tile_map, vec!["soil_low:grass_low"]);
    assert_eq!(grid.tile_array, vec![vec![0]; 64]);
    assert_eq!(grid.tile_amounts, vec![vec![64]; 64]);
}

#[test]
fn test_checkerboard_image() {
    let image = fixtures::checkerboard(64, 64, colors::DEEP_OCEAN, colors::SAND);
    let grid = TileGrid::encode(&image, TileCatalog::global());
    assert_valid_grid(&grid, 64, 64);

    assert_eq!(grid.tile_map, vec!["deep_ocean", "sand"]);
    for (row, tiles) in grid.tile_array.iter().enumerate() {
        assert_eq!(tiles.len(), 64);
        assert!(grid.tile_amounts[row].iter().all(|&a| a == 1));
        // row 0 holds the bottom image row (y = 63), which starts with sand
        let y = 63 - row as u32;
        let first = if y % 2 == 0 { 0 } else { 1 };
        assert_eq!(tiles[0], first, "row {row}");
    }
}

#[test]
fn test_first_index_is_top_left_pixel() {
    let mut image = fixtures::island(128, 128);
    image.put_pixel(0, 0, image::Rgba(colors::MOUNTAINS));
    let grid = TileGrid::encode(&image, TileCatalog::global());
    assert_eq!(grid.tile_map[0], "mountains");
}

#[test]
fn test_island_round_trip() {
    let image = fixtures::island(192, 128);
    let grid = TileGrid::encode(&image, TileCatalog::global());

    assert_valid_grid(&grid, 192, 128);
    assert_eq!(grid.expand(), expected_names(&image));
}

#[test]
fn test_tile_map_in_first_appearance_order() {
    let image = fixtures::island(128, 128);
    let grid = TileGrid::encode(&image, TileCatalog::global());

    let mut seen: Vec<&str> = Vec::new();
    for row in expected_names(&image) {
        for name in row {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
    }
    assert_eq!(grid.tile_map, seen);
}

#[test]
fn test_unknown_color_becomes_empty_tile() {
    let mut image = fixtures::uniform(64, 64, colors::SAND);
    image.put_pixel(10, 5, image::Rgba(colors::MAGENTA));
    let grid = TileGrid::encode(&image, TileCatalog::global());

    assert_valid_grid(&grid, 64, 64);
    assert_eq!(grid.tile_map, vec!["sand", UNKNOWN_TILE]);
    assert_eq!(grid.expand()[5][10], UNKNOWN_TILE);
    // image row 5 is stored in row 58
    assert_eq!(grid.tile_array[58], vec![0, 1, 0]);
    assert_eq!(grid.tile_amounts[58], vec![10, 1, 53]);
}

#[test]
fn test_tile_counts_cover_image() {
    let image = fixtures::island(128, 64);
    let grid = TileGrid::encode(&image, TileCatalog::global());
    let total: u64 = grid.tile_counts().iter().map(|(_, count)| count).sum();
    assert_eq!(total, 128 * 64);
}

#[test]
fn test_empty_included_list_gives_empty_palette() {
    let resolved = resolve_palette::<String>(&[], TileCatalog::global());
    assert!(resolved.is_empty());
}
