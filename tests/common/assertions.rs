//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use wboxer::encoding::TileGrid;

/// Assert the run-length invariants for every row of a grid
pub fn assert_valid_grid(grid: &TileGrid, width: u32, height: u32) {
    assert_eq!(grid.tile_array.len(), height as usize, "row count");
    assert_eq!(grid.tile_amounts.len(), height as usize, "row count");

    for (row, (tiles, amounts)) in grid.tile_array.iter().zip(&grid.tile_amounts).enumerate() {
        assert_eq!(tiles.len(), amounts.len(), "row {row}: table lengths differ");
        let covered: u64 = amounts.iter().map(|&a| a as u64).sum();
        assert_eq!(covered, width as u64, "row {row}: runs do not cover the width");
        for pair in tiles.windows(2) {
            assert!(pair[0] != pair[1], "row {row}: adjacent runs share index {}", pair[0]);
        }
    }

    grid.validate(width, height).unwrap();
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert bytes look like a zlib stream
pub fn assert_zlib(bytes: &[u8]) {
    assert!(bytes.len() >= 2, "stream too short: {} bytes", bytes.len());
    assert_eq!(bytes[0], 0x78, "unexpected CMF byte");
    assert_eq!(
        u16::from_be_bytes([bytes[0], bytes[1]]) % 31,
        0,
        "zlib header check bits are wrong"
    );
}
