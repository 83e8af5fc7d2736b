//! The tile catalog: every tile the game knows, its save id and the exact
//! color that stands for it in source images.

use std::collections::HashMap;
use std::sync::OnceLock;

use tile_dither::Rgba;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEntry {
    /// Name used in configuration files (`grass_low`).
    pub name: &'static str,
    /// Identifier written into `tileMap` (`soil_low:grass_low`).
    pub save_id: &'static str,
    pub color: Rgba,
}

const fn tile(name: &'static str, save_id: &'static str, color: Rgba) -> TileEntry {
    TileEntry {
        name,
        save_id,
        color,
    }
}

/// Catalog table. Order matters: when two entries share a color, the
/// later one owns the color in reverse lookups.
pub const TILES: &[TileEntry] = &[
    tile("deep_ocean", "deep_ocean", [51, 112, 204, 255]),
    tile("close_ocean", "close_ocean", [64, 132, 226, 255]),
    tile("shallow_waters", "shallow_waters", [85, 174, 240, 255]),
    tile("sand", "sand", [247, 232, 152, 255]),
    tile("soil_low", "soil_low", [226, 147, 75, 255]),
    tile("soil_high", "soil_high", [182, 111, 58, 255]),
    tile("lava0", "lava0", [246, 45, 20, 255]),
    tile("lava1", "lava1", [255, 103, 0, 255]),
    tile("lava2", "lava2", [255, 172, 0, 255]),
    tile("lava3", "lava3", [255, 222, 0, 255]),
    tile("hills", "hills", [91, 94, 92, 255]),
    tile("mountains", "mountains", [65, 69, 69, 255]),
    tile("grass_low", "soil_low:grass_low", [126, 175, 70, 255]),
    tile("grass_high", "soil_high:grass_high", [95, 131, 60, 255]),
    tile("savanna_low", "soil_low:savanna_low", [240, 177, 33, 255]),
    tile("savanna_high", "soil_high:savanna_high", [207, 147, 27, 255]),
    tile("enchanted_low", "soil_low:enchanted_low", [140, 220, 106, 255]),
    tile("enchanted_high", "soil_high:enchanted_high", [118, 177, 83, 255]),
    tile("mushroom_low", "soil_low:mushroom_low", [103, 118, 66, 255]),
    tile("mushroom_high", "soil_high:mushroom_high", [85, 99, 56, 255]),
    tile("corruption_low", "soil_low:corruption_low", [111, 85, 108, 255]),
    tile("corruption_high", "soil_high:corruption_high", [83, 63, 81, 255]),
    tile("infernal_low", "soil_low:infernal_low", [156, 54, 38, 255]),
    tile("infernal_high", "soil_high:infernal_high", [104, 55, 45, 255]),
    tile("jungle_low", "soil_low:jungle_low", [70, 160, 82, 255]),
    tile("jungle_high", "soil_high:jungle_high", [31, 112, 32, 255]),
    tile("swamp_low", "soil_low:swamp_low", [77, 72, 62, 255]),
    tile("swamp_high", "soil_high:swamp_high", [69, 62, 52, 255]),
    tile("wasteland_low", "soil_low:wasteland_low", [132, 147, 113, 255]),
    tile("wasteland_high", "soil_high:wasteland_high", [108, 119, 89, 255]),
    tile("desert_low", "soil_low:desert_low", [232, 199, 110, 255]),
    tile("desert_high", "soil_high:desert_high", [225, 186, 90, 255]),
    tile("candy_low", "soil_low:candy_low", [255, 150, 176, 255]),
    tile("candy_high", "soil_high:candy_high", [95, 214, 203, 255]),
    tile("crystal_low", "soil_low:crystal_low", [255, 150, 176, 255]),
    tile("crystal_high", "soil_high:crystal_high", [251, 135, 164, 255]),
    tile("lemon_low", "soil_low:lemon_low", [209, 231, 113, 255]),
    tile("lemon_high", "soil_high:lemon_high", [138, 207, 85, 255]),
    tile("permafrost_low", "soil_low:permafrost_low", [153, 188, 219, 255]),
    tile("permafrost_high", "soil_high:permafrost_high", [180, 207, 229, 255]),
    tile("water_bomb", "soil_low:water_bomb", [109, 0, 205, 255]),
    tile("tumor_low", "soil_low:tumor_low", [238, 81, 131, 255]),
    tile("tumor_high", "soil_high:tumor_high", [254, 24, 100, 255]),
    tile("biomass_low", "soil_low:biomass_low", [69, 200, 66, 255]),
    tile("biomass_high", "soil_high:biomass_high", [65, 168, 64, 255]),
    tile("pumpkin_low", "soil_low:pumpkin_low", [143, 147, 57, 255]),
    tile("pumpkin_high", "soil_high:pumpkin_high", [105, 108, 2, 255]),
    tile("cybertile_low", "soil_low:cybertile_low", [158, 166, 163, 255]),
    tile("cybertile_high", "soil_high:cybertile_high", [133, 136, 134, 255]),
    tile("road", "soil_low:road", [193, 153, 124, 255]),
    tile("fuse", "soil_low:fuse", [131, 76, 76, 255]),
    tile("field", "soil_low:field", [168, 102, 58, 255]),
    tile("tnt", "soil_low:tnt", [163, 0, 0, 255]),
    tile("fireworks", "soil_low:fireworks", [180, 61, 204, 255]),
    tile("tnt_timed", "soil_low:tnt_timed", [127, 0, 0, 255]),
    tile("landmine", "soil_low:landmine", [153, 0, 0, 255]),
    tile("frozen_low", "soil_low:frozen_low", [186, 213, 211, 255]),
    tile("frozen_high", "soil_high:frozen_high", [211, 228, 227, 255]),
    tile("snow_sand", "soil_low:snow_sand", [175, 245, 241, 255]),
    tile("ice", "soil_low:ice", [167, 214, 244, 255]),
    tile("snow_hills", "soil_low:snow_hills", [226, 237, 236, 255]),
    tile("snow_block", "soil_low:snow_block", [252, 253, 253, 255]),
];

/// Bidirectional lookup over a tile table.
///
/// Forward lookups accept either the config name or the save id. Reverse
/// lookups go from an exact RGBA color to the save id of the last entry
/// carrying that color; earlier entries with the same color are recorded as
/// shadowed.
#[derive(Debug)]
pub struct TileCatalog {
    entries: &'static [TileEntry],
    by_name: HashMap<&'static str, usize>,
    by_color: HashMap<Rgba, usize>,
    shadowed: Vec<&'static str>,
}

impl TileCatalog {
    /// The built-in catalog, built on first use.
    pub fn global() -> &'static TileCatalog {
        static CATALOG: OnceLock<TileCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let catalog = TileCatalog::from_entries(TILES);
            for name in catalog.shadowed() {
                tracing::debug!(tile = %name, "Tile color is taken over by a later entry");
            }
            catalog
        })
    }

    pub fn from_entries(entries: &'static [TileEntry]) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len() * 2);
        let mut by_color = HashMap::with_capacity(entries.len());
        let mut shadowed = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name).or_insert(i);
            by_name.entry(entry.save_id).or_insert(i);
            if let Some(prev) = by_color.insert(entry.color, i) {
                shadowed.push(entries[prev].name);
            }
        }

        Self {
            entries,
            by_name,
            by_color,
            shadowed,
        }
    }

    pub fn entries(&self) -> &[TileEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by config name or save id.
    pub fn get(&self, name: &str) -> Option<&TileEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn color_of(&self, name: &str) -> Option<Rgba> {
        self.get(name).map(|entry| entry.color)
    }

    /// Save id for an exact color, or `None` when no tile carries it.
    pub fn save_id_for_color(&self, color: Rgba) -> Option<&'static str> {
        self.by_color.get(&color).map(|&i| self.entries[i].save_id)
    }

    /// Names whose color is owned by a later entry and therefore never
    /// produced by reverse lookups.
    pub fn shadowed(&self) -> &[&'static str] {
        &self.shadowed
    }
}
