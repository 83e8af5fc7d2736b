//! The save record serialized into `map.wbox`.
//!
//! Field order follows the game's loader. Serde serializes struct fields in
//! declaration order, so do not reorder them.

use serde::{Deserialize, Serialize};

use crate::encoding::{GridError, TileGrid};

/// Save format version understood by the game.
pub const SAVE_VERSION: u32 = 13;

/// Edge length, in pixels, of one map chunk.
pub const TILE_PIXEL_SIZE: u32 = 64;

pub const DEFAULT_MAP_NAME: &str = "BigBot's Inauspicious Kingdom";
pub const DEFAULT_ERA: &str = "age_hope";
pub const DEFAULT_ERA_MONTH_NEXT: u32 = 3000;

/// World laws in the order the game writes them. `Some(false)` marks a law
/// that is switched off; the others keep the game default.
const WORLD_LAWS: &[(&str, Option<bool>)] = &[
    ("world_law_diplomacy", None),
    ("world_law_peaceful_monsters", Some(false)),
    ("world_law_hunger", None),
    ("world_law_vegetation_random_seeds", None),
    ("world_law_vegetation_seeds", None),
    ("world_law_grow_minerals", None),
    ("world_law_grow_grass", None),
    ("world_law_biome_overgrowth", None),
    ("world_law_kingdom_expansion", None),
    ("world_law_old_age", None),
    ("world_law_animals_spawn", None),
    ("world_law_animals_babies", None),
    ("world_law_rebellions", None),
    ("world_law_border_stealing", None),
    ("world_law_erosion", None),
    ("world_law_forever_lava", Some(false)),
    ("world_law_disasters_nature", None),
    ("world_law_disasters_other", None),
    ("world_law_angry_civilians", Some(false)),
    ("world_law_civ_babies", None),
    ("world_law_forever_tumor_creep", Some(false)),
    ("world_law_civ_army", None),
    ("world_law_civ_limit_population_100", Some(false)),
    ("age_hope", None),
    ("age_sun", None),
    ("age_dark", None),
    ("age_tears", None),
    ("age_moon", None),
    ("age_chaos", None),
    ("age_wonders", None),
    ("age_ice", None),
    ("age_ash", None),
    ("age_despair", None),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStats {
    pub name: String,
    pub description: String,
    #[serde(rename = "worldTime")]
    pub world_time: u64,
    pub era_id: String,
    pub era_next_id: String,
    pub era_month_next: u32,
    pub deaths: u64,
    pub deaths_other: u64,
    pub id_unit: u64,
    pub id_building: u64,
}

impl Default for MapStats {
    fn default() -> Self {
        Self {
            name: DEFAULT_MAP_NAME.to_string(),
            description: String::new(),
            world_time: 0,
            era_id: DEFAULT_ERA.to_string(),
            era_next_id: String::new(),
            era_month_next: DEFAULT_ERA_MONTH_NEXT,
            deaths: 0,
            deaths_other: 0,
            id_unit: 0,
            id_building: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLaw {
    pub name: String,
    #[serde(
        rename = "boolVal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bool_val: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLaws {
    pub list: Vec<WorldLaw>,
}

impl Default for WorldLaws {
    fn default() -> Self {
        Self {
            list: WORLD_LAWS
                .iter()
                .map(|&(name, bool_val)| WorldLaw {
                    name: name.to_string(),
                    bool_val,
                })
                .collect(),
        }
    }
}

/// A complete, empty world with the given terrain.
///
/// Entity collections are always written as empty arrays; their element
/// type is left open since nothing is ever placed in them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    #[serde(rename = "saveVersion")]
    pub save_version: u32,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "mapStats")]
    pub map_stats: MapStats,
    #[serde(rename = "worldLaws")]
    pub world_laws: WorldLaws,
    #[serde(rename = "tileMap")]
    pub tile_map: Vec<String>,
    #[serde(rename = "tileArray")]
    pub tile_array: Vec<Vec<u32>>,
    #[serde(rename = "tileAmounts")]
    pub tile_amounts: Vec<Vec<u32>>,
    pub fire: Vec<serde_json::Value>,
    #[serde(rename = "conwayEater")]
    pub conway_eater: Vec<serde_json::Value>,
    #[serde(rename = "conwayCreator")]
    pub conway_creator: Vec<serde_json::Value>,
    pub frozen_tiles: Vec<serde_json::Value>,
    pub tiles: Vec<serde_json::Value>,
    pub cities: Vec<serde_json::Value>,
    pub actors_data: Vec<serde_json::Value>,
    pub buildings: Vec<serde_json::Value>,
    pub kingdoms: Vec<serde_json::Value>,
    pub clans: Vec<serde_json::Value>,
    pub alliances: Vec<serde_json::Value>,
    pub wars: Vec<serde_json::Value>,
    pub plots: Vec<serde_json::Value>,
    pub relations: Vec<serde_json::Value>,
    pub cultures: Vec<serde_json::Value>,
}

impl MapRecord {
    /// Build a record around an encoded grid. `pixel_width` and
    /// `pixel_height` are the normalized image size; the record stores them
    /// in chunks.
    pub fn new(grid: TileGrid, pixel_width: u32, pixel_height: u32) -> Self {
        let TileGrid {
            tile_map,
            tile_array,
            tile_amounts,
        } = grid;

        Self {
            save_version: SAVE_VERSION,
            width: pixel_width / TILE_PIXEL_SIZE,
            height: pixel_height / TILE_PIXEL_SIZE,
            map_stats: MapStats::default(),
            world_laws: WorldLaws::default(),
            tile_map,
            tile_array,
            tile_amounts,
            fire: Vec::new(),
            conway_eater: Vec::new(),
            conway_creator: Vec::new(),
            frozen_tiles: Vec::new(),
            tiles: Vec::new(),
            cities: Vec::new(),
            actors_data: Vec::new(),
            buildings: Vec::new(),
            kingdoms: Vec::new(),
            clans: Vec::new(),
            alliances: Vec::new(),
            wars: Vec::new(),
            plots: Vec::new(),
            relations: Vec::new(),
            cultures: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.map_stats.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.map_stats.description = description.into();
        self
    }

    /// The terrain portion of the record as a grid.
    pub fn grid(&self) -> TileGrid {
        TileGrid {
            tile_map: self.tile_map.clone(),
            tile_array: self.tile_array.clone(),
            tile_amounts: self.tile_amounts.clone(),
        }
    }

    /// Normalized image size in pixels.
    ///
    /// A decoded record can carry any chunk count, so this fails instead of
    /// wrapping when the pixel size does not fit in a `u32`.
    pub fn pixel_size(&self) -> Result<(u32, u32), GridError> {
        let too_large = || GridError::TooLarge {
            width: self.width,
            height: self.height,
        };
        let width = self.width.checked_mul(TILE_PIXEL_SIZE).ok_or_else(too_large)?;
        let height = self.height.checked_mul(TILE_PIXEL_SIZE).ok_or_else(too_large)?;
        Ok((width, height))
    }
}
