pub mod config;
pub mod map_record;

pub use config::{ConfigError, Configuration};
pub use map_record::{MapRecord, MapStats, WorldLaw, WorldLaws, SAVE_VERSION, TILE_PIXEL_SIZE};
