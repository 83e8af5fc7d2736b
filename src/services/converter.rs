use std::io::Write;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use tempfile::NamedTempFile;
use tile_dither::{DitherAlgorithm, DitherOptions};

use crate::encoding::{TileGrid, UNKNOWN_TILE};
use crate::error::ConvertError;
use crate::models::{Configuration, MapRecord};
use crate::rendering::{encode_preview_png, normalize, quantize, select_algorithm};
use crate::services::archive;
use crate::tiles::{resolve_palette, TileCatalog};

pub const DEFAULT_ARCHIVE_PATH: &str = "map.wbox";
pub const DEFAULT_PREVIEW_PATH: &str = "preview.png";

/// Everything a conversion produces, still in memory.
#[derive(Debug)]
pub struct Conversion {
    pub record: MapRecord,
    /// The normalized, quantized image the grid was read from
    pub image: RgbaImage,
    pub preview_png: Vec<u8>,
    pub archive: Vec<u8>,
    /// Configured tile names missing from the catalog
    pub unknown_tiles: Vec<String>,
}

/// Where [`Conversion::write`] puts its files.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub archive: PathBuf,
    pub preview: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            archive: PathBuf::from(DEFAULT_ARCHIVE_PATH),
            preview: PathBuf::from(DEFAULT_PREVIEW_PATH),
        }
    }
}

impl OutputPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            archive: dir.join(DEFAULT_ARCHIVE_PATH),
            preview: dir.join(DEFAULT_PREVIEW_PATH),
        }
    }
}

/// Write `bytes` to a temporary file next to `path`.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, ConvertError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(path, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| ConvertError::io(path, e))?;
    Ok(file)
}

impl Conversion {
    /// Write the preview and the archive.
    ///
    /// Both files are staged next to their targets before either is moved
    /// into place. If the archive cannot be placed, the preview is removed
    /// again so a failed run leaves neither output behind.
    pub fn write(&self, paths: &OutputPaths) -> Result<(), ConvertError> {
        let preview = stage(&paths.preview, &self.preview_png)?;
        let archive = stage(&paths.archive, &self.archive)?;

        preview
            .persist(&paths.preview)
            .map_err(|e| ConvertError::io(&paths.preview, e.error))?;
        if let Err(e) = archive.persist(&paths.archive) {
            if let Err(cleanup) = std::fs::remove_file(&paths.preview) {
                tracing::warn!(
                    path = %paths.preview.display(),
                    "Could not remove preview after failed write: {cleanup}"
                );
            }
            return Err(ConvertError::io(&paths.archive, e.error));
        }

        tracing::info!(
            archive = %paths.archive.display(),
            preview = %paths.preview.display(),
            bytes = self.archive.len(),
            "Wrote map"
        );
        Ok(())
    }
}

/// Image to `.wbox` conversion: normalize, quantize to the configured
/// tiles, encode the grid and pack the record.
pub struct Converter<'a> {
    config: Configuration,
    catalog: &'a TileCatalog,
    algorithm: DitherAlgorithm,
}

impl Converter<'static> {
    pub fn new(config: Configuration) -> Self {
        Self::with_catalog(config, TileCatalog::global())
    }
}

impl<'a> Converter<'a> {
    pub fn with_catalog(config: Configuration, catalog: &'a TileCatalog) -> Self {
        let algorithm = select_algorithm(&config.algorithm);
        Self {
            config,
            catalog,
            algorithm,
        }
    }

    /// The algorithm actually used, after falling back for unknown names.
    pub fn algorithm(&self) -> DitherAlgorithm {
        self.algorithm
    }

    fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .strength(self.config.strength)
            .serpentine(self.config.serpentine)
            .preserve_exact_matches(self.config.preserve_exact)
    }

    pub fn convert_file(&self, path: &Path) -> Result<Conversion, ConvertError> {
        let image = crate::rendering::load_image(path)?;
        self.convert(&image)
    }

    pub fn convert(&self, image: &DynamicImage) -> Result<Conversion, ConvertError> {
        let normalized = normalize(image)?;
        let (width, height) = normalized.dimensions();

        let palette = resolve_palette(&self.config.included, self.catalog);
        for name in &palette.unknown {
            tracing::warn!(tile = %name, "Unknown tile in configuration, ignoring");
        }
        if palette.is_empty() {
            tracing::warn!("No usable tiles configured, keeping source colors");
        }

        let quantized = quantize(
            &normalized,
            &palette.colors,
            self.algorithm,
            self.dither_options(),
        )?;
        let preview_png = encode_preview_png(&quantized)?;

        let grid = TileGrid::encode(&quantized, self.catalog);
        grid.validate(width, height)?;
        if let Some((_, pixels)) = grid
            .tile_counts()
            .into_iter()
            .find(|(name, _)| *name == UNKNOWN_TILE)
        {
            tracing::warn!(
                pixels,
                "Image has colors without a matching tile; they are saved as empty tiles"
            );
        }

        let mut record = MapRecord::new(grid, width, height);
        if let Some(name) = &self.config.map_name {
            record = record.with_name(name.as_str());
        }
        if let Some(description) = &self.config.description {
            record = record.with_description(description.as_str());
        }

        let archive = archive::encode(&record)?;

        tracing::info!(
            width = record.width,
            height = record.height,
            tiles = record.tile_map.len(),
            algorithm = %self.algorithm,
            "Converted image"
        );

        Ok(Conversion {
            record,
            image: quantized,
            preview_png,
            archive,
            unknown_tiles: palette.unknown,
        })
    }
}
