use tile_dither::Rgba;

use super::catalog::TileCatalog;

/// Palette colors for the configured tiles, plus the names that could not
/// be found in the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPalette {
    pub colors: Vec<Rgba>,
    pub unknown: Vec<String>,
}

impl ResolvedPalette {
    /// An empty palette means quantization is left unconstrained.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Build an ordered, duplicate-free palette from tile names.
///
/// Names are looked up in order; a color already in the palette is skipped,
/// so the first name carrying a color decides its position. Unknown names
/// are collected rather than rejected; reporting them is up to the caller.
pub fn resolve_palette<S: AsRef<str>>(names: &[S], catalog: &TileCatalog) -> ResolvedPalette {
    let mut resolved = ResolvedPalette::default();

    for name in names {
        let name = name.as_ref();
        match catalog.color_of(name) {
            Some(color) => {
                if !resolved.colors.contains(&color) {
                    resolved.colors.push(color);
                }
            }
            None => resolved.unknown.push(name.to_string()),
        }
    }

    resolved
}
