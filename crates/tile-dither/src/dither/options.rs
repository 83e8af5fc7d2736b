//! Dithering options.

/// Configuration options for error diffusion dithering.
///
/// # Defaults
///
/// - Strength: `1.0` (kernel weights as published)
/// - Serpentine scanning: disabled (every row left to right)
/// - Preserve exact matches: disabled
///
/// ```
/// use tile_dither::DitherOptions;
///
/// let options = DitherOptions::new().strength(0.8).serpentine(true);
/// assert_eq!(options.strength, 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct DitherOptions {
    /// Multiplier applied to every kernel weight.
    ///
    /// `0.0` disables diffusion; values above `1.0` over-propagate and are
    /// accepted as-is.
    pub strength: f32,

    /// Alternate row direction, mirroring the kernel on right-to-left rows.
    pub serpentine: bool,

    /// Map pixels whose RGB already equals a palette entry straight to that
    /// entry and drop any error accumulated on them.
    pub preserve_exact_matches: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            strength: 1.0,
            serpentine: false,
            preserve_exact_matches: false,
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    #[inline]
    pub fn preserve_exact_matches(mut self, enabled: bool) -> Self {
        self.preserve_exact_matches = enabled;
        self
    }
}
