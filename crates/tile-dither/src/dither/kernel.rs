//! Error diffusion kernel definitions.
//!
//! Each kernel lists the neighbours that receive a share of a pixel's
//! quantization error. Offsets are relative to the current pixel with `dx`
//! positive to the right (mirrored on serpentine reverse rows) and `dy`
//! positive downward.

/// An error diffusion kernel.
///
/// Each neighbour receives `error * weight / divisor`. The sum of weights
/// need not equal the divisor: Atkinson deliberately drops a quarter of the
/// error, Steven Pigeon drops a seventh.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    pub entries: &'static [(i32, i32, u8)],

    /// Normalizing divisor for the weights.
    pub divisor: u8,

    /// Furthest row reached; the error buffer keeps `max_dy + 1` rows.
    pub max_dy: usize,
}

/// Floyd-Steinberg.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
    max_dy: 1,
};

/// "False" Floyd-Steinberg, a cheaper three-neighbour variant.
///
/// ```text
///    X   3
///    3   2
/// ```
pub const FALSE_FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 3), (0, 1, 3), (1, 1, 2)],
    divisor: 8,
    max_dy: 1,
};

/// Atkinson, 75% propagation.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
    divisor: 8,
    max_dy: 2,
};

/// Stucki.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
    max_dy: 2,
};

/// Burkes, the two-row reduction of Stucki.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
    max_dy: 1,
};

/// Jarvis-Judice-Ninke.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

/// Simple 2D: half right, half below.
///
/// ```text
///    X   1
///    1
/// ```
pub const SIMPLE_2D: Kernel = Kernel {
    entries: &[(1, 0, 1), (0, 1, 1)],
    divisor: 2,
    max_dy: 1,
};

/// Steven Pigeon's sparse kernel, 12/14 propagation.
///
/// ```text
///            X   2   1
///        2   2   2
///    1       1       1
/// ```
pub const STEVEN_PIGEON: Kernel = Kernel {
    entries: &[
        (1, 0, 2),
        (2, 0, 1),
        (-1, 1, 2),
        (0, 1, 2),
        (1, 1, 2),
        (-2, 2, 1),
        (0, 2, 1),
        (2, 2, 1),
    ],
    divisor: 14,
    max_dy: 2,
};

/// Sierra (three-row).
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
};

/// Sierra two-row ("Sierra2").
///
/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
pub const SIERRA_TWO_ROW: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
    ],
    divisor: 16,
    max_dy: 1,
};

/// Sierra Lite.
///
/// ```text
///    X   2
///    1   1
/// ```
pub const SIERRA_LITE: Kernel = Kernel {
    entries: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
    max_dy: 1,
};
