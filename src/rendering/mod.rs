pub mod normalize;
pub mod preview;
pub mod quantize;

pub use normalize::{load_image, normalize, normalized_size};
pub use preview::encode_preview_png;
pub use quantize::{quantize, select_algorithm};
