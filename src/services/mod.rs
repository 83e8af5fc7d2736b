pub mod archive;
pub mod converter;

pub use archive::ArchiveError;
pub use converter::{Conversion, Converter, OutputPaths};
