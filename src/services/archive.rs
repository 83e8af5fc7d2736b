//! `.wbox` archives: a [`MapRecord`] as compact JSON inside a zlib stream.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::models::MapRecord;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to serialize map record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("zlib compression failed: {0}")]
    Compress(#[source] std::io::Error),

    #[error("zlib stream is invalid: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("archive does not contain a map record: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize a record to compact JSON, fields in declaration order.
pub fn to_json(record: &MapRecord) -> Result<Vec<u8>, ArchiveError> {
    serde_json::to_vec(record).map_err(ArchiveError::Serialize)
}

/// Zlib-compress at the highest level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).map_err(ArchiveError::Compress)?;
    encoder.finish().map_err(ArchiveError::Compress)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(ArchiveError::Decompress)?;
    Ok(decompressed)
}

/// Complete archive bytes for a record.
pub fn encode(record: &MapRecord) -> Result<Vec<u8>, ArchiveError> {
    let json = to_json(record)?;
    let compressed = compress(&json)?;
    tracing::debug!(
        json_bytes = json.len(),
        compressed_bytes = compressed.len(),
        "Encoded map archive"
    );
    Ok(compressed)
}

pub fn decode(data: &[u8]) -> Result<MapRecord, ArchiveError> {
    let json = decompress(data)?;
    serde_json::from_slice(&json).map_err(ArchiveError::Parse)
}

pub fn read_archive(path: &Path) -> Result<MapRecord, ArchiveError> {
    let data = std::fs::read(path).map_err(|source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TileGrid;
    use pretty_assertions::assert_eq;

    fn sample_record() -> MapRecord {
        let grid = TileGrid {
            tile_map: vec!["deep_ocean".to_string(), "sand".to_string()],
            tile_array: vec![vec![0, 1]; 64],
            tile_amounts: vec![vec![32, 32]; 64],
        };
        MapRecord::new(grid, 64, 64)
    }

    #[test]
    fn test_encode_is_deterministic() {
        let record = sample_record();
        assert_eq!(encode(&record).unwrap(), encode(&record).unwrap());
    }

    #[test]
    fn test_zlib_header() {
        let bytes = encode(&sample_record()).unwrap();
        assert_eq!(bytes[0], 0x78);
        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]) % 31, 0);
    }

    #[test]
    fn test_decode_restores_record() {
        let record = sample_record();
        let decoded = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_json_field_order() {
        let json = String::from_utf8(to_json(&sample_record()).unwrap()).unwrap();
        let keys = [
            "\"saveVersion\"",
            "\"width\"",
            "\"height\"",
            "\"mapStats\"",
            "\"worldLaws\"",
            "\"tileMap\"",
            "\"tileArray\"",
            "\"tileAmounts\"",
            "\"fire\"",
            "\"conwayEater\"",
            "\"conwayCreator\"",
            "\"frozen_tiles\"",
            "\"tiles\"",
            "\"cities\"",
            "\"actors_data\"",
            "\"buildings\"",
            "\"kingdoms\"",
            "\"clans\"",
            "\"alliances\"",
            "\"wars\"",
            "\"plots\"",
            "\"relations\"",
            "\"cultures\"",
        ];
        let mut last = 0;
        for key in keys {
            let pos = json[last..]
                .find(key)
                .map(|p| p + last)
                .unwrap_or_else(|| panic!("{key} missing or out of order"));
            last = pos + key.len();
        }
        assert!(json.starts_with(r#"{"saveVersion":13,"width":1,"height":1,"#));
        assert!(json.ends_with(r#""relations":[],"cultures":[]}"#));
    }

    #[test]
    fn test_bool_val_only_on_disabled_laws() {
        let json = String::from_utf8(to_json(&sample_record()).unwrap()).unwrap();
        assert_eq!(json.matches("\"boolVal\":false").count(), 5);
        assert!(!json.contains("\"boolVal\":true"));
        assert!(!json.contains("null"));
        assert!(json.contains(r#"{"name":"world_law_diplomacy"},"#));
    }

    #[test]
    fn test_decompress_rejects_garbage() {
        let err = decompress(b"not a zlib stream").unwrap_err();
        assert!(matches!(err, ArchiveError::Decompress(_)));
    }

    #[test]
    fn test_decode_rejects_non_record() {
        let bytes = compress(br#"{"hello":"world"}"#).unwrap();
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, ArchiveError::Parse(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.wbox");
        let record = sample_record();

        std::fs::write(&path, encode(&record).unwrap()).unwrap();
        assert_eq!(read_archive(&path).unwrap(), record);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_archive(Path::new("/nonexistent/map.wbox")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/map.wbox"));
    }
}
