use std::path::PathBuf;
use std::{error, fmt, io};

/// Errors produced while loading, saving or rendering a tile map.
#[derive(Debug)]
pub enum MapError {
    /// File could not be read or written.
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// File contents are not a valid level document.
    Json {
        /// Offending file (empty for in-memory documents).
        path: PathBuf,
        /// Underlying parse/serialize error.
        source: serde_json::Error,
    },
    /// Level files must use the `.json` extension.
    UnsupportedFormat(String),
    /// A grid key is not of the form `"<x>;<y>"`.
    InvalidKey(String),
    /// A gridded tile disagrees with the cell it is stored under.
    InvalidTile {
        /// Grid key the tile was read from.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Tile size must be a positive number of pixels.
    InvalidTileSize(u32),
    /// The asset table has no image for a tile present in the map.
    MissingAsset {
        /// Tile type.
        kind: String,
        /// Requested variant index.
        variant: usize,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "Invalid level JSON in {}: {}", path.display(), source)
            }
            MapError::UnsupportedFormat(path) => write!(f, "Unsupported file format: {}", path),
            MapError::InvalidKey(key) => write!(f, "Invalid grid key '{}', expected \"x;y\"", key),
            MapError::InvalidTile { key, reason } => {
                write!(f, "Invalid tile at '{}': {}", key, reason)
            }
            MapError::InvalidTileSize(size) => write!(f, "Tile size must be positive, got {}", size),
            MapError::MissingAsset { kind, variant } => {
                write!(f, "No image for tile '{}' variant {}", kind, variant)
            }
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
