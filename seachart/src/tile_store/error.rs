//! Error types for tile pack access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening a tile pack.
///
/// Individual tile reads never fail with an error: a missing or invalid tile
/// is reported as `None` by [`TileStore::fetch`](super::TileStore::fetch).
#[derive(Debug, Error)]
pub enum TileStoreError {
    /// The backing file does not exist.
    #[error("Tile pack not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not a readable tile container.
    #[error("Tile pack {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// The dedicated reader thread could not be started.
    #[error("Failed to start tile reader for {}: {source}", path.display())]
    Worker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TileStoreError {
    pub(super) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TileStoreError::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = TileStoreError::NotFound {
            path: PathBuf::from("/charts/missing.mbtiles"),
        };
        assert_eq!(
            err.to_string(),
            "Tile pack not found: /charts/missing.mbtiles"
        );
    }

    #[test]
    fn test_corrupt_display() {
        let err = TileStoreError::corrupt("/charts/bad.mbtiles", "file is not a database");
        assert!(err.to_string().contains("bad.mbtiles"));
        assert!(err.to_string().contains("file is not a database"));
    }
}
