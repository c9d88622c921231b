//! Error type shared by every slicing operation.

use image::ImageError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a slicing run.
///
/// None of these are retried; the first one aborts the remaining tiles.
#[derive(Debug, Error)]
pub enum SliceError {
    /// A parameter was rejected before any file was touched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The source image is missing, unreadable or not a valid image.
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// The source image exceeds the configured pixel limit.
    #[error(
        "Image {} is {width}x{height}, over the limit of {limit} pixels",
        .path.display()
    )]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        limit: u64,
    },

    /// The output directory or a tile file could not be created.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The encoder refused a tile.
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Result alias used throughout the crate.
pub type SliceResult<T> = Result<T, SliceError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_too_large_message_includes_dimensions() {
        let err = SliceError::TooLarge {
            path: PathBuf::from("big.jpg"),
            width: 100,
            height: 50,
            limit: 1000,
        };
        assert_eq!(
            err.to_string(),
            "Image big.jpg is 100x50, over the limit of 1000 pixels"
        );
    }

    #[test]
    fn test_io_message_names_path() {
        let err = SliceError::Io {
            path: PathBuf::from("out/tile_0.jpg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/tile_0.jpg"));
        assert!(err.to_string().contains("denied"));
    }
}
