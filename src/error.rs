use std::fmt;
use std::path::PathBuf;

/// Array axis named in an out-of-range error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
    Channel,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
            Axis::Channel => write!(f, "channel"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    #[error("Image file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{axis} index {index} out of range for length {len}")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },

    #[error("Dimension mismatch: expected {expected:?} (h, w, c), found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },

    #[error("Unknown color conversion mode: {0}")]
    UnknownConversionMode(String),

    #[error("Conversion {mode} does not accept {channels}-channel input")]
    UnsupportedChannels { mode: String, channels: usize },

    #[error("Cannot infer image format from {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Display error: {0}")]
    Display(String),
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for ImageError {
    fn from(err: opencv::Error) -> Self {
        ImageError::Display(err.to_string())
    }
}
