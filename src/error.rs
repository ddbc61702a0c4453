use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or contradictory command line options.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Either dimension does not fit the 16-bit header fields.
    #[error("image is too big: {rows}x{cols} (limit is 65535x65535)")]
    OversizedImage { rows: usize, cols: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed stream: {0}")]
    MalformedStream(String),

    /// A zero-pixel grid has no intensity distribution.
    #[error("image has no pixels")]
    EmptyImage,

    #[error("too many levels selected: {count} (at most 254 fit between the boundaries)")]
    TooManyLevels { count: usize },

    #[error("buffer holds {actual} bytes, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Process exit code the binary reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
