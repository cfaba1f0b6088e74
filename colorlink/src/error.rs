// error.rs - Engine error types
// Player mistakes are not errors; they surface as `board::Rejection` values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(
        "Layout failed: placed {placed} of {required} tiles after {attempts} attempts \
         (last footprint {tile_width:.1}x{tile_height:.1})"
    )]
    LayoutFailure {
        placed: usize,
        required: usize,
        attempts: u32,
        tile_width: f32,
        tile_height: f32,
    },

    #[error("Invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },

    #[error("Invalid input sample on line {line}: {source}")]
    InvalidSample {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
