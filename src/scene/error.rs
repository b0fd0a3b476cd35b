use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid time {hours:02}:{minutes:02}:{seconds:02}")]
    InvalidTime { hours: u32, minutes: u32, seconds: u32 },

    #[error("glyph asset for {glyph:?} is missing")]
    AssetMissing { glyph: char },

    #[error("glyph file {path} could not be loaded")]
    GlyphFile {
        path: PathBuf,
        #[source]
        source: GlyphFileError,
    },

    #[error("frame clock produced a non-finite elapsed time ({0})")]
    NonFiniteElapsed(f64),

    #[error("particle buffers out of sync: {positions} positions for {sizes} sizes")]
    FieldCorrupted { positions: usize, sizes: usize },
}

#[derive(Debug, Error)]
pub enum GlyphFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}
