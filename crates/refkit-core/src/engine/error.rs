use thiserror::Error;

use crate::core::io::frames::FrameError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed frame structure: {source}")]
    Frame {
        #[from]
        source: FrameError,
    },
}
