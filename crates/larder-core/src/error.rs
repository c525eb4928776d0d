//! Error types for engine operations.

use larder_vitals::VitalsError;

use crate::dialogue::DialogueError;

/// Errors surfaced by [`VitalsEngine`](crate::engine::VitalsEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The tuning constants failed validation at construction.
    #[error("invalid tuning: {source}")]
    Tuning {
        /// The underlying validation error.
        #[from]
        source: VitalsError,
    },

    /// A gift-dialogue override could not be applied.
    #[error("gift dialogue: {source}")]
    Dialogue {
        /// The underlying dialogue error.
        #[from]
        source: DialogueError,
    },
}
