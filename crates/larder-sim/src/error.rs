//! Error types for the headless harness.

use std::path::PathBuf;

/// Top-level error for the harness binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: larder_core::ConfigError,
    },

    /// Engine construction failed.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: larder_core::EngineError,
    },

    /// The scenario file could not be read.
    #[error("failed to read scenario {}: {source}", path.display())]
    ScenarioIo {
        /// Path of the scenario file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The scenario file is not valid JSON.
    #[error("failed to parse scenario {}: {source}", path.display())]
    ScenarioJson {
        /// Path of the scenario file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
