//! Error types for the `larder-vitals` crate.
//!
//! The per-tick paths never fail: credits saturate at zero and vitals are
//! clamped. Errors only arise when validating tuning values.

/// Errors that can occur when validating vitals tuning.
#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    /// A tuning value is out of its meaningful range.
    #[error("invalid vitals tuning: {reason}")]
    InvalidTuning {
        /// Description of the offending value.
        reason: String,
    },
}
