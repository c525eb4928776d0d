//! Vitals logic for the Larder engine.
//!
//! Everything in this crate is pure or owns only its own state: the host's
//! vitals are passed in by mutable reference and no I/O is performed. It
//! sits between `larder-types` (the data model) and `larder-core` (which
//! wires these pieces to the tick signal and host collaborators).
//!
//! # Modules
//!
//! - [`config`] -- Tuning constants ([`VitalsConfig`])
//! - [`error`] -- Tuning validation errors ([`VitalsError`])
//! - [`lottery`] -- The buff lottery resolver
//! - [`professions`] -- Instant restoration, buff extension, gift boost
//! - [`rate`] -- Regen rate and tick-interval model
//! - [`regeneration`] -- The per-tick regeneration scheduler ([`RegenerationState`])

pub mod config;
pub mod error;
pub mod lottery;
pub mod professions;
pub mod rate;
pub mod regeneration;

// Re-export primary types at crate root for convenience.
pub use config::{LotteryConfig, ProfessionConfig, RateConfig, VitalsConfig};
pub use error::VitalsError;
pub use lottery::{LotteryContext, LotteryDraw, LotteryLabels, LotteryMessage, LotteryOutcome};
pub use regeneration::{RegenContext, RegenPhase, RegenTick, RegenerationState};
