//! Engine wiring for the Larder vitals engine.
//!
//! This crate connects the pure pieces in `larder-vitals` and
//! `larder-world` to a host simulation: it subscribes tasks to the host's
//! tick signal, runs the buff and dialogue watchers, applies lottery
//! outcomes, and loads configuration.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `larder-config.yaml`.
//! - [`dialogue`] -- Delimited entry splicing and gift-dialogue errors.
//! - [`engine`] -- [`VitalsEngine`], the consumption, gift, and tick handlers.
//! - [`error`] -- Engine error type ([`EngineError`]).
//! - [`host`] -- Host collaborator traits ([`Host`]).
//! - [`sandbox`] -- [`SandboxHost`], an in-memory host.
//! - [`schedule`] -- Ordered, idempotent tick subscriptions.
//! - [`watcher`] -- One-shot tick watchers.
//!
//! [`SandboxHost`]: sandbox::SandboxHost

pub mod config;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod host;
pub mod sandbox;
pub mod schedule;
pub mod watcher;

pub use config::{ConfigError, LarderConfig};
pub use engine::{ConsumptionReport, GiftOutcome, RegenDiagnostics, TickReport, VitalsEngine};
pub use error::EngineError;
pub use host::Host;
