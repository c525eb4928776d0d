//! Headless harness for the Larder vitals engine.
//!
//! Runs one consumption scenario against an in-memory host and logs what
//! the engine did, tick by tick where it matters.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `LARDER_CONFIG` (default `larder-config.yaml`)
//! 2. Initialize structured logging (tracing) at the configured level
//! 3. Load the scenario from `LARDER_SCENARIO`, or use the built-in one
//! 4. Build the sandbox host and the engine
//! 5. Eat the scenario item with a seeded lottery draw
//! 6. Pump ticks until every engine task has unsubscribed
//! 7. Log the summary and end the session

mod error;
mod scenario;

use std::path::Path;

use anyhow::Context as _;
use larder_core::sandbox::SandboxHost;
use larder_core::{LarderConfig, VitalsEngine};
use larder_vitals::LotteryDraw;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::SimError;
use crate::scenario::Scenario;

/// Config path used when `LARDER_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "larder-config.yaml";

/// Application entry point for the harness.
///
/// # Errors
///
/// Returns an error if the configuration or scenario cannot be loaded, or
/// if the engine rejects the configuration.
fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("larder-sim starting");

    let scenario = load_scenario().context("loading scenario")?;
    info!(
        item = %scenario.item.item,
        ticks = scenario.ticks,
        seed = scenario.seed,
        tired = scenario.tired,
        "Scenario loaded"
    );

    run(config, &scenario).context("running scenario")?;
    info!("larder-sim finished");
    Ok(())
}

/// Drive the engine through one scenario.
fn run(config: LarderConfig, scenario: &Scenario) -> Result<(), SimError> {
    let mut host = SandboxHost::new(scenario.starting_vitals()).with_default_translations();
    host.skills = scenario.skills;
    host.professions.extend(scenario.professions.iter().copied());

    let mut engine = VitalsEngine::new(config)?;
    let mut rng = StdRng::seed_from_u64(scenario.seed);

    info!(
        station_level = engine.cooking_station_level(&host),
        "Cooking station lookup"
    );

    engine.on_tick(&mut host, 0);
    host.consume(&scenario.item, scenario.item_buff.clone());
    let report = engine.on_item_eaten(&mut host, &scenario.item, LotteryDraw::sample(&mut rng));
    info!(
        regeneration_started = report.regeneration_started,
        band = ?report.lottery.as_ref().map(|l| l.band),
        leftover = ?report.leftover,
        watching = ?report.watching,
        health = host.vitals.health,
        stamina = host.vitals.stamina,
        "Item eaten"
    );

    let mut regeneration_idle_at = None;
    let mut last_tick = 0;
    for tick in 1..=scenario.ticks {
        last_tick = tick;
        host.advance_buffs(scenario.ms_per_tick);
        let tick_report = engine.on_tick(&mut host, tick);
        if tick_report.regeneration_finished {
            regeneration_idle_at.get_or_insert(tick);
        }
        if let Some(source) = tick_report.buff_expired {
            info!(tick, source = %source, "Buff expired");
        }
        if engine.schedule().is_empty() {
            break;
        }
    }

    let diag = engine.diagnostics();
    info!(
        ticks_run = last_tick,
        regeneration_idle_at = ?regeneration_idle_at,
        health = host.vitals.health,
        max_health = host.vitals.max_health,
        stamina = host.vitals.stamina,
        max_stamina = host.vitals.max_stamina,
        health_credits_left = diag.health_credits,
        stamina_credits_left = diag.stamina_credits,
        last_interval = diag.last_interval,
        recent_intervals = ?diag.recent_intervals,
        messages = ?host.messages,
        "Scenario summary"
    );

    engine.end_session(&mut host);
    Ok(())
}

/// Load configuration from `LARDER_CONFIG`, falling back to defaults when
/// the default path does not exist.
fn load_config() -> Result<LarderConfig, SimError> {
    if let Ok(path) = std::env::var("LARDER_CONFIG") {
        return Ok(LarderConfig::from_file(Path::new(&path))?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(LarderConfig::from_file(default_path)?)
    } else {
        Ok(LarderConfig::default())
    }
}

/// Load the scenario from `LARDER_SCENARIO`, or use the built-in one.
fn load_scenario() -> Result<Scenario, SimError> {
    std::env::var("LARDER_SCENARIO")
        .map_or_else(|_| Ok(Scenario::default()), |path| Scenario::from_file(Path::new(&path)))
}
