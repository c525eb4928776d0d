//! Regeneration rate model.
//!
//! Two pure functions drive the scheduler's cadence:
//!
//! - [`regen_rate`] -- how potent the last consumable was:
//!   `base(food 0.15 | drink 0.20) + quality * 0.008`, times 1.3 while
//!   inebriated, plus `rate / restoration_value` with the Restoration
//!   profession.
//! - [`tick_interval`] -- how many ticks pass between single-point drains:
//!   ```text
//!   panic   = (3h + s) / (3H + S)
//!   scaling = sum(level_i * w_i) / sum(10 * w_i)
//!   raw     = (128 - 128 * scaling) * rate * 100
//!   ticks   = floor(max(32 - cooking * 1.75, raw * panic))
//!   ```
//!   A depleted player (low panic ratio) regenerates faster, as does a
//!   skilled one. The result never drops below `min_interval`.

use larder_types::{ItemKind, PlayerVitals, SkillLevels};

use crate::config::RateConfig;

/// Live inputs for [`tick_interval`], read fresh on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalInputs {
    /// Current skill levels.
    pub skills: SkillLevels,
    /// Whether the cooking skill participates in scaling.
    pub cooking_enabled: bool,
    /// Current vitals.
    pub vitals: PlayerVitals,
    /// Output of [`regen_rate`] for the last consumable.
    pub regen_rate: f64,
}

/// Compute the regeneration rate for a consumable.
///
/// `restoration_value` is `Some` when the Restoration profession is active;
/// a non-positive value is ignored.
pub fn regen_rate(
    kind: ItemKind,
    quality: u32,
    inebriated: bool,
    restoration_value: Option<f64>,
    config: &RateConfig,
) -> f64 {
    let mut rate = if kind.is_drink() {
        config.drink_rate
    } else {
        config.food_rate
    };
    rate += f64::from(quality) * config.quality_bonus;
    if inebriated {
        rate *= config.inebriated_multiplier;
    }
    if let Some(divisor) = restoration_value.filter(|d| *d > 0.0) {
        rate += rate / divisor;
    }
    rate
}

/// Ratio of weighted current vitals to weighted maximum vitals.
///
/// Health counts three times as much as stamina. Returns 1.0 when the
/// maxima are degenerate.
pub fn panic_ratio(vitals: &PlayerVitals) -> f64 {
    let current = f64::from(vitals.health) * 3.0 + f64::from(vitals.stamina);
    let max = f64::from(vitals.max_health) * 3.0 + f64::from(vitals.max_stamina);
    if max <= 0.0 {
        return 1.0;
    }
    (current / max).clamp(0.0, 1.0)
}

/// Normalized skill scaling in `[0, 1]`.
///
/// The denominator is built from the fixed reference level and weights, not
/// from the player's levels, and is floored so it can never be zero.
pub fn skill_scaling(skills: &SkillLevels, cooking_enabled: bool, config: &RateConfig) -> f64 {
    let cooking_weight = if cooking_enabled {
        config.cooking_weight
    } else {
        0.0
    };
    let reference = f64::from(config.reference_level);
    let numerator = f64::from(skills.combat) * config.combat_weight
        + f64::from(skills.cooking) * cooking_weight
        + f64::from(skills.foraging) * config.foraging_weight;
    let denominator = reference * (config.combat_weight + cooking_weight + config.foraging_weight);
    (numerator / denominator.max(f64::EPSILON)).clamp(0.0, 1.0)
}

/// Compute the number of ticks between drain steps.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn tick_interval(inputs: &IntervalInputs, config: &RateConfig) -> u32 {
    let cooking_level = if inputs.cooking_enabled {
        f64::from(inputs.skills.cooking)
    } else {
        0.0
    };
    let scaling = skill_scaling(&inputs.skills, inputs.cooking_enabled, config);
    let raw = (config.base_interval - config.base_interval * scaling) * inputs.regen_rate * 100.0;
    let floor = config.floor_interval - cooking_level * config.floor_per_cooking_level;
    let ticks = floor.max(raw * panic_ratio(&inputs.vitals)).floor();

    if !ticks.is_finite() || ticks < f64::from(config.min_interval) {
        return config.min_interval;
    }
    // Saturating float-to-int conversion; the bound above keeps it positive.
    ticks.min(f64::from(u32::MAX)) as u32
}
