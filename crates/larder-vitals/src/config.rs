//! Tuning constants for regeneration, the buff lottery, and professions.
//!
//! The [`VitalsConfig`] struct bundles every tunable so that callers (the
//! engine, tests, the headless harness) can override defaults. It is read
//! from the `tuning` key of `larder-config.yaml`; any omitted field keeps
//! its default.

use serde::Deserialize;

use crate::error::VitalsError;

/// Milliseconds a buff lasts per ten in-game minutes.
pub const MS_PER_TEN_GAME_MINUTES: u32 = 7000;

/// All vitals tuning, grouped by concern.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Regeneration rate and tick-interval constants.
    pub rate: RateConfig,
    /// Buff lottery thresholds, bonuses, and durations.
    pub lottery: LotteryConfig,
    /// Cooking profession values.
    pub professions: ProfessionConfig,
}

impl VitalsConfig {
    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidTuning`] when lottery thresholds are
    /// not strictly ascending inside `(0, 1)`, when the base interval is not
    /// positive, or when a divisor is zero.
    pub fn validate(&self) -> Result<(), VitalsError> {
        let l = &self.lottery;
        let thresholds = [l.worst_below, l.malus_below, l.bad_below, l.bonus_below];
        let ascending = thresholds.windows(2).all(|w| match w {
            [a, b] => a < b,
            _ => true,
        });
        if !ascending || l.worst_below <= 0.0 || l.bonus_below >= 1.0 {
            return Err(VitalsError::InvalidTuning {
                reason: format!("lottery thresholds must ascend within (0, 1): {thresholds:?}"),
            });
        }
        if self.rate.base_interval <= 0.0 {
            return Err(VitalsError::InvalidTuning {
                reason: "rate.base_interval must be positive".to_owned(),
            });
        }
        if self.rate.min_interval == 0 {
            return Err(VitalsError::InvalidTuning {
                reason: "rate.min_interval must be at least 1".to_owned(),
            });
        }
        if l.bonus_heal_divisor <= 0 {
            return Err(VitalsError::InvalidTuning {
                reason: "lottery.bonus_heal_divisor must be at least 1".to_owned(),
            });
        }
        if self.professions.restoration_value <= 0.0 {
            return Err(VitalsError::InvalidTuning {
                reason: "professions.restoration_value must be positive".to_owned(),
            });
        }
        Ok(())
    }
}

/// Constants for the regeneration rate model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Base regen rate for food (default: 0.15).
    pub food_rate: f64,
    /// Base regen rate for drinks (default: 0.20).
    pub drink_rate: f64,
    /// Rate added per quality tier (default: 0.008).
    pub quality_bonus: f64,
    /// Rate multiplier while inebriated (default: 1.3).
    pub inebriated_multiplier: f64,
    /// Interval reduction weight per combat level (default: 0.02).
    pub combat_weight: f64,
    /// Interval reduction weight per cooking level (default: 0.005).
    pub cooking_weight: f64,
    /// Interval reduction weight per foraging level (default: 0.0012).
    pub foraging_weight: f64,
    /// Skill level at which a skill contributes its full weight (default: 10).
    pub reference_level: u32,
    /// Base interval before skill scaling, in ticks (default: 128).
    pub base_interval: f64,
    /// Interval floor with no cooking levels, in ticks (default: 32).
    pub floor_interval: f64,
    /// Floor reduction per cooking level, in ticks (default: 1.75).
    pub floor_per_cooking_level: f64,
    /// Hard lower bound on the interval, in ticks (default: 1).
    pub min_interval: u32,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            food_rate: 0.15,
            drink_rate: 0.20,
            quality_bonus: 0.008,
            inebriated_multiplier: 1.3,
            combat_weight: 0.02,
            cooking_weight: 0.005,
            foraging_weight: 0.0012,
            reference_level: 10,
            base_interval: 128.0,
            floor_interval: 32.0,
            floor_per_cooking_level: 1.75,
            min_interval: 1,
        }
    }
}

/// Constants for the buff lottery.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    /// Source tag of every lottery buff (default: `larder.Kebab`).
    pub buff_source: String,
    /// Upper bound of the worst band (default: 0.0125).
    pub worst_below: f64,
    /// Upper bound of the malus band (default: 0.03).
    pub malus_below: f64,
    /// Upper bound of the plain-bad band (default: 0.06).
    pub bad_below: f64,
    /// Upper bound of the bonus band (default: 0.18).
    pub bonus_below: f64,
    /// Bonus buff duration in game minutes (default: 220).
    pub bonus_duration_minutes: u32,
    /// Malus buff duration in game minutes (default: 140).
    pub malus_duration_minutes: u32,
    /// Magnitude of combat attribute changes (default: 3).
    pub combat_bonus: i32,
    /// Magnitude of non-combat attribute changes (default: 2).
    pub non_combat_bonus: i32,
    /// The bonus band heals `max / bonus_heal_divisor` of each resource (default: 10).
    pub bonus_heal_divisor: i32,
}

impl LotteryConfig {
    /// Bonus buff duration in milliseconds.
    pub const fn bonus_duration_ms(&self) -> u32 {
        minutes_to_ms(self.bonus_duration_minutes)
    }

    /// Malus buff duration in milliseconds.
    pub const fn malus_duration_ms(&self) -> u32 {
        minutes_to_ms(self.malus_duration_minutes)
    }
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            buff_source: "larder.Kebab".to_owned(),
            worst_below: 0.0125,
            malus_below: 0.03,
            bad_below: 0.06,
            bonus_below: 0.18,
            bonus_duration_minutes: 220,
            malus_duration_minutes: 140,
            combat_bonus: 3,
            non_combat_bonus: 2,
            bonus_heal_divisor: 10,
        }
    }
}

/// Values attached to the cooking professions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfessionConfig {
    /// Restoration adds `rate / restoration_value` to the regen rate (default: 35).
    pub restoration_value: f64,
    /// Percentage of recovery added instantly by Restoration when
    /// heal-over-time is off (default: 5).
    pub restoration_alt_value: u32,
    /// Seconds of buff time added at full vitals by Buff Duration (default: 36).
    pub buff_duration_value: u32,
    /// Friendship added by Gift Boost (default: 10).
    pub gift_boost_value: i32,
}

impl Default for ProfessionConfig {
    fn default() -> Self {
        Self {
            restoration_value: 35.0,
            restoration_alt_value: 5,
            buff_duration_value: 36,
            gift_boost_value: 10,
        }
    }
}

/// Convert a duration in game minutes to milliseconds.
///
/// Truncates to whole ten-minute steps, as the host does.
pub const fn minutes_to_ms(minutes: u32) -> u32 {
    (minutes / 10).saturating_mul(MS_PER_TEN_GAME_MINUTES)
}
