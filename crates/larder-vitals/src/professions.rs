//! Effects of the cooking professions that act outside the scheduler.
//!
//! - Restoration (instant mode): with heal-over-time off, eating grants an
//!   extra `restoration_alt_value` percent of the item's recovery at once.
//! - Buff Duration: the buff an item just granted lasts longer, scaled by
//!   how healthy the player currently is.
//! - Gift Boost: cooked-dish gifts add flat friendship.
//!
//! The Restoration profession's effect on the regen rate lives in
//! [`crate::rate::regen_rate`].

use larder_types::{ConsumptionEvent, PlayerVitals};

use crate::config::ProfessionConfig;

/// Host object category of cooked dishes.
pub const COOKING_CATEGORY: i32 = -7;

/// Apply Restoration's instant bonus to `vitals`.
///
/// Both resources are truncated to whole points after the bonus, matching
/// the host's integral display.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn apply_instant_restoration(
    vitals: &mut PlayerVitals,
    event: &ConsumptionEvent,
    config: &ProfessionConfig,
) {
    let fraction = f64::from(config.restoration_alt_value) / 100.0;
    let health = f64::from(vitals.health) + f64::from(event.health_recovery) * fraction;
    let stamina = f64::from(vitals.stamina) + f64::from(event.stamina_recovery) * fraction;

    let health = health.min(f64::from(vitals.max_health)) as i32;
    let stamina = stamina.min(f64::from(vitals.max_stamina)).trunc() as f32;
    vitals.set(health, stamina);
}

/// Extend a buff's remaining duration for the Buff Duration profession.
///
/// Adds `floor(buff_duration_value * 1000 * (h + s) / (H + S))`
/// milliseconds. Expired (zero-duration) buffs are left alone.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn extended_buff_duration(
    duration_ms: u32,
    vitals: &PlayerVitals,
    config: &ProfessionConfig,
) -> u32 {
    if duration_ms == 0 {
        return duration_ms;
    }
    let max = f64::from(vitals.max_health) + f64::from(vitals.max_stamina);
    if max <= 0.0 {
        return duration_ms;
    }
    let ratio = ((f64::from(vitals.health) + f64::from(vitals.stamina)) / max).clamp(0.0, 1.0);
    let bonus = (f64::from(config.buff_duration_value) * 1000.0 * ratio).floor();
    duration_ms.saturating_add(bonus as u32)
}

/// Friendship added by Gift Boost for a gift of the given category.
pub const fn gift_boost(category: i32, config: &ProfessionConfig) -> Option<i32> {
    if category == COOKING_CATEGORY {
        Some(config.gift_boost_value)
    } else {
        None
    }
}
