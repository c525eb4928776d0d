//! Buff lottery for the special consumable.
//!
//! Eating the lottery item draws `r` in `[0, 1)` once. Bands, in ascending
//! order of probability mass:
//!
//! | Band | Range | Effect |
//! |------|-------|--------|
//! | [`Worst`] | `r < 0.0125` | revoke restoration, -2 to one non-combat stat |
//! | [`Malus`] | `0.0125 <= r < 0.03` | revoke restoration, -3 attack and defense |
//! | [`Bad`] | `0.03 <= r < 0.06` | revoke restoration |
//! | [`Bonus`] | `0.06 <= r < 0.18` | heal 10% of each max, +2 mining, +3 attack and defense |
//! | [`Neutral`] | `r >= 0.18` | nothing |
//!
//! The resolver is pure: the draw is injected, and the caller applies the
//! returned revocation, heal, message, and buff.
//!
//! [`Worst`]: LotteryBand::Worst
//! [`Malus`]: LotteryBand::Malus
//! [`Bad`]: LotteryBand::Bad
//! [`Bonus`]: LotteryBand::Bonus
//! [`Neutral`]: LotteryBand::Neutral

use larder_types::{BuffDescriptor, BuffQuality, BuffSource, BuffStat, LotteryBand, PlayerVitals};
use rand::Rng;

use crate::config::LotteryConfig;

/// Random inputs for one lottery resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotteryDraw {
    /// Uniform draw in `[0, 1)` selecting the band.
    pub roll: f64,
    /// Index into the non-combat stats for the worst band. Only the first
    /// three categories are eligible; larger values wrap.
    pub stat_pick: u32,
}

impl LotteryDraw {
    /// Number of non-combat categories eligible for the worst-band malus.
    ///
    /// One fewer than [`BuffStat::NON_COMBAT`]: the last category is never
    /// picked.
    pub const ELIGIBLE_STATS: u32 = 3;

    /// Create a draw with a fixed roll and the first eligible stat.
    pub const fn fixed(roll: f64) -> Self {
        Self { roll, stat_pick: 0 }
    }

    /// Sample a draw from a random source.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            roll: rng.random::<f64>(),
            stat_pick: rng.random_range(0..Self::ELIGIBLE_STATS),
        }
    }
}

/// Message surfaced to the player after the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotteryMessage {
    /// Worst and malus bands.
    Worst,
    /// Plain-bad band.
    Bad,
    /// Bonus band.
    Best,
}

impl LotteryMessage {
    /// Localization key of the message.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Worst => "item.kebab.worst",
            Self::Bad => "item.kebab.bad",
            Self::Best => "item.kebab.best",
        }
    }
}

/// Display labels for lottery buffs, already localized by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryLabels {
    /// Inspect text of malus buffs.
    pub worst: String,
    /// Inspect text of the bonus buff.
    pub best: String,
}

impl LotteryLabels {
    /// Return the label for a quality.
    pub fn for_quality(&self, quality: BuffQuality) -> &str {
        match quality {
            BuffQuality::Worst => &self.worst,
            BuffQuality::Best => &self.best,
        }
    }
}

impl Default for LotteryLabels {
    fn default() -> Self {
        Self {
            worst: "Kebab (worst)".to_owned(),
            best: "Kebab (best)".to_owned(),
        }
    }
}

/// What the triggering consumption credited, plus current vitals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotteryContext {
    /// Health credited for this consumption.
    pub credited_health: u32,
    /// Stamina credited for this consumption.
    pub credited_stamina: u32,
    /// Vitals at the time of the draw.
    pub vitals: PlayerVitals,
}

/// Everything the caller must apply after a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LotteryOutcome {
    /// Selected band.
    pub band: LotteryBand,
    /// Message to surface, if any.
    pub message: Option<LotteryMessage>,
    /// Buff to install, if any.
    pub buff: Option<BuffDescriptor>,
    /// Health credits to revoke.
    pub revoke_health: u32,
    /// Stamina credits to revoke.
    pub revoke_stamina: u32,
    /// Health to add immediately (clamped by the caller).
    pub heal_health: i32,
    /// Stamina to add immediately (clamped by the caller).
    pub heal_stamina: f32,
}

impl LotteryOutcome {
    const fn neutral() -> Self {
        Self {
            band: LotteryBand::Neutral,
            message: None,
            buff: None,
            revoke_health: 0,
            revoke_stamina: 0,
            heal_health: 0,
            heal_stamina: 0.0,
        }
    }
}

/// Map a roll onto its band.
///
/// Bands are half-open and contiguous, so every roll in `[0, 1)` lands in
/// exactly one of them.
pub fn select_band(roll: f64, config: &LotteryConfig) -> LotteryBand {
    if roll < config.worst_below {
        LotteryBand::Worst
    } else if roll < config.malus_below {
        LotteryBand::Malus
    } else if roll < config.bad_below {
        LotteryBand::Bad
    } else if roll < config.bonus_below {
        LotteryBand::Bonus
    } else {
        LotteryBand::Neutral
    }
}

/// Resolve one lottery draw.
///
/// Produces at most one buff. Message and buff are independent: the bad
/// band has a message and no buff.
pub fn resolve(
    draw: LotteryDraw,
    ctx: &LotteryContext,
    labels: &LotteryLabels,
    config: &LotteryConfig,
) -> LotteryOutcome {
    let band = select_band(draw.roll, config);
    let source = BuffSource::new(config.buff_source.clone());

    let mut outcome = LotteryOutcome {
        band,
        ..LotteryOutcome::neutral()
    };
    if band.revokes_restoration() {
        outcome.revoke_health = ctx.credited_health;
        outcome.revoke_stamina = ctx.credited_stamina;
    }

    match band {
        LotteryBand::Worst => {
            let pick = draw.stat_pick % LotteryDraw::ELIGIBLE_STATS;
            let stat = usize::try_from(pick)
                .ok()
                .and_then(|i| BuffStat::NON_COMBAT.get(i).copied())
                .unwrap_or(BuffStat::Farming);
            outcome.message = Some(LotteryMessage::Worst);
            outcome.buff = Some(
                BuffDescriptor::new(
                    source,
                    labels.for_quality(BuffQuality::Worst),
                    config.malus_duration_ms(),
                )
                .with_delta(stat, config.non_combat_bonus.saturating_neg()),
            );
        }
        LotteryBand::Malus => {
            let malus = config.combat_bonus.saturating_neg();
            outcome.message = Some(LotteryMessage::Worst);
            outcome.buff = Some(
                BuffDescriptor::new(
                    source,
                    labels.for_quality(BuffQuality::Worst),
                    config.malus_duration_ms(),
                )
                .with_delta(BuffStat::Defense, malus)
                .with_delta(BuffStat::Attack, malus),
            );
        }
        LotteryBand::Bad => {
            outcome.message = Some(LotteryMessage::Bad);
        }
        LotteryBand::Bonus => {
            let divisor = config.bonus_heal_divisor.max(1);
            outcome.heal_health = ctx.vitals.max_health.checked_div(divisor).unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let stamina_divisor = divisor as f32;
            outcome.heal_stamina = ctx.vitals.max_stamina / stamina_divisor;
            outcome.message = Some(LotteryMessage::Best);
            outcome.buff = Some(
                BuffDescriptor::new(
                    source,
                    labels.for_quality(BuffQuality::Best),
                    config.bonus_duration_ms(),
                )
                .with_delta(BuffStat::Mining, config.non_combat_bonus)
                .with_delta(BuffStat::Defense, config.combat_bonus)
                .with_delta(BuffStat::Attack, config.combat_bonus),
            );
        }
        LotteryBand::Neutral => {}
    }

    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ctx() -> LotteryContext {
        LotteryContext {
            credited_health: 40,
            credited_stamina: 90,
            vitals: PlayerVitals::new(50, 100, 100.0, 270.0),
        }
    }

    fn roll(r: f64) -> LotteryOutcome {
        resolve(
            LotteryDraw::fixed(r),
            &ctx(),
            &LotteryLabels::default(),
            &LotteryConfig::default(),
        )
    }

    #[test]
    fn reference_rolls_select_each_band() {
        let cfg = LotteryConfig::default();
        assert_eq!(select_band(0.005, &cfg), LotteryBand::Worst);
        assert_eq!(select_band(0.02, &cfg), LotteryBand::Malus);
        assert_eq!(select_band(0.05, &cfg), LotteryBand::Bad);
        assert_eq!(select_band(0.12, &cfg), LotteryBand::Bonus);
        assert_eq!(select_band(0.5, &cfg), LotteryBand::Neutral);
    }

    #[test]
    fn band_edges_are_half_open() {
        let cfg = LotteryConfig::default();
        assert_eq!(select_band(0.0, &cfg), LotteryBand::Worst);
        assert_eq!(select_band(0.0125, &cfg), LotteryBand::Malus);
        assert_eq!(select_band(0.03, &cfg), LotteryBand::Bad);
        assert_eq!(select_band(0.06, &cfg), LotteryBand::Bonus);
        assert_eq!(select_band(0.18, &cfg), LotteryBand::Neutral);
        assert_eq!(select_band(0.999_999, &cfg), LotteryBand::Neutral);
    }

    #[test]
    fn bands_cover_unit_interval_in_order() {
        let cfg = LotteryConfig::default();
        let order = |b: LotteryBand| match b {
            LotteryBand::Worst => 0,
            LotteryBand::Malus => 1,
            LotteryBand::Bad => 2,
            LotteryBand::Bonus => 3,
            LotteryBand::Neutral => 4,
        };
        let mut last = 0;
        for i in 0..10_000_u32 {
            let r = f64::from(i) / 10_000.0;
            let current = order(select_band(r, &cfg));
            assert!(current >= last, "bands out of order at {r}");
            last = current;
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn worst_band_applies_non_combat_malus() {
        let outcome = roll(0.005);
        assert_eq!(outcome.message, Some(LotteryMessage::Worst));
        assert_eq!(outcome.revoke_health, 40);
        assert_eq!(outcome.revoke_stamina, 90);
        let buff = outcome.buff.unwrap();
        assert_eq!(buff.delta(BuffStat::Farming), -2);
        assert_eq!(buff.duration_ms, 98_000);
        assert!(buff.is_malus());
    }

    #[test]
    fn worst_band_never_picks_last_category() {
        for pick in 0..12 {
            let outcome = resolve(
                LotteryDraw {
                    roll: 0.001,
                    stat_pick: pick,
                },
                &ctx(),
                &LotteryLabels::default(),
                &LotteryConfig::default(),
            );
            let buff = outcome.buff.unwrap();
            assert_eq!(buff.delta(BuffStat::Foraging), 0);
            assert_eq!(buff.deltas.len(), 1);
        }
    }

    #[test]
    fn malus_band_hits_both_combat_stats() {
        let outcome = roll(0.02);
        let buff = outcome.buff.unwrap();
        assert_eq!(buff.delta(BuffStat::Attack), -3);
        assert_eq!(buff.delta(BuffStat::Defense), -3);
        assert_eq!(buff.display_text, "Kebab (worst)");
        assert_eq!(outcome.revoke_health, 40);
    }

    #[test]
    fn bad_band_has_message_but_no_buff() {
        let outcome = roll(0.05);
        assert_eq!(outcome.band, LotteryBand::Bad);
        assert_eq!(outcome.message, Some(LotteryMessage::Bad));
        assert!(outcome.buff.is_none());
        assert_eq!(outcome.revoke_stamina, 90);
    }

    #[test]
    fn bonus_band_heals_and_buffs() {
        let outcome = roll(0.12);
        assert_eq!(outcome.heal_health, 10);
        assert!((outcome.heal_stamina - 27.0).abs() < f32::EPSILON);
        assert_eq!(outcome.revoke_health, 0);
        let buff = outcome.buff.unwrap();
        assert_eq!(buff.delta(BuffStat::Mining), 2);
        assert_eq!(buff.delta(BuffStat::Attack), 3);
        assert_eq!(buff.duration_ms, 154_000);
        assert_eq!(buff.source, BuffSource::from("larder.Kebab"));
    }

    #[test]
    fn neutral_band_does_nothing() {
        let outcome = roll(0.5);
        assert_eq!(outcome, LotteryOutcome::neutral());
    }

    #[test]
    fn sampled_draws_stay_in_range() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let draw = LotteryDraw::sample(&mut rng);
            assert!((0.0..1.0).contains(&draw.roll));
            assert!(draw.stat_pick < LotteryDraw::ELIGIBLE_STATS);
        }
    }
}
