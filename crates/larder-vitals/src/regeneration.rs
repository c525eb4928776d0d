//! Regeneration scheduler: gradual restoration of health and stamina.
//!
//! A consumption seeds two integer credit counters. While the scheduler is
//! [`RegenPhase::Active`], every tick recomputes the drain interval from
//! live stats and, once enough ticks have elapsed, moves one point of each
//! non-empty counter into the player's vitals.
//!
//! # Tick order
//!
//! 1. Termination check: incapacitated player, or both counters empty,
//!    moves the scheduler to [`RegenPhase::Idle`] before any work.
//! 2. Recompute rate and interval (skills and buffs may have changed).
//! 3. Advance the elapsed counter; no-op until it reaches the interval.
//! 4. Drain one point per non-empty counter, clamped to the maxima.
//!
//! The scheduler does not know about subscriptions: it reports
//! [`RegenTick::Finished`] and the owner unsubscribes.

use std::collections::VecDeque;

use larder_types::{ConsumptionEvent, ItemKind, PlayerVitals, SkillLevels};
use tracing::debug;

use crate::config::RateConfig;
use crate::rate::{self, IntervalInputs};

/// Number of recent drain intervals kept for diagnostics.
pub const RECENT_INTERVALS: usize = 5;

/// Lifecycle tag of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegenPhase {
    /// No pending restoration; not polled.
    #[default]
    Idle,
    /// Draining credits on the tick signal.
    Active,
}

/// Live, non-snapshotted inputs for one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegenContext {
    /// Current skill levels.
    pub skills: SkillLevels,
    /// Whether the cooking skill is enabled.
    pub cooking_enabled: bool,
    /// Whether the player is currently inebriated.
    pub inebriated: bool,
    /// Restoration profession divisor, when the profession is active.
    pub restoration_value: Option<f64>,
}

/// Result of a single scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegenTick {
    /// The interval has not elapsed yet.
    Waiting {
        /// Ticks counted toward the current interval.
        elapsed: u32,
        /// The interval computed this tick.
        interval: u32,
    },
    /// One drain step ran.
    Drained {
        /// Health points actually added (0 if already full).
        health: i32,
        /// Stamina actually added: under one point when clamped at the
        /// maximum, 0 if already full.
        stamina: f32,
    },
    /// The scheduler went idle; the owner should unsubscribe.
    Finished,
}

/// The item profile the rate model reads: kind and quality of the last
/// consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ConsumedProfile {
    kind: ItemKind,
    quality: u32,
}

/// Per-session restoration state.
#[derive(Debug, Clone, Default)]
pub struct RegenerationState {
    phase: RegenPhase,
    health_credits: u32,
    stamina_credits: u32,
    elapsed_ticks: u32,
    last_rate: f64,
    last_interval: u32,
    profile: Option<ConsumedProfile>,
    recent_intervals: VecDeque<u32>,
}

impl RegenerationState {
    /// Create an idle scheduler with no credits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a consumption's recovery to the credit counters.
    ///
    /// Credits accumulate; a second consumption never replaces the first.
    /// The consumed item becomes the rate profile. Returns `true` only on
    /// the `Idle -> Active` transition, so the caller subscribes once.
    pub fn seed(&mut self, event: &ConsumptionEvent) -> bool {
        self.health_credits = self.health_credits.saturating_add(event.health_recovery);
        self.stamina_credits = self.stamina_credits.saturating_add(event.stamina_recovery);
        self.profile = Some(ConsumedProfile {
            kind: event.kind,
            quality: event.quality,
        });

        let activated = self.phase == RegenPhase::Idle;
        self.phase = RegenPhase::Active;
        if activated {
            self.elapsed_ticks = 0;
        }
        debug!(
            item = %event.item,
            health_credits = self.health_credits,
            stamina_credits = self.stamina_credits,
            activated,
            "Regeneration credits seeded"
        );
        activated
    }

    /// Remove credits, saturating at zero.
    ///
    /// Used when the lottery cancels a consumption's restoration.
    pub const fn revoke(&mut self, health: u32, stamina: u32) {
        self.health_credits = self.health_credits.saturating_sub(health);
        self.stamina_credits = self.stamina_credits.saturating_sub(stamina);
    }

    /// Run one tick. See the module docs for the order of operations.
    pub fn tick(
        &mut self,
        vitals: &mut PlayerVitals,
        ctx: &RegenContext,
        config: &RateConfig,
    ) -> RegenTick {
        if self.phase == RegenPhase::Idle {
            return RegenTick::Finished;
        }
        if vitals.is_incapacitated() || (self.health_credits == 0 && self.stamina_credits == 0) {
            debug!(
                health = vitals.health,
                health_credits = self.health_credits,
                stamina_credits = self.stamina_credits,
                "Regeneration finished"
            );
            self.phase = RegenPhase::Idle;
            self.elapsed_ticks = 0;
            return RegenTick::Finished;
        }

        let profile = self.profile.unwrap_or(ConsumedProfile {
            kind: ItemKind::Food,
            quality: 0,
        });
        self.last_rate = rate::regen_rate(
            profile.kind,
            profile.quality,
            ctx.inebriated,
            ctx.restoration_value,
            config,
        );
        self.last_interval = rate::tick_interval(
            &IntervalInputs {
                skills: ctx.skills,
                cooking_enabled: ctx.cooking_enabled,
                vitals: *vitals,
                regen_rate: self.last_rate,
            },
            config,
        );

        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        if self.elapsed_ticks < self.last_interval {
            return RegenTick::Waiting {
                elapsed: self.elapsed_ticks,
                interval: self.last_interval,
            };
        }

        self.recent_intervals.push_back(self.elapsed_ticks);
        while self.recent_intervals.len() > RECENT_INTERVALS {
            self.recent_intervals.pop_front();
        }
        self.elapsed_ticks = 0;

        let mut health = 0;
        if self.health_credits > 0 {
            let before = vitals.health;
            vitals.add_health(1);
            health = vitals.health.saturating_sub(before);
            self.health_credits = self.health_credits.saturating_sub(1);
        }

        let mut stamina = 0.0;
        if self.stamina_credits > 0 {
            let before = vitals.stamina;
            vitals.add_stamina(1.0);
            stamina = vitals.stamina - before;
            self.stamina_credits = self.stamina_credits.saturating_sub(1);
        }

        RegenTick::Drained { health, stamina }
    }

    /// Drop all credits and return to idle (session end).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> RegenPhase {
        self.phase
    }

    /// Return `true` while draining.
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, RegenPhase::Active)
    }

    /// Pending health credits.
    pub const fn health_credits(&self) -> u32 {
        self.health_credits
    }

    /// Pending stamina credits.
    pub const fn stamina_credits(&self) -> u32 {
        self.stamina_credits
    }

    /// Ticks counted toward the current interval.
    pub const fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Regen rate computed on the most recent active tick.
    pub const fn last_rate(&self) -> f64 {
        self.last_rate
    }

    /// Interval computed on the most recent active tick.
    pub const fn last_interval(&self) -> u32 {
        self.last_interval
    }

    /// The last few observed drain intervals, oldest first.
    pub fn recent_intervals(&self) -> impl Iterator<Item = u32> + '_ {
        self.recent_intervals.iter().copied()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use larder_types::ItemName;

    use super::*;

    fn event(health: u32, stamina: u32) -> ConsumptionEvent {
        ConsumptionEvent {
            item: ItemName::from("Salad"),
            display_name: "Salad".to_owned(),
            kind: ItemKind::Food,
            health_recovery: health,
            stamina_recovery: stamina,
            quality: 0,
        }
    }

    fn fast_ctx() -> RegenContext {
        RegenContext {
            skills: SkillLevels {
                combat: 10,
                cooking: 10,
                foraging: 10,
            },
            cooking_enabled: true,
            inebriated: false,
            restoration_value: None,
        }
    }

    #[test]
    fn seed_activates_once_and_accumulates() {
        let mut state = RegenerationState::new();
        assert!(state.seed(&event(10, 20)));
        assert!(!state.seed(&event(5, 5)));
        assert_eq!(state.health_credits(), 15);
        assert_eq!(state.stamina_credits(), 25);
        assert!(state.is_active());
    }

    #[test]
    fn revoke_saturates_at_zero() {
        let mut state = RegenerationState::new();
        state.seed(&event(3, 4));
        state.revoke(10, 2);
        assert_eq!(state.health_credits(), 0);
        assert_eq!(state.stamina_credits(), 2);
    }

    #[test]
    fn idle_scheduler_reports_finished() {
        let mut state = RegenerationState::new();
        let mut v = PlayerVitals::new(50, 100, 50.0, 270.0);
        assert_eq!(
            state.tick(&mut v, &fast_ctx(), &RateConfig::default()),
            RegenTick::Finished
        );
    }

    #[test]
    fn drains_after_interval_elapses() {
        let mut state = RegenerationState::new();
        state.seed(&event(2, 2));
        let mut v = PlayerVitals::full(100, 270.0);
        v.set(50, 100.0);
        let config = RateConfig::default();

        let mut ticks = 0;
        loop {
            ticks += 1;
            if let RegenTick::Drained { health, stamina } = state.tick(&mut v, &fast_ctx(), &config)
            {
                assert_eq!(health, 1);
                assert_eq!(stamina, 1.0);
                break;
            }
            assert!(ticks < 100, "never drained");
        }
        // Maxed skills put the interval at the cooking floor of 14 ticks.
        assert_eq!(ticks, 14);
        assert_eq!(v.health, 51);
        assert_eq!(v.stamina, 101.0);
        assert_eq!(state.health_credits(), 1);
        assert_eq!(state.recent_intervals().collect::<Vec<_>>(), vec![14]);
    }

    #[test]
    fn clamped_stamina_drain_reports_fractional_gain() {
        let mut state = RegenerationState::new();
        state.seed(&event(0, 2));
        let mut v = PlayerVitals::new(100, 100, 269.5, 270.0);
        let config = RateConfig::default();

        let drained = (0..100)
            .map(|_| state.tick(&mut v, &fast_ctx(), &config))
            .find(|t| matches!(t, RegenTick::Drained { .. }));
        assert_eq!(
            drained,
            Some(RegenTick::Drained {
                health: 0,
                stamina: 0.5
            })
        );
        assert_eq!(v.stamina, 270.0);
        assert_eq!(state.stamina_credits(), 1);
    }

    #[test]
    fn full_vitals_consume_credits_without_overshoot() {
        let mut state = RegenerationState::new();
        state.seed(&event(3, 3));
        let mut v = PlayerVitals::full(100, 270.0);
        let config = RateConfig::default();
        for _ in 0..1000 {
            if state.tick(&mut v, &fast_ctx(), &config) == RegenTick::Finished {
                break;
            }
            assert!(v.health <= v.max_health);
            assert!(v.stamina <= v.max_stamina);
        }
        assert_eq!(state.phase(), RegenPhase::Idle);
        assert_eq!(v.health, 100);
    }

    #[test]
    fn incapacitated_player_stops_immediately() {
        let mut state = RegenerationState::new();
        state.seed(&event(30, 30));
        let mut v = PlayerVitals::new(0, 100, 10.0, 270.0);
        assert_eq!(
            state.tick(&mut v, &fast_ctx(), &RateConfig::default()),
            RegenTick::Finished
        );
        assert_eq!(v.stamina, 10.0);
        assert!(!state.is_active());
    }

    #[test]
    fn recent_intervals_are_bounded() {
        let mut state = RegenerationState::new();
        state.seed(&event(20, 0));
        let mut v = PlayerVitals::new(10, 100, 270.0, 270.0);
        let config = RateConfig::default();
        for _ in 0..2000 {
            if state.tick(&mut v, &fast_ctx(), &config) == RegenTick::Finished {
                break;
            }
        }
        assert_eq!(state.recent_intervals().count(), RECENT_INTERVALS);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut state = RegenerationState::new();
        state.seed(&event(5, 5));
        state.reset();
        assert_eq!(state.phase(), RegenPhase::Idle);
        assert_eq!(state.health_credits(), 0);
    }
}
