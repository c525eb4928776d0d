//! The vitals engine: consumption, gift, and tick handlers.
//!
//! [`VitalsEngine`] owns every piece of state that outlives a single host
//! event: the regeneration scheduler, the tick subscriptions, the watched
//! lottery buff, the outstanding gift-dialogue patch, the last-tick vitals
//! snapshot, and the save data it updates. The host drives it through
//! three entry points:
//!
//! - [`on_item_eaten`] when the player finishes eating or drinking,
//! - [`on_gift_given`] just before an NPC accepts a gift,
//! - [`on_tick`] once per simulation tick.
//!
//! All handlers run synchronously to completion. The engine never blocks
//! and never samples randomness itself: lottery draws are passed in.
//!
//! [`on_item_eaten`]: VitalsEngine::on_item_eaten
//! [`on_gift_given`]: VitalsEngine::on_gift_given
//! [`on_tick`]: VitalsEngine::on_tick

use std::collections::BTreeSet;

use larder_types::{
    BuffQuality, BuffSource, ConsumptionEvent, GiftDialoguePatch, GiftEvent, ItemKind, ItemName,
    NpcId, PlayerVitals, Profession, SaveData,
};
use larder_vitals::lottery::{self, LotteryContext, LotteryDraw, LotteryLabels, LotteryOutcome};
use larder_vitals::professions;
use larder_vitals::{RegenContext, RegenPhase, RegenTick, RegenerationState};
use larder_world::{EquipmentLevels, StationSearch};
use tracing::{debug, error, info, warn};

use crate::config::LarderConfig;
use crate::dialogue::{self, DialogueError, ENTRY_DELIMITER, LOVED_GIFT_FIELD};
use crate::error::EngineError;
use crate::host::{Host, Localizer};
use crate::schedule::{TickSchedule, TickTask};
use crate::watcher::{self, Watcher};

/// Localization key of the lottery buff's inspect text.
pub const BUFF_LABEL_KEY: &str = "buff.kebab.inspect";

/// What one consumption did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionReport {
    /// The scheduler went from idle to active.
    pub regeneration_started: bool,
    /// Lottery result, when the lottery item was eaten.
    pub lottery: Option<LotteryOutcome>,
    /// Leftover handed to the player.
    pub leftover: Option<ItemName>,
    /// New duration of the item's own buff after the profession extension.
    pub extended_buff_ms: Option<u32>,
    /// Buff source now being watched.
    pub watching: Option<BuffSource>,
}

/// What one gift event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftOutcome {
    /// The NPC will not accept the gift; nothing changed.
    Ignored,
    /// The gift was accepted without a dialogue override.
    Accepted {
        /// Friendship added by the gift-boost profession.
        friendship_boost: Option<i32>,
    },
    /// A one-time dialogue override was installed.
    DialoguePatched {
        /// Friendship added by the gift-boost profession.
        friendship_boost: Option<i32>,
    },
}

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Health added by the scheduler.
    pub drained_health: i32,
    /// Stamina added by the scheduler.
    pub drained_stamina: f32,
    /// The scheduler went idle and unsubscribed.
    pub regeneration_finished: bool,
    /// The scheduler was skipped because the player had no agency.
    pub skipped_no_agency: bool,
    /// The watched buff disappeared and its watcher fired.
    pub buff_expired: Option<BuffSource>,
    /// The NPC whose gift dialogue was reverted.
    pub dialogue_reverted: Option<NpcId>,
}

/// Scheduler state for debug display.
#[derive(Debug, Clone, PartialEq)]
pub struct RegenDiagnostics {
    /// Idle or active.
    pub phase: RegenPhase,
    /// Pending health credits.
    pub health_credits: u32,
    /// Pending stamina credits.
    pub stamina_credits: u32,
    /// Ticks counted toward the current interval.
    pub elapsed_ticks: u32,
    /// Regen rate computed on the last tick.
    pub last_rate: f64,
    /// Interval computed on the last tick.
    pub last_interval: u32,
    /// The most recent observed drain intervals, oldest first.
    pub recent_intervals: Vec<u32>,
}

/// The vitals regeneration and consumable buff engine.
#[derive(Debug)]
pub struct VitalsEngine {
    config: LarderConfig,
    regen: RegenerationState,
    schedule: TickSchedule,
    watched_buff: Option<Watcher<BuffSource>>,
    pending_patch: Option<Watcher<GiftDialoguePatch>>,
    last_tick_vitals: Option<PlayerVitals>,
    current_tick: u64,
    save: SaveData,
    reported_missing: BTreeSet<String>,
}

impl VitalsEngine {
    /// Create an engine with empty save data.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Tuning`] if the tuning values are unusable.
    pub fn new(config: LarderConfig) -> Result<Self, EngineError> {
        config.tuning.validate()?;
        info!(
            heal_over_time = config.features.food_heals_over_time,
            cooking_skill = config.features.cooking_skill,
            lottery_item = %config.items.lottery_item,
            "Vitals engine ready"
        );
        Ok(Self {
            config,
            regen: RegenerationState::new(),
            schedule: TickSchedule::new(),
            watched_buff: None,
            pending_patch: None,
            last_tick_vitals: None,
            current_tick: 0,
            save: SaveData::default(),
            reported_missing: BTreeSet::new(),
        })
    }

    /// Replace the save data (on save load).
    pub fn load_save(&mut self, save: SaveData) {
        self.save = save;
    }

    // -----------------------------------------------------------------------
    // Consumption
    // -----------------------------------------------------------------------

    /// Handle the player finishing an item.
    ///
    /// The host has already applied the item's instant heal and food buff.
    /// With heal-over-time on, the instant heal is undone (vitals go back
    /// to the snapshot taken after the last tick or consumption) and the
    /// recovery becomes scheduler credits instead. Without a snapshot the
    /// item's own recovery is subtracted. `draw` is only read for the
    /// lottery item.
    pub fn on_item_eaten<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: &ConsumptionEvent,
        draw: LotteryDraw,
    ) -> ConsumptionReport {
        info!(
            item = %event.item,
            kind = ?event.kind,
            health = event.health_recovery,
            stamina = event.stamina_recovery,
            quality = event.quality,
            "Item eaten"
        );
        let features = self.config.features;
        let mut report = ConsumptionReport::default();
        let before_meal = self
            .last_tick_vitals
            .unwrap_or_else(|| without_instant_heal(host.vitals(), event));

        if features.food_heals_over_time {
            host.vitals_mut().set(before_meal.health, before_meal.stamina);
            report.regeneration_started = self.regen.seed(event);
            self.schedule.subscribe(TickTask::Regeneration);
        } else if features.cooking_skill && host.has_profession(Profession::Restoration) {
            professions::apply_instant_restoration(
                host.vitals_mut(),
                event,
                &self.config.tuning.professions,
            );
        }

        if features.cooking_skill && host.has_profession(Profession::BuffDuration) {
            report.extended_buff_ms = self.extend_item_buff(host, event);
        }

        self.save.record_eaten(&event.item);
        report.leftover = self.give_leftover(host, &event.item);

        let mut lottery_source = None;
        if event.item == self.config.items.lottery_item {
            let outcome = self.run_lottery(host, event, draw, before_meal);
            lottery_source = outcome.buff.as_ref().map(|b| b.source.clone());
            report.lottery = Some(outcome);
        }

        report.watching = self.watch_buff(host, event, lottery_source);
        // A second item this tick must only undo its own instant heal.
        self.last_tick_vitals = Some(host.vitals());
        report
    }

    fn extend_item_buff<H: Host + ?Sized>(
        &self,
        host: &mut H,
        event: &ConsumptionEvent,
    ) -> Option<u32> {
        let vitals = host.vitals();
        let buff = host.consumable_buff_mut(event.kind)?;
        if buff.display_text != event.display_name {
            return None;
        }
        let extended = professions::extended_buff_duration(
            buff.duration_ms,
            &vitals,
            &self.config.tuning.professions,
        );
        debug!(
            source = %buff.source,
            from_ms = buff.duration_ms,
            to_ms = extended,
            "Buff duration extended"
        );
        buff.duration_ms = extended;
        Some(extended)
    }

    fn give_leftover<H: Host + ?Sized>(&self, host: &mut H, item: &ItemName) -> Option<ItemName> {
        if !self.config.features.give_leftovers {
            return None;
        }
        let leftover = self.config.leftovers.leftover_for(item)?;
        debug!(item = %item, leftover = %leftover, "Leftovers given");
        host.give_item(leftover.clone());
        Some(leftover)
    }

    fn run_lottery<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: &ConsumptionEvent,
        draw: LotteryDraw,
        before_meal: PlayerVitals,
    ) -> LotteryOutcome {
        let heals_over_time = self.config.features.food_heals_over_time;
        let (credited_health, credited_stamina) = if heals_over_time {
            (event.health_recovery, event.stamina_recovery)
        } else {
            (0, 0)
        };
        let ctx = LotteryContext {
            credited_health,
            credited_stamina,
            vitals: host.vitals(),
        };
        let labels = LotteryLabels {
            worst: buff_label(host, BuffQuality::Worst),
            best: buff_label(host, BuffQuality::Best),
        };
        let outcome = lottery::resolve(draw, &ctx, &labels, &self.config.tuning.lottery);
        info!(roll = draw.roll, band = ?outcome.band, "Lottery resolved");

        if outcome.band.revokes_restoration() {
            self.regen.revoke(outcome.revoke_health, outcome.revoke_stamina);
            if !heals_over_time {
                host.vitals_mut().set(before_meal.health, before_meal.stamina);
            }
            debug!(
                health_credits = self.regen.health_credits(),
                stamina_credits = self.regen.stamina_credits(),
                "Restoration revoked"
            );
        }

        let vitals = host.vitals_mut();
        vitals.add_health(outcome.heal_health);
        vitals.add_stamina(outcome.heal_stamina);

        if let Some(message) = outcome.message {
            let text = localize(host, message.key(), &[]);
            if !text.is_empty() {
                host.show_message(&text);
            }
        }
        if let Some(buff) = &outcome.buff {
            info!(
                source = %buff.source,
                duration_ms = buff.duration_ms,
                malus = buff.is_malus(),
                "Lottery buff installed"
            );
            host.install_buff(ItemKind::Food, buff.clone());
        }
        outcome
    }

    /// Start watching the lottery buff, or else the item's own buff.
    fn watch_buff<H: Host + ?Sized>(
        &mut self,
        host: &H,
        event: &ConsumptionEvent,
        lottery_source: Option<BuffSource>,
    ) -> Option<BuffSource> {
        let source = lottery_source.or_else(|| {
            host.consumable_buff(event.kind)
                .filter(|buff| buff.source.as_str() == event.item.as_str())
                .map(|buff| buff.source.clone())
        })?;

        let watcher = Watcher::new(source.clone(), self.current_tick);
        if let Some(previous) = self.watched_buff.replace(watcher) {
            debug!(previous = %previous.target(), "Replacing watched buff");
        }
        self.schedule.subscribe(TickTask::BuffWatch);
        debug!(source = %source, tick = self.current_tick, "Watching buff");
        Some(source)
    }

    // -----------------------------------------------------------------------
    // Gifts
    // -----------------------------------------------------------------------

    /// Handle a gift about to be accepted.
    ///
    /// Gifts the NPC would refuse are ignored. Egg gifts install a
    /// one-time reaction that is reverted on the next tick; only one such
    /// override may be outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`DialogueError::PatchOutstanding`] if an earlier override
    /// has not been reverted yet, or [`DialogueError::MissingText`] if the
    /// reaction text for the NPC is missing. Friendship boosts and basket
    /// restocks have already been applied in both cases.
    pub fn on_gift_given<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        gift: &GiftEvent,
    ) -> Result<GiftOutcome, EngineError> {
        let accepted = host
            .friendship(&gift.npc)
            .is_some_and(|f| f.accepts_gift());
        if !accepted {
            debug!(npc = %gift.npc, item = %gift.item, "Gift will be refused; ignoring");
            return Ok(GiftOutcome::Ignored);
        }

        let boosts = self.config.features.cooking_skill && host.has_profession(Profession::GiftBoost);
        let friendship_boost = if boosts {
            professions::gift_boost(gift.category, &self.config.tuning.professions)
        } else {
            None
        };
        if let Some(amount) = friendship_boost {
            host.change_friendship(&gift.npc, amount);
            debug!(npc = %gift.npc, amount, "Gift boost applied");
        }

        if !self.config.items.is_egg_gift(&gift.item) {
            return Ok(GiftOutcome::Accepted { friendship_boost });
        }
        if gift.item == self.config.items.egg_basket_item {
            host.restock_held_item();
        }

        if let Some(pending) = &self.pending_patch {
            let err = DialogueError::PatchOutstanding {
                npc: gift.npc.clone(),
                pending: pending.target().npc.clone(),
            };
            warn!(error = %err, "Gift dialogue patch rejected");
            return Err(err.into());
        }

        let Some(original_entry) = host.gift_dialogue(&gift.npc) else {
            debug!(npc = %gift.npc, "No gift dialogue entry; skipping override");
            return Ok(GiftOutcome::Accepted { friendship_boost });
        };

        let key = dialogue::egg_gift_key(&gift.npc);
        let Some(text) = host.translate(&key, &[]).filter(|t| !t.is_empty()) else {
            if self.reported_missing.insert(key.clone()) {
                error!(key = %key, npc = %gift.npc, "Missing egg gift dialogue text");
            }
            return Err(DialogueError::MissingText { key }.into());
        };

        let patched = dialogue::update_entry(
            &original_entry,
            &[Some(text.as_str())],
            false,
            false,
            LOVED_GIFT_FIELD,
            ENTRY_DELIMITER,
        );
        host.set_gift_dialogue(&gift.npc, patched);
        self.pending_patch = Some(Watcher::new(
            GiftDialoguePatch {
                npc: gift.npc.clone(),
                original_entry,
            },
            self.current_tick,
        ));
        self.schedule.subscribe(TickTask::DialogueRevert);
        info!(npc = %gift.npc, tick = self.current_tick, "Egg gift dialogue patched");
        Ok(GiftOutcome::DialoguePatched { friendship_boost })
    }

    // -----------------------------------------------------------------------
    // Ticks
    // -----------------------------------------------------------------------

    /// Run every subscribed task for `tick`, in registration order.
    ///
    /// The scheduler pauses while the player has no agency; watchers do
    /// not. Vitals are snapshotted after all tasks have run.
    pub fn on_tick<H: Host + ?Sized>(&mut self, host: &mut H, tick: u64) -> TickReport {
        self.current_tick = tick;
        let mut report = TickReport::default();

        for task in self.schedule.snapshot() {
            match task {
                TickTask::Regeneration => self.tick_regeneration(host, &mut report),
                TickTask::BuffWatch => {
                    let expired =
                        watcher::poll(&mut self.watched_buff, tick, |s| !host.has_buff_source(s));
                    if let Some(source) = &expired {
                        info!(source = %source, tick, "Watched buff expired");
                    }
                    report.buff_expired = expired;
                    if self.watched_buff.is_none() {
                        self.schedule.unsubscribe(TickTask::BuffWatch);
                    }
                }
                TickTask::DialogueRevert => {
                    if let Some(patch) = watcher::poll(&mut self.pending_patch, tick, |_| true) {
                        host.set_gift_dialogue(&patch.npc, patch.original_entry);
                        info!(npc = %patch.npc, tick, "Gift dialogue reverted");
                        report.dialogue_reverted = Some(patch.npc);
                    }
                    if self.pending_patch.is_none() {
                        self.schedule.unsubscribe(TickTask::DialogueRevert);
                    }
                }
            }
        }

        self.last_tick_vitals = Some(host.vitals());
        report
    }

    fn tick_regeneration<H: Host + ?Sized>(&mut self, host: &mut H, report: &mut TickReport) {
        if !host.has_agency() {
            report.skipped_no_agency = true;
            return;
        }
        let ctx = self.regen_context(host);
        match self.regen.tick(host.vitals_mut(), &ctx, &self.config.tuning.rate) {
            RegenTick::Waiting { .. } => {}
            RegenTick::Drained { health, stamina } => {
                report.drained_health = health;
                report.drained_stamina = stamina;
                if self.config.features.debug_mode {
                    let diag = self.diagnostics();
                    debug!(
                        rate = diag.last_rate,
                        interval = diag.last_interval,
                        health_credits = diag.health_credits,
                        stamina_credits = diag.stamina_credits,
                        recent = ?diag.recent_intervals,
                        "Regeneration drain"
                    );
                }
            }
            RegenTick::Finished => {
                report.regeneration_finished = true;
                info!(tick = self.current_tick, "Regeneration idle");
                self.schedule.unsubscribe(TickTask::Regeneration);
            }
        }
    }

    fn regen_context<H: Host + ?Sized>(&self, host: &H) -> RegenContext {
        let cooking = self.config.features.cooking_skill;
        RegenContext {
            skills: host.skills(),
            cooking_enabled: cooking,
            inebriated: host.is_inebriated(),
            restoration_value: (cooking && host.has_profession(Profession::Restoration))
                .then_some(self.config.tuning.professions.restoration_value),
        }
    }

    // -----------------------------------------------------------------------
    // Stations and session
    // -----------------------------------------------------------------------

    /// Cooking equipment level available around the player (0 = none).
    pub fn cooking_station_level<H: Host + ?Sized>(&self, host: &H) -> i32 {
        let stations = &self.config.stations;
        let search = StationSearch {
            player: host.player_tile(),
            radius: stations.use_range,
            landmark: &stations.landmark,
            station_tiles: &stations.tile_indexes,
            campfire_object: &stations.campfire_object,
            equipment: EquipmentLevels {
                client: self.save.client_equipment_level,
                landmark: self.save.landmark_equipment_level,
            },
        };
        larder_world::find_station_level(host.location(), &search)
    }

    /// Tear down all per-session state.
    ///
    /// An outstanding dialogue patch is reverted first so the host's table
    /// is left as it was found. Save data is kept.
    pub fn end_session<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(pending) = self.pending_patch.take() {
            let patch = pending.target();
            host.set_gift_dialogue(&patch.npc, patch.original_entry.clone());
            info!(npc = %patch.npc, "Gift dialogue reverted at session end");
        }
        self.regen.reset();
        self.watched_buff = None;
        self.schedule.clear();
        self.last_tick_vitals = None;
        self.current_tick = 0;
        info!("Vitals session ended");
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The engine configuration.
    pub const fn config(&self) -> &LarderConfig {
        &self.config
    }

    /// The save data, including the foods-eaten ledger.
    pub const fn save_data(&self) -> &SaveData {
        &self.save
    }

    /// The regeneration scheduler.
    pub const fn regeneration(&self) -> &RegenerationState {
        &self.regen
    }

    /// The tick subscriptions.
    pub const fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Source tag of the watched buff, if any.
    pub fn watched_buff(&self) -> Option<&BuffSource> {
        self.watched_buff.as_ref().map(Watcher::target)
    }

    /// The outstanding gift-dialogue patch, if any.
    pub fn pending_patch(&self) -> Option<&GiftDialoguePatch> {
        self.pending_patch.as_ref().map(Watcher::target)
    }

    /// The last tick seen by [`on_tick`](Self::on_tick).
    pub const fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Scheduler state for debug display.
    pub fn diagnostics(&self) -> RegenDiagnostics {
        RegenDiagnostics {
            phase: self.regen.phase(),
            health_credits: self.regen.health_credits(),
            stamina_credits: self.regen.stamina_credits(),
            elapsed_ticks: self.regen.elapsed_ticks(),
            last_rate: self.regen.last_rate(),
            last_interval: self.regen.last_interval(),
            recent_intervals: self.regen.recent_intervals().collect(),
        }
    }
}

/// `vitals` with the item's instant heal taken back out, clamped.
#[allow(clippy::cast_precision_loss)]
fn without_instant_heal(mut vitals: PlayerVitals, event: &ConsumptionEvent) -> PlayerVitals {
    vitals.add_health(i32::try_from(event.health_recovery).map_or(i32::MIN, i32::saturating_neg));
    vitals.add_stamina(-(event.stamina_recovery as f32));
    vitals
}

/// Translate `key`, falling back to the key itself.
fn localize<H: Localizer + ?Sized>(host: &H, key: &str, args: &[(&str, &str)]) -> String {
    host.translate(key, args).unwrap_or_else(|| {
        warn!(key, "Missing translation; showing key");
        key.to_owned()
    })
}

fn buff_label<H: Localizer + ?Sized>(host: &H, quality: BuffQuality) -> String {
    let quality = localize(host, quality.key(), &[]);
    localize(host, BUFF_LABEL_KEY, &[("quality", quality.as_str())])
}
