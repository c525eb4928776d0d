//! Core structs exchanged between the host simulation and the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{BuffStat, ItemKind};
use crate::ids::{BuffSource, ItemName, NpcId};

/// Integer tile coordinate within a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TilePos {
    /// Create a tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this position shifted by `(dx, dy)`, saturating at the
    /// coordinate bounds.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Return `true` if `other` lies inside the square of the given radius
    /// centred on this tile (Chebyshev distance).
    pub const fn within_radius(self, other: Self, radius: u32) -> bool {
        self.x.abs_diff(other.x) <= radius && self.y.abs_diff(other.y) <= radius
    }
}

/// The player's two bounded resources.
///
/// Health is integral, stamina fractional. Both stay within
/// `[0, max]` after every mutation made through these methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVitals {
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Current stamina.
    pub stamina: f32,
    /// Maximum stamina.
    pub max_stamina: f32,
}

impl PlayerVitals {
    /// Create vitals at the given levels, clamped into bounds.
    pub fn new(health: i32, max_health: i32, stamina: f32, max_stamina: f32) -> Self {
        let mut vitals = Self {
            health,
            max_health: max_health.max(0),
            stamina,
            max_stamina: max_stamina.max(0.0),
        };
        vitals.clamp();
        vitals
    }

    /// Create vitals with both resources full.
    pub fn full(max_health: i32, max_stamina: f32) -> Self {
        Self::new(max_health, max_health, max_stamina, max_stamina)
    }

    /// Add (or with a negative amount, remove) health, clamped to bounds.
    pub fn add_health(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount).clamp(0, self.max_health);
    }

    /// Add (or with a negative amount, remove) stamina, clamped to bounds.
    pub fn add_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina + amount).clamp(0.0, self.max_stamina);
    }

    /// Overwrite both resources, clamped to bounds.
    pub fn set(&mut self, health: i32, stamina: f32) {
        self.health = health;
        self.stamina = stamina;
        self.clamp();
    }

    /// Force both resources back into `[0, max]`.
    pub fn clamp(&mut self) {
        self.health = self.health.clamp(0, self.max_health);
        self.stamina = self.stamina.clamp(0.0, self.max_stamina);
    }

    /// The player has collapsed and must not receive further restoration.
    pub const fn is_incapacitated(&self) -> bool {
        self.health < 1
    }

    /// Return `true` when health is below its maximum.
    pub const fn health_missing(&self) -> bool {
        self.health < self.max_health
    }

    /// Return `true` when stamina is below its maximum.
    pub fn stamina_missing(&self) -> bool {
        self.stamina < self.max_stamina
    }
}

/// Skill levels read by the rate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillLevels {
    /// Combat level (0-10).
    pub combat: u32,
    /// Cooking level (0-10). Ignored when the cooking skill is disabled.
    pub cooking: u32,
    /// Foraging level (0-10).
    pub foraging: u32,
}

/// A single item consumption, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    /// Internal item name.
    pub item: ItemName,
    /// Translated item name, matched against buff display sources.
    pub display_name: String,
    /// Food or drink.
    pub kind: ItemKind,
    /// Health the item restores when eaten.
    pub health_recovery: u32,
    /// Stamina the item restores when eaten.
    pub stamina_recovery: u32,
    /// Quality tier (0 = normal, 1 = silver, 2 = gold, 4 = iridium).
    pub quality: u32,
}

/// A timed stat change handed to the host's active-buff registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffDescriptor {
    /// Source tag used to observe the buff after installation.
    pub source: BuffSource,
    /// Text shown when the player inspects the buff.
    pub display_text: String,
    /// Per-attribute deltas. Attributes not present are unchanged.
    pub deltas: BTreeMap<BuffStat, i32>,
    /// Remaining lifetime in milliseconds.
    pub duration_ms: u32,
}

impl BuffDescriptor {
    /// Create a buff with no stat deltas.
    pub fn new(source: BuffSource, display_text: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            source,
            display_text: display_text.into(),
            deltas: BTreeMap::new(),
            duration_ms,
        }
    }

    /// Builder: set the delta for one attribute.
    #[must_use]
    pub fn with_delta(mut self, stat: BuffStat, delta: i32) -> Self {
        self.deltas.insert(stat, delta);
        self
    }

    /// Return the delta for an attribute (0 if untouched).
    pub fn delta(&self, stat: BuffStat) -> i32 {
        self.deltas.get(&stat).copied().unwrap_or(0)
    }

    /// Return `true` if every delta is negative.
    pub fn is_malus(&self) -> bool {
        !self.deltas.is_empty() && self.deltas.values().all(|d| *d < 0)
    }
}

/// A one-time dialogue override awaiting revert.
///
/// Captures the NPC's gift-taste entry as it was before the override so
/// the revert can restore it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftDialoguePatch {
    /// The NPC whose entry was overridden.
    pub npc: NpcId,
    /// The entry before the override.
    pub original_entry: String,
}

/// A gift about to be handed to an NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftEvent {
    /// Recipient.
    pub npc: NpcId,
    /// Internal name of the gifted item.
    pub item: ItemName,
    /// Host object category of the gifted item.
    pub category: i32,
}

/// The player's friendship record with one NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Friendship {
    /// Friendship points.
    pub points: i32,
    /// Gifts given to this NPC in the current week.
    pub gifts_this_week: u32,
    /// Gifts given to this NPC today.
    pub gifts_today: u32,
}

impl Friendship {
    /// Whether the NPC will accept another gift right now.
    ///
    /// Two gifts a week, one a day.
    pub const fn accepts_gift(&self) -> bool {
        self.gifts_this_week <= 1 && self.gifts_today == 0
    }
}

/// Per-save data the engine reads and updates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    /// How many times each item has been eaten.
    pub foods_eaten: BTreeMap<ItemName, u32>,
    /// Cooking equipment level owned by this client.
    pub client_equipment_level: i32,
    /// Equipment level of the shared landmark cooking range.
    pub landmark_equipment_level: i32,
}

impl SaveData {
    /// Record one consumption of `item`.
    pub fn record_eaten(&mut self, item: &ItemName) {
        let count = self.foods_eaten.entry(item.clone()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Return how many times `item` has been eaten.
    pub fn times_eaten(&self, item: &ItemName) -> u32 {
        self.foods_eaten.get(item).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn vitals_clamp_on_construction() {
        let v = PlayerVitals::new(150, 100, -5.0, 270.0);
        assert_eq!(v.health, 100);
        assert_eq!(v.stamina, 0.0);
    }

    #[test]
    fn add_health_never_overshoots() {
        let mut v = PlayerVitals::new(99, 100, 10.0, 270.0);
        v.add_health(5);
        assert_eq!(v.health, 100);
        v.add_health(-500);
        assert_eq!(v.health, 0);
        assert!(v.is_incapacitated());
    }

    #[test]
    fn add_stamina_never_overshoots() {
        let mut v = PlayerVitals::new(50, 100, 269.5, 270.0);
        v.add_stamina(1.0);
        assert_eq!(v.stamina, 270.0);
        assert!(!v.stamina_missing());
    }

    #[test]
    fn radius_is_square() {
        let centre = TilePos::new(16, 16);
        assert!(centre.within_radius(TilePos::new(18, 14), 2));
        assert!(!centre.within_radius(TilePos::new(19, 16), 2));
    }

    #[test]
    fn friendship_gift_gate() {
        let mut f = Friendship::default();
        assert!(f.accepts_gift());
        f.gifts_today = 1;
        assert!(!f.accepts_gift());
        f.gifts_today = 0;
        f.gifts_this_week = 2;
        assert!(!f.accepts_gift());
    }

    #[test]
    fn buff_builder_and_malus() {
        let buff = BuffDescriptor::new(BuffSource::from("x"), "X", 1000)
            .with_delta(BuffStat::Attack, -3)
            .with_delta(BuffStat::Defense, -3);
        assert_eq!(buff.delta(BuffStat::Attack), -3);
        assert_eq!(buff.delta(BuffStat::Mining), 0);
        assert!(buff.is_malus());
    }

    #[test]
    fn save_data_counts_meals() {
        let mut save = SaveData::default();
        let item = ItemName::from("Kebab");
        save.record_eaten(&item);
        save.record_eaten(&item);
        assert_eq!(save.times_eaten(&item), 2);
        assert_eq!(save.times_eaten(&ItemName::from("Salad")), 0);
    }
}
