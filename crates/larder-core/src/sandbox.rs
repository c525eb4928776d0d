//! In-memory host for tests and the headless harness.
//!
//! [`SandboxHost`] implements every host trait over plain fields. It also
//! mimics the two things a real host does on its own: applying an item's
//! instant heal and food buff when eaten ([`consume`]), and counting buff
//! lifetimes down ([`advance_buffs`]).
//!
//! [`consume`]: SandboxHost::consume
//! [`advance_buffs`]: SandboxHost::advance_buffs

use std::collections::{BTreeMap, BTreeSet};

use larder_types::{
    BuffDescriptor, BuffSource, ConsumptionEvent, Friendship, ItemKind, ItemName, LocationKind,
    NpcId, PlayerVitals, Profession, SkillLevels, TilePos,
};
use larder_world::{GridLocation, TileQuery};

use crate::host::{BuffRegistry, DialogueTable, Hud, Localizer, PlayerState, WorldView};

/// English text for every key the engine looks up.
const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("item.kebab.worst", "That kebab was not fresh. You feel awful."),
    ("item.kebab.bad", "That kebab did not sit well."),
    ("item.kebab.best", "What a kebab! You feel fantastic."),
    ("buff.kebab.inspect", "Kebab ({{quality}})"),
    ("buff.kebab.quality_worst", "worst"),
    ("buff.kebab.quality_best", "best"),
];

/// A host simulation held entirely in memory.
#[derive(Debug, Clone)]
pub struct SandboxHost {
    /// Player health and stamina.
    pub vitals: PlayerVitals,
    /// Player skill levels.
    pub skills: SkillLevels,
    /// Professions the player holds.
    pub professions: BTreeSet<Profession>,
    /// Whether the inebriated status is active.
    pub inebriated: bool,
    /// Whether the player can currently act.
    pub agency: bool,
    /// Player tile.
    pub position: TilePos,
    /// The location the player is in.
    pub location: GridLocation,
    /// Friendship records by NPC.
    pub friendships: BTreeMap<NpcId, Friendship>,
    /// Items received, in order.
    pub inventory: Vec<ItemName>,
    /// Stack size of the held item.
    pub held_stack: u32,
    /// Food buff slot.
    pub food_buff: Option<BuffDescriptor>,
    /// Drink buff slot.
    pub drink_buff: Option<BuffDescriptor>,
    /// Buffs from other sources.
    pub other_buffs: Vec<BuffDescriptor>,
    /// Gift-taste entries by NPC.
    pub gift_dialogue: BTreeMap<NpcId, String>,
    /// Translations by key.
    pub translations: BTreeMap<String, String>,
    /// HUD messages shown, in order.
    pub messages: Vec<String>,
}

impl SandboxHost {
    /// Create a host with the given vitals, standing outdoors with no
    /// skills, professions, NPCs, or translations.
    pub fn new(vitals: PlayerVitals) -> Self {
        Self {
            vitals,
            skills: SkillLevels::default(),
            professions: BTreeSet::new(),
            inebriated: false,
            agency: true,
            position: TilePos::default(),
            location: GridLocation::new("Forest", LocationKind::Outdoors, 64, 64),
            friendships: BTreeMap::new(),
            inventory: Vec::new(),
            held_stack: 1,
            food_buff: None,
            drink_buff: None,
            other_buffs: Vec::new(),
            gift_dialogue: BTreeMap::new(),
            translations: BTreeMap::new(),
            messages: Vec::new(),
        }
    }

    /// Load the built-in English translations.
    #[must_use]
    pub fn with_default_translations(mut self) -> Self {
        self.translations.extend(
            DEFAULT_TRANSLATIONS
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned())),
        );
        self
    }

    /// Do what the host does when an item is eaten, before notifying the
    /// engine: heal instantly and install the item's own buff.
    #[allow(clippy::cast_precision_loss)]
    pub fn consume(&mut self, event: &ConsumptionEvent, buff: Option<BuffDescriptor>) {
        self.vitals
            .add_health(i32::try_from(event.health_recovery).unwrap_or(i32::MAX));
        self.vitals.add_stamina(event.stamina_recovery as f32);
        if let Some(buff) = buff {
            self.install_buff(event.kind, buff);
        }
    }

    /// Count buff lifetimes down by `elapsed_ms`, dropping expired buffs.
    pub fn advance_buffs(&mut self, elapsed_ms: u32) {
        let tick = |slot: &mut Option<BuffDescriptor>| {
            if let Some(buff) = slot {
                buff.duration_ms = buff.duration_ms.saturating_sub(elapsed_ms);
            }
            if slot.as_ref().is_some_and(|b| b.duration_ms == 0) {
                *slot = None;
            }
        };
        tick(&mut self.food_buff);
        tick(&mut self.drink_buff);
        for buff in &mut self.other_buffs {
            buff.duration_ms = buff.duration_ms.saturating_sub(elapsed_ms);
        }
        self.other_buffs.retain(|b| b.duration_ms > 0);
    }
}

impl PlayerState for SandboxHost {
    fn vitals(&self) -> PlayerVitals {
        self.vitals
    }

    fn vitals_mut(&mut self) -> &mut PlayerVitals {
        &mut self.vitals
    }

    fn skills(&self) -> SkillLevels {
        self.skills
    }

    fn has_profession(&self, profession: Profession) -> bool {
        self.professions.contains(&profession)
    }

    fn is_inebriated(&self) -> bool {
        self.inebriated
    }

    fn has_agency(&self) -> bool {
        self.agency
    }

    fn friendship(&self, npc: &NpcId) -> Option<Friendship> {
        self.friendships.get(npc).copied()
    }

    fn change_friendship(&mut self, npc: &NpcId, amount: i32) {
        let record = self.friendships.entry(npc.clone()).or_default();
        record.points = record.points.saturating_add(amount);
    }

    fn give_item(&mut self, item: ItemName) {
        self.inventory.push(item);
    }

    fn restock_held_item(&mut self) {
        self.held_stack = self.held_stack.saturating_add(1);
    }
}

impl BuffRegistry for SandboxHost {
    fn install_buff(&mut self, slot: ItemKind, buff: BuffDescriptor) {
        match slot {
            ItemKind::Food => self.food_buff = Some(buff),
            ItemKind::Drink => self.drink_buff = Some(buff),
        }
    }

    fn has_buff_source(&self, source: &BuffSource) -> bool {
        self.food_buff
            .iter()
            .chain(self.drink_buff.iter())
            .chain(self.other_buffs.iter())
            .any(|b| b.source == *source)
    }

    fn consumable_buff(&self, slot: ItemKind) -> Option<&BuffDescriptor> {
        match slot {
            ItemKind::Food => self.food_buff.as_ref(),
            ItemKind::Drink => self.drink_buff.as_ref(),
        }
    }

    fn consumable_buff_mut(&mut self, slot: ItemKind) -> Option<&mut BuffDescriptor> {
        match slot {
            ItemKind::Food => self.food_buff.as_mut(),
            ItemKind::Drink => self.drink_buff.as_mut(),
        }
    }
}

impl DialogueTable for SandboxHost {
    fn gift_dialogue(&self, npc: &NpcId) -> Option<String> {
        self.gift_dialogue.get(npc).cloned()
    }

    fn set_gift_dialogue(&mut self, npc: &NpcId, entry: String) {
        self.gift_dialogue.insert(npc.clone(), entry);
    }
}

impl Localizer for SandboxHost {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
        let template = self.translations.get(key)?;
        Some(args.iter().fold(template.clone(), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
        }))
    }
}

impl Hud for SandboxHost {
    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }
}

impl WorldView for SandboxHost {
    fn location(&self) -> &dyn TileQuery {
        &self.location
    }

    fn player_tile(&self) -> TilePos {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buff(source: &str, duration_ms: u32) -> BuffDescriptor {
        BuffDescriptor::new(BuffSource::from(source), source, duration_ms)
    }

    #[test]
    fn translate_substitutes_arguments() {
        let host = SandboxHost::new(PlayerVitals::full(100, 270.0)).with_default_translations();
        assert_eq!(
            host.translate("buff.kebab.inspect", &[("quality", "worst")]).as_deref(),
            Some("Kebab (worst)")
        );
        assert_eq!(host.translate("missing", &[]), None);
    }

    #[test]
    fn buffs_expire_when_counted_down() {
        let mut host = SandboxHost::new(PlayerVitals::full(100, 270.0));
        host.install_buff(ItemKind::Food, buff("Pizza", 1000));
        host.install_buff(ItemKind::Drink, buff("Coffee", 5000));
        host.other_buffs.push(buff("Totem", 500));

        host.advance_buffs(999);
        assert!(host.has_buff_source(&BuffSource::from("Pizza")));
        assert!(!host.has_buff_source(&BuffSource::from("Totem")));

        host.advance_buffs(1);
        assert!(!host.has_buff_source(&BuffSource::from("Pizza")));
        assert!(host.has_buff_source(&BuffSource::from("Coffee")));
    }

    #[test]
    fn consume_heals_and_installs_buff() {
        let mut host = SandboxHost::new(PlayerVitals::new(50, 100, 200.0, 270.0));
        let event = ConsumptionEvent {
            item: ItemName::from("Coffee"),
            display_name: "Coffee".to_owned(),
            kind: ItemKind::Drink,
            health_recovery: 10,
            stamina_recovery: 100,
            quality: 0,
        };
        host.consume(&event, Some(buff("Coffee", 60_000)));
        assert_eq!(host.vitals.health, 60);
        assert!((host.vitals.stamina - 270.0).abs() < f32::EPSILON);
        assert!(host.consumable_buff(ItemKind::Drink).is_some());
        assert!(host.consumable_buff(ItemKind::Food).is_none());
    }
}
