//! Host collaborator traits.
//!
//! The engine never owns the player, the buff display, or the dialogue
//! tables. It reads and writes them through these narrow seams, which the
//! embedding simulation implements. [`SandboxHost`] implements all of them
//! in memory for tests and the headless harness.
//!
//! [`SandboxHost`]: crate::sandbox::SandboxHost

use larder_types::{
    BuffDescriptor, BuffSource, Friendship, ItemKind, ItemName, NpcId, PlayerVitals, Profession,
    SkillLevels, TilePos,
};
use larder_world::TileQuery;

/// The local player.
pub trait PlayerState {
    /// Current vitals.
    fn vitals(&self) -> PlayerVitals;

    /// Mutable access to the vitals. Writers must keep them clamped.
    fn vitals_mut(&mut self) -> &mut PlayerVitals;

    /// Current skill levels, including temporary buffs.
    fn skills(&self) -> SkillLevels;

    /// Return `true` if the player holds `profession`.
    fn has_profession(&self, profession: Profession) -> bool;

    /// Return `true` while the inebriated status is active.
    fn is_inebriated(&self) -> bool;

    /// Return `false` while the player cannot act (paused, cutscene, menu,
    /// dialogue, tool animation, screen fade).
    fn has_agency(&self) -> bool;

    /// The player's friendship record with `npc`, if they have met.
    fn friendship(&self, npc: &NpcId) -> Option<Friendship>;

    /// Add (or remove, if negative) friendship points with `npc`.
    fn change_friendship(&mut self, npc: &NpcId, amount: i32);

    /// Give the player an item, dropping it at their feet if the inventory
    /// is full.
    fn give_item(&mut self, item: ItemName);

    /// Put one more of the held item back into the player's hand.
    fn restock_held_item(&mut self);
}

/// The host's active-buff display.
pub trait BuffRegistry {
    /// Install `buff` into the food or drink slot, replacing its occupant.
    fn install_buff(&mut self, slot: ItemKind, buff: BuffDescriptor);

    /// Return `true` if any active buff has the given source tag.
    fn has_buff_source(&self, source: &BuffSource) -> bool;

    /// The buff in the food or drink slot.
    fn consumable_buff(&self, slot: ItemKind) -> Option<&BuffDescriptor>;

    /// Mutable access to the buff in the food or drink slot.
    fn consumable_buff_mut(&mut self, slot: ItemKind) -> Option<&mut BuffDescriptor>;
}

/// NPC gift-taste dialogue entries.
pub trait DialogueTable {
    /// The `/`-delimited gift-taste entry for `npc`.
    fn gift_dialogue(&self, npc: &NpcId) -> Option<String>;

    /// Replace the gift-taste entry for `npc`.
    fn set_gift_dialogue(&mut self, npc: &NpcId, entry: String);
}

/// Translated text lookup.
pub trait Localizer {
    /// Translate `key`, substituting `{{name}}` tokens from `args`.
    ///
    /// Returns `None` when the key has no translation.
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> Option<String>;
}

/// On-screen notifications.
pub trait Hud {
    /// Show a transient message to the player.
    fn show_message(&mut self, message: &str);
}

/// Where the player stands.
pub trait WorldView {
    /// The location the player is in.
    fn location(&self) -> &dyn TileQuery;

    /// The player's tile within [`location`](WorldView::location).
    fn player_tile(&self) -> TilePos;
}

/// Everything the engine needs from its host.
pub trait Host: PlayerState + BuffRegistry + DialogueTable + Localizer + Hud + WorldView {}

impl<T> Host for T where T: PlayerState + BuffRegistry + DialogueTable + Localizer + Hud + WorldView {}
