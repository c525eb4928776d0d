//! Enumeration types shared across the engine.

use serde::{Deserialize, Serialize};

/// Whether a consumable is eaten or drunk.
///
/// Drinks regenerate faster than food and occupy the host's drink buff slot
/// instead of the food buff slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Solid food.
    Food,
    /// A drink.
    Drink,
}

impl ItemKind {
    /// Classify an item from the host's object-data category field.
    ///
    /// The host marks drinks with the literal tag `drink`; anything else,
    /// including a missing field, is food.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("drink") => Self::Drink,
            _ => Self::Food,
        }
    }

    /// Return `true` for [`ItemKind::Drink`].
    pub const fn is_drink(self) -> bool {
        matches!(self, Self::Drink)
    }
}

/// Attributes a timed buff can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffStat {
    /// Farming skill bonus.
    Farming,
    /// Fishing skill bonus.
    Fishing,
    /// Mining skill bonus.
    Mining,
    /// Foraging skill bonus.
    Foraging,
    /// Defense (ranged/guard) combat attribute.
    Defense,
    /// Attack (melee) combat attribute.
    Attack,
}

impl BuffStat {
    /// The non-combat stat categories, in the host's buff-constructor order.
    pub const NON_COMBAT: [Self; 4] = [Self::Farming, Self::Fishing, Self::Mining, Self::Foraging];

    /// Return `true` for the two combat attributes.
    pub const fn is_combat(self) -> bool {
        matches!(self, Self::Defense | Self::Attack)
    }
}

/// Cooking professions that change how consumables behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    /// Faster regeneration over time, or bonus instant healing when
    /// heal-over-time is disabled.
    Restoration,
    /// Longer food and drink buffs.
    BuffDuration,
    /// Extra friendship when gifting cooked dishes.
    GiftBoost,
}

/// Classification of the location the player is standing in.
///
/// The fixed-landmark case is decided by location name against
/// configuration, not by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LocationKind {
    /// The player's own house or cabin, with its structure upgrade tier.
    Dwelling {
        /// Structure upgrade tier (0 = starter house, 2+ = has a kitchen).
        upgrade_tier: u32,
    },
    /// Any other enclosed interior.
    Interior,
    /// Open-air location.
    Outdoors,
}

impl LocationKind {
    /// Return `true` for [`LocationKind::Outdoors`].
    pub const fn is_outdoors(self) -> bool {
        matches!(self, Self::Outdoors)
    }
}

/// Outcome band selected by the buff lottery.
///
/// Bands partition `[0, 1)` in ascending order of probability mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryBand {
    /// Restoration revoked and a non-combat stat malus applied.
    Worst,
    /// Restoration revoked and a combat malus applied.
    Malus,
    /// Restoration revoked, no buff.
    Bad,
    /// Instant partial heal and a positive buff.
    Bonus,
    /// Nothing happens.
    Neutral,
}

impl LotteryBand {
    /// Return `true` when the band revokes the restoration credited for the
    /// triggering consumption.
    pub const fn revokes_restoration(self) -> bool {
        matches!(self, Self::Worst | Self::Malus | Self::Bad)
    }
}

/// Quality label attached to a lottery buff's display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffQuality {
    /// Label for either malus band.
    Worst,
    /// Label for the bonus band.
    Best,
}

impl BuffQuality {
    /// Localization key for this quality label.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Worst => "buff.kebab.quality_worst",
            Self::Best => "buff.kebab.quality_best",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drink_tag_classification() {
        assert_eq!(ItemKind::from_tag(Some("drink")), ItemKind::Drink);
        assert_eq!(ItemKind::from_tag(Some("food")), ItemKind::Food);
        assert_eq!(ItemKind::from_tag(None), ItemKind::Food);
    }

    #[test]
    fn only_low_bands_revoke() {
        assert!(LotteryBand::Worst.revokes_restoration());
        assert!(LotteryBand::Malus.revokes_restoration());
        assert!(LotteryBand::Bad.revokes_restoration());
        assert!(!LotteryBand::Bonus.revokes_restoration());
        assert!(!LotteryBand::Neutral.revokes_restoration());
    }

    #[test]
    fn combat_stats() {
        assert!(BuffStat::Attack.is_combat());
        assert!(BuffStat::Defense.is_combat());
        assert!(BuffStat::NON_COMBAT.iter().all(|s| !s.is_combat()));
    }
}
