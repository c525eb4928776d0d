//! Configuration loading and typed config structures for the Larder engine.
//!
//! The canonical configuration lives in `larder-config.yaml` at the project
//! root. Every section and field is optional; omitted values fall back to
//! the defaults defined here, so an empty file is a valid configuration.

use std::path::Path;

use larder_types::ItemName;
use larder_vitals::{VitalsConfig, VitalsError};
use larder_world::Landmark;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The tuning section parsed but is not usable.
    #[error("invalid tuning values: {source}")]
    Invalid {
        /// The underlying validation error.
        #[from]
        source: VitalsError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `larder-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LarderConfig {
    /// Feature toggles.
    #[serde(default)]
    pub features: FeatureConfig,

    /// Cooking station lookup.
    #[serde(default)]
    pub stations: StationConfig,

    /// Leftovers from large dishes.
    #[serde(default)]
    pub leftovers: LeftoverConfig,

    /// Items with special handling.
    #[serde(default)]
    pub items: ItemConfig,

    /// Rate, lottery, and profession constants.
    #[serde(default)]
    pub tuning: VitalsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LarderConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the tuning values are unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the tuning values are unusable.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.tuning.validate()?;
        Ok(config)
    }
}

/// Feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeatureConfig {
    /// Enable the cooking skill and its professions.
    #[serde(default = "default_true")]
    pub cooking_skill: bool,

    /// Restore vitals gradually instead of instantly.
    #[serde(default = "default_true")]
    pub food_heals_over_time: bool,

    /// Hand out leftovers from large dishes.
    #[serde(default = "default_true")]
    pub give_leftovers: bool,

    /// Log scheduler diagnostics on every drain step.
    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            cooking_skill: true,
            food_heals_over_time: true,
            give_leftovers: true,
            debug_mode: false,
        }
    }
}

/// Cooking station lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationConfig {
    /// Search radius in tiles around the player.
    #[serde(default = "default_use_range")]
    pub use_range: u32,

    /// Buildings-layer tile indices that act as cooking stations.
    #[serde(default = "default_tile_indexes")]
    pub tile_indexes: Vec<u32>,

    /// The fixed landmark range.
    #[serde(default)]
    pub landmark: Landmark,

    /// Object name that counts as an outdoor campfire.
    #[serde(default = "default_campfire_object")]
    pub campfire_object: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            use_range: default_use_range(),
            tile_indexes: default_tile_indexes(),
            landmark: Landmark::default(),
            campfire_object: default_campfire_object(),
        }
    }
}

/// Leftovers from large dishes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeftoverConfig {
    /// Items that leave leftovers when eaten.
    #[serde(default = "default_leftover_foods")]
    pub foods: Vec<ItemName>,

    /// Lower-case name suffixes whose leftovers are slices rather than halves.
    #[serde(default = "default_slice_suffixes")]
    pub slice_suffixes: Vec<String>,
}

impl Default for LeftoverConfig {
    fn default() -> Self {
        Self {
            foods: default_leftover_foods(),
            slice_suffixes: default_slice_suffixes(),
        }
    }
}

impl LeftoverConfig {
    /// Name of the leftover `item` leaves behind, if it leaves one.
    pub fn leftover_for(&self, item: &ItemName) -> Option<ItemName> {
        if !self.foods.contains(item) {
            return None;
        }
        let lower = item.as_str().to_lowercase();
        let sliced = self
            .slice_suffixes
            .iter()
            .any(|suffix| lower.ends_with(suffix.as_str()));
        let piece = if sliced { "Slice" } else { "Half" };
        Some(ItemName::new(format!("{item} {piece}")))
    }
}

/// Items with special handling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemConfig {
    /// The item that triggers the buff lottery.
    #[serde(default = "default_lottery_item")]
    pub lottery_item: ItemName,

    /// Gift that triggers the one-time egg dialogue.
    #[serde(default = "default_egg_item")]
    pub egg_item: ItemName,

    /// Gift that triggers the egg dialogue and restocks the held item.
    #[serde(default = "default_egg_basket_item")]
    pub egg_basket_item: ItemName,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            lottery_item: default_lottery_item(),
            egg_item: default_egg_item(),
            egg_basket_item: default_egg_basket_item(),
        }
    }
}

impl ItemConfig {
    /// Return `true` if `item` is one of the egg gifts.
    pub fn is_egg_gift(&self, item: &ItemName) -> bool {
        *item == self.egg_item || *item == self.egg_basket_item
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_use_range() -> u32 {
    2
}

fn default_tile_indexes() -> Vec<u32> {
    vec![498, 499, 631, 632, 633]
}

fn default_campfire_object() -> String {
    "Campfire".to_owned()
}

fn default_leftover_foods() -> Vec<ItemName> {
    ["Pizza", "Pink Cake", "Chocolate Cake", "Blackberry Cobbler", "Cookies"]
        .into_iter()
        .map(ItemName::from)
        .collect()
}

fn default_slice_suffixes() -> Vec<String> {
    vec!["cake".to_owned(), "pizza".to_owned(), "cobbler".to_owned()]
}

fn default_lottery_item() -> ItemName {
    ItemName::from("Kebab")
}

fn default_egg_item() -> ItemName {
    ItemName::from("Chocolate Egg")
}

fn default_egg_basket_item() -> ItemName {
    ItemName::from("Egg Basket")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use larder_types::TilePos;

    use super::*;

    #[test]
    fn empty_yaml_is_default_config() {
        let config = LarderConfig::parse("{}");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert_eq!(config, LarderConfig::default());
        assert!(config.features.food_heals_over_time);
        assert_eq!(config.stations.landmark.tile, TilePos::new(16, 16));
        assert_eq!(config.items.lottery_item.as_str(), "Kebab");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r#"
features:
  cooking_skill: false
  debug_mode: true
stations:
  use_range: 4
  landmark:
    location: "Tavern"
    tile: { x: 3, y: 7 }
leftovers:
  foods: ["Quiche"]
items:
  lottery_item: "Skewer"
tuning:
  rate:
    drink_rate: 0.25
  lottery:
    bonus_duration_minutes: 60
logging:
  level: "debug"
"#;
        let config = LarderConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert!(!config.features.cooking_skill);
        assert!(config.features.food_heals_over_time);
        assert!(config.features.debug_mode);
        assert_eq!(config.stations.use_range, 4);
        assert_eq!(config.stations.landmark.location, "Tavern");
        assert_eq!(config.stations.campfire_object, "Campfire");
        assert_eq!(config.leftovers.foods, vec![ItemName::from("Quiche")]);
        assert_eq!(config.items.lottery_item.as_str(), "Skewer");
        assert_eq!(config.items.egg_item.as_str(), "Chocolate Egg");
        assert!((config.tuning.rate.drink_rate - 0.25).abs() < f64::EPSILON);
        assert!((config.tuning.rate.food_rate - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.tuning.lottery.bonus_duration_minutes, 60);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_yaml_is_a_yaml_error() {
        let config = LarderConfig::parse("features: [not, a, map");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn unusable_tuning_is_rejected() {
        let yaml = "tuning:\n  lottery:\n    worst_below: 0.5\n";
        let config = LarderConfig::parse(yaml);
        assert!(matches!(config, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let config = LarderConfig::from_file(Path::new("/nonexistent/larder-config.yaml"));
        assert!(matches!(config, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn leftovers_are_slices_or_halves() {
        let leftovers = LeftoverConfig::default();
        assert_eq!(
            leftovers.leftover_for(&ItemName::from("Pink Cake")),
            Some(ItemName::from("Pink Cake Slice"))
        );
        assert_eq!(
            leftovers.leftover_for(&ItemName::from("Cookies")),
            Some(ItemName::from("Cookies Half"))
        );
        assert_eq!(leftovers.leftover_for(&ItemName::from("Salad")), None);
    }

    #[test]
    fn egg_gifts_are_recognised() {
        let items = ItemConfig::default();
        assert!(items.is_egg_gift(&ItemName::from("Egg Basket")));
        assert!(items.is_egg_gift(&ItemName::from("Chocolate Egg")));
        assert!(!items.is_egg_gift(&ItemName::from("Egg")));
    }
}
