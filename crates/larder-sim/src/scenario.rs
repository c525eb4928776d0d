//! Scenario file for the headless harness.
//!
//! A scenario is a JSON document describing the player and a single item
//! to eat. Every field is optional.
//!
//! ```json
//! {
//!   "vitals": { "health": 30, "max_health": 100, "stamina": 80.0, "max_stamina": 270.0 },
//!   "skills": { "combat": 4, "cooking": 2, "foraging": 6 },
//!   "professions": ["restoration"],
//!   "item": { "item": "Kebab", "display_name": "Kebab", "kind": "food",
//!             "health_recovery": 40, "stamina_recovery": 90, "quality": 1 },
//!   "ticks": 200000,
//!   "seed": 7,
//!   "tired": false
//! }
//! ```

use std::path::Path;

use larder_types::{
    BuffDescriptor, ConsumptionEvent, ItemKind, ItemName, PlayerVitals, Profession, SkillLevels,
};
use serde::Deserialize;

use crate::error::SimError;

/// One consumption scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Starting vitals.
    pub vitals: PlayerVitals,
    /// Skill levels.
    pub skills: SkillLevels,
    /// Professions held.
    pub professions: Vec<Profession>,
    /// The item eaten on tick 0.
    pub item: ConsumptionEvent,
    /// The buff the host grants for the item, if any.
    pub item_buff: Option<BuffDescriptor>,
    /// Tick budget.
    pub ticks: u64,
    /// Seed for the lottery draw.
    pub seed: u64,
    /// Start exhausted: vitals at a tenth of their maxima.
    pub tired: bool,
    /// Buff time that passes per tick.
    pub ms_per_tick: u32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            vitals: PlayerVitals::new(50, 100, 135.0, 270.0),
            skills: SkillLevels::default(),
            professions: Vec::new(),
            item: ConsumptionEvent {
                item: ItemName::from("Kebab"),
                display_name: "Kebab".to_owned(),
                kind: ItemKind::Food,
                health_recovery: 20,
                stamina_recovery: 45,
                quality: 0,
            },
            item_buff: None,
            ticks: 200_000,
            seed: 42,
            tired: false,
            ms_per_tick: 16,
        }
    }
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SimError::ScenarioIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SimError::ScenarioJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Starting vitals, clamped to their maxima, after applying `tired`.
    pub fn starting_vitals(&self) -> PlayerVitals {
        let mut vitals = self.vitals;
        vitals.clamp();
        if self.tired {
            vitals.set(
                vitals.max_health.checked_div(10).unwrap_or(0),
                vitals.max_stamina / 10.0,
            );
        }
        vitals
    }
}
