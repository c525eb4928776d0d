//! Shared type definitions for the Larder vitals engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the host simulation and the engine: player vitals, consumption and gift
//! events, buff descriptors, and the small amount of save data the engine
//! reads.
//!
//! # Modules
//!
//! - [`ids`] -- String-keyed identifier wrappers (NPCs, items, buff sources)
//! - [`enums`] -- Enumeration types (item kinds, buff stats, professions, lottery bands)
//! - [`structs`] -- Core structs (vitals, skills, events, buffs, save data)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{BuffQuality, BuffStat, ItemKind, LocationKind, LotteryBand, Profession};
pub use ids::{BuffSource, ItemName, NpcId};
pub use structs::{
    BuffDescriptor, ConsumptionEvent, Friendship, GiftDialoguePatch, GiftEvent, PlayerVitals,
    SaveData, SkillLevels, TilePos,
};
