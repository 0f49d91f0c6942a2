//! Shared data types for scripted incidents.
//!
//! This crate contains pure data structures with no incident logic.
//! It is a dependency for all other crates in the workspace.

pub mod area;
pub mod character;
pub mod faction;
pub mod incident;
pub mod queue;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export area types
pub use area::{Area, AreaId, Cell};

// Re-export character types
pub use character::{
    generate_character_id, CharacterDescriptor, CharacterId, CharacterKind, CharacterName, Gender,
    Passion, SkillRecord, WorkTag,
};

// Re-export faction types
pub use faction::{Faction, FactionId};

// Re-export incident types
pub use incident::{
    generate_incident_id, ArrivalMode, IncidentCategory, IncidentKind, IncidentParms,
    QueuedIncident, RaidStrategy,
};

pub use queue::TimedIncidentQueue;
