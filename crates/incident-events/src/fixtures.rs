//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // incident-events = { path = "../incident-events", features = ["test-fixtures"] }
//!
//! use incident_events::fixtures;
//!
//! let factions = fixtures::sample_factions();
//! let refugee = fixtures::bounty_hunter();
//! ```

use crate::{Area, CharacterDescriptor, Cell, Faction, FactionId};

/// Returns sample factions from the fixtures file.
///
/// Contains 6 factions:
/// - the player faction
/// - a hidden spacer faction (refugee origin)
/// - 2 visible factions hostile to the player (pirates, tribe)
/// - 1 hidden faction hostile to the player (mechanoids)
/// - 1 visible neutral faction (traders)
pub fn sample_factions() -> Vec<Faction> {
    let json = include_str!("../tests/fixtures/sample_factions.json");
    serde_json::from_str(json).expect("Failed to parse sample_factions.json")
}

/// Returns sample characters from the fixtures file.
pub fn sample_characters() -> Vec<CharacterDescriptor> {
    let json = include_str!("../tests/fixtures/sample_characters.json");
    serde_json::from_str(json).expect("Failed to parse sample_characters.json")
}

/// ID of the player faction in the samples.
pub fn player_faction_id() -> FactionId {
    FactionId::from("player")
}

/// Returns a specific faction by ID from the samples.
pub fn get_faction(faction_id: &str) -> Option<Faction> {
    sample_factions()
        .into_iter()
        .find(|f| f.id.0 == faction_id)
}

/// The refugee with disabled work, traits and mixed passions.
pub fn bounty_hunter() -> CharacterDescriptor {
    sample_characters()
        .into_iter()
        .find(|c| c.id.0 == "chr_000001")
        .expect("bounty hunter fixture missing")
}

/// The refugee with no disabled work and no passions.
pub fn medical_officer() -> CharacterDescriptor {
    sample_characters()
        .into_iter()
        .find(|c| c.id.0 == "chr_000002")
        .expect("medical officer fixture missing")
}

/// A 12x12 area with a road entering from the south edge.
pub fn sample_area() -> Area {
    Area::new("riverside", "Riverside", 12, 12)
        .with_roads((0..4).map(|z| Cell::new(6, z)))
}
