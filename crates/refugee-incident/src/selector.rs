//! Refugee and pursuer selection.

use incident_events::{CharacterDescriptor, CharacterKind, Faction, FactionId};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::host::{CharacterGenerator, GenerationRequest};

/// Picks the refugee and the faction chasing them.
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    relation_with_colonist_weight: f32,
}

impl CandidateSelector {
    pub fn new(relation_with_colonist_weight: f32) -> Self {
        Self {
            relation_with_colonist_weight,
        }
    }

    /// Generates a non-player character and marks it as seen by the player.
    pub fn generate_character<G: CharacterGenerator + ?Sized>(
        &self,
        generator: &mut G,
        kind: CharacterKind,
        origin: Option<FactionId>,
    ) -> CharacterDescriptor {
        let mut request = GenerationRequest::non_player(kind, origin);
        request.relation_with_colonist_weight = self.relation_with_colonist_weight;

        let mut character = generator.generate(&request);
        character.ever_seen_by_player = true;
        character
    }

    /// Uniformly picks a visible faction hostile to `player`.
    pub fn select_hostile_faction<'a>(
        &self,
        factions: &'a [Faction],
        player: &FactionId,
        rng: &mut dyn RngCore,
    ) -> Option<&'a Faction> {
        let hostile: Vec<&Faction> = factions
            .iter()
            .filter(|f| !f.hidden && f.is_hostile_to(player))
            .collect();

        let chosen = hostile.choose(rng).copied();
        match chosen {
            Some(faction) => tracing::debug!(
                "Chose {} out of {} hostile factions",
                faction.id,
                hostile.len()
            ),
            None => tracing::info!("No visible faction is hostile to {}", player),
        }
        chosen
    }
}
