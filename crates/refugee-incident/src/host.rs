//! Host collaborator traits.
//!
//! The incident never reaches into the simulation directly. Pathfinding,
//! character generation, localization, world mutation, presentation and
//! the incident queue are all supplied by the host through these traits.

use incident_events::{
    Area, AreaId, Cell, CharacterDescriptor, CharacterId, CharacterKind, Faction, FactionId,
    IncidentCategory, IncidentKind, IncidentParms,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::dialog::DialogSession;

/// Answers whether a cell can be pathed to from the player's territory.
pub trait Reachability {
    fn can_reach_colony(&self, area: &Area, cell: Cell) -> bool;
}

/// Samples edge cells of an area.
pub trait EdgeCellFinder {
    /// Returns an edge cell satisfying `predicate`, preferring road-adjacent
    /// cells with probability `road_chance`. `None` once the host's search
    /// budget is spent.
    fn find_edge_cell(
        &self,
        area: &Area,
        road_chance: f32,
        predicate: &dyn Fn(Cell) -> bool,
        rng: &mut dyn RngCore,
    ) -> Option<Cell>;
}

/// Context a character is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationContext {
    NonPlayer,
}

/// Request handed to the host's character generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: CharacterKind,
    /// Faction the character originates from
    pub faction: Option<FactionId>,
    pub context: GenerationContext,
    /// Weight for generating extra relations to current colonists
    pub relation_with_colonist_weight: f32,
    pub must_be_capable_of_violence: bool,
    pub can_generate_family_relations: bool,
}

impl GenerationRequest {
    /// A non-player request with default generation flags.
    pub fn non_player(kind: CharacterKind, faction: Option<FactionId>) -> Self {
        Self {
            kind,
            faction,
            context: GenerationContext::NonPlayer,
            relation_with_colonist_weight: 0.0,
            must_be_capable_of_violence: false,
            can_generate_family_relations: true,
        }
    }
}

pub trait CharacterGenerator {
    fn generate(&mut self, request: &GenerationRequest) -> CharacterDescriptor;
}

/// Read access to the faction registry.
pub trait FactionDirectory {
    fn all_factions(&self) -> &[Faction];
    fn player_faction(&self) -> &FactionId;
    /// Faction refugees originate from, if the host has one.
    fn spacer_faction(&self) -> Option<&FactionId>;
}

/// String-table lookup with argument substitution.
pub trait Localizer {
    /// Resolves `key` and substitutes `args` in order.
    fn translate(&self, key: &str, args: &[String]) -> String;
    /// Applies pronoun and phrasing adjustments for `character`.
    fn adjusted_for(&self, text: &str, character: &CharacterDescriptor) -> String;
    /// Describes how `character` is related to current colonists. Empty when unrelated.
    fn relations_with_colonists(&self, character: &CharacterDescriptor) -> String;
}

pub trait WorldMutator {
    fn spawn(&mut self, character: CharacterDescriptor, area: &AreaId, cell: Cell);
    fn set_faction(&mut self, character: &CharacterId, faction: &FactionId);
    /// Returns an unspawned character to the abstract population pool.
    fn release(&mut self, character: CharacterDescriptor);
}

pub trait CameraDriver {
    fn jump_to(&mut self, area: &AreaId, cell: Cell);
}

/// Shows a dialog to the player. Option choices come back later through
/// [`DialogSession::choose`].
pub trait Presentation {
    fn present(&mut self, session: DialogSession, title: String);
}

/// The host's shared, time-ordered incident queue.
pub trait IncidentQueue {
    fn current_tick(&self) -> u64;
    fn enqueue(&mut self, kind: IncidentKind, parms: IncidentParms, fire_tick: u64);
}

pub trait Storyteller {
    /// Parameters the storyteller would use for `category` right now.
    fn default_parms_now(&self, category: IncidentCategory, target: &AreaId) -> IncidentParms;
}

/// Everything an incident worker needs from the host.
pub trait IncidentHost:
    Reachability
    + EdgeCellFinder
    + CharacterGenerator
    + FactionDirectory
    + Localizer
    + WorldMutator
    + CameraDriver
    + Presentation
    + IncidentQueue
    + Storyteller
{
}

impl<T> IncidentHost for T where
    T: Reachability
        + EdgeCellFinder
        + CharacterGenerator
        + FactionDirectory
        + Localizer
        + WorldMutator
        + CameraDriver
        + Presentation
        + IncidentQueue
        + Storyteller
        + ?Sized
{
}

/// What dialog commands may touch when they run.
pub trait CommandHost:
    WorldMutator + CameraDriver + IncidentQueue + Storyteller + FactionDirectory
{
}

impl<T> CommandHost for T where
    T: WorldMutator + CameraDriver + IncidentQueue + Storyteller + FactionDirectory + ?Sized
{
}
