//! In-memory host.
//!
//! Implements every host trait over plain collections so the incident can
//! run without a simulation: reachability is a flood fill around walls,
//! the generator hands out scenario characters in order, and every world
//! mutation is recorded for inspection.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::path::Path;

use incident_events::{
    generate_character_id, generate_incident_id, Area, AreaId, Cell, CharacterDescriptor,
    CharacterId, CharacterName, Faction, FactionId, Gender, IncidentCategory, IncidentKind,
    IncidentParms, QueuedIncident, TimedIncidentQueue, WorkTag,
};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialog::DialogSession;
use crate::host::{
    CameraDriver, CharacterGenerator, EdgeCellFinder, FactionDirectory, GenerationRequest,
    IncidentQueue, Localizer, Presentation, Reachability, Storyteller, WorldMutator,
};
use crate::keys;

/// Key/value string table with `{0}`, `{1}`, ... argument placeholders.
///
/// Unknown keys translate to themselves. Pronoun placeholders (`{Pronoun}`,
/// `{pronoun}`, `{possessive}`, `{objective}`) are filled by
/// [`Localizer::adjusted_for`].
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: HashMap<String, String>,
    /// Relation sentences keyed by character
    relations: HashMap<CharacterId, String>,
}

impl StringTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// English strings for every key the incident uses.
    pub fn english() -> Self {
        let mut table = Self::empty();
        table.insert(
            keys::INITIAL,
            "{0}, a {1} from another world, is being chased by {2} from {3}. \
             {Pronoun} begs you to take {objective} in.\n\n\
             {0} is {4} years old. If you help, {3} will come for {objective} with a raiding party.",
        );
        table.insert(keys::ACCEPT, "Accept");
        table.insert(keys::REJECT, "Reject");
        table.insert(
            keys::REJECTED,
            "You turn {0} away. The pursuers drag {0} off into the wilds.",
        );
        table.insert(keys::TITLE, "Refugee chased near {0}");
        table.insert(keys::OK, "OK");
        table.insert(keys::INCAPABLE_OF, "Incapable of");
        table.insert(keys::TRAITS, "Traits");
        table.insert(keys::NONE_LOWER, "none");
        for tag in WorkTag::all() {
            table.insert(tag.label_key(), tag.default_label());
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn set_relations(&mut self, character: &CharacterId, text: impl Into<String>) {
        self.relations.insert(character.clone(), text.into());
    }
}

fn pronouns(gender: Gender) -> (&'static str, &'static str, &'static str) {
    match gender {
        Gender::Female => ("she", "her", "her"),
        Gender::Male => ("he", "his", "him"),
        Gender::None => ("they", "their", "them"),
    }
}

impl Localizer for StringTable {
    fn translate(&self, key: &str, args: &[String]) -> String {
        let mut text = self
            .entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string());
        for (i, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", i), arg);
        }
        text
    }

    fn adjusted_for(&self, text: &str, character: &CharacterDescriptor) -> String {
        let (pronoun, possessive, objective) = pronouns(character.gender);
        let mut capitalized = pronoun.to_string();
        if let Some(first) = capitalized.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        text.replace("{Pronoun}", &capitalized)
            .replace("{pronoun}", pronoun)
            .replace("{possessive}", possessive)
            .replace("{objective}", objective)
    }

    fn relations_with_colonists(&self, character: &CharacterDescriptor) -> String {
        self.relations.get(&character.id).cloned().unwrap_or_default()
    }
}

/// A dialog the sandbox was asked to show.
#[derive(Debug)]
pub struct PresentedDialog {
    pub title: String,
    pub session: DialogSession,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

fn default_base_raid_points() -> f32 {
    100.0
}

/// Everything needed to set up a [`SandboxHost`], loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxScenario {
    pub area: Area,
    /// Cell every path must reach to count as colony-reachable
    pub home: Cell,
    #[serde(default)]
    pub walls: Vec<Cell>,
    pub player_faction: FactionId,
    #[serde(default)]
    pub spacer_faction: Option<FactionId>,
    pub factions: Vec<Faction>,
    /// Handed out by the generator in order
    #[serde(default)]
    pub characters: Vec<CharacterDescriptor>,
    /// Relation sentences keyed by character ID
    #[serde(default)]
    pub relations: BTreeMap<String, String>,
    #[serde(default)]
    pub start_tick: u64,
    #[serde(default = "default_base_raid_points")]
    pub base_raid_points: f32,
    /// String overrides on top of the English table
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
}

impl SandboxScenario {
    /// The bundled "Riverside" scenario.
    pub fn sample() -> Self {
        Self::from_json(include_str!("../scenarios/riverside.json"))
            .expect("bundled scenario should always parse")
    }

    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if !self.area.contains(self.home) {
            return Err(ScenarioError::Invalid(format!(
                "home {} lies outside {}",
                self.home, self.area.id
            )));
        }
        if !self.factions.iter().any(|f| f.id == self.player_faction) {
            return Err(ScenarioError::Invalid(format!(
                "player faction {} is not listed",
                self.player_faction
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct SandboxHost {
    area: Area,
    home: Cell,
    walls: BTreeSet<Cell>,
    factions: Vec<Faction>,
    player: FactionId,
    spacer: Option<FactionId>,
    pool: VecDeque<CharacterDescriptor>,
    strings: StringTable,
    tick: u64,
    base_raid_points: f32,
    queue: TimedIncidentQueue,
    next_incident: u64,
    next_character: u64,
    requests: Vec<GenerationRequest>,
    spawned: Vec<(CharacterDescriptor, Cell)>,
    faction_changes: HashMap<CharacterId, FactionId>,
    released: Vec<CharacterDescriptor>,
    camera: Vec<Cell>,
    presented: VecDeque<PresentedDialog>,
}

impl SandboxHost {
    pub fn from_scenario(scenario: SandboxScenario) -> Self {
        let mut strings = StringTable::english();
        for (key, value) in scenario.strings {
            strings.insert(key, value);
        }
        for (id, text) in scenario.relations {
            strings.set_relations(&CharacterId(id), text);
        }

        Self {
            next_character: scenario.characters.len() as u64 + 1,
            area: scenario.area,
            home: scenario.home,
            walls: scenario.walls.into_iter().collect(),
            factions: scenario.factions,
            player: scenario.player_faction,
            spacer: scenario.spacer_faction,
            pool: scenario.characters.into(),
            strings,
            tick: scenario.start_tick,
            base_raid_points: scenario.base_raid_points,
            queue: TimedIncidentQueue::new(),
            next_incident: 1,
            requests: Vec::new(),
            spawned: Vec::new(),
            faction_changes: HashMap::new(),
            released: Vec::new(),
            camera: Vec::new(),
            presented: VecDeque::new(),
        }
    }

    /// Host built from the bundled scenario.
    pub fn sample() -> Self {
        Self::from_scenario(SandboxScenario::sample())
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    /// Moves the clock forward and returns the incidents that came due.
    pub fn advance(&mut self, ticks: u64) -> Vec<QueuedIncident> {
        self.tick = self.tick.saturating_add(ticks);
        self.queue.pop_due(self.tick)
    }

    pub fn set_base_raid_points(&mut self, points: f32) {
        self.base_raid_points = points;
    }

    pub fn set_factions(&mut self, factions: Vec<Faction>) {
        self.factions = factions;
    }

    pub fn add_wall(&mut self, cell: Cell) {
        self.walls.insert(cell);
    }

    /// Makes every edge cell impassable.
    pub fn wall_off_edges(&mut self) {
        let edges = self.area.edge_cells();
        self.walls.extend(edges);
    }

    pub fn queue(&self) -> &TimedIncidentQueue {
        &self.queue
    }

    pub fn generation_requests(&self) -> &[GenerationRequest] {
        &self.requests
    }

    pub fn spawned(&self) -> &[(CharacterDescriptor, Cell)] {
        &self.spawned
    }

    pub fn faction_of(&self, character: &CharacterId) -> Option<&FactionId> {
        self.faction_changes.get(character)
    }

    pub fn released(&self) -> &[CharacterDescriptor] {
        &self.released
    }

    pub fn camera_jumps(&self) -> &[Cell] {
        &self.camera
    }

    /// Removes the oldest presented dialog.
    pub fn take_presented(&mut self) -> Option<PresentedDialog> {
        self.presented.pop_front()
    }

    fn passable(&self, cell: Cell) -> bool {
        self.area.contains(cell) && !self.walls.contains(&cell)
    }
}

impl Reachability for SandboxHost {
    fn can_reach_colony(&self, area: &Area, cell: Cell) -> bool {
        if area.id != self.area.id || !self.passable(cell) || !self.passable(self.home) {
            return false;
        }

        let mut seen = BTreeSet::from([cell]);
        let mut frontier = VecDeque::from([cell]);
        while let Some(current) = frontier.pop_front() {
            if current == self.home {
                return true;
            }
            for next in current.neighbours() {
                if self.passable(next) && seen.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
        false
    }
}

impl EdgeCellFinder for SandboxHost {
    fn find_edge_cell(
        &self,
        area: &Area,
        road_chance: f32,
        predicate: &dyn Fn(Cell) -> bool,
        rng: &mut dyn RngCore,
    ) -> Option<Cell> {
        let mut edges = area.edge_cells();
        edges.shuffle(rng);

        let (mut road, other): (Vec<Cell>, Vec<Cell>) =
            edges.into_iter().partition(|c| area.is_road_adjacent(*c));
        let prefer_road = !road.is_empty() && rng.gen_bool(f64::from(road_chance.clamp(0.0, 1.0)));

        let ordered: Vec<Cell> = if prefer_road {
            road.extend(other);
            road
        } else {
            let mut all = other;
            all.extend(road);
            all.shuffle(rng);
            all
        };
        ordered.into_iter().find(|c| predicate(*c))
    }
}

impl CharacterGenerator for SandboxHost {
    fn generate(&mut self, request: &GenerationRequest) -> CharacterDescriptor {
        self.requests.push(request.clone());

        let mut character = self.pool.pop_front().unwrap_or_else(|| {
            let sequence = self.next_character;
            self.next_character += 1;
            CharacterDescriptor::new(
                generate_character_id(sequence),
                request.kind.clone(),
                CharacterName::new(format!("Wanderer {}", sequence), format!("Wanderer{}", sequence)),
                "Drifter",
                30,
            )
        });
        character.kind = request.kind.clone();
        character
    }
}

impl FactionDirectory for SandboxHost {
    fn all_factions(&self) -> &[Faction] {
        &self.factions
    }

    fn player_faction(&self) -> &FactionId {
        &self.player
    }

    fn spacer_faction(&self) -> Option<&FactionId> {
        self.spacer.as_ref()
    }
}

impl Localizer for SandboxHost {
    fn translate(&self, key: &str, args: &[String]) -> String {
        self.strings.translate(key, args)
    }

    fn adjusted_for(&self, text: &str, character: &CharacterDescriptor) -> String {
        self.strings.adjusted_for(text, character)
    }

    fn relations_with_colonists(&self, character: &CharacterDescriptor) -> String {
        self.strings.relations_with_colonists(character)
    }
}

impl WorldMutator for SandboxHost {
    fn spawn(&mut self, character: CharacterDescriptor, _area: &AreaId, cell: Cell) {
        self.spawned.push((character, cell));
    }

    fn set_faction(&mut self, character: &CharacterId, faction: &FactionId) {
        self.faction_changes.insert(character.clone(), faction.clone());
    }

    fn release(&mut self, character: CharacterDescriptor) {
        self.released.push(character);
    }
}

impl CameraDriver for SandboxHost {
    fn jump_to(&mut self, _area: &AreaId, cell: Cell) {
        self.camera.push(cell);
    }
}

impl Presentation for SandboxHost {
    fn present(&mut self, session: DialogSession, title: String) {
        self.presented.push_back(PresentedDialog { title, session });
    }
}

impl IncidentQueue for SandboxHost {
    fn current_tick(&self) -> u64 {
        self.tick
    }

    fn enqueue(&mut self, kind: IncidentKind, parms: IncidentParms, fire_tick: u64) {
        let id = generate_incident_id(self.next_incident);
        self.next_incident += 1;
        self.queue.push(QueuedIncident::new(id, kind, parms, fire_tick));
    }
}

impl Storyteller for SandboxHost {
    fn default_parms_now(&self, category: IncidentCategory, target: &AreaId) -> IncidentParms {
        IncidentParms::new(target.clone(), category, self.base_raid_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_events::fixtures;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_scenario_loads() {
        let host = SandboxHost::sample();

        assert_eq!(host.area().label, "Riverside");
        assert_eq!(host.tick(), 60_000);
        assert_eq!(host.player_faction(), &FactionId::from("player"));
        assert_eq!(host.spacer_faction(), Some(&FactionId::from("spacer")));
    }

    #[test]
    fn test_translate_substitutes_args() {
        let strings = StringTable::english();
        assert_eq!(
            strings.translate(keys::TITLE, &["Riverside".to_string()]),
            "Refugee chased near Riverside"
        );
        assert_eq!(strings.translate("Missing_Key", &[]), "Missing_Key");
    }

    #[test]
    fn test_adjusted_for_pronouns() {
        let strings = StringTable::english();
        let mut character = fixtures::bounty_hunter();

        let text = "{Pronoun} asked us to take {objective} in with {possessive} gear.";
        assert_eq!(
            strings.adjusted_for(text, &character),
            "She asked us to take her in with her gear."
        );

        character.gender = Gender::Male;
        assert_eq!(
            strings.adjusted_for(text, &character),
            "He asked us to take him in with his gear."
        );
    }

    #[test]
    fn test_reachability_blocked_by_walls() {
        let mut host = SandboxHost::sample();
        let area = host.area().clone();
        assert!(host.can_reach_colony(&area, Cell::new(0, 0)));

        // Seal the corner off
        host.add_wall(Cell::new(1, 0));
        host.add_wall(Cell::new(0, 1));
        assert!(!host.can_reach_colony(&area, Cell::new(0, 0)));
        assert!(!host.can_reach_colony(&area, Cell::new(1, 0)));
    }

    #[test]
    fn test_other_area_unreachable() {
        let host = SandboxHost::sample();
        let elsewhere = Area::new("elsewhere", "Elsewhere", 12, 12);

        assert!(!host.can_reach_colony(&elsewhere, Cell::new(0, 0)));
    }

    #[test]
    fn test_edge_finder_prefers_roads() {
        let host = SandboxHost::sample();
        let area = host.area().clone();
        let any = |_c: Cell| true;

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let cell = host.find_edge_cell(&area, 1.0, &any, &mut rng).unwrap();
            assert!(area.is_road_adjacent(cell));
        }
    }

    #[test]
    fn test_edge_finder_respects_predicate() {
        let host = SandboxHost::sample();
        let area = host.area().clone();
        let only = |c: Cell| c == Cell::new(11, 4);
        let mut rng = SmallRng::seed_from_u64(3);

        assert_eq!(
            host.find_edge_cell(&area, 0.75, &only, &mut rng),
            Some(Cell::new(11, 4))
        );
        assert_eq!(host.find_edge_cell(&area, 0.75, &|_| false, &mut rng), None);
    }

    #[test]
    fn test_generator_drains_pool_then_fabricates() {
        let mut host = SandboxHost::sample();
        let request = GenerationRequest::non_player("space_refugee".into(), None);

        let first = host.generate(&request);
        let second = host.generate(&request);

        assert_eq!(first.id, CharacterId::from("chr_000001"));
        assert_eq!(second.id, CharacterId::from("chr_000002"));
        assert_eq!(second.name.full, "Wanderer 2");
        assert_eq!(host.generation_requests().len(), 2);
    }

    #[test]
    fn test_advance_pops_due_incidents() {
        let mut host = SandboxHost::sample();
        let parms = host.default_parms_now(IncidentCategory::ThreatBig, &"riverside".into());
        host.enqueue(IncidentKind::RaidEnemy, parms, 61_000);

        assert!(host.advance(999).is_empty());
        let due = host.advance(1);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].incident_id, "inc_000001");
        assert!(host.queue().is_empty());
    }

    #[test]
    fn test_scenario_rejects_unknown_player_faction() {
        let json = r#"{
            "area": {"id": "a", "label": "A", "width": 3, "height": 3},
            "home": {"x": 1, "z": 1},
            "player_faction": "ghost",
            "factions": []
        }"#;

        assert!(matches!(
            SandboxScenario::from_json(json),
            Err(ScenarioError::Invalid(_))
        ));
    }

    #[test]
    fn test_scenario_rejects_home_outside_area() {
        let json = r#"{
            "area": {"id": "a", "label": "A", "width": 3, "height": 3},
            "home": {"x": 5, "z": 1},
            "player_faction": "player",
            "factions": [{"id": "player", "name": "Us", "pawns_plural": "colonists"}]
        }"#;

        assert!(SandboxScenario::from_json(json).is_err());
    }
}
