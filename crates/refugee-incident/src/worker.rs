//! Incident workers and the registry the host fires them through.

use std::collections::HashMap;

use incident_events::{Area, CharacterKind, IncidentKind};
use rand::RngCore;
use thiserror::Error;

use crate::composer::TextComposer;
use crate::config::{ConfigError, IncidentConfig};
use crate::dialog::{DialogSession, DialogTreeBuilder};
use crate::host::IncidentHost;
use crate::keys;
use crate::locator::SpawnLocator;
use crate::scheduler::DelayedEventScheduler;
use crate::selector::CandidateSelector;

/// Why an incident did not trigger this time. The host may retry later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IncidentAbort {
    #[error("no colony-reachable edge cell")]
    NoReachableSpawn,
    #[error("no visible faction is hostile to the player")]
    NoHostileFaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no worker registered for {0}")]
    UnknownIncident(IncidentKind),
    #[error("{0} aborted: {1}")]
    Aborted(IncidentKind, IncidentAbort),
}

/// Handler for one incident kind.
pub trait IncidentWorker: Send + Sync {
    fn kind(&self) -> IncidentKind;

    fn try_execute(
        &self,
        area: &Area,
        host: &mut dyn IncidentHost,
        rng: &mut dyn RngCore,
    ) -> Result<(), IncidentAbort>;
}

/// A fleeing refugee asks for help; helping them brings a raid.
#[derive(Debug, Clone)]
pub struct RefugeeChasedWorker {
    kind: CharacterKind,
    locator: SpawnLocator,
    selector: CandidateSelector,
    composer: TextComposer,
    builder: DialogTreeBuilder,
}

impl RefugeeChasedWorker {
    /// Builds the worker from `config`, rejecting settings that fail validation.
    pub fn new(config: &IncidentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = DelayedEventScheduler::new(config.raid.delay)?;
        Ok(Self::assemble(config, scheduler))
    }

    pub fn with_defaults() -> Self {
        Self::assemble(&IncidentConfig::default(), DelayedEventScheduler::default())
    }

    fn assemble(config: &IncidentConfig, scheduler: DelayedEventScheduler) -> Self {
        Self {
            kind: CharacterKind(config.refugee.kind.clone()),
            locator: SpawnLocator::new(config.refugee.edge_road_chance),
            selector: CandidateSelector::new(config.refugee.relation_with_colonist_weight),
            composer: TextComposer::new(config.text.title_size),
            builder: DialogTreeBuilder::new(config.raid.points_factor, scheduler),
        }
    }
}

impl Default for RefugeeChasedWorker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl IncidentWorker for RefugeeChasedWorker {
    fn kind(&self) -> IncidentKind {
        IncidentKind::RefugeeChased
    }

    /// Runs the whole workflow up to presenting the dialog:
    /// 1. Find a reachable edge cell
    /// 2. Pick the pursuing faction
    /// 3. Generate the refugee
    /// 4. Compose the text and build the tree
    /// 5. Hand the dialog to the host
    fn try_execute(
        &self,
        area: &Area,
        host: &mut dyn IncidentHost,
        rng: &mut dyn RngCore,
    ) -> Result<(), IncidentAbort> {
        let spawn = self.locator.find(area, &*host, rng).ok_or_else(|| {
            tracing::info!("Refugee incident skipped in {}: no reachable edge cell", area.id);
            IncidentAbort::NoReachableSpawn
        })?;

        // Picked before generation so an aborted run never creates a character.
        let enemy = self
            .selector
            .select_hostile_faction(host.all_factions(), host.player_faction(), rng)
            .cloned()
            .ok_or_else(|| {
                tracing::info!("Refugee incident skipped in {}: no hostile faction", area.id);
                IncidentAbort::NoHostileFaction
            })?;

        let origin = host.spacer_faction().cloned();
        let character = self
            .selector
            .generate_character(&mut *host, self.kind.clone(), origin);

        let text = self.composer.compose(&character, &enemy, &*host);
        let title = host.translate(keys::TITLE, &[area.label.clone()]);
        tracing::debug!(
            "Presenting {} chased by {} at {}",
            character.id,
            enemy.id,
            spawn.cell()
        );
        let tree = self
            .builder
            .build(text, character, spawn, &enemy, &area.id, &*host);

        host.present(DialogSession::new(tree), title);
        Ok(())
    }
}

/// Maps incident kinds to their workers.
#[derive(Default)]
pub struct IncidentRegistry {
    workers: HashMap<IncidentKind, Box<dyn IncidentWorker>>,
}

impl IncidentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the refugee worker installed.
    pub fn with_refugee_worker(config: &IncidentConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(RefugeeChasedWorker::new(config)?);
        Ok(registry)
    }

    /// Installs `worker` for its kind, returning any worker it replaces.
    pub fn register(
        &mut self,
        worker: impl IncidentWorker + 'static,
    ) -> Option<Box<dyn IncidentWorker>> {
        self.workers.insert(worker.kind(), Box::new(worker))
    }

    pub fn is_registered(&self, kind: IncidentKind) -> bool {
        self.workers.contains_key(&kind)
    }

    pub fn fire(
        &self,
        kind: IncidentKind,
        area: &Area,
        host: &mut dyn IncidentHost,
        rng: &mut dyn RngCore,
    ) -> Result<(), RegistryError> {
        let worker = self
            .workers
            .get(&kind)
            .ok_or(RegistryError::UnknownIncident(kind))?;
        worker
            .try_execute(area, host, rng)
            .map_err(|abort| RegistryError::Aborted(kind, abort))
    }
}

impl std::fmt::Debug for IncidentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncidentRegistry")
            .field("kinds", &self.workers.keys().collect::<Vec<_>>())
            .finish()
    }
}
