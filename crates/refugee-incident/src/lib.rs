//! The "refugee chased" incident.
//!
//! A fleeing character appears at the edge of the player's area and asks for
//! help. Accepting takes them in and brings a raid from their pursuers a while
//! later; rejecting sends them away.
//!
//! # Architecture
//!
//! ```text
//! IncidentRegistry ──▶ RefugeeChasedWorker
//!                        ├─ SpawnLocator        (reachable edge cell)
//!                        ├─ CandidateSelector   (refugee + hostile faction)
//!                        ├─ TextComposer        (narrative text)
//!                        └─ DialogTreeBuilder   (accept / reject)
//!                                 │
//!                   host presents DialogSession, player chooses
//!                                 │
//!              AcceptRefugee ──▶ DelayedEventScheduler ──▶ host incident queue
//! ```
//!
//! # Modules
//!
//! - [`host`]: Traits the host simulation implements
//! - [`locator`], [`selector`], [`composer`], [`dialog`], [`scheduler`]: Workflow steps
//! - [`commands`]: Accept / reject option commands
//! - [`worker`]: The workflow itself and the incident registry
//! - [`config`]: TOML configuration
//! - [`sandbox`]: In-memory host for tests and the CLI

pub mod commands;
pub mod composer;
pub mod config;
pub mod dialog;
pub mod host;
pub mod locator;
pub mod sandbox;
pub mod scheduler;
pub mod selector;
pub mod worker;

/// Localization keys used by the incident.
pub mod keys {
    pub const INITIAL: &str = "RefugeeChasedInitial";
    pub const ACCEPT: &str = "RefugeeChasedInitial_Accept";
    pub const REJECT: &str = "RefugeeChasedInitial_Reject";
    pub const REJECTED: &str = "RefugeeChasedRejected";
    pub const TITLE: &str = "RefugeeChasedTitle";
    pub const OK: &str = "OK";
    pub const INCAPABLE_OF: &str = "IncapableOf";
    pub const TRAITS: &str = "Traits";
    pub const NONE_LOWER: &str = "NoneLower";
}

pub use commands::{AcceptRefugee, ReleaseRefugee};
pub use composer::{NarrativeText, TextComposer};
pub use config::{
    default_config_toml, ConfigError, IncidentConfig, RaidConfig, RefugeeConfig, TextConfig,
};
pub use dialog::{
    DialogCommand, DialogError, DialogNode, DialogOption, DialogSession, DialogStep, DialogTree,
    DialogTreeBuilder, NodeId,
};
pub use host::{
    CameraDriver, CharacterGenerator, CommandHost, EdgeCellFinder, FactionDirectory,
    GenerationContext, GenerationRequest, IncidentHost, IncidentQueue, Localizer, Presentation,
    Reachability, Storyteller, WorldMutator,
};
pub use locator::{SpawnCandidate, SpawnLocator};
pub use sandbox::{PresentedDialog, SandboxHost, SandboxScenario, ScenarioError, StringTable};
pub use scheduler::{DelayedEventScheduler, TickRange, DEFAULT_RAID_DELAY};
pub use selector::CandidateSelector;
pub use worker::{
    IncidentAbort, IncidentRegistry, IncidentWorker, RefugeeChasedWorker, RegistryError,
};
