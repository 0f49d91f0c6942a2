//! Commands attached to the refugee dialog options.

use incident_events::{
    AreaId, ArrivalMode, Cell, CharacterDescriptor, FactionId, IncidentCategory, IncidentKind,
    RaidStrategy,
};
use rand::RngCore;

use crate::dialog::DialogCommand;
use crate::host::CommandHost;
use crate::scheduler::DelayedEventScheduler;

/// Takes the refugee in and queues the pursuers' raid.
#[derive(Debug, Clone)]
pub struct AcceptRefugee {
    pub character: CharacterDescriptor,
    pub area: AreaId,
    pub cell: Cell,
    /// Faction chasing the refugee
    pub enemy: FactionId,
    pub points_factor: f32,
    pub scheduler: DelayedEventScheduler,
}

impl DialogCommand for AcceptRefugee {
    fn execute(self: Box<Self>, host: &mut dyn CommandHost, rng: &mut dyn RngCore) {
        let AcceptRefugee {
            character,
            area,
            cell,
            enemy,
            points_factor,
            scheduler,
        } = *self;
        let character_id = character.id.clone();

        tracing::info!("{} accepted at {} in {}", character_id, cell, area);
        host.spawn(character, &area, cell);
        let player = host.player_faction().clone();
        host.set_faction(&character_id, &player);
        host.jump_to(&area, cell);

        let mut parms = host.default_parms_now(IncidentCategory::ThreatBig, &area);
        parms.forced = true;
        parms.faction = Some(enemy);
        parms.raid_strategy = Some(RaidStrategy::ImmediateAttack);
        parms.arrival_mode = Some(ArrivalMode::EdgeWalkIn);
        parms.spawn_center = Some(cell);
        parms.points *= points_factor;

        scheduler.schedule(host, IncidentKind::RaidEnemy, parms, rng);
    }
}

/// Turns the refugee away.
#[derive(Debug, Clone)]
pub struct ReleaseRefugee {
    pub character: CharacterDescriptor,
}

impl DialogCommand for ReleaseRefugee {
    fn execute(self: Box<Self>, host: &mut dyn CommandHost, _rng: &mut dyn RngCore) {
        tracing::info!("{} turned away", self.character.id);
        host.release(self.character);
    }
}
