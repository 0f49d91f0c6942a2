//! Incident Types
//!
//! Incident kinds, their parameter bundles, and incidents waiting in the queue.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::area::{AreaId, Cell};
use crate::faction::FactionId;

/// Kinds of incident the host knows how to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    RefugeeChased,
    RaidEnemy,
}

impl fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentKind::RefugeeChased => write!(f, "refugee_chased"),
            IncidentKind::RaidEnemy => write!(f, "raid_enemy"),
        }
    }
}

/// Storyteller category an incident's budget is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentCategory {
    #[default]
    Misc,
    ThreatSmall,
    ThreatBig,
}

/// How raiders behave once they arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidStrategy {
    ImmediateAttack,
    Siege,
    StageThenAttack,
}

/// How raiders enter the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalMode {
    EdgeWalkIn,
    CenterDrop,
    EdgeDrop,
}

/// Parameter bundle handed to an incident when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentParms {
    /// Area the incident targets
    pub target: AreaId,
    #[serde(default)]
    pub category: IncidentCategory,
    /// Threat point budget
    #[serde(default)]
    pub points: f32,
    /// Fire even if the storyteller would normally refuse
    #[serde(default)]
    pub forced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<FactionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raid_strategy: Option<RaidStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_mode: Option<ArrivalMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_center: Option<Cell>,
}

impl IncidentParms {
    pub fn new(target: impl Into<AreaId>, category: IncidentCategory, points: f32) -> Self {
        Self {
            target: target.into(),
            category,
            points,
            forced: false,
            faction: None,
            raid_strategy: None,
            arrival_mode: None,
            spawn_center: None,
        }
    }
}

/// Generates a queued incident ID from a sequence number.
pub fn generate_incident_id(sequence: u64) -> String {
    format!("inc_{:06}", sequence)
}

/// An incident waiting for its fire tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedIncident {
    pub incident_id: String,
    pub kind: IncidentKind,
    pub parms: IncidentParms,
    pub fire_tick: u64,
}

impl QueuedIncident {
    pub fn new(
        incident_id: impl Into<String>,
        kind: IncidentKind,
        parms: IncidentParms,
        fire_tick: u64,
    ) -> Self {
        Self {
            incident_id: incident_id.into(),
            kind,
            parms,
            fire_tick,
        }
    }

    /// Serializes to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses from a single JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&IncidentKind::RaidEnemy).unwrap(),
            r#""raid_enemy""#
        );
        assert_eq!(IncidentKind::RefugeeChased.to_string(), "refugee_chased");
    }

    #[test]
    fn test_parms_skip_unset_fields() {
        let parms = IncidentParms::new("camp", IncidentCategory::ThreatBig, 120.0);
        let json = serde_json::to_string(&parms).unwrap();

        assert!(!json.contains("spawn_center"));
        assert!(!json.contains("raid_strategy"));
        assert!(json.contains(r#""category":"threat_big""#));
    }

    #[test]
    fn test_queued_incident_jsonl() {
        let mut parms = IncidentParms::new("camp", IncidentCategory::ThreatBig, 162.0);
        parms.spawn_center = Some(Cell::new(0, 7));
        parms.arrival_mode = Some(ArrivalMode::EdgeWalkIn);
        let queued = QueuedIncident::new(generate_incident_id(3), IncidentKind::RaidEnemy, parms, 4200);

        let line = queued.to_jsonl().unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(QueuedIncident::from_jsonl(&line).unwrap(), queued);
    }

    #[test]
    fn test_generate_incident_id() {
        assert_eq!(generate_incident_id(12), "inc_000012");
    }
}
