//! Run, lineup, and map node data structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Run status. Transitions only `Active -> Won` and `Active -> Dead`; the
/// terminal states are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Active,
    Won,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Base,
    Combat,
    Elite,
    Boss,
    Shop,
    Event,
    Rest,
}

impl NodeType {
    /// Combat, elite, and boss nodes start an encounter on entry.
    pub fn is_encounter(&self) -> bool {
        matches!(self, NodeType::Combat | NodeType::Elite | NodeType::Boss)
    }
}

/// One node of a run's map graph. `next_node_ids` empty means this is the
/// final node of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub run_id: Uuid,
    pub node_type: NodeType,
    pub encounter_id: Option<String>,
    pub next_node_ids: Vec<String>,
    pub floor: u32,
    pub act: u32,
}

/// Recorded outcome of a run's pass through a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClearanceOutcome {
    /// The node's encounter was won; duration is battle elapsed time.
    Victory { duration_seconds: f64 },
    /// A non-combat node was passed through.
    Skip,
}

/// A player's chosen party of heroes for runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hero_ids: Vec<u32>,
}

/// One playthrough attempt from the map's start node to a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lineup_id: Uuid,
    pub status: RunStatus,
    pub current_node_id: String,
    /// Rift difficulty tier; scales enemy stats.
    pub level: u32,
    /// Current HP per lineup hero, by position. `None` means full health.
    pub hero_hp: Option<Vec<f64>>,
    pub gold: u64,
    pub xp_by_hero_id: HashMap<u32, u64>,
    pub node_clearances: HashMap<String, ClearanceOutcome>,
    /// Millisecond timestamps.
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub seed: Option<String>,
}

impl RunRecord {
    pub fn is_active(&self) -> bool {
        self.status == RunStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounter_node_types() {
        assert!(NodeType::Combat.is_encounter());
        assert!(NodeType::Elite.is_encounter());
        assert!(NodeType::Boss.is_encounter());
        assert!(!NodeType::Base.is_encounter());
        assert!(!NodeType::Event.is_encounter());
        assert!(!NodeType::Shop.is_encounter());
        assert!(!NodeType::Rest.is_encounter());
    }

    #[test]
    fn test_clearance_outcome_serde_tag() {
        let victory = ClearanceOutcome::Victory {
            duration_seconds: 12.5,
        };
        let json = serde_json::to_string(&victory).unwrap();
        assert!(json.contains("\"outcome\":\"victory\""));
        let back: ClearanceOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, victory);
    }
}
