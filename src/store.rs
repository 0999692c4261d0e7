//! Storage seams for run state and in-flight battles.
//!
//! The run service talks to storage through these traits so the engine can
//! run against the in-memory implementations here or a persistent backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::battle::BattleState;
use crate::run::types::{Lineup, MapNode, RunRecord};

/// Persistent run state: lineups, runs, and their map nodes.
pub trait RunStore {
    fn lineup(&self, lineup_id: Uuid) -> Option<Lineup>;
    fn insert_lineup(&mut self, lineup: Lineup);

    fn run(&self, run_id: Uuid) -> Option<&RunRecord>;
    fn run_mut(&mut self, run_id: Uuid) -> Option<&mut RunRecord>;
    fn insert_run(&mut self, run: RunRecord);
    /// Ids of all runs for this lineup that are still in progress.
    fn active_run_ids_for_lineup(&self, lineup_id: Uuid) -> Vec<Uuid>;

    fn node(&self, run_id: Uuid, node_id: &str) -> Option<&MapNode>;
    fn insert_nodes(&mut self, nodes: Vec<MapNode>);
}

/// An encounter in progress, keyed by run. `pending_node_id` is the node the
/// run moves to if the battle is won; the run itself does not move until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedBattle {
    pub state: BattleState,
    pub pending_node_id: String,
    pub hero_ids: Vec<u32>,
}

/// Ephemeral battle storage. Battles are transient and lost on restart; a
/// lost battle simply restarts from the node entry.
pub trait BattleCache {
    fn get(&self, run_id: Uuid) -> Option<&CachedBattle>;
    fn get_mut(&mut self, run_id: Uuid) -> Option<&mut CachedBattle>;
    fn set(&mut self, run_id: Uuid, battle: CachedBattle);
    fn clear(&mut self, run_id: Uuid);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    lineups: HashMap<Uuid, Lineup>,
    runs: HashMap<Uuid, RunRecord>,
    nodes: HashMap<(Uuid, String), MapNode>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for MemoryStore {
    fn lineup(&self, lineup_id: Uuid) -> Option<Lineup> {
        self.lineups.get(&lineup_id).cloned()
    }

    fn insert_lineup(&mut self, lineup: Lineup) {
        self.lineups.insert(lineup.id, lineup);
    }

    fn run(&self, run_id: Uuid) -> Option<&RunRecord> {
        self.runs.get(&run_id)
    }

    fn run_mut(&mut self, run_id: Uuid) -> Option<&mut RunRecord> {
        self.runs.get_mut(&run_id)
    }

    fn insert_run(&mut self, run: RunRecord) {
        self.runs.insert(run.id, run);
    }

    fn active_run_ids_for_lineup(&self, lineup_id: Uuid) -> Vec<Uuid> {
        self.runs
            .values()
            .filter(|r| r.lineup_id == lineup_id && r.is_active())
            .map(|r| r.id)
            .collect()
    }

    fn node(&self, run_id: Uuid, node_id: &str) -> Option<&MapNode> {
        self.nodes.get(&(run_id, node_id.to_string()))
    }

    fn insert_nodes(&mut self, nodes: Vec<MapNode>) {
        for node in nodes {
            self.nodes.insert((node.run_id, node.id.clone()), node);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBattleCache {
    battles: HashMap<Uuid, CachedBattle>,
}

impl MemoryBattleCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BattleCache for MemoryBattleCache {
    fn get(&self, run_id: Uuid) -> Option<&CachedBattle> {
        self.battles.get(&run_id)
    }

    fn get_mut(&mut self, run_id: Uuid) -> Option<&mut CachedBattle> {
        self.battles.get_mut(&run_id)
    }

    fn set(&mut self, run_id: Uuid, battle: CachedBattle) {
        self.battles.insert(run_id, battle);
    }

    fn clear(&mut self, run_id: Uuid) {
        self.battles.remove(&run_id);
    }
}
