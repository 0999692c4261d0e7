//! Run lifecycle: the branching map of nodes and the state machine that
//! moves a lineup through it.

pub mod map;
pub mod scaling;
pub mod service;
pub mod types;

pub use service::{
    advance_run, cancel_run, complete_battle, create_encounter_for_node, start_run,
    AdvanceOutcome, EncounterStart, StartRunOptions,
};
pub use types::{ClearanceOutcome, Lineup, MapNode, NodeType, RunRecord, RunStatus};
