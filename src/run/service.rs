//! Run lifecycle operations: start, advance, fight, complete, cancel.
//!
//! Every operation validates ownership and run status before touching any
//! state, so a returned error leaves the store exactly as it found it.
//! Entering a combat node never moves the run; the move is applied by
//! `complete_battle` on a win, which also clears the cached encounter.

use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::battle::{create_battle_state, BattleResult, BattleState};
use crate::constants::{
    GOLD_PER_ENCOUNTER_WIN, HEAL_PERCENT_ON_WIN, MAX_LINEUP_HEROES, MIN_LINEUP_HEROES,
    XP_PER_HERO_WIN,
};
use crate::defs::BattleDefs;
use crate::error::{EngineError, EngineResult};
use crate::store::{BattleCache, CachedBattle, RunStore};

use super::map::generate_map_for_run;
use super::types::{ClearanceOutcome, NodeType, RunRecord, RunStatus};

#[derive(Debug, Clone, Default)]
pub struct StartRunOptions {
    /// Rift difficulty tier; defaults to 1.
    pub level: Option<u32>,
    /// Makes map generation reproducible when supplied.
    pub seed: Option<String>,
}

/// A freshly created encounter for a combat node.
#[derive(Debug, Clone)]
pub struct EncounterStart {
    pub encounter_id: String,
    pub hero_ids: Vec<u32>,
    pub state: BattleState,
}

/// Result of advancing a run: the (possibly updated) run, plus the encounter
/// to fight when the chosen node is a combat node.
#[derive(Debug, Clone)]
pub struct AdvanceOutcome {
    pub run: RunRecord,
    pub encounter: Option<EncounterStart>,
}

/// Creates a new run for the lineup: generates the map, positions the run at
/// the start node, and persists both.
pub fn start_run(
    store: &mut dyn RunStore,
    user_id: Uuid,
    lineup_id: Uuid,
    options: StartRunOptions,
) -> EngineResult<RunRecord> {
    let lineup = store.lineup(lineup_id).ok_or(EngineError::NotFound("lineup"))?;
    if lineup.user_id != user_id {
        return Err(EngineError::Forbidden("lineup"));
    }
    let hero_count = lineup.hero_ids.len();
    if hero_count < MIN_LINEUP_HEROES || hero_count > MAX_LINEUP_HEROES {
        return Err(EngineError::Validation(format!(
            "lineup must have {} to {} heroes, got {}",
            MIN_LINEUP_HEROES, MAX_LINEUP_HEROES, hero_count
        )));
    }

    let run_id = Uuid::new_v4();
    let nodes = generate_map_for_run(run_id, options.seed.as_deref());
    let start_node_id = nodes[0].id.clone();

    let run = RunRecord {
        id: run_id,
        user_id,
        lineup_id,
        status: RunStatus::Active,
        current_node_id: start_node_id,
        level: options.level.unwrap_or(1).max(1),
        hero_hp: None,
        gold: 0,
        xp_by_hero_id: Default::default(),
        node_clearances: Default::default(),
        started_at: Utc::now().timestamp_millis(),
        finished_at: None,
        seed: options.seed,
    };
    store.insert_nodes(nodes);
    store.insert_run(run.clone());
    info!("started run {} for lineup {} at level {}", run.id, lineup_id, run.level);
    Ok(run)
}

/// Moves the run to `next_node_id` if it is reachable from the current node.
///
/// Non-combat nodes are entered immediately and recorded as a skip clearance;
/// entering the base camp restores the lineup to full health, and entering a
/// final non-combat node wins the run. Combat nodes are not entered: the run
/// stays put and a fresh encounter is returned instead.
pub fn advance_run(
    store: &mut dyn RunStore,
    cache: &mut dyn BattleCache,
    user_id: Uuid,
    run_id: Uuid,
    next_node_id: &str,
    defs: &dyn BattleDefs,
) -> EngineResult<AdvanceOutcome> {
    let next_type = validate_transition(store, user_id, run_id, next_node_id)?;

    if next_type.is_encounter() {
        let encounter = create_encounter_for_node(store, cache, user_id, run_id, next_node_id, defs)?;
        let run = store.run(run_id).ok_or(EngineError::NotFound("run"))?.clone();
        return Ok(AdvanceOutcome {
            run,
            encounter: Some(encounter),
        });
    }

    let is_final = store
        .node(run_id, next_node_id)
        .ok_or(EngineError::NotFound("node"))?
        .next_node_ids
        .is_empty();

    // Moving abandons any encounter cached for a sibling combat node.
    cache.clear(run_id);

    let run = store.run_mut(run_id).ok_or(EngineError::NotFound("run"))?;
    run.current_node_id = next_node_id.to_string();
    run.node_clearances
        .insert(next_node_id.to_string(), ClearanceOutcome::Skip);
    if next_type == NodeType::Base {
        // Back at camp: everyone rests to full.
        run.hero_hp = None;
    }
    if is_final {
        run.status = RunStatus::Won;
        run.finished_at = Some(Utc::now().timestamp_millis());
        info!("run {} won at node {}", run_id, next_node_id);
    }
    Ok(AdvanceOutcome {
        run: run.clone(),
        encounter: None,
    })
}

/// Builds and caches the battle for a reachable combat node. The run itself
/// is not mutated; calling this again for the same run restarts the fight.
pub fn create_encounter_for_node(
    store: &mut dyn RunStore,
    cache: &mut dyn BattleCache,
    user_id: Uuid,
    run_id: Uuid,
    next_node_id: &str,
    defs: &dyn BattleDefs,
) -> EngineResult<EncounterStart> {
    let next_type = validate_transition(store, user_id, run_id, next_node_id)?;
    if !next_type.is_encounter() {
        return Err(EngineError::Validation(format!(
            "node {} is not a combat node",
            next_node_id
        )));
    }

    let run = store.run(run_id).ok_or(EngineError::NotFound("run"))?;
    let node = store
        .node(run_id, next_node_id)
        .ok_or(EngineError::NotFound("node"))?;
    let encounter_id = node
        .encounter_id
        .clone()
        .ok_or_else(|| EngineError::Validation(format!("node {} has no encounter", next_node_id)))?;
    let lineup = store
        .lineup(run.lineup_id)
        .ok_or(EngineError::NotFound("lineup"))?;

    let state = create_battle_state(
        &lineup.hero_ids,
        &encounter_id,
        run.level,
        run.hero_hp.as_deref(),
        defs,
    )?;

    cache.set(
        run_id,
        CachedBattle {
            state: state.clone(),
            pending_node_id: next_node_id.to_string(),
            hero_ids: lineup.hero_ids.clone(),
        },
    );
    debug!("run {} entered encounter {} at node {}", run_id, encounter_id, next_node_id);
    Ok(EncounterStart {
        encounter_id,
        hero_ids: lineup.hero_ids,
        state,
    })
}

/// Applies the terminal result of the cached battle to the run.
///
/// The fought node must still be reachable from the run's current node;
/// completion of a battle cached before the run moved elsewhere fails
/// validation. A win moves the run onto the fought node, grants gold and
/// per-hero XP, heals the whole lineup by a fraction of max HP (a hero at
/// 0 HP comes back at the heal amount), and records a victory clearance; if
/// the new node is the map's last, the run is won. A loss marks the run dead
/// without moving it. Either way the cached battle is discarded.
pub fn complete_battle(
    store: &mut dyn RunStore,
    cache: &mut dyn BattleCache,
    user_id: Uuid,
    run_id: Uuid,
) -> EngineResult<RunRecord> {
    require_active_owned(store, run_id, user_id)?;

    let battle = cache
        .get(run_id)
        .ok_or_else(|| EngineError::Validation("no battle in progress for this run".to_string()))?;
    let result = battle
        .state
        .result
        .ok_or_else(|| EngineError::Validation("battle is not finished".to_string()))?;

    // The fought node must still be a legal move from where the run stands;
    // a battle cached before the run moved elsewhere is stale and cannot
    // complete.
    let run = store.run(run_id).ok_or(EngineError::NotFound("run"))?;
    let current = store
        .node(run_id, &run.current_node_id)
        .ok_or(EngineError::NotFound("node"))?;
    if !current
        .next_node_ids
        .iter()
        .any(|id| id == &battle.pending_node_id)
    {
        return Err(EngineError::Validation(format!(
            "node {} is not reachable from {}",
            battle.pending_node_id, run.current_node_id
        )));
    }

    let now = Utc::now().timestamp_millis();
    match result {
        BattleResult::Lose => {
            let run = store.run_mut(run_id).ok_or(EngineError::NotFound("run"))?;
            run.status = RunStatus::Dead;
            run.finished_at = Some(now);
            info!("run {} died at node {}", run_id, run.current_node_id);
        }
        BattleResult::Win => {
            let pending_node_id = battle.pending_node_id.clone();
            let duration_seconds = battle.state.elapsed_time;
            let hero_ids = battle.hero_ids.clone();
            // The heal covers the whole lineup: a hero downed during the
            // fight carries forward at the heal amount, not at 0.
            let healed_hp: Vec<f64> = battle
                .state
                .player
                .iter()
                .map(|h| (h.current_hp + HEAL_PERCENT_ON_WIN * h.max_hp).min(h.max_hp))
                .collect();
            let is_final = store
                .node(run_id, &pending_node_id)
                .ok_or(EngineError::NotFound("node"))?
                .next_node_ids
                .is_empty();

            let run = store.run_mut(run_id).ok_or(EngineError::NotFound("run"))?;
            run.current_node_id = pending_node_id.clone();
            run.gold += GOLD_PER_ENCOUNTER_WIN;
            for hero_id in hero_ids {
                *run.xp_by_hero_id.entry(hero_id).or_insert(0) += XP_PER_HERO_WIN;
            }
            run.hero_hp = Some(healed_hp);
            run.node_clearances
                .insert(pending_node_id.clone(), ClearanceOutcome::Victory { duration_seconds });
            if is_final {
                run.status = RunStatus::Won;
                run.finished_at = Some(now);
                info!("run {} won at node {}", run_id, pending_node_id);
            }
        }
    }

    cache.clear(run_id);
    Ok(store
        .run(run_id)
        .ok_or(EngineError::NotFound("run"))?
        .clone())
}

/// Forfeits the run. Every still-active run of the same lineup is marked
/// dead, and any cached battles for them are discarded.
pub fn cancel_run(
    store: &mut dyn RunStore,
    cache: &mut dyn BattleCache,
    user_id: Uuid,
    run_id: Uuid,
) -> EngineResult<RunRecord> {
    let run = require_active_owned(store, run_id, user_id)?;
    let lineup_id = run.lineup_id;

    let now = Utc::now().timestamp_millis();
    for active_id in store.active_run_ids_for_lineup(lineup_id) {
        if let Some(active) = store.run_mut(active_id) {
            active.status = RunStatus::Dead;
            active.finished_at = Some(now);
        }
        cache.clear(active_id);
    }
    info!("run {} cancelled (lineup {})", run_id, lineup_id);
    Ok(store
        .run(run_id)
        .ok_or(EngineError::NotFound("run"))?
        .clone())
}

/// Looks up the run and checks ownership and liveness.
fn require_active_owned(
    store: &dyn RunStore,
    run_id: Uuid,
    user_id: Uuid,
) -> EngineResult<&RunRecord> {
    let run = store.run(run_id).ok_or(EngineError::NotFound("run"))?;
    if run.user_id != user_id {
        return Err(EngineError::Forbidden("run"));
    }
    if !run.is_active() {
        return Err(EngineError::InvalidState(run.status));
    }
    Ok(run)
}

/// Validates that `next_node_id` is a legal move for the run and returns the
/// target node's type. Does not mutate anything.
fn validate_transition(
    store: &dyn RunStore,
    user_id: Uuid,
    run_id: Uuid,
    next_node_id: &str,
) -> EngineResult<NodeType> {
    let run = require_active_owned(store, run_id, user_id)?;
    let current = store
        .node(run_id, &run.current_node_id)
        .ok_or(EngineError::NotFound("node"))?;
    if !current.next_node_ids.iter().any(|id| id == next_node_id) {
        return Err(EngineError::Validation(format!(
            "node {} is not reachable from {}",
            next_node_id, run.current_node_id
        )));
    }
    store
        .node(run_id, next_node_id)
        .map(|n| n.node_type)
        .ok_or(EngineError::NotFound("node"))
}
