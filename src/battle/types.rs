//! Battle state data structures.
//!
//! `BattleState` is ephemeral: it lives in the battle cache while an
//! encounter is in progress and is destroyed the moment the outcome has been
//! applied to the run.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::COMBAT_LOG_CAPACITY;

/// Terminal outcome of a battle. `None` on `BattleState::result` means the
/// fight is still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    Win,
    Lose,
}

/// A buff/debuff instance on a unit. `value` scales the effect (e.g. poison
/// damage per second); duration counts down in battle seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub id: String,
    pub duration: f64,
    pub value: Option<f64>,
}

/// One hero on the player side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroInstance {
    pub hero_id: u32,
    pub current_hp: f64,
    pub max_hp: f64,
    /// Seconds accumulated toward the next auto-attack.
    pub attack_timer: f64,
    /// Seconds accumulated toward the next spell cast.
    pub spell_timer: f64,
    pub ability_ids: Vec<String>,
    pub buffs: Vec<Buff>,
    /// Round-robin position among active timer abilities.
    pub last_cast_ability_index: Option<usize>,
}

impl HeroInstance {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }
}

/// One enemy unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub enemy_def_id: String,
    pub current_hp: f64,
    pub max_hp: f64,
    pub attack_timer: f64,
    /// Scaled attack damage for this instance (rift level scaling applied at
    /// battle creation; overrides the def's base damage).
    pub attack_damage: f64,
    pub buffs: Vec<Buff>,
}

impl EnemyInstance {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Battle elapsed time when the action occurred.
    pub time: f64,
    pub message: String,
    pub is_player_action: bool,
}

/// Full state of an in-progress encounter.
///
/// Dead combatants stay in `player`/`enemy` with 0 HP for display; they are
/// excluded from targeting by the resolution code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub player: Vec<HeroInstance>,
    pub enemy: Vec<EnemyInstance>,
    /// Player-selected hero whose timers advance and who acts each tick.
    pub focused_hero_index: usize,
    /// Player-selected enemy that attacks and spells are aimed at.
    pub target_index: usize,
    /// The enemy the pack is collectively focusing; attacks on any other
    /// enemy suffer the non-focus penalty.
    pub enemy_focused_index: usize,
    /// Elapsed time of the last focus change, for the change cooldown.
    pub last_focus_change_at: f64,
    pub elapsed_time: f64,
    pub result: Option<BattleResult>,
    #[serde(skip)]
    pub combat_log: VecDeque<CombatLogEntry>,
}

impl BattleState {
    pub fn add_log_entry(&mut self, message: String, is_player_action: bool) {
        if self.combat_log.len() >= COMBAT_LOG_CAPACITY {
            self.combat_log.pop_front();
        }
        self.combat_log.push_back(CombatLogEntry {
            time: self.elapsed_time,
            message,
            is_player_action,
        });
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.enemy.iter().all(|e| !e.is_alive())
    }

    pub fn all_players_dead(&self) -> bool {
        self.player.iter().all(|h| !h.is_alive())
    }
}
