//! The battle tick: one discrete time step of an encounter.

use log::debug;

use crate::defs::BattleDefs;

use super::resolution::{
    process_buffs, resolve_auto_attack, resolve_enemy_actions, resolve_spell,
};
use super::timers::{advance_timers, apply_auto_rotation, apply_focus_change};
use super::types::BattleState;

/// Player selection changes applied at the start of a tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickOptions {
    /// Switch focus to this hero index (subject to the focus cooldown).
    pub focus_change: Option<usize>,
    /// Aim attacks and spells at this enemy index (clamped to the list).
    pub target_change: Option<usize>,
}

/// Advances the battle by `delta_time` seconds.
///
/// Order: selection changes, auto-rotation, timer advancement, buff ticks,
/// then the focused hero's auto-attack and spell, then enemy actions. The
/// tick stops early as soon as a terminal result is reached. Ticking a
/// finished battle or with a non-positive delta is a no-op.
pub fn tick(
    state: &mut BattleState,
    delta_time: f64,
    options: TickOptions,
    defs: &dyn BattleDefs,
) {
    if state.result.is_some() || delta_time <= 0.0 {
        return;
    }

    state.elapsed_time += delta_time;

    if let Some(new_focus) = options.focus_change {
        apply_focus_change(state, new_focus);
    }
    if let Some(new_target) = options.target_change {
        if !state.enemy.is_empty() {
            state.target_index = new_target.min(state.enemy.len() - 1);
        }
    }

    apply_auto_rotation(state);
    advance_timers(state, delta_time);
    process_buffs(state, delta_time, defs);
    if state.result.is_some() {
        return;
    }

    let focus_idx = state.focused_hero_index;
    resolve_auto_attack(state, focus_idx, defs);
    if state.result.is_some() {
        debug!("battle decided during player attack: {:?}", state.result);
        return;
    }

    resolve_spell(state, focus_idx, defs);
    if state.result.is_some() {
        debug!("battle decided during spell cast: {:?}", state.result);
        return;
    }

    resolve_enemy_actions(state, defs);
    if state.result.is_some() {
        debug!("battle decided during enemy actions: {:?}", state.result);
    }
}
