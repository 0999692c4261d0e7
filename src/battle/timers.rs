//! Focus selection and timer advancement.
//!
//! Only the focused hero's timers advance; benched heroes hold their charge.
//! Enemy timers always advance.

use crate::constants::{AUTO_ROTATION_INTERVAL_SECONDS, FOCUS_CHANGE_COOLDOWN_SECONDS};

use super::types::BattleState;

/// Advances the focused hero's attack and spell timers, and all enemy attack
/// timers, by `delta_time`. Other player heroes' timers are unchanged.
pub fn advance_timers(state: &mut BattleState, delta_time: f64) {
    let focus_idx = state.focused_hero_index;
    if let Some(hero) = state.player.get_mut(focus_idx) {
        hero.attack_timer += delta_time;
        hero.spell_timer += delta_time;
    }
    for enemy in &mut state.enemy {
        enemy.attack_timer += delta_time;
    }
}

/// Switches focus to `new_index` if the focus-change cooldown has elapsed.
/// Both the previous and the new focused hero's timers reset to zero so a
/// swap never banks a free attack. Uses `state.elapsed_time` as "now".
pub fn apply_focus_change(state: &mut BattleState, new_index: usize) {
    if new_index == state.focused_hero_index || new_index >= state.player.len() {
        return;
    }
    let now = state.elapsed_time;
    if now - state.last_focus_change_at < FOCUS_CHANGE_COOLDOWN_SECONDS {
        return;
    }

    let prev_idx = state.focused_hero_index;
    for idx in [prev_idx, new_index] {
        if let Some(hero) = state.player.get_mut(idx) {
            hero.attack_timer = 0.0;
            hero.spell_timer = 0.0;
        }
    }
    state.focused_hero_index = new_index;
    state.last_focus_change_at = now;
}

/// Rotates focus to the next living hero when the rotation interval has
/// passed since the last focus change. If the focused hero is dead, rotates
/// immediately regardless of cooldown so the battle cannot stall.
pub fn apply_auto_rotation(state: &mut BattleState) {
    if state.player.is_empty() {
        return;
    }
    let focused_dead = state
        .player
        .get(state.focused_hero_index)
        .is_none_or(|h| !h.is_alive());
    let rotation_due =
        state.elapsed_time - state.last_focus_change_at >= AUTO_ROTATION_INTERVAL_SECONDS;
    if !focused_dead && !rotation_due {
        return;
    }

    let Some(next_index) = next_living_hero(state, state.focused_hero_index) else {
        return;
    };
    if focused_dead {
        // Bypass the cooldown: a dead hero must not hold focus.
        state.last_focus_change_at = state.elapsed_time - FOCUS_CHANGE_COOLDOWN_SECONDS;
    }
    apply_focus_change(state, next_index);
}

/// First living hero after `from`, cycling; `None` when nobody is alive.
fn next_living_hero(state: &BattleState, from: usize) -> Option<usize> {
    let n = state.player.len();
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&idx| state.player[idx].is_alive())
}
