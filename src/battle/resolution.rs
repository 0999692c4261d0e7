//! Action resolution: auto-attacks, spell rotation, enemy actions, buffs,
//! and the win/lose check.

use crate::defs::{
    get_enemy_def, get_status_effect_def, AbilityDef, AbilityKind, AbilityTarget, AbilityTrigger,
    BattleDefs, DamageType,
};

use super::formulas::{
    apply_damage_by_type, attack_damage, attack_interval, non_focus_target_penalty, spell_damage,
    spell_interval,
};
use super::types::{BattleResult, BattleState, Buff};

/// Sets the terminal result once either side is wiped. When both sides hit
/// zero within the same tick, the win is awarded: enemies are checked first,
/// matching the resolution order (player actions land before enemy actions).
pub fn check_result(state: &mut BattleState) {
    if state.result.is_some() {
        return;
    }
    if state.all_enemies_dead() {
        state.result = Some(BattleResult::Win);
    } else if state.all_players_dead() {
        state.result = Some(BattleResult::Lose);
    }
}

/// Redirects the target and pack-focus indices away from dead enemies. Dead
/// combatants stay in the list for display but must not soak attacks.
pub fn retarget_dead_enemies(state: &mut BattleState) {
    let first_living = state.enemy.iter().position(|e| e.is_alive());
    let Some(first_living) = first_living else {
        return;
    };
    if !state
        .enemy
        .get(state.target_index)
        .is_some_and(|e| e.is_alive())
    {
        state.target_index = first_living;
    }
    if !state
        .enemy
        .get(state.enemy_focused_index)
        .is_some_and(|e| e.is_alive())
    {
        state.enemy_focused_index = first_living;
    }
}

/// Effective armor and magic resist: base stats plus flat buff modifiers,
/// with magic resist clamped to 0-1.
fn effective_armor_mr(buffs: &[Buff], base_armor: f64, base_magic_resist: f64) -> (f64, f64) {
    let mut armor = base_armor;
    let mut magic_resist = base_magic_resist;
    for buff in buffs {
        if let Some(def) = get_status_effect_def(&buff.id) {
            if let Some(armor_mod) = def.armor_mod {
                armor += armor_mod;
            }
            if let Some(mr_mod) = def.magic_resist_mod {
                magic_resist += mr_mod;
            }
        }
    }
    (armor, magic_resist.clamp(0.0, 1.0))
}

/// Resolves one auto-attack from the given hero against the selected target.
/// Call when the hero's attack timer has filled; resets it afterwards.
pub fn resolve_auto_attack(state: &mut BattleState, hero_index: usize, defs: &dyn BattleDefs) {
    if state.result.is_some() {
        return;
    }
    let (hero_id, hero_attack_timer) = match state.player.get(hero_index) {
        Some(hero) if hero.is_alive() => (hero.hero_id, hero.attack_timer),
        _ => return,
    };
    let Some(def) = defs.hero_def(hero_id) else {
        return;
    };

    let interval = attack_interval(def.base_attack_interval, def.attack_speed, None);
    if hero_attack_timer < interval {
        return;
    }

    retarget_dead_enemies(state);
    let target_idx = state.target_index;
    let Some(target) = state.enemy.get(target_idx).filter(|e| e.is_alive()) else {
        return;
    };
    let Some(enemy_def) = get_enemy_def(&target.enemy_def_id) else {
        return;
    };

    let raw = attack_damage(def.base_attack_damage, 0.0);
    let is_focus = target_idx == state.enemy_focused_index;
    let penalized = non_focus_target_penalty(raw, is_focus);
    let (armor, magic_resist) =
        effective_armor_mr(&target.buffs, enemy_def.base_armor, enemy_def.base_magic_resist);
    let final_damage = apply_damage_by_type(penalized, DamageType::Physical, armor, magic_resist);

    let target_name = enemy_def.name.clone();

    let target = &mut state.enemy[target_idx];
    target.current_hp = (target.current_hp - final_damage).max(0.0);
    state.player[hero_index].attack_timer = 0.0;

    state.add_log_entry(
        format!(
            "Hero {} hits {} for {:.0} physical",
            hero_id, target_name, final_damage
        ),
        true,
    );

    retarget_dead_enemies(state);
    check_result(state);
}

fn active_timer_abilities(hero_ability_ids: &[String], defs: &dyn BattleDefs) -> Vec<AbilityDef> {
    hero_ability_ids
        .iter()
        .filter_map(|id| defs.ability_def(id))
        .filter(|a| a.kind == AbilityKind::Active && a.trigger == AbilityTrigger::Timer)
        .collect()
}

/// Resolves the focused hero's spell cast. Rotates round-robin through the
/// hero's active timer abilities so every spell gets a turn; only
/// single-enemy abilities with damage or an on-hit status apply to the
/// target, other casts are consumed (timer reset) without a target effect.
pub fn resolve_spell(state: &mut BattleState, hero_index: usize, defs: &dyn BattleDefs) {
    if state.result.is_some() {
        return;
    }
    let (hero_id, hero_spell_timer, last_cast, ability_ids) = match state.player.get(hero_index) {
        Some(hero) if hero.is_alive() => (
            hero.hero_id,
            hero.spell_timer,
            hero.last_cast_ability_index,
            hero.ability_ids.clone(),
        ),
        _ => return,
    };
    let Some(def) = defs.hero_def(hero_id) else {
        return;
    };
    let Some(base_spell_interval) = def.base_spell_interval else {
        return;
    };

    let interval = spell_interval(base_spell_interval, def.spell_haste, None);
    if hero_spell_timer < interval {
        return;
    }

    let rotatable = active_timer_abilities(&ability_ids, defs);
    if rotatable.is_empty() {
        return;
    }
    let next_index = last_cast
        .map(|i| (i + 1) % rotatable.len())
        .unwrap_or(0);
    let ability = rotatable[next_index].clone();

    let applies_to_target = ability.target == AbilityTarget::SingleEnemy
        && (ability.base_damage.is_some_and(|d| d > 0.0) || ability.status_effect_on_hit.is_some());

    if applies_to_target {
        retarget_dead_enemies(state);
        let target_idx = state.target_index;
        if let Some(target) = state.enemy.get(target_idx).filter(|e| e.is_alive()) {
            if let Some(enemy_def) = get_enemy_def(&target.enemy_def_id) {
                let (armor, magic_resist) = effective_armor_mr(
                    &target.buffs,
                    enemy_def.base_armor,
                    enemy_def.base_magic_resist,
                );
                let damage_type = ability.damage_type.unwrap_or(DamageType::Pure);
                let mut final_damage = 0.0;
                if let Some(base) = ability.base_damage.filter(|d| *d > 0.0) {
                    let raw = spell_damage(base, def.spell_power);
                    final_damage = apply_damage_by_type(raw, damage_type, armor, magic_resist);
                }

                let target_name = enemy_def.name.clone();
                let target = &mut state.enemy[target_idx];
                target.current_hp = (target.current_hp - final_damage).max(0.0);
                if let Some(on_hit) = &ability.status_effect_on_hit {
                    if get_status_effect_def(&on_hit.status_effect_id).is_some() {
                        target.buffs.push(Buff {
                            id: on_hit.status_effect_id.clone(),
                            duration: on_hit.duration,
                            value: on_hit.value.or(ability.base_damage),
                        });
                    }
                }

                state.add_log_entry(
                    format!(
                        "Hero {} casts {} on {} for {:.0}",
                        hero_id, ability.id, target_name, final_damage
                    ),
                    true,
                );
            }
        }
    } else {
        state.add_log_entry(format!("Hero {} casts {}", hero_id, ability.id), true);
    }

    let hero = &mut state.player[hero_index];
    hero.spell_timer = 0.0;
    hero.last_cast_ability_index = Some(next_index);

    retarget_dead_enemies(state);
    check_result(state);
}

/// Resolves an attack from every enemy whose timer has filled. Enemies
/// target the focused hero, or the first living hero when the focus is down.
/// Return-damage passives on the victim reflect back at the attacker.
pub fn resolve_enemy_actions(state: &mut BattleState, defs: &dyn BattleDefs) {
    if state.result.is_some() || state.player.is_empty() {
        return;
    }

    for enemy_idx in 0..state.enemy.len() {
        let enemy = &state.enemy[enemy_idx];
        if !enemy.is_alive() {
            continue;
        }
        let Some(enemy_def) = get_enemy_def(&enemy.enemy_def_id) else {
            continue;
        };
        if enemy.attack_timer < enemy_def.attack_interval {
            continue;
        }

        let victim_idx = if state
            .player
            .get(state.focused_hero_index)
            .is_some_and(|h| h.is_alive())
        {
            state.focused_hero_index
        } else {
            match state.player.iter().position(|h| h.is_alive()) {
                Some(idx) => idx,
                None => break,
            }
        };

        let victim = &state.player[victim_idx];
        let hero_def = defs.hero_def(victim.hero_id);
        let (base_armor, base_mr) = hero_def
            .as_ref()
            .map(|d| (d.base_armor, d.base_magic_resist))
            .unwrap_or((0.0, 0.0));
        let (armor, magic_resist) = effective_armor_mr(&victim.buffs, base_armor, base_mr);

        let return_passive = victim
            .ability_ids
            .iter()
            .filter_map(|id| defs.ability_def(id))
            .find(|a| a.trigger == AbilityTrigger::OnDamageTaken && a.return_damage_ratio.is_some());

        let raw = state.enemy[enemy_idx].attack_damage;
        let final_damage = apply_damage_by_type(raw, DamageType::Physical, armor, magic_resist);

        let victim_hero_id = victim.hero_id;
        let enemy_name = enemy_def.name.clone();

        state.player[victim_idx].current_hp =
            (state.player[victim_idx].current_hp - final_damage).max(0.0);
        state.add_log_entry(
            format!(
                "{} hits hero {} for {:.0} physical",
                enemy_name, victim_hero_id, final_damage
            ),
            false,
        );

        if let Some(passive) = return_passive {
            let ratio = passive.return_damage_ratio.unwrap_or(0.0);
            if ratio > 0.0 && final_damage > 0.0 {
                let (enemy_armor, enemy_mr) = effective_armor_mr(
                    &state.enemy[enemy_idx].buffs,
                    enemy_def.base_armor,
                    enemy_def.base_magic_resist,
                );
                let return_type = passive.damage_type.unwrap_or(DamageType::Physical);
                let returned = apply_damage_by_type(
                    final_damage * ratio,
                    return_type,
                    enemy_armor,
                    enemy_mr,
                );
                let enemy = &mut state.enemy[enemy_idx];
                enemy.current_hp = (enemy.current_hp - returned).max(0.0);
                state.add_log_entry(
                    format!(
                        "Hero {} returns {:.0} damage to {}",
                        victim_hero_id, returned, enemy_name
                    ),
                    true,
                );
            }
        }

        state.enemy[enemy_idx].attack_timer = 0.0;
    }

    retarget_dead_enemies(state);
    check_result(state);
}

/// Ticks buffs on every unit: poison-style tick damage, heal over time, and
/// duration decay. Expired buffs are removed.
pub fn process_buffs(state: &mut BattleState, delta_time: f64, defs: &dyn BattleDefs) {
    if state.result.is_some() {
        return;
    }

    for hero_idx in 0..state.player.len() {
        let hero_id = state.player[hero_idx].hero_id;
        let (base_armor, base_mr) = defs
            .hero_def(hero_id)
            .map(|d| (d.base_armor, d.base_magic_resist))
            .unwrap_or((0.0, 0.0));
        let hero = &mut state.player[hero_idx];
        tick_unit_buffs(
            &mut hero.current_hp,
            hero.max_hp,
            &mut hero.buffs,
            base_armor,
            base_mr,
            delta_time,
        );
    }

    for enemy_idx in 0..state.enemy.len() {
        let (base_armor, base_mr) = get_enemy_def(&state.enemy[enemy_idx].enemy_def_id)
            .map(|d| (d.base_armor, d.base_magic_resist))
            .unwrap_or((0.0, 0.0));
        let enemy = &mut state.enemy[enemy_idx];
        tick_unit_buffs(
            &mut enemy.current_hp,
            enemy.max_hp,
            &mut enemy.buffs,
            base_armor,
            base_mr,
            delta_time,
        );
    }

    retarget_dead_enemies(state);
    check_result(state);
}

fn tick_unit_buffs(
    current_hp: &mut f64,
    max_hp: f64,
    buffs: &mut Vec<Buff>,
    base_armor: f64,
    base_magic_resist: f64,
    delta_time: f64,
) {
    if buffs.is_empty() {
        return;
    }
    let (armor, magic_resist) = effective_armor_mr(buffs, base_armor, base_magic_resist);

    let mut kept = Vec::with_capacity(buffs.len());
    for buff in buffs.drain(..) {
        let Some(def) = get_status_effect_def(&buff.id) else {
            kept.push(buff);
            continue;
        };
        let duration = buff.duration - delta_time;
        if duration <= 0.0 {
            continue;
        }

        if let Some(value) = buff.value.filter(|v| *v > 0.0) {
            if def.tick_damage {
                let raw = value * delta_time;
                let damage_type = def.tick_damage_type.unwrap_or(DamageType::Magical);
                let damage = apply_damage_by_type(raw, damage_type, armor, magic_resist);
                *current_hp = (*current_hp - damage).max(0.0);
            }
            if def.heal_per_second {
                *current_hp = (*current_hp + value * delta_time).min(max_hp);
            }
        }

        kept.push(Buff { duration, ..buff });
    }
    *buffs = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::create_battle_state;
    use crate::defs::StaticDefs;

    fn battle(heroes: &[u32], encounter: &str) -> BattleState {
        create_battle_state(heroes, encounter, 1, None, &StaticDefs).unwrap()
    }

    #[test]
    fn test_auto_attack_damages_target_and_resets_timer() {
        let mut state = battle(&[99], "wolf_pack");
        state.player[0].attack_timer = 2.0;
        let hp_before = state.enemy[0].current_hp;

        resolve_auto_attack(&mut state, 0, &StaticDefs);

        assert!(state.enemy[0].current_hp < hp_before);
        assert_eq!(state.player[0].attack_timer, 0.0);
        assert!(!state.combat_log.is_empty());
    }

    #[test]
    fn test_auto_attack_before_timer_fills_is_noop() {
        let mut state = battle(&[99], "wolf_pack");
        state.player[0].attack_timer = 0.5; // Bristleback interval is 1.2
        let hp_before = state.enemy[0].current_hp;
        resolve_auto_attack(&mut state, 0, &StaticDefs);
        assert_eq!(state.enemy[0].current_hp, hp_before);
    }

    #[test]
    fn test_non_focus_target_takes_reduced_damage() {
        let mut base = battle(&[99], "wolf_pack");
        base.player[0].attack_timer = 2.0;

        // Attack the focus target
        let mut on_focus = base.clone();
        on_focus.target_index = 0;
        on_focus.enemy_focused_index = 0;
        resolve_auto_attack(&mut on_focus, 0, &StaticDefs);
        let focus_damage = base.enemy[0].current_hp - on_focus.enemy[0].current_hp;

        // Same attack on a non-focus target (same def: small wolves at 1 and 2)
        let mut off_focus = base.clone();
        off_focus.target_index = 1;
        off_focus.enemy_focused_index = 2;
        resolve_auto_attack(&mut off_focus, 0, &StaticDefs);
        let off_damage = base.enemy[1].current_hp - off_focus.enemy[1].current_hp;

        // Different armor between targets, so compare against the raw ratio loosely
        assert!(off_damage > 0.0);
        assert!(
            off_damage < focus_damage,
            "non-focus damage {} should be below focus damage {}",
            off_damage,
            focus_damage
        );
    }

    #[test]
    fn test_hp_never_negative() {
        let mut state = battle(&[25], "dps_camp");
        state.enemy[0].current_hp = 0.1;
        state.player[0].attack_timer = 10.0;
        resolve_auto_attack(&mut state, 0, &StaticDefs);
        assert_eq!(state.enemy[0].current_hp, 0.0);
    }

    #[test]
    fn test_dead_enemy_stays_in_list_and_target_redirects() {
        let mut state = battle(&[99], "wolf_pack");
        state.enemy[0].current_hp = 0.0;
        state.target_index = 0;
        state.enemy_focused_index = 0;
        retarget_dead_enemies(&mut state);
        assert_eq!(state.enemy.len(), 3, "dead enemies remain for display");
        assert_eq!(state.target_index, 1);
        assert_eq!(state.enemy_focused_index, 1);
    }

    #[test]
    fn test_win_when_all_enemies_dead() {
        let mut state = battle(&[99], "wolf_pack");
        for enemy in &mut state.enemy {
            enemy.current_hp = 0.0;
        }
        check_result(&mut state);
        assert_eq!(state.result, Some(BattleResult::Win));
    }

    #[test]
    fn test_lose_when_all_players_dead() {
        let mut state = battle(&[99], "wolf_pack");
        state.player[0].current_hp = 0.0;
        check_result(&mut state);
        assert_eq!(state.result, Some(BattleResult::Lose));
    }

    #[test]
    fn test_simultaneous_wipe_awards_win() {
        let mut state = battle(&[99], "wolf_pack");
        for enemy in &mut state.enemy {
            enemy.current_hp = 0.0;
        }
        state.player[0].current_hp = 0.0;
        check_result(&mut state);
        assert_eq!(state.result, Some(BattleResult::Win));
    }

    #[test]
    fn test_result_is_terminal() {
        let mut state = battle(&[99], "wolf_pack");
        state.result = Some(BattleResult::Lose);
        for enemy in &mut state.enemy {
            enemy.current_hp = 0.0;
        }
        check_result(&mut state);
        assert_eq!(state.result, Some(BattleResult::Lose));
    }

    #[test]
    fn test_enemy_attack_hits_focused_hero() {
        let mut state = battle(&[99, 25], "wolf_pack");
        for enemy in &mut state.enemy {
            enemy.attack_timer = 10.0;
        }
        let hp_before = state.player[0].current_hp;
        resolve_enemy_actions(&mut state, &StaticDefs);
        assert!(state.player[0].current_hp < hp_before);
        assert_eq!(state.player[1].current_hp, state.player[1].max_hp);
        for enemy in &state.enemy {
            assert_eq!(enemy.attack_timer, 0.0);
        }
    }

    #[test]
    fn test_enemy_attack_redirects_when_focus_dead() {
        let mut state = battle(&[99, 25], "wolf_pack");
        state.player[0].current_hp = 0.0;
        for enemy in &mut state.enemy {
            enemy.attack_timer = 10.0;
        }
        let hp_before = state.player[1].current_hp;
        resolve_enemy_actions(&mut state, &StaticDefs);
        assert!(state.player[1].current_hp < hp_before);
    }

    #[test]
    fn test_return_damage_passive_reflects() {
        // Bristleback carries a 20% physical return passive
        let mut state = battle(&[99], "wolf_pack");
        state.enemy[0].attack_timer = 10.0;
        let enemy_hp_before = state.enemy[0].current_hp;
        resolve_enemy_actions(&mut state, &StaticDefs);
        assert!(
            state.enemy[0].current_hp < enemy_hp_before,
            "attacker should take return damage"
        );
    }

    #[test]
    fn test_no_return_damage_without_passive() {
        let mut state = battle(&[25], "wolf_pack");
        state.enemy[0].attack_timer = 10.0;
        let enemy_hp_before = state.enemy[0].current_hp;
        resolve_enemy_actions(&mut state, &StaticDefs);
        assert_eq!(state.enemy[0].current_hp, enemy_hp_before);
    }

    #[test]
    fn test_spell_applies_damage_and_rotates() {
        let mut state = battle(&[25], "wolf_pack"); // Lina: laguna_blade
        state.player[0].spell_timer = 20.0;
        let hp_before = state.enemy[0].current_hp;
        resolve_spell(&mut state, 0, &StaticDefs);
        assert!(state.enemy[0].current_hp < hp_before);
        assert_eq!(state.player[0].spell_timer, 0.0);
        assert_eq!(state.player[0].last_cast_ability_index, Some(0));
    }

    #[test]
    fn test_spell_applies_status_effect() {
        let mut state = battle(&[50], "wolf_pack"); // Dazzle: poison_touch
        state.player[0].spell_timer = 20.0;
        resolve_spell(&mut state, 0, &StaticDefs);
        assert!(state.enemy[0].buffs.iter().any(|b| b.id == "poison"));
    }

    #[test]
    fn test_passive_only_hero_never_casts() {
        let mut state = battle(&[99], "wolf_pack"); // Bristleback has no spell interval
        state.player[0].spell_timer = 100.0;
        let hp_before = state.enemy[0].current_hp;
        resolve_spell(&mut state, 0, &StaticDefs);
        assert_eq!(state.enemy[0].current_hp, hp_before);
        assert_eq!(state.player[0].spell_timer, 100.0);
    }

    #[test]
    fn test_poison_ticks_damage_and_expires() {
        let mut state = battle(&[50], "wolf_pack");
        state.enemy[0].buffs.push(Buff {
            id: "poison".to_string(),
            duration: 2.0,
            value: Some(10.0),
        });
        let hp_before = state.enemy[0].current_hp;

        process_buffs(&mut state, 1.0, &StaticDefs);
        assert!(state.enemy[0].current_hp < hp_before);
        assert_eq!(state.enemy[0].buffs.len(), 1);

        process_buffs(&mut state, 1.5, &StaticDefs);
        assert!(state.enemy[0].buffs.is_empty(), "expired buff is removed");
    }

    #[test]
    fn test_heal_buff_caps_at_max_hp() {
        let mut state = battle(&[50], "wolf_pack");
        state.player[0].current_hp = state.player[0].max_hp - 1.0;
        state.player[0].buffs.push(Buff {
            id: "regrowth".to_string(),
            duration: 5.0,
            value: Some(100.0),
        });
        process_buffs(&mut state, 1.0, &StaticDefs);
        assert_eq!(state.player[0].current_hp, state.player[0].max_hp);
    }
}
