//! Battle state construction.

use std::collections::VecDeque;

use crate::constants::FOCUS_CHANGE_COOLDOWN_SECONDS;
use crate::defs::{get_encounter_def, get_enemy_def, BattleDefs};
use crate::error::{EngineError, EngineResult};
use crate::run::scaling::scale_enemy_stat;

use super::types::{BattleState, EnemyInstance, HeroInstance};

/// Builds the initial battle state from a lineup and an encounter id.
///
/// Player heroes start with timers at zero and either full HP or the HP
/// carried over from the run (`initial_hero_hp`, matched by position; ignored
/// when the length differs from the lineup). Enemy HP and damage are scaled
/// by the rift level. Focus and target start at index 0.
pub fn create_battle_state(
    lineup_hero_ids: &[u32],
    encounter_id: &str,
    level: u32,
    initial_hero_hp: Option<&[f64]>,
    defs: &dyn BattleDefs,
) -> EngineResult<BattleState> {
    let carried_hp = initial_hero_hp.filter(|hp| hp.len() == lineup_hero_ids.len());

    let mut player = Vec::with_capacity(lineup_hero_ids.len());
    for (idx, &hero_id) in lineup_hero_ids.iter().enumerate() {
        let def = defs
            .hero_def(hero_id)
            .ok_or_else(|| EngineError::Validation(format!("unknown hero id: {}", hero_id)))?;
        let max_hp = def.base_max_hp;
        let current_hp = carried_hp
            .map(|hp| hp[idx].clamp(0.0, max_hp))
            .unwrap_or(max_hp);
        player.push(HeroInstance {
            hero_id,
            current_hp,
            max_hp,
            attack_timer: 0.0,
            spell_timer: 0.0,
            ability_ids: def.ability_ids.clone(),
            buffs: Vec::new(),
            last_cast_ability_index: None,
        });
    }

    let encounter = get_encounter_def(encounter_id)
        .ok_or_else(|| EngineError::Validation(format!("unknown encounter id: {}", encounter_id)))?;

    let mut enemy = Vec::new();
    for entry in &encounter.enemies {
        let def = get_enemy_def(&entry.enemy_def_id).ok_or_else(|| {
            EngineError::Validation(format!("unknown enemy def id: {}", entry.enemy_def_id))
        })?;
        let hp = scale_enemy_stat(def.hp, level);
        let damage = scale_enemy_stat(def.damage, level);
        for _ in 0..entry.count {
            enemy.push(EnemyInstance {
                enemy_def_id: def.id.clone(),
                current_hp: hp,
                max_hp: hp,
                attack_timer: 0.0,
                attack_damage: damage,
                buffs: Vec::new(),
            });
        }
    }

    Ok(BattleState {
        player,
        enemy,
        focused_hero_index: 0,
        target_index: 0,
        enemy_focused_index: 0,
        // Negative so the first focus change is allowed immediately.
        last_focus_change_at: -FOCUS_CHANGE_COOLDOWN_SECONDS,
        elapsed_time: 0.0,
        result: None,
        combat_log: VecDeque::new(),
    })
}
