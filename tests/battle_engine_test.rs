//! Whole-fight behavior of the battle engine driven through the public tick
//! API, the way a request handler drives it.

use riftrun::battle::{create_battle_state, tick, BattleResult, BattleState, TickOptions};
use riftrun::constants::FOCUS_CHANGE_COOLDOWN_SECONDS;
use riftrun::defs::StaticDefs;

fn battle(heroes: &[u32], encounter: &str, level: u32) -> BattleState {
    create_battle_state(heroes, encounter, level, None, &StaticDefs).unwrap()
}

fn run_to_completion(state: &mut BattleState, max_seconds: f64) {
    let mut elapsed = 0.0;
    while state.result.is_none() && elapsed < max_seconds {
        tick(state, 0.5, TickOptions::default(), &StaticDefs);
        elapsed += 0.5;
    }
}

#[test]
fn test_starter_lineup_clears_the_starter_pack() {
    let mut state = battle(&[99, 25, 50], "wolf_pack", 1);
    run_to_completion(&mut state, 600.0);

    assert_eq!(state.result, Some(BattleResult::Win));
    assert!(state.all_enemies_dead());
    let enemy_hp: f64 = state.enemy.iter().map(|e| e.current_hp).sum();
    assert_eq!(enemy_hp, 0.0);
    assert_eq!(state.enemy.len(), 3, "dead enemies remain in the list");
}

#[test]
fn test_hp_never_goes_negative_in_a_long_fight() {
    let mut state = battle(&[99, 25, 50], "armor_camp", 1);
    let mut elapsed = 0.0;
    while state.result.is_none() && elapsed < 600.0 {
        tick(&mut state, 0.5, TickOptions::default(), &StaticDefs);
        elapsed += 0.5;
        for hero in &state.player {
            assert!(hero.current_hp >= 0.0);
        }
        for enemy in &state.enemy {
            assert!(enemy.current_hp >= 0.0);
        }
    }
    assert!(state.result.is_some());
}

#[test]
fn test_outmatched_lineup_dies_and_stays_listed() {
    let mut state = battle(&[25], "skull_lord_boss", 5);
    run_to_completion(&mut state, 3600.0);

    assert_eq!(state.result, Some(BattleResult::Lose));
    assert!(state.all_players_dead());
    assert_eq!(state.player.len(), 1, "dead heroes remain in the list");
}

#[test]
fn test_finished_battle_ignores_further_ticks() {
    let mut state = battle(&[99, 25, 50], "wolf_pack", 1);
    run_to_completion(&mut state, 600.0);
    let frozen = state.clone();

    tick(&mut state, 5.0, TickOptions::default(), &StaticDefs);
    assert_eq!(state, frozen);
}

#[test]
fn test_focus_change_via_tick_respects_cooldown() {
    let mut state = battle(&[99, 25, 50], "wolf_pack", 1);

    tick(
        &mut state,
        0.1,
        TickOptions {
            focus_change: Some(1),
            target_change: None,
        },
        &StaticDefs,
    );
    assert_eq!(state.focused_hero_index, 1);

    // Within the cooldown window the next change is ignored
    tick(
        &mut state,
        0.1,
        TickOptions {
            focus_change: Some(2),
            target_change: None,
        },
        &StaticDefs,
    );
    assert_eq!(state.focused_hero_index, 1);

    tick(
        &mut state,
        FOCUS_CHANGE_COOLDOWN_SECONDS,
        TickOptions {
            focus_change: Some(2),
            target_change: None,
        },
        &StaticDefs,
    );
    assert_eq!(state.focused_hero_index, 2);
}

#[test]
fn test_target_change_steers_damage() {
    let mut state = battle(&[99], "wolf_pack", 1);
    let hp_before: Vec<f64> = state.enemy.iter().map(|e| e.current_hp).collect();

    // Aim at the last wolf; stay under the wolves' attack intervals so no
    // return damage muddies the other enemies' HP
    for _ in 0..4 {
        tick(
            &mut state,
            0.5,
            TickOptions {
                focus_change: None,
                target_change: Some(2),
            },
            &StaticDefs,
        );
    }

    assert!(state.enemy[2].current_hp < hp_before[2]);
    assert_eq!(state.enemy[1].current_hp, hp_before[1]);
}

#[test]
fn test_elapsed_time_tracks_every_tick() {
    let mut state = battle(&[99], "wolf_pack", 1);
    for _ in 0..7 {
        tick(&mut state, 0.25, TickOptions::default(), &StaticDefs);
    }
    assert!((state.elapsed_time - 1.75).abs() < 1e-9);
}

#[test]
fn test_battle_log_records_the_fight() {
    let mut state = battle(&[99, 25, 50], "wolf_pack", 1);
    run_to_completion(&mut state, 600.0);
    assert!(!state.combat_log.is_empty());
    assert!(state.combat_log.iter().any(|e| e.is_player_action));
    assert!(state.combat_log.iter().any(|e| !e.is_player_action));
}
