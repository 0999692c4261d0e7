//! Enemy and encounter definitions.
//!
//! Enemy packs are scaled so ~30s of auto-attacks from a three-hero lineup
//! clears a combat pack without wiping the roster (enemies focus the front
//! liner).

use serde::{Deserialize, Serialize};

/// Enemy unit definition: HP, attack cadence, damage, defensive stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub hp: f64,
    /// Seconds between attacks.
    pub attack_interval: f64,
    /// Physical auto-attack damage.
    pub damage: f64,
    pub base_armor: f64,
    /// 0-1 fraction.
    pub base_magic_resist: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub enemy_def_id: String,
    pub count: u32,
}

/// Encounter definition: the roster of enemies spawned for one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDef {
    pub id: String,
    pub enemies: Vec<EncounterEntry>,
}

fn enemy(id: &str, name: &str, hp: f64, attack_interval: f64, damage: f64, armor: f64, magic_resist: f64) -> EnemyDef {
    EnemyDef {
        id: id.to_string(),
        name: name.to_string(),
        hp,
        attack_interval,
        damage,
        base_armor: armor,
        base_magic_resist: magic_resist,
    }
}

/// Returns all built-in enemy defs.
pub fn get_all_enemies() -> Vec<EnemyDef> {
    vec![
        enemy("large_wolf", "Large Wolf", 700.0, 3.0, 4.0, 15.0, 0.25),
        enemy("small_wolf", "Small Wolf", 250.0, 2.5, 2.0, 8.0, 0.15),
        enemy("armored_brute", "Armored Brute", 600.0, 3.5, 3.0, 35.0, 0.05),
        enemy("arcane_wisp", "Arcane Wisp", 400.0, 2.2, 2.0, 5.0, 0.4),
        enemy("frenzy_rat", "Frenzy Rat", 200.0, 1.2, 8.0, 5.0, 0.1),
        enemy("skull_lord", "Skull Lord", 2500.0, 4.0, 5.0, 20.0, 0.3),
    ]
}

fn pack(id: &str, enemies: &[(&str, u32)]) -> EncounterDef {
    EncounterDef {
        id: id.to_string(),
        enemies: enemies
            .iter()
            .map(|(enemy_def_id, count)| EncounterEntry {
                enemy_def_id: enemy_def_id.to_string(),
                count: *count,
            })
            .collect(),
    }
}

/// Returns all built-in encounters.
pub fn get_all_encounters() -> Vec<EncounterDef> {
    vec![
        pack("wolf_pack", &[("large_wolf", 1), ("small_wolf", 2)]),
        pack("armor_camp", &[("armored_brute", 2), ("arcane_wisp", 1)]),
        pack("dps_camp", &[("frenzy_rat", 3)]),
        pack("mixed_camp", &[("armored_brute", 1), ("frenzy_rat", 2)]),
        pack("elite_camp", &[("armored_brute", 2), ("arcane_wisp", 2)]),
        pack("skull_lord_boss", &[("skull_lord", 1)]),
    ]
}

/// Gets an enemy definition by id.
pub fn get_enemy_def(id: &str) -> Option<EnemyDef> {
    get_all_enemies().into_iter().find(|e| e.id == id)
}

/// Gets an encounter definition by id.
pub fn get_encounter_def(id: &str) -> Option<EncounterDef> {
    get_all_encounters().into_iter().find(|e| e.id == id)
}
