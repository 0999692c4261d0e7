//! Static reference data: hero, ability, enemy, encounter, and status effect
//! definitions consumed by the battle engine and run service.
//!
//! Built-in tables cover the starter roster; callers with database-backed
//! definitions inject them through [`BattleDefs`].

pub mod abilities;
pub mod encounters;
pub mod heroes;
pub mod status_effects;

pub use abilities::{get_ability_def, AbilityDef, AbilityKind, AbilityTarget, AbilityTrigger, StatusEffectOnHit};
pub use encounters::{get_encounter_def, get_enemy_def, EncounterDef, EncounterEntry, EnemyDef};
pub use heroes::{get_hero_def, HeroDef, PrimaryAttribute};
pub use status_effects::{get_status_effect_def, StatusEffectDef};

use serde::{Deserialize, Serialize};

/// Damage type: physical (reduced by armor), magical (reduced by magic
/// resist), pure (no reduction). Auto-attacks are always physical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Magical,
    Pure,
}

/// Hero and ability definition lookup used by the battle engine. The default
/// implementation serves the built-in tables; a database-backed provider can
/// substitute per-save definitions (trained stats, unlocked abilities).
pub trait BattleDefs {
    fn hero_def(&self, hero_id: u32) -> Option<HeroDef>;
    fn ability_def(&self, ability_id: &str) -> Option<AbilityDef>;
}

/// Serves the built-in definition tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDefs;

impl BattleDefs for StaticDefs {
    fn hero_def(&self, hero_id: u32) -> Option<HeroDef> {
        get_hero_def(hero_id)
    }

    fn ability_def(&self, ability_id: &str) -> Option<AbilityDef> {
        get_ability_def(ability_id)
    }
}
