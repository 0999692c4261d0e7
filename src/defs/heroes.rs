//! Hero definitions keyed by the Dota 2 hero id used across the site
//! (Bristleback = 99, Lina = 25, Dazzle = 50 per OpenDota/Valve).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAttribute {
    Strength,
    Agility,
    Intelligence,
    Universal,
}

/// Base combat numbers for one hero. Intervals are in seconds; magic resist
/// is a 0-1 fraction. `base_spell_interval` is `None` for passive-only heroes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroDef {
    pub hero_id: u32,
    pub primary_attribute: PrimaryAttribute,
    pub base_attack_interval: f64,
    pub base_attack_damage: f64,
    pub base_max_hp: f64,
    pub base_armor: f64,
    pub base_magic_resist: f64,
    pub base_spell_interval: Option<f64>,
    pub ability_ids: Vec<String>,
    /// From training; reduces the effective attack interval.
    pub attack_speed: f64,
    /// From training; adds flat spell damage.
    pub spell_power: f64,
    /// From training; reduces the effective spell interval.
    pub spell_haste: f64,
}

/// Returns all built-in heroes.
pub fn get_all_heroes() -> Vec<HeroDef> {
    vec![
        HeroDef {
            hero_id: 99, // Bristleback
            primary_attribute: PrimaryAttribute::Strength,
            base_attack_interval: 1.2,
            base_attack_damage: 24.0,
            base_max_hp: 150.0,
            base_armor: 4.0,
            base_magic_resist: 0.25,
            base_spell_interval: None, // passive only
            ability_ids: vec!["bristleback_return".to_string()],
            attack_speed: 0.0,
            spell_power: 0.0,
            spell_haste: 0.0,
        },
        HeroDef {
            hero_id: 25, // Lina
            primary_attribute: PrimaryAttribute::Intelligence,
            base_attack_interval: 1.4,
            base_attack_damage: 21.0,
            base_max_hp: 100.0,
            base_armor: 1.0,
            base_magic_resist: 0.25,
            base_spell_interval: Some(10.0),
            ability_ids: vec!["laguna_blade".to_string()],
            attack_speed: 0.0,
            spell_power: 0.0,
            spell_haste: 0.0,
        },
        HeroDef {
            hero_id: 50, // Dazzle
            primary_attribute: PrimaryAttribute::Universal,
            base_attack_interval: 1.2,
            base_attack_damage: 22.0,
            base_max_hp: 120.0,
            base_armor: 2.0,
            base_magic_resist: 0.25,
            base_spell_interval: Some(8.0),
            ability_ids: vec!["poison_touch".to_string()],
            attack_speed: 0.0,
            spell_power: 0.0,
            spell_haste: 0.0,
        },
    ]
}

/// Gets a hero definition by id.
pub fn get_hero_def(hero_id: u32) -> Option<HeroDef> {
    get_all_heroes().into_iter().find(|h| h.hero_id == hero_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_hero_def_known_ids() {
        let bristleback = get_hero_def(99).unwrap();
        assert_eq!(bristleback.base_spell_interval, None);
        assert_eq!(bristleback.ability_ids, vec!["bristleback_return"]);

        let lina = get_hero_def(25).unwrap();
        assert_eq!(lina.base_spell_interval, Some(10.0));
    }

    #[test]
    fn test_get_hero_def_unknown_id() {
        assert!(get_hero_def(0).is_none());
        assert!(get_hero_def(9999).is_none());
    }

    #[test]
    fn test_all_heroes_have_sane_stats() {
        for hero in get_all_heroes() {
            assert!(hero.base_attack_interval > 0.0, "hero {}", hero.hero_id);
            assert!(hero.base_max_hp > 0.0, "hero {}", hero.hero_id);
            assert!(
                (0.0..1.0).contains(&hero.base_magic_resist),
                "hero {} magic resist out of range",
                hero.hero_id
            );
            assert!(!hero.ability_ids.is_empty(), "hero {}", hero.hero_id);
        }
    }
}
