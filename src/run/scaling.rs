//! Rift level scaling: enemy stats double each level.
//! Level 1 = 1x, level 2 = 2x, level N = 2^(N-1)x.

/// Stat multiplier for a rift level. Levels below 1 clamp to 1x.
pub fn level_multiplier(level: u32) -> f64 {
    if level < 1 {
        return 1.0;
    }
    2f64.powi(level as i32 - 1)
}

/// Scales an enemy combat stat (hp, damage) by the level multiplier.
pub fn scale_enemy_stat(base_stat: f64, level: u32) -> f64 {
    (base_stat * level_multiplier(level)).round()
}
