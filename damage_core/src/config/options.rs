//! Optional rules toggled per game

use serde::{Deserialize, Serialize};

/// Optional rules; everything except the damage-scaled critical bonus is off by default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOptions {
    /// Destroying ammunition explosions spill into the surrounding hexes
    #[serde(default)]
    pub advanced_ammunition: bool,
    /// Destroyed walkers and vehicles may suffer an engine collapse
    #[serde(default)]
    pub engine_explosions: bool,
    /// Crews with the ability eject instead of dying to a head or torso kill
    #[serde(default)]
    pub skin_of_the_teeth: bool,
    /// Threshold checks use the applied damage rather than the single weapon value
    #[serde(default)]
    pub aero_sanity: bool,
    /// Structural integrity takes full damage instead of half
    #[serde(default)]
    pub strict_aero_damage: bool,
    /// Impact-resistant armor loses its special critical bonus
    #[serde(default)]
    pub strict_impact_resistance: bool,
    /// Heat-dissipating armor halves heat weapon damage
    #[serde(default)]
    pub heat_dissipating_armor: bool,
    /// +1 critical modifier per 5 points of damage above the first
    #[serde(default = "default_true")]
    pub damage_scaled_critical_bonus: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            advanced_ammunition: false,
            engine_explosions: false,
            skin_of_the_teeth: false,
            aero_sanity: false,
            strict_aero_damage: false,
            strict_impact_resistance: false,
            heat_dissipating_armor: false,
            damage_scaled_critical_bonus: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GameOptions::default();
        assert!(!options.advanced_ammunition);
        assert!(options.damage_scaled_critical_bonus);
    }

    #[test]
    fn test_partial_options_keep_defaults() {
        let options: GameOptions = toml::from_str("engine_explosions = true").unwrap();
        assert!(options.engine_explosions);
        assert!(options.damage_scaled_critical_bonus);
    }
}
