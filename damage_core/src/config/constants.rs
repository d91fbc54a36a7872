//! Tunable damage constants

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Numbers the engine reads instead of hard-coding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Flat bonus incendiary damage deals to conventional infantry
    #[serde(default = "default_incendiary_bonus")]
    pub incendiary_infantry_bonus: u32,
    /// Damage cap for acid against advanced armor
    #[serde(default = "default_acid_fixed")]
    pub acid_fixed_damage: u32,
    /// Points a fresh head cowl absorbs
    #[serde(default = "default_cowl_capacity")]
    pub cowl_capacity: u32,
    /// 1d6 result at or below which a swarmer intercepts the hit
    #[serde(default = "default_swarm_target")]
    pub swarm_intercept_target: u32,
    /// 2d6 result at or above which the engine collapses
    #[serde(default = "default_engine_explosion_target")]
    pub engine_explosion_target: u32,
    /// 2d6 result at or above which neural feedback injures the crew
    #[serde(default = "default_neural_target")]
    pub neural_injury_target: u32,
    /// Prototype interface: 2d6 needed to avoid injury after armor-only damage
    #[serde(default = "default_prototype_armor_target")]
    pub prototype_armor_target: u32,
    /// Prototype interface: 2d6 needed to avoid injury after internal damage
    #[serde(default = "default_prototype_internal_target")]
    pub prototype_internal_target: u32,
    /// Turns a vehicle crew stays stunned after a contained explosion
    #[serde(default = "default_stun_turns")]
    pub crew_stun_turns: u32,
    /// Nesting limit for rider, swarmer, cargo and detonation recursion
    #[serde(default = "default_max_depth")]
    pub max_recursion_depth: u32,
    /// 2d6 + modifier results giving one, two and three critical hits
    #[serde(default = "default_critical_thresholds")]
    pub critical_thresholds: [i32; 3],
    /// 2d6 result at or above which a hull breach occurs
    #[serde(default = "default_breach_target")]
    pub breach_target: u32,
    /// Injury points that kill a crew
    #[serde(default = "default_max_injuries")]
    pub max_crew_injuries: u32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            incendiary_infantry_bonus: default_incendiary_bonus(),
            acid_fixed_damage: default_acid_fixed(),
            cowl_capacity: default_cowl_capacity(),
            swarm_intercept_target: default_swarm_target(),
            engine_explosion_target: default_engine_explosion_target(),
            neural_injury_target: default_neural_target(),
            prototype_armor_target: default_prototype_armor_target(),
            prototype_internal_target: default_prototype_internal_target(),
            crew_stun_turns: default_stun_turns(),
            max_recursion_depth: default_max_depth(),
            critical_thresholds: default_critical_thresholds(),
            breach_target: default_breach_target(),
            max_crew_injuries: default_max_injuries(),
        }
    }
}

impl DamageConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_recursion_depth == 0 {
            return Err(ConfigError::ValidationError(
                "max_recursion_depth must be at least 1".to_string(),
            ));
        }
        let [one, two, three] = self.critical_thresholds;
        if !(one <= two && two <= three) {
            return Err(ConfigError::ValidationError(format!(
                "critical_thresholds must be ascending, got {:?}",
                self.critical_thresholds
            )));
        }
        if self.max_crew_injuries == 0 {
            return Err(ConfigError::ValidationError(
                "max_crew_injuries must be at least 1".to_string(),
            ));
        }
        if self.swarm_intercept_target > 6 {
            return Err(ConfigError::ValidationError(format!(
                "swarm_intercept_target {} is outside 1d6",
                self.swarm_intercept_target
            )));
        }
        Ok(())
    }

    /// Critical hits owed for a modified 2d6 result
    pub fn critical_hits_for(&self, roll: i32) -> u32 {
        let [one, two, three] = self.critical_thresholds;
        if roll >= three {
            3
        } else if roll >= two {
            2
        } else if roll >= one {
            1
        } else {
            0
        }
    }
}

fn default_incendiary_bonus() -> u32 {
    2
}
fn default_acid_fixed() -> u32 {
    3
}
fn default_cowl_capacity() -> u32 {
    3
}
fn default_swarm_target() -> u32 {
    2
}
fn default_engine_explosion_target() -> u32 {
    12
}
fn default_neural_target() -> u32 {
    7
}
fn default_prototype_armor_target() -> u32 {
    6
}
fn default_prototype_internal_target() -> u32 {
    8
}
fn default_stun_turns() -> u32 {
    2
}
fn default_max_depth() -> u32 {
    8
}
fn default_critical_thresholds() -> [i32; 3] {
    [8, 10, 12]
}
fn default_breach_target() -> u32 {
    10
}
fn default_max_injuries() -> u32 {
    6
}
