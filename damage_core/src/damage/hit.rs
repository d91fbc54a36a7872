//! HitDescriptor - Where and how a hit arrives

use crate::types::{DamageCategory, UnitId};
use serde::{Deserialize, Serialize};

/// Describes the hit independent of its damage value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDescriptor {
    // === Placement ===
    /// Index into the struck unit's locations
    pub location: usize,
    /// Hit arrived from the rear arc
    #[serde(default)]
    pub rear: bool,

    // === Weapon ===
    #[serde(default)]
    pub category: DamageCategory,
    /// Damage is expressed in capital scale
    #[serde(default)]
    pub capital_scale: bool,
    /// Produced by a heat-causing weapon
    #[serde(default)]
    pub heat_weapon: bool,
    /// Skips armor and lands on internal structure
    #[serde(default)]
    pub direct_to_structure: bool,
    /// Damage from falling rather than from an attack
    #[serde(default)]
    pub fall: bool,
    /// Damage of the single weapon in a group, used for threshold checks
    #[serde(default)]
    pub single_weapon_value: Option<u32>,
    #[serde(default)]
    pub attacker: Option<UnitId>,

    // === Criticals ===
    /// Hit may cause criticals even when armor holds
    #[serde(default)]
    pub extra_critical_chance: bool,
    /// Base modifier for critical rolls caused by this hit
    #[serde(default)]
    pub critical_modifier: i32,
    /// Modifier for critical rolls granted by the extra-chance flag
    #[serde(default)]
    pub special_critical_modifier: i32,
    /// Glancing-blow modifier applied to special critical rolls
    #[serde(default)]
    pub glancing_modifier: i32,
}

impl HitDescriptor {
    pub fn new(location: usize) -> Self {
        HitDescriptor {
            location,
            rear: false,
            category: DamageCategory::default(),
            capital_scale: false,
            heat_weapon: false,
            direct_to_structure: false,
            fall: false,
            single_weapon_value: None,
            attacker: None,
            extra_critical_chance: false,
            critical_modifier: 0,
            special_critical_modifier: 0,
            glancing_modifier: 0,
        }
    }

    pub fn rear(mut self) -> Self {
        self.rear = true;
        self
    }

    pub fn with_category(mut self, category: DamageCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_attacker(mut self, attacker: UnitId) -> Self {
        self.attacker = Some(attacker);
        self
    }

    pub fn capital(mut self) -> Self {
        self.capital_scale = true;
        self
    }

    pub fn with_extra_critical_chance(mut self, special_modifier: i32) -> Self {
        self.extra_critical_chance = true;
        self.special_critical_modifier = special_modifier;
        self
    }

    /// Same hit placed on another location
    pub fn relocated(&self, location: usize) -> Self {
        HitDescriptor {
            location,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let hit = HitDescriptor::new(3)
            .rear()
            .with_category(DamageCategory::Energy)
            .with_extra_critical_chance(1);
        assert_eq!(hit.location, 3);
        assert!(hit.rear);
        assert!(hit.extra_critical_chance);
        assert_eq!(hit.special_critical_modifier, 1);
    }

    #[test]
    fn test_relocated_keeps_weapon_data() {
        let hit = HitDescriptor::new(1).with_category(DamageCategory::Missile).rear();
        let moved = hit.relocated(5);
        assert_eq!(moved.location, 5);
        assert_eq!(moved.category, DamageCategory::Missile);
        assert!(moved.rear);
    }
}
