//! DamageRequest - One hit worth of damage aimed at one unit

use super::hit::HitDescriptor;
use crate::types::{DamageType, UnitId};
use serde::{Deserialize, Serialize};

/// Input of the engine: a unit, a hit and an amount with situational flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRequest {
    pub unit: UnitId,
    pub hit: HitDescriptor,
    pub damage: u32,

    // === Situation ===
    #[serde(default)]
    pub ammo_explosion: bool,
    #[serde(default)]
    pub area_saturation: bool,
    /// Attacker is inside the defender's front arc
    #[serde(default)]
    pub through_front_arc: bool,
    #[serde(default)]
    pub underwater: bool,
    #[serde(default)]
    pub nuclear_ship_to_ship: bool,
    #[serde(default)]
    pub damage_type: DamageType,
}

impl DamageRequest {
    pub fn new(unit: UnitId, hit: HitDescriptor, damage: u32) -> Self {
        DamageRequest {
            unit,
            hit,
            damage,
            ammo_explosion: false,
            area_saturation: false,
            through_front_arc: false,
            underwater: false,
            nuclear_ship_to_ship: false,
            damage_type: DamageType::Standard,
        }
    }

    /// Ammunition explosion inside the unit itself; goes straight to structure
    pub fn ammo_explosion(unit: UnitId, location: usize, damage: u32) -> Self {
        let mut hit = HitDescriptor::new(location);
        hit.direct_to_structure = true;
        DamageRequest {
            ammo_explosion: true,
            ..DamageRequest::new(unit, hit, damage)
        }
    }

    pub fn area_saturation(mut self) -> Self {
        self.area_saturation = true;
        self
    }

    pub fn through_front_arc(mut self) -> Self {
        self.through_front_arc = true;
        self
    }

    pub fn underwater(mut self) -> Self {
        self.underwater = true;
        self
    }

    pub fn with_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    /// The same situation redirected at another unit and location
    pub fn redirected(&self, unit: UnitId, location: usize, damage: u32) -> Self {
        DamageRequest {
            unit,
            hit: self.hit.relocated(location),
            damage,
            ..self.clone()
        }
    }
}
