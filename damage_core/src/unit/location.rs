//! Location - One armored section of a unit

use super::component::{Component, ComponentKind};
use crate::types::{ArmorMaterial, Containment, LocationRole, StructureMaterial};
use serde::{Deserialize, Serialize};

/// Where damage goes once a location's internal structure is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Transfer {
    /// Continue at another location of the same unit
    Location(usize),
    /// Losing this location destroys the whole unit
    Destroyed,
    /// Remaining damage is lost
    #[default]
    None,
}

/// A single location of a unit (arm, turret, trooper, wing...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    // === Identity ===
    pub name: String,
    pub role: LocationRole,

    // === Defenses ===
    pub armor: u32,
    /// Separate rear armor, only present on torso-equivalent walker locations
    #[serde(default)]
    pub rear_armor: Option<u32>,
    pub structure: u32,
    #[serde(default)]
    pub armor_material: ArmorMaterial,
    #[serde(default)]
    pub structure_material: StructureMaterial,
    /// Barrier armor rating; anything at or below 5 is low-rated
    #[serde(default = "default_bar_rating")]
    pub bar_rating: u32,
    /// Add-on plating consumed before the armor proper
    #[serde(default)]
    pub modular_armor: u32,
    #[serde(default)]
    pub containment: Containment,
    /// Aerospace damage threshold
    #[serde(default)]
    pub damage_threshold: Option<u32>,

    // === Topology ===
    #[serde(default)]
    pub transfer: Transfer,
    /// Limb severed when this location is destroyed
    #[serde(default)]
    pub attached_limb: Option<usize>,

    // === Contents ===
    #[serde(default)]
    pub components: Vec<Component>,

    // === State ===
    #[serde(default)]
    pub destroyed: bool,
    #[serde(default)]
    pub armor_destroyed: bool,
    #[serde(default)]
    pub rear_armor_destroyed: bool,
    /// Set whenever internal structure took damage
    #[serde(default)]
    pub internal_damaged: bool,
    /// Hardened armor ledger: one half-point already spent
    #[serde(default)]
    pub hardened_half_point: bool,
    #[serde(default)]
    pub rear_hardened_half_point: bool,
    #[serde(default)]
    pub breached: bool,
}

fn default_bar_rating() -> u32 {
    10
}

impl Location {
    /// Create an intact location with standard materials
    pub fn new(name: &str, role: LocationRole, armor: u32, structure: u32) -> Self {
        Location {
            name: name.to_string(),
            role,
            armor,
            rear_armor: None,
            structure,
            armor_material: ArmorMaterial::Standard,
            structure_material: StructureMaterial::Standard,
            bar_rating: default_bar_rating(),
            modular_armor: 0,
            containment: Containment::None,
            damage_threshold: None,
            transfer: Transfer::None,
            attached_limb: None,
            components: Vec::new(),
            destroyed: false,
            armor_destroyed: false,
            rear_armor_destroyed: false,
            internal_damaged: false,
            hardened_half_point: false,
            rear_hardened_half_point: false,
            breached: false,
        }
    }

    pub fn with_rear_armor(mut self, rear: u32) -> Self {
        self.rear_armor = Some(rear);
        self
    }

    pub fn with_transfer(mut self, transfer: Transfer) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn with_armor_material(mut self, material: ArmorMaterial) -> Self {
        self.armor_material = material;
        self
    }

    pub fn with_structure_material(mut self, material: StructureMaterial) -> Self {
        self.structure_material = material;
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Armor value facing the given arc
    pub fn armor_value(&self, rear: bool) -> u32 {
        match (rear, self.rear_armor) {
            (true, Some(rear_armor)) => rear_armor,
            _ => self.armor,
        }
    }

    /// Set the armor facing the given arc, flagging it destroyed at zero
    pub fn set_armor_value(&mut self, rear: bool, value: u32) {
        match (rear, self.rear_armor.is_some()) {
            (true, true) => {
                self.rear_armor = Some(value);
                if value == 0 {
                    self.rear_armor_destroyed = true;
                }
            }
            _ => {
                self.armor = value;
                if value == 0 {
                    self.armor_destroyed = true;
                }
            }
        }
    }

    /// Hardened half-point ledger of the armor facing the given arc
    pub fn half_point(&self, rear: bool) -> bool {
        match (rear, self.rear_armor.is_some()) {
            (true, true) => self.rear_hardened_half_point,
            _ => self.hardened_half_point,
        }
    }

    pub fn set_half_point(&mut self, rear: bool, spent: bool) {
        match (rear, self.rear_armor.is_some()) {
            (true, true) => self.rear_hardened_half_point = spent,
            _ => self.hardened_half_point = spent,
        }
    }

    /// Armor plus structure still standing between a hit and destruction
    pub fn remaining_points(&self) -> u32 {
        if self.destroyed {
            return 0;
        }
        self.armor + self.rear_armor.unwrap_or(0) + self.structure
    }

    /// Whether the location counts as low-rated barrier armor
    pub fn is_low_rated(&self) -> bool {
        self.bar_rating <= 5
    }

    /// Whether the location carries barrier armor below the standard rating
    pub fn is_bar_rated(&self) -> bool {
        self.bar_rating < 10
    }

    /// Mark the location destroyed; its components go with it
    pub fn destroy(&mut self) {
        self.structure = 0;
        self.armor = 0;
        if self.rear_armor.is_some() {
            self.rear_armor = Some(0);
        }
        self.destroyed = true;
        for component in &mut self.components {
            component.destroyed = true;
        }
    }

    /// Intact components that can be picked by a critical hit
    pub fn critical_slots(&self) -> Vec<usize> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.destroyed)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether an intact searchlight is mounted here
    pub fn has_searchlight(&self) -> bool {
        self.components
            .iter()
            .any(|c| !c.destroyed && c.kind == ComponentKind::Searchlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rear_armor_selection() {
        let mut loc = Location::new("CT", LocationRole::CenterTorso, 20, 10).with_rear_armor(6);
        assert_eq!(loc.armor_value(false), 20);
        assert_eq!(loc.armor_value(true), 6);

        loc.set_armor_value(true, 0);
        assert!(loc.rear_armor_destroyed);
        assert!(!loc.armor_destroyed);
        assert_eq!(loc.armor, 20);
    }

    #[test]
    fn test_rear_flag_without_rear_armor_uses_front() {
        let mut loc = Location::new("LA", LocationRole::Arm, 8, 5);
        assert_eq!(loc.armor_value(true), 8);
        loc.set_armor_value(true, 3);
        assert_eq!(loc.armor, 3);
    }

    #[test]
    fn test_destroy_clears_components() {
        let mut loc = Location::new("LT", LocationRole::SideTorso, 10, 8)
            .with_component(Component::new("Medium Laser", ComponentKind::Weapon));
        loc.destroy();
        assert!(loc.destroyed);
        assert_eq!(loc.remaining_points(), 0);
        assert!(loc.critical_slots().is_empty());
    }

    #[test]
    fn test_bar_classification() {
        let mut loc = Location::new("Front", LocationRole::Front, 10, 3);
        assert!(!loc.is_bar_rated());
        loc.bar_rating = 5;
        assert!(loc.is_bar_rated());
        assert!(loc.is_low_rated());
        loc.bar_rating = 7;
        assert!(!loc.is_low_rated());
    }
}
