//! Ready-made unit layouts
//!
//! Each template wires up locations, transfer targets and a typical set of
//! components for one archetype. The scenario runner and the tests build
//! their units from these.

use super::{AeroProfile, Component, ComponentKind, InfantryProfile, Location, Transfer, Unit};
use crate::types::{LocationRole, UnitArchetype, UnitId};

/// Location indices of a walker
pub mod walker {
    pub const HEAD: usize = 0;
    pub const CENTER_TORSO: usize = 1;
    pub const LEFT_TORSO: usize = 2;
    pub const RIGHT_TORSO: usize = 3;
    pub const LEFT_ARM: usize = 4;
    pub const RIGHT_ARM: usize = 5;
    pub const LEFT_LEG: usize = 6;
    pub const RIGHT_LEG: usize = 7;
}

/// Location indices of a ground vehicle
pub mod vehicle {
    pub const FRONT: usize = 0;
    pub const LEFT: usize = 1;
    pub const RIGHT: usize = 2;
    pub const REAR: usize = 3;
    pub const TURRET: usize = 4;
    pub const BODY: usize = 5;
    /// Only present on VTOLs
    pub const ROTOR: usize = 6;
}

/// Location indices of an aerospace fighter
pub mod aero {
    pub const NOSE: usize = 0;
    pub const LEFT_WING: usize = 1;
    pub const RIGHT_WING: usize = 2;
    pub const AFT: usize = 3;
}

/// Location indices of a protomech
pub mod proto {
    pub const HEAD: usize = 0;
    pub const TORSO: usize = 1;
    pub const LEFT_ARM: usize = 2;
    pub const RIGHT_ARM: usize = 3;
    pub const LEGS: usize = 4;
    pub const MAIN_GUN: usize = 5;
    pub const NEAR_MISS: usize = 6;
}

/// A medium walker with standard armor and structure
pub fn walker(id: UnitId, name: &str) -> Unit {
    use walker::*;

    let mut unit = Unit::new(id, name, UnitArchetype::Walker);
    unit.locations = vec![
        Location::new("Head", LocationRole::Head, 9, 3)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("Cockpit", ComponentKind::Cockpit))
            .with_component(Component::new("Sensors", ComponentKind::Sensors))
            .with_component(Component::new("Life Support", ComponentKind::LifeSupport)),
        Location::new("Center Torso", LocationRole::CenterTorso, 20, 16)
            .with_rear_armor(8)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("Fusion Engine", ComponentKind::Engine))
            .with_component(Component::new("Fusion Engine", ComponentKind::Engine))
            .with_component(Component::new("Fusion Engine", ComponentKind::Engine))
            .with_component(Component::new("Gyro", ComponentKind::Gyro)),
        Location::new("Left Torso", LocationRole::SideTorso, 15, 12)
            .with_rear_armor(5)
            .with_transfer(Transfer::Location(CENTER_TORSO))
            .with_component(Component::ammo("SRM-6 Ammo", 15, 12))
            .with_component(Component::new("SRM-6", ComponentKind::Weapon)),
        Location::new("Right Torso", LocationRole::SideTorso, 15, 12)
            .with_rear_armor(5)
            .with_transfer(Transfer::Location(CENTER_TORSO))
            .with_component(Component::new("Medium Laser", ComponentKind::Weapon))
            .with_component(Component::new("Heat Sink", ComponentKind::Other)),
        Location::new("Left Arm", LocationRole::Arm, 14, 8)
            .with_transfer(Transfer::Location(LEFT_TORSO))
            .with_component(Component::new("Shoulder", ComponentKind::Actuator))
            .with_component(Component::new("Large Laser", ComponentKind::Weapon)),
        Location::new("Right Arm", LocationRole::Arm, 14, 8)
            .with_transfer(Transfer::Location(RIGHT_TORSO))
            .with_component(Component::new("Shoulder", ComponentKind::Actuator))
            .with_component(Component::new("Autocannon/10", ComponentKind::Weapon)),
        Location::new("Left Leg", LocationRole::Leg, 18, 12)
            .with_transfer(Transfer::Location(LEFT_TORSO))
            .with_component(Component::new("Hip", ComponentKind::Actuator)),
        Location::new("Right Leg", LocationRole::Leg, 18, 12)
            .with_transfer(Transfer::Location(RIGHT_TORSO))
            .with_component(Component::new("Hip", ComponentKind::Actuator)),
    ];
    unit.locations[LEFT_TORSO].attached_limb = Some(LEFT_ARM);
    unit.locations[RIGHT_TORSO].attached_limb = Some(RIGHT_ARM);
    unit
}

/// A tracked tank with a turret
pub fn tank(id: UnitId, name: &str) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::Vehicle);
    unit.locations = vec![
        Location::new("Front", LocationRole::Front, 16, 5)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("Searchlight", ComponentKind::Searchlight)),
        Location::new("Left Side", LocationRole::Side, 12, 5).with_transfer(Transfer::Destroyed),
        Location::new("Right Side", LocationRole::Side, 12, 5).with_transfer(Transfer::Destroyed),
        Location::new("Rear", LocationRole::Rear, 8, 5).with_transfer(Transfer::Destroyed),
        Location::new("Turret", LocationRole::Turret, 14, 5)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("Autocannon/5", ComponentKind::Weapon)),
        Location::new("Body", LocationRole::Body, 0, 5)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("ICE Engine", ComponentKind::Engine))
            .with_component(Component::ammo("AC/5 Ammo", 20, 5)),
    ];
    unit
}

/// A VTOL: a vehicle with a rotor location and a mast-mounted sensor
pub fn vtol(id: UnitId, name: &str) -> Unit {
    let mut unit = tank(id, name);
    unit.locations[vehicle::BODY]
        .components
        .push(Component::new("Mast Sensors", ComponentKind::Sensors).rotor_mounted());
    unit.locations.push(
        Location::new("Rotor", LocationRole::Rotor, 2, 3).with_transfer(Transfer::Destroyed),
    );
    unit
}

/// Powered armor squad, one location per trooper
pub fn battle_armor(id: UnitId, name: &str, troopers: usize, armor: u32) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::PoweredInfantry);
    unit.locations = (0..troopers)
        .map(|i| {
            Location::new(&format!("Trooper {}", i + 1), LocationRole::Trooper, armor, 1)
                .with_transfer(Transfer::None)
        })
        .collect();
    unit.infantry = Some(InfantryProfile {
        environmental_sealing: true,
        ..Default::default()
    });
    unit
}

/// Conventional foot platoon; structure counts men, armor is the armor kit pool
pub fn platoon(id: UnitId, name: &str, men: u32, armor_kit: u32) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::ConventionalInfantry);
    unit.locations = vec![
        Location::new("Platoon", LocationRole::Platoon, armor_kit, men)
            .with_transfer(Transfer::Destroyed),
    ];
    unit.infantry = Some(InfantryProfile::default());
    unit
}

/// Aerospace fighter with a structural integrity pool
pub fn aerospace_fighter(id: UnitId, name: &str, structural_integrity: u32) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::Aerospace);
    let mut nose = Location::new("Nose", LocationRole::Nose, 20, 0)
        .with_component(Component::new("Large Laser", ComponentKind::Weapon))
        .with_component(Component::new("Avionics", ComponentKind::Sensors));
    nose.damage_threshold = Some(2);
    let mut left = Location::new("Left Wing", LocationRole::Wing, 15, 0)
        .with_component(Component::new("Medium Laser", ComponentKind::Weapon));
    left.damage_threshold = Some(2);
    let mut right = Location::new("Right Wing", LocationRole::Wing, 15, 0)
        .with_component(Component::new("Medium Laser", ComponentKind::Weapon));
    right.damage_threshold = Some(2);
    let mut aft = Location::new("Aft", LocationRole::Aft, 10, 0)
        .with_component(Component::new("Fusion Engine", ComponentKind::Engine))
        .with_component(Component::ammo("LRM-10 Ammo", 12, 10));
    aft.damage_threshold = Some(1);
    unit.locations = vec![nose, left, right, aft];
    unit.aero = Some(AeroProfile::new(structural_integrity));
    unit
}

/// Squadron of already rostered craft, one location per member
pub fn squadron(id: UnitId, name: &str, members: &[UnitId]) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::Squadron);
    unit.locations = members
        .iter()
        .enumerate()
        .map(|(i, _)| Location::new(&format!("Craft {}", i + 1), LocationRole::Hull, 0, 0))
        .collect();
    unit.squadron = members.to_vec();
    unit
}

/// ProtoMech with a near-miss slot; gliders track wing damage
pub fn protomech(id: UnitId, name: &str, glider: bool) -> Unit {
    use proto::*;

    let mut unit = Unit::new(id, name, UnitArchetype::ProtoMech);
    unit.locations = vec![
        Location::new("Head", LocationRole::Head, 2, 2).with_transfer(Transfer::Location(TORSO)),
        Location::new("Torso", LocationRole::CenterTorso, 8, 6)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("Cockpit", ComponentKind::Cockpit)),
        Location::new("Left Arm", LocationRole::Arm, 3, 2).with_transfer(Transfer::Location(TORSO)),
        Location::new("Right Arm", LocationRole::Arm, 3, 2)
            .with_transfer(Transfer::Location(TORSO)),
        Location::new("Legs", LocationRole::Leg, 6, 4).with_transfer(Transfer::Location(TORSO)),
        Location::new("Main Gun", LocationRole::MainGun, 3, 2)
            .with_transfer(Transfer::Location(TORSO))
            .with_component(Component::new("ER Medium Laser", ComponentKind::Weapon)),
        Location::new("Near Miss", LocationRole::NearMiss, 0, 0),
    ];
    unit.near_miss = Some(NEAR_MISS);
    unit.glider = glider;
    unit
}

/// Stationary gun emplacement
pub fn emplacement(id: UnitId, name: &str, armor: u32, structure: u32) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::Emplacement);
    unit.locations = vec![
        Location::new("Guns", LocationRole::Hull, armor, structure)
            .with_transfer(Transfer::Destroyed)
            .with_component(Component::new("Heavy Gun", ComponentKind::Weapon)),
    ];
    unit
}

/// Handheld device with only an armor shell
pub fn handheld(id: UnitId, name: &str, armor: u32) -> Unit {
    let mut unit = Unit::new(id, name, UnitArchetype::Handheld);
    unit.locations = vec![
        Location::new("Device", LocationRole::Hull, armor, 0).with_transfer(Transfer::Destroyed),
    ];
    unit
}
