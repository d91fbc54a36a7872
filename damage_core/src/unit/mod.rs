//! Unit - The damageable entity and the roster that owns every unit in play

mod component;
mod crew;
mod location;
pub mod templates;

pub use component::{Component, ComponentKind};
pub use crew::Crew;
pub use location::{Location, Transfer};

use crate::types::{Coords, DeflectorKind, LocationRole, NeuralInterface, UnitArchetype, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A unit riding on the outside (or inside) of another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub unit: UnitId,
    /// Location of the carrier the passenger clings to
    pub location: usize,
    /// Exterior riders intercept damage aimed at their location
    pub exterior: bool,
}

/// Another unit held in one of the carrier's locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub unit: UnitId,
    pub location: usize,
}

/// Conventional and powered infantry specifics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfantryProfile {
    /// Incoming damage is divided by this before the pools are hit
    #[serde(default = "default_divisor")]
    pub damage_divisor: f64,
    /// Dug in or inside a building
    #[serde(default)]
    pub in_cover: bool,
    /// Sealed against vacuum
    #[serde(default)]
    pub environmental_sealing: bool,
}

fn default_divisor() -> f64 {
    1.0
}

impl Default for InfantryProfile {
    fn default() -> Self {
        InfantryProfile {
            damage_divisor: default_divisor(),
            in_cover: false,
            environmental_sealing: false,
        }
    }
}

/// Aerospace structural integrity pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeroProfile {
    pub structural_integrity: u32,
    pub max_structural_integrity: u32,
}

impl AeroProfile {
    pub fn new(structural_integrity: u32) -> Self {
        AeroProfile {
            structural_integrity,
            max_structural_integrity: structural_integrity,
        }
    }
}

/// Deflector field projected over some of a unit's locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectorField {
    pub kind: DeflectorKind,
    /// Points the field can still absorb
    pub points: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Locations covered by the field
    pub covers: Vec<usize>,
}

fn default_active() -> bool {
    true
}

/// Complete damage-relevant state of one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    // === Identity ===
    pub id: UnitId,
    pub name: String,
    pub archetype: UnitArchetype,
    #[serde(default)]
    pub position: Option<Coords>,

    // === Structure ===
    pub locations: Vec<Location>,
    #[serde(default)]
    pub crew: Crew,
    #[serde(default)]
    pub capital_scale: bool,

    // === Systems ===
    #[serde(default)]
    pub neural_interface: Option<NeuralInterface>,
    /// Halves ammunition explosion damage before anything else
    #[serde(default)]
    pub blast_containment: bool,
    #[serde(default)]
    pub deflector: Option<DeflectorField>,
    /// Damage already taken by the head cowl; `None` when no cowl is fitted
    #[serde(default)]
    pub cowl: Option<u32>,
    #[serde(default)]
    pub engine_hits: u32,

    // === Archetype Data ===
    #[serde(default)]
    pub infantry: Option<InfantryProfile>,
    #[serde(default)]
    pub aero: Option<AeroProfile>,
    /// Member craft of a squadron, indexed by location
    #[serde(default)]
    pub squadron: Vec<UnitId>,
    /// Hit-table slot that resolves as a near miss
    #[serde(default)]
    pub near_miss: Option<usize>,
    #[serde(default)]
    pub glider: bool,
    #[serde(default)]
    pub wing_hits: u32,

    // === Riders & Cargo ===
    #[serde(default)]
    pub passengers: Vec<Passenger>,
    #[serde(default)]
    pub swarmed_by: Option<UnitId>,
    #[serde(default)]
    pub cargo: Vec<Cargo>,

    // === State ===
    #[serde(default)]
    pub destroyed: bool,
    #[serde(default)]
    pub salvageable: bool,
}

impl Unit {
    /// Create a unit with no locations
    pub fn new(id: UnitId, name: &str, archetype: UnitArchetype) -> Self {
        Unit {
            id,
            name: name.to_string(),
            archetype,
            position: None,
            locations: Vec::new(),
            crew: Crew::default(),
            capital_scale: false,
            neural_interface: None,
            blast_containment: false,
            deflector: None,
            cowl: None,
            engine_hits: 0,
            infantry: None,
            aero: None,
            squadron: Vec::new(),
            near_miss: None,
            glider: false,
            wing_hits: 0,
            passengers: Vec::new(),
            swarmed_by: None,
            cargo: Vec::new(),
            destroyed: false,
            salvageable: false,
        }
    }

    pub fn location(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn location_mut(&mut self, index: usize) -> Option<&mut Location> {
        self.locations.get_mut(index)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Indices of locations that still stand
    pub fn living_locations(&self) -> Vec<usize> {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.destroyed && l.role != LocationRole::NearMiss)
            .map(|(i, _)| i)
            .collect()
    }

    /// True once no damageable location remains
    pub fn all_locations_destroyed(&self) -> bool {
        self.living_locations().is_empty()
    }

    pub fn total_armor(&self) -> u32 {
        self.locations
            .iter()
            .filter(|l| !l.destroyed)
            .map(|l| l.armor + l.rear_armor.unwrap_or(0) + l.modular_armor)
            .sum()
    }

    pub fn total_structure(&self) -> u32 {
        let locations: u32 = self
            .locations
            .iter()
            .filter(|l| !l.destroyed)
            .map(|l| l.structure)
            .sum();
        locations + self.aero.as_ref().map_or(0, |a| a.structural_integrity)
    }

    /// Damage this unit can soak before it is gone; caps rider interception
    pub fn absorb_capacity(&self) -> u32 {
        if self.destroyed {
            return 0;
        }
        self.total_armor() + self.total_structure()
    }

    /// Exterior rider holding on at the given location
    pub fn exterior_rider_at(&self, location: usize) -> Option<UnitId> {
        self.passengers
            .iter()
            .find(|p| p.exterior && p.location == location)
            .map(|p| p.unit)
    }

    /// Cargo held in the given location
    pub fn cargo_at(&self, location: usize) -> Vec<UnitId> {
        self.cargo
            .iter()
            .filter(|c| c.location == location)
            .map(|c| c.unit)
            .collect()
    }

    /// Every ammunition store currently being jettisoned, as (location, slot)
    pub fn dumping_stores(&self) -> Vec<(usize, usize)> {
        let mut stores = Vec::new();
        for (loc_idx, location) in self.locations.iter().enumerate() {
            for (slot, component) in location.components.iter().enumerate() {
                if component.is_dumping() {
                    stores.push((loc_idx, slot));
                }
            }
        }
        stores
    }

    /// Whether the crew may eject at all
    pub fn can_eject(&self) -> bool {
        self.archetype.can_eject() && self.crew.is_active()
    }
}

/// Every unit taking part in an engagement, keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitRoster {
    units: BTreeMap<UnitId, Unit>,
}

impl UnitRoster {
    pub fn new() -> Self {
        UnitRoster {
            units: BTreeMap::new(),
        }
    }

    /// Add a unit, replacing any unit with the same id
    pub fn insert(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.id, unit)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }
}

impl FromIterator<Unit> for UnitRoster {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        let mut roster = UnitRoster::new();
        for unit in iter {
            roster.insert(unit);
        }
        roster
    }
}
