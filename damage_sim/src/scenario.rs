//! Scenario files: a seed, the rules, the units and the hits to resolve

use damage_core::config::{load_toml, ConfigError};
use damage_core::prelude::*;
use damage_core::Coords;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unit {unit} has no location {location} to patch")]
    UnknownLocation { unit: UnitId, location: usize },
    #[error("Unit {0} is defined twice")]
    DuplicateUnit(UnitId),
}

/// Unit layout to start from, with the template's own parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum Template {
    Walker,
    Tank,
    Vtol,
    BattleArmor { troopers: usize, armor: u32 },
    Platoon {
        men: u32,
        #[serde(default)]
        armor_kit: u32,
    },
    AerospaceFighter { structural_integrity: u32 },
    Squadron { members: Vec<UnitId> },
    Protomech {
        #[serde(default)]
        glider: bool,
    },
    Emplacement { armor: u32, structure: u32 },
    Handheld { armor: u32 },
}

/// Per-location overrides applied after the template is built
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPatch {
    pub index: usize,
    pub armor: Option<u32>,
    pub rear_armor: Option<u32>,
    pub structure: Option<u32>,
    pub armor_material: Option<ArmorMaterial>,
    pub bar_rating: Option<u32>,
    pub modular_armor: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitEntry {
    pub id: UnitId,
    pub name: String,
    #[serde(flatten)]
    pub template: Template,
    #[serde(default)]
    pub position: Option<Coords>,
    #[serde(default)]
    pub blast_containment: bool,
    #[serde(default)]
    pub patches: Vec<LocationPatch>,
}

impl UnitEntry {
    pub fn build(&self) -> Result<Unit, ScenarioError> {
        let (id, name) = (self.id, self.name.as_str());
        let mut unit = match &self.template {
            Template::Walker => templates::walker(id, name),
            Template::Tank => templates::tank(id, name),
            Template::Vtol => templates::vtol(id, name),
            Template::BattleArmor { troopers, armor } => {
                templates::battle_armor(id, name, *troopers, *armor)
            }
            Template::Platoon { men, armor_kit } => templates::platoon(id, name, *men, *armor_kit),
            Template::AerospaceFighter {
                structural_integrity,
            } => templates::aerospace_fighter(id, name, *structural_integrity),
            Template::Squadron { members } => templates::squadron(id, name, members),
            Template::Protomech { glider } => templates::protomech(id, name, *glider),
            Template::Emplacement { armor, structure } => {
                templates::emplacement(id, name, *armor, *structure)
            }
            Template::Handheld { armor } => templates::handheld(id, name, *armor),
        };

        unit.position = self.position;
        unit.blast_containment |= self.blast_containment;

        for patch in &self.patches {
            let location = unit
                .location_mut(patch.index)
                .ok_or(ScenarioError::UnknownLocation {
                    unit: id,
                    location: patch.index,
                })?;
            if let Some(armor) = patch.armor {
                location.armor = armor;
            }
            if let Some(rear) = patch.rear_armor {
                location.rear_armor = Some(rear);
            }
            if let Some(structure) = patch.structure {
                location.structure = structure;
            }
            if let Some(material) = patch.armor_material {
                location.armor_material = material;
            }
            if let Some(bar) = patch.bar_rating {
                location.bar_rating = bar;
            }
            if let Some(modular) = patch.modular_armor {
                location.modular_armor = modular;
            }
        }
        Ok(unit)
    }
}

/// A complete scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
    #[serde(default)]
    pub hits: Vec<DamageRequest>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let scenario: Scenario = load_toml(path)?;
        scenario.rules.validate()?;
        Ok(scenario)
    }

    pub fn roster(&self) -> Result<UnitRoster, ScenarioError> {
        let mut roster = UnitRoster::new();
        for entry in &self.units {
            if roster.insert(entry.build()?).is_some() {
                return Err(ScenarioError::DuplicateUnit(entry.id));
            }
        }
        Ok(roster)
    }
}
