//! Component - Equipment installed in a location

use serde::{Deserialize, Serialize};

/// What an installed component is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
    Weapon,
    /// Ammunition or ordnance store
    Ammo {
        shots: u32,
        damage_per_shot: u32,
        /// Currently being jettisoned
        #[serde(default)]
        dumping: bool,
    },
    Engine,
    Gyro,
    Cockpit,
    Sensors,
    LifeSupport,
    Actuator,
    Searchlight,
    Other,
}

/// A piece of equipment occupying a critical slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    #[serde(default)]
    pub destroyed: bool,
    /// Mounted on the rotor mast of a VTOL
    #[serde(default)]
    pub rotor_mounted: bool,
}

impl Component {
    pub fn new(name: &str, kind: ComponentKind) -> Self {
        Component {
            name: name.to_string(),
            kind,
            destroyed: false,
            rotor_mounted: false,
        }
    }

    /// Create an ammunition store
    pub fn ammo(name: &str, shots: u32, damage_per_shot: u32) -> Self {
        Component::new(
            name,
            ComponentKind::Ammo {
                shots,
                damage_per_shot,
                dumping: false,
            },
        )
    }

    pub fn rotor_mounted(mut self) -> Self {
        self.rotor_mounted = true;
        self
    }

    /// Damage released if this store detonates now
    pub fn explosive_damage(&self) -> u32 {
        match self.kind {
            ComponentKind::Ammo {
                shots,
                damage_per_shot,
                ..
            } if !self.destroyed => shots * damage_per_shot,
            _ => 0,
        }
    }

    pub fn is_dumping(&self) -> bool {
        matches!(self.kind, ComponentKind::Ammo { dumping: true, shots, .. } if shots > 0)
            && !self.destroyed
    }

    /// Empty the store, returning the damage it held
    pub fn expend(&mut self) -> u32 {
        let damage = self.explosive_damage();
        if let ComponentKind::Ammo { shots, dumping, .. } = &mut self.kind {
            *shots = 0;
            *dumping = false;
        }
        self.destroyed = true;
        damage
    }
}
