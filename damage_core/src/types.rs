//! Core enumerations and identifiers shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a unit inside a [`UnitRoster`](crate::unit::UnitRoster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        UnitId(id)
    }
}

/// Map position of a unit (offset hex coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub fn new(x: i32, y: i32) -> Self {
        Coords { x, y }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:02},{:02})", self.x, self.y)
    }
}

/// A die expression such as `2d6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
}

impl Dice {
    pub const D6: Dice = Dice { count: 1, sides: 6 };
    pub const TWO_D6: Dice = Dice { count: 2, sides: 6 };

    pub fn new(count: u32, sides: u32) -> Self {
        Dice { count, sides }
    }

    /// Smallest possible result
    pub fn min(&self) -> u32 {
        self.count
    }

    /// Largest possible result
    pub fn max(&self) -> u32 {
        self.count * self.sides
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Broad family of a damaged unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitArchetype {
    /// Walking war-machine with head, torsos and limbs
    Walker,
    /// Ground vehicle (tracked, wheeled, hover) or VTOL
    Vehicle,
    /// Squad of powered-armor troopers, one location per trooper
    PoweredInfantry,
    /// Unarmored or lightly armored foot platoon
    ConventionalInfantry,
    /// Fighter or small craft with a structural integrity pool
    Aerospace,
    /// Composite group of aerospace craft, one location per craft
    Squadron,
    /// Small walker with a near-miss slot in its hit table
    ProtoMech,
    /// Stationary gun emplacement
    Emplacement,
    /// Handheld device carried by another unit
    Handheld,
}

impl UnitArchetype {
    pub fn is_infantry(&self) -> bool {
        matches!(
            self,
            UnitArchetype::ConventionalInfantry | UnitArchetype::PoweredInfantry
        )
    }

    /// Archetypes that are never granted the neural-interface damage bonus
    pub fn is_infantry_or_proto(&self) -> bool {
        self.is_infantry() || *self == UnitArchetype::ProtoMech
    }

    /// Only walkers and vehicles can suffer an engine collapse
    pub fn has_engine_explosion_check(&self) -> bool {
        matches!(self, UnitArchetype::Walker | UnitArchetype::Vehicle)
    }

    /// Whether the crew can leave the unit by ejection
    pub fn can_eject(&self) -> bool {
        matches!(
            self,
            UnitArchetype::Walker | UnitArchetype::Vehicle | UnitArchetype::Aerospace
        )
    }
}

impl fmt::Display for UnitArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitArchetype::Walker => "walker",
            UnitArchetype::Vehicle => "vehicle",
            UnitArchetype::PoweredInfantry => "powered infantry",
            UnitArchetype::ConventionalInfantry => "infantry",
            UnitArchetype::Aerospace => "aerospace",
            UnitArchetype::Squadron => "squadron",
            UnitArchetype::ProtoMech => "protomech",
            UnitArchetype::Emplacement => "emplacement",
            UnitArchetype::Handheld => "handheld",
        };
        f.write_str(name)
    }
}

/// What part of the unit a location represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRole {
    Head,
    CenterTorso,
    SideTorso,
    Arm,
    Leg,
    Front,
    Side,
    Rear,
    Turret,
    Body,
    Rotor,
    Trooper,
    Platoon,
    Nose,
    Wing,
    Aft,
    MainGun,
    NearMiss,
    Hull,
}

impl LocationRole {
    pub fn is_head_equivalent(&self) -> bool {
        matches!(self, LocationRole::Head | LocationRole::Nose)
    }

    pub fn is_torso_equivalent(&self) -> bool {
        matches!(self, LocationRole::CenterTorso | LocationRole::SideTorso)
    }

    /// Locations that count as the body of the unit for ammunition explosions
    pub fn is_body_equivalent(&self) -> bool {
        self.is_torso_equivalent() || matches!(self, LocationRole::Body | LocationRole::Hull)
    }

    pub fn is_rear_facing(&self) -> bool {
        matches!(self, LocationRole::Rear | LocationRole::Aft)
    }
}

/// Armor material of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArmorMaterial {
    #[default]
    Standard,
    FerroFibrous,
    LightFerroFibrous,
    HeavyFerroFibrous,
    FerroLamellor,
    Reactive,
    Reflective,
    Hardened,
    BallisticReinforced,
    ImpactResistant,
    HeatDissipating,
    Ablative,
}

impl ArmorMaterial {
    pub fn is_fibrous(&self) -> bool {
        matches!(
            self,
            ArmorMaterial::FerroFibrous
                | ArmorMaterial::LightFerroFibrous
                | ArmorMaterial::HeavyFerroFibrous
        )
    }

    /// Materials that never contribute to the special critical counter
    pub fn blocks_special_criticals(&self) -> bool {
        matches!(
            self,
            ArmorMaterial::Hardened | ArmorMaterial::FerroLamellor | ArmorMaterial::Reactive
        )
    }
}

/// Internal structure material of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StructureMaterial {
    #[default]
    Standard,
    /// Takes double damage
    Composite,
    /// Takes half damage, rounding the remainder up
    Reinforced,
}

/// Category of the weapon or effect that produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DamageCategory {
    Energy,
    #[default]
    Ballistic,
    Missile,
    Physical,
    ArmorPiercing,
    ArmorPiercingMissile,
    IgnoresReduction,
    /// Munitions built to defeat advanced armor composites
    AntiExotic,
}

impl DamageCategory {
    /// Categories that defeat ferro-lamellor reduction
    pub fn bypasses_lamellor(&self) -> bool {
        matches!(
            self,
            DamageCategory::ArmorPiercing
                | DamageCategory::ArmorPiercingMissile
                | DamageCategory::IgnoresReduction
                | DamageCategory::AntiExotic
        )
    }

    pub fn is_missile(&self) -> bool {
        matches!(
            self,
            DamageCategory::Missile | DamageCategory::ArmorPiercingMissile
        )
    }

    pub fn is_ballistic_family(&self) -> bool {
        matches!(
            self,
            DamageCategory::Ballistic
                | DamageCategory::ArmorPiercing
                | DamageCategory::Missile
                | DamageCategory::ArmorPiercingMissile
        )
    }
}

/// Special damage type carried by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Standard,
    Fragmentation,
    NonPenetrating,
    Incendiary,
    Acid,
    AntiPersonnelChemical,
    NailRivet,
    /// Damage that is never intercepted by exterior riders
    IgnoreRider,
}

/// Ammunition containment fitted to a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    #[default]
    None,
    Case,
    CaseII,
}

impl Containment {
    pub fn is_present(&self) -> bool {
        *self != Containment::None
    }
}

/// Neural interface installed in the cockpit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuralInterface {
    /// Direct neural interface; grants the +1 damage feedback
    Direct,
    /// Buffered interface; feedback damage without the bonus
    Buffered,
    /// Prototype interface with its own injury targets
    Prototype,
}

/// Strength class of a deflector field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeflectorKind {
    Light,
    Medium,
    Heavy,
}

impl DeflectorKind {
    /// Fraction of incoming damage the field takes, as (numerator, denominator)
    pub fn fraction(&self) -> (u32, u32) {
        match self {
            DeflectorKind::Light => (1, 4),
            DeflectorKind::Medium => (1, 2),
            DeflectorKind::Heavy => (3, 4),
        }
    }
}
