//! ReportEvent - Structured record of one observable consequence

use crate::types::{ArmorMaterial, Coords, UnitId};
use serde::{Deserialize, Serialize};

/// Why the pre-modifier stage changed the damage value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    CapitalToStandard,
    StandardToCapital,
    Fragmentation,
    NonPenetrating,
    Incendiary,
    Acid,
    NailRivet,
    Exposure,
    Vacuum,
    NeuralFeedback,
    BlastContainment,
    InfantryDivisor,
}

/// What finished a unit off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestructionCause {
    LocationLost,
    AmmunitionExplosion,
    EngineCollapse,
    EngineHits,
    CrewKilled,
    StructuralIntegrity,
    SquadWiped,
    RotorLost,
}

/// One entry of the ordered damage log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    // === Informational ===
    NoDamage { unit: UnitId },
    UnitAlreadyDestroyed { unit: UnitId },
    LocationAlreadyDestroyed { unit: UnitId, location: usize },
    NearMiss { unit: UnitId },
    WingDamaged { unit: UnitId, wing_hits: u32 },
    SquadronRedirect { squadron: UnitId, craft: UnitId, location: usize },
    DamageAdjusted { unit: UnitId, reason: Adjustment, before: u32, after: u32 },

    // === Defensive Layers ===
    DeflectorAbsorbed { unit: UnitId, location: usize, absorbed: u32, remaining: u32 },
    CowlAbsorbed { unit: UnitId, absorbed: u32, remaining: u32 },
    SearchlightDestroyed { unit: UnitId, location: usize },
    ModularArmorAbsorbed { unit: UnitId, location: usize, absorbed: u32, remaining: u32 },
    RiderStruck { carrier: UnitId, rider: UnitId, damage: u32 },
    SwarmerStruck { carrier: UnitId, swarmer: UnitId, damage: u32 },
    DumpedAmmoDetonated { unit: UnitId, location: usize, damage: u32 },
    ArmorEffect { unit: UnitId, location: usize, material: ArmorMaterial, before: u32, after: u32 },
    ArmorDamaged { unit: UnitId, location: usize, rear: bool, damage: u32, remaining: u32 },
    ArmorDestroyed { unit: UnitId, location: usize, rear: bool },

    // === Structure ===
    StructureDamaged { unit: UnitId, location: usize, damage: u32, remaining: u32 },
    LocationDestroyed { unit: UnitId, location: usize },
    DamageTransferred { unit: UnitId, from: usize, to: usize, damage: u32 },
    DamageVented { unit: UnitId, location: usize, damage: u32 },
    DamageLost { unit: UnitId, location: usize, damage: u32 },
    StructuralIntegrityDamaged { unit: UnitId, damage: u32, remaining: u32 },

    // === Criticals ===
    CriticalRoll { unit: UnitId, location: usize, roll: u32, modifier: i32, hits: u32 },
    ThresholdExceeded { unit: UnitId, location: usize, damage: u32, threshold: u32 },
    ComponentDestroyed { unit: UnitId, location: usize, component: String },
    EngineHit { unit: UnitId, total: u32 },
    AmmoExplosion { unit: UnitId, location: usize, component: String, damage: u32 },
    RotorEquipmentDestroyed { unit: UnitId, location: usize, component: String },
    HullBreach { unit: UnitId, location: usize },

    // === Crew ===
    CrewStunned { unit: UnitId, turns: u32 },
    CrewKilled { unit: UnitId },
    CrewDoomed { unit: UnitId },
    CrewEjected { unit: UnitId, forced: bool, headshot: bool },
    CrewInjured { unit: UnitId, points: u32, total: u32 },

    // === Destruction ===
    LimbSevered { unit: UnitId, location: usize },
    DebrisPlaced { unit: UnitId, position: Coords },
    CargoDropped { carrier: UnitId, cargo: UnitId },
    EngineExplosion { unit: UnitId },
    UnitDestroyed { unit: UnitId, cause: DestructionCause, salvageable: bool, devastating: bool },
    AreaExplosion { unit: UnitId, position: Option<Coords>, damage_levels: Vec<u32> },
}

impl ReportEvent {
    /// Stable numeric message code for presentation layers
    pub fn code(&self) -> u16 {
        match self {
            ReportEvent::NoDamage { .. } => 6000,
            ReportEvent::UnitAlreadyDestroyed { .. } => 6001,
            ReportEvent::LocationAlreadyDestroyed { .. } => 6002,
            ReportEvent::NearMiss { .. } => 6005,
            ReportEvent::WingDamaged { .. } => 6006,
            ReportEvent::SquadronRedirect { .. } => 6008,
            ReportEvent::DamageAdjusted { .. } => 6010,
            ReportEvent::DeflectorAbsorbed { .. } => 6020,
            ReportEvent::CowlAbsorbed { .. } => 6021,
            ReportEvent::SearchlightDestroyed { .. } => 6022,
            ReportEvent::ModularArmorAbsorbed { .. } => 6023,
            ReportEvent::RiderStruck { .. } => 6024,
            ReportEvent::SwarmerStruck { .. } => 6025,
            ReportEvent::DumpedAmmoDetonated { .. } => 6026,
            ReportEvent::ArmorEffect { .. } => 6030,
            ReportEvent::ArmorDamaged { .. } => 6031,
            ReportEvent::ArmorDestroyed { .. } => 6032,
            ReportEvent::StructureDamaged { .. } => 6040,
            ReportEvent::LocationDestroyed { .. } => 6041,
            ReportEvent::DamageTransferred { .. } => 6042,
            ReportEvent::DamageVented { .. } => 6043,
            ReportEvent::DamageLost { .. } => 6044,
            ReportEvent::StructuralIntegrityDamaged { .. } => 6045,
            ReportEvent::CriticalRoll { .. } => 6050,
            ReportEvent::ThresholdExceeded { .. } => 6051,
            ReportEvent::ComponentDestroyed { .. } => 6052,
            ReportEvent::EngineHit { .. } => 6053,
            ReportEvent::AmmoExplosion { .. } => 6054,
            ReportEvent::RotorEquipmentDestroyed { .. } => 6055,
            ReportEvent::HullBreach { .. } => 6056,
            ReportEvent::CrewStunned { .. } => 6060,
            ReportEvent::CrewKilled { .. } => 6061,
            ReportEvent::CrewDoomed { .. } => 6062,
            ReportEvent::CrewEjected { .. } => 6063,
            ReportEvent::CrewInjured { .. } => 6064,
            ReportEvent::LimbSevered { .. } => 6070,
            ReportEvent::DebrisPlaced { .. } => 6071,
            ReportEvent::CargoDropped { .. } => 6072,
            ReportEvent::EngineExplosion { .. } => 6073,
            ReportEvent::UnitDestroyed { .. } => 6074,
            ReportEvent::AreaExplosion { .. } => 6075,
        }
    }

    /// Unit the event is primarily about
    pub fn unit(&self) -> UnitId {
        match self {
            ReportEvent::NoDamage { unit }
            | ReportEvent::UnitAlreadyDestroyed { unit }
            | ReportEvent::LocationAlreadyDestroyed { unit, .. }
            | ReportEvent::NearMiss { unit }
            | ReportEvent::WingDamaged { unit, .. }
            | ReportEvent::DamageAdjusted { unit, .. }
            | ReportEvent::DeflectorAbsorbed { unit, .. }
            | ReportEvent::CowlAbsorbed { unit, .. }
            | ReportEvent::SearchlightDestroyed { unit, .. }
            | ReportEvent::ModularArmorAbsorbed { unit, .. }
            | ReportEvent::DumpedAmmoDetonated { unit, .. }
            | ReportEvent::ArmorEffect { unit, .. }
            | ReportEvent::ArmorDamaged { unit, .. }
            | ReportEvent::ArmorDestroyed { unit, .. }
            | ReportEvent::StructureDamaged { unit, .. }
            | ReportEvent::LocationDestroyed { unit, .. }
            | ReportEvent::DamageTransferred { unit, .. }
            | ReportEvent::DamageVented { unit, .. }
            | ReportEvent::DamageLost { unit, .. }
            | ReportEvent::StructuralIntegrityDamaged { unit, .. }
            | ReportEvent::CriticalRoll { unit, .. }
            | ReportEvent::ThresholdExceeded { unit, .. }
            | ReportEvent::ComponentDestroyed { unit, .. }
            | ReportEvent::EngineHit { unit, .. }
            | ReportEvent::AmmoExplosion { unit, .. }
            | ReportEvent::RotorEquipmentDestroyed { unit, .. }
            | ReportEvent::HullBreach { unit, .. }
            | ReportEvent::CrewStunned { unit, .. }
            | ReportEvent::CrewKilled { unit }
            | ReportEvent::CrewDoomed { unit }
            | ReportEvent::CrewEjected { unit, .. }
            | ReportEvent::CrewInjured { unit, .. }
            | ReportEvent::LimbSevered { unit, .. }
            | ReportEvent::DebrisPlaced { unit, .. }
            | ReportEvent::EngineExplosion { unit }
            | ReportEvent::UnitDestroyed { unit, .. }
            | ReportEvent::AreaExplosion { unit, .. } => *unit,
            ReportEvent::SquadronRedirect { squadron, .. } => *squadron,
            ReportEvent::RiderStruck { carrier, .. }
            | ReportEvent::SwarmerStruck { carrier, .. }
            | ReportEvent::CargoDropped { carrier, .. } => *carrier,
        }
    }
}
