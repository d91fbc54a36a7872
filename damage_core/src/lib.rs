//! damage_core - Damage resolution engine for hex-grid tactical combat units
//!
//! This library provides:
//! - Unit: Locations, materials, components and crew of a damageable unit
//! - DamageRequest: A hit and its situational flags
//! - damage_entity: Layered defenses, structural transfer and destruction
//! - GameContext: Dice, critical tables and other collaborators of the engine
//! - DamageReport: The ordered event log every call produces

pub mod combat;
pub mod config;
pub mod context;
pub mod damage;
pub mod defense;
pub mod prelude;
pub mod report;
pub mod types;
pub mod unit;

// Re-export core types for convenience
pub use combat::{damage_entity, damage_entity_with_rng, DamageError, DamageReport};
pub use config::{ConfigError, DamageConstants, Environment, GameOptions, RulesConfig};
pub use context::{GameContext, ScriptedContext, StandardContext};
pub use damage::{DamageRequest, HitDescriptor};
pub use report::{render_log, DestructionCause, ReportEvent};
pub use types::{
    ArmorMaterial, Coords, DamageCategory, DamageType, LocationRole, StructureMaterial,
    UnitArchetype, UnitId,
};
pub use unit::{Location, Transfer, Unit, UnitRoster};
