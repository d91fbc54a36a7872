//! Combat resolution - Apply damage requests to units
//!
//! The engine is split by stage: `engine` holds the entry point and the
//! dispatcher, `cascade` the outer defensive layers and armor, `transfer`
//! the structural loop, `critical` the critical counters, `destruction` the
//! unit-wide consequences, and `aero`/`infantry` the archetype handlers.

mod aero;
mod cascade;
mod critical;
mod destruction;
mod engine;
mod infantry;
mod result;
mod transfer;

pub use engine::{damage_entity, damage_entity_with_rng};
pub use result::DamageReport;

use crate::types::UnitId;
use thiserror::Error;

/// Caller contract violations; game-rule edge cases are never errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DamageError {
    #[error("Unknown unit {0}")]
    UnknownUnit(UnitId),
    #[error("Unit {unit} has no location {location}")]
    InvalidLocation { unit: UnitId, location: usize },
    #[error("Transfer chain of unit {unit} loops back through location {location}")]
    TransferCycle { unit: UnitId, location: usize },
    #[error("Damage recursion exceeded depth {0}")]
    RecursionLimit(u32),
    #[error("Squadron {squadron} has no member at slot {slot}")]
    InvalidSquadronMember { squadron: UnitId, slot: usize },
}
