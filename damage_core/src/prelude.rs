//! Prelude module for convenient imports
//!
//! ```rust
//! use damage_core::prelude::*;
//! ```

// Units
pub use crate::types::{
    ArmorMaterial, Containment, LocationRole, StructureMaterial, UnitArchetype, UnitId,
};
pub use crate::unit::{
    templates, Component, ComponentKind, Crew, Location, Transfer, Unit, UnitRoster,
};

// Requests
pub use crate::damage::{DamageRequest, HitDescriptor};
pub use crate::types::{DamageCategory, DamageType};

// Resolution
pub use crate::combat::{damage_entity, damage_entity_with_rng, DamageError, DamageReport};
pub use crate::context::{GameContext, ScriptedContext, StandardContext};
pub use crate::report::{render_log, ReportEvent};

// Config
pub use crate::config::RulesConfig;
