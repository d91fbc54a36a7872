//! DamageReport - Outcome of one damage application

use crate::report::ReportEvent;
use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// Ordered event log plus running totals of one `damage_entity` call,
/// including every recursive sub-call it made
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageReport {
    // === Log ===
    /// Every observable consequence, in the order it happened
    pub events: Vec<ReportEvent>,

    // === Totals ===
    /// Armor points removed across all units
    pub armor_damage: u32,
    /// Internal structure and structural integrity removed across all units
    pub structure_damage: u32,
    /// Location visits made by transfer loops
    pub locations_visited: u32,
    /// Critical checks requested from the context
    pub critical_checks: u32,
}

impl DamageReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ReportEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = ReportEvent>) {
        self.events.extend(events);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Units destroyed during this call, in order
    pub fn destroyed_units(&self) -> Vec<UnitId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::UnitDestroyed { unit, .. } => Some(*unit),
                _ => None,
            })
            .collect()
    }

    /// Whether any unit was destroyed
    pub fn is_killing_blow(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, ReportEvent::UnitDestroyed { .. }))
    }

    /// Locations destroyed during this call, as (unit, location)
    pub fn destroyed_locations(&self) -> Vec<(UnitId, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::LocationDestroyed { unit, location } => Some((*unit, *location)),
                _ => None,
            })
            .collect()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.armor_damage > 0 {
            parts.push(format!("{} armor lost", self.armor_damage));
        }

        if self.structure_damage > 0 {
            parts.push(format!("{} structure lost", self.structure_damage));
        }

        let locations = self.destroyed_locations().len();
        if locations > 0 {
            parts.push(format!("{} location(s) destroyed", locations));
        }

        if self.critical_checks > 0 {
            parts.push(format!("{} critical check(s)", self.critical_checks));
        }

        if self.is_killing_blow() {
            parts.push("DESTROYED".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Serialize the whole report as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DestructionCause;

    #[test]
    fn test_empty_summary() {
        let report = DamageReport::new();
        assert_eq!(report.summary(), "No damage");
        assert!(!report.is_killing_blow());
    }

    #[test]
    fn test_summary_mentions_totals() {
        let mut report = DamageReport::new();
        report.armor_damage = 12;
        report.structure_damage = 3;
        report.push(ReportEvent::LocationDestroyed {
            unit: UnitId(1),
            location: 4,
        });

        let summary = report.summary();
        assert!(summary.contains("12 armor"));
        assert!(summary.contains("3 structure"));
        assert!(summary.contains("1 location"));
    }

    #[test]
    fn test_killing_blow_summary() {
        let mut report = DamageReport::new();
        report.push(ReportEvent::UnitDestroyed {
            unit: UnitId(2),
            cause: DestructionCause::LocationLost,
            salvageable: true,
            devastating: false,
        });

        assert!(report.summary().contains("DESTROYED"));
        assert_eq!(report.destroyed_units(), vec![UnitId(2)]);
    }

    #[test]
    fn test_report_to_json() {
        let mut report = DamageReport::new();
        report.push(ReportEvent::NoDamage { unit: UnitId(1) });
        let json = report.to_json().unwrap();
        assert!(json.contains("no_damage"));
    }
}
