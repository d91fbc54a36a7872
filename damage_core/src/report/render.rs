//! Text rendering of report events
//!
//! The engine only ever produces structured events; this module is the
//! presentation side that turns them into log lines.

use super::event::{Adjustment, DestructionCause, ReportEvent};
use crate::types::UnitId;
use crate::unit::UnitRoster;

fn unit_name(roster: &UnitRoster, id: UnitId) -> String {
    roster
        .get(id)
        .map(|u| format!("{} {}", u.name, id))
        .unwrap_or_else(|| format!("unit {}", id))
}

fn location_name(roster: &UnitRoster, id: UnitId, location: usize) -> String {
    roster
        .get(id)
        .and_then(|u| u.location(location))
        .map(|l| l.name.clone())
        .unwrap_or_else(|| format!("location {}", location))
}

fn adjustment_text(reason: Adjustment) -> &'static str {
    match reason {
        Adjustment::CapitalToStandard => "capital-scale damage converted",
        Adjustment::StandardToCapital => "standard-scale damage converted",
        Adjustment::Fragmentation => "fragmentation",
        Adjustment::NonPenetrating => "non-penetrating",
        Adjustment::Incendiary => "incendiary",
        Adjustment::Acid => "acid",
        Adjustment::NailRivet => "nail/rivet",
        Adjustment::Exposure => "caught in the open",
        Adjustment::Vacuum => "vacuum exposure",
        Adjustment::NeuralFeedback => "neural feedback",
        Adjustment::BlastContainment => "blast containment",
        Adjustment::InfantryDivisor => "infantry damage divisor",
    }
}

fn cause_text(cause: DestructionCause) -> &'static str {
    match cause {
        DestructionCause::LocationLost => "vital location lost",
        DestructionCause::AmmunitionExplosion => "ammunition explosion",
        DestructionCause::EngineCollapse => "engine collapse",
        DestructionCause::EngineHits => "engine destroyed",
        DestructionCause::CrewKilled => "crew killed",
        DestructionCause::StructuralIntegrity => "structural integrity collapse",
        DestructionCause::SquadWiped => "all troopers lost",
        DestructionCause::RotorLost => "rotor destroyed",
    }
}

/// Render one event as a line of text
pub fn render(event: &ReportEvent, roster: &UnitRoster) -> String {
    let name = |id: UnitId| unit_name(roster, id);
    let loc = |id: UnitId, location: usize| location_name(roster, id, location);

    match event {
        ReportEvent::NoDamage { unit } => format!("{} takes no damage", name(*unit)),
        ReportEvent::UnitAlreadyDestroyed { unit } => {
            format!("{} is already destroyed", name(*unit))
        }
        ReportEvent::LocationAlreadyDestroyed { unit, location } => {
            format!("{} {} is already gone", name(*unit), loc(*unit, *location))
        }
        ReportEvent::NearMiss { unit } => format!("near miss on {}", name(*unit)),
        ReportEvent::WingDamaged { unit, wing_hits } => {
            format!("{} wings damaged ({} hits)", name(*unit), wing_hits)
        }
        ReportEvent::SquadronRedirect {
            squadron,
            craft,
            location,
        } => format!(
            "hit on {} lands on {} {}",
            name(*squadron),
            name(*craft),
            loc(*craft, *location)
        ),
        ReportEvent::DamageAdjusted {
            unit,
            reason,
            before,
            after,
        } => format!(
            "{}: {} changes damage {} -> {}",
            name(*unit),
            adjustment_text(*reason),
            before,
            after
        ),
        ReportEvent::DeflectorAbsorbed {
            unit,
            absorbed,
            remaining,
            ..
        } => format!(
            "{} deflector absorbs {} ({} left)",
            name(*unit),
            absorbed,
            remaining
        ),
        ReportEvent::CowlAbsorbed {
            unit,
            absorbed,
            remaining,
        } => format!(
            "{} cowl absorbs {} ({} left)",
            name(*unit),
            absorbed,
            remaining
        ),
        ReportEvent::SearchlightDestroyed { unit, .. } => {
            format!("{} searchlight destroyed", name(*unit))
        }
        ReportEvent::ModularArmorAbsorbed {
            unit,
            location,
            absorbed,
            remaining,
        } => format!(
            "{} {} modular armor absorbs {} ({} left)",
            name(*unit),
            loc(*unit, *location),
            absorbed,
            remaining
        ),
        ReportEvent::RiderStruck {
            carrier,
            rider,
            damage,
        } => format!(
            "{} riding {} takes {} damage",
            name(*rider),
            name(*carrier),
            damage
        ),
        ReportEvent::SwarmerStruck {
            carrier,
            swarmer,
            damage,
        } => format!(
            "{} swarming {} takes {} damage",
            name(*swarmer),
            name(*carrier),
            damage
        ),
        ReportEvent::DumpedAmmoDetonated {
            unit,
            location,
            damage,
        } => format!(
            "dumped ammunition in {} {} detonates for {}",
            name(*unit),
            loc(*unit, *location),
            damage
        ),
        ReportEvent::ArmorEffect {
            unit,
            location,
            material,
            before,
            after,
        } => format!(
            "{} {} {:?} armor changes damage {} -> {}",
            name(*unit),
            loc(*unit, *location),
            material,
            before,
            after
        ),
        ReportEvent::ArmorDamaged {
            unit,
            location,
            rear,
            damage,
            remaining,
        } => format!(
            "{} {}{} armor takes {} ({} left)",
            name(*unit),
            loc(*unit, *location),
            if *rear { " (rear)" } else { "" },
            damage,
            remaining
        ),
        ReportEvent::ArmorDestroyed {
            unit,
            location,
            rear,
        } => format!(
            "{} {}{} armor destroyed",
            name(*unit),
            loc(*unit, *location),
            if *rear { " (rear)" } else { "" }
        ),
        ReportEvent::StructureDamaged {
            unit,
            location,
            damage,
            remaining,
        } => format!(
            "{} {} structure takes {} ({} left)",
            name(*unit),
            loc(*unit, *location),
            damage,
            remaining
        ),
        ReportEvent::LocationDestroyed { unit, location } => {
            format!("{} {} DESTROYED", name(*unit), loc(*unit, *location))
        }
        ReportEvent::DamageTransferred {
            unit,
            from,
            to,
            damage,
        } => format!(
            "{} damage transfers from {} to {} on {}",
            damage,
            loc(*unit, *from),
            loc(*unit, *to),
            name(*unit)
        ),
        ReportEvent::DamageVented {
            unit,
            location,
            damage,
        } => format!(
            "containment in {} {} vents {} damage",
            name(*unit),
            loc(*unit, *location),
            damage
        ),
        ReportEvent::DamageLost {
            unit,
            location,
            damage,
        } => format!(
            "{} damage past {} {} is lost",
            damage,
            name(*unit),
            loc(*unit, *location)
        ),
        ReportEvent::StructuralIntegrityDamaged {
            unit,
            damage,
            remaining,
        } => format!(
            "{} structural integrity takes {} ({} left)",
            name(*unit),
            damage,
            remaining
        ),
        ReportEvent::CriticalRoll {
            unit,
            location,
            roll,
            modifier,
            hits,
        } => format!(
            "critical check on {} {}: rolled {} ({:+}), {} hit(s)",
            name(*unit),
            loc(*unit, *location),
            roll,
            modifier,
            hits
        ),
        ReportEvent::ThresholdExceeded {
            unit,
            location,
            damage,
            threshold,
        } => format!(
            "{} {} threshold {} exceeded by {}",
            name(*unit),
            loc(*unit, *location),
            threshold,
            damage
        ),
        ReportEvent::ComponentDestroyed {
            unit,
            location,
            component,
        } => format!(
            "{} {} {} destroyed",
            name(*unit),
            loc(*unit, *location),
            component
        ),
        ReportEvent::EngineHit { unit, total } => {
            format!("{} engine hit ({} total)", name(*unit), total)
        }
        ReportEvent::AmmoExplosion {
            unit,
            component,
            damage,
            ..
        } => format!(
            "{} {} EXPLODES for {} damage",
            name(*unit),
            component,
            damage
        ),
        ReportEvent::RotorEquipmentDestroyed {
            unit, component, ..
        } => format!(
            "{} rotor-mounted {} destroyed",
            name(*unit),
            component
        ),
        ReportEvent::HullBreach { unit, location } => {
            format!("{} {} breached", name(*unit), loc(*unit, *location))
        }
        ReportEvent::CrewStunned { unit, turns } => {
            format!("{} crew stunned for {} turns", name(*unit), turns)
        }
        ReportEvent::CrewKilled { unit } => format!("{} crew killed", name(*unit)),
        ReportEvent::CrewDoomed { unit } => format!("{} crew doomed", name(*unit)),
        ReportEvent::CrewEjected {
            unit,
            forced,
            headshot,
        } => format!(
            "{} crew ejects{}{}",
            name(*unit),
            if *forced { " automatically" } else { "" },
            if *headshot { " from a head hit" } else { "" }
        ),
        ReportEvent::CrewInjured {
            unit,
            points,
            total,
        } => format!(
            "{} crew takes {} injury ({} total)",
            name(*unit),
            points,
            total
        ),
        ReportEvent::LimbSevered { unit, location } => {
            format!("{} {} blown off", name(*unit), loc(*unit, *location))
        }
        ReportEvent::DebrisPlaced { unit, position } => {
            format!("debris from {} lands at {}", name(*unit), position)
        }
        ReportEvent::CargoDropped { carrier, cargo } => {
            format!("{} drops {}", name(*carrier), name(*cargo))
        }
        ReportEvent::EngineExplosion { unit } => {
            format!("{} ENGINE EXPLODES", name(*unit))
        }
        ReportEvent::UnitDestroyed {
            unit,
            cause,
            salvageable,
            ..
        } => format!(
            "*** {} DESTROYED by {}{} ***",
            name(*unit),
            cause_text(*cause),
            if *salvageable { "" } else { " (no salvage)" }
        ),
        ReportEvent::AreaExplosion {
            unit,
            position,
            damage_levels,
        } => format!(
            "explosion of {} at {} deals {:?}",
            name(*unit),
            position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown position".to_string()),
            damage_levels
        ),
    }
}

/// Render a whole log, one line per event
pub fn render_log(events: &[ReportEvent], roster: &UnitRoster) -> Vec<String> {
    events.iter().map(|e| render(e, roster)).collect()
}
