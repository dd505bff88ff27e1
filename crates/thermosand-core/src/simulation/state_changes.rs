//! State change system
//!
//! Every temperature mutation goes through here so transition thresholds are
//! re-checked immediately:
//! - Ceiling rules fire when temperature rises above the threshold (boiling, melting)
//! - Floor rules fire when it drops below (condensing, freezing, solidifying)

use thermosand_simulation::TransitionRule;

use crate::world::{Cell, SimStats};

/// System for applying heat and the phase transitions it triggers
pub struct StateChangeSystem;

impl StateChangeSystem {
    /// Add `delta` to the cell's temperature, then apply ceiling and floor rules
    ///
    /// Both rules are evaluated in that order on every call. The floor check
    /// reads the rules of whatever kind the cell holds after the ceiling check.
    pub fn add_heat(cell: &mut Cell, delta: f32, stats: &mut dyn SimStats) {
        cell.shift_temperature(delta);
        let temperature = cell.temperature();

        if let Some(rule) = cell.props().ceiling
            && temperature > rule.threshold
        {
            Self::apply(cell, rule, stats);
        }

        if let Some(rule) = cell.props().floor
            && temperature < rule.threshold
        {
            Self::apply(cell, rule, stats);
        }
    }

    fn apply(cell: &mut Cell, rule: TransitionRule, stats: &mut dyn SimStats) {
        let from = cell.material();
        let pressure = cell.raw_pressure() * rule.pressure_scale;
        cell.set_material(rule.target, pressure, cell.temperature());

        log::trace!(
            "{} -> {} at {:?}, t={:.1}, p={:.3}",
            from,
            rule.target,
            cell.coords(),
            cell.temperature(),
            pressure
        );
        stats.record_state_change();
    }
}
