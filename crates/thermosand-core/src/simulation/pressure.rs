//! Pressure diffusion and transfer
//!
//! Pressure only moves between cells of the same kind, or out of a cell into
//! adjacent air, which takes on the cell's kind.
//!
//! - Below 1: merge into same-kind neighbors that are also below 1, leaving air behind
//! - Above 1: vent into adjacent air if there is any
//! - Otherwise: equalize with same-kind neighbors at lower pressure

use smallvec::SmallVec;
use thermosand_simulation::MaterialKind;

use super::{StateChangeSystem, Touched};
use crate::world::{Cell, CellIndex, DEFAULT_PRESSURE, SimStats};

type Partners = SmallVec<[CellIndex; 8]>;

/// Pressure pass update
pub struct PressureSystem;

impl PressureSystem {
    /// Apply one pressure exchange with `index` as the source
    ///
    /// Returns an empty set when the cell is at equilibrium or no neighbor
    /// qualifies for the branch its pressure selects.
    pub fn update_cell(cells: &mut [Cell], index: CellIndex, stats: &mut dyn SimStats) -> Touched {
        let pressure = cells[index].pressure();
        if pressure == DEFAULT_PRESSURE {
            return Touched::new();
        }

        let touched = if pressure < DEFAULT_PRESSURE {
            Self::merge_deficit(cells, index, stats)
        } else {
            Self::vent_into_air(cells, index)
                .or_else(|| Self::equalize(cells, index, stats))
                .unwrap_or_default()
        };

        if !touched.is_empty() {
            stats.record_pressure_exchange();
        }
        touched
    }

    fn partners(cells: &[Cell], index: CellIndex, accept: impl Fn(&Cell) -> bool) -> Partners {
        cells[index]
            .neighbors()
            .map(|(_, neighbor)| neighbor)
            .filter(|&neighbor| accept(&cells[neighbor]))
            .collect()
    }

    fn touched(index: CellIndex, partners: Partners) -> Touched {
        let mut touched = Touched::new();
        touched.push(index);
        touched.extend(partners);
        touched
    }

    /// Spread all of the source's pressure and temperature over deficient
    /// same-kind neighbors, then turn the source into air at defaults
    fn merge_deficit(cells: &mut [Cell], index: CellIndex, stats: &mut dyn SimStats) -> Touched {
        let source = &cells[index];
        let kind = source.material();
        let partners = Self::partners(cells, index, |cell| {
            cell.material() == kind && cell.pressure() < DEFAULT_PRESSURE
        });
        if partners.is_empty() {
            return Touched::new();
        }

        let count = partners.len() as f32;
        let delta_p = source.pressure() / count;
        let delta_t = source.temperature() / count;

        for &neighbor in &partners {
            cells[neighbor].add_pressure(delta_p);
            StateChangeSystem::add_heat(&mut cells[neighbor], delta_t, stats);
        }
        cells[index].reset_material(MaterialKind::Air);

        Self::touched(index, partners)
    }

    /// Convert adjacent air into the source's kind, sharing pressure and
    /// temperature evenly between the source and each converted cell
    ///
    /// Converted cells skip transition checks. The source keeps its
    /// temperature and ends with `p / (n + 1)` pressure.
    fn vent_into_air(cells: &mut [Cell], index: CellIndex) -> Option<Touched> {
        let source = &cells[index];
        let kind = source.material();
        let partners = Self::partners(cells, index, |cell| cell.material() == MaterialKind::Air);
        if partners.is_empty() {
            return None;
        }

        let count = (partners.len() + 1) as f32;
        let delta_p = source.pressure() / count;
        let delta_t = source.temperature() / count;

        for &neighbor in &partners {
            cells[neighbor].set_material(kind, delta_p, delta_t);
            cells[index].add_pressure(-delta_p);
        }

        Some(Self::touched(index, partners))
    }

    /// Move pressure and heat toward same-kind neighbors at lower pressure
    fn equalize(cells: &mut [Cell], index: CellIndex, stats: &mut dyn SimStats) -> Option<Touched> {
        let source = &cells[index];
        let kind = source.material();
        let source_p = source.pressure();
        let source_t = source.temperature();
        let partners = Self::partners(cells, index, |cell| {
            cell.material() == kind && source_p > cell.pressure()
        });
        if partners.is_empty() {
            return None;
        }

        let share = (partners.len() + 1) as f32;
        for &neighbor in &partners {
            let delta_p = (source_p - cells[neighbor].pressure()) / share;
            let delta_t = (source_t - cells[neighbor].temperature()) / share;

            cells[neighbor].add_pressure(delta_p);
            StateChangeSystem::add_heat(&mut cells[neighbor], delta_t, stats);
            cells[index].add_pressure(-delta_p);
            StateChangeSystem::add_heat(&mut cells[index], -delta_t, stats);
        }

        Some(Self::touched(index, partners))
    }
}
