//! Heat diffusion between a cell and its non-inert neighbors

use smallvec::SmallVec;

use super::{StateChangeSystem, Touched};
use crate::world::{Cell, CellIndex, SimStats};

/// Temperature pass update
pub struct TemperatureSystem;

impl TemperatureSystem {
    /// Exchange heat between the source and every neighbor that is neither air
    /// nor barrier, then apply the source's passive heat
    ///
    /// Each exchange moves `(t_source - t_neighbor) * c_source * c_neighbor / (n + 1)`
    /// from source to neighbor, where `n` counts the participating neighbors.
    /// The source's temperature and conductance are read once, before any exchange.
    pub fn update_cell(cells: &mut [Cell], index: CellIndex, stats: &mut dyn SimStats) -> Touched {
        let source = &cells[index];
        let partners: SmallVec<[CellIndex; 8]> = source
            .neighbors()
            .map(|(_, neighbor)| neighbor)
            .filter(|&neighbor| !cells[neighbor].material().is_inert())
            .collect();

        let source_temperature = source.temperature();
        let source_conductance = source.props().conductance;
        let share = (partners.len() + 1) as f32;

        for &neighbor in &partners {
            let target = &cells[neighbor];
            let delta = (source_temperature - target.temperature())
                * source_conductance
                * target.props().conductance
                / share;

            StateChangeSystem::add_heat(&mut cells[neighbor], delta, stats);
            StateChangeSystem::add_heat(&mut cells[index], -delta, stats);
        }

        if let Some(heat) = cells[index].material().passive_heat() {
            StateChangeSystem::add_heat(&mut cells[index], heat, stats);
        }

        let mut touched = Touched::new();
        touched.push(index);
        touched.extend(partners);
        touched
    }
}
