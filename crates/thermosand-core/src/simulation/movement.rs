//! Density and gravity driven movement
//!
//! A source may displace a neighbor when
//! `(density_source - density_target) * gravity_weight(dir) + flux_factor > 0`.
//! Heavier materials sink, lighter ones rise, and the flux factor biases kinds
//! toward or away from moves gravity alone would not produce.

use smallvec::{SmallVec, smallvec};
use thermosand_simulation::MaterialKind;

use super::Touched;
use crate::world::{Cell, CellIndex, Direction, SimRng, SimStats};

/// Candidate moves in neighbor enumeration order
pub type OpenDirections = SmallVec<[(Direction, CellIndex); 8]>;

/// Movement pass update
pub struct MovementSystem;

impl MovementSystem {
    /// Directions the source may move into, before weighting
    ///
    /// Drops same-kind and barrier neighbors, then any diagonal whose two
    /// bounding cardinals are both barriers.
    pub fn open_directions(cells: &[Cell], index: CellIndex) -> OpenDirections {
        let source = &cells[index];
        let kind = source.material();

        let mut occlusion = [0u8; 8];
        let mut open = OpenDirections::new();

        for (dir, neighbor) in source.neighbors() {
            let neighbor_kind = cells[neighbor].material();
            if neighbor_kind == kind {
                continue;
            }
            if neighbor_kind == MaterialKind::Barrier {
                for diagonal in dir.adjoining_diagonals() {
                    occlusion[diagonal.index()] += 1;
                }
                continue;
            }
            open.push((dir, neighbor));
        }

        // Sealed corner
        open.retain(|(dir, _)| occlusion[dir.index()] < 2);
        open
    }

    /// Weight of moving `source` into `target` along `dir`
    pub fn movement_weight(source: &Cell, target: &Cell, dir: Direction) -> f32 {
        let source_props = source.props();
        let density_gap = (source_props.density - target.props().density) as f32;
        density_gap * dir.gravity_weight() + source_props.flux_factor as f32
    }

    /// Swap the source's kind with the best-weighted open neighbor
    ///
    /// Exact ties are settled by a coin flip per tied candidate, so later
    /// candidates replace earlier ones half of the time. Temperature and
    /// pressure stay with the grid position.
    pub fn update_cell<R: SimRng>(
        cells: &mut [Cell],
        index: CellIndex,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> Touched {
        let mut best: Option<(Direction, CellIndex, f32)> = None;
        for (dir, neighbor) in Self::open_directions(cells, index) {
            let weight = Self::movement_weight(&cells[index], &cells[neighbor], dir);
            if weight <= 0.0 {
                continue;
            }

            let replace = match best {
                None => true,
                Some((_, _, best_weight)) if weight > best_weight => true,
                Some((_, _, best_weight)) => weight == best_weight && rng.gen_bool(),
            };
            if replace {
                best = Some((dir, neighbor, weight));
            }
        }

        let Some((dir, target, weight)) = best else {
            return Touched::new();
        };

        let moving = cells[index].material();
        let displaced = cells[target].replace_material(moving);
        cells[index].replace_material(displaced);

        log::trace!(
            "{} at {:?} moved {} (weight {:.1}), displacing {}",
            moving,
            cells[index].coords(),
            dir.label(),
            weight,
            displaced
        );
        stats.record_cell_moved();

        smallvec![index, target]
    }
}
