//! Per-position simulation state

use bitflags::bitflags;
use thermosand_simulation::{MaterialKind, MaterialProps};

use super::Direction;

/// Position of a cell inside the grid's row-major cell array
pub type CellIndex = usize;

/// Temperature given to a cell whenever it is re-typed without an explicit value
pub const DEFAULT_TEMPERATURE: f32 = 20.0;

/// Equilibrium pressure; pressure exchange is a no-op at this value
pub const DEFAULT_PRESSURE: f32 = 1.0;

/// Substituted when pressure is read as exactly zero
pub const PRESSURE_EPSILON: f32 = 0.001;

bitflags! {
    /// Per-pass state flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        /// Already touched during the current pass
        const UPDATED = 1 << 0;
    }
}

/// What lies in a given direction from a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborKind {
    Material(MaterialKind),
    /// Beyond the grid boundary. Never equal to any real material.
    Edge,
}

impl NeighborKind {
    #[inline]
    pub fn is(self, kind: MaterialKind) -> bool {
        self == NeighborKind::Material(kind)
    }
}

/// A single grid position
#[derive(Clone, Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    material: MaterialKind,
    temperature: f32,
    pressure: f32,
    flags: CellFlags,
    neighbors: [Option<CellIndex>; 8],
}

impl Cell {
    /// Air at default pressure and temperature with no neighbors wired yet
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            material: MaterialKind::Air,
            temperature: DEFAULT_TEMPERATURE,
            pressure: DEFAULT_PRESSURE,
            flags: CellFlags::empty(),
            neighbors: [None; 8],
        }
    }

    /// (row, column) of this cell
    pub fn coords(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    #[inline]
    pub fn material(&self) -> MaterialKind {
        self.material
    }

    #[inline]
    pub fn props(&self) -> &'static MaterialProps {
        self.material.props()
    }

    #[inline]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Pressure as seen by ratio computations (never exactly zero)
    #[inline]
    pub fn pressure(&self) -> f32 {
        if self.pressure == 0.0 {
            PRESSURE_EPSILON
        } else {
            self.pressure
        }
    }

    /// Stored pressure without the zero substitution
    #[inline]
    pub fn raw_pressure(&self) -> f32 {
        self.pressure
    }

    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    #[inline]
    pub fn is_updated(&self) -> bool {
        self.flags.contains(CellFlags::UPDATED)
    }

    pub(crate) fn mark_updated(&mut self) {
        self.flags.insert(CellFlags::UPDATED);
    }

    pub(crate) fn clear_update_flag(&mut self) {
        self.flags.remove(CellFlags::UPDATED);
    }

    /// Neighbor index in `dir`, `None` at the grid boundary
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<CellIndex> {
        self.neighbors[dir.index()]
    }

    /// Existing neighbors in fixed enumeration order
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, CellIndex)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbors[dir.index()].map(|index| (dir, index)))
    }

    /// Material in `dir`, or the edge sentinel when there is no neighbor
    pub fn neighbor_kind(&self, cells: &[Cell], dir: Direction) -> NeighborKind {
        match self.neighbor(dir) {
            Some(index) => NeighborKind::Material(cells[index].material),
            None => NeighborKind::Edge,
        }
    }

    pub(crate) fn link(&mut self, dir: Direction, index: CellIndex) {
        self.neighbors[dir.index()] = Some(index);
    }

    /// Re-type the cell with explicit pressure and temperature
    ///
    /// Does not check transition rules.
    pub fn set_material(&mut self, material: MaterialKind, pressure: f32, temperature: f32) {
        self.material = material;
        self.pressure = pressure;
        self.temperature = temperature;
    }

    /// Re-type the cell at default pressure and temperature
    pub fn reset_material(&mut self, material: MaterialKind) {
        self.set_material(material, DEFAULT_PRESSURE, DEFAULT_TEMPERATURE);
    }

    /// Swap in a new kind, leaving pressure and temperature in place
    pub(crate) fn replace_material(&mut self, material: MaterialKind) -> MaterialKind {
        std::mem::replace(&mut self.material, material)
    }

    pub fn add_pressure(&mut self, delta: f32) {
        self.pressure += delta;
    }

    /// Raw temperature change. Callers go through `StateChangeSystem::add_heat`
    /// so transitions are re-checked.
    pub(crate) fn shift_temperature(&mut self, delta: f32) {
        self.temperature += delta;
    }
}
