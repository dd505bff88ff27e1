//! Grid - owns every cell and drives the per-frame passes

use thermosand_simulation::MaterialKind;
use thiserror::Error;

use super::{Cell, CellIndex, Direction, NeighborKind, Seed, SimRng, SimStats};
use crate::simulation::{
    FrameReport, MovementSystem, Pass, PassReport, PressureSystem, TemperatureSystem, Touched,
};

/// Errors raised while building a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("seed ({row}, {col}) lies outside the {rows}x{cols} grid")]
    SeedOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Fixed-topology 2D array of cells, stored row-major with row 0 at the bottom
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build an all-air grid, wire neighbor topology, then apply `seeds` in order
    pub fn new(
        rows: usize,
        cols: usize,
        seeds: impl IntoIterator<Item = Seed>,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect();

        let mut grid = Self { rows, cols, cells };
        grid.interconnect();
        let seeded = grid.populate(seeds)?;

        log::info!("Built {}x{} grid with {} seeded cells", rows, cols, seeded);
        Ok(grid)
    }

    fn interconnect(&mut self) {
        for index in 0..self.cells.len() {
            let (row, col) = self.cells[index].coords();
            for dir in Direction::ALL {
                if let Some(neighbor) = self.offset_index(row, col, dir) {
                    self.cells[index].link(dir, neighbor);
                }
            }
        }
    }

    fn populate(&mut self, seeds: impl IntoIterator<Item = Seed>) -> Result<usize, GridError> {
        let mut count = 0;
        for seed in seeds {
            let index = self
                .index_of(seed.row, seed.col)
                .ok_or(GridError::SeedOutOfBounds {
                    row: seed.row,
                    col: seed.col,
                    rows: self.rows,
                    cols: self.cols,
                })?;
            self.cells[index].reset_material(seed.kind);
            count += 1;
        }
        Ok(count)
    }

    fn offset_index(&self, row: usize, col: usize, dir: Direction) -> Option<CellIndex> {
        let (dr, dc) = dir.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        self.index_of(row, col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> Option<CellIndex> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(row, col).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.index_of(row, col).map(|index| &mut self.cells[index])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Read-only material query for renderers
    pub fn material_at(&self, row: usize, col: usize) -> Option<MaterialKind> {
        self.cell(row, col).map(Cell::material)
    }

    /// Material in `dir` from (row, col); the edge sentinel past the boundary
    pub fn neighbor_kind(&self, row: usize, col: usize, dir: Direction) -> NeighborKind {
        match self.cell(row, col) {
            Some(cell) => cell.neighbor_kind(&self.cells, dir),
            None => NeighborKind::Edge,
        }
    }

    pub fn count_of(&self, kind: MaterialKind) -> usize {
        self.cells.iter().filter(|c| c.material() == kind).count()
    }

    pub fn total_temperature(&self) -> f64 {
        self.cells.iter().map(|c| f64::from(c.temperature())).sum()
    }

    pub fn average_temperature(&self) -> f64 {
        self.total_temperature() / self.cells.len() as f64
    }

    /// One frame: temperature, then pressure, then movement
    pub fn step<R: SimRng>(&mut self, rng: &mut R, stats: &mut dyn SimStats) -> FrameReport {
        FrameReport {
            temperature: self.run_pass(Pass::Temperature, rng, stats),
            pressure: self.run_pass(Pass::Pressure, rng, stats),
            movement: self.run_pass(Pass::Movement, rng, stats),
        }
    }

    /// Scan every cell once, applying `pass` to each eligible cell not yet touched
    pub fn run_pass<R: SimRng>(
        &mut self,
        pass: Pass,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> PassReport {
        for cell in &mut self.cells {
            cell.clear_update_flag();
        }

        // Roughly half of all scans run right-to-left to avoid directional bias
        let reversed = rng.gen_f32() > 0.5;
        let mut report = PassReport::new(pass, reversed);

        for row in 0..self.rows {
            for step in 0..self.cols {
                let col = if reversed {
                    self.cols - step - 1
                } else {
                    step
                };
                let index = row * self.cols + col;

                let cell = &self.cells[index];
                report.temperature_sum += f64::from(cell.temperature());
                report.cells_scanned += 1;
                if cell.is_updated() || cell.material().is_inert() {
                    continue;
                }

                let touched: Touched = match pass {
                    Pass::Temperature => {
                        TemperatureSystem::update_cell(&mut self.cells, index, stats)
                    }
                    Pass::Pressure => PressureSystem::update_cell(&mut self.cells, index, stats),
                    Pass::Movement => {
                        MovementSystem::update_cell(&mut self.cells, index, rng, stats)
                    }
                };

                if touched.is_empty() {
                    self.cells[index].mark_updated();
                } else {
                    report.updates += 1;
                    for touched_index in touched {
                        self.cells[touched_index].mark_updated();
                    }
                }
            }
        }

        report.cells_visited = self.cells.iter().filter(|c| c.is_updated()).count();
        log::debug!(
            "{} pass: {} updates, {} visited, avg temperature {:.2}{}",
            pass,
            report.updates,
            report.cells_visited,
            report.average_temperature(),
            if reversed { " (reversed)" } else { "" }
        );
        report
    }
}
