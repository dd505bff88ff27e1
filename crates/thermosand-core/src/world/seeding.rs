//! Initial conditions: random placement of materials inside rectangular regions

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thermosand_simulation::MaterialKind;
use thiserror::Error;

/// One cell to re-type when the grid is built
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seed {
    pub row: usize,
    pub col: usize,
    pub kind: MaterialKind,
}

impl Seed {
    pub fn new(row: usize, col: usize, kind: MaterialKind) -> Self {
        Self { row, col, kind }
    }
}

/// Errors raised when validating a fill region
#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("region rows {min}..={max} have the upper bound below the lower bound")]
    InvertedRows { min: usize, max: usize },
    #[error("region columns {min}..={max} have the upper bound below the lower bound")]
    InvertedCols { min: usize, max: usize },
    #[error("fill density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f32),
}

/// Inclusive rectangle filled with one material at a given density
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub kind: MaterialKind,
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
    /// Fraction of the region's cells to fill (0.0 - 1.0)
    pub density: f32,
}

impl Region {
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.row_max < self.row_min {
            return Err(SeedError::InvertedRows {
                min: self.row_min,
                max: self.row_max,
            });
        }
        if self.col_max < self.col_min {
            return Err(SeedError::InvertedCols {
                min: self.col_min,
                max: self.col_max,
            });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(SeedError::InvalidDensity(self.density));
        }
        Ok(())
    }

    fn width(&self) -> usize {
        self.col_max - self.col_min + 1
    }

    /// Number of cells covered by the rectangle
    pub fn area(&self) -> usize {
        (self.row_max - self.row_min + 1) * self.width()
    }

    /// How many distinct cells a fill places
    pub fn fill_count(&self) -> usize {
        (self.area() as f64 * f64::from(self.density)).floor() as usize
    }

    /// Choose `fill_count` distinct cells uniformly at random
    pub fn fill<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BTreeSet<Seed>, SeedError> {
        self.validate()?;

        let width = self.width();
        let seeds = index::sample(rng, self.area(), self.fill_count())
            .into_iter()
            .map(|offset| {
                Seed::new(
                    self.row_min + offset / width,
                    self.col_min + offset % width,
                    self.kind,
                )
            })
            .collect();

        Ok(seeds)
    }
}

/// Fill each region in order and concatenate the results
///
/// Later regions win when two regions pick the same cell, since grid
/// construction applies seeds in order.
pub fn fill_regions<R: Rng + ?Sized>(
    regions: &[Region],
    rng: &mut R,
) -> Result<Vec<Seed>, SeedError> {
    let mut seeds = Vec::new();
    for region in regions {
        let filled = region.fill(rng)?;
        log::debug!(
            "Filled {} {} cells in rows {}..={}, cols {}..={}",
            filled.len(),
            region.kind,
            region.row_min,
            region.row_max,
            region.col_min,
            region.col_max
        );
        seeds.extend(filled);
    }
    Ok(seeds)
}
