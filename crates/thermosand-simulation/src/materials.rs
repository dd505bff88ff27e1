//! Material kinds and their static properties

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every substance a cell can hold
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Air,
    Barrier,
    Water,
    Ice,
    Steam,
    Sand,
    MoltenSand,
    Plutonium,
    Heatsink,
}

/// A temperature threshold that converts one material into another
///
/// When crossed, the cell becomes `target` and its pressure is multiplied by
/// `pressure_scale`. Temperature carries over unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRule {
    pub threshold: f32,
    pub pressure_scale: f32,
    pub target: MaterialKind,
}

/// Immutable per-kind attributes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialProps {
    /// Only ever compared against other densities
    pub density: i32,
    /// Bias toward movement that gravity alone would not produce
    pub flux_factor: i32,
    /// Heat transfer efficiency (0.0 - 1.0)
    pub conductance: f32,
    /// Converts when temperature rises above the threshold
    pub ceiling: Option<TransitionRule>,
    /// Converts when temperature falls below the threshold
    pub floor: Option<TransitionRule>,
    /// Console glyph
    pub glyph: char,
}

impl MaterialProps {
    /// Physically neutral defaults for kinds without table entries
    const INERT: MaterialProps = MaterialProps {
        density: 1,
        flux_factor: 0,
        conductance: 1.0,
        ceiling: None,
        floor: None,
        glyph: '?',
    };
}

const AIR: MaterialProps = MaterialProps {
    density: 3,
    glyph: ' ',
    ..MaterialProps::INERT
};

const BARRIER: MaterialProps = MaterialProps {
    glyph: '%',
    ..MaterialProps::INERT
};

const WATER: MaterialProps = MaterialProps {
    density: 8,
    flux_factor: 0,
    conductance: 0.5,
    // Boils
    ceiling: Some(TransitionRule {
        threshold: 100.0,
        pressure_scale: 4.0,
        target: MaterialKind::Steam,
    }),
    // Freezes
    floor: Some(TransitionRule {
        threshold: 0.0,
        pressure_scale: 8.0 / 6.0,
        target: MaterialKind::Ice,
    }),
    glyph: '+',
};

const ICE: MaterialProps = MaterialProps {
    density: 6,
    flux_factor: -4,
    conductance: 0.2,
    ceiling: Some(TransitionRule {
        threshold: 0.0,
        pressure_scale: 6.0 / 8.0,
        target: MaterialKind::Water,
    }),
    floor: None,
    glyph: 'H',
};

const STEAM: MaterialProps = MaterialProps {
    density: 2,
    flux_factor: 3,
    conductance: 0.7,
    ceiling: None,
    // Condenses
    floor: Some(TransitionRule {
        threshold: 100.0,
        pressure_scale: 1.0 / 4.0,
        target: MaterialKind::Water,
    }),
    glyph: '~',
};

const SAND: MaterialProps = MaterialProps {
    density: 16,
    flux_factor: -3,
    conductance: 0.6,
    ceiling: Some(TransitionRule {
        threshold: 400.0,
        pressure_scale: 16.0 / 18.0,
        target: MaterialKind::MoltenSand,
    }),
    floor: None,
    glyph: '&',
};

const MOLTEN_SAND: MaterialProps = MaterialProps {
    density: 18,
    flux_factor: 0,
    conductance: 0.9,
    ceiling: None,
    floor: Some(TransitionRule {
        threshold: 400.0,
        pressure_scale: 18.0 / 16.0,
        target: MaterialKind::Sand,
    }),
    glyph: 'M',
};

const PLUTONIUM: MaterialProps = MaterialProps {
    density: 40,
    flux_factor: -10,
    conductance: 1.0,
    ceiling: None,
    floor: None,
    glyph: 'X',
};

const HEATSINK: MaterialProps = MaterialProps {
    density: -40,
    flux_factor: -10,
    conductance: 1.0,
    ceiling: None,
    floor: None,
    glyph: '5',
};

impl MaterialKind {
    pub const ALL: [MaterialKind; 9] = [
        MaterialKind::Air,
        MaterialKind::Barrier,
        MaterialKind::Water,
        MaterialKind::Ice,
        MaterialKind::Steam,
        MaterialKind::Sand,
        MaterialKind::MoltenSand,
        MaterialKind::Plutonium,
        MaterialKind::Heatsink,
    ];

    /// Static properties for this kind
    pub fn props(self) -> &'static MaterialProps {
        match self {
            MaterialKind::Air => &AIR,
            MaterialKind::Barrier => &BARRIER,
            MaterialKind::Water => &WATER,
            MaterialKind::Ice => &ICE,
            MaterialKind::Steam => &STEAM,
            MaterialKind::Sand => &SAND,
            MaterialKind::MoltenSand => &MOLTEN_SAND,
            MaterialKind::Plutonium => &PLUTONIUM,
            MaterialKind::Heatsink => &HEATSINK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialKind::Air => "air",
            MaterialKind::Barrier => "barrier",
            MaterialKind::Water => "water",
            MaterialKind::Ice => "ice",
            MaterialKind::Steam => "steam",
            MaterialKind::Sand => "sand",
            MaterialKind::MoltenSand => "molten_sand",
            MaterialKind::Plutonium => "plutonium",
            MaterialKind::Heatsink => "heatsink",
        }
    }

    pub fn glyph(self) -> char {
        self.props().glyph
    }

    /// Air and barrier never start an update and never exchange heat or pressure
    pub fn is_inert(self) -> bool {
        matches!(self, MaterialKind::Air | MaterialKind::Barrier)
    }

    /// Flat heat added after diffusion each temperature pass
    ///
    /// Heatsink reports zero: its cooling comes from diffusion alone.
    pub fn passive_heat(self) -> Option<f32> {
        match self {
            MaterialKind::Plutonium => Some(300.0),
            MaterialKind::Heatsink => Some(0.0),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a material name does not match any kind
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown material `{0}`")]
pub struct ParseMaterialError(pub String);

impl FromStr for MaterialKind {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ParseMaterialError(s.to_string()))
    }
}
