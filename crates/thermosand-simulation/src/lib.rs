//! Material data for Thermosand
//!
//! This crate provides the static reference data the simulation reads:
//! - The closed set of material kinds (MaterialKind)
//! - Per-kind physical constants (MaterialProps)
//! - Temperature-driven transition rules (TransitionRule)

mod materials;

pub use materials::{MaterialKind, MaterialProps, ParseMaterialError, TransitionRule};
