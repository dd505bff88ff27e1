pub mod simulation;
pub mod world;

// Re-export from thermosand-simulation so callers need a single dependency
pub use thermosand_simulation::{MaterialKind, MaterialProps, ParseMaterialError, TransitionRule};
