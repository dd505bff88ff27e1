//! RNG trait abstraction for the update passes
//!
//! Frame updates draw randomness only through this trait so that:
//! - The binary can drive them with a seeded Xoshiro generator
//! - Tests can script exact sequences of coin flips

/// Random number generator trait for grid updates
pub trait SimRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }
}
