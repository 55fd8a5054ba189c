pub mod math;
pub mod random;

pub use math::{clamp, fluctuate, interpolate, time_factor};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
