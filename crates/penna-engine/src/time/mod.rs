//! Time subsystem.
//!
//! Fixed-timestep frame timing, decoupled from any windowing runtime. Intended
//! usage: one [`FixedClock`] per loop, `tick()` once per presented frame, run
//! the simulation once per step in the returned batch.

mod fixed_clock;

pub use fixed_clock::{FixedClock, StepBatch};
