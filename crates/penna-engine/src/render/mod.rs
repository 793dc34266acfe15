//! Render-facing context.
//!
//! Draw code receives projection state as an explicit value threaded by the
//! caller; there is no process-wide "current projection" anywhere in the
//! crate.

mod ctx;

pub use ctx::RenderContext;
