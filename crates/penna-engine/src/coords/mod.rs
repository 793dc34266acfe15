//! Coordinate and geometry types shared across the atlas builder, layout
//! engine, and render context.
//!
//! Canonical CPU space:
//! - Pixels, origin bottom-left (matches the projection the render context
//!   builds and the row order of the packed atlas image)
//! - +X right, +Y up
//!
//! Matrices are column-major with column vectors, so `a * b` applied to a
//! point applies `b` first.

mod angle;
mod mat4;
mod rect;
mod vec2;

pub use angle::deg_to_rad;
pub use mat4::Mat4;
pub use rect::Rect;
pub use vec2::Vec2;
