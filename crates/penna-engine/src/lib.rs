//! Penna engine crate.
//!
//! This crate owns the CPU-side text pieces used by higher layers: geometry
//! and transform primitives, the font atlas builder and text layout engine,
//! and the small runtime utilities (fixed-step clock, logger setup) an
//! application threads through its render loop.
//!
//! GPU upload and draw-call issuance are deliberately out of scope; the
//! outputs here (a packed [`text::AtlasImage`], [`text::GlyphQuad`] draw
//! commands, per-quad transforms from [`render::RenderContext`]) are shaped
//! for a rendering collaborator to consume.

pub mod coords;
pub mod logging;
pub mod render;
pub mod text;
pub mod time;
