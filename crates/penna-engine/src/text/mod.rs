//! Font atlas building and text layout.
//!
//! [`FontAtlas::build`] rasterizes a fixed alphabet out of a TrueType/OpenType
//! font (parsing and rasterization are delegated to fontdue), packs the glyph
//! bitmaps into one image, and records per-glyph metrics. The atlas is
//! immutable after build; [`FontAtlas::layout_text`] walks a string against it
//! and yields one textured-quad draw command per character.
//!
//! Uploading the image as a texture and issuing the draws belongs to the
//! rendering collaborator, not this module.

mod atlas;
mod layout;

pub use atlas::{
    AtlasImage, AtlasRect, FontAtlas, FontParseError, GlyphRecord, UnsupportedGlyphError, ALPHABET,
};
pub use layout::{GlyphQuad, TextLayout};
