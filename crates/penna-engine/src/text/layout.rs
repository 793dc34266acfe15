use std::iter::Peekable;
use std::str::Chars;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};

use super::atlas::{FontAtlas, UnsupportedGlyphError};

/// One textured-quad draw command.
///
/// `dst_min`/`dst_max` span the quad on the baseline-relative canvas;
/// `uv_min`/`uv_max` are the glyph's rectangle in the atlas image, normalized
/// by the atlas dimensions. `Pod` so a rendering collaborator can cast a
/// slice of these straight into a vertex/instance buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlyphQuad {
    pub dst_min: [f32; 2],
    pub dst_max: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

impl GlyphQuad {
    /// Destination rectangle as a [`Rect`].
    pub fn dst_rect(&self) -> Rect {
        Rect::new(
            self.dst_min[0],
            self.dst_min[1],
            self.dst_max[0] - self.dst_min[0],
            self.dst_max[1] - self.dst_min[1],
        )
    }
}

impl FontAtlas {
    /// Lays `text` out against a baseline `anchor`.
    ///
    /// Returns a lazy, finite, single-pass iterator yielding one
    /// [`GlyphQuad`] per character, in string order. A character outside the
    /// atlas's alphabet yields `Err` and leaves the pen where it was — the
    /// caller decides whether to abort or substitute; nothing is substituted
    /// here.
    pub fn layout_text<'a>(&'a self, text: &'a str, anchor: Vec2) -> TextLayout<'a> {
        TextLayout {
            atlas: self,
            chars: text.chars().peekable(),
            anchor,
            cursor_x: 0.0,
        }
    }
}

/// Iterator produced by [`FontAtlas::layout_text`].
///
/// The pen advances by each glyph's left-side bearing (the pen is rounded to
/// a whole pixel at that point, so glyphs never land on sub-pixel positions),
/// then by its advance, then by the kerning adjustment against the next
/// character — between consecutive pairs only, never before the first or
/// after the last glyph.
pub struct TextLayout<'a> {
    atlas: &'a FontAtlas,
    chars: Peekable<Chars<'a>>,
    anchor: Vec2,
    cursor_x: f32,
}

impl<'a> Iterator for TextLayout<'a> {
    type Item = Result<GlyphQuad, UnsupportedGlyphError>;

    fn next(&mut self) -> Option<Self::Item> {
        let atlas = self.atlas;
        let ch = self.chars.next()?;
        let glyph = match atlas.glyph(ch) {
            Ok(g) => g,
            Err(err) => return Some(Err(err)),
        };

        self.cursor_x = (self.cursor_x + glyph.lsb).round();

        let dst_min = [
            self.anchor.x + self.cursor_x,
            self.anchor.y + glyph.ymin as f32,
        ];
        let dst_max = [
            dst_min[0] + glyph.rect.w as f32,
            dst_min[1] + glyph.rect.h as f32,
        ];

        let image = atlas.image();
        let (aw, ah) = (image.width as f32, image.height as f32);
        let uv_min = [glyph.rect.x as f32 / aw, glyph.rect.y as f32 / ah];
        let uv_max = [
            (glyph.rect.x + glyph.rect.w) as f32 / aw,
            (glyph.rect.y + glyph.rect.h) as f32 / ah,
        ];

        self.cursor_x += glyph.advance;
        if let Some(&next) = self.chars.peek() {
            self.cursor_x += atlas.kern(ch, next);
        }

        Some(Ok(GlyphQuad {
            dst_min,
            dst_max,
            uv_min,
            uv_max,
        }))
    }
}
