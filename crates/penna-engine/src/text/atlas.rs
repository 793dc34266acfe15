use std::fmt;

/// The codepoints every atlas pre-renders.
///
/// Fixed at build time: two atlases built from the same code support exactly
/// the same characters. Looking up anything else is an error, never a silent
/// substitution.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ 0123456789!";

/// Error returned by [`FontAtlas::build`] for malformed outline data.
#[derive(Debug, Clone)]
pub struct FontParseError(pub String);

impl fmt::Display for FontParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font parse error: {}", self.0)
    }
}

impl std::error::Error for FontParseError {}

/// Error returned when a character outside [`ALPHABET`] is looked up.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnsupportedGlyphError {
    pub codepoint: char,
}

impl fmt::Display for UnsupportedGlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glyph not pre-rendered in atlas: {:?}", self.codepoint)
    }
}

impl std::error::Error for UnsupportedGlyphError {}

/// Pixel rectangle inside the atlas image.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Placement and metrics for one pre-rendered codepoint.
///
/// Horizontal metrics are in pixels at the atlas's build size. `lsb` is kept
/// sub-pixel; the layout engine rounds the pen, not the metric.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub codepoint: char,
    /// Where the glyph bitmap landed in the atlas image.
    pub rect: AtlasRect,
    /// Offset of the bitmap's bottom edge from the text baseline, +Y up.
    pub ymin: i32,
    /// Horizontal advance.
    pub advance: f32,
    /// Left-side bearing.
    pub lsb: f32,
}

/// The packed atlas bitmap: RGBA8, row 0 at the bottom.
///
/// Glyph coverage lives in the alpha channel over white RGB, so the image can
/// be uploaded directly and tinted by a shader.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// An immutable glyph atlas for one font at one pixel size.
///
/// Built once via [`FontAtlas::build`]; read-only afterwards, so sharing it
/// across threads for concurrent layout is safe by construction. The packed
/// image and the glyph records share the atlas's lifetime.
#[derive(Debug)]
pub struct FontAtlas {
    font: fontdue::Font,
    image: AtlasImage,
    glyphs: Vec<GlyphRecord>,
    px: f32,
    scale: f32,
}

impl FontAtlas {
    /// Parses `font_bytes` and pre-renders [`ALPHABET`] at `px` pixels.
    ///
    /// Malformed outline data fails atomically with [`FontParseError`]: no
    /// partial atlas, nothing left allocated. Alphabet codepoints the font
    /// does not cover are skipped with a logged warning and the build
    /// continues. The result is deterministic for identical inputs.
    pub fn build(font_bytes: &[u8], px: u32) -> Result<FontAtlas, FontParseError> {
        let font = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default())
            .map_err(|msg| FontParseError(msg.to_string()))?;

        let px = px as f32;
        let scale = px / font.units_per_em();

        let mut glyphs = Vec::new();
        let mut bitmaps = Vec::new();
        for ch in ALPHABET.chars() {
            if font.lookup_glyph_index(ch) == 0 {
                log::warn!("font has no glyph for {ch:?} (U+{:04X}); skipping", ch as u32);
                continue;
            }

            let (metrics, coverage) = font.rasterize(ch, px);
            glyphs.push(GlyphRecord {
                codepoint: ch,
                rect: AtlasRect {
                    x: 0,
                    y: 0,
                    w: metrics.width as u32,
                    h: metrics.height as u32,
                },
                ymin: metrics.ymin,
                advance: metrics.advance_width,
                lsb: metrics.bounds.xmin,
            });
            bitmaps.push(coverage);
        }

        let (width, height) = pack_row(&mut glyphs);

        let mut image = AtlasImage {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        for (glyph, coverage) in glyphs.iter().zip(&bitmaps) {
            blit_coverage_flipped(&mut image, glyph.rect, coverage);
        }

        log::debug!(
            "built {}x{} atlas: {} glyphs at {px}px",
            image.width,
            image.height,
            glyphs.len(),
        );

        Ok(FontAtlas {
            font,
            image,
            glyphs,
            px,
            scale,
        })
    }

    /// Looks up the record for `codepoint`.
    ///
    /// Linear scan — the alphabet is small and fixed.
    pub fn glyph(&self, codepoint: char) -> Result<&GlyphRecord, UnsupportedGlyphError> {
        self.glyphs
            .iter()
            .find(|g| g.codepoint == codepoint)
            .ok_or(UnsupportedGlyphError { codepoint })
    }

    /// Kerning adjustment between an adjacent pair, in pixels. 0 when the
    /// font defines none.
    pub fn kern(&self, left: char, right: char) -> f32 {
        self.font.horizontal_kern(left, right, self.px).unwrap_or(0.0)
    }

    /// Glyph records in build (= alphabet) order.
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    pub fn image(&self) -> &AtlasImage {
        &self.image
    }

    /// The pixel size the atlas was rasterized at.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Pixels per font design unit at the build size.
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Single-shelf packing: glyphs sit side by side on one row, so rects can
/// never overlap. Not space-optimal; fine for a small fixed alphabet.
///
/// Returns the resulting atlas dimensions (sum of widths, max height).
fn pack_row(glyphs: &mut [GlyphRecord]) -> (u32, u32) {
    let mut cursor_x = 0u32;
    let mut max_h = 0u32;
    for g in glyphs.iter_mut() {
        g.rect.x = cursor_x;
        g.rect.y = 0;
        cursor_x += g.rect.w;
        max_h = max_h.max(g.rect.h);
    }
    (cursor_x, max_h)
}

/// Copies an 8-bit coverage bitmap into `image` at `rect`, reversing row
/// order: the rasterizer emits rows top-down, the atlas stores them
/// bottom-up.
fn blit_coverage_flipped(image: &mut AtlasImage, rect: AtlasRect, coverage: &[u8]) {
    let (w, h) = (rect.w as usize, rect.h as usize);
    debug_assert_eq!(coverage.len(), w * h);

    for row in 0..h {
        let src_row = &coverage[(h - 1 - row) * w..(h - row) * w];
        for (col, &alpha) in src_row.iter().enumerate() {
            let px = ((rect.y as usize + row) * image.width as usize + rect.x as usize + col) * 4;
            image.pixels[px..px + 4].copy_from_slice(&[255, 255, 255, alpha]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(w: u32, h: u32) -> GlyphRecord {
        GlyphRecord {
            codepoint: 'x',
            rect: AtlasRect { x: 0, y: 0, w, h },
            ymin: 0,
            advance: w as f32,
            lsb: 0.0,
        }
    }

    fn overlaps(a: AtlasRect, b: AtlasRect) -> bool {
        a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
    }

    fn system_font() -> Option<Vec<u8>> {
        [
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        ]
        .iter()
        .find_map(|p| std::fs::read(p).ok())
    }

    // ── packing (no font needed) ──────────────────────────────────────────

    #[test]
    fn pack_row_prefix_sum_origins() {
        let mut glyphs = vec![record(3, 5), record(4, 2), record(0, 0), record(7, 9)];
        let (w, h) = pack_row(&mut glyphs);

        assert_eq!(w, 14);
        assert_eq!(h, 9);
        let xs: Vec<u32> = glyphs.iter().map(|g| g.rect.x).collect();
        assert_eq!(xs, vec![0, 3, 7, 7]);
        assert!(glyphs.iter().all(|g| g.rect.y == 0));
    }

    #[test]
    fn pack_row_rects_disjoint_and_in_bounds() {
        let mut glyphs = vec![record(8, 12), record(5, 3), record(6, 7)];
        let (w, h) = pack_row(&mut glyphs);

        for g in &glyphs {
            assert!(g.rect.x + g.rect.w <= w);
            assert!(g.rect.y + g.rect.h <= h);
        }
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert!(!overlaps(a.rect, b.rect), "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn pack_row_empty_input() {
        assert_eq!(pack_row(&mut []), (0, 0));
    }

    // ── blit (no font needed) ─────────────────────────────────────────────

    #[test]
    fn blit_reverses_row_order() {
        let mut image = AtlasImage {
            width: 4,
            height: 2,
            pixels: vec![0; 4 * 2 * 4],
        };
        let rect = AtlasRect { x: 1, y: 0, w: 2, h: 2 };
        // Rasterizer order: top row [1, 2], bottom row [3, 4].
        blit_coverage_flipped(&mut image, rect, &[1, 2, 3, 4]);

        let alpha = |x: u32, y: u32| image.pixels[((y * 4 + x) * 4 + 3) as usize];
        // Image row 0 is the bottom, so it receives the rasterizer's last row.
        assert_eq!(alpha(1, 0), 3);
        assert_eq!(alpha(2, 0), 4);
        assert_eq!(alpha(1, 1), 1);
        assert_eq!(alpha(2, 1), 2);
    }

    #[test]
    fn blit_writes_white_rgb_and_leaves_rest_untouched() {
        let mut image = AtlasImage {
            width: 3,
            height: 1,
            pixels: vec![0; 3 * 4],
        };
        blit_coverage_flipped(&mut image, AtlasRect { x: 1, y: 0, w: 1, h: 1 }, &[200]);

        assert_eq!(&image.pixels[4..8], &[255, 255, 255, 200]);
        assert_eq!(&image.pixels[0..4], &[0, 0, 0, 0]);
        assert_eq!(&image.pixels[8..12], &[0, 0, 0, 0]);
    }

    #[test]
    fn blit_zero_size_is_a_no_op() {
        let mut image = AtlasImage {
            width: 2,
            height: 1,
            pixels: vec![0; 2 * 4],
        };
        blit_coverage_flipped(&mut image, AtlasRect { x: 1, y: 0, w: 0, h: 0 }, &[]);
        assert!(image.pixels.iter().all(|&b| b == 0));
    }

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn malformed_font_is_a_parse_error() {
        let err = FontAtlas::build(&[0, 1, 2, 3], 32).unwrap_err();
        assert!(!err.0.is_empty());
    }

    #[test]
    fn build_covers_the_alphabet() {
        let Some(bytes) = system_font() else { return };
        let atlas = FontAtlas::build(&bytes, 32).unwrap();

        for ch in ALPHABET.chars() {
            assert!(atlas.glyph(ch).is_ok(), "missing {ch:?}");
        }
        assert!(atlas.glyph('?').is_err());
        assert_eq!(atlas.glyph('?').unwrap_err().codepoint, '?');
    }

    #[test]
    fn build_is_deterministic() {
        let Some(bytes) = system_font() else { return };
        let a = FontAtlas::build(&bytes, 32).unwrap();
        let b = FontAtlas::build(&bytes, 32).unwrap();

        assert_eq!(a.glyphs(), b.glyphs());
        assert_eq!(a.image(), b.image());
    }

    #[test]
    fn built_rects_are_disjoint_and_in_bounds() {
        let Some(bytes) = system_font() else { return };
        let atlas = FontAtlas::build(&bytes, 32).unwrap();
        let image = atlas.image();

        assert_eq!(
            image.pixels.len(),
            image.width as usize * image.height as usize * 4
        );
        for g in atlas.glyphs() {
            assert!(g.rect.x + g.rect.w <= image.width);
            assert!(g.rect.y + g.rect.h <= image.height);
        }
        for (i, a) in atlas.glyphs().iter().enumerate() {
            for b in &atlas.glyphs()[i + 1..] {
                assert!(!overlaps(a.rect, b.rect));
            }
        }
    }

    #[test]
    fn atlas_width_is_sum_of_glyph_widths() {
        let Some(bytes) = system_font() else { return };
        let atlas = FontAtlas::build(&bytes, 32).unwrap();

        let total: u32 = atlas.glyphs().iter().map(|g| g.rect.w).sum();
        let tallest = atlas.glyphs().iter().map(|g| g.rect.h).max().unwrap();
        assert_eq!(atlas.image().width, total);
        assert_eq!(atlas.image().height, tallest);
    }

    #[test]
    fn space_has_advance_but_no_ink() {
        let Some(bytes) = system_font() else { return };
        let atlas = FontAtlas::build(&bytes, 32).unwrap();

        let space = atlas.glyph(' ').unwrap();
        assert_eq!(space.rect.w, 0);
        assert_eq!(space.rect.h, 0);
        assert!(space.advance > 0.0);
    }
}
