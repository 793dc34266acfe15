//! Atlas preview tool.
//!
//! Builds a glyph atlas from a font file, writes the packed image to
//! `atlas.png`, and prints the draw commands for a sample string. Doubles as
//! an end-to-end exercise of the engine crate without a GPU.

use anyhow::{bail, Context, Result};

use penna_engine::coords::Vec2;
use penna_engine::logging::{init_logging, LoggingConfig};
use penna_engine::render::RenderContext;
use penna_engine::text::{AtlasImage, FontAtlas};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let Some(font_path) = args.next() else {
        bail!("usage: penna-preview <font.ttf> [px] [text]");
    };
    let px: u32 = match args.next() {
        Some(raw) => raw.parse().context("px must be a positive integer")?,
        None => 32,
    };
    let text = args.next().unwrap_or_else(|| "Hello world!".to_owned());

    let font_bytes =
        std::fs::read(&font_path).with_context(|| format!("reading font {font_path}"))?;
    let atlas = FontAtlas::build(&font_bytes, px)
        .with_context(|| format!("building {px}px atlas from {font_path}"))?;

    let image = atlas.image();
    log::info!(
        "atlas: {}x{} px, {} glyphs, scale {:.5} px/unit",
        image.width,
        image.height,
        atlas.glyphs().len(),
        atlas.scale(),
    );

    if image.width == 0 || image.height == 0 {
        log::warn!("atlas is empty; skipping atlas.png");
    } else {
        save_png(image, "atlas.png")?;
        log::info!("wrote atlas.png");
    }

    // Mirror what a draw loop would do: one quad and one MVP per glyph.
    let ctx = RenderContext::for_screen(800.0, 600.0);
    let anchor = Vec2::new(20.0, 60.0);
    println!("layout of {text:?} at ({}, {}):", anchor.x, anchor.y);
    for item in atlas.layout_text(&text, anchor) {
        match item {
            Ok(quad) => {
                println!(
                    "  dst ({:7.1}, {:7.1})..({:7.1}, {:7.1})  uv ({:.4}, {:.4})..({:.4}, {:.4})",
                    quad.dst_min[0],
                    quad.dst_min[1],
                    quad.dst_max[0],
                    quad.dst_max[1],
                    quad.uv_min[0],
                    quad.uv_min[1],
                    quad.uv_max[0],
                    quad.uv_max[1],
                );
                log::debug!("mvp: {:?}", ctx.mvp_for(quad.dst_rect()).as_array());
            }
            Err(err) => log::warn!("{err}"),
        }
    }

    Ok(())
}

/// Writes the atlas out as a PNG, flipping back to the format's top-down row
/// order.
fn save_png(image: &AtlasImage, path: &str) -> Result<()> {
    let mut png = image::RgbaImage::new(image.width, image.height);
    for y in 0..image.height {
        for x in 0..image.width {
            let src = 4 * ((image.height - 1 - y) * image.width + x) as usize;
            let p = &image.pixels[src..src + 4];
            png.put_pixel(x, y, image::Rgba([p[0], p[1], p[2], p[3]]));
        }
    }
    png.save(path).with_context(|| format!("writing {path}"))
}
