// this_file: tests/outline_backend.rs

//! Local outline rasterization against an installed system font.
//!
//! Every test returns early when neither DejaVu Sans nor Noto Sans is
//! installed.

use gtext::utils::find_system_font;
use gtext::{FontSource, FontSpec, OutlineStyle, Rgba, TextRenderer};
use gtext_core::mock::{CountingTextureFactory, RecordingContext};
use std::path::PathBuf;

const FONT_FILES: &[&str] = &["DejaVuSans.ttf", "NotoSans-Regular.ttf"];

fn system_font() -> Option<PathBuf> {
    let _ = env_logger::builder().is_test(true).try_init();
    let font = find_system_font(FONT_FILES);
    if font.is_none() {
        eprintln!("no DejaVu Sans or Noto Sans installed, skipping");
    }
    font
}

fn renderer() -> TextRenderer<CountingTextureFactory> {
    TextRenderer::new(CountingTextureFactory::new())
}

#[test]
fn plain_glyph_has_coverage_and_metrics() {
    let Some(path) = system_font() else { return };
    let mut renderer = renderer();
    let font = renderer
        .font(&FontSpec::new(FontSource::file(&path, 32.0)))
        .unwrap();

    let glyph = font.get_glyph('H').unwrap();
    assert!(glyph.width > 10 && glyph.height > 15);
    assert!(glyph.offset_y > 15, "capital sits above the baseline");
    assert!(glyph.advance_x > glyph.width as f32);
    assert!(glyph.texture.data().iter().any(|&v| v == 255));

    let metrics = font.metrics();
    assert!(metrics.units_per_em > 0);
    assert!(metrics.ascender > 0.0);
    assert!(metrics.descender < 0.0);
}

#[test]
fn space_is_an_empty_but_advancing_glyph() {
    let Some(path) = system_font() else { return };
    let mut renderer = renderer();
    let font = renderer
        .font(&FontSpec::new(FontSource::file(&path, 20.0)))
        .unwrap();

    let glyph = font.get_glyph(' ').unwrap();
    assert_eq!((glyph.width, glyph.height), (0, 0));
    assert!(glyph.advance_x > 0.0);
}

#[test]
fn hinted_advances_are_whole_pixels() {
    let Some(path) = system_font() else { return };
    let mut renderer = renderer();
    let hinted = renderer
        .font(&FontSpec::new(FontSource::file(&path, 17.0)))
        .unwrap();
    for code in "abcdefgh".chars() {
        let advance = hinted.get_glyph(code).unwrap().advance_x;
        assert_eq!(advance, advance.round(), "{code:?}");
    }
}

#[test]
fn outline_styles_change_glyph_extent() {
    let Some(path) = system_font() else { return };
    let mut renderer = renderer();
    let source = FontSource::file(&path, 40.0);
    let mut size_of = |spec: FontSpec| {
        let glyph = renderer.font(&spec).unwrap().get_glyph('O').unwrap();
        (glyph.width, glyph.height, glyph.outline)
    };

    let plain = size_of(FontSpec::new(source.clone()));
    let stroke = size_of(FontSpec::new(source.clone()).with_outline(OutlineStyle::Stroke, 2.0));
    let inside =
        size_of(FontSpec::new(source.clone()).with_outline(OutlineStyle::BorderInside, 2.0));
    let both = size_of(FontSpec::new(source).with_outline(OutlineStyle::BorderBoth, 2.0));

    assert!(stroke.0 > plain.0 && stroke.1 > plain.1);
    assert!(both.0 > plain.0 && both.1 > plain.1);
    assert!(inside.0 < plain.0 && inside.1 < plain.1, "inside border shrinks the glyph");
    assert_eq!(stroke.2, OutlineStyle::Stroke);
    assert_eq!(inside.2, OutlineStyle::BorderInside);
    assert_eq!(both.2, OutlineStyle::BorderBoth);
    assert_eq!(renderer.library().len(), 4);
}

#[test]
fn draw_text_with_real_font() {
    let Some(path) = system_font() else { return };
    let mut renderer = renderer();
    let font = renderer
        .font(&FontSpec::new(FontSource::file_in_points(&path, 12.0)))
        .unwrap();
    let measured = font.measure_text("Hello, world");

    let mut context = RecordingContext::new();
    let mut x = 0.0;
    font.draw_text("Hello, world", &mut context, &mut x, 100.0, Rgba::BLACK);

    assert_eq!(x, measured);
    assert_eq!(context.rectangles().len(), 12);
    assert_eq!(context.flush_count(), 1);
}

#[test]
fn glyph_bitmap_dumps_as_png() {
    let Some(path) = system_font() else { return };
    let mut rasterizer =
        gtext::OutlineRasterizer::from_spec(&FontSpec::new(FontSource::file(&path, 24.0)))
            .unwrap();
    let glyph = gtext::GlyphRasterizer::rasterize(&mut rasterizer, 'g').unwrap();
    let png = glyph.bitmap.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
