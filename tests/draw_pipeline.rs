// this_file: tests/draw_pipeline.rs

//! Draw pipeline behaviour across the cache, textures and drawing context.

use gtext::{glyph_quad, FontLibrary, FontSource, FontSpec, GlyphRasterizer, PixelFormat, Rgba};
use gtext_core::mock::{CountingTextureFactory, DrawOp, RecordingContext, ScriptedRasterizer};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn latin() -> ScriptedRasterizer {
    ScriptedRasterizer::new()
        .with_glyph('A', 10, 12, 1, 10, 11.0)
        .with_glyph('V', 11, 12, 0, 12, 10.5)
        .with_glyph('a', 8, 8, 1, 8, 9.0)
        .with_glyph('.', 2, 2, 1, 2, 4.0)
        .with_glyph(' ', 0, 0, 0, 0, 4.5)
}

fn spec() -> FontSpec {
    FontSpec::new(FontSource::definition("16px scripted"))
}

fn scripted_backend(_spec: &FontSpec) -> gtext::Result<Box<dyn GlyphRasterizer>> {
    Ok(Box::new(latin()))
}

#[test]
fn worked_example_quad_and_cursor() {
    init_logging();
    let mut library = FontLibrary::new(CountingTextureFactory::new());
    let font = library.get_or_create(&spec(), scripted_backend).unwrap();

    let glyph = font.get_glyph('A').unwrap();
    let quad = glyph_quad(glyph, 100.0, 50.0);
    assert_eq!((quad.left, quad.top, quad.right, quad.bottom), (101.0, 52.0, 111.0, 40.0));

    let mut context = RecordingContext::new();
    let mut x = 100.0;
    font.draw_char('A', &mut context, &mut x, 50.0, Rgba::BLACK);
    assert_eq!(x, 111.0);

    let (rect, color) = context.rectangles()[0];
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (101.0, 40.0, 10.0, 12.0));
    assert_eq!((rect.s, rect.t, rect.s_width, rect.t_height), (0.0, 0.0, 1.0, 1.0));
    assert_eq!(color, Rgba::BLACK);
}

#[test]
fn cursor_advances_by_resolved_glyphs_only() {
    let mut library = FontLibrary::new(CountingTextureFactory::new());
    let font = library.get_or_create(&spec(), scripted_backend).unwrap();
    let text = "Va a\u{1F600}A.";

    let expected: f32 = [10.5, 9.0, 4.5, 9.0, 11.0, 4.0].iter().sum();
    let mut context = RecordingContext::new();
    let mut x = 3.0;
    font.draw_text(text, &mut context, &mut x, 0.0, Rgba::WHITE);

    assert_eq!(x, 3.0 + expected);
    // The emoji is skipped; the space still gets a (zero sized) quad.
    assert_eq!(context.rectangles().len(), 6);
    assert_eq!(context.flush_count(), 1);
}

#[test]
fn every_push_is_preceded_by_its_texture() {
    let mut library = FontLibrary::new(CountingTextureFactory::new());
    let font = library.get_or_create(&spec(), scripted_backend).unwrap();
    let mut context = RecordingContext::new();
    let mut x = 0.0;
    font.draw_text("AaA", &mut context, &mut x, 0.0, Rgba::BLACK);

    let ops = context.ops();
    assert_eq!(ops.len(), 7);
    assert_eq!(ops[0], DrawOp::SetTexture(1));
    assert_eq!(ops[2], DrawOp::SetTexture(2));
    assert_eq!(ops[4], DrawOp::SetTexture(1), "cached texture is reused");
    assert_eq!(ops[6], DrawOp::Flush);
}

#[test]
fn repeated_text_rasterizes_each_code_once() {
    let rasterizer = latin();
    let calls = rasterizer.calls();
    let backend: Box<dyn GlyphRasterizer> = Box::new(rasterizer);
    let textures = CountingTextureFactory::new();
    let mut library = FontLibrary::new(textures.clone());
    let font = library.get_or_create(&spec(), move |_| Ok(backend)).unwrap();

    let mut context = RecordingContext::new();
    for _ in 0..10 {
        let mut x = 0.0;
        font.draw_text("Aa.", &mut context, &mut x, 0.0, Rgba::BLACK);
    }

    assert_eq!(calls.total(), 3);
    assert_eq!(textures.created(), 3);
    assert_eq!(context.flush_count(), 10);
}

#[test]
fn rgba_factories_get_white_glyphs_with_coverage_alpha() {
    let textures = CountingTextureFactory::with_format(PixelFormat::Rgba8);
    let mut library = FontLibrary::new(textures);
    let font = library.get_or_create(&spec(), scripted_backend).unwrap();

    let glyph = font.get_glyph('.').unwrap();
    assert_eq!(glyph.texture.format(), PixelFormat::Rgba8);
    assert_eq!(glyph.texture.size(), (2, 2));
    assert_eq!(glyph.texture.data(), &[255u8; 16][..]);
}

#[test]
fn removing_a_font_releases_its_textures() {
    let textures = CountingTextureFactory::new();
    let mut library = FontLibrary::new(textures.clone());
    let mut context = RecordingContext::new();
    let mut x = 0.0;
    library
        .get_or_create(&spec(), scripted_backend)
        .unwrap()
        .draw_text("AV", &mut context, &mut x, 0.0, Rgba::BLACK);

    assert_eq!(library.stats().glyph_count, 2);
    assert!(library.remove(&spec()));
    assert_eq!(textures.created(), textures.released());
}

#[test]
fn font_spec_from_json_selects_cached_font() {
    let mut library = FontLibrary::new(CountingTextureFactory::new());
    let from_json = FontSpec::from_json(
        r#"{"source": {"kind": "definition", "definition": "16px scripted"}}"#,
    )
    .unwrap();
    library.get_or_create(&spec(), scripted_backend).unwrap();
    library.get_or_create(&from_json, scripted_backend).unwrap();
    assert_eq!(library.len(), 1);
}
