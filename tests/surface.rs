use simple_surface::layout::{Alignment, Padding, TextOptions};
use simple_surface::{
    colours, Font, Info, LayoutError, Px, ShapeStyle, SpanLayout, Surface, SurfaceContents,
    SurfaceError, XPos, YPos,
};
use std::path::PathBuf;

/// A font from the system, if one is installed where we expect it.
/// `SIMPLE_SURFACE_TEST_FONT` overrides the search.
fn system_font() -> Option<Font> {
    let candidates = std::env::var_os("SIMPLE_SURFACE_TEST_FONT")
        .map(PathBuf::from)
        .into_iter()
        .chain(
            [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            ]
            .into_iter()
            .map(PathBuf::from),
        );

    for path in candidates {
        if let Ok(font) = Font::open(&path) {
            return Some(font);
        }
    }
    eprintln!("no system font found, skipping");
    None
}

fn spans(surface: &Surface) -> Vec<&SpanLayout> {
    surface
        .contents()
        .iter()
        .filter_map(|item| match item {
            SurfaceContents::Text(spans) => Some(spans),
            _ => None,
        })
        .flatten()
        .collect()
}

fn pdf_of(surface: &Surface) -> Vec<u8> {
    let mut out = Vec::new();
    surface.write_pdf(&mut out).expect("can write pdf");
    out
}

#[test]
fn crop_and_paste_export() {
    let mut surface = Surface::new(600, 800);
    surface.set_background(colours::RED);
    surface.rectangle(100, 100, 200, 300, &ShapeStyle::default().colour(colours::BLUE));
    surface.crop(50, 50, 400, 500);

    let mut inset = Surface::new(100, 200);
    inset.set_background(colours::YELLOW);
    inset.outline(&ShapeStyle::outlined().line_width(5));
    surface.paste(inset, XPos::Center, YPos::Center);
    surface.gridlines(&ShapeStyle::outlined());

    surface.set_info(Info::new().title("Crop and paste"));

    let pdf = pdf_of(&surface);
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/MediaBox [0 0 400 500]"));
    assert!(text.contains("(Crop and paste)"));
    assert!(text.trim_end().ends_with("%%EOF"));
}

#[test]
fn saves_pdf_files() {
    let mut surface = Surface::new(100, 100);
    surface.set_background(colours::GREEN);

    let path = std::env::temp_dir().join(format!("simple-surface-{}.pdf", std::process::id()));
    surface.save(&path).expect("can save");
    let written = std::fs::read(&path).expect("file exists");
    std::fs::remove_file(&path).ok();
    assert!(written.starts_with(b"%PDF-"));
}

#[test]
fn saves_png_files() {
    let mut surface = Surface::new(60, 40);
    surface.set_background(colours::WHITE);
    surface.rectangle(0, 0, 30, 40, &ShapeStyle::default().rgba(255, 0, 0, 128));

    let path = std::env::temp_dir().join(format!("simple-surface-{}.png", std::process::id()));
    surface.save(&path).expect("can save");
    let decoded = image::open(&path).expect("a readable png").to_rgba8();
    std::fs::remove_file(&path).ok();

    assert_eq!(decoded.dimensions(), (60, 40));
    let [r, g, _, a] = decoded.get_pixel(10, 10).0;
    assert_eq!((r, a), (255, 255));
    assert!((120..=135).contains(&g), "green {g}");
    assert_eq!(decoded.get_pixel(50, 10).0, [255, 255, 255, 255]);
}

#[test]
fn other_extensions_are_unsupported() {
    let surface = Surface::new(100, 100);
    assert!(matches!(
        surface.save("out.svg"),
        Err(SurfaceError::UnsupportedFormat(ext)) if ext == "svg"
    ));
}

#[test]
fn rasterised_text_covers_its_bounding_box() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(200, 100);
    surface.set_background(colours::WHITE);
    let font = surface.add_font(font);
    let bbox = surface
        .write(
            "MMMM",
            XPos::Left,
            YPos::Top,
            font,
            TextOptions::default().font_size(40),
        )
        .expect("text fits");

    let pixmap = surface.to_pixmap().expect("can rasterise");
    let inked = (0..pixmap.width())
        .flat_map(|x| (0..pixmap.height()).map(move |y| (x, y)))
        .filter(|&(x, y)| pixmap.pixel(x, y).map_or(false, |c| c.red() < 128))
        .collect::<Vec<_>>();
    let (right, bottom) = ((bbox.x + bbox.width).0, (bbox.y + bbox.height).0);
    assert!(!inked.is_empty());
    assert!(inked
        .iter()
        .all(|&(x, y)| x as f32 <= right + 1.0 && y as f32 <= bottom + 1.0));
}

#[test]
fn text_needs_a_registered_font() {
    let Some(font) = system_font() else { return };
    let mut other = Surface::new(100, 100);
    let id = other.add_font(font);

    let mut surface = Surface::new(100, 100);
    let result = surface.write("hi", 0, 0, id, TextOptions::default());
    assert!(matches!(result, Err(SurfaceError::UnknownFont)));
}

#[test]
fn adding_a_font_twice_reuses_it() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(100, 100);
    let first = surface.add_font(font.clone());
    let second = surface.add_font(font);
    assert_eq!(first, second);
}

#[test]
fn auto_sized_text_fills_its_quadrant() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(600, 800);
    let font = surface.add_font(font);

    let bbox = surface
        .write(
            &lipsum::lipsum(60),
            XPos::Left,
            YPos::Top,
            font,
            TextOptions::default()
                .line_spacing(2.0)
                .max_width(300)
                .max_height(400),
        )
        .expect("text fits");

    assert_eq!((bbox.x, bbox.y), (Px(0.0), Px(0.0)));
    assert!(bbox.height <= Px(400.0));
    assert_eq!(bbox.width, Px(300.0));

    let spans = spans(&surface);
    assert!(!spans.is_empty());
    let size = spans[0].font.size;
    assert!(size > Px(1.0));
    // one pixel larger no longer fits
    let layout = simple_surface::layout::layout_text_block(
        &lipsum::lipsum(60),
        surface.font(font).expect("font is registered"),
        &TextOptions::default()
            .font_size(size + Px(1.0))
            .line_spacing(2.0)
            .max_width(300),
    )
    .expect("can lay out");
    let too_tall = layout.bounding_box.height > Px(400.0);
    let too_wide = layout.lines.iter().any(|line| line.width > Px(300.0));
    assert!(too_tall || too_wide);
}

#[test]
fn right_aligned_text_sits_against_the_edge() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(600, 800);
    let font = surface.add_font(font);

    let bbox = surface
        .write(
            "This text is right-aligned. Its font size is fixed so it will not adjust.",
            XPos::Right,
            YPos::Top,
            font,
            TextOptions::default()
                .font_size(25)
                .max_width(300)
                .alignment(Alignment::Right),
        )
        .expect("can write");

    assert_eq!(bbox.x, Px(300.0));
    assert_eq!(bbox.width, Px(300.0));
    for span in spans(&surface) {
        assert!(span.coords.0 >= Px(300.0));
        assert_eq!(span.font.size, Px(25.0));
    }
}

#[test]
fn justified_lines_are_split_into_words() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(600, 800);
    let font = surface.add_font(font);

    surface
        .write(
            "This text is justified. Notice how it stretches to each side of its \
             container within the padding.\nhere is the last line.",
            300,
            400,
            font,
            TextOptions::default()
                .font_size(20)
                .max_width(300)
                .alignment(Alignment::Justified)
                .padding(Padding::all(5)),
        )
        .expect("can write");

    let spans = spans(&surface);
    let single_words = spans.iter().filter(|span| !span.text.contains(' ')).count();
    assert!(single_words > 1);
    assert_eq!(spans.last().map(|span| span.text.as_str()), Some("here is the last line."));
}

#[test]
fn text_that_cannot_fit_is_an_error() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(600, 800);
    let font = surface.add_font(font);

    let result = surface.write(
        "This will never fit",
        0,
        0,
        font,
        TextOptions::default().max_height(Px(0.5)),
    );
    assert!(matches!(
        result,
        Err(SurfaceError::Layout(LayoutError::FitFailure { .. }))
    ));
}

#[test]
fn text_exports_with_its_font() {
    let Some(font) = system_font() else { return };
    let mut surface = Surface::new(200, 100);
    let font = surface.add_font(font);
    surface
        .write("Hello World", 10, 10, font, TextOptions::default().font_size(12))
        .expect("can write");

    let pdf = pdf_of(&surface);
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Type0"));
    assert!(text.contains("/FontFile2"));
    assert!(text.contains("/ToUnicode"));
}
