//! Shapes, cropping and pasting: a red surface scattered with translucent
//! rectangles is cropped, a smaller yellow surface is pasted into its centre,
//! and gridlines are drawn over the result.
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use simple_surface::layout::TextOptions;
use simple_surface::{colours, Font, ShapeStyle, Surface, XPos, YPos};
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Opts {
    /// TrueType or OpenType font used for the greeting
    #[clap(long)]
    font: Option<PathBuf>,
    /// Where to write the result, as `.pdf` or `.png`
    #[clap(default_value = "basics.png")]
    out: PathBuf,
}

/// Scatter translucent rectangles over a surface in a fixed pattern of sizes
/// and colours
fn scatter_rectangles(surface: &mut Surface, count: usize) {
    let (width, height) = (surface.width(), surface.height());
    for i in 0..count {
        let step = (i * 7 % count) as f32 / count as f32;
        let w = width * (0.1 + 0.4 * step);
        let h = height * (0.5 - 0.35 * step);
        let x = (width - w) * ((i * 3 % count) as f32 / count as f32);
        let y = (height - h) * step;
        let style = ShapeStyle::default().rgba(
            (i * 53 % 256) as u8,
            (i * 97 % 256) as u8,
            (i * 151 % 256) as u8,
            (96 + i * 37 % 160) as u8,
        );
        surface.rectangle(x, y, w, h, &style);
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("SIMPLE_SURFACE_LOG"))
        .init();
    let opts = Opts::parse();

    let mut surface = Surface::new(600, 800);
    surface.set_background(colours::RED);
    scatter_rectangles(&mut surface, 10);
    surface.crop(50, 50, 400, 500);

    let mut inset = Surface::new(100, 200);
    inset.set_background(colours::YELLOW);
    scatter_rectangles(&mut inset, 5);
    inset.outline(&ShapeStyle::outlined().line_width(5));

    surface.paste(inset, XPos::Center, YPos::Center);
    surface.gridlines(&ShapeStyle::outlined());

    if let Some(path) = opts.font {
        let font = surface.add_font(Font::open(path)?);
        surface.write(
            "Hello World",
            50,
            50,
            font,
            TextOptions::default().font_size(25).colour(colours::BLACK),
        )?;
    }

    surface.save(&opts.out)?;
    Ok(())
}
