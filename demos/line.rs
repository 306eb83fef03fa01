//! The different ways of drawing a line.
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use simple_surface::{colours, LineCap, ShapeStyle, Surface, XPos, YPos};
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Opts {
    /// Where to write the result, as `.pdf` or `.png`
    #[clap(default_value = "line.png")]
    out: PathBuf,
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
    surface.set_background(colours::WHITE);

    let thin = ShapeStyle::default();
    surface.line(50, 250, 200, 50, &thin);
    surface.line(
        350,
        350,
        500,
        100,
        &ShapeStyle::default().colour(colours::BLUE).line_width(10),
    );
    surface.line(
        50,
        500,
        250,
        700,
        &ShapeStyle::default()
            .colour(colours::RED)
            .line_width(20)
            .line_cap(LineCap::Round),
    );

    // an X across the bottom-right quadrant
    surface.line(XPos::Center, YPos::Center, XPos::Right, YPos::Bottom, &thin);
    surface.line(XPos::Center, YPos::Bottom, XPos::Right, YPos::Center, &thin);

    surface.gridlines(&ShapeStyle::outlined());
    surface.save(&opts.out)?;
    Ok(())
}
