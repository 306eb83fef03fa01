//! Text blocks in each quadrant of a page: auto-sized, fixed-size and
//! right-aligned, centred with padding, and justified with and without the
//! last line stretched.
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use simple_surface::layout::{Alignment, Padding, TextOptions};
use simple_surface::{colours, Font, Px, ShapeStyle, Surface, XPos, YPos};
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Opts {
    /// Font used for most of the text
    font: PathBuf,
    /// Font used for the centred block; defaults to the main font
    #[clap(long)]
    alt_font: Option<PathBuf>,
    /// Where to write the result, as `.pdf` or `.png`
    #[clap(long, default_value = "write.png")]
    out: PathBuf,
}

const JUSTIFIED: &str = "This text is justified. Notice how it stretches to each side of its \
    container within the padding. For this example, the last line will be left";

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
    let font = surface.add_font(Font::open(&opts.font)?);
    let alt_font = match &opts.alt_font {
        Some(path) => surface.add_font(Font::open(path)?),
        None => font,
    };

    let (half_width, half_height) = (surface.width() / 2.0, surface.height() / 2.0);
    let outline = ShapeStyle::outlined();

    let bbox = surface.write(
        "This text has the default alignment (left) and is bound by a maximum \
         width and height to be contained to this quadrant of the page. It has \
         the line spacing set to 2.0, but the font size isn't specified so this \
         text will fill up as much space as it's allowed.",
        XPos::Left,
        YPos::Top,
        font,
        TextOptions::default()
            .line_spacing(2.0)
            .max_width(half_width)
            .max_height(half_height),
    )?;
    surface.rectangle(XPos::Left, YPos::Top, bbox.width, bbox.height, &outline);

    let bbox = surface.write(
        "This text is right-aligned. Its font size is set to 25px so it will \
         not automatically adjust, even if the text goes off the page.",
        XPos::Right,
        YPos::Top,
        font,
        TextOptions::default()
            .font_size(25)
            .max_width(half_width)
            .max_height(half_height)
            .alignment(Alignment::Right),
    )?;
    surface.rectangle(XPos::Right, YPos::Top, bbox.width, bbox.height, &outline);

    let buffer = Px(15.0);
    let bbox = surface.write(
        "Here is some center-aligned text. This text is blue, in a different \
         font, and has padding on all sides\n(top:10, right:20, bottom:30, left:40).\n\n\
         The boxes drawn around all the examples represent the bounding boxes \
         containing the text and padding. Their size is returned and can be used \
         to draw boxes or stack text blocks, like in the examples to the right.",
        buffer,
        half_height + buffer,
        alt_font,
        TextOptions::default()
            .max_width(half_width - buffer * 2.0)
            .max_height(half_height - buffer * 2.0)
            .colour(colours::BLUE)
            .padding("10 20 30 40".parse::<Padding>()?)
            .alignment(Alignment::Center),
    )?;
    surface.rectangle(bbox.x, bbox.y, bbox.width, bbox.height, &outline);

    let mut y = half_height;
    for justify_last_line in [false, true] {
        let text = format!(
            "{JUSTIFIED} to {}be justified:\nhere is the last line.",
            if justify_last_line { "" } else { "not " }
        );
        let bbox = surface.write(
            &text,
            half_width,
            y,
            font,
            TextOptions::default()
                .font_size(20)
                .max_width(half_width)
                .alignment(Alignment::Justified)
                .justify_last_line(justify_last_line)
                .padding(Padding::all(5)),
        )?;
        surface.rectangle(bbox.x, bbox.y, bbox.width, bbox.height, &outline);
        y += bbox.height + Px(10.0);
    }

    surface.save(&opts.out)?;
    Ok(())
}
