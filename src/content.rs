//! Rendering of recorded surface contents into a PDF content stream.

use crate::colour::Colour;
use crate::font::Font;
use crate::surface::{Group, ImageLayout, Shape, ShapeStyle, SpanFont, SpanLayout, SurfaceContents};
use crate::transform::Transform;
use crate::units::Px;
use id_arena::Arena;
use pdf_writer::{Content, Name};
use std::io::Write;

/// The distinct opacities drawn with, in order of first use. Each becomes a
/// graphics state named `/A{index}` in the page resources.
#[derive(Debug, Default)]
pub(crate) struct Opacities(Vec<f32>);

impl Opacities {
    fn name(&mut self, alpha: f32) -> String {
        let index = match self.0.iter().position(|known| *known == alpha) {
            Some(index) => index,
            None => {
                self.0.push(alpha);
                self.0.len() - 1
            }
        };
        format!("A{index}")
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

/// Renders surface contents to PDF operators, appending them to `out`.
///
/// `height` is the height of the surface the contents were recorded on; it
/// is used to flip the top-down surface coordinates into PDF space.
pub(crate) fn render_contents(
    contents: &[SurfaceContents],
    height: Px,
    fonts: &Arena<Font>,
    opacities: &mut Opacities,
    out: &mut Vec<u8>,
) -> Result<(), std::io::Error> {
    for item in contents.iter() {
        match item {
            SurfaceContents::Shape(shape, style) => {
                render_shape(out, shape, style, height, opacities)
            }
            SurfaceContents::Text(spans) => render_text_spans(out, spans, height, fonts)?,
            SurfaceContents::Image(image) => render_image(out, image, height),
            SurfaceContents::Group(group) => render_group(out, group, height, fonts, opacities)?,
        }
    }

    Ok(())
}

fn finish_into(out: &mut Vec<u8>, content: Content) {
    out.extend_from_slice(content.finish().as_slice());
    out.push(b'\n');
}

fn render_shape(
    out: &mut Vec<u8>,
    shape: &Shape,
    style: &ShapeStyle,
    height: Px,
    opacities: &mut Opacities,
) {
    let mut content = Content::new();
    content.save_state();
    if style.alpha < 1.0 {
        let state = opacities.name(style.alpha);
        content.set_parameters(Name(state.as_bytes()));
    }
    content.set_line_width(style.line_width.0);
    content.set_line_cap(style.line_cap.into());

    match shape {
        Shape::Rect(rect) => {
            let rect = rect.to_pdf(height);
            if style.fill {
                style.colour.apply_fill(&mut content);
            } else {
                style.colour.apply_stroke(&mut content);
            }
            content.rect(rect.x1, rect.y1, rect.x2 - rect.x1, rect.y2 - rect.y1);
            if style.fill {
                content.fill_nonzero();
            } else {
                content.stroke();
            }
        }
        Shape::Line { from, to } => {
            style.colour.apply_stroke(&mut content);
            content.move_to(from.0 .0, (height - from.1).0);
            content.line_to(to.0 .0, (height - to.1).0);
            content.stroke();
        }
    }

    content.restore_state();
    finish_into(out, content);
}

fn render_image(out: &mut Vec<u8>, image: &ImageLayout, height: Px) {
    let mut content = Content::new();
    content.save_state();
    Transform::unit_square_onto(image.position, height).apply(&mut content);
    content.x_object(Name(format!("I{}", image.image.index()).as_bytes()));
    content.restore_state();
    finish_into(out, content);
}

/// Content pasted from another surface: move the origin to the group's
/// bottom-left corner, clip to its bounds and render it in its own space
fn render_group(
    out: &mut Vec<u8>,
    group: &Group,
    height: Px,
    fonts: &Arena<Font>,
    opacities: &mut Opacities,
) -> Result<(), std::io::Error> {
    let (x, y) = group.origin;
    let mut content = Content::new();
    content.save_state();
    Transform::offset(x, height - y - group.height).apply(&mut content);
    content.rect(0.0, 0.0, group.width.0, group.height.0);
    content.clip_nonzero();
    content.end_path();
    finish_into(out, content);

    render_contents(&group.contents, group.height, fonts, opacities, out)?;

    out.extend_from_slice(b"Q\n");
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    height: Px,
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write_font(content, current_font)?;
    write_colour(content, current_colour)?;

    for span in spans.iter() {
        let Some(font) = fonts.get(span.font.id) else {
            log::warn!("skipping span drawn with an unregistered font: {:?}", span.text);
            continue;
        };
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(
            content,
            "{} {} Td\n",
            span.coords.0 .0,
            (height - span.coords.1).0
        )?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_or_fallback(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.id.index(), font.size.0)
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}
