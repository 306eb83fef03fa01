//! The drawing surface.

use crate::colour::Colour;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{layout_text_block, BoundingBox, Line, TextOptions};
use crate::position::{XPos, YPos};
use crate::rect::Rect;
use crate::units::Px;
use crate::SurfaceError;
use id_arena::{Arena, Id};
use std::collections::HashMap;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Px,
}

/// A run of text drawn on a single baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Left end of the baseline, in surface coordinates
    pub coords: (Px, Px),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub position: Rect,
}

/// How the ends of stroked lines are drawn
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LineCap {
    /// Square end exactly at the end point
    #[default]
    Butt,
    /// Semicircular end centred on the end point
    Round,
    /// Square end extending half the line width past the end point
    Square,
}

impl From<LineCap> for pdf_writer::types::LineCapStyle {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => pdf_writer::types::LineCapStyle::ButtCap,
            LineCap::Round => pdf_writer::types::LineCapStyle::RoundCap,
            LineCap::Square => pdf_writer::types::LineCapStyle::ProjectingSquareCap,
        }
    }
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// Colour and stroke settings for rectangles and lines
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeStyle {
    pub colour: Colour,
    /// Stroke width; ignored when filling
    pub line_width: Px,
    /// Fill rectangles instead of stroking their outline. Lines are always stroked
    pub fill: bool,
    pub line_cap: LineCap,
    /// Opacity from 0.0 (invisible) to 1.0 (opaque)
    pub alpha: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        ShapeStyle {
            colour: Colour::default(),
            line_width: Px(1.0),
            fill: true,
            line_cap: LineCap::Butt,
            alpha: 1.0,
        }
    }
}

impl ShapeStyle {
    /// Black, one pixel wide, stroked rather than filled
    pub fn outlined() -> ShapeStyle {
        ShapeStyle::default().fill(false)
    }

    pub fn colour<C: Into<Colour>>(mut self, colour: C) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn line_width<D: Into<Px>>(mut self, width: D) -> Self {
        self.line_width = width.into();
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    /// Clamped to the range 0.0 to 1.0
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        self
    }

    /// Colour and opacity from 0 to 255 bytes, as in `(r, g, b, a)` pixels
    pub fn rgba(self, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.colour(Colour::new_rgb_bytes(r, g, b))
            .alpha(a as f32 / 255.0)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Shape {
    Rect(Rect),
    Line { from: (Px, Px), to: (Px, Px) },
}

/// Content from another surface, drawn with its top-left corner at `origin`
/// and clipped to its own `width` and `height`
#[derive(Clone, PartialEq, Debug)]
pub struct Group {
    pub origin: (Px, Px),
    pub width: Px,
    pub height: Px,
    pub contents: Vec<SurfaceContents>,
}

/// Everything drawn on a surface, in painting order
#[derive(Clone, PartialEq, Debug)]
pub enum SurfaceContents {
    Shape(Shape, ShapeStyle),
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Group(Group),
}

impl SurfaceContents {
    fn remap(&mut self, fonts: &HashMap<Id<Font>, Id<Font>>, images: &HashMap<Id<Image>, Id<Image>>) {
        match self {
            SurfaceContents::Shape(..) => {}
            SurfaceContents::Text(spans) => {
                for span in spans.iter_mut() {
                    if let Some(id) = fonts.get(&span.font.id) {
                        span.font.id = *id;
                    }
                }
            }
            SurfaceContents::Image(layout) => {
                if let Some(id) = images.get(&layout.image) {
                    layout.image = *id;
                }
            }
            SurfaceContents::Group(group) => {
                for contents in group.contents.iter_mut() {
                    contents.remap(fonts, images);
                }
            }
        }
    }
}

/// A fixed-size canvas addressed in pixels from its top-left corner.
///
/// Drawing calls record content in painting order; nothing is rendered until
/// the surface is exported with [Surface::write_pdf] or [Surface::save]. A new
/// surface is transparent: call [Surface::set_background] to paint it.
///
/// ```no_run
/// use simple_surface::layout::{Alignment, TextOptions};
/// use simple_surface::{colours, Font, ShapeStyle, Surface, XPos, YPos};
///
/// let mut surface = Surface::new(600, 800);
/// surface.set_background(colours::WHITE);
/// let font = surface.add_font(Font::open("fonts/arial.ttf").expect("can load font"));
///
/// let bbox = surface
///     .write(
///         "Right-aligned text in the top right quadrant",
///         XPos::Right,
///         YPos::Top,
///         font,
///         TextOptions::default()
///             .font_size(25)
///             .max_width(300)
///             .alignment(Alignment::Right),
///     )
///     .expect("can write text");
/// surface.rectangle(XPos::Right, YPos::Top, bbox.width, bbox.height, &ShapeStyle::outlined());
/// surface.save("right.pdf").expect("can save");
/// ```
#[derive(Debug)]
pub struct Surface {
    pub(crate) width: Px,
    pub(crate) height: Px,
    pub(crate) fonts: Arena<Font>,
    pub(crate) images: Arena<Image>,
    pub(crate) contents: Vec<SurfaceContents>,
    pub(crate) info: Option<Info>,
}

impl Surface {
    pub fn new<W: Into<Px>, H: Into<Px>>(width: W, height: H) -> Surface {
        Surface {
            width: width.into(),
            height: height.into(),
            fonts: Arena::new(),
            images: Arena::new(),
            contents: Vec::new(),
            info: None,
        }
    }

    pub fn width(&self) -> Px {
        self.width
    }

    pub fn height(&self) -> Px {
        self.height
    }

    /// The recorded drawing operations, in painting order
    pub fn contents(&self) -> &[SurfaceContents] {
        &self.contents
    }

    /// Sets PDF metadata written on export
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Register a font for use with [Surface::write]. Adding the same font
    /// (or a clone of it) twice returns the same id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        let existing = self
            .fonts
            .iter()
            .find(|(_, known)| known.same_face(&font))
            .map(|(id, _)| id);
        existing.unwrap_or_else(|| self.fonts.alloc(font))
    }

    pub fn font(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    fn add_image(&mut self, image: Image) -> Id<Image> {
        let existing = self
            .images
            .iter()
            .find(|(_, known)| known.same_pixels(&image))
            .map(|(id, _)| id);
        existing.unwrap_or_else(|| self.images.alloc(image))
    }

    fn bounds(&self) -> Rect {
        Rect::new(Px::ZERO, Px::ZERO, self.width, self.height)
    }

    /// Paint the whole surface with a colour, covering anything drawn so far
    pub fn set_background<C: Into<Colour>>(&mut self, colour: C) {
        let style = ShapeStyle::default().colour(colour);
        self.contents
            .push(SurfaceContents::Shape(Shape::Rect(self.bounds()), style));
    }

    /// Draw a rectangle. Position keywords place the rectangle itself, so
    /// `XPos::Right` puts its right edge on the right edge of the surface.
    /// Returns the rectangle that was drawn.
    pub fn rectangle(
        &mut self,
        x: impl Into<XPos>,
        y: impl Into<YPos>,
        width: impl Into<Px>,
        height: impl Into<Px>,
        style: &ShapeStyle,
    ) -> Rect {
        let (width, height) = (width.into(), height.into());
        let rect = Rect::new(
            x.into().resolve(self.width, width),
            y.into().resolve(self.height, height),
            width,
            height,
        );
        self.contents
            .push(SurfaceContents::Shape(Shape::Rect(rect), *style));
        rect
    }

    /// Draw a straight line between two points. Keywords resolve to points on
    /// the surface edges or centre lines.
    pub fn line(
        &mut self,
        x1: impl Into<XPos>,
        y1: impl Into<YPos>,
        x2: impl Into<XPos>,
        y2: impl Into<YPos>,
        style: &ShapeStyle,
    ) {
        let from = (x1.into().point(self.width), y1.into().point(self.height));
        let to = (x2.into().point(self.width), y2.into().point(self.height));
        self.contents
            .push(SurfaceContents::Shape(Shape::Line { from, to }, *style));
    }

    /// Stroke a border around the edge of the surface, entirely inside it
    pub fn outline(&mut self, style: &ShapeStyle) {
        let rect = self.bounds().inset(style.line_width / 2.0);
        self.contents
            .push(SurfaceContents::Shape(Shape::Rect(rect), style.fill(false)));
    }

    /// Outline the surface and draw its vertical and horizontal centre lines
    pub fn gridlines(&mut self, style: &ShapeStyle) {
        self.outline(style);
        self.line(XPos::Center, YPos::Top, XPos::Center, YPos::Bottom, style);
        self.line(XPos::Left, YPos::Center, XPos::Right, YPos::Center, style);
    }

    /// Lay out and draw a block of text, returning its bounding box on the
    /// surface (padding included).
    ///
    /// When `options` leave `max_width` or `max_height` unset, they default to
    /// the room between an absolute position and the surface edge (the full
    /// surface dimension for keywords) less the padding, so the box stays on
    /// the surface. Without a font size the text is therefore sized to fill
    /// that room. Keywords place the bounding box, so
    /// `XPos::Right` puts the right edge of the box on the right edge of the
    /// surface.
    pub fn write(
        &mut self,
        text: &str,
        x: impl Into<XPos>,
        y: impl Into<YPos>,
        font: Id<Font>,
        options: TextOptions,
    ) -> Result<BoundingBox, SurfaceError> {
        let (x, y) = (x.into(), y.into());
        let mut options = options;
        let padding = options.padding;
        let room_x = (x.room(self.width) - padding.horizontal()).max(Px::ZERO);
        let room_y = (y.room(self.height) - padding.vertical()).max(Px::ZERO);
        options.max_width = options.max_width.or(Some(room_x));
        options.max_height = options.max_height.or(Some(room_y));

        let metrics = self.fonts.get(font).ok_or(SurfaceError::UnknownFont)?;
        let layout = layout_text_block(text, metrics, &options)?;

        let bbox = layout.bounding_box;
        let left = x.resolve(self.width, bbox.width);
        let top = y.resolve(self.height, bbox.height);
        let span_font = SpanFont {
            id: font,
            size: layout.font_size,
        };

        let spans: Vec<SpanLayout> = layout
            .lines
            .iter()
            .flat_map(|line| line_spans(line, span_font, options.colour, (left, top)))
            .collect();
        log::debug!(
            "wrote {} lines at font size {} into {}x{} at ({}, {})",
            layout.lines.len(),
            layout.font_size,
            bbox.width,
            bbox.height,
            left,
            top
        );
        if !spans.is_empty() {
            self.contents.push(SurfaceContents::Text(spans));
        }

        Ok(bbox.at(left, top))
    }

    /// Cut the surface down to the window `width` by `height` at (x, y).
    /// Content is shifted so the window's corner becomes the new origin, and
    /// anything outside the window is clipped away.
    pub fn crop(
        &mut self,
        x: impl Into<XPos>,
        y: impl Into<YPos>,
        width: impl Into<Px>,
        height: impl Into<Px>,
    ) {
        let (width, height) = (width.into(), height.into());
        let x = x.into().resolve(self.width, width);
        let y = y.into().resolve(self.height, height);
        log::debug!(
            "cropping {}x{} surface to {}x{} at ({}, {})",
            self.width,
            self.height,
            width,
            height,
            x,
            y
        );

        let group = Group {
            origin: (-x, -y),
            width: self.width,
            height: self.height,
            contents: std::mem::take(&mut self.contents),
        };
        self.contents.push(SurfaceContents::Group(group));
        self.width = width;
        self.height = height;
    }

    /// Draw another surface onto this one. Keywords place the pasted surface,
    /// so `(XPos::Center, YPos::Center)` centres it. The pasted surface's
    /// fonts and images are taken over. Returns where it was placed.
    pub fn paste(&mut self, other: Surface, x: impl Into<XPos>, y: impl Into<YPos>) -> Rect {
        let Surface {
            width,
            height,
            fonts,
            images,
            mut contents,
            ..
        } = other;

        let placed = Rect::new(
            x.into().resolve(self.width, width),
            y.into().resolve(self.height, height),
            width,
            height,
        );

        let font_ids: HashMap<Id<Font>, Id<Font>> = fonts
            .iter()
            .map(|(id, font)| (id, self.add_font(font.clone())))
            .collect();
        let image_ids: HashMap<Id<Image>, Id<Image>> = images
            .iter()
            .map(|(id, image)| (id, self.add_image(image.clone())))
            .collect();
        for item in contents.iter_mut() {
            item.remap(&font_ids, &image_ids);
        }

        log::debug!(
            "pasting {}x{} surface at ({}, {})",
            width,
            height,
            placed.x1,
            placed.y1
        );
        self.contents.push(SurfaceContents::Group(Group {
            origin: (placed.x1, placed.y1),
            width,
            height,
            contents,
        }));
        placed
    }

    /// Draw a raster image with its top-left corner at (x, y), at its pixel
    /// size unless `size` is given. Returns where it was placed.
    pub fn paste_image(
        &mut self,
        image: Image,
        x: impl Into<XPos>,
        y: impl Into<YPos>,
        size: Option<(Px, Px)>,
    ) -> Rect {
        let (width, height) =
            size.unwrap_or((Px::from(image.width()), Px::from(image.height())));
        let position = Rect::new(
            x.into().resolve(self.width, width),
            y.into().resolve(self.height, height),
            width,
            height,
        );
        let image = self.add_image(image);
        self.contents
            .push(SurfaceContents::Image(ImageLayout { image, position }));
        position
    }
}

/// Spans for one laid out line: the whole line as one span, or one span per
/// word when justification stretched the gaps
fn line_spans(
    line: &Line,
    font: SpanFont,
    colour: Colour,
    (left, top): (Px, Px),
) -> Vec<SpanLayout> {
    let baseline = top + line.baseline;
    let span = |text: String, x: Px| SpanLayout {
        text,
        font,
        colour,
        coords: (left + x, baseline),
    };

    match line.words.first() {
        None => Vec::new(),
        Some(_) if line.is_stretched() => line
            .words
            .iter()
            .map(|word| span(word.text.clone(), word.x))
            .collect(),
        Some(first) => vec![span(line.text(), first.x)],
    }
}
