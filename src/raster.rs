//! Rasterisation of surface contents, for PNG export.

use crate::colour::to_skia;
use crate::font::Font;
use crate::image::Image;
use crate::surface::{Group, ImageLayout, Shape, ShapeStyle, SpanLayout, Surface, SurfaceContents};
use crate::SurfaceError;
use id_arena::Arena;
use std::io::Write;
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Paints recorded contents onto a pixmap. Surface coordinates are already
/// top-down, so they map onto pixels without flipping.
struct Rasteriser<'s> {
    pixmap: Pixmap,
    fonts: &'s Arena<Font>,
    images: &'s Arena<Image>,
}

impl<'s> Rasteriser<'s> {
    fn draw(&mut self, contents: &[SurfaceContents], transform: Transform, clip: Option<&Mask>) {
        for item in contents.iter() {
            match item {
                SurfaceContents::Shape(shape, style) => self.draw_shape(shape, style, transform, clip),
                SurfaceContents::Text(spans) => self.draw_text(spans, transform, clip),
                SurfaceContents::Image(image) => self.draw_image(image, transform, clip),
                SurfaceContents::Group(group) => self.draw_group(group, transform, clip),
            }
        }
    }

    fn draw_shape(&mut self, shape: &Shape, style: &ShapeStyle, transform: Transform, clip: Option<&Mask>) {
        let mut paint = Paint::default();
        paint.set_color(to_skia(style.colour, style.alpha));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.line_width.0,
            line_cap: style.line_cap.into(),
            ..Stroke::default()
        };

        match shape {
            Shape::Rect(rect) => {
                let Some(path) = rect_path(rect.x1.0, rect.y1.0, rect.width().0, rect.height().0) else {
                    return;
                };
                if style.fill {
                    self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, clip);
                } else {
                    self.pixmap.stroke_path(&path, &paint, &stroke, transform, clip);
                }
            }
            Shape::Line { from, to } => {
                let mut builder = PathBuilder::new();
                builder.move_to(from.0 .0, from.1 .0);
                builder.line_to(to.0 .0, to.1 .0);
                if let Some(path) = builder.finish() {
                    self.pixmap.stroke_path(&path, &paint, &stroke, transform, clip);
                }
            }
        }
    }

    fn draw_text(&mut self, spans: &[SpanLayout], transform: Transform, clip: Option<&Mask>) {
        let fonts = self.fonts;
        for span in spans.iter() {
            let Some(font) = fonts.get(span.font.id) else {
                log::warn!("skipping span drawn with an unregistered font: {:?}", span.text);
                continue;
            };

            let mut paint = Paint::default();
            paint.set_color(to_skia(span.colour, 1.0));
            paint.anti_alias = true;

            let (mut x, baseline) = (span.coords.0 .0, span.coords.1 .0);
            for ch in span.text.chars().filter(|ch| !ch.is_control()) {
                if let Some(path) = font.glyph_path(ch, span.font.size, (x, baseline)) {
                    self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, clip);
                }
                x += font.advance(ch, span.font.size).0;
            }
        }
    }

    fn draw_image(&mut self, image: &ImageLayout, transform: Transform, clip: Option<&Mask>) {
        let Some(pixmap) = self.images.get(image.image).and_then(Image::to_pixmap) else {
            log::warn!("skipping image that cannot be rasterised");
            return;
        };
        let place = transform
            .pre_translate(image.position.x1.0, image.position.y1.0)
            .pre_scale(
                image.position.width().0 / pixmap.width() as f32,
                image.position.height().0 / pixmap.height() as f32,
            );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, pixmap.as_ref(), &paint, place, clip);
    }

    /// Pasted content is drawn in its own space, clipped to its bounds and
    /// to every clip around it
    fn draw_group(&mut self, group: &Group, transform: Transform, clip: Option<&Mask>) {
        let transform = transform.pre_translate(group.origin.0 .0, group.origin.1 .0);
        let Some(bounds) = rect_path(0.0, 0.0, group.width.0, group.height.0) else {
            return;
        };

        let mask = match clip {
            Some(outer) => {
                let mut mask = outer.clone();
                mask.intersect_path(&bounds, FillRule::Winding, false, transform);
                mask
            }
            None => {
                let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
                    return;
                };
                mask.fill_path(&bounds, FillRule::Winding, false, transform);
                mask
            }
        };

        self.draw(&group.contents, transform, Some(&mask));
    }
}

fn rect_path(x: f32, y: f32, width: f32, height: f32) -> Option<Path> {
    tiny_skia::Rect::from_xywh(x, y, width, height).map(PathBuilder::from_rect)
}

impl Surface {
    /// Rasterise the surface at one pixel per surface unit. The raster starts
    /// out transparent; use [Surface::set_background] for an opaque image.
    pub fn to_pixmap(&self) -> Result<Pixmap, SurfaceError> {
        let empty = || SurfaceError::EmptyRaster {
            width: self.width,
            height: self.height,
        };
        // `as` saturates, so negative or NaN sizes become empty rasters
        let (width, height) = (self.width.0.ceil() as u32, self.height.0.ceil() as u32);
        let pixmap = Pixmap::new(width, height).ok_or_else(empty)?;

        let mut rasteriser = Rasteriser {
            pixmap,
            fonts: &self.fonts,
            images: &self.images,
        };
        rasteriser.draw(&self.contents, Transform::identity(), None);
        log::debug!("rasterised {}x{} surface", width, height);
        Ok(rasteriser.pixmap)
    }

    pub(crate) fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.to_pixmap()?
            .encode_png()
            .map_err(|e| SurfaceError::PngEncoding(e.to_string()))
    }

    /// Write the surface to `w` as a PNG the size of the surface
    pub fn write_png<W: Write>(&self, mut w: W) -> Result<(), SurfaceError> {
        let png = self.encode_png()?;
        w.write_all(png.as_slice()).map_err(Into::into)
    }
}
