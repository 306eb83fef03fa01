use crate::refs::{ObjectReferences, RefType};
use crate::SurfaceError;
use image::{DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf, Ref};
use std::path::Path;
use std::sync::Arc;

/// A raster image that can be pasted onto a surface. Pixels are shared, so
/// cloning an image (or pasting a surface that holds one) does not copy them.
#[derive(Clone, Debug)]
pub struct Image {
    pixels: Arc<DynamicImage>,
}

struct EncodeOutput {
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an image file from disk; the format is guessed from its contents
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image, SurfaceError> {
        let data = std::fs::read(path.as_ref())?;
        let pixels = image::load_from_memory(&data)?;
        log::debug!(
            "decoded {}x{} image from {:?}",
            pixels.width(),
            pixels.height(),
            path.as_ref()
        );
        Ok(Image::new(pixels))
    }

    pub fn new(pixels: DynamicImage) -> Image {
        Image {
            pixels: Arc::new(pixels),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub(crate) fn same_pixels(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    fn encode(&self) -> EncodeOutput {
        let level = CompressionLevel::DefaultLevel as u8;

        let mask = self.pixels.color().has_alpha().then(|| {
            let alphas: Vec<u8> = self.pixels.pixels().map(|(_, _, p)| p.0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });
        let bytes = compress_to_vec_zlib(self.pixels.to_rgb8().as_raw(), level);

        EncodeOutput { bytes, mask }
    }

    /// Write the image as an RGB image XObject, with a soft mask when the
    /// image carries transparency
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();
        let (width, height) = (self.width() as i32, self.height() as i32);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(Filter::FlateDecode);
        image.width(width);
        image.height(height);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(width);
            s_mask.height(height);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        id
    }

    /// The pixels premultiplied by their alpha, ready to be drawn onto a raster
    pub(crate) fn to_pixmap(&self) -> Option<tiny_skia::Pixmap> {
        let rgba = self.pixels.to_rgba8();
        let size = tiny_skia::IntSize::from_wh(rgba.width(), rgba.height())?;
        let data = rgba
            .pixels()
            .flat_map(|pixel| {
                let [r, g, b, a] = pixel.0;
                let c = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        tiny_skia::Pixmap::from_vec(data, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn transparent_images_get_a_mask() {
        let pixels = RgbaImage::from_pixel(2, 3, Rgba([255, 0, 0, 128]));
        let image = Image::new(DynamicImage::ImageRgba8(pixels));
        assert_eq!((image.width(), image.height()), (2, 3));
        assert!(image.encode().mask.is_some());

        let opaque = Image::new(DynamicImage::new_rgb8(4, 4));
        assert!(opaque.encode().mask.is_none());
    }

    #[test]
    fn pixmaps_are_premultiplied() {
        let pixels = RgbaImage::from_pixel(2, 1, Rgba([255, 100, 0, 0]));
        let pixmap = Image::new(DynamicImage::ImageRgba8(pixels))
            .to_pixmap()
            .expect("non-empty image");
        assert_eq!((pixmap.width(), pixmap.height()), (2, 1));
        assert!(pixmap.data().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn clones_share_pixels() {
        let image = Image::new(DynamicImage::new_rgb8(1, 1));
        assert!(image.same_pixels(&image.clone()));
        assert!(!image.same_pixels(&Image::new(DynamicImage::new_rgb8(1, 1))));
    }
}
