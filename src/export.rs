use crate::content::{render_contents, Opacities};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::surface::Surface;
use crate::units::Px;
use crate::SurfaceError;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};
use std::io::Write;
use std::path::Path;

impl Surface {
    /// Write the surface to `w` as a single-page PDF the size of the surface,
    /// with every font and image it uses embedded.
    ///
    /// The document is assembled in memory and written in one go.
    pub fn write_pdf<W: Write>(&self, mut w: W) -> Result<(), SurfaceError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);
        let page_id = refs.gen(RefType::Page);
        let content_id = refs.gen(RefType::Content);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        writer.pages(page_tree_id).count(1).kids([page_id]);

        let font_refs: Vec<(usize, Ref)> = self
            .fonts
            .iter()
            .map(|(id, font)| (id.index(), font.write(&mut refs, id.index(), &mut writer)))
            .collect();
        let image_refs: Vec<(usize, Ref)> = self
            .images
            .iter()
            .map(|(id, image)| (id.index(), image.write(&mut refs, id.index(), &mut writer)))
            .collect();

        let mut rendered = Vec::new();
        let mut opacities = Opacities::default();
        render_contents(
            &self.contents,
            self.height,
            &self.fonts,
            &mut opacities,
            &mut rendered,
        )?;
        let compressed =
            compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        let opacity_refs: Vec<(usize, Ref)> = opacities
            .iter()
            .map(|(index, alpha)| {
                let id = refs.gen(RefType::Opacity(index));
                writer
                    .ext_graphics(id)
                    .non_stroking_alpha(alpha)
                    .stroking_alpha(alpha);
                (index, id)
            })
            .collect();

        let mut page = writer.page(page_id);
        let media_box = Rect::new(Px::ZERO, Px::ZERO, self.width, self.height);
        page.media_box(media_box.to_pdf(self.height));
        page.parent(page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (index, id) in font_refs.iter() {
            fonts.pair(Name(format!("F{index}").as_bytes()), *id);
        }
        fonts.finish();
        let mut x_objects = resources.x_objects();
        for (index, id) in image_refs.iter() {
            x_objects.pair(Name(format!("I{index}").as_bytes()), *id);
        }
        x_objects.finish();
        if !opacity_refs.is_empty() {
            let mut states = resources.ext_g_states();
            for (index, id) in opacity_refs.iter() {
                states.pair(Name(format!("A{index}").as_bytes()), *id);
            }
            states.finish();
        }
        resources.finish();
        page.finish();

        writer.catalog(catalog_id).pages(page_tree_id);

        let bytes = writer.finish();
        log::debug!(
            "exported {}x{} surface with {} fonts and {} images: {} bytes",
            self.width,
            self.height,
            font_refs.len(),
            image_refs.len(),
            bytes.len()
        );
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }

    /// Save the surface to a file, choosing the format from the extension:
    /// `.pdf` writes vector output and `.png` a raster the size of the
    /// surface. Any other extension fails with
    /// [SurfaceError::UnsupportedFormat] before a file is created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SurfaceError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => {
                let file = std::fs::File::create(path)?;
                self.write_pdf(std::io::BufWriter::new(file))?;
            }
            "png" => {
                // rasterise first so a failure leaves no empty file behind
                let png = self.encode_png()?;
                std::fs::write(path, png)?;
            }
            _ => return Err(SurfaceError::UnsupportedFormat(extension)),
        }
        log::info!("saved {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{colours, ShapeStyle, Surface, SurfaceError, XPos, YPos};

    fn pdf_of(surface: &Surface) -> Vec<u8> {
        let mut out = Vec::new();
        surface.write_pdf(&mut out).expect("can write pdf");
        out
    }

    #[test]
    fn writes_a_complete_document() {
        let mut surface = Surface::new(600, 800);
        surface.set_background(colours::WHITE);
        surface.rectangle(XPos::Center, YPos::Center, 100, 100, &ShapeStyle::default());

        let pdf = pdf_of(&surface);
        assert!(pdf.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/MediaBox [0 0 600 800]"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn unknown_extensions_are_not_supported() {
        let surface = Surface::new(10, 10);
        let path = std::env::temp_dir().join("simple-surface-unsupported.svg");
        match surface.save(&path) {
            Err(SurfaceError::UnsupportedFormat(ext)) => assert_eq!(ext, "svg"),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn translucent_shapes_get_graphics_states() {
        let mut surface = Surface::new(100, 100);
        surface.rectangle(0, 0, 50, 50, &ShapeStyle::default().rgba(255, 0, 0, 51));
        surface.rectangle(25, 25, 50, 50, &ShapeStyle::default().colour(colours::BLUE));

        let text = String::from_utf8_lossy(&pdf_of(&surface)).into_owned();
        assert!(text.contains("/ExtGState"));
        assert!(text.contains("/A0"));
        assert!(text.contains("/ca 0.2"));
        assert!(text.contains("/CA 0.2"));
    }

    #[test]
    fn opaque_surfaces_need_no_graphics_states() {
        let mut surface = Surface::new(100, 100);
        surface.set_background(colours::WHITE);
        let text = String::from_utf8_lossy(&pdf_of(&surface)).into_owned();
        assert!(!text.contains("/ExtGState"));
    }
}
