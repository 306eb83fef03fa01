use crate::{
    refs::{ObjectReferences, RefType},
    units::Px,
    SurfaceError,
};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OutlineBuilder, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// The font-metrics queries text layout needs. Implementations must be
/// deterministic: the same text at the same size always measures the same.
///
/// All values are in pixels at the given font size. [FontMetrics::descent]
/// follows the TrueType convention and is usually negative.
pub trait FontMetrics {
    /// The advance width of `text` set on a single line
    fn text_width(&self, text: &str, size: Px) -> Px;

    /// Distance from the baseline to the top of the tallest glyphs
    fn ascent(&self, size: Px) -> Px;

    /// Distance from the baseline to the bottom of the lowest glyphs
    fn descent(&self, size: Px) -> Px;

    /// Extra gap the font asks for between lines
    fn leading(&self, _size: Px) -> Px {
        Px::ZERO
    }

    /// How far a second line sits below the first when lines are set solid
    fn line_height(&self, size: Px) -> Px {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }
}

/// A parsed TrueType or OpenType font. The whole font file is embedded in the
/// exported PDF, so large fonts noticeably grow the output.
///
/// The parsed face is reference counted: cloning a font is cheap, and
/// surfaces pasted into one another share a single embedded copy.
#[derive(Clone)]
pub struct Font {
    face: Arc<OwnedFace>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("weight", &self.weight())
            .finish()
    }
}

/// One glyph reachable from a unicode codepoint
struct Glyph {
    id: u16,
    ch: char,
    advance: u16,
    height: i16,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, SurfaceError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            face: Arc::new(face),
        })
    }

    /// Read and parse a font file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Font, SurfaceError> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("loaded {} bytes of font data from {:?}", bytes.len(), path.as_ref());
        Font::load(bytes)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Px) -> f32 {
        size.0 / self.face().units_per_em() as f32
    }

    fn lookup_name(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the font carries one
    pub fn name(&self) -> Option<String> {
        self.lookup_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the font carries one
    pub fn family(&self) -> Option<String> {
        self.lookup_name(owned_ttf_parser::name_id::FAMILY)
    }

    /// The weight class of the font; 400 is regular, 700 is bold
    pub fn weight(&self) -> u16 {
        self.face().weight().to_number()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own glyph, else the replacement
    /// character, else `?`, else `.notdef`
    pub(crate) fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Horizontal advance of the glyph drawn for `ch`
    pub(crate) fn advance(&self, ch: char, size: Px) -> Px {
        let advance = self
            .face()
            .glyph_hor_advance(GlyphId(self.glyph_or_fallback(ch)))
            .unwrap_or_default();
        Px(advance as f32 * self.scaling(size))
    }

    /// The outline of the glyph drawn for `ch` at `size`, with its origin
    /// on the baseline at `origin`, in top-down surface coordinates.
    /// Glyphs without an outline, such as spaces, give `None`.
    pub(crate) fn glyph_path(&self, ch: char, size: Px, origin: (f32, f32)) -> Option<tiny_skia::Path> {
        let mut outline = GlyphOutline {
            builder: tiny_skia::PathBuilder::new(),
            scale: self.scaling(size),
            origin,
        };
        self.face()
            .outline_glyph(GlyphId(self.glyph_or_fallback(ch)), &mut outline)?;
        outline.builder.finish()
    }

    pub(crate) fn same_face(&self, other: &Font) -> bool {
        Arc::ptr_eq(&self.face, &other.face)
    }

    fn glyphs(&self) -> Vec<Glyph> {
        let face = self.face();

        // first codepoint wins when several map to the same glyph
        let mut chars: BTreeMap<u16, char> = BTreeMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
                subtable.codepoints(|codepoint| {
                    let Ok(ch) = char::try_from(codepoint) else {
                        return;
                    };
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|i| i.0 > 0) {
                        chars.entry(index.0).or_insert(ch);
                    }
                });
            }
        }

        chars
            .into_iter()
            .filter_map(|(id, ch)| {
                let gid = GlyphId(id);
                let advance = face.glyph_hor_advance(gid)?;
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| {
                        bbox.y_max
                            .saturating_sub(bbox.y_min)
                            .saturating_sub(face.descender())
                    })
                    .unwrap_or(1000);
                Some(Glyph {
                    id,
                    ch,
                    advance,
                    height,
                })
            })
            .collect()
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &[Glyph],
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, glyphs, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let scaling = 1000.0 / self.face().units_per_em() as f32;

        // the most frequent advance becomes the default width
        let mut counts: HashMap<u16, usize> = HashMap::new();
        for glyph in glyphs {
            *counts.entry(glyph.advance).or_insert(0) += 1;
        }
        let default_width = counts
            .into_iter()
            .max_by_key(|&(advance, count)| (count, advance))
            .map(|(advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        // runs of consecutive glyph ids
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for glyph in glyphs {
            let width = glyph.advance as f32 * scaling;
            match runs.last_mut() {
                Some((start, widths)) if *start as usize + widths.len() == glyph.id as usize => {
                    widths.push(width)
                }
                _ => runs.push((glyph.id, vec![width])),
            }
        }

        let notdef = self.face().glyph_hor_advance(GlyphId(0)).unwrap_or(1000) as f32 * scaling;
        let base_font = format!("F{font_index}");

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [notdef]);
        for (start, run) in runs {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &[Glyph],
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let max_width = glyphs.iter().map(|g| g.advance).max().unwrap_or_default() as f32;
        let max_height = glyphs.iter().map(|g| g.height).max().unwrap_or_default() as f32;
        let avg_width = if glyphs.is_empty() {
            0.0
        } else {
            glyphs.iter().map(|g| g.advance as f32).sum::<f32>() / glyphs.len() as f32
        };

        let name = self
            .name()
            .map(|name| name.replace(' ', ""))
            .unwrap_or_else(|| format!("F{font_index}"));
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let bbox = face.global_bounding_box();

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(self.weight());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: (bbox.y_max as f32).max(max_height) * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().map(|h| h as f32 * scaling);
        descriptor.cap_height(cap_height.unwrap_or(700.0));
        descriptor.x_height(
            face.x_height()
                .map(|h| h as f32 * scaling)
                .or(cap_height)
                .unwrap_or(500.0),
        );
        // TODO: derive the stem width from the OS/2 weight class instead of a fixed guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width * scaling);
        descriptor.missing_width(max_width * scaling);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &[Glyph],
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        for block in glyphs.chunks(100) {
            let _ = writeln!(map, "{} beginbfchar", block.len());
            for glyph in block {
                let mut units = [0u16; 2];
                let _ = write!(map, "<{:04x}> <", glyph.id);
                for unit in glyph.ch.encode_utf16(&mut units) {
                    let _ = write!(map, "{unit:04x}");
                }
                map.push_str(">\n");
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = compress_to_vec_zlib(map.as_bytes(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    /// Embed the font as a Type0 font with an Identity-H encoding, so text is
    /// written as two-byte glyph ids
    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let glyphs = self.glyphs();
        let id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let base_font = format!("F{font_index}");
        let mut font = writer.type0_font(id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);

        id
    }
}

impl FontMetrics for Font {
    fn text_width(&self, text: &str, size: Px) -> Px {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.advance(ch, size))
            .sum()
    }

    fn ascent(&self, size: Px) -> Px {
        Px(self.face().ascender() as f32 * self.scaling(size))
    }

    fn descent(&self, size: Px) -> Px {
        Px(self.face().descender() as f32 * self.scaling(size))
    }

    fn leading(&self, size: Px) -> Px {
        Px(self.face().line_gap() as f32 * self.scaling(size))
    }
}

/// Collects a glyph outline in font units into a path, scaled and flipped
/// so y grows downwards from the baseline
struct GlyphOutline {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    origin: (f32, f32),
}

impl GlyphOutline {
    fn x(&self, x: f32) -> f32 {
        self.origin.0 + x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.origin.1 - y * self.scale
    }
}

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1, x, y) = (self.x(x1), self.y(y1), self.x(x), self.y(y));
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.x(x1), self.y(y1));
        let (x2, y2) = (self.x(x2), self.y(y2));
        let (x, y) = (self.x(x), self.y(y));
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
