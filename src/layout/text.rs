use std::fmt;
use std::str::FromStr;

use crate::colour::Colour;
use crate::error::LayoutError;
use crate::font::FontMetrics;
use crate::layout::Padding;
use crate::units::Px;

/// Font size used when no size is requested and there is no maximum height to fit into
pub const DEFAULT_FONT_SIZE: Px = Px(12.0);

/// The smallest font size tried while fitting text into a maximum height
pub const MIN_FONT_SIZE: Px = Px(1.0);

/// Slack for floating point error when comparing measured widths against limits
const EPSILON: f32 = 1e-3;

/// Horizontal alignment of each line within the text block
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    /// Stretch the gaps between words so the line spans the whole block
    Justified,
}

impl FromStr for Alignment {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" | "centre" => Ok(Alignment::Center),
            "justified" | "justify" => Ok(Alignment::Justified),
            _ => Err(LayoutError::InvalidAlignment(s.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Justified => "justified",
        })
    }
}

/// How a block of text is sized, wrapped and aligned.
///
/// All fields have defaults, so options are usually built by chaining setters
/// onto [TextOptions::default]:
///
/// ```
/// use simple_surface::layout::{Alignment, Padding, TextOptions};
/// use simple_surface::Px;
///
/// let options = TextOptions::default()
///     .max_width(Px(300.0))
///     .alignment(Alignment::Justified)
///     .padding(Padding::all(5));
/// assert_eq!(options.font_size, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    /// Size to set the text at. When `None`, the largest size that fits
    /// `max_height` is chosen, or [DEFAULT_FONT_SIZE] without a `max_height`
    pub font_size: Option<Px>,
    /// Lines are wrapped so they are no wider than this
    pub max_width: Option<Px>,
    /// Height the text must fit into when the font size is chosen automatically
    pub max_height: Option<Px>,
    pub alignment: Alignment,
    /// Whether the final line of a paragraph is stretched when justifying
    pub justify_last_line: bool,
    /// Multiplier on the font's line height between consecutive baselines
    pub line_spacing: f32,
    pub padding: Padding,
    pub colour: Colour,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            font_size: None,
            max_width: None,
            max_height: None,
            alignment: Alignment::Left,
            justify_last_line: false,
            line_spacing: 1.0,
            padding: Padding::empty(),
            colour: Colour::default(),
        }
    }
}

impl TextOptions {
    pub fn font_size<D: Into<Px>>(mut self, size: D) -> Self {
        self.font_size = Some(size.into());
        self
    }

    pub fn max_width<D: Into<Px>>(mut self, width: D) -> Self {
        self.max_width = Some(width.into());
        self
    }

    pub fn max_height<D: Into<Px>>(mut self, height: D) -> Self {
        self.max_height = Some(height.into());
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn justify_last_line(mut self, justify: bool) -> Self {
        self.justify_last_line = justify;
        self
    }

    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn colour<C: Into<Colour>>(mut self, colour: C) -> Self {
        self.colour = colour.into();
        self
    }

    fn validate(&self) -> Result<(), LayoutError> {
        self.padding.validate()?;

        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(LayoutError::InvalidOptions(format!(
                "line spacing must be positive, got {}",
                self.line_spacing
            )));
        }
        let dimensions = [
            ("font size", self.font_size),
            ("max width", self.max_width),
            ("max height", self.max_height),
        ];
        for (name, value) in dimensions {
            match value {
                Some(v) if !v.is_finite() || v < Px::ZERO => {
                    return Err(LayoutError::InvalidOptions(format!(
                        "{name} must be a non-negative number, got {}",
                        v.0
                    )))
                }
                _ => {}
            }
        }
        if self.font_size == Some(Px::ZERO) {
            return Err(LayoutError::InvalidOptions(
                "font size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// A word placed on a line
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    /// Natural advance width of the word
    pub width: Px,
    /// Offset of the word's left edge from the left of the bounding box
    pub x: Px,
}

/// A single laid out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
    /// Width of the words separated by single spaces, before any justification
    pub width: Px,
    pub height: Px,
    /// Offset of the line's left edge from the left edge of the text, due to alignment
    pub x: Px,
    /// Space added to every gap between words when the line is justified
    pub word_spacing: Px,
    /// Distance from the top of the bounding box to this line's baseline
    pub baseline: Px,
    /// Whether the line was ended by a paragraph break (or the end of the text)
    /// rather than by running out of room
    pub ends_paragraph: bool,
}

impl Line {
    /// The line's words joined by single spaces
    pub fn text(&self) -> String {
        let words: Vec<&str> = self.words.iter().map(|w| w.text.as_str()).collect();
        words.join(" ")
    }

    /// Whether justification widened the gaps on this line
    pub fn is_stretched(&self) -> bool {
        self.word_spacing > Px::ZERO
    }

    /// Width of the line as drawn, including any justification
    pub fn rendered_width(&self) -> Px {
        let gaps = self.words.len().saturating_sub(1) as f32;
        self.width + self.word_spacing * gaps
    }
}

/// The rectangle enclosing a laid out block, padding included
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    /// Left edge
    pub x: Px,
    /// Top edge
    pub y: Px,
    pub width: Px,
    pub height: Px,
}

impl BoundingBox {
    /// The same box moved so its top-left corner sits at (x, y)
    pub fn at(self, x: Px, y: Px) -> BoundingBox {
        BoundingBox { x, y, ..self }
    }
}

/// Result of laying out a block of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// The font size the text was set at
    pub font_size: Px,
    pub lines: Vec<Line>,
    /// Width of the text area, excluding padding
    pub text_width: Px,
    /// Height of the text area, excluding padding
    pub text_height: Px,
    /// Bounding box including padding, with its origin at (0, 0)
    pub bounding_box: BoundingBox,
}

/// A block of text to lay out: the text, the font to measure it with, and the options
pub struct TextBlock<'a, F: ?Sized> {
    pub text: &'a str,
    pub font: &'a F,
    pub options: TextOptions,
}

impl<'a, F: FontMetrics + ?Sized> TextBlock<'a, F> {
    pub fn new(text: &'a str, font: &'a F) -> Self {
        TextBlock {
            text,
            font,
            options: TextOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TextOptions) -> Self {
        self.options = options;
        self
    }

    pub fn layout(&self) -> Result<TextLayout, LayoutError> {
        layout_text_block(self.text, self.font, &self.options)
    }
}

/// A line as produced by wrapping, before it is positioned
struct WrappedLine<'t> {
    words: Vec<(&'t str, Px)>,
    width: Px,
    ends_paragraph: bool,
}

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text<F: FontMetrics + ?Sized>(text: &str, font: &F, size: Px) -> Px {
    font.text_width(text, size)
}

/// Splits text into paragraphs on newlines, normalising `\r\n` and lone `\r`.
/// Empty text has no paragraphs; an empty line between paragraphs is kept as
/// an empty paragraph.
fn paragraphs(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Greedily packs the words of each paragraph into lines no wider than
/// `max_width`. A word wider than `max_width` gets a line of its own.
fn wrap<'t, F: FontMetrics + ?Sized>(
    paragraphs: &'t [String],
    font: &F,
    size: Px,
    max_width: Option<Px>,
) -> Vec<WrappedLine<'t>> {
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();

    for paragraph in paragraphs {
        let mut words: Vec<(&str, Px)> = Vec::new();
        let mut width = Px::ZERO;

        for word in paragraph.split_whitespace() {
            let word_width = font.text_width(word, size);
            if words.is_empty() {
                words.push((word, word_width));
                width = word_width;
                continue;
            }

            let candidate = width + space + word_width;
            match max_width {
                Some(max) if candidate.0 > max.0 + EPSILON => {
                    lines.push(WrappedLine {
                        words: std::mem::take(&mut words),
                        width,
                        ends_paragraph: false,
                    });
                    words.push((word, word_width));
                    width = word_width;
                }
                _ => {
                    words.push((word, word_width));
                    width = candidate;
                }
            }
        }

        lines.push(WrappedLine {
            words,
            width,
            ends_paragraph: true,
        });
    }

    lines
}

fn text_height(lines: usize, line_height: Px, line_spacing: f32) -> Px {
    match lines {
        0 => Px::ZERO,
        n => line_height + line_height * line_spacing * (n - 1) as f32,
    }
}

fn fits_height<F: FontMetrics + ?Sized>(
    lines: &[WrappedLine<'_>],
    font: &F,
    size: Px,
    options: &TextOptions,
    max_height: Px,
) -> bool {
    let height = text_height(lines.len(), font.line_height(size), options.line_spacing);
    height.0 <= max_height.0 + EPSILON
}

/// No line, including a lone over-wide word, is wider than `max_width`
fn fits_width(lines: &[WrappedLine<'_>], max_width: Option<Px>) -> bool {
    match max_width {
        Some(max) => lines.iter().all(|line| line.width.0 <= max.0 + EPSILON),
        None => true,
    }
}

/// Binary search for the largest whole pixel size in `MIN_FONT_SIZE..=largest` that
/// `accept` takes. Once a size is rejected, every larger size must be too.
fn largest_accepted(largest: u32, mut accept: impl FnMut(u32) -> bool) -> Option<u32> {
    let mut low = MIN_FONT_SIZE.0 as u32;
    let mut high = largest;
    let mut best = None;
    while low <= high {
        let mid = low + (high - low) / 2;
        if accept(mid) {
            best = Some(mid);
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }
    best
}

/// Picks the font size and wraps the text at that size.
///
/// Without an explicit size and with a maximum height, whole pixel sizes are
/// searched from [MIN_FONT_SIZE] up to the largest at which a single line
/// fits the height. The largest size whose lines fit both the height and
/// `max_width` wins. When a word overflows `max_width` at every size, the
/// largest size that fits the height is used instead.
fn size_and_wrap<'t, F: FontMetrics + ?Sized>(
    paragraphs: &'t [String],
    font: &F,
    options: &TextOptions,
) -> Result<(Px, Vec<WrappedLine<'t>>), LayoutError> {
    let max_height = match (options.font_size, options.max_height) {
        (Some(size), _) => {
            return Ok((size, wrap(paragraphs, font, size, options.max_width)));
        }
        (None, None) => {
            return Ok((
                DEFAULT_FONT_SIZE,
                wrap(paragraphs, font, DEFAULT_FONT_SIZE, options.max_width),
            ));
        }
        (None, Some(max_height)) => max_height,
    };

    let unit_line_height = font.line_height(Px(1.0));
    // saturates for huge heights
    let largest = if unit_line_height > Px::ZERO {
        ((max_height / unit_line_height).floor() as u32).max(MIN_FONT_SIZE.0 as u32)
    } else {
        MIN_FONT_SIZE.0 as u32
    };

    let attempt = |size: u32, check_width: bool| {
        let size = Px(size as f32);
        let lines = wrap(paragraphs, font, size, options.max_width);
        let fits = fits_height(&lines, font, size, options, max_height)
            && (!check_width || fits_width(&lines, options.max_width));
        log::trace!("font size {} fits into {}: {}", size, max_height, fits);
        fits
    };

    let chosen = largest_accepted(largest, |size| attempt(size, true)).or_else(|| {
        log::debug!(
            "a word overflows {:?} at every size, fitting the height only",
            options.max_width
        );
        largest_accepted(largest, |size| attempt(size, false))
    });

    match chosen {
        Some(size) => {
            let size = Px(size as f32);
            let lines = wrap(paragraphs, font, size, options.max_width);
            log::debug!(
                "fitted {} lines into {} at font size {}",
                lines.len(),
                max_height,
                size
            );
            Ok((size, lines))
        }
        None => Err(LayoutError::FitFailure { max_height }),
    }
}

/// Lays out a block of text: chooses the font size, wraps the text into
/// lines, aligns and justifies each line, and computes the bounding box.
///
/// # Wrapping
///
/// Words are packed greedily while the line, measured with single spaces
/// between words, stays within `max_width`. A newline always starts a new
/// line. A word wider than `max_width` is placed on a line by itself and
/// overflows, which is not an error.
///
/// # Alignment and justification
///
/// Lines are aligned within the container, which is `max_width` when given
/// and the widest line otherwise. When justifying, the extra room on a line
/// is spread evenly over its gaps, except on the last line of a paragraph
/// (unless `justify_last_line` is set), which is left aligned instead.
///
/// # Bounding box
///
/// Width is the container width (or the widest line, if a lone word
/// overflows it) plus left and right padding. Height is the height of the
/// first line plus `line_height * line_spacing` for every further line, plus
/// top and bottom padding.
///
/// # Errors
///
/// * [LayoutError::FitFailure] when the size is chosen automatically and the
///   text does not fit `max_height` even at [MIN_FONT_SIZE]
/// * [LayoutError::InvalidPadding] and [LayoutError::InvalidOptions] for
///   negative or non-finite inputs
pub fn layout_text_block<F: FontMetrics + ?Sized>(
    text: &str,
    font: &F,
    options: &TextOptions,
) -> Result<TextLayout, LayoutError> {
    options.validate()?;

    let paragraphs = paragraphs(text);
    let (font_size, wrapped) = size_and_wrap(&paragraphs, font, options)?;

    let space = font.text_width(" ", font_size);
    let ascent = font.ascent(font_size);
    let line_height = font.line_height(font_size);
    let advance = line_height * options.line_spacing;

    let widest = wrapped
        .iter()
        .map(|line| line.width)
        .fold(Px::ZERO, Px::max);
    let container = options.max_width.unwrap_or(widest);
    let text_width = container.max(widest);

    let padding = options.padding;
    let last = wrapped.len().saturating_sub(1);
    let lines: Vec<Line> = wrapped
        .into_iter()
        .enumerate()
        .map(|(index, wrapped)| {
            let gaps = wrapped.words.len().saturating_sub(1);
            let is_paragraph_end = index == last || wrapped.ends_paragraph;
            let stretch = options.alignment == Alignment::Justified
                && gaps > 0
                && (options.justify_last_line || !is_paragraph_end)
                && container > wrapped.width;

            let word_spacing = if stretch {
                (container - wrapped.width) / gaps as f32
            } else {
                Px::ZERO
            };
            let slack = (container - wrapped.width).max(Px::ZERO);
            let x = match options.alignment {
                Alignment::Left | Alignment::Justified => Px::ZERO,
                Alignment::Right => slack,
                Alignment::Center => slack / 2.0,
            };

            let mut cursor = padding.left + x;
            let words = wrapped
                .words
                .into_iter()
                .map(|(word, width)| {
                    let placed = Word {
                        text: word.to_string(),
                        width,
                        x: cursor,
                    };
                    cursor += width + space + word_spacing;
                    placed
                })
                .collect();

            Line {
                words,
                width: wrapped.width,
                height: line_height,
                x,
                word_spacing,
                baseline: padding.top + ascent + advance * index as f32,
                ends_paragraph: wrapped.ends_paragraph,
            }
        })
        .collect();

    let text_height = text_height(lines.len(), line_height, options.line_spacing);
    let bounding_box = BoundingBox {
        x: Px::ZERO,
        y: Px::ZERO,
        width: text_width + padding.horizontal(),
        height: text_height + padding.vertical(),
    };

    Ok(TextLayout {
        font_size,
        lines,
        text_width,
        text_height,
        bounding_box,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character advances by `advance` em; ascent 0.8em, descent
    /// -0.2em and leading 0.2em, so lines are 1.2em apart
    struct Monospace {
        advance: f32,
    }

    impl FontMetrics for Monospace {
        fn text_width(&self, text: &str, size: Px) -> Px {
            Px(text.chars().count() as f32 * self.advance * size.0)
        }

        fn ascent(&self, size: Px) -> Px {
            size * 0.8
        }

        fn descent(&self, size: Px) -> Px {
            size * -0.2
        }

        fn leading(&self, size: Px) -> Px {
            size * 0.2
        }
    }

    const FONT: Monospace = Monospace { advance: 0.5 };

    fn texts(layout: &TextLayout) -> Vec<String> {
        layout.lines.iter().map(Line::text).collect()
    }

    fn close(a: Px, b: Px) -> bool {
        (a.0 - b.0).abs() < 1e-3
    }

    #[test]
    fn alignment_keywords_parse() {
        assert_eq!("left".parse::<Alignment>(), Ok(Alignment::Left));
        assert_eq!("Center".parse::<Alignment>(), Ok(Alignment::Center));
        assert_eq!("justified".parse::<Alignment>(), Ok(Alignment::Justified));
        assert_eq!(
            "middle".parse::<Alignment>(),
            Err(LayoutError::InvalidAlignment("middle".to_string()))
        );
    }

    #[test]
    fn wraps_greedily_within_max_width() {
        // 10px per character at size 20
        let options = TextOptions::default().font_size(20).max_width(100);
        let layout = layout_text_block("aaa bbb ccc dddd eeeeee", &FONT, &options).unwrap();
        assert_eq!(texts(&layout), vec!["aaa bbb", "ccc dddd", "eeeeee"]);
        for line in &layout.lines {
            assert!(line.width <= Px(100.0));
        }
    }

    #[test]
    fn over_wide_word_gets_its_own_line() {
        let options = TextOptions::default().font_size(20).max_width(50);
        let layout = layout_text_block("hi enormousword yo", &FONT, &options).unwrap();
        assert_eq!(texts(&layout), vec!["hi", "enormousword", "yo"]);
        assert_eq!(layout.lines[1].width, Px(120.0));
        // the box still encloses the overflowing word
        assert_eq!(layout.bounding_box.width, Px(120.0));
    }

    #[test]
    fn newlines_always_break() {
        let options = TextOptions::default().font_size(10).max_width(1000);
        let layout = layout_text_block("one\ntwo\r\n\nthree", &FONT, &options).unwrap();
        assert_eq!(texts(&layout), vec!["one", "two", "", "three"]);
        assert!(layout.lines.iter().all(|line| line.ends_paragraph));
    }

    #[test]
    fn empty_text_has_no_lines() {
        let options = TextOptions::default()
            .font_size(10)
            .padding(Padding::all(4));
        let layout = layout_text_block("", &FONT, &options).unwrap();
        assert!(layout.lines.is_empty());
        assert_eq!(layout.bounding_box.height, Px(8.0));
        assert_eq!(layout.bounding_box.width, Px(8.0));
    }

    #[test]
    fn right_and_center_alignment_offsets() {
        let base = TextOptions::default().font_size(20).max_width(100);

        let right = layout_text_block("abc", &FONT, &base.clone().alignment(Alignment::Right))
            .unwrap();
        assert_eq!(right.lines[0].x, Px(70.0));
        assert_eq!(right.lines[0].words[0].x, Px(70.0));

        let center = layout_text_block("abc", &FONT, &base.alignment(Alignment::Center)).unwrap();
        assert_eq!(center.lines[0].x, Px(35.0));
    }

    #[test]
    fn justification_spans_full_width_except_last_line() {
        let options = TextOptions::default()
            .font_size(20)
            .max_width(300)
            .alignment(Alignment::Justified);
        let text = "This text is justified. Notice how it stretches to each side of its \
                    container within the padding. For this example, the last line will be \
                    left to not be justified:\nhere is the last line.";
        let layout = layout_text_block(text, &FONT, &options).unwrap();

        let (last, rest) = layout.lines.split_last().unwrap();
        assert_eq!(last.text(), "here is the last line.");
        assert!(rest.iter().filter(|line| !line.ends_paragraph).count() > 2);
        for line in rest.iter().filter(|line| !line.ends_paragraph) {
            assert!(close(line.rendered_width(), Px(300.0)), "{line:?}");
            let final_word = line.words.last().unwrap();
            assert!(close(final_word.x + final_word.width, Px(300.0)));
        }
        assert_eq!(last.word_spacing, Px::ZERO);
        assert_eq!(last.x, Px::ZERO);
        // natural spacing: each word starts one space after the previous
        for pair in last.words.windows(2) {
            assert!(close(pair[1].x - pair[0].x, pair[0].width + Px(10.0)));
        }
    }

    #[test]
    fn justify_last_line_stretches_the_final_line() {
        let options = TextOptions::default()
            .font_size(20)
            .max_width(300)
            .alignment(Alignment::Justified)
            .justify_last_line(true);
        let layout = layout_text_block("here is the last line", &FONT, &options).unwrap();
        assert_eq!(layout.lines.len(), 1);
        assert!(layout.lines[0].is_stretched());
        assert!(close(layout.lines[0].rendered_width(), Px(300.0)));
    }

    #[test]
    fn paragraph_ends_are_not_justified() {
        let options = TextOptions::default()
            .font_size(20)
            .max_width(300)
            .alignment(Alignment::Justified);
        let layout = layout_text_block("short one\nand short two", &FONT, &options).unwrap();
        assert!(layout.lines.iter().all(|line| !line.is_stretched()));
    }

    #[test]
    fn single_word_lines_are_never_stretched() {
        let options = TextOptions::default()
            .font_size(20)
            .max_width(300)
            .alignment(Alignment::Justified)
            .justify_last_line(true);
        let layout = layout_text_block("lonely", &FONT, &options).unwrap();
        assert_eq!(layout.lines[0].word_spacing, Px::ZERO);
    }

    #[test]
    fn baselines_advance_by_line_spacing() {
        let options = TextOptions::default()
            .font_size(10)
            .max_width(1000)
            .line_spacing(2.0)
            .padding(Padding::trbl(Px(5.0), Px(0.0), Px(0.0), Px(0.0)));
        let layout = layout_text_block("a\nb\nc", &FONT, &options).unwrap();
        let expected = [Px(13.0), Px(37.0), Px(61.0)];
        for (line, baseline) in layout.lines.iter().zip(expected) {
            assert!(close(line.baseline, baseline), "{line:?}");
        }
        // 12 for the first line, 24 for each further line
        assert!(close(layout.text_height, Px(60.0)));
    }

    #[test]
    fn height_grows_with_line_spacing() {
        let text = "several words that wrap onto a few lines of text";
        let mut previous = Px::ZERO;
        for spacing in [0.5, 1.0, 1.5, 2.0, 3.0] {
            let options = TextOptions::default()
                .font_size(10)
                .max_width(80)
                .line_spacing(spacing);
            let height = layout_text_block(text, &FONT, &options)
                .unwrap()
                .bounding_box
                .height;
            assert!(height > previous);
            previous = height;
        }
    }

    #[test]
    fn padding_adds_linearly() {
        let text = "padding should not change how the text wraps";
        let options = TextOptions::default().font_size(10).max_width(120);
        let bare = layout_text_block(text, &FONT, &options).unwrap();

        let padding = Padding::trbl(Px(10.0), Px(20.0), Px(30.0), Px(40.0));
        let padded = layout_text_block(text, &FONT, &options.padding(padding)).unwrap();

        assert_eq!(
            padded.bounding_box.width,
            bare.bounding_box.width + Px(60.0)
        );
        assert_eq!(
            padded.bounding_box.height,
            bare.bounding_box.height + Px(40.0)
        );
        assert_eq!(texts(&padded), texts(&bare));
        assert_eq!(padded.lines[0].words[0].x, Px(40.0));
        assert_eq!(padded.lines[0].baseline, bare.lines[0].baseline + Px(10.0));
    }

    #[test]
    fn without_max_width_the_widest_line_sets_the_width() {
        let options = TextOptions::default().font_size(10);
        let layout = layout_text_block("ab\nabcdef", &FONT, &options).unwrap();
        assert_eq!(layout.text_width, Px(30.0));
        assert_eq!(layout.font_size, Px(10.0));
    }

    #[test]
    fn default_size_without_max_height() {
        let layout = layout_text_block("hello", &FONT, &TextOptions::default()).unwrap();
        assert_eq!(layout.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn fits_the_largest_size_into_max_height() {
        let text = "the quick brown fox jumps over the lazy dog";
        let options = TextOptions::default().max_width(200).max_height(100);
        let layout = layout_text_block(text, &FONT, &options).unwrap();

        assert!(layout.text_height <= Px(100.0));
        assert!(layout.lines.iter().all(|line| line.width <= Px(200.0)));

        // one size larger no longer fits
        let bigger = options.clone().font_size(layout.font_size + Px(1.0));
        let bigger = layout_text_block(text, &FONT, &bigger).unwrap();
        let too_tall = bigger.text_height > Px(100.0);
        let too_wide = bigger.lines.iter().any(|line| line.width > Px(200.0));
        assert!(too_tall || too_wide);
    }

    #[test]
    fn without_max_width_the_size_is_one_step_from_overflowing() {
        let text = "the quick brown fox\njumps";
        let options = TextOptions::default().max_height(50);
        let layout = layout_text_block(text, &FONT, &options).unwrap();

        // two lines 2.4em tall
        assert_eq!(layout.font_size, Px(20.0));
        assert!(layout.text_height <= Px(50.0));
        let bigger = options.clone().font_size(layout.font_size + Px(1.0));
        let bigger = layout_text_block(text, &FONT, &bigger).unwrap();
        assert!(bigger.text_height > Px(50.0));
    }

    #[test]
    fn huge_max_height_still_finds_a_size() {
        // words are 2.5em wide, so 120px is the largest that keeps them within 300
        let options = TextOptions::default().max_width(300).max_height(Px(3.0e7));
        let layout = layout_text_block("hello world", &FONT, &options).unwrap();
        assert_eq!(layout.font_size, Px(120.0));
        assert_eq!(texts(&layout), vec!["hello", "world"]);

        let unbounded = TextOptions::default().max_height(Px(3.0e7));
        let layout = layout_text_block("hello", &FONT, &unbounded).unwrap();
        assert!(layout.font_size > Px(1.0e7));
        assert!(layout.text_height <= Px(3.0e7));
    }

    #[test]
    fn word_too_wide_at_every_size_still_fits_the_height() {
        let options = TextOptions::default().max_width(Px(0.2)).max_height(100);
        let layout = layout_text_block("hello", &FONT, &options).unwrap();

        // 1.2em line height: 83px is 99.6px tall
        assert_eq!(layout.font_size, Px(83.0));
        assert_eq!(layout.lines.len(), 1);
        assert!(layout.lines[0].width > Px(0.2));
    }

    #[test]
    fn overflowing_words_do_not_shrink_text_that_can_avoid_them() {
        // at 10px "abcdefgh" is 40 wide; any larger overflows
        let options = TextOptions::default().max_width(40).max_height(1000);
        let layout = layout_text_block("abcdefgh ab", &FONT, &options).unwrap();
        assert_eq!(layout.font_size, Px(10.0));
        assert!(layout.lines.iter().all(|line| line.width <= Px(40.0)));
    }

    #[test]
    fn unreachable_max_height_is_a_fit_failure() {
        let options = TextOptions::default().max_width(200).max_height(1);
        assert_eq!(
            layout_text_block("some text", &FONT, &options),
            Err(LayoutError::FitFailure {
                max_height: Px(1.0)
            })
        );
    }

    #[test]
    fn explicit_size_is_kept_even_if_it_overflows_max_height() {
        let options = TextOptions::default()
            .font_size(25)
            .max_width(100)
            .max_height(10);
        let layout = layout_text_block("does not fit at all", &FONT, &options).unwrap();
        assert_eq!(layout.font_size, Px(25.0));
        assert!(layout.text_height > Px(10.0));
    }

    #[test]
    fn rejects_invalid_options() {
        let negative = TextOptions::default().padding(Padding::all(-1));
        assert!(matches!(
            layout_text_block("x", &FONT, &negative),
            Err(LayoutError::InvalidPadding(_))
        ));

        let spacing = TextOptions::default().line_spacing(0.0);
        assert!(matches!(
            layout_text_block("x", &FONT, &spacing),
            Err(LayoutError::InvalidOptions(_))
        ));

        let size = TextOptions::default().font_size(0);
        assert!(matches!(
            layout_text_block("x", &FONT, &size),
            Err(LayoutError::InvalidOptions(_))
        ));
    }

    #[test]
    fn text_block_bundles_inputs() {
        let block = TextBlock::new("two words", &FONT)
            .with_options(TextOptions::default().font_size(10));
        let layout = block.layout().unwrap();
        assert_eq!(layout.lines[0].text(), "two words");
        assert_eq!(layout.lines[0].words[1].x, Px(20.0));
    }
}
