//! Text layout: wrapping, sizing, aligning and justifying blocks of text.
//!
//! The engine works against the [FontMetrics](crate::FontMetrics) trait rather
//! than a concrete font, so the same layout can be computed for an embedded
//! [Font](crate::Font) or any other source of glyph advances. Layout is pure:
//! it returns positioned lines and a bounding box and leaves drawing to the
//! caller, usually [Surface::write](crate::Surface::write).
//!
//! # Example
//!
//! ```no_run
//! use simple_surface::layout::{layout_text_block, Alignment, Padding, TextOptions};
//! use simple_surface::{Font, Px};
//!
//! let font = Font::open("fonts/arial.ttf").expect("can load font");
//! let options = TextOptions::default()
//!     .max_width(Px(300.0))
//!     .max_height(Px(400.0))
//!     .alignment(Alignment::Justified)
//!     .padding(Padding::all(5));
//!
//! let layout = layout_text_block("Some text to set", &font, &options).expect("text fits");
//! println!(
//!     "{} lines at {}, {} by {}",
//!     layout.lines.len(),
//!     layout.font_size,
//!     layout.bounding_box.width,
//!     layout.bounding_box.height
//! );
//! ```

mod padding;
mod text;

pub use padding::*;
pub use text::*;
