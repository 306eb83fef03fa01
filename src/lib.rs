//! A small drawing surface that lays out text the way a typesetter would:
//! wrapped to a width, aligned or justified, and sized down until it fits a
//! height.
//!
//! A [Surface] is a fixed-size canvas addressed in pixels from its top-left
//! corner. Rectangles, lines, images and blocks of text are recorded on it,
//! surfaces can be cropped or pasted onto each other, and the result is
//! exported as a single-page PDF with its fonts embedded, or rasterised to a
//! PNG. The text engine
//! itself lives in [layout] and can be used without a surface.
//!
//! ```no_run
//! use simple_surface::layout::{Alignment, Padding, TextOptions};
//! use simple_surface::{colours, Font, Surface, XPos, YPos};
//!
//! let mut surface = Surface::new(600, 800);
//! surface.set_background(colours::WHITE);
//! let font = surface.add_font(Font::open("fonts/arial.ttf").expect("can load font"));
//!
//! let options = TextOptions::default()
//!     .max_width(600)
//!     .max_height(800)
//!     .alignment(Alignment::Justified)
//!     .padding(Padding::all(20));
//! surface
//!     .write("As large as it will go", XPos::Left, YPos::Top, font, options)
//!     .expect("text fits");
//! surface.save("surface.pdf").expect("can save");
//! ```

mod colour;
pub use colour::*;

mod content;

mod error;
pub use error::*;

mod export;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Text layout independent of any surface
pub mod layout;

mod raster;

mod position;
pub use position::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod surface;
pub use surface::*;

mod transform;

mod units;
pub use units::*;

pub use id_arena::Id;
pub use tiny_skia::Pixmap;
