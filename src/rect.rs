use crate::units::*;

/// A rectangle on a surface, specified by two opposite corners. Surface
/// coordinates grow rightwards and downwards from the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the top-left corner.
    pub x1: Px,
    /// The y-coordinate of the top-left corner.
    pub y1: Px,
    /// The x-coordinate of the bottom-right corner.
    pub x2: Px,
    /// The y-coordinate of the bottom-right corner.
    pub y2: Px,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its size
    pub fn new(x: Px, y: Px, width: Px, height: Px) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }

    /// Shrink the rectangle by `amount` on every side
    pub fn inset(&self, amount: Px) -> Rect {
        Rect {
            x1: self.x1 + amount,
            y1: self.y1 + amount,
            x2: self.x2 - amount,
            y2: self.y2 - amount,
        }
    }

    /// The equivalent PDF rectangle on a page of the given height, whose
    /// origin sits in the bottom-left corner
    pub(crate) fn to_pdf(self, page_height: Px) -> pdf_writer::Rect {
        pdf_writer::Rect {
            x1: self.x1.0,
            y1: (page_height - self.y2).0,
            x2: self.x2.0,
            y2: (page_height - self.y1).0,
        }
    }
}
