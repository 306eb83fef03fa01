//! Placement matrices for content written into PDF content streams.

use crate::rect::Rect;
use crate::units::Px;
use pdf_writer::Content;

/// An affine matrix `[a b c d e f]` in PDF space, where the origin is the
/// bottom-left corner of the page. Only scaling and translation are needed to
/// place surface content, so `b` and `c` stay zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Transform([f32; 6]);

impl Transform {
    /// Move the origin to (x, y), given in PDF space
    pub fn offset(x: Px, y: Px) -> Transform {
        Transform([1.0, 0.0, 0.0, 1.0, x.0, y.0])
    }

    /// Map the unit square onto `rect`, a box in surface space on a page
    /// `page_height` tall. This is how image XObjects are sized and placed.
    pub fn unit_square_onto(rect: Rect, page_height: Px) -> Transform {
        Transform([
            rect.width().0,
            0.0,
            0.0,
            rect.height().0,
            rect.x1.0,
            (page_height - rect.y2).0,
        ])
    }

    /// Write the matrix as a `cm` operator
    pub fn apply(&self, content: &mut Content) {
        content.transform(self.0);
    }
}
