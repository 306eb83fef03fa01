use crate::error::LayoutError;
use crate::units::Px;
use std::str::FromStr;

/// Space added around a block of text, outside of the text itself. The
/// bounding box returned from a layout includes the padding, and every line
/// is offset by the top and left padding.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Padding {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Padding {
    /// Create padding by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS padding)
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Padding {
        Padding {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create padding where all values are equal
    pub fn all<D: Into<Px>>(value: D) -> Padding {
        let value: Px = value.into();
        Padding::trbl(value, value, value, value)
    }

    /// Create padding by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) sides
    pub fn symmetric(vertical: Px, horizontal: Px) -> Padding {
        Padding::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create padding where all values are 0
    pub fn empty() -> Padding {
        Padding::default()
    }

    pub fn horizontal(&self) -> Px {
        self.left + self.right
    }

    pub fn vertical(&self) -> Px {
        self.top + self.bottom
    }

    /// Checks that every side is finite and non-negative
    pub fn validate(&self) -> Result<(), LayoutError> {
        let sides = [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ];
        for (side, value) in sides {
            if !value.is_finite() || value < Px::ZERO {
                return Err(LayoutError::InvalidPadding(format!(
                    "{side} padding must be a non-negative number, got {}",
                    value.0
                )));
            }
        }
        Ok(())
    }
}

/// Parses CSS-style shorthand: one value for all sides, two for vertical and
/// horizontal, three for top, horizontal and bottom, or four in
/// top-right-bottom-left order.
impl FromStr for Padding {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.trim_end_matches("px")
                    .parse::<f32>()
                    .map(Px)
                    .map_err(|_| LayoutError::InvalidPadding(format!("`{part}` is not a number")))
            })
            .collect::<Result<Vec<Px>, _>>()?;

        let padding = match values.as_slice() {
            &[all] => Padding::all(all),
            &[vertical, horizontal] => Padding::symmetric(vertical, horizontal),
            &[top, horizontal, bottom] => Padding::trbl(top, horizontal, bottom, horizontal),
            &[top, right, bottom, left] => Padding::trbl(top, right, bottom, left),
            _ => {
                return Err(LayoutError::InvalidPadding(format!(
                    "expected 1 to 4 values, got {}",
                    values.len()
                )))
            }
        };
        padding.validate()?;
        Ok(padding)
    }
}
