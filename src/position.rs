//! Symbolic positions on a surface.
//!
//! Coordinates passed to drawing calls are either absolute pixel values or
//! keywords that are resolved against the surface when the call is made. A
//! keyword places the *object* being drawn, so `XPos::Right` puts the right
//! edge of a rectangle on the right edge of the surface. Points (such as line
//! end points) have no size, so `XPos::Right` is the surface's right edge.

use crate::error::SurfaceError;
use crate::units::Px;
use std::str::FromStr;

/// A horizontal position
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum XPos {
    Left,
    Center,
    Right,
    At(Px),
}

/// A vertical position
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum YPos {
    Top,
    Center,
    Bottom,
    At(Px),
}

impl XPos {
    /// The x-coordinate of the left edge of an object `width` wide
    pub fn resolve(self, extent: Px, width: Px) -> Px {
        match self {
            XPos::Left => Px::ZERO,
            XPos::Center => (extent - width) / 2.0,
            XPos::Right => extent - width,
            XPos::At(x) => x,
        }
    }

    /// The x-coordinate of a point
    pub fn point(self, extent: Px) -> Px {
        self.resolve(extent, Px::ZERO)
    }

    /// Room between this position and the right edge, or the full extent for keywords
    pub(crate) fn room(self, extent: Px) -> Px {
        match self {
            XPos::At(x) => (extent - x).max(Px::ZERO),
            _ => extent,
        }
    }
}

impl YPos {
    /// The y-coordinate of the top edge of an object `height` tall
    pub fn resolve(self, extent: Px, height: Px) -> Px {
        match self {
            YPos::Top => Px::ZERO,
            YPos::Center => (extent - height) / 2.0,
            YPos::Bottom => extent - height,
            YPos::At(y) => y,
        }
    }

    /// The y-coordinate of a point
    pub fn point(self, extent: Px) -> Px {
        self.resolve(extent, Px::ZERO)
    }

    /// Room between this position and the bottom edge, or the full extent for keywords
    pub(crate) fn room(self, extent: Px) -> Px {
        match self {
            YPos::At(y) => (extent - y).max(Px::ZERO),
            _ => extent,
        }
    }
}

impl FromStr for XPos {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(XPos::Left),
            "center" | "centre" => Ok(XPos::Center),
            "right" => Ok(XPos::Right),
            other => other
                .parse::<f32>()
                .map(|x| XPos::At(Px(x)))
                .map_err(|_| SurfaceError::InvalidPosition(s.to_string())),
        }
    }
}

impl FromStr for YPos {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(YPos::Top),
            "center" | "centre" => Ok(YPos::Center),
            "bottom" => Ok(YPos::Bottom),
            other => other
                .parse::<f32>()
                .map(|y| YPos::At(Px(y)))
                .map_err(|_| SurfaceError::InvalidPosition(s.to_string())),
        }
    }
}

macro_rules! impl_from_number {
    ($pos:ident: $($t:ty),*) => {
        $(
            impl From<$t> for $pos {
                fn from(value: $t) -> Self {
                    $pos::At(value.into())
                }
            }
        )*
    };
}

impl_from_number!(XPos: Px, f32, i32, u32);
impl_from_number!(YPos: Px, f32, i32, u32);
