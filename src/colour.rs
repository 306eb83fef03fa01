/// A colour, expressed in RGB, CMYK or grey device colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255,
    /// the way pixel colours are usually written
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: unit(r),
            g: unit(g),
            b: unit(b),
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Create a new colour in the Gray space, g ranges from 0 to 255
    pub fn new_grey_bytes(g: u8) -> Colour {
        Colour::Grey { g: unit(g) }
    }

    pub(crate) fn apply_fill(&self, content: &mut pdf_writer::Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
            Colour::Grey { g } => content.set_fill_gray(g),
        };
    }

    pub(crate) fn apply_stroke(&self, content: &mut pdf_writer::Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => content.set_stroke_gray(g),
        };
    }
}

/// Paint colour for rasterising, with `alpha` as its opacity. CMYK is
/// converted naively, without colour management.
pub(crate) fn to_skia(colour: Colour, alpha: f32) -> tiny_skia::Color {
    let (r, g, b) = match colour {
        Colour::RGB { r, g, b } => (r, g, b),
        Colour::CMYK { c, m, y, k } => ((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)),
        Colour::Grey { g } => (g, g, g),
    };
    let unit = |v: f32| v.clamp(0.0, 1.0);
    tiny_skia::Color::from_rgba(unit(r), unit(g), unit(b), unit(alpha)).unwrap_or(tiny_skia::Color::BLACK)
}

fn unit(byte: u8) -> f32 {
    byte as f32 / 255.0
}

impl From<(u8, u8, u8)> for Colour {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(r, g, b)
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Colour::new_rgb_bytes(r, g, b)
    }
}

impl From<(f32, f32, f32)> for Colour {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Colour::RGB { r, g, b }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    pub const YELLOW: Colour = Colour::RGB {
        r: 1.0,
        g: 1.0,
        b: 0.0,
    };
}
