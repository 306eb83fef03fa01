use crate::units::Px;
use thiserror::Error;

/// Errors produced while laying out a block of text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The text is taller than the maximum height even at
    /// [MIN_FONT_SIZE](crate::layout::MIN_FONT_SIZE)
    #[error("text does not fit within a height of {max_height} at any font size")]
    FitFailure { max_height: Px },

    /// Padding values must be finite and non-negative
    #[error("invalid padding: {0}")]
    InvalidPadding(String),

    /// The alignment keyword is not one of `left`, `right`, `center` or `justified`
    #[error("unrecognised alignment `{0}`")]
    InvalidAlignment(String),

    /// A font size, line spacing or maximum dimension was non-finite or not positive
    #[error("invalid text options: {0}")]
    InvalidOptions(String),
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// A text block could not be laid out
    Layout(#[from] LayoutError),

    /// The position keyword is not valid for the axis it was used on
    #[error("unrecognised position `{0}`")]
    InvalidPosition(String),

    /// The font id does not belong to this surface
    #[error("font is not registered with this surface")]
    UnknownFont,

    /// Surfaces are saved as `.pdf` or `.png`
    #[error("unsupported export format `{0}`")]
    UnsupportedFormat(String),

    /// A raster needs at least one whole pixel in each direction
    #[error("cannot rasterise a {width} by {height} surface")]
    EmptyRaster { width: Px, height: Px },

    /// [tiny_skia] could not encode the raster
    #[error("failed to encode PNG: {0}")]
    PngEncoding(String),
}
