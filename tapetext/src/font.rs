//! Font faces and where they come from
//!
//! A [`FaceSource`] turns a point size into a [`Face`], which knows its vertical metrics, how big
//! a string will be, and how to draw it. The size search asks a source for many faces and keeps
//! only the last one, so faces are cheap, short-lived values: drop them as soon as they have been
//! measured.
//!
//! [`OutlineFont`] is the default source, backed by a TrueType/OpenType font (by default the
//! bundled [`FontFile::DEFAULT`]). Any closure `Fn(f64) -> Result<F, FontError>` where `F:
//! Face` is a source as well.

mod outline;

use std::error::Error as StdError;

pub use tapetext_fonts::FontFile;
use thiserror::Error;

use crate::fixed::{Fixed, Point, Rect};
pub use outline::{FaceOptions, Hinting, OutlineFace, OutlineFont};

/// Typographic points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Vertical metrics of a face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    /// Distance from the baseline up to the top of typical glyphs. Non-negative.
    pub ascent: Fixed,
    /// Distance from the baseline down to the bottom of typical glyphs. Non-negative.
    pub descent: Fixed,
}

impl Metrics {
    /// The height of a single line, `ascent + descent`.
    #[must_use]
    pub fn height(&self) -> Fixed {
        self.ascent + self.descent
    }
}

/// A font at one particular size
pub trait Face {
    /// Vertical metrics at this size.
    fn metrics(&self) -> Metrics;

    /// The tight bounding box of the pixels `text` would cover when drawn with its baseline
    /// starting at `origin`. Empty if nothing would be drawn.
    fn bounds(&self, origin: Point, text: &str) -> Rect;

    /// Draws `text` with its baseline starting at `origin`, calling `plot(x, y, coverage)` for
    /// every pixel a glyph touches. A coverage of `0.0` is untouched, `1.0` or more fully covered.
    fn draw(&self, origin: Point, text: &str, plot: &mut dyn FnMut(i32, i32, f32));
}

/// Produces faces by point size.
///
/// Implementations must be pure and monotonic: for fixed options, a larger size never yields a
/// smaller `metrics().height()`. The size search relies on this without checking it.
pub trait FaceSource {
    /// The faces produced
    type Face: Face;

    /// Returns a face of the given point size (1/72 inch).
    ///
    /// # Errors
    /// Any failure to construct the face; see [`FontError`].
    fn face(&self, size: f64) -> Result<Self::Face, FontError>;
}

impl<F, T> FaceSource for F
where
    F: Fn(f64) -> Result<T, FontError>,
    T: Face,
{
    type Face = T;

    fn face(&self, size: f64) -> Result<T, FontError> {
        self(size)
    }
}

/// An error producing a face
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FontError {
    /// The font data could not be parsed.
    #[error("invalid font data")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
    /// The font does not declare how many units make up an em, so point sizes are meaningless.
    #[error("font does not declare its units per em")]
    UnitsPerEm,
    /// The requested point size is zero, negative or not finite.
    #[error("{0}pt is not a usable point size")]
    InvalidSize(f64),
    /// The configured resolution is zero, negative or not finite.
    #[error("{0} is not a usable DPI")]
    InvalidDpi(f64),
    /// A failure from a custom [`FaceSource`]
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}
