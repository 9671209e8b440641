//! Renderer and rendering settings
mod canvas;

use std::fmt;
use std::num::NonZeroU32;

use image::GenericImage;
use itertools::iproduct;
use thiserror::Error;

use crate::fixed::{Fixed, Point, Rect};
use crate::font::{Face as _, FaceSource, FontError, OutlineFont};
use crate::search;
use crate::str_ext::StrExt as _;

pub use canvas::{CanvasFactory, CanvasPixel, GrayCanvas, Palette};

/// Pixels covered at least this much by a glyph are painted in the foreground color.
const INK_THRESHOLD: f32 = 0.5;

/// The main type for rendering
///
/// A renderer always produces images exactly [`max_height`](Renderer::max_height) pixels tall,
/// with the text set in the largest point size (in steps of 0.01pt, up to 72pt) whose line height
/// fits. The width follows the text.
///
/// Use [`Renderer::new`] for the defaults (bundled sans-serif font, 72 DPI, full hinting, black on
/// white grayscale), or [`Renderer::builder`] to change them:
/// ```
/// # use tapetext::font::{FaceOptions, FontFile, Hinting, OutlineFont};
/// # use tapetext::render::{Palette, Renderer};
/// # use image::RgbaImage;
/// let font = OutlineFont::built_in(
///     FontFile::SansCondensed,
///     FaceOptions { dpi: 180.0, hinting: Hinting::Full },
/// )?;
/// let renderer = Renderer::builder()
///     .max_height(42)
///     .font(font)
///     .canvas(
///         |width: u32, height: u32| RgbaImage::new(width, height),
///         Palette::BLACK_ON_TRANSPARENT,
///     )
///     .build()?;
/// let image = renderer.render("Hello, world")?;
/// assert_eq!(image.height(), 42);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub struct Renderer<S = OutlineFont, C: CanvasFactory = GrayCanvas> {
    max_height: NonZeroU32,
    source: S,
    canvas: C,
    palette: Palette<CanvasPixel<C>>,
}

impl Renderer {
    /// Creates a renderer with default settings for images `max_height` pixels tall.
    ///
    /// # Errors
    /// [`ConfigError::ZeroMaxHeight`] if `max_height` is 0.
    pub fn new(max_height: u32) -> Result<Self, ConfigError> {
        Self::builder().max_height(max_height).build()
    }

    /// Starts configuring a renderer. Setting [`max_height`](RendererBuilder::max_height) is
    /// mandatory.
    pub fn builder() -> RendererBuilder {
        RendererBuilder::default()
    }
}

impl<S: FaceSource, C: CanvasFactory> Renderer<S, C> {
    /// The height of every rendered image, in pixels.
    #[must_use]
    pub const fn max_height(&self) -> u32 {
        self.max_height.get()
    }

    /// Renders `text`.
    ///
    /// Only single lines are supported for now; see [`Renderer::render_single_line`].
    ///
    /// # Errors
    /// See [`RenderError`].
    pub fn render(&self, text: &str) -> Result<C::Canvas, RenderError> {
        self.render_single_line(text)
    }

    /// Renders a single line of text as large as possible without exceeding the maximum height.
    ///
    /// The baseline sits `ascent` pixels below the top edge of the image, and the pen starts at
    /// the left edge. Glyphs that would still overhang the left or top edge (negative side
    /// bearings, accents above the ascent) move right or down by whole pixels instead of being
    /// clipped. The image is as wide as the drawn glyphs reach to the right, and exactly
    /// [`max_height`](Renderer::max_height) tall; every pixel is either the palette's foreground
    /// or its background.
    ///
    /// # Errors
    /// - [`RenderError::MultiLine`] if `text` contains a line break, before any font work;
    /// - [`RenderError::Font`] if the font cannot produce a face that fits;
    /// - [`RenderError::BoundsSpilled`] if some glyph reaches below the bottom edge even at the
    ///   chosen size (glyphs are allowed to extend past the font's ascent and descent);
    /// - [`RenderError::NothingToDraw`] if no glyph would cover any pixel, eg for blank text.
    pub fn render_single_line(&self, text: &str) -> Result<C::Canvas, RenderError> {
        if let Some((index, _)) = text.find_line_break() {
            return Err(RenderError::MultiLine { index });
        }
        let face = search::largest_fitting_face(self.max_height, NonZeroU32::MIN, &self.source)?;
        let origin = Point::new(Fixed::ZERO, face.metrics().ascent);
        let bounds = face.bounds(origin, text);
        if bounds.is_empty() {
            return Err(RenderError::NothingToDraw);
        }
        // whole pixels, so coverage stays the same
        let shift = Point::new(
            Fixed::from_int(-bounds.min.x.floor().min(0)),
            Fixed::from_int(-bounds.min.y.floor().min(0)),
        );
        let (origin, bounds) = (origin + shift, bounds.translate(shift));
        let height = self.max_height.get();
        if i64::from(bounds.max.y.ceil()) > i64::from(height) {
            return Err(RenderError::BoundsSpilled(bounds));
        }
        let width = u32::try_from(bounds.max.x.ceil())
            .ok()
            .filter(|&width| width > 0)
            .ok_or(RenderError::NothingToDraw)?;
        log::debug!("drawing {width}x{height} image, glyph bounds {bounds}");

        let mut canvas = self.canvas.allocate(width, height);
        for (y, x) in iproduct!(0..height, 0..width) {
            canvas.put_pixel(x, y, self.palette.background);
        }
        face.draw(origin, text, &mut |x, y, coverage| {
            if coverage < INK_THRESHOLD {
                return;
            }
            if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
                if x < width && y < height {
                    canvas.put_pixel(x, y, self.palette.foreground);
                }
            }
        });
        drop(face);
        Ok(canvas)
    }
}

impl<S, C: CanvasFactory> fmt::Debug for Renderer<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("max_height", &self.max_height)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Renderer`], from [`Renderer::builder`]
#[must_use]
pub struct RendererBuilder<S = OutlineFont, C: CanvasFactory = GrayCanvas> {
    max_height: Option<u32>,
    source: S,
    canvas: C,
    palette: Palette<CanvasPixel<C>>,
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self {
            max_height: None,
            source: OutlineFont::standard(),
            canvas: GrayCanvas,
            palette: Palette::BLACK_ON_WHITE,
        }
    }
}

impl<S, C: CanvasFactory> RendererBuilder<S, C> {
    /// Sets the height of rendered images, in pixels. Mandatory.
    pub fn max_height(mut self, max_height: u32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Sets where faces come from, replacing the bundled font.
    ///
    /// Any shaping options of `source` (DPI, hinting) apply to every size the search tries.
    pub fn font<T: FaceSource>(self, source: T) -> RendererBuilder<T, C> {
        RendererBuilder {
            max_height: self.max_height,
            source,
            canvas: self.canvas,
            palette: self.palette,
        }
    }

    /// Sets how images are allocated, along with the colors to paint them in.
    pub fn canvas<D: CanvasFactory>(
        self,
        canvas: D,
        palette: Palette<CanvasPixel<D>>,
    ) -> RendererBuilder<S, D> {
        RendererBuilder {
            max_height: self.max_height,
            source: self.source,
            canvas,
            palette,
        }
    }

    /// Sets the colors, keeping the canvas type.
    pub fn palette(mut self, palette: Palette<CanvasPixel<C>>) -> Self {
        self.palette = palette;
        self
    }

    /// Finishes configuration.
    ///
    /// # Errors
    /// [`ConfigError::MissingMaxHeight`] if no height was set, [`ConfigError::ZeroMaxHeight`] if
    /// it was set to 0.
    pub fn build(self) -> Result<Renderer<S, C>, ConfigError> {
        let max_height = self.max_height.ok_or(ConfigError::MissingMaxHeight)?;
        let max_height = NonZeroU32::new(max_height).ok_or(ConfigError::ZeroMaxHeight)?;
        Ok(Renderer {
            max_height,
            source: self.source,
            canvas: self.canvas,
            palette: self.palette,
        })
    }
}

/// An invalid renderer configuration
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// [`RendererBuilder::max_height`] was never called.
    #[error("missing maximum height")]
    MissingMaxHeight,
    /// The maximum height is 0.
    #[error("impossible maximum height 0")]
    ZeroMaxHeight,
}

/// An error while rendering
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The text contains a line break, which is not supported yet.
    #[error("multi-line text not supported yet (line break at byte {index})")]
    MultiLine {
        /// Byte index of the first line-breaking character
        index: usize,
    },
    /// The font failed, or nothing fits in the maximum height.
    #[error(transparent)]
    Font(#[from] FontError),
    /// The glyphs reach below the image, even though the font's line height fits.
    #[error("bounds spilled: {0}")]
    BoundsSpilled(Rect),
    /// No glyph covers any pixel.
    #[error("nothing to draw")]
    NothingToDraw,
}
