use ab_glyph::{Font as _, FontArc, Glyph, GlyphId, PxScale, point};
use tapetext_fonts::FontFile;

use super::{Face, FaceSource, FontError, Metrics, POINTS_PER_INCH};
use crate::fixed::{Fixed, Point, Rect};

/// How metrics and glyph positions are snapped to the pixel grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hinting {
    /// Metrics and advances keep their fractional parts.
    None,
    /// Ascent and descent are rounded up to whole pixels.
    Vertical,
    /// Ascent and descent are rounded up to whole pixels and horizontal advances (including
    /// kerning) are rounded to the nearest pixel.
    Full,
}

/// Shaping options shared by every face an [`OutlineFont`] produces
///
/// These stay fixed for the lifetime of the font, which is what keeps a size search monotonic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceOptions {
    /// Pixels per inch. A point is 1/72 inch, so at 72 DPI one point is one pixel.
    pub dpi: f64,
    /// Pixel grid snapping
    pub hinting: Hinting,
}

impl Default for FaceOptions {
    /// 72 DPI with [`Hinting::Full`].
    fn default() -> Self {
        Self {
            dpi: POINTS_PER_INCH,
            hinting: Hinting::Full,
        }
    }
}

/// A scalable outline font, producing an [`OutlineFace`] for any point size
///
/// Cloning is cheap: the parsed font data is shared.
#[derive(Clone, Debug)]
pub struct OutlineFont {
    font: FontArc,
    units_per_em: f64,
    options: FaceOptions,
}

impl OutlineFont {
    /// Wraps an already parsed font.
    ///
    /// # Errors
    /// [`FontError::UnitsPerEm`] if the font lacks units per em, [`FontError::InvalidDpi`] for a
    /// non-positive DPI.
    pub fn new(font: FontArc, options: FaceOptions) -> Result<Self, FontError> {
        let units_per_em = font.units_per_em().ok_or(FontError::UnitsPerEm)?;
        if !(options.dpi.is_finite() && options.dpi > 0.0) {
            return Err(FontError::InvalidDpi(options.dpi));
        }
        Ok(Self {
            font,
            units_per_em: f64::from(units_per_em),
            options,
        })
    }

    /// Parses the contents of a `.ttf` or `.otf` file.
    ///
    /// # Errors
    /// [`FontError::InvalidFont`] if the data cannot be parsed, otherwise as [`OutlineFont::new`].
    pub fn from_bytes(data: Vec<u8>, options: FaceOptions) -> Result<Self, FontError> {
        Self::new(FontArc::try_from_vec(data)?, options)
    }

    /// Loads a font bundled in the `tapetext-fonts` crate.
    ///
    /// # Errors
    /// As [`OutlineFont::new`]; the font data itself is checked by tests.
    pub fn built_in(file: FontFile, options: FaceOptions) -> Result<Self, FontError> {
        Self::new(FontArc::try_from_slice(file.as_bytes())?, options)
    }

    /// The bundled [`FontFile::DEFAULT`] with default [`FaceOptions`].
    #[expect(clippy::missing_panics_doc, reason = "should be caught in tests")]
    #[must_use]
    pub fn standard() -> Self {
        Self::built_in(FontFile::DEFAULT, FaceOptions::default()).expect("Should be tested")
    }

    /// The options every face is created with.
    #[must_use]
    pub const fn options(&self) -> FaceOptions {
        self.options
    }
}

impl FaceSource for OutlineFont {
    type Face = OutlineFace;

    fn face(&self, size: f64) -> Result<OutlineFace, FontError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FontError::InvalidSize(size));
        }
        let px_per_unit = size * self.options.dpi / POINTS_PER_INCH / self.units_per_em;
        let mut metrics = Metrics {
            ascent: Fixed::from_f64(f64::from(self.font.ascent_unscaled()).abs() * px_per_unit),
            descent: Fixed::from_f64(f64::from(self.font.descent_unscaled()).abs() * px_per_unit),
        };
        if self.options.hinting != Hinting::None {
            metrics.ascent = metrics.ascent.ceil_to_pixel();
            metrics.descent = metrics.descent.ceil_to_pixel();
        }
        Ok(OutlineFace {
            font: self.font.clone(),
            px_per_unit,
            metrics,
            hinting: self.options.hinting,
        })
    }
}

/// An [`OutlineFont`] at one size
#[derive(Clone, Debug)]
pub struct OutlineFace {
    font: FontArc,
    px_per_unit: f64,
    metrics: Metrics,
    hinting: Hinting,
}

impl OutlineFace {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "ab_glyph works in f32, the scale is at most a few hundred pixels"
    )]
    fn scale(&self) -> PxScale {
        PxScale::from((self.px_per_unit * f64::from(self.font.height_unscaled())) as f32)
    }

    fn horizontal(&self, units: f32) -> Fixed {
        let advance = Fixed::from_f64(f64::from(units) * self.px_per_unit);
        if self.hinting == Hinting::Full {
            advance.round_to_pixel()
        } else {
            advance
        }
    }

    /// Positions each character of `text` on the baseline through `origin`, applying kerning
    /// between neighbours.
    fn layout<'a>(&'a self, origin: Point, text: &'a str) -> impl Iterator<Item = Glyph> + 'a {
        let scale = self.scale();
        let mut pen = origin.x;
        let mut previous: Option<GlyphId> = None;
        text.chars().map(move |c| {
            let id = self.font.glyph_id(c);
            if let Some(previous) = previous {
                pen += self.horizontal(self.font.kern_unscaled(previous, id));
            }
            let glyph = id.with_scale_and_position(scale, point(pen.to_f32(), origin.y.to_f32()));
            pen += self.horizontal(self.font.h_advance_unscaled(id));
            previous = Some(id);
            glyph
        })
    }
}

impl Face for OutlineFace {
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn bounds(&self, origin: Point, text: &str) -> Rect {
        self.layout(origin, text)
            .filter_map(|glyph| self.font.outline_glyph(glyph))
            .map(|glyph| {
                let bounds = glyph.px_bounds();
                Rect::new(
                    Point::new(
                        Fixed::from_f64(bounds.min.x.into()),
                        Fixed::from_f64(bounds.min.y.into()),
                    ),
                    Point::new(
                        Fixed::from_f64(bounds.max.x.into()),
                        Fixed::from_f64(bounds.max.y.into()),
                    ),
                )
            })
            .fold(Rect::default(), Rect::union)
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "pixel bounds are whole numbers well inside i32"
    )]
    fn draw(&self, origin: Point, text: &str, plot: &mut dyn FnMut(i32, i32, f32)) {
        for glyph in self
            .layout(origin, text)
            .filter_map(|glyph| self.font.outline_glyph(glyph))
        {
            let bounds = glyph.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            glyph.draw(|x, y, coverage| plot(left + x as i32, top + y as i32, coverage));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FaceOptions, Hinting, OutlineFont};
    use crate::fixed::{Fixed, Point};
    use crate::font::{Face, FaceSource, FontError, FontFile};

    fn unhinted() -> OutlineFont {
        OutlineFont::built_in(
            FontFile::Sans,
            FaceOptions {
                dpi: 72.0,
                hinting: Hinting::None,
            },
        )
        .unwrap()
    }

    #[test]
    fn standard_parses() {
        let font = OutlineFont::standard();
        assert_eq!(font.options(), FaceOptions::default());
        for file in FontFile::ALL {
            let _font = OutlineFont::built_in(file, FaceOptions::default())
                .unwrap_or_else(|e| panic!("failed to load {file:?}: {e}"));
        }
    }

    #[test]
    fn metrics_scale_with_size() {
        // DejaVu Sans: 2048 units per em, ascent 1901, descent 483
        let face = unhinted().face(8.59).unwrap();
        assert_eq!(face.metrics().ascent, Fixed::from_parts(7, 62));
        assert_eq!(face.metrics().descent, Fixed::from_parts(2, 2));
        assert_eq!(face.metrics().height().ceil(), 10);
    }

    #[test]
    fn dpi_scales_like_size() {
        let font = OutlineFont::built_in(
            FontFile::Sans,
            FaceOptions {
                dpi: 144.0,
                hinting: Hinting::None,
            },
        )
        .unwrap();
        let at_144 = font.face(10.0).unwrap().metrics();
        let at_72 = unhinted().face(20.0).unwrap().metrics();
        assert_eq!(at_144, at_72);
    }

    #[test]
    fn hinting_rounds_up_vertical_metrics() {
        let font = OutlineFont::built_in(FontFile::Sans, FaceOptions::default()).unwrap();
        let metrics = font.face(8.59).unwrap().metrics();
        assert_eq!(metrics.ascent, Fixed::from_int(8));
        assert_eq!(metrics.descent, Fixed::from_int(3));
    }

    #[test]
    fn rejects_unusable_sizes() {
        let font = unhinted();
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(font.face(size), Err(FontError::InvalidSize(_))));
        }
    }

    #[test]
    fn rejects_unusable_dpi() {
        let options = FaceOptions {
            dpi: 0.0,
            hinting: Hinting::Full,
        };
        assert!(matches!(
            OutlineFont::built_in(FontFile::Sans, options),
            Err(FontError::InvalidDpi(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            OutlineFont::from_bytes(b"not a font".to_vec(), FaceOptions::default()),
            Err(FontError::InvalidFont(_))
        ));
    }

    #[test]
    fn bounds_below_ascent() {
        let face = unhinted().face(36.0).unwrap();
        let origin = Point::new(Fixed::ZERO, face.metrics().ascent);
        let bounds = face.bounds(origin, "Hello");
        assert!(!bounds.is_empty());
        assert!(bounds.min.y >= Fixed::ZERO, "{bounds}");
        assert!(bounds.max.y <= origin.y + face.metrics().descent.ceil_to_pixel(), "{bounds}");
        let wider = face.bounds(origin, "Hello, world");
        assert!(wider.max.x > bounds.max.x);
    }

    #[test]
    fn blank_text_has_empty_bounds() {
        let face = unhinted().face(12.0).unwrap();
        let origin = Point::new(Fixed::ZERO, face.metrics().ascent);
        assert!(face.bounds(origin, "").is_empty());
        assert!(face.bounds(origin, "   ").is_empty());
    }

    #[test]
    fn draws_inside_bounds() {
        let face = unhinted().face(24.0).unwrap();
        let origin = Point::new(Fixed::ZERO, face.metrics().ascent);
        let bounds = face.bounds(origin, "g.");
        let mut covered = 0;
        face.draw(origin, "g.", &mut |x, y, coverage| {
            assert!(x >= bounds.min.x.floor() && x < bounds.max.x.ceil(), "x={x} {bounds}");
            assert!(y >= bounds.min.y.floor() && y < bounds.max.y.ceil(), "y={y} {bounds}");
            if coverage >= 0.5 {
                covered += 1;
            }
        });
        assert!(covered > 0);
    }
}
