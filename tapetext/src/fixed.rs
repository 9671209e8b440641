//! 26.6 fixed-point numbers
//!
//! Font metrics, pen positions and bounding boxes are kept in 1/64 pixel units, so that a size
//! search and the drawing that follows it compare the exact same values on every machine.

use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Neg, Sub};

/// A signed 26.6 fixed-point number: 26 bits of whole pixels and 6 bits (1/64) of fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// Zero
    pub const ZERO: Self = Self(0);
    /// One whole pixel
    pub const ONE: Self = Self(1 << Self::FRACTION_BITS);

    const FRACTION_BITS: u32 = 6;
    const FRACTION_MASK: i32 = (1 << Self::FRACTION_BITS) - 1;

    /// Wraps raw 26.6 bits.
    #[must_use]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// The raw 26.6 bits.
    #[must_use]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// A whole number of pixels.
    #[must_use]
    pub const fn from_int(pixels: i32) -> Self {
        Self(pixels << Self::FRACTION_BITS)
    }

    /// `whole + sixty_fourths / 64`, eg `Fixed::from_parts(8, 11)` for 8 and 11/64 pixels.
    ///
    /// `sixty_fourths` is expected to be in `0..64`.
    #[must_use]
    pub const fn from_parts(whole: i32, sixty_fourths: i32) -> Self {
        Self((whole << Self::FRACTION_BITS) | (sixty_fourths & Self::FRACTION_MASK))
    }

    /// Rounds a floating-point pixel value to the nearest 1/64.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "saturating cast, metrics are nowhere near i32::MAX / 64"
    )]
    #[must_use]
    pub fn from_f64(pixels: f64) -> Self {
        Self((pixels * f64::from(Self::ONE.0)).round() as i32)
    }

    /// The value as floating-point pixels.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::ONE.0)
    }

    /// The value as single precision floating-point pixels.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pixel coordinates stay well inside f32 precision"
    )]
    #[must_use]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// The largest whole pixel not greater than `self`.
    #[must_use]
    pub const fn floor(self) -> i32 {
        self.0 >> Self::FRACTION_BITS
    }

    /// The smallest whole pixel not less than `self`.
    #[must_use]
    pub const fn ceil(self) -> i32 {
        (self.0 + Self::FRACTION_MASK) >> Self::FRACTION_BITS
    }

    /// The nearest whole pixel, with halves rounded up.
    #[must_use]
    pub const fn round(self) -> i32 {
        (self.0 + (Self::ONE.0 >> 1)) >> Self::FRACTION_BITS
    }

    /// [`ceil`](Self::ceil), but staying in fixed-point.
    #[must_use]
    pub const fn ceil_to_pixel(self) -> Self {
        Self((self.0 + Self::FRACTION_MASK) & !Self::FRACTION_MASK)
    }

    /// [`round`](Self::round), but staying in fixed-point.
    #[must_use]
    pub const fn round_to_pixel(self) -> Self {
        Self((self.0 + (Self::ONE.0 >> 1)) & !Self::FRACTION_MASK)
    }
}

impl Add for Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Formats as `whole:sixty_fourths`, eg `8:11` for 8 and 11/64.
impl Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let bits = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{}:{:02}",
            bits >> Self::FRACTION_BITS,
            bits & Self::FRACTION_MASK.unsigned_abs()
        )
    }
}

/// A point in 26.6 fixed-point pixel coordinates; `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate
    pub x: Fixed,
    /// Vertical coordinate, growing downwards
    pub y: Fixed,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top left corner
    pub min: Point,
    /// Bottom right corner
    pub max: Point,
}

impl Rect {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Returns true if the rectangle contains no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// The rectangle moved by `offset`.
    #[must_use]
    pub fn translate(self, offset: Point) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The smallest rectangle containing both `self` and `other`.
    ///
    /// Empty rectangles do not contribute, wherever they are.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::{Fixed, Point, Rect};

    #[test]
    fn rounding() {
        let value = Fixed::from_parts(8, 11);
        assert_eq!(value.to_bits(), 8 * 64 + 11);
        assert_eq!(value.floor(), 8);
        assert_eq!(value.ceil(), 9);
        assert_eq!(value.round(), 8);
        assert_eq!(Fixed::from_parts(1, 53).round(), 2);
        assert_eq!(Fixed::from_int(3).ceil(), 3);
        assert_eq!(Fixed::from_parts(1, 53).ceil_to_pixel(), Fixed::from_int(2));
        assert_eq!(Fixed::from_parts(1, 31).round_to_pixel(), Fixed::from_int(1));
        assert_eq!(Fixed::from_parts(1, 32).round_to_pixel(), Fixed::from_int(2));
    }

    #[test]
    fn negative() {
        let value = -Fixed::from_parts(1, 32);
        assert_eq!(value.floor(), -2);
        assert_eq!(value.ceil(), -1);
        assert_eq!(value.to_string(), "-1:32");
    }

    #[test]
    fn from_float() {
        assert_eq!(Fixed::from_f64(7.968_75), Fixed::from_parts(7, 62));
        assert_eq!(Fixed::from_f64(0.007), Fixed::ZERO);
        assert_eq!(Fixed::from_f64(0.008), Fixed::from_bits(1));
        assert!((Fixed::from_parts(2, 32).to_f64() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        assert_eq!(Fixed::from_parts(8, 11).to_string(), "8:11");
        assert_eq!(Fixed::from_parts(16, 3).to_string(), "16:03");
        let rect = Rect::new(
            Point::new(Fixed::ZERO, Fixed::from_int(1)),
            Point::new(Fixed::from_int(20), Fixed::from_parts(43, 32)),
        );
        assert_eq!(rect.to_string(), "(0:00, 1:00)..(20:00, 43:32)");
    }

    #[test]
    fn translate() {
        let rect = Rect::new(
            Point::new(-Fixed::from_int(3), Fixed::from_int(10)),
            Point::new(Fixed::from_int(11), Fixed::from_int(63)),
        );
        let moved = rect.translate(Point::new(Fixed::from_int(3), -Fixed::ONE));
        assert_eq!(moved.to_string(), "(0:00, 9:00)..(14:00, 62:00)");
    }

    #[test]
    fn union_ignores_empty() {
        let a = Rect::new(
            Point::new(Fixed::from_int(1), Fixed::from_int(2)),
            Point::new(Fixed::from_int(5), Fixed::from_int(6)),
        );
        let b = Rect::new(
            Point::new(Fixed::from_int(4), Fixed::ZERO),
            Point::new(Fixed::from_int(9), Fixed::from_int(3)),
        );
        let union = a.union(b);
        assert_eq!(union.min, Point::new(Fixed::from_int(1), Fixed::ZERO));
        assert_eq!(union.max, Point::new(Fixed::from_int(9), Fixed::from_int(6)));
        assert_eq!(Rect::default().union(a), a);
        assert_eq!(a.union(Rect::default()), a);
        assert!(Rect::default().is_empty());
    }
}
