//! Finding the largest point size that fits
//!
//! [`Quantized`] is a plain binary search over a continuous range that has been cut into equal
//! steps. [`largest_fitting_face`] uses it over [`POINT_SIZES`] to pick a face for a pixel height.

use std::num::NonZeroU32;

use crate::font::{Face as _, FaceSource, FontError};

/// Candidate point sizes: `0.0, 0.01, ..., 71.99`.
///
/// One inch tall text is far taller than any label tape, and a step of a hundredth of a point
/// costs only a few extra probes.
pub const POINT_SIZES: Quantized = Quantized::new(0.01, 72.0);

/// A range `[0, max)` of floating-point values, in steps of `step`
///
/// Value `i` is `i * step`, for indices `0..ceil(max / step)`. Indices below zero clamp to the
/// value `0.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantized {
    step: f64,
    max: f64,
}

impl Quantized {
    /// Creates a range. Both `step` and `max` should be positive and finite.
    #[must_use]
    pub const fn new(step: f64, max: f64) -> Self {
        Self { step, max }
    }

    /// The number of values in the range.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "saturating cast of a small positive count"
    )]
    #[must_use]
    pub fn steps(&self) -> isize {
        (self.max / self.step).ceil() as isize
    }

    /// The value at `index`, clamping negative indices to `0.0`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "indices are far below 2^52"
    )]
    #[must_use]
    pub fn value(&self, index: isize) -> f64 {
        index.max(0) as f64 * self.step
    }

    /// Finds the largest value for which `too_big` is `Ok(false)`.
    ///
    /// `too_big` must be monotonic: once it returns `Ok(true)` for some value it must do so for
    /// every larger value. This is not checked; a non-monotonic predicate gives a meaningless
    /// answer.
    ///
    /// If even the smallest value is too big the result is `0.0` (the clamped value at index
    /// `-1`), so callers that cannot use `0.0` should treat it as "nothing fits".
    ///
    /// # Errors
    /// The first `Err` returned by `too_big`, which stops the search immediately.
    pub fn largest_fitting<E>(
        &self,
        mut too_big: impl FnMut(f64) -> Result<bool, E>,
    ) -> Result<f64, E> {
        // smallest index that no longer fits
        let (mut low, mut high) = (0, self.steps());
        while low < high {
            let mid = low + (high - low) / 2;
            if too_big(self.value(mid))? {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        Ok(self.value(low - 1))
    }
}

/// Finds the largest size in [`POINT_SIZES`] whose line height, `ceil(ascent + descent)`, fits
/// in `max_height / line_count` pixels (rounded down).
///
/// Every probed face is dropped as soon as its height has been read.
///
/// # Errors
/// The first error from `source`. If no size fits, `source` is asked for a size `0.0` face,
/// which is expected to fail.
pub fn largest_fitting_size<S: FaceSource + ?Sized>(
    max_height: NonZeroU32,
    line_count: NonZeroU32,
    source: &S,
) -> Result<f64, FontError> {
    let budget = max_height.get() / line_count.get();
    let size = POINT_SIZES.largest_fitting(|size| {
        let face = source.face(size)?;
        let height = face.metrics().height().ceil();
        drop(face);
        let too_big = i64::from(height) > i64::from(budget);
        log::trace!(
            "size={size:<5} {} {height} vs {budget}",
            if too_big { "big" } else { "ok " }
        );
        Ok::<_, FontError>(too_big)
    })?;
    log::debug!("largest size fitting {budget}px per line is {size}pt");
    Ok(size)
}

/// [`largest_fitting_size`], then a fresh face of that size.
///
/// # Errors
/// As [`largest_fitting_size`], plus any error creating the final face. A budget nothing fits in
/// ends up asking for a size `0.0` face, so sources should reject it.
pub fn largest_fitting_face<S: FaceSource + ?Sized>(
    max_height: NonZeroU32,
    line_count: NonZeroU32,
    source: &S,
) -> Result<S::Face, FontError> {
    let size = largest_fitting_size(max_height, line_count, source)?;
    source.face(size)
}
