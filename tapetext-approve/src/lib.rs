//! Approval testing for rendered images.
//!
//! Each test compares its output against a reference image that a human has looked at and
//! approved. For a test named `name`, [`approve_image()`] writes the output to
//! `<testdata>/<name>.new.png` and compares it with `<testdata>/<name>.good.png`. To approve a
//! new or changed output, inspect the `.new.png` file and rename it to `.good.png`.
//!
//! Images match if they have the same size and either every pixel is identical (compared as
//! 8-bit RGBA) or the external `perceptualdiff` tool considers them indistinguishable.
//!
//! ```no_run
//! # use image::GrayImage;
//! let image = GrayImage::new(4, 4);
//! tapetext_approve::approve_image!("blank", image).unwrap();
//! ```

use std::fmt::{self, Display};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

pub use image;
use image::{DynamicImage, GenericImageView as _, ImageError, ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

/// Name of the external fuzzy comparison tool, looked up on `PATH`
pub const PERCEPTUALDIFF: &str = "perceptualdiff";

/// Compares an image with its approved version in `$CARGO_MANIFEST_DIR/tests/testdata`.
///
/// Takes the test name and anything convertible into an [`image::DynamicImage`], and returns
/// the result of [`approve_image()`].
#[macro_export]
macro_rules! approve_image {
    ($name:expr, $image:expr $(,)?) => {
        $crate::approve_image(
            &::std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("testdata"),
            $name,
            &::std::convert::Into::<$crate::image::DynamicImage>::into($image),
        )
    };
}

/// Compares `image` with the approved `<testdata>/<name>.good.png`, after saving it as
/// `<testdata>/<name>.new.png`.
///
/// `name` is escaped with [`sanitize_name`] first. `testdata` is created if missing.
///
/// # Errors
/// See [`ApprovalError`]; every failure to match or to even compare ends up here.
pub fn approve_image(
    testdata: &Path,
    name: &str,
    image: &DynamicImage,
) -> Result<(), ApprovalError> {
    let name = sanitize_name(name);
    fs::create_dir_all(testdata).map_err(|source| ApprovalError::CreateDir {
        path: testdata.to_owned(),
        source,
    })?;

    let new_path = testdata.join(format!("{name}.new.png"));
    image
        .save_with_format(&new_path, ImageFormat::Png)
        .map_err(|source| ApprovalError::Save {
            path: new_path.clone(),
            source,
        })?;

    let good_path = testdata.join(format!("{name}.good.png"));
    let good = image::open(&good_path).map_err(|source| ApprovalError::OpenGood {
        path: good_path.clone(),
        source,
    })?;
    if good.dimensions() != image.dimensions() {
        return Err(ApprovalError::SizeMismatch {
            got: image.dimensions(),
            good: good.dimensions(),
        });
    }

    let Some(difference) = first_difference(&image.to_rgba8(), &good.to_rgba8()) else {
        log::debug!("{name}: identical to {}", good_path.display());
        return Ok(());
    };
    log::debug!("{name}: {difference}, trying {PERCEPTUALDIFF}");
    let output = Command::new(PERCEPTUALDIFF)
        .arg(&new_path)
        .arg(&good_path)
        .output()
        .map_err(|source| ApprovalError::PerceptualDiffUnavailable { difference, source })?;
    if output.status.success() {
        log::info!("{name}: {PERCEPTUALDIFF} accepted {difference}");
        Ok(())
    } else {
        let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
        report.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(ApprovalError::PerceptualDiff {
            difference,
            output: report,
        })
    }
}

/// Escapes a test name for use as a file name.
///
/// `%` becomes `%25`, `.` becomes `%2E` (file extensions stay unambiguous), `/` becomes `%2F`
/// and line breaks become `%0A`.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => sanitized.push_str("%25"),
            '.' => sanitized.push_str("%2E"),
            '/' => sanitized.push_str("%2F"),
            '\n' | '\r' => sanitized.push_str("%0A"),
            c => sanitized.push(c),
        }
    }
    sanitized
}

/// The first pixel, in row-major order, where two images of the same size differ.
#[must_use]
pub fn first_difference(image: &RgbaImage, good: &RgbaImage) -> Option<PixelDifference> {
    image
        .enumerate_pixels()
        .zip(good.pixels())
        .find(|((_, _, got), good)| got != good)
        .map(|((x, y, &got), &good)| PixelDifference { x, y, got, good })
}

/// A pixel that differs from the approved image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDifference {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// The new color
    pub got: Rgba<u8>,
    /// The approved color
    pub good: Rgba<u8>,
}

impl Display for PixelDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, y, got, good } = self;
        write!(
            f,
            "pixel difference at ({x}, {y}): {:?} != {:?}",
            got.0, good.0
        )
    }
}

/// A failed approval
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApprovalError {
    /// The test data directory could not be created.
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        /// The directory
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// The new image could not be saved.
    #[error("cannot save PNG {}: {source}", .path.display())]
    Save {
        /// Where it should have been saved
        path: PathBuf,
        /// The underlying error
        source: ImageError,
    },
    /// There is no approved image, or it cannot be decoded.
    #[error("cannot load good PNG {}: {source}", .path.display())]
    OpenGood {
        /// Where the approved image should be
        path: PathBuf,
        /// The underlying error
        source: ImageError,
    },
    /// The new image and the approved one have different sizes.
    #[error("size mismatch: {got:?} != {good:?}")]
    SizeMismatch {
        /// `(width, height)` of the new image
        got: (u32, u32),
        /// `(width, height)` of the approved image
        good: (u32, u32),
    },
    /// The images differ and `perceptualdiff` could not be run to judge how much.
    #[error("{difference}, and perceptualdiff could not be run: {source}")]
    PerceptualDiffUnavailable {
        /// The first differing pixel
        difference: PixelDifference,
        /// The underlying error
        source: io::Error,
    },
    /// The images differ visibly according to `perceptualdiff`.
    #[error("{difference}, and perceptualdiff failed:\n{output}")]
    PerceptualDiff {
        /// The first differing pixel
        difference: PixelDifference,
        /// What `perceptualdiff` printed
        output: String,
    },
}
