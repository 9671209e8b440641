//! A crate for rendering a line of text as large as it fits into a fixed pixel height, for
//! instance to print on label tape.
//!
//! # Features
//!
//! - Largest point size whose line height fits, found by binary search in steps of 0.01pt
//!   ([`search::largest_fitting_size`])
//! - Any TrueType/OpenType font, with a bundled default ([`font::OutlineFont`])
//! - Configurable resolution and pixel-grid hinting ([`font::FaceOptions`])
//! - Pluggable image types and colors ([`render::CanvasFactory`], [`render::Palette`])
//!
//! # Example
//!
//! ```
//! # use tapetext::Renderer;
//! let image = Renderer::new(64)?.render("Hello, world")?;
//! assert_eq!(image.height(), 64);
//! assert!(image.width() > 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Output pixels are either the foreground or the background color of the palette, so images can
//! go straight to a two-tone printer.

pub mod fixed;
pub mod font;
pub mod render;
pub mod search;
mod str_ext;

pub use image;

pub use crate::font::{FaceOptions, FontError, FontFile, Hinting, OutlineFont};
pub use crate::render::{ConfigError, RenderError, Renderer};
