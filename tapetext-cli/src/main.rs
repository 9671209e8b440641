//! Renders text into a PNG image of a fixed height, written to stdout.
//!
//! ```text
//! tapetext --height 64 'Hello, world' > label.png
//! ```

use std::fmt::{self, Display};
use std::fs;
use std::io::{self, Cursor, IsTerminal as _, Write as _};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use image::ImageFormat;
use tapetext::font::{FaceOptions, FontFile, OutlineFont};
use tapetext::Renderer;

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if cli.lines.is_empty() {
        eprintln!("missing text to print");
        return Ok(ExitCode::from(2));
    }
    if io::stdout().is_terminal() {
        bail!("refusing to write a PNG image to a terminal, redirect stdout to a file or a pipe");
    }

    let renderer = Renderer::builder()
        .max_height(cli.height)
        .font(cli.font()?)
        .build()?;
    let text = cli.lines.join("\n");
    let image = renderer
        .render(&text)
        .with_context(|| format!("failed to render {text:?} at {}px", cli.height))?;
    log::info!("rendered {}x{} image", image.width(), image.height());

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(png.get_ref())
        .and_then(|()| stdout.flush())
        .context("failed to write image to stdout")?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Text to render, one line per argument
    lines: Vec<String>,
    /// Height of the image in pixels
    #[arg(long, default_value_t = 64)]
    height: u32,
    /// Name of a bundled font (eg `DejaVuSans-Bold`) or path to a TrueType/OpenType file
    #[arg(long)]
    font: Option<String>,
    /// Resolution in pixels per inch
    #[arg(long, default_value_t = 72.0)]
    dpi: f64,
    /// Snapping of glyph metrics to the pixel grid
    #[arg(long, default_value_t)]
    hinting: Hinting,
}

impl Cli {
    fn font(&self) -> Result<OutlineFont> {
        let options = FaceOptions {
            dpi: self.dpi,
            hinting: self.hinting.into(),
        };
        let font = match self.font.as_deref() {
            None => OutlineFont::built_in(FontFile::DEFAULT, options)?,
            Some(name) => {
                if let Some(file) = FontFile::from_name(name) {
                    OutlineFont::built_in(file, options)?
                } else {
                    let path = Path::new(name);
                    let data = fs::read(path).with_context(|| {
                        format!("{name:?} is neither a bundled font nor a readable file")
                    })?;
                    OutlineFont::from_bytes(data, options)
                        .with_context(|| format!("failed to load font {}", path.display()))?
                }
            }
        };
        Ok(font)
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
#[value(rename_all = "kebab-case")]
enum Hinting {
    None,
    Vertical,
    #[default]
    Full,
}

impl From<Hinting> for tapetext::font::Hinting {
    fn from(value: Hinting) -> Self {
        match value {
            Hinting::None => Self::None,
            Hinting::Vertical => Self::Vertical,
            Hinting::Full => Self::Full,
        }
    }
}

impl Display for Hinting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Vertical => write!(f, "vertical"),
            Self::Full => write!(f, "full"),
        }
    }
}
