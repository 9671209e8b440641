use image::{GenericImage, GenericImageView, GrayImage, Luma, Rgba};

/// The pixel type of the canvases a [`CanvasFactory`] allocates
pub type CanvasPixel<C> = <<C as CanvasFactory>::Canvas as GenericImageView>::Pixel;

/// Allocates the image text is drawn on
///
/// Implemented by [`GrayCanvas`] (the default) and by any closure `Fn(u32, u32) -> I` where `I`
/// is an [`image::GenericImage`], eg `|w: u32, h: u32| RgbaImage::new(w, h)`.
pub trait CanvasFactory {
    /// The image type produced
    type Canvas: GenericImage;

    /// Allocates a `width` × `height` image. Its initial contents do not matter, every pixel
    /// gets painted.
    fn allocate(&self, width: u32, height: u32) -> Self::Canvas;
}

impl<F, I> CanvasFactory for F
where
    F: Fn(u32, u32) -> I,
    I: GenericImage,
{
    type Canvas = I;

    fn allocate(&self, width: u32, height: u32) -> I {
        self(width, height)
    }
}

/// Allocates 8-bit grayscale images
#[derive(Clone, Copy, Debug, Default)]
pub struct GrayCanvas;

impl CanvasFactory for GrayCanvas {
    type Canvas = GrayImage;

    fn allocate(&self, width: u32, height: u32) -> GrayImage {
        GrayImage::new(width, height)
    }
}

/// The two colors of rendered text
///
/// Pixels are painted either [`foreground`](Palette::foreground) or
/// [`background`](Palette::background), never anything in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<P> {
    /// The color of glyphs
    pub foreground: P,
    /// The color of everything else
    pub background: P,
}

impl Palette<Luma<u8>> {
    /// Black text on white, the default for [`GrayCanvas`].
    pub const BLACK_ON_WHITE: Self = Self {
        foreground: Luma([0]),
        background: Luma([255]),
    };

    /// White text on black.
    pub const WHITE_ON_BLACK: Self = Self {
        foreground: Luma([255]),
        background: Luma([0]),
    };
}

impl Palette<Rgba<u8>> {
    /// Opaque black text on a transparent background.
    pub const BLACK_ON_TRANSPARENT: Self = Self {
        foreground: Rgba([0, 0, 0, 255]),
        background: Rgba([0, 0, 0, 0]),
    };
}
