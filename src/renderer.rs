use hayro::{render, Pdf, RenderSettings};
use hayro_interpret::InterpreterSettings;
use image::RgbImage;

use crate::document::Document;
use crate::error::{Error, Result};

/// Per-page pixel budget used when no other limit is configured.
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Largest side length hayro can render, in pixels.
pub const MAX_SIDE: u32 = u16::MAX as u32;

/// The options that should be applied when rendering a PDF to images.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// By how much the original size should be scaled.
    pub scale: f32,
    /// Largest number of pixels a single rendered page may have.
    pub max_pixels: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl RenderOptions {
    /// Reject options no renderer could honour.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidOptions(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }

        if self.max_pixels == 0 {
            return Err(Error::InvalidOptions(
                "max_pixels must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Pixel size of a page of `(width, height)` points, or an error if it cannot
    /// be rendered within the limits.
    ///
    /// Rounds the same way hayro does, so the result matches the rendered pixmap.
    pub fn pixel_size(&self, (width, height): (f32, f32)) -> Result<(u32, u32)> {
        let side = |points: f32| ((points * self.scale) as f64).floor();
        let (pix_width, pix_height) = (side(width), side(height));

        // Written so that NaN fails too.
        if !(pix_width >= 1.0 && pix_height >= 1.0) {
            return Err(Error::Resource(format!(
                "a {}x{} pt page at scale {} renders to an empty image",
                width, height, self.scale
            )));
        }

        if pix_width > MAX_SIDE as f64 || pix_height > MAX_SIDE as f64 {
            return Err(Error::Resource(format!(
                "{}x{} pixels exceeds the largest renderable side of {}",
                pix_width, pix_height, MAX_SIDE
            )));
        }

        let (pix_width, pix_height) = (pix_width as u32, pix_height as u32);
        if pix_width as u64 * pix_height as u64 > self.max_pixels {
            return Err(Error::Resource(format!(
                "{}x{} pixels exceeds the limit of {}",
                pix_width, pix_height, self.max_pixels
            )));
        }

        Ok((pix_width, pix_height))
    }
}

/// A page rendered as an 8-bit RGB image.
pub type RasterPage = RgbImage;
/// A document rendered as images, one per page in physical order.
pub type PageSequence = Vec<RasterPage>;

/// A backend that turns a document into a [`PageSequence`].
pub trait Rasterize: Sync {
    /// Get the name of the backend.
    fn name(&self) -> &str;

    /// Render every page of `document`.
    fn rasterize(&self, document: &Document, options: &RenderOptions) -> Result<PageSequence>;
}

/// The hayro renderer (pure Rust).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Renderer;

impl Rasterize for Renderer {
    fn name(&self) -> &str {
        "hayro"
    }

    fn rasterize(&self, document: &Document, options: &RenderOptions) -> Result<PageSequence> {
        rasterize(document, options)
    }
}

/// Render a PDF as a sequence of RGB images using hayro.
///
/// Pages are rendered one after the other in document order. Every page is checked
/// against the size limits before it is rendered, and the first page that fails aborts
/// the whole document. Transparent areas are flattened onto white.
pub fn rasterize(document: &Document, options: &RenderOptions) -> Result<PageSequence> {
    options.validate()?;

    with_pdf(document, |pdf| {
        let interpreter_settings = InterpreterSettings::default();
        let render_settings = RenderSettings {
            x_scale: options.scale,
            y_scale: options.scale,
            ..Default::default()
        };

        let mut pages = Vec::new();
        for (index, page) in pdf.pages().iter().enumerate() {
            let (width, height) = options
                .pixel_size(page.render_dimensions())
                .map_err(|e| match e {
                    Error::Resource(msg) => {
                        Error::Resource(format!("page {}: {}", index + 1, msg))
                    }
                    other => other,
                })?;

            let pixmap = render(page, &interpreter_settings, &render_settings);
            if (pixmap.width() as u32, pixmap.height() as u32) != (width, height) {
                return Err(Error::Internal(format!(
                    "page {}: expected {}x{} pixels, renderer produced {}x{}",
                    index + 1,
                    width,
                    height,
                    pixmap.width(),
                    pixmap.height()
                )));
            }

            let raster = flatten(width, height, &pixmap.take_u8())?;

            log::trace!(
                "{}: page {} rendered at {}x{}",
                document.name(),
                index + 1,
                width,
                height
            );
            pages.push(raster);
        }

        log::debug!(
            "{}: rendered {} pages at scale {}",
            document.name(),
            pages.len(),
            options.scale
        );

        Ok(pages)
    })
}

/// Open `document` for the duration of `f`. The parsed PDF is released before
/// returning, whether `f` succeeds or not.
fn with_pdf<T, F>(document: &Document, f: F) -> Result<T>
where
    F: FnOnce(&Pdf) -> Result<T>,
{
    let pdf = Pdf::new(document.shared_bytes())
        .map_err(|e| Error::Format(format!("failed to parse {}: {:?}", document.name(), e)))?;

    let result = f(&pdf);
    drop(pdf);

    if let Err(e) = &result {
        log::warn!("{}: {}", document.name(), e);
    }

    result
}

/// Composite premultiplied RGBA pixels onto white and drop the alpha channel.
fn flatten(width: u32, height: u32, rgba: &[u8]) -> Result<RasterPage> {
    // Over white, each channel becomes c + (255 - a); c <= a for premultiplied input.
    let rgb = rgba
        .chunks_exact(4)
        .flat_map(|px| {
            let background = 255 - px[3];
            [
                px[0].saturating_add(background),
                px[1].saturating_add(background),
                px[2].saturating_add(background),
            ]
        })
        .collect();

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| Error::Internal("pixel buffer does not match image size".to_string()))
}
