//! Drawing a page pair next to each other as one image.

use image::RgbImage;
use tiny_skia::{Color, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use crate::error::{Error, Result};
use crate::reconcile::{PageImage, PagePair};
use crate::renderer::RasterPage;

/// Border around pages of the first document (cornflower blue).
pub const LEFT_COLOR: (u8, u8, u8) = (100, 149, 237);
/// Border around pages of the second document.
pub const RIGHT_COLOR: (u8, u8, u8) = (227, 137, 20);
/// Border around filler pages, whichever side they are on.
pub const FILLER_COLOR: (u8, u8, u8) = (160, 160, 160);

/// How a sheet is laid out.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetOptions {
    /// Border width as a fraction of the shorter side of each page. `0` disables it.
    pub border: f32,
    /// Empty space between the two pages, in pixels.
    pub gutter: u32,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            border: 1.0 / 50.0,
            gutter: 16,
        }
    }
}

impl SheetOptions {
    /// Reject layouts that cannot be drawn.
    pub fn validate(&self) -> Result<()> {
        if !self.border.is_finite() || !(0.0..1.0).contains(&self.border) {
            return Err(Error::InvalidOptions(format!(
                "border must be at least 0 and less than 1, got {}",
                self.border
            )));
        }

        Ok(())
    }
}

/// Place both pages of `pair` left to right on a white sheet.
pub fn compose(pair: &PagePair, options: &SheetOptions) -> Result<RgbImage> {
    options.validate()?;

    let left = framed(&pair.left, LEFT_COLOR, options.border)?;
    let right = framed(&pair.right, RIGHT_COLOR, options.border)?;

    let width = left.width() + options.gutter + right.width();
    let height = left.height().max(right.height());

    let mut sheet = Pixmap::new(width, height).ok_or_else(|| {
        Error::Resource(format!("unable to allocate a {}x{} sheet", width, height))
    })?;
    sheet.fill(Color::WHITE);

    let mut cursor = 0.0;
    for side in [&left, &right] {
        sheet.draw_pixmap(
            0,
            0,
            side.as_ref(),
            &PixmapPaint::default(),
            Transform::from_translate(cursor, 0.0),
            None,
        );
        cursor += (side.width() + options.gutter) as f32;
    }

    opaque_to_rgb(&sheet)
}

fn framed(page: &PageImage, color: (u8, u8, u8), border: f32) -> Result<Pixmap> {
    let color = if page.is_filler() { FILLER_COLOR } else { color };
    let decoded = to_pixmap(page.image())?;

    let width = decoded.width() as f32;
    let height = decoded.height() as f32;
    let border_width = (width.min(height) * border).ceil();
    if border_width <= 0.0 {
        return Ok(decoded);
    }

    let path = {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(width + border_width, 0.0);
        pb.line_to(width + border_width, height + border_width);
        pb.line_to(0.0, height + border_width);
        pb.close();
        pb.finish()
            .ok_or_else(|| Error::Internal("degenerate page frame".to_string()))?
    };

    let actual_width = (width + 2.0 * border_width) as u32;
    let actual_height = (height + 2.0 * border_width) as u32;
    let mut pixmap = Pixmap::new(actual_width, actual_height).ok_or_else(|| {
        Error::Resource(format!(
            "unable to allocate a {}x{} pixmap",
            actual_width, actual_height
        ))
    })?;

    let mut stroke = Stroke::default();
    stroke.width = border_width;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.0, color.1, color.2, 255);

    pixmap.draw_pixmap(
        border_width as i32,
        border_width as i32,
        decoded.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    pixmap.stroke_path(
        &path,
        &paint,
        &stroke,
        Transform::from_translate(border_width / 2.0, border_width / 2.0),
        None,
    );

    Ok(pixmap)
}

/// Drop the alpha channel of a fully opaque pixmap.
fn opaque_to_rgb(pixmap: &Pixmap) -> Result<RasterPage> {
    // Premultiplied and straight colour agree when alpha is 255.
    let rgb = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb)
        .ok_or_else(|| Error::Internal("pixel buffer does not match image size".to_string()))
}

fn to_pixmap(image: &RgbImage) -> Result<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height()).ok_or_else(|| {
        Error::Internal(format!(
            "cannot draw an empty {}x{} page",
            image.width(),
            image.height()
        ))
    })?;

    let rgba = image
        .pixels()
        .flat_map(|px| [px[0], px[1], px[2], 255])
        .collect();

    Pixmap::from_vec(rgba, size)
        .ok_or_else(|| Error::Internal("pixel buffer does not match page size".to_string()))
}
