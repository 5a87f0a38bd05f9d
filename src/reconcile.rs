//! Pairing up the pages of two documents that may differ in length.

use image::{Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::renderer::{PageSequence, RasterPage};

/// Background of synthesized pages.
pub const DEFAULT_FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// One side of a [`PagePair`].
#[derive(Clone, Debug, PartialEq)]
pub enum PageImage {
    /// A page that exists in the document.
    Rendered(RasterPage),
    /// A blank stand-in for a page the document does not have.
    Filler(RasterPage),
}

impl PageImage {
    /// The pixels, whichever kind of page this is.
    pub fn image(&self) -> &RasterPage {
        match self {
            PageImage::Rendered(image) | PageImage::Filler(image) => image,
        }
    }

    /// Take ownership of the pixels.
    pub fn into_image(self) -> RasterPage {
        match self {
            PageImage::Rendered(image) | PageImage::Filler(image) => image,
        }
    }

    /// Whether this side was synthesized.
    pub fn is_filler(&self) -> bool {
        matches!(self, PageImage::Filler(_))
    }

    /// Pixel dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image().dimensions()
    }
}

/// The two images shown for one page index.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePair {
    /// Zero-based page index.
    pub index: usize,
    /// The page from the first document.
    pub left: PageImage,
    /// The page from the second document.
    pub right: PageImage,
}

impl PagePair {
    /// One-based page number, for display.
    pub fn page_number(&self) -> usize {
        self.index + 1
    }
}

/// Pair the pages of `left` and `right` index by index.
///
/// The result has as many entries as the longer sequence. Where one side has run
/// out of pages it gets a blank `fill` page the size of the other side's first page.
pub fn reconcile(left: PageSequence, right: PageSequence, fill: Rgb<u8>) -> Result<Vec<PagePair>> {
    let count = left.len().max(right.len());
    if left.len() != right.len() {
        log::debug!(
            "page counts differ ({} vs {}), padding to {}",
            left.len(),
            right.len(),
            count
        );
    }

    let left_size = left.first().map(RgbImage::dimensions);
    let right_size = right.first().map(RgbImage::dimensions);

    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut pairs = Vec::with_capacity(count);

    for index in 0..count {
        let left_page = side(left.next(), right_size, fill, index)?;
        let right_page = side(right.next(), left_size, fill, index)?;
        pairs.push(PagePair {
            index,
            left: left_page,
            right: right_page,
        });
    }

    Ok(pairs)
}

fn side(
    page: Option<RasterPage>,
    other_size: Option<(u32, u32)>,
    fill: Rgb<u8>,
    index: usize,
) -> Result<PageImage> {
    if let Some(page) = page {
        return Ok(PageImage::Rendered(page));
    }

    let (width, height) = other_size.ok_or_else(|| {
        Error::Internal(format!(
            "page {} is missing on both sides, nothing to size a filler after",
            index + 1
        ))
    })?;

    Ok(PageImage::Filler(filler(width, height, fill)))
}

/// A solid page of the given size.
pub fn filler(width: u32, height: u32, fill: Rgb<u8>) -> RasterPage {
    RgbImage::from_pixel(width, height, fill)
}
