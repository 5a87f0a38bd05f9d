use image::Rgb;

use crate::document::Document;
use crate::error::Result;
use crate::fingerprint::{identical, Fingerprint};
use crate::reconcile::{reconcile, PagePair, DEFAULT_FILL};
use crate::renderer::{PageSequence, Rasterize, RenderOptions, Renderer};

/// Options for a whole comparison.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompareOptions {
    /// How pages are rendered.
    pub render: RenderOptions,
    /// Colour of filler pages.
    pub fill: Rgb<u8>,
    /// Render both documents at the same time.
    pub parallel: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            fill: DEFAULT_FILL,
            parallel: true,
        }
    }
}

/// Outcome of comparing two documents.
#[derive(Clone, Debug, PartialEq)]
pub enum Comparison {
    /// Both documents have exactly the same bytes. Nothing was rendered.
    Identical {
        /// The shared fingerprint.
        fingerprint: Fingerprint,
    },
    /// The documents differ; every page index has a pair to look at.
    Different {
        /// Fingerprint of the first document.
        left: Fingerprint,
        /// Fingerprint of the second document.
        right: Fingerprint,
        /// Pages side by side, in page order.
        pairs: Vec<PagePair>,
    },
}

impl Comparison {
    /// Whether the documents are byte-identical.
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical { .. })
    }

    /// The page pairs, empty for identical documents.
    pub fn pairs(&self) -> &[PagePair] {
        match self {
            Comparison::Identical { .. } => &[],
            Comparison::Different { pairs, .. } => pairs,
        }
    }
}

/// Compare two documents with the hayro renderer.
pub fn compare(left: &Document, right: &Document, options: &CompareOptions) -> Result<Comparison> {
    compare_with(&Renderer, left, right, options)
}

/// Compare two documents, rendering them with `renderer` if their bytes differ.
pub fn compare_with<R: Rasterize>(
    renderer: &R,
    left: &Document,
    right: &Document,
    options: &CompareOptions,
) -> Result<Comparison> {
    let left_fp = left.fingerprint();
    let right_fp = right.fingerprint();

    if identical(&left_fp, &right_fp) {
        log::info!("{} and {} are identical ({})", left.name(), right.name(), left_fp);
        return Ok(Comparison::Identical {
            fingerprint: left_fp,
        });
    }

    log::info!(
        "{} ({}) and {} ({}) differ, rendering with {}",
        left.name(),
        left_fp,
        right.name(),
        right_fp,
        renderer.name()
    );

    let (left_pages, right_pages) = render_both(renderer, left, right, options)?;
    let pairs = reconcile(left_pages, right_pages, options.fill)?;

    Ok(Comparison::Different {
        left: left_fp,
        right: right_fp,
        pairs,
    })
}

fn render_both<R: Rasterize>(
    renderer: &R,
    left: &Document,
    right: &Document,
    options: &CompareOptions,
) -> Result<(PageSequence, PageSequence)> {
    let render = &options.render;

    if options.parallel {
        let (left_pages, right_pages) = rayon::join(
            || renderer.rasterize(left, render),
            || renderer.rasterize(right, render),
        );
        Ok((left_pages?, right_pages?))
    } else {
        let left_pages = renderer.rasterize(left, render)?;
        let right_pages = renderer.rasterize(right, render)?;
        Ok((left_pages, right_pages))
    }
}
