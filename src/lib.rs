/*!
# Motivation
The purpose of this crate is to make it quick to eyeball whether two versions of a PDF
look the same. It does not try to be clever: there is no text diffing and no pixel
diffing. Either the two files are byte-for-byte identical, in which case nothing is
rendered at all, or every page of both files is rendered and the pages are handed back
in pairs so they can be shown next to each other.

# Pipeline
1. Both inputs are read once into a [`Document`]. The same buffer is used for hashing
   and for rendering.
2. The [`Fingerprint`]s (MD5 of the whole file) are compared. Equal fingerprints end the
   comparison with [`Comparison::Identical`].
3. Otherwise each document is rendered page by page with [hayro](https://github.com/LaurenzV/hayro)
   into 8-bit RGB images. Transparent areas end up white.
4. The two page sequences are [`reconcile()`]d: if one document has fewer pages, it is padded
   with blank pages the size of the other document's first page, so that every page
   number has something on both sides.

```no_run
use pdfcompare::{compare, CompareOptions, Document};

let left = Document::open("old.pdf")?;
let right = Document::open("new.pdf")?;

for pair in compare(&left, &right, &CompareOptions::default())?.pairs() {
    println!(
        "page {}: {:?} vs {:?}",
        pair.page_number(),
        pair.left.dimensions(),
        pair.right.dimensions()
    );
}
# Ok::<(), pdfcompare::Error>(())
```

# Binary
The `pdfcompare` binary wraps the above and writes one PNG per page with both renderings
side by side (see [`sheet`]). It can also compare two directory trees of PDFs.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compare;
mod document;
mod error;
mod fingerprint;
pub mod reconcile;
mod renderer;
pub mod sheet;

pub use compare::{compare, compare_with, CompareOptions, Comparison};
pub use document::Document;
pub use error::{Error, Result};
pub use fingerprint::{identical, Fingerprint};
pub use reconcile::{reconcile, PageImage, PagePair};
pub use renderer::*;
