//! Error types shared by every stage of a comparison.

use thiserror::Error;

/// Everything that can go wrong while fingerprinting, rendering or pairing pages.
#[derive(Error, Debug)]
pub enum Error {
    /// The document bytes could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a PDF we can open.
    #[error("invalid document: {0}")]
    Format(String),

    /// Rendering a page needed more memory than allowed or available.
    #[error("resource limit exceeded: {0}")]
    Resource(String),

    /// An internal invariant did not hold.
    #[error("internal error: {0}")]
    Internal(String),

    /// The caller passed options that cannot be honoured.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
