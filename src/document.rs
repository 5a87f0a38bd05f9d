use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::fingerprint::Fingerprint;

/// The raw bytes of one PDF, read exactly once.
///
/// The buffer is shared (not copied) between the fingerprint and the renderer, so
/// both always see the same content.
#[derive(Clone, Debug)]
pub struct Document {
    name: String,
    bytes: Arc<Vec<u8>>,
}

impl Document {
    /// Wrap bytes that are already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::new(bytes.into()),
        }
    }

    /// Buffer the whole of `reader`.
    pub fn from_reader(name: impl Into<String>, mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(name, bytes))
    }

    /// Read a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(path.to_string_lossy(), bytes))
    }

    /// A label for log messages, usually the file path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The document content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Digest of the full content.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of_bytes(&self.bytes)
    }

    pub(crate) fn shared_bytes(&self) -> Arc<Vec<u8>> {
        self.bytes.clone()
    }
}
