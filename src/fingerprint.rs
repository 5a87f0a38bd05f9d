use std::fmt;
use std::io::Read;

use crate::document::Document;
use crate::error::Result;

/// MD5 digest of a document's full byte content.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Fingerprint a byte slice.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(md5::compute(bytes).0)
    }

    /// Fingerprint a buffered document.
    pub fn of(document: &Document) -> Self {
        Self::of_bytes(document.bytes())
    }

    /// Consume `reader` to the end and fingerprint what was read.
    ///
    /// A read failure anywhere in the stream is an error; there is no digest of a
    /// partial read.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::of_bytes(&bytes))
    }

    /// The raw digest.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Two documents are identical iff their fingerprints are.
pub fn identical(a: &Fingerprint, b: &Fingerprint) -> bool {
    a == b
}
