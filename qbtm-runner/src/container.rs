//! The .qmb binary container
//!
//! Layout, in order: four magic bytes `"QMB\x01"`, the 32-byte entrypoint
//! QGID, a big-endian u32 name length and the UTF-8 name, a big-endian
//! u32 version length and the UTF-8 version, then store payload bytes to
//! the end of the buffer. Encoding and decoding are exact inverses.

use crate::error::{Result, RunnerError};
use qbtm_core::Qgid;

/// The four magic bytes: `"QMB\x01"`.
pub const QMB_MAGIC: [u8; 4] = [0x51, 0x4D, 0x42, 0x01];

/// A decoded .qmb binary: entrypoint, metadata, and raw store payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub entrypoint: Qgid,
    pub name: String,
    pub version: String,
    pub store_data: Vec<u8>,
}

impl Container {
    /// Assemble a container from its fields.
    pub fn new(
        entrypoint: Qgid,
        name: impl Into<String>,
        version: impl Into<String>,
        store_data: Vec<u8>,
    ) -> Self {
        Self {
            entrypoint,
            name: name.into(),
            version: version.into(),
            store_data,
        }
    }

    /// Serialize to the wire layout.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let name_len = field_len(&self.name, "name")?;
        let version_len = field_len(&self.version, "version")?;

        let mut out = Vec::with_capacity(
            4 + 32 + 4 + self.name.len() + 4 + self.version.len() + self.store_data.len(),
        );
        out.extend_from_slice(&QMB_MAGIC);
        out.extend_from_slice(self.entrypoint.as_bytes());
        out.extend_from_slice(&name_len.to_be_bytes());
        out.extend_from_slice(self.name.as_bytes());
        out.extend_from_slice(&version_len.to_be_bytes());
        out.extend_from_slice(self.version.as_bytes());
        out.extend_from_slice(&self.store_data);
        Ok(out)
    }

    /// Parse the wire layout back into a container.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor { buf: bytes, pos: 0 };

        let magic = cursor.take(4, "magic")?;
        if magic != QMB_MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(magic);
            return Err(RunnerError::InvalidMagic { found });
        }

        let entrypoint = Qgid::from_slice(cursor.take(32, "entrypoint")?)?;

        let name = cursor.utf8_field("name")?;
        let version = cursor.utf8_field("version")?;
        let store_data = cursor.rest().to_vec();

        Ok(Self {
            entrypoint,
            name,
            version,
            store_data,
        })
    }
}

fn field_len(s: &str, field: &'static str) -> Result<u32> {
    u32::try_from(s.len()).map_err(|_| RunnerError::FieldTooLong { field })
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        let available = self.buf.len() - self.pos;
        if available < n {
            return Err(RunnerError::TruncatedHeader {
                field,
                needed: n,
                available,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn utf8_field(&mut self, field: &'static str) -> Result<String> {
        let raw = self.take(4, field)?;
        let len = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
        let raw = self.take(len, field)?;
        String::from_utf8(raw.to_vec()).map_err(|_| RunnerError::InvalidUtf8 { field })
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}
