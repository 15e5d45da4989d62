//! Frame output accumulator
//!
//! An entire frame is appended here and handed to the terminal in a single
//! write, so the user never sees a half-drawn screen.

use std::io::{self, Write};

/// Growable byte buffer holding one frame
///
/// The content is always the in-order concatenation of every slice appended
/// since construction (or the last release). Growth reserves exactly the
/// requested amount; if that reservation fails the append is skipped and the
/// buffer is left as it was.
#[derive(Debug, Default)]
pub struct AppendBuffer {
    bytes: Vec<u8>,
}

impl AppendBuffer {
    /// Create an empty buffer with no backing storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `data` to the tail
    ///
    /// Returns `false` if the buffer could not grow, in which case nothing
    /// was appended.
    pub fn append(&mut self, data: &[u8]) -> bool {
        if let Err(e) = self.bytes.try_reserve_exact(data.len()) {
            tracing::warn!(
                len = self.bytes.len(),
                requested = data.len(),
                "append buffer could not grow: {}",
                e
            );
            return false;
        }
        self.bytes.extend_from_slice(data);
        true
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the whole buffer with one `write_all` and flush
    pub fn flush_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.bytes)?;
        out.flush()
    }

    /// Free the backing storage
    pub fn release(&mut self) {
        self.bytes = Vec::new();
    }
}
