//! Grow-on-demand byte buffer with separator-prefixed concatenation.
//!
//! [`AppendBuffer`] is the leaf utility the rest of the crate grows its
//! outputs with: the readers collect long lines into one, and tables can
//! serialize into one without a size limit.
//!
//! The buffer keeps an explicit capacity counter. Everything past the logical
//! content is zero, so the content is always followed by a terminator slot.
//!
//! ```rust
//! use line_toolbox::AppendBuffer;
//!
//! let mut buffer = AppendBuffer::new();
//! buffer.append_str("eth0", None).unwrap();
//! buffer.append_str("wlan0", Some(", ")).unwrap();
//! assert_eq!(buffer.as_bytes(), b"eth0, wlan0");
//! assert!(buffer.capacity() > buffer.len());
//! ```

use crate::{Error, Result};
use std::borrow::Cow;

/// An owned, growable byte buffer that never shrinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppendBuffer {
    // Allocated storage; its length is the capacity and bytes past `len` are zero.
    storage: Vec<u8>,
    len: usize,
}

impl AppendBuffer {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub fn new() -> Self {
        AppendBuffer::default()
    }

    /// Appends `separator` (when given and non-empty) followed by up to
    /// `max_length` bytes of `text` (`None` appends all of it).
    ///
    /// `Some(0)` is a successful no-op: not even the separator is written.
    /// If growing fails the previous content is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] when the storage cannot grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::AppendBuffer;
    ///
    /// let mut buffer = AppendBuffer::new();
    /// buffer.append(b"inet addr:10.0.0.7", Some(4), None).unwrap();
    /// assert_eq!(buffer.as_bytes(), b"inet");
    /// buffer.append(b"ignored", Some(0), Some(b"|")).unwrap();
    /// assert_eq!(buffer.as_bytes(), b"inet");
    /// ```
    pub fn append(
        &mut self,
        text: &[u8],
        max_length: Option<usize>,
        separator: Option<&[u8]>,
    ) -> Result<()> {
        if max_length == Some(0) {
            return Ok(());
        }

        let take = max_length.map_or(text.len(), |max| max.min(text.len()));
        let separator = separator.unwrap_or_default();
        let end = self.len + separator.len() + take;
        self.grow_to(end + 1)?;

        let mut cursor = self.len;
        self.storage[cursor..cursor + separator.len()].copy_from_slice(separator);
        cursor += separator.len();
        self.storage[cursor..end].copy_from_slice(&text[..take]);
        self.len = end;
        Ok(())
    }

    /// Appends a whole string with an optional separator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] when the storage cannot grow.
    pub fn append_str(&mut self, text: &str, separator: Option<&str>) -> Result<()> {
        self.append(text.as_bytes(), None, separator.map(str::as_bytes))
    }

    // Grows to at least `capacity`, doubling so repeated appends stay linear.
    fn grow_to(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.storage.len() {
            return Ok(());
        }
        let target = capacity.max(self.storage.len().saturating_mul(2));
        let additional = target - self.storage.len();
        self.storage
            .try_reserve_exact(additional)
            .map_err(|_| Error::out_of_memory(additional))?;
        // New space is zero-filled before anything is written into it.
        self.storage.resize(target, 0);
        Ok(())
    }

    /// Returns the logical content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Returns the content as text, replacing invalid UTF-8.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Length of the logical content in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size, always at least `len() + 1` once anything was appended.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Bytes past the content; always all zero.
    #[must_use]
    pub fn spare(&self) -> &[u8] {
        &self.storage[self.len..]
    }

    /// Empties the buffer, keeping its capacity.
    pub fn clear(&mut self) {
        self.storage[..self.len].fill(0);
        self.len = 0;
    }

    /// Consumes the buffer and returns the content.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.storage.truncate(self.len);
        self.storage
    }

    /// Consumes the buffer and returns the content as text, replacing invalid UTF-8.
    #[must_use]
    pub fn into_string_lossy(self) -> String {
        match String::from_utf8(self.into_bytes()) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}
