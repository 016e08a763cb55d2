//! Incremental line readers.
//!
//! Two readers share the [`LineRead`] trait:
//!
//! - [`StreamLineReader`] pulls bytes from any [`std::io::Read`] through a
//!   fixed lookahead buffer. [`TextFileReader`] is the file-backed instance.
//! - [`TextBufferReader`] walks an in-memory byte buffer.
//!
//! Lines end at `\n`; one `\r` directly before it is stripped. The last line
//! of the input does not need a terminator.
//!
//! The core operation is [`LineRead::read_line_into`], which writes into a
//! caller buffer of fixed size. When a line does not fit, the reader hands
//! out as much as fits and reports [`LineStatus::Continue`]; the next call
//! continues the same line where the previous one stopped. The provided
//! [`next_line`](LineRead::next_line) and [`lines`](LineRead::lines) helpers
//! loop over that and grow an [`AppendBuffer`](crate::AppendBuffer) instead.
//!
//! ```rust
//! use line_toolbox::{LineRead, LineStatus, TextBufferReader};
//!
//! let mut reader = TextBufferReader::new(&b"hello world\n"[..]);
//! let mut out = [0u8; 5];
//! assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Continue(5));
//! assert_eq!(&out, b"hello");
//! assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Continue(5));
//! assert_eq!(&out, b" worl");
//! assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Complete(1));
//! assert_eq!(&out[..1], b"d");
//! assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::End);
//! ```

mod buffer;
mod stream;

pub use buffer::TextBufferReader;
pub use stream::{StreamLineReader, TextFileReader};

use crate::append::AppendBuffer;
use crate::{Error, Result};

/// Size of the chunk the provided [`LineRead`] methods read through.
const CHUNK: usize = 256;

/// Outcome of [`LineRead::read_line_into`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStatus {
    /// The line ended; this many bytes were written and they finish it.
    Complete(usize),
    /// This many bytes of the current line were written and more follow.
    /// Either the output was too small or the lookahead filled up before a
    /// terminator was seen.
    Continue(usize),
    /// The input is exhausted; nothing was written.
    End,
}

/// Lifecycle of a reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderState {
    /// More lines may be available.
    Ready,
    /// Every line has been returned.
    Exhausted,
    /// A read failed; every later call reports the same failure.
    Failed,
}

/// A source of lines read one at a time.
pub trait LineRead {
    /// Copies the next line, or the next piece of it, into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty `out`,
    /// [`Error::NotInitialized`] after [`close`](StreamLineReader::close),
    /// and [`Error::Io`] when the underlying source fails.
    fn read_line_into(&mut self, out: &mut [u8]) -> Result<LineStatus>;

    /// Current lifecycle state.
    fn state(&self) -> ReaderState;

    /// Returns the next whole line as bytes, or `None` at the end of input.
    ///
    /// # Errors
    ///
    /// Same as [`read_line_into`](Self::read_line_into), plus
    /// [`Error::OutOfMemory`] if the line cannot be buffered.
    fn next_line_bytes(&mut self) -> Result<Option<Vec<u8>>> {
        let mut chunk = [0u8; CHUNK];
        let mut line = AppendBuffer::new();
        let mut started = false;
        loop {
            match self.read_line_into(&mut chunk)? {
                LineStatus::Complete(n) => {
                    line.append(&chunk[..n], None, None)?;
                    return Ok(Some(line.into_bytes()));
                }
                LineStatus::Continue(n) => {
                    line.append(&chunk[..n], None, None)?;
                    started = true;
                }
                LineStatus::End if started => return Ok(Some(line.into_bytes())),
                LineStatus::End => return Ok(None),
            }
        }
    }

    /// Returns the next whole line as text, replacing invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Same as [`next_line_bytes`](Self::next_line_bytes).
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.next_line_bytes()?.map(|bytes| match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }))
    }

    /// Iterates over the remaining lines. The iterator stops after the first
    /// error.
    fn lines(&mut self) -> Lines<'_, Self>
    where
        Self: Sized,
    {
        Lines {
            reader: self,
            done: false,
        }
    }
}

/// Iterator returned by [`LineRead::lines`].
#[derive(Debug)]
pub struct Lines<'r, R> {
    reader: &'r mut R,
    done: bool,
}

impl<R: LineRead> Iterator for Lines<'_, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn require_output(out: &[u8]) -> Result<()> {
    if out.is_empty() {
        return Err(Error::invalid_argument("output buffer has no room"));
    }
    Ok(())
}

/// Where the current line ends inside `pending`.
struct LineEnd {
    /// Content length, a `\r` before the terminator excluded.
    content: usize,
    /// Bytes to consume once the line is fully delivered.
    consumed: usize,
}

/// Locates the first complete line in `pending`.
fn find_line_end(pending: &[u8]) -> Option<LineEnd> {
    let newline = memchr::memchr(b'\n', pending)?;
    let content = if newline > 0 && pending[newline - 1] == b'\r' {
        newline - 1
    } else {
        newline
    };
    Some(LineEnd {
        content,
        consumed: newline + 1,
    })
}

/// Content length of an unterminated tail, a trailing `\r` excluded.
fn tail_content(pending: &[u8]) -> usize {
    match pending.last() {
        Some(b'\r') => pending.len() - 1,
        _ => pending.len(),
    }
}
