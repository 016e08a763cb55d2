use super::{find_line_end, require_output, tail_content, LineRead, LineStatus, ReaderState};
use crate::options::ReaderOptions;
use crate::{Error, Result};
use std::borrow::Cow;

/// Line reader over bytes already in memory.
///
/// The input ends at its first NUL byte, if it has one. Empty lines are
/// skipped unless [`ReaderOptions::skip_empty_lines`] says otherwise.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::{LineRead, TextBufferReader};
///
/// let output = "eth0: up\n\nlo: up\r\n\0garbage";
/// let mut reader = TextBufferReader::from_text(output);
/// assert_eq!(reader.next_line().unwrap().as_deref(), Some("eth0: up"));
/// assert_eq!(reader.next_line().unwrap().as_deref(), Some("lo: up"));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
#[derive(Clone, Debug)]
pub struct TextBufferReader<'a> {
    data: Cow<'a, [u8]>,
    position: usize,
    mid_line: bool,
    skip_empty: bool,
    closed: bool,
    state: ReaderState,
}

impl<'a> TextBufferReader<'a> {
    /// Creates a reader over borrowed or owned bytes that skips empty lines.
    pub fn new<D: Into<Cow<'a, [u8]>>>(data: D) -> Self {
        let mut data = data.into();
        if let Some(nul) = memchr::memchr(0, &data) {
            data = match data {
                Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[..nul]),
                Cow::Owned(mut bytes) => {
                    bytes.truncate(nul);
                    Cow::Owned(bytes)
                }
            };
        }
        TextBufferReader {
            data,
            position: 0,
            mid_line: false,
            skip_empty: true,
            closed: false,
            state: ReaderState::Ready,
        }
    }

    /// Creates a reader over text.
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }

    /// Creates a reader with custom options. Only the empty-line policy
    /// applies; the whole input is already buffered.
    pub fn with_options<D: Into<Cow<'a, [u8]>>>(data: D, options: ReaderOptions) -> Self {
        let mut reader = Self::new(data);
        reader.skip_empty = options.skip_empty_lines.unwrap_or(true);
        reader
    }

    /// Logical length of the input, up to the first NUL.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes not yet returned.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.position..]
    }

    /// Releases the buffer. Later reads fail with [`Error::NotInitialized`].
    pub fn close(&mut self) {
        self.data = Cow::Borrowed(&[]);
        self.position = 0;
        self.closed = true;
    }

    fn copy_out(&self, out: &mut [u8], len: usize) {
        out[..len].copy_from_slice(&self.data[self.position..self.position + len]);
    }
}

impl LineRead for TextBufferReader<'_> {
    fn read_line_into(&mut self, out: &mut [u8]) -> Result<LineStatus> {
        if self.closed {
            return Err(Error::NotInitialized("buffer reader"));
        }
        require_output(out)?;

        loop {
            let pending = &self.data[self.position..];
            if pending.is_empty() {
                if self.mid_line {
                    self.mid_line = false;
                    return Ok(LineStatus::Complete(0));
                }
                self.state = ReaderState::Exhausted;
                return Ok(LineStatus::End);
            }

            let (content, consumed) = match find_line_end(pending) {
                Some(line) => (line.content, line.consumed),
                None => (tail_content(pending), pending.len()),
            };

            if content > out.len() {
                self.copy_out(out, out.len());
                self.position += out.len();
                self.mid_line = true;
                return Ok(LineStatus::Continue(out.len()));
            }
            if self.skip_empty && content == 0 && !self.mid_line {
                self.position += consumed;
                continue;
            }
            self.copy_out(out, content);
            self.position += consumed;
            self.mid_line = false;
            return Ok(LineStatus::Complete(content));
        }
    }

    fn state(&self) -> ReaderState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_nul() {
        let reader = TextBufferReader::new(b"abc\0def".to_vec());
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.remaining(), b"abc");
    }

    #[test]
    fn test_keeps_empty_lines_when_asked() {
        let options = ReaderOptions::new().with_skip_empty_lines(false);
        let mut reader = TextBufferReader::with_options(&b"a\n\nb"[..], options);
        let lines: Vec<String> = reader.lines().collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_piece_boundary_on_terminator() {
        let mut reader = TextBufferReader::from_text("abcd\nef");
        let mut out = [0u8; 4];
        assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Complete(4));
        assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Complete(2));
        assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::End);
        assert_eq!(reader.state(), ReaderState::Exhausted);
    }

    #[test]
    fn test_close() {
        let mut reader = TextBufferReader::from_text("a\n");
        reader.close();
        assert!(matches!(
            reader.next_line(),
            Err(Error::NotInitialized(_))
        ));
    }
}
