use super::{find_line_end, require_output, tail_content, LineRead, LineStatus, ReaderState};
use crate::options::ReaderOptions;
use crate::{Error, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Line reader over a file.
pub type TextFileReader = StreamLineReader<File>;

/// Line reader over any byte source, buffered through a fixed lookahead.
///
/// A `\r` sitting at the very end of the buffered bytes is held back until
/// the next refill shows whether a `\n` follows it, so a CRLF split across
/// two reads still yields one line without the `\r`.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::{LineRead, StreamLineReader};
///
/// let mut reader = StreamLineReader::new(&b"eth0\r\nlo\n\nwlan0"[..]);
/// let lines: Vec<String> = reader.lines().collect::<Result<_, _>>().unwrap();
/// assert_eq!(lines, vec!["eth0", "lo", "", "wlan0"]);
/// ```
#[derive(Debug)]
pub struct StreamLineReader<R> {
    // `None` once closed.
    source: Option<R>,
    lookahead: Vec<u8>,
    // Unconsumed bytes are `lookahead[start..end]`.
    start: usize,
    end: usize,
    eof: bool,
    // Part of the current line has been delivered already.
    mid_line: bool,
    skip_empty: bool,
    state: ReaderState,
    failure: Option<Error>,
}

impl<R: Read> StreamLineReader<R> {
    /// Creates a reader with a 1024-byte lookahead that keeps empty lines.
    pub fn new(source: R) -> Self {
        let options = ReaderOptions::default();
        StreamLineReader {
            source: Some(source),
            lookahead: vec![0; options.lookahead],
            start: 0,
            end: 0,
            eof: false,
            mid_line: false,
            skip_empty: options.skip_empty_lines.unwrap_or(false),
            state: ReaderState::Ready,
            failure: None,
        }
    }

    /// Creates a reader with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a lookahead below 2 bytes and
    /// [`Error::OutOfMemory`] if it cannot be allocated.
    pub fn with_options(source: R, options: ReaderOptions) -> Result<Self> {
        if options.lookahead < 2 {
            return Err(Error::invalid_argument(format!(
                "lookahead of {} bytes is too small, need at least 2",
                options.lookahead
            )));
        }
        let mut lookahead = Vec::new();
        lookahead
            .try_reserve_exact(options.lookahead)
            .map_err(|_| Error::out_of_memory(options.lookahead))?;
        lookahead.resize(options.lookahead, 0);
        Ok(StreamLineReader {
            source: Some(source),
            lookahead,
            start: 0,
            end: 0,
            eof: false,
            mid_line: false,
            skip_empty: options.skip_empty_lines.unwrap_or(false),
            state: ReaderState::Ready,
            failure: None,
        })
    }

    /// Releases the lookahead and the source. Later reads fail with
    /// [`Error::NotInitialized`].
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!("line reader closed");
        }
        self.lookahead = Vec::new();
        self.start = 0;
        self.end = 0;
    }

    /// Returns the source, dropping any buffered bytes.
    pub fn into_inner(mut self) -> Option<R> {
        self.source.take()
    }

    fn fail(&mut self, err: Error) -> Error {
        self.state = ReaderState::Failed;
        self.failure = Some(err.clone());
        err
    }

    /// Moves unconsumed bytes to the front and reads more after them.
    fn refill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.lookahead.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        let Some(source) = self.source.as_mut() else {
            return Err(Error::NotInitialized("line reader"));
        };
        let space = self.lookahead.len() - self.end;
        let read = loop {
            match source.read(&mut self.lookahead[self.end..]) {
                Ok(read) => break read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(self.fail(err.into())),
            }
        };
        if read > space {
            return Err(self.fail(Error::internal(format!(
                "source reported {read} bytes for a {space}-byte buffer"
            ))));
        }
        if read == 0 {
            self.eof = true;
        }
        self.end += read;
        trace!(read, buffered = self.end, "lookahead refilled");
        Ok(())
    }

    fn deliver(&mut self, out: &mut [u8], len: usize, consumed: usize) -> LineStatus {
        out[..len].copy_from_slice(&self.lookahead[self.start..self.start + len]);
        self.start += consumed;
        self.mid_line = false;
        LineStatus::Complete(len)
    }

    fn deliver_piece(&mut self, out: &mut [u8], len: usize) -> LineStatus {
        out[..len].copy_from_slice(&self.lookahead[self.start..self.start + len]);
        self.start += len;
        self.mid_line = true;
        LineStatus::Continue(len)
    }
}

impl<R: Read> LineRead for StreamLineReader<R> {
    fn read_line_into(&mut self, out: &mut [u8]) -> Result<LineStatus> {
        if self.source.is_none() {
            return Err(Error::NotInitialized("line reader"));
        }
        match self.state {
            ReaderState::Exhausted => return Ok(LineStatus::End),
            ReaderState::Failed => {
                return Err(self
                    .failure
                    .clone()
                    .unwrap_or_else(|| Error::internal("reader failed without a cause")))
            }
            ReaderState::Ready => {}
        }
        require_output(out)?;

        loop {
            let pending = &self.lookahead[self.start..self.end];

            if let Some(line) = find_line_end(pending) {
                if line.content > out.len() {
                    return Ok(self.deliver_piece(out, out.len()));
                }
                if self.skip_empty && line.content == 0 && !self.mid_line {
                    self.start += line.consumed;
                    continue;
                }
                return Ok(self.deliver(out, line.content, line.consumed));
            }

            let content = tail_content(pending);
            if self.eof {
                if pending.is_empty() {
                    if self.mid_line {
                        self.mid_line = false;
                        return Ok(LineStatus::Complete(0));
                    }
                    self.state = ReaderState::Exhausted;
                    return Ok(LineStatus::End);
                }
                if content > out.len() {
                    return Ok(self.deliver_piece(out, out.len()));
                }
                let consumed = pending.len();
                if self.skip_empty && content == 0 && !self.mid_line {
                    self.start += consumed;
                    continue;
                }
                return Ok(self.deliver(out, content, consumed));
            }

            if content >= out.len() {
                return Ok(self.deliver_piece(out, out.len()));
            }
            if pending.len() == self.lookahead.len() {
                // Full lookahead without a terminator: hand out what is safe.
                return Ok(self.deliver_piece(out, content));
            }
            self.refill()?;
        }
    }

    fn state(&self) -> ReaderState {
        self.state
    }
}

impl StreamLineReader<File> {
    /// Opens `path` for reading with the default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Opens `path` for reading with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, plus the errors of
    /// [`with_options`](Self::with_options).
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| Error::io(format!("cannot open {}: {err}", path.display())))?;
        debug!(path = %path.display(), "opened text file");
        Self::with_options(file, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;

    /// Hands out one scripted chunk per `read` call.
    struct Chunked(VecDeque<Vec<u8>>);

    impl Chunked {
        fn new(chunks: &[&[u8]]) -> Self {
            Chunked(chunks.iter().map(|c| c.to_vec()).collect())
        }
    }

    impl Read for Chunked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some(mut chunk) = self.0.pop_front() else {
                return Ok(0);
            };
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            if n < chunk.len() {
                chunk.drain(..n);
                self.0.push_front(chunk);
            }
            Ok(n)
        }
    }

    struct Liar;

    impl Read for Liar {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            Ok(buf.len() + 1)
        }
    }

    #[test]
    fn test_carriage_return_across_refills() {
        let source = Chunked::new(&[b"text\r", b"\nnext\n"]);
        let mut reader = StreamLineReader::new(source);
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("text"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("next"));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.state(), ReaderState::Exhausted);
    }

    #[test]
    fn test_full_lookahead_holds_back_carriage_return() {
        let options = ReaderOptions::new().with_lookahead(5);
        let source = Chunked::new(&[b"text\r", b"\nnext\n"]);
        let mut reader = StreamLineReader::with_options(source, options).unwrap();

        let mut out = [0u8; 64];
        assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Continue(4));
        assert_eq!(&out[..4], b"text");
        assert_eq!(reader.read_line_into(&mut out).unwrap(), LineStatus::Complete(0));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn test_lone_carriage_return_is_content() {
        let mut reader = StreamLineReader::new(Chunked::new(&[b"a\r", b"b\n"]));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("a\rb"));
    }

    #[test]
    fn test_last_line_without_terminator() {
        let mut reader = StreamLineReader::new(&b"one\ntwo\r"[..]);
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("one"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("two"));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_closed_reader_is_not_initialized() {
        let mut reader = StreamLineReader::new(&b"one\n"[..]);
        reader.close();
        assert_eq!(
            reader.next_line(),
            Err(Error::NotInitialized("line reader"))
        );
    }

    #[test]
    fn test_oversized_read_count_is_internal_error() {
        let mut reader = StreamLineReader::new(Liar);
        assert!(matches!(
            reader.next_line(),
            Err(Error::InternalDesign(_))
        ));
        assert_eq!(reader.state(), ReaderState::Failed);
        assert!(reader.next_line().is_err());
    }

    #[test]
    fn test_tiny_lookahead_rejected() {
        let options = ReaderOptions::new().with_lookahead(1);
        assert!(StreamLineReader::with_options(&b""[..], options).is_err());
    }

    #[test]
    fn test_skip_empty_lines_option() {
        let options = ReaderOptions::new().with_skip_empty_lines(true);
        let mut reader = StreamLineReader::with_options(&b"a\n\n\r\nb\n"[..], options).unwrap();
        let lines: Vec<String> = reader.lines().collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
