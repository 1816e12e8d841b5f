//! Console I/O shell
//!
//! Prompts and integer input for the drivers. Generic over the reader and
//! writer so the binaries pass locked stdin/stdout and tests pass in-memory
//! buffers.
//!
//! # Input Model
//!
//! [`Console::read_int`] behaves like a scanf `%d` on a token stream:
//! leading whitespace (newlines included) is skipped, one
//! whitespace-delimited token is consumed, and any remaining tokens on the
//! line stay queued for the next read. So `2 8⏎` answers both prompts of the
//! power driver.
//!
//! Unlike scanf, a token must be an integer in full: `12abc` is rejected
//! rather than read as `12`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Failure to obtain an integer from the console
#[derive(Debug)]
pub enum InputError {
    /// Input ended before an integer token was found
    Eof,
    /// The next token is not an `i64`
    Malformed(String),
    /// The underlying reader failed
    Io(io::Error),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Eof => write!(f, "expected an integer, reached end of input"),
            InputError::Malformed(token) => write!(f, "expected an integer, got '{}'", token),
            InputError::Io(e) => write!(f, "failed to read input: {}", e),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

/// Prompting reader over a token stream
pub struct Console<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Console {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Write `text` without a trailing newline and flush it
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    /// Read the next whitespace-delimited token as an `i64`
    pub fn read_int(&mut self) -> Result<i64, InputError> {
        let token = self.next_token()?;
        token.parse().map_err(|_| InputError::Malformed(token))
    }

    /// Output side, for driver results
    pub fn out(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the console, returning the reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn next_token(&mut self) -> Result<String, InputError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::Eof);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
