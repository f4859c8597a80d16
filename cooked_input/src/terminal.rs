//! # Terminal Input Helper
//!
//! This module wraps the line reader and writer that prompts talk to. It
//! repeatedly prompts the user until the input satisfies a [`Pipeline`].
//!
//! ## Features
//! - Works over stdin/stdout ([`Terminal::stdio`]) or any `BufRead`/`Write` pair.
//! - Strips the line terminator (`\n` or `\r\n`) from every answer.
//! - Reports end of input instead of spinning on an empty stream.
//!
//! ## Usage
//!
//! ### Example 1: Boolean input
//! ```rust,no_run
//! use cooked_input::{BooleanConvertor, Cleaner, Pipeline, Terminal};
//!
//! let mut term = Terminal::stdio();
//! let likes_rust = term
//!     .ask(
//!         "Do you like Rust? (true/false)",
//!         &Pipeline::new(BooleanConvertor::default()).cleaner(Cleaner::strip()),
//!     )
//!     .unwrap();
//!
//! println!("The input: {}", likes_rust);
//! ```
//!
//! ### Example 2: Scripted input
//! ```rust
//! use std::io::Cursor;
//! use cooked_input::{IntConvertor, Pipeline, Terminal};
//!
//! let mut output = Vec::new();
//! let mut term = Terminal::new(Cursor::new("ten\n10\n"), &mut output);
//! let n = term.ask("How many?", &Pipeline::new(IntConvertor::default())).unwrap();
//! assert_eq!(n, 10);
//! ```
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::{
    convertors::Convert,
    error::InputError,
    pipeline::Pipeline,
    prompt::{self, Prompt},
};

/// A line-oriented reader/writer pair used by every prompt.
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// Binds the process' stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads one line without its terminator. `Ok(None)` means end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Writes `text` without a newline and flushes, so the cursor waits after it.
    pub fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")?;
        self.writer.flush()
    }

    /// Prints a question and loops until the answer passes `pipeline`.
    ///
    /// Rejected answers are reported and the question is asked again. Use
    /// [`crate::GetInput`] for defaults, retry limits and optional answers.
    pub fn ask<C: Convert>(
        &mut self,
        question: &str,
        pipeline: &Pipeline<C>,
    ) -> Result<C::Output, InputError> {
        prompt::run(self, pipeline, &Prompt::new(question), false)?.ok_or(InputError::Blank)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convertors::{IntConvertor, StrConvertor};
    use std::io::Cursor;

    fn scripted(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut term = scripted("unix\nwindows\r\nlast");
        assert_eq!(term.read_line().unwrap().as_deref(), Some("unix"));
        assert_eq!(term.read_line().unwrap().as_deref(), Some("windows"));
        assert_eq!(term.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(term.read_line().unwrap(), None);
    }

    #[test]
    fn test_empty_line_is_not_eof() {
        let mut term = scripted("\n");
        assert_eq!(term.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(term.read_line().unwrap(), None);
    }

    #[test]
    fn test_ask_loops_until_valid() {
        let mut term = scripted("abc\n7\n");
        let n = term
            .ask("Pick a number", &Pipeline::new(IntConvertor::default()))
            .unwrap();
        assert_eq!(n, 7);

        let (_, output) = term.into_parts();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "Pick a number: \"abc\" cannot be converted to an integer number\nPick a number: "
        );
    }

    #[test]
    fn test_ask_reports_end_of_input() {
        let mut term = scripted("");
        let err = term
            .ask("Name", &Pipeline::new(StrConvertor::default()))
            .unwrap_err();
        assert!(matches!(err, InputError::Eof));
    }
}
