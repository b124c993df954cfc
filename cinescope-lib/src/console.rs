//! Line-oriented operator I/O.

use std::io::{self, BufRead, Write};

use owo_colors::{OwoColorize, Stream::Stdout};

/// Prompts and output over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` without a newline and read one line back, trimmed.
    ///
    /// Closed input is reported as [`io::ErrorKind::UnexpectedEof`].
    pub fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question. Only `y` (any case) counts as yes.
    pub fn confirm(&mut self, text: &str) -> io::Result<bool> {
        Ok(self.prompt(text)?.eq_ignore_ascii_case("y"))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", text.if_supports_color(Stdout, |t| t.bold()))
    }

    /// An operator-facing failure line.
    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text.if_supports_color(Stdout, |t| t.red()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Whether an I/O error means the operator closed the input.
pub fn is_end_of_input(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::UnexpectedEof
}
