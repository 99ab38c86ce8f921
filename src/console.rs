//! The interactive rater.
//!
//! Presents both items and accepts one of a small fixed set of answers.
//! Anything else — including EOF or a failed read — degrades to
//! [`Verdict::Equal`] rather than an error, so an oracle call never fails;
//! it only stalls for as long as the human takes to answer.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use tracing::warn;

use crate::item::Item;
use crate::oracle::{Oracle, Verdict};

/// Line-oriented prompting over arbitrary input/output streams.
///
/// Generic so tests can drive it with an [`io::Cursor`] and capture output
/// in a `Vec<u8>`; the binary uses [`Console::stdio`].
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and return the next input line, trimmed.
    ///
    /// Returns the empty string on EOF or a failed read.
    pub fn prompt(&mut self, message: &str) -> String {
        if let Err(err) = write!(self.output, "{message}").and_then(|()| self.output.flush()) {
            warn!(error = %err, "failed to write prompt");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(_) => line.trim().to_string(),
            Err(err) => {
                warn!(error = %err, "failed to read answer");
                String::new()
            }
        }
    }
}

impl<R: BufRead, W: Write> Oracle for Console<R, W> {
    fn compare(&mut self, a: &Item, b: &Item) -> Verdict {
        if let Err(err) =
            writeln!(self.output, "a: {a}").and_then(|()| writeln!(self.output, "b: {b}"))
        {
            warn!(error = %err, "failed to present pair");
        }
        let answer = self.prompt("More important? a/b/(e)qual: ");
        if answer.eq_ignore_ascii_case("a") {
            Verdict::Less
        } else if answer.eq_ignore_ascii_case("b") {
            Verdict::Greater
        } else {
            if !answer.is_empty()
                && !answer.eq_ignore_ascii_case("e")
                && !answer.eq_ignore_ascii_case("equal")
            {
                warn!(%answer, "unrecognized verdict; treating as equal");
            }
            Verdict::Equal
        }
    }
}
