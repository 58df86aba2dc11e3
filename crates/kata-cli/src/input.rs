//! Line-oriented console input with re-prompt on rejected lines.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use kata_core::{KataError, KataResult};
use tracing::debug;

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    prompt: String,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// `max_attempts == 0` re-prompts until a line is accepted or input ends.
    pub fn new(reader: R, writer: W, prompt: impl Into<String>, max_attempts: usize) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
            max_attempts,
        }
    }

    /// Prompts with `label` until `accept` takes a line. Returns `Ok(None)`
    /// once input is exhausted.
    pub fn read_with<T, F>(&mut self, label: &str, accept: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> KataResult<T>,
    {
        let mut attempts = 0;
        loop {
            write!(self.writer, "{label}{}", self.prompt)?;
            self.writer.flush()?;

            let mut buf = Vec::new();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            let verdict = match String::from_utf8(buf) {
                Ok(line) => accept(line.trim_end_matches(['\r', '\n'])),
                Err(_) => Err(KataError::Parse("input is not valid UTF-8".into())),
            };

            match verdict {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    attempts += 1;
                    debug!(attempts, "rejected input line: {e}");
                    match e {
                        KataError::Parse(reason) => {
                            writeln!(self.writer, "Invalid syntax: {reason}")?
                        }
                        other => writeln!(self.writer, "{other}")?,
                    }
                    if self.max_attempts != 0 && attempts >= self.max_attempts {
                        bail!("giving up after {attempts} invalid inputs");
                    }
                }
            }
        }
    }

    #[cfg(test)]
    fn into_writer(self) -> W {
        self.writer
    }
}
