//! Line-oriented Host UI over a reader/writer pair.
//!
//! A line of `:q` or end of input cancels a prompt. Text answers are taken
//! verbatim (minus the line ending), so a blank line submits the empty string.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use dynsym_core::{HostUi, Prompt};

pub const CANCEL: &str = ":q";

pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
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

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Read the next session command, trimmed.
    pub fn read_command(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    fn ask_text(
        &mut self,
        placeholder: Option<&str>,
        prefill: Option<&str>,
    ) -> io::Result<Prompt<String>> {
        write!(self.output, "{}", placeholder.unwrap_or("Value"))?;
        if let Some(prefill) = prefill {
            write!(self.output, " (currently {prefill:?})")?;
        }
        write!(self.output, " [{CANCEL} cancels]: ")?;
        self.output.flush()?;

        Ok(match self.read_line()? {
            Some(line) if line != CANCEL => Prompt::Submitted(line),
            _ => Prompt::Cancelled,
        })
    }

    fn ask_choice(
        &mut self,
        options: &[String],
        placeholder: Option<&str>,
    ) -> io::Result<Prompt<String>> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", i + 1)?;
        }

        loop {
            write!(
                self.output,
                "{} [number or text, {CANCEL} cancels]: ",
                placeholder.unwrap_or("Choice")
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Prompt::Cancelled);
            };
            let answer = line.trim();
            if answer == CANCEL {
                return Ok(Prompt::Cancelled);
            }
            if answer.is_empty() {
                return Ok(Prompt::Submitted(String::new()));
            }
            if let Some(option) = pick(options, answer) {
                return Ok(Prompt::Submitted(option.clone()));
            }
            writeln!(self.output, "Not an option: {answer}")?;
        }
    }
}

/// Resolve a 1-based number or an exact option text.
fn pick<'a>(options: &'a [String], answer: &str) -> Option<&'a String> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i));
    }
    options.iter().find(|option| *option == answer)
}

#[async_trait]
impl<R, W> HostUi for TerminalUi<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    async fn prompt_text(
        &mut self,
        placeholder: Option<&str>,
        prefill: Option<&str>,
    ) -> anyhow::Result<Prompt<String>> {
        Ok(self.ask_text(placeholder, prefill)?)
    }

    async fn prompt_choice(
        &mut self,
        options: &[String],
        placeholder: Option<&str>,
    ) -> anyhow::Result<Prompt<String>> {
        Ok(self.ask_choice(options, placeholder)?)
    }
}
