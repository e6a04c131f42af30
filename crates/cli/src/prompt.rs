//! Decision providers for the command line.

use pro_core::DecisionProvider;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Asks the person at the terminal.
///
/// Choices are shown numbered from 1 and asked again until a valid number is
/// given. Free-form questions take the line as typed. End of input, or an
/// output the prompt cannot be written to, answers with an empty string.
pub struct TerminalDecisions<R, W> {
    input: R,
    output: W,
    output_failed: bool,
}

impl TerminalDecisions<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalDecisions<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            output_failed: false,
        }
    }

    /// Write prompt text. Returns false once the output has failed; only the
    /// first failure is logged.
    fn show(&mut self, text: fmt::Arguments<'_>) -> bool {
        if self.output_failed {
            return false;
        }
        match self.output.write_fmt(text).and_then(|_| self.output.flush()) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to write prompt: {}", e);
                self.output_failed = true;
                false
            }
        }
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::error!("Failed to read answer: {}", e);
                None
            }
        }
    }

    fn choose(&mut self, prompt: &str, candidates: &[String]) -> String {
        loop {
            let mut shown = self.show(format_args!("{}\n", prompt));
            for (i, candidate) in candidates.iter().enumerate() {
                shown &= self.show(format_args!("    [{}]: {}\n", i + 1, candidate));
            }
            shown &= self.show(format_args!("> "));
            if !shown {
                return String::new();
            }

            let Some(answer) = self.read_answer() else {
                return String::new();
            };
            let chosen = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| candidates.get(i));

            match chosen {
                Some(candidate) => return candidate.clone(),
                None => {
                    self.show(format_args!("Invalid choice, try again\n"));
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> DecisionProvider for TerminalDecisions<R, W> {
    fn decide(&mut self, prompt: &str, candidates: &[String]) -> String {
        if !candidates.is_empty() {
            return self.choose(prompt, candidates);
        }
        if !self.show(format_args!("{} ", prompt)) {
            return String::new();
        }
        self.read_answer().unwrap_or_default()
    }
}

/// Non-interactive policy: the first candidate for choices, no answer for
/// free-form questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl DecisionProvider for AcceptDefaults {
    fn decide(&mut self, prompt: &str, candidates: &[String]) -> String {
        let answer = candidates.first().cloned().unwrap_or_default();
        log::debug!("{} -> {:?}", prompt.lines().next().unwrap_or(prompt), answer);
        answer
    }
}
