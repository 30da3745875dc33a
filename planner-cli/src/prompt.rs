//! Confirmations and prompts on a terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use planner_core::Decisions;

/// Reads answers from `input` and writes questions and notices to `output`.
/// Prompt answers given on the command line are queued up front and used
/// before anything is read.
pub struct TerminalDecisions<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
    preset: VecDeque<String>,
}

impl TerminalDecisions<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalDecisions<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
            preset: VecDeque::new(),
        }
    }

    /// Queue an answer for the next prompt.
    pub fn with_answer(mut self, answer: Option<String>) -> Self {
        if let Some(answer) = answer {
            self.preset.push_back(answer);
        }
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("[planner.cli.prompt] Failed to read answer: {}", e);
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = write!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            log::warn!("[planner.cli.prompt] Failed to write prompt: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> Decisions for TerminalDecisions<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.say(&format!("{} [y/N] ", message));
        self.read_line()
            .is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn prompt(&mut self, message: &str, initial: Option<&str>) -> Option<String> {
        if let Some(answer) = self.preset.pop_front() {
            return Some(answer);
        }
        match initial {
            Some(current) => self.say(&format!("{} [{}] ", message, current)),
            None => self.say(&format!("{} ", message)),
        }
        let answer = self.read_line()?;
        match (answer.is_empty(), initial) {
            (true, Some(current)) => Some(current.to_string()),
            _ => Some(answer),
        }
    }

    fn notify(&mut self, message: &str) {
        self.say(&format!("{}\n", message));
    }
}
