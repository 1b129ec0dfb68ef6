//! Question-and-answer I/O for the wizard

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{WizardError, WizardResult};

/// Where the wizard asks questions and prints feedback
pub trait Prompter {
    /// Print a line of output
    fn say(&mut self, text: &str) -> WizardResult<()>;

    /// Ask a question; `None` means input is exhausted
    fn ask(&mut self, prompt: &str) -> WizardResult<Option<String>>;
}

/// Prompter reading stdin and writing stdout
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn say(&mut self, text: &str) -> WizardResult<()> {
        println!("{}", text);
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> WizardResult<Option<String>> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| WizardError::Io(e.to_string()))?;

        let mut input = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| WizardError::Io(e.to_string()))?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

/// Prompter replaying canned answers, recording everything printed
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Everything said or asked, in order
    pub transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Whether every canned answer was consumed
    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    /// Whether any transcript line contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, text: &str) -> WizardResult<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> WizardResult<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_replays_answers() {
        let mut prompter = ScriptedPrompter::new(["Yes", "No"]);
        assert_eq!(prompter.ask("First? ").unwrap().as_deref(), Some("Yes"));
        assert_eq!(prompter.ask("Second? ").unwrap().as_deref(), Some("No"));
        assert_eq!(prompter.ask("Third? ").unwrap(), None);
        assert!(prompter.is_exhausted());
        assert!(prompter.saw("Second?"));
    }
}
