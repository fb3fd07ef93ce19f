//! Interactive confirmation.
//!
//! The duplicate pass asks before deleting anything. The question is asked
//! through the [`Prompt`] trait so the console can be swapped for a scripted
//! source in tests.

use crate::output::OutputFormatter;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// A recognized answer to the delete-duplicates question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    /// Delete every queued duplicate.
    Yes,
    /// Delete nothing.
    No,
    /// List the queued duplicates and ask again.
    Show,
}

/// An answer that is not `yes`, `no` or `show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidResponse(pub String);

impl fmt::Display for InvalidResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized response '{}'", self.0)
    }
}

impl std::error::Error for InvalidResponse {}

impl FromStr for PromptResponse {
    type Err = InvalidResponse;

    /// Parses an answer, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "show" => Ok(Self::Show),
            _ => Err(InvalidResponse(s.trim().to_string())),
        }
    }
}

/// A source of answers for interactive questions.
pub trait Prompt {
    /// Asks `question` and returns the raw answer.
    ///
    /// Implementations return an error when no answer can be obtained, e.g.
    /// when input is closed.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Shows an informational line to whoever is answering.
    fn show(&mut self, line: &str);
}

/// Reads answers from standard input.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        print!("{}", question);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a response was given",
            ));
        }
        Ok(input)
    }

    fn show(&mut self, line: &str) {
        OutputFormatter::plain(line);
    }
}

/// Answers questions from a fixed list, recording everything it is asked
/// and shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    responses: VecDeque<String>,
    /// Questions asked so far.
    pub questions: Vec<String>,
    /// Lines shown so far.
    pub shown: Vec<String>,
}

impl ScriptedPrompt {
    /// Creates a prompt that answers with `responses` in order.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
            shown: Vec::new(),
        }
    }

    /// Number of responses not yet used.
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.responses.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted responses left")
        })
    }

    fn show(&mut self, line: &str) {
        self.shown.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_responses() {
        assert_eq!("yes".parse::<PromptResponse>(), Ok(PromptResponse::Yes));
        assert_eq!("no".parse::<PromptResponse>(), Ok(PromptResponse::No));
        assert_eq!("show".parse::<PromptResponse>(), Ok(PromptResponse::Show));
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!("  YES\n".parse::<PromptResponse>(), Ok(PromptResponse::Yes));
        assert_eq!("No\r\n".parse::<PromptResponse>(), Ok(PromptResponse::No));
        assert_eq!("\tShOw ".parse::<PromptResponse>(), Ok(PromptResponse::Show));
    }

    #[test]
    fn test_parse_rejects_other_input() {
        for input in ["y", "n", "", "yes please", "delete"] {
            assert!(
                input.parse::<PromptResponse>().is_err(),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_scripted_prompt_answers_in_order() {
        let mut prompt = ScriptedPrompt::new(["show", "yes"]);

        assert_eq!(prompt.ask("first?").expect("answer"), "show");
        assert_eq!(prompt.ask("second?").expect("answer"), "yes");
        assert_eq!(prompt.questions, vec!["first?", "second?"]);
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn test_scripted_prompt_runs_out() {
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());

        let err = prompt.ask("anything?").expect_err("should be exhausted");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
