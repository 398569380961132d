// src/ui/mod.rs

//! Operator-facing I/O seam.
//!
//! Steps never print or read the terminal directly: progress goes through a
//! [`Reporter`] and interactive answers come from a [`Prompter`]. The
//! terminal implementations live in [`terminal`]; tests use recording and
//! scripted versions.

pub mod terminal;

use std::future::Future;
use std::pin::Pin;

use crate::errors::{Result, SetupError};

pub use terminal::{StdinPrompter, TerminalReporter};

/// Sink for human-readable progress messages.
pub trait Reporter: Send + Sync {
    fn header(&self, title: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
    /// Unformatted text (usage, raw tool output, guidance blocks).
    fn plain(&self, text: &str);
}

/// Source of interactive answers.
///
/// Asking is async so that a pending answer never blocks the runtime; an
/// interrupt while waiting must still reach the dispatcher.
pub trait Prompter: Send + Sync {
    /// Ask `question` and return the raw answer with surrounding whitespace
    /// removed. End of input counts as an empty answer.
    fn ask<'a>(
        &'a self,
        question: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

/// `(y/N)` question: only `y` (any case) counts as yes.
pub async fn confirm(prompter: &dyn Prompter, question: &str) -> Result<bool> {
    let answer = prompter.ask(&format!("{question} (y/N): ")).await?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Ask with a bracketed default that replaces empty input.
pub async fn ask_or_default(
    prompter: &dyn Prompter,
    question: &str,
    default: &str,
) -> Result<String> {
    let answer = prompter.ask(&format!("{question} [{default}]: ")).await?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Ask for a value that must not be empty.
pub async fn ask_required(prompter: &dyn Prompter, question: &str, field: &str) -> Result<String> {
    let answer = prompter.ask(&format!("{question}: ")).await?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(SetupError::Validation(format!("{field} is required")));
    }
    Ok(answer.to_string())
}

/// Fixed answers for unit tests inside this crate.
#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::Prompter;
    use crate::errors::Result;

    /// Answers in order; once exhausted every question gets an empty answer.
    pub(crate) struct Answers(Mutex<VecDeque<&'static str>>);

    impl Prompter for Answers {
        fn ask<'a>(
            &'a self,
            _question: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
            let answer = self.0.lock().unwrap().pop_front().unwrap_or("").to_string();
            Box::pin(async move { Ok(answer) })
        }
    }

    pub(crate) fn answers(list: &[&'static str]) -> Answers {
        Answers(Mutex::new(list.iter().copied().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::answers;
    use super::*;

    #[tokio::test]
    async fn confirm_accepts_only_y() {
        let p = answers(&["y", " Y ", "yes", "", "n"]);
        let mut got = Vec::new();
        for _ in 0..5 {
            got.push(confirm(&p, "Overwrite?").await.unwrap());
        }
        assert_eq!(got, vec![true, true, false, false, false]);
    }

    #[tokio::test]
    async fn default_replaces_empty_answer() {
        let p = answers(&["", "db.internal"]);
        assert_eq!(ask_or_default(&p, "Database host", "localhost").await.unwrap(), "localhost");
        assert_eq!(ask_or_default(&p, "Database host", "localhost").await.unwrap(), "db.internal");
    }

    #[tokio::test]
    async fn required_rejects_blank() {
        let p = answers(&["   "]);
        let err = ask_required(&p, "Admin email", "Email").await.unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }
}
