use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use gpuproxy_setup::errors::{Result, SetupError};
use gpuproxy_setup::ui::{Prompter, Reporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Header,
    Success,
    Error,
    Warning,
    Info,
    Plain,
}

/// Reporter that keeps every message for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    messages: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// True if some message at `level` contains `needle`.
    pub fn has(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|m| m.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn header(&self, title: &str) {
        self.push(Level::Header, title);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn plain(&self, text: &str) {
        self.push(Level::Plain, text);
    }
}

/// Prompter that answers from a fixed script and records the questions.
///
/// Running out of answers is an error so unexpected prompts fail the test,
/// unless the prompter was built with [`ScriptedPrompter::waiting_when_exhausted`],
/// in which case the next question never gets an answer.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<String>>>,
    questions: Arc<Mutex<Vec<String>>>,
    wait_when_exhausted: bool,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            questions: Arc::default(),
            wait_when_exhausted: false,
        }
    }

    /// Behave like an operator who stops typing after the scripted answers.
    pub fn waiting_when_exhausted(mut self) -> Self {
        self.wait_when_exhausted = true;
        self
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask<'a>(
        &'a self,
        question: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        self.questions.lock().unwrap().push(question.to_string());
        let next = self.answers.lock().unwrap().pop_front();

        Box::pin(async move {
            match next {
                Some(answer) => Ok(answer.trim().to_string()),
                None if self.wait_when_exhausted => std::future::pending().await,
                None => Err(SetupError::Other(anyhow::anyhow!(
                    "no scripted answer for prompt {question:?}"
                ))),
            }
        })
    }
}
