use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use gpuproxy_setup::errors::{Result, SetupError};
use gpuproxy_setup::exec::{CommandResult, CommandRunner, CommandSpec};
use gpuproxy_setup::types::Capture;

/// Scripted answer for a matching command.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// Behave like a program that cannot be found.
    LaunchError(String),
    /// Never complete (a long-running server, a hung probe).
    Pending,
}

impl FakeResponse {
    pub fn ok() -> Self {
        Self::exit(0)
    }

    pub fn exit(code: i32) -> Self {
        FakeResponse::Exit {
            code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn fail(stderr: &str) -> Self {
        FakeResponse::Exit {
            code: 1,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    pub fn stdout(mut self, text: &str) -> Self {
        if let FakeResponse::Exit { stdout, .. } = &mut self {
            *stdout = text.to_string();
        }
        self
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub capture: Capture,
}

impl Invocation {
    pub fn line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[derive(Debug, Default)]
struct State {
    /// `(needle, response, remaining uses)`; `None` uses means unlimited.
    rules: Vec<(String, FakeResponse, Option<usize>)>,
    calls: Vec<Invocation>,
}

/// A fake runner that:
/// - records every command it is asked to run
/// - answers from rules matched by substring of the command line
/// - answers success with empty output when no rule matches.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    state: Arc<Mutex<State>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command whose line contains `needle` gets `response`.
    /// Earlier rules win.
    pub fn on(&self, needle: &str, response: FakeResponse) -> &Self {
        self.state
            .lock()
            .unwrap()
            .rules
            .push((needle.to_string(), response, None));
        self
    }

    /// Like [`FakeRunner::on`], but only for the next `times` matches.
    pub fn on_times(&self, needle: &str, response: FakeResponse, times: usize) -> &Self {
        self.state
            .lock()
            .unwrap()
            .rules
            .push((needle.to_string(), response, Some(times)));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::line).collect()
    }

    /// How many recorded command lines contain `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }

    fn respond(&self, spec: &CommandSpec) -> FakeResponse {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Invocation {
            program: spec.program.clone(),
            args: spec.args.clone(),
            capture: spec.capture,
        });

        let line = spec.display_line();
        for (needle, response, remaining) in state.rules.iter_mut() {
            if !line.contains(needle.as_str()) {
                continue;
            }
            match remaining {
                Some(0) => continue,
                Some(n) => *n -= 1,
                None => {}
            }
            return response.clone();
        }
        FakeResponse::ok()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>> {
        let response = self.respond(spec);
        let capture = spec.capture;
        let line = spec.display_line();

        Box::pin(async move {
            match response {
                FakeResponse::Exit {
                    code,
                    stdout,
                    stderr,
                } => Ok(match capture {
                    Capture::Captured => CommandResult::captured(code, stdout, stderr),
                    Capture::Inherit => CommandResult::exited(code),
                }),
                FakeResponse::LaunchError(message) => Err(SetupError::external(line, message)),
                FakeResponse::Pending => std::future::pending().await,
            }
        })
    }
}
