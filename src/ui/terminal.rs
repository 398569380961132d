// src/ui/terminal.rs

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::pin::Pin;

use anyhow::{anyhow, Context};
use tokio::sync::oneshot;

use crate::errors::Result;
use crate::ui::{Prompter, Reporter};

const HEADER: &str = "\x1b[95m";
const OK_CYAN: &str = "\x1b[96m";
const OK_GREEN: &str = "\x1b[92m";
const WARNING: &str = "\x1b[93m";
const FAIL: &str = "\x1b[91m";
const BOLD: &str = "\x1b[1m";
const END: &str = "\x1b[0m";

const HEADER_WIDTH: usize = 60;

/// ANSI-coloured reporter writing to stdout.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn header(&self, title: &str) {
        let rule = "=".repeat(HEADER_WIDTH);
        println!();
        println!("{HEADER}{BOLD}{rule}{END}");
        println!("{HEADER}{BOLD}{title:^width$}{END}", width = HEADER_WIDTH);
        println!("{HEADER}{BOLD}{rule}{END}");
        println!();
    }

    fn success(&self, message: &str) {
        println!("{OK_GREEN}✓ {message}{END}");
    }

    fn error(&self, message: &str) {
        println!("{FAIL}✗ {message}{END}");
    }

    fn warning(&self, message: &str) {
        println!("{WARNING}⚠ {message}{END}");
    }

    fn info(&self, message: &str) {
        println!("{OK_CYAN}ℹ {message}{END}");
    }

    fn plain(&self, text: &str) {
        println!("{text}");
    }
}

/// Reads answers line by line from stdin.
///
/// The read happens on a detached thread and the answer comes back over a
/// channel, so the runtime keeps serving Ctrl+C while the operator types.
/// A thread left waiting after cancellation does not hold up process exit.
#[derive(Debug, Clone, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask<'a>(
        &'a self,
        question: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut stdout = io::stdout().lock();
                write!(stdout, "{question}").context("writing prompt")?;
                stdout.flush().context("flushing prompt")?;
            }

            let (tx, rx) = oneshot::channel();
            std::thread::Builder::new()
                .name("stdin-prompt".into())
                .spawn(move || {
                    let _ = tx.send(read_answer());
                })
                .context("spawning stdin reader")?;

            let line = rx
                .await
                .map_err(|_| anyhow!("stdin reader exited without an answer"))??;
            Ok(line.trim().to_string())
        })
    }
}

/// One line from stdin; EOF yields an empty string.
fn read_answer() -> anyhow::Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading answer from stdin")?;
    Ok(line)
}
