use std::path::{Path, PathBuf};

use gpuproxy_setup::config::{ProjectPaths, Settings};
use gpuproxy_setup::context::Context;
use gpuproxy_setup::fs::mock::MockFileSystem;
use gpuproxy_setup::signal::Interrupts;
use gpuproxy_setup::types::{Readiness, TargetKind};

use crate::fake_runner::FakeRunner;
use crate::scripted_ui::{RecordingReporter, ScriptedPrompter};

/// Template used by most environment tests.
pub const TEMPLATE: &str = "\
# aiserve-gpuproxyd
SERVER_PORT=8080

# Auth
JWT_SECRET=changeme-generate-a-secure-random-string

DB_TYPE=postgres
DB_HOST=localhost
";

/// A `Context` wired to fakes, plus handles to inspect them afterwards.
pub struct TestHarness {
    pub ctx: Context,
    pub runner: FakeRunner,
    pub fs: MockFileSystem,
    pub reporter: RecordingReporter,
    pub prompter: ScriptedPrompter,
    pub interrupts: Interrupts,
}

impl TestHarness {
    pub fn env_contents(&self) -> Option<String> {
        self.fs.contents(&self.ctx.paths.env_file)
    }
}

/// Builder for `TestHarness` to simplify test setup.
pub struct ContextBuilder {
    root: PathBuf,
    settings: Settings,
    runner: FakeRunner,
    fs: MockFileSystem,
    answers: Vec<String>,
    wait_for_answer: bool,
    binaries: Vec<TargetKind>,
}

impl ContextBuilder {
    /// Project at `/proj`, default settings, no post-start delay.
    pub fn new() -> Self {
        let mut settings = Settings::default();
        settings.database.readiness = Readiness::FixedDelay { seconds: 0 };
        Self {
            root: PathBuf::from("/proj"),
            settings,
            runner: FakeRunner::new(),
            fs: MockFileSystem::new(),
            answers: Vec::new(),
            wait_for_answer: false,
            binaries: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_runner(mut self, runner: FakeRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.extend(answers.into_iter().map(Into::into));
        self
    }

    /// Once the scripted answers run out, the next prompt waits forever.
    pub fn with_unanswered_prompt(mut self) -> Self {
        self.wait_for_answer = true;
        self
    }

    /// File relative to the project root.
    pub fn with_file(self, rel: impl AsRef<Path>, content: &str) -> Self {
        self.fs.add_file(self.root.join(rel), content);
        self
    }

    pub fn with_template(self, content: &str) -> Self {
        let rel = self.settings.project.env_template.clone();
        self.with_file(rel, content)
    }

    pub fn with_env(self, content: &str) -> Self {
        let rel = self.settings.project.env_file.clone();
        self.with_file(rel, content)
    }

    pub fn with_binary(mut self, kind: TargetKind) -> Self {
        self.binaries.push(kind);
        self
    }

    pub fn with_all_binaries(mut self) -> Self {
        self.binaries.extend(TargetKind::ALL);
        self
    }

    pub fn build(self) -> TestHarness {
        let paths = ProjectPaths::resolve(&self.root, &self.settings);
        self.fs.add_dir(&paths.root);
        for kind in &self.binaries {
            self.fs.add_file(paths.binary(&self.settings, *kind), "binary");
        }

        let reporter = RecordingReporter::new();
        let mut prompter = ScriptedPrompter::new(self.answers);
        if self.wait_for_answer {
            prompter = prompter.waiting_when_exhausted();
        }
        let interrupts = Interrupts::new();

        let ctx = Context {
            paths,
            settings: self.settings,
            runner: Box::new(self.runner.clone()),
            fs: Box::new(self.fs.clone()),
            reporter: Box::new(reporter.clone()),
            prompter: Box::new(prompter.clone()),
            interrupts: interrupts.clone(),
        };

        TestHarness {
            ctx,
            runner: self.runner,
            fs: self.fs,
            reporter,
            prompter,
            interrupts,
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
