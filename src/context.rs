// src/context.rs

//! Everything a step needs, bundled once at startup.

use crate::config::{ProjectPaths, Settings};
use crate::exec::CommandRunner;
use crate::fs::FileSystem;
use crate::signal::Interrupts;
use crate::ui::{Prompter, Reporter};

pub struct Context {
    pub paths: ProjectPaths,
    pub settings: Settings,
    pub runner: Box<dyn CommandRunner>,
    pub fs: Box<dyn FileSystem>,
    pub reporter: Box<dyn Reporter>,
    pub prompter: Box<dyn Prompter>,
    pub interrupts: Interrupts,
}

impl Context {
    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }
}
