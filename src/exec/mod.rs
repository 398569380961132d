// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] holds the value types: what to run ([`CommandSpec`]) and
//!   what came back ([`CommandResult`]).
//! - [`backend`] provides the [`CommandRunner`] trait that every step talks
//!   to, plus [`execute`], which applies "check" semantics on top of any
//!   runner.
//! - [`process`] is the production runner built on `tokio::process`.
//!
//! Tests swap in a fake runner that records invocations instead of spawning
//! processes.

pub mod backend;
pub mod command;
pub mod process;

pub use backend::{execute, CommandRunner};
pub use command::{CommandResult, CommandSpec};
pub use process::ProcessRunner;
