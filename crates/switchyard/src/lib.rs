//! The sourcerer dispatcher (§4.J): a single binary, built on top of
//! `switchyard-core`/`switchyard-args`/`switchyard-dispatch`/
//! `switchyard-render`/`switchyard-shell`, that exposes `execute`,
//! `autocomplete`, `usage`, `source`, and `listCLIs` over a registry of
//! user-declared [`Cli`] implementations.
//!
//! This crate is the thinnest of the workspace: it owns no processor
//! graph of its own. It wires together the collaborators the rest of the
//! workspace leaves abstract — a [`Cache`] for persisted CLI state, an
//! [`Env`] for the environment variables §6 names, and the
//! [`os_capability`] logic that picks a [`switchyard_shell::ShellEmitter`]
//! for the current host — behind the [`Sourcerer`] dispatcher type.

pub mod cache;
pub mod cli;
pub mod dispatcher;
pub mod env;
pub mod error;
pub mod os_capability;

pub use cache::{Cache, FileCache};
pub use cli::{Cli, CliRegistry};
pub use dispatcher::{DispatchOutcome, Sourcerer};
pub use env::{Env, MockEnv, RealEnv};
pub use error::{SourcererError, SourcererResult};
pub use os_capability::{emitter_for, resolve_host_os};
