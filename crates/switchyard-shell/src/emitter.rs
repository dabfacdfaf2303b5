//! The shell-emitter contract: generates host-shell source text for the
//! sourcerer dispatcher's `source` branch, without ever running anything
//! itself. Two concrete families exist ([`crate::bash::BashEmitter`],
//! [`crate::powershell::PowerShellEmitter`]).

/// A CLI the `source` output should wire an alias for.
#[derive(Debug, Clone)]
pub struct CliSpec {
    pub name: String,
    /// Shell snippet run once before the alias is registered, if any.
    pub setup: Option<String>,
}

impl CliSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
        }
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }
}

/// A declared alias that forwards to `cli` with a fixed suffix of values.
#[derive(Debug, Clone)]
pub struct Aliaser {
    pub alias: String,
    pub cli: String,
    pub values: Vec<String>,
}

impl Aliaser {
    pub fn new(alias: impl Into<String>, cli: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            alias: alias.into(),
            cli: cli.into(),
            values,
        }
    }
}

/// Generates host-shell source text. Every method returns shell source,
/// never executes it; that is left to the calling shell when the caller
/// sources (or `eval`s) the returned text.
pub trait ShellEmitter: Send + Sync {
    /// Wires one alias per CLI, each pointing to a trampoline that creates
    /// a temp file, runs `goExecutable [builtin] execute cliName tempFile
    /// args...`, evaluates the temp file, then deletes it (unless a debug
    /// env var is set).
    fn register_clis(&self, builtin: bool, go_executable: &str, target: &str, clis: &[CliSpec]) -> String;

    /// Defines the per-CLI completion functions `register_clis`'s
    /// `complete -F`/`Register-ArgumentCompleter` registrations point at:
    /// one function per CLI that calls `goExecutable [builtin]
    /// autocomplete cliName COMP_TYPE COMP_POINT COMP_LINE` and evaluates
    /// the result through [`ShellEmitter::handle_autocomplete_success`].
    /// Emitted once, before the per-CLI loop, so those registrations
    /// resolve.
    fn autocomplete_hook(&self, builtin: bool, go_executable: &str, clis: &[CliSpec]) -> String;

    /// Defines the generic `_switchyard_aliaser_complete` helper every
    /// [`ShellEmitter::register_aliaser`] completion hook calls: it looks
    /// up which CLI the invoking alias forwards to and delegates
    /// completion to that CLI's own autocomplete phase.
    fn aliaser_helper(&self, go_executable: &str) -> String;

    /// Defines an alias forwarding to a CLI with a fixed value suffix,
    /// plus a completion hook invoking the aliaser-autocomplete helper.
    fn register_aliaser(&self, go_executable: &str, aliaser: &Aliaser) -> String;

    /// Shell text that, when sourced, fails with an explanatory message if
    /// the aliased CLI isn't itself a sourcerer-generated alias.
    fn verify_aliaser(&self, aliaser: &Aliaser) -> String;

    /// `cd`s to `dir`, runs `go run . source target`, captures stdout to a
    /// temp file, and evaluates it.
    fn sourcerer_go_cli(&self, dir: &str, target: &str) -> String;

    fn handle_autocomplete_success(&self, candidates: &[String], suppress_space_on_single: bool) -> String;

    fn handle_autocomplete_error(&self, message: &str) -> String;

    /// Wraps `body` in a named function definition followed by a call to it.
    fn function_wrap(&self, name: &str, body: &str) -> String;

    fn set_env_var(&self, name: &str, value: &str) -> String;

    fn unset_env_var(&self, name: &str) -> String;
}
