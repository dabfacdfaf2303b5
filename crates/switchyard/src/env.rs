//! Environment-variable abstraction for testability, modeled on the
//! teacher's `standout-input::env::EnvReader`/`MockEnv` split: dispatcher
//! code never calls `std::env::var` directly, so tests substitute a fake
//! environment instead of poking process-global state.

use std::collections::HashMap;

/// Abstraction over environment variable reads.
pub trait Env: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl Env for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed environment for tests.
#[derive(Debug, Default, Clone)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Env for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Env vars the dispatcher reads, named so call sites don't repeat string
/// literals (§6).
pub const COMMAND_CLI_CACHE: &str = "COMMAND_CLI_CACHE";
pub const LEEP_FROG_CLI_OS_OVERRIDE: &str = "LEEP_FROG_CLI_OS_OVERRIDE";
pub const LEEP_FROG_DEBUG: &str = "LEEP_FROG_DEBUG";
pub const IGNORE_NOSORT: &str = "IGNORE_NOSORT";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_env_returns_declared_vars_only() {
        let env = MockEnv::new().with_var("FOO", "bar");
        assert_eq!(env.var("FOO"), Some("bar".to_string()));
        assert_eq!(env.var("MISSING"), None);
    }
}
