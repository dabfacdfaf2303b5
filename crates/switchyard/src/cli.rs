//! The user-facing CLI contract (§6) and the registry the dispatcher
//! selects from.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use switchyard_core::NodeRef;

use crate::error::{SourcererError, SourcererResult};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// A registered CLI: its root processor graph, whether it wants a cache
/// save after this invocation, and an optional setup script.
///
/// Persisted CLI state (the blob the dispatcher loads before dispatch and
/// saves after, when [`Cli::changed`] is true) is the CLI's own concern:
/// implementations that carry state serialize/deserialize themselves
/// through [`Cli::state_blob`]/[`Cli::load_state_blob`], typically backed
/// by a `Mutex`/`RefCell` field since a registered CLI is shared behind
/// `Arc` across the dispatcher's single traversal. CLIs with no persisted
/// state simply accept the default no-op implementations.
pub trait Cli: Send + Sync {
    /// Matches `^[a-zA-Z0-9_-]+$` so it round-trips as a shell alias.
    fn name(&self) -> &str;

    /// The root of this CLI's processor graph.
    fn node(&self) -> NodeRef;

    /// Whether the dispatcher should save this CLI's state back to the
    /// cache after an `execute` traversal.
    fn changed(&self) -> bool {
        false
    }

    /// Shell lines to run once before the CLI's trampoline invokes it; if
    /// non-empty, the execute driver prepends a mandatory setup-file
    /// positional argument (§4.G "Setup arg").
    fn setup(&self) -> &[String] {
        &[]
    }

    /// Serializes this CLI's persisted state for the cache. Default: no
    /// state.
    fn state_blob(&self) -> SourcererResult<String> {
        Ok(String::new())
    }

    /// Restores persisted state from a cache blob. Default: no-op
    /// (absence from the cache is not an error per §6, so an empty blob
    /// is a valid "nothing to restore" case too).
    fn load_state_blob(&self, _blob: &str) -> SourcererResult<()> {
        Ok(())
    }
}

/// The set of CLIs a `sourcerer` binary dispatches over, keyed by name and
/// kept in a `BTreeMap` so `listCLIs` and `source` both get a stable,
/// alphabetical ordering for free.
#[derive(Default)]
pub struct CliRegistry {
    clis: BTreeMap<String, Arc<dyn Cli>>,
}

impl CliRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a CLI, rejecting a name that wouldn't round-trip as a
    /// shell alias.
    pub fn register(&mut self, cli: Arc<dyn Cli>) -> SourcererResult<()> {
        let name = cli.name().to_string();
        if !NAME_PATTERN.is_match(&name) {
            return Err(SourcererError::UnknownCli(name));
        }
        self.clis.insert(name, cli);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Cli>> {
        self.clis.get(name).cloned()
    }

    /// Names in alphabetical order, the ordering both `listCLIs` and the
    /// `source` branch's CLI loop rely on.
    pub fn names(&self) -> Vec<String> {
        self.clis.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clis.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Cli>)> {
        self.clis.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchyard_args::{ArgKind, Argument};

    struct Stub(&'static str);
    impl Cli for Stub {
        fn name(&self) -> &str {
            self.0
        }
        fn node(&self) -> NodeRef {
            Arc::new(Argument::new("X", ArgKind::Str))
        }
    }

    #[test]
    fn names_are_alphabetical_regardless_of_registration_order() {
        let mut reg = CliRegistry::new();
        reg.register(Arc::new(Stub("zebra"))).unwrap();
        reg.register(Arc::new(Stub("apple"))).unwrap();
        assert_eq!(reg.names(), vec!["apple".to_string(), "zebra".to_string()]);
    }

    #[test]
    fn rejects_names_with_invalid_characters() {
        let mut reg = CliRegistry::new();
        let err = reg.register(Arc::new(Stub("bad name!"))).unwrap_err();
        assert!(matches!(err, SourcererError::UnknownCli(_)));
    }

    #[test]
    fn lookup_by_name_finds_registered_cli() {
        let mut reg = CliRegistry::new();
        reg.register(Arc::new(Stub("widget"))).unwrap();
        assert!(reg.get("widget").is_some());
        assert!(reg.get("missing").is_none());
    }
}
