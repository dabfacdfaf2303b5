//! Completer functions: prefix string + accumulated data -> candidate set.

use std::sync::Arc;

use switchyard_core::{Completion, Data};

/// A completer maps the in-progress prefix and the data gathered so far to
/// a [`Completion`]. Completers must not block (per the concurrency
/// model: completion routines must never block).
#[derive(Clone)]
pub struct Completer {
    run: Arc<dyn Fn(&str, &Data) -> Completion + Send + Sync>,
}

impl Completer {
    pub fn new(run: impl Fn(&str, &Data) -> Completion + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(run) }
    }

    pub fn complete(&self, prefix: &str, data: &Data) -> Completion {
        (self.run)(prefix, data)
    }
}

impl std::fmt::Debug for Completer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completer").finish()
    }
}

/// A completer over a fixed, static candidate set.
pub fn from_values(values: impl IntoIterator<Item = impl Into<String>>) -> Completer {
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    Completer::new(move |prefix, _data| {
        Completion::new(values.clone()).filter_prefix(prefix)
    })
}
