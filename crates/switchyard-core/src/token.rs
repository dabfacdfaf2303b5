//! A single input token and the breaker predicates that can stop a bounded
//! pop early.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::Data;

/// One input argument: a value plus the set of snapshot ids it was a
/// member of at the moment each snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) value: String,
    pub(crate) snapshots: BTreeSet<u64>,
}

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            snapshots: BTreeSet::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn in_snapshot(&self, id: u64) -> bool {
        self.snapshots.contains(&id)
    }
}

/// Whether a bounded pop should stop at the token the breaker was run
/// against, and whether that token should be consumed (discarded) as part
/// of stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakSignal {
    pub should_break: bool,
    pub discard: bool,
}

impl BreakSignal {
    pub const CONTINUE: BreakSignal = BreakSignal {
        should_break: false,
        discard: false,
    };

    pub fn stop(discard: bool) -> Self {
        Self {
            should_break: true,
            discard,
        }
    }
}

/// A predicate over a token and the traversal's [`Data`] that can stop an
/// in-progress bounded pop.
pub trait Breaker: Send + Sync {
    fn check(&self, token: &Token, data: &Data) -> BreakSignal;
}

/// A boxed breaker, cheaply cloned so the same breaker can sit in both the
/// stack and a per-call `extra` list.
pub type BoxedBreaker = Arc<dyn Breaker>;

struct FnBreaker<F>(F);

impl<F> Breaker for FnBreaker<F>
where
    F: Fn(&Token, &Data) -> BreakSignal + Send + Sync,
{
    fn check(&self, token: &Token, data: &Data) -> BreakSignal {
        (self.0)(token, data)
    }
}

/// Builds a breaker from a closure.
pub fn breaker_from_fn<F>(f: F) -> BoxedBreaker
where
    F: Fn(&Token, &Data) -> BreakSignal + Send + Sync + 'static,
{
    Arc::new(FnBreaker(f))
}

/// A breaker that stops (without discarding) at the first token beginning
/// with `prefix` — the common "stop before the next flag" shape.
pub fn breaker_on_prefix(prefix: impl Into<String>) -> BoxedBreaker {
    let prefix = prefix.into();
    breaker_from_fn(move |tok, _data| {
        if tok.value().starts_with(&prefix) {
            BreakSignal::stop(false)
        } else {
            BreakSignal::CONTINUE
        }
    })
}
