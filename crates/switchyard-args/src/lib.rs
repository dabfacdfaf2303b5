//! Typed positional and flag argument processors.
//!
//! Positional arguments ([`Argument`]) pop a bounded or unbounded run of
//! tokens, validate, transform, and store them. Flags ([`FlagDecl`],
//! [`WithFlags`]) scan the whole remaining window for `--long`/`-short`
//! tokens and strip them out before any positional matching happens, so
//! flags may appear anywhere without disturbing positional progress.

mod argument;
mod completer;
mod flag;
mod kind;
pub mod transformers;
pub mod validators;

pub use argument::Argument;
pub use completer::{from_values, Completer};
pub use flag::{scan_and_consume, usage_for, FlagDecl, WithFlags};
pub use kind::ArgKind;
pub use transformers::Transformer;
pub use validators::Validator;
