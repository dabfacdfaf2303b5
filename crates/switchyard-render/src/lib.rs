//! Renders a usage graph walk into top-down, box-drawing usage text.
//!
//! [`UsageAccumulator`] implements [`switchyard_core::UsageSink`] and is
//! what the usage traversal driver writes into; [`render_usage`] then lays
//! the resulting tree out as text. Kept as its own crate so neither
//! `switchyard-core` nor `switchyard-dispatch` need to know how usage text
//! is formatted, mirroring the teacher's split between dispatch
//! (format-agnostic) and rendering (owns styling).

mod usage_render;
mod usage_tree;

pub use usage_render::render_usage;
pub use usage_tree::{BranchDisplay, FlagDisplay, PositionalDisplay, UsageAccumulator, UsageTree};
