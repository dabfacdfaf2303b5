//! Branch and serial composers, plus the three traversal drivers that walk
//! a graph of [`switchyard_core::Processor`] nodes: Execute, Complete, and
//! Usage.
//!
//! Composers are not a parallel class hierarchy: a [`Branch`] or [`Serial`]
//! is itself a `Processor`, so graphs nest arbitrarily without the drivers
//! needing to know the shape underneath any given node. Dispatch stays
//! agnostic to rendering, the same separation the usage renderer and shell
//! emitters are kept behind their own crates for.

mod branch;
mod complete_driver;
mod execute_driver;
mod serial;
mod usage_driver;

pub use branch::Branch;
pub use complete_driver::run_complete;
pub use execute_driver::{run_execute, USAGE_MARKER};
pub use serial::Serial;
pub use usage_driver::run_usage;
