//! The uniform contract every graph node implements: Execute, Complete,
//! Usage, driven over the same declaration by three different drivers.
//!
//! Per the design notes, branch and serial composers are constructors
//! over this trait, not subclasses of it — a `Serial` or `Branch` is just
//! another `Processor` that happens to hold child processors.

use std::sync::Arc;

use crate::completion::Completion;
use crate::data::Data;
use crate::error::CoreResult;
use crate::execute_data::ExecuteData;
use crate::sink::OutputSink;
use crate::stream::TokenStream;

/// Context threaded through an Execute traversal.
pub struct ExecCtx<'a> {
    pub stream: &'a mut TokenStream,
    pub data: &'a mut Data,
    pub sink: &'a mut OutputSink,
    pub exec_data: &'a mut ExecuteData,
}

/// Context threaded through a Complete traversal.
///
/// `completing_index` is the index (within the original completion line's
/// tokens) of the token under the cursor; a leaf processor compares it
/// against its own position to decide whether it owns the completion.
pub struct CompleteCtx<'a> {
    pub stream: &'a mut TokenStream,
    pub data: &'a mut Data,
    pub completing_index: usize,
    pub consumed_before: usize,
    /// Set once a completer anywhere in the traversal produces a result,
    /// so ancestors that already returned know not to keep searching.
    pub result: Option<Completion>,
}

impl<'a> CompleteCtx<'a> {
    /// Whether the next token to be popped is the one under the cursor.
    pub fn at_completing_token(&self) -> bool {
        self.consumed_before == self.completing_index
    }
}

/// A node in the processor graph.
pub trait Processor: Send + Sync {
    /// Runs this node to completion (including any children), mutating
    /// the stream, data, sink, and execute-data side channel.
    fn execute(&self, ctx: &mut ExecCtx) -> CoreResult<()>;

    /// Runs the same traversal in completion mode. Returns early with
    /// `Ok(())` once `ctx.result` is set by a descendant; non-fatal
    /// `ExtraArgs`-shaped conditions past the completing token are
    /// swallowed by callers, not by individual nodes.
    fn complete(&self, ctx: &mut CompleteCtx) -> CoreResult<()>;

    /// Registers this node's display into the usage accumulator. Never
    /// mutates the stream or data; implementations recurse into children
    /// directly since the usage edge is input-independent.
    fn usage(&self, sink: &mut dyn UsageSink);
}

/// A shared, cheaply cloned handle to a graph node.
pub type NodeRef = Arc<dyn Processor>;

/// What the usage driver accumulates as it walks the (input-independent)
/// usage edge. Implemented by `switchyard-render`'s `UsageAccumulator`;
/// kept as a trait here so `switchyard-core` need not depend on rendering.
pub trait UsageSink {
    fn add_positional(&mut self, name: &str, required: usize, optional: Option<usize>);
    fn add_flag(&mut self, long: &str, short: Option<char>, description: &str);
    fn add_argument_description(&mut self, name: &str, description: &str);
    fn begin_branch(&mut self, labels: &[String]);
    fn begin_branch_child(&mut self, label: &str, is_last: bool);
    fn end_branch_child(&mut self);
    fn end_branch(&mut self);
}
