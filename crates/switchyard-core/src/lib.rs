//! Token stream, data store, output sink, and processor protocol shared by
//! every other `switchyard` crate.
//!
//! This crate is the hard-part foundation: a stateful token stream with
//! snapshots, push-back, and user-defined breakers ([`stream`]); a typed
//! accumulator for argument values ([`data`]); a buffered output sink with
//! an injectable color collaborator ([`sink`]); and the uniform
//! Execute/Complete/Usage contract every graph node implements
//! ([`processor`]).

mod completion;
mod data;
mod error;
mod execute_data;
mod processor;
mod quoting;
mod sink;
mod stream;
mod token;

pub use completion::Completion;
pub use data::{Data, HostOs, Value};
pub use error::{CoreError, CoreResult};
pub use execute_data::ExecuteData;
pub use processor::{CompleteCtx, ExecCtx, NodeRef, Processor, UsageSink};
pub use quoting::tokenize;
pub use sink::{Annotated, ColorCapability, NoColor, OutputSink, Style};
pub use stream::TokenStream;
pub use token::{breaker_from_fn, breaker_on_prefix, BoxedBreaker, BreakSignal, Breaker, Token};
