//! In-process harness for driving a [`switchyard_core::Processor`] graph
//! through Execute, Complete, and Usage without a real shell or a real
//! `sourcerer` binary.
//!
//! This mirrors the glue the top-level `switchyard` crate's dispatcher
//! applies around the bare traversal drivers in `switchyard-dispatch`
//! (appending usage text on a usage-class error, truncating a completion
//! line to its cursor point) so that whole-graph tests exercise the same
//! behavior a real invocation would see.

use switchyard_core::{
    quoting, CoreError, CoreResult, Data, ExecuteData, NodeRef, OutputSink, TokenStream,
};
use switchyard_dispatch::{run_complete, run_execute, run_usage, USAGE_MARKER};
use switchyard_render::{render_usage, UsageAccumulator};

/// What a single Execute traversal produced.
pub struct ExecuteOutcome {
    pub result: CoreResult<()>,
    pub sink: OutputSink,
    pub data: Data,
    pub exec_data: ExecuteData,
    pub stream: TokenStream,
}

impl ExecuteOutcome {
    pub fn stderr_text(&self) -> String {
        self.sink
            .lines()
            .iter()
            .filter_map(|l| match l {
                switchyard_core::Annotated::Stderr(s) => Some(s.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stdout_text(&self) -> String {
        self.sink
            .lines()
            .iter()
            .filter_map(|l| match l {
                switchyard_core::Annotated::Stdout(s) => Some(s.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs `root` over `args` to completion (or failure), appending the
/// rendered usage text to stderr after [`USAGE_MARKER`] on any
/// usage-class error — the same policy the execute driver documents but
/// leaves to its caller.
pub fn drive_execute(root: &NodeRef, cli_name: &str, args: &[&str]) -> ExecuteOutcome {
    let mut stream = TokenStream::new(args.to_vec());
    let mut data = Data::new();
    let mut sink = OutputSink::default();
    let mut exec_data = ExecuteData::new();

    let result = run_execute(root, &mut stream, &mut data, &mut sink, &mut exec_data);

    if let Err(err) = &result {
        sink.stderr_line(err.to_string());
        if err.is_usage_class() {
            sink.stderr_line(USAGE_MARKER);
            sink.stderr_line(drive_usage(root, cli_name));
        }
    }

    ExecuteOutcome {
        result,
        sink,
        data,
        exec_data,
        stream,
    }
}

/// Renders the full usage text for `root` under `cli_name`, with no
/// Symbols entries (the harness doesn't model domain-specific glyphs).
pub fn drive_usage(root: &NodeRef, cli_name: &str) -> String {
    let mut acc = UsageAccumulator::new();
    run_usage(root, &mut acc);
    let (tree, arguments, flags) = acc.finish();
    render_usage(cli_name, &tree, &arguments, &flags, &[])
}

/// Tokenizes `line`, truncates to `comp_point` characters (right-padding
/// with spaces if `comp_point` exceeds the line's length, matching the
/// sourcerer dispatcher's own COMP_POINT handling), drops the invoking
/// program/alias token the way the dispatcher does before it ever builds a
/// completing index, and runs `root` in completion mode with the last
/// remaining token as the one under the cursor.
pub fn drive_complete(
    root: &NodeRef,
    line: &str,
    comp_point: usize,
) -> CoreResult<Option<switchyard_core::Completion>> {
    let adjusted = adjust_to_comp_point(line, comp_point);
    let mut stream = quoting::tokenize(&adjusted);
    let mut data = Data::new();
    let _ = stream.pop(&data);
    let completing_index = stream.num_remaining().saturating_sub(1);
    run_complete(root, &mut stream, &mut data, completing_index)
}

/// Truncates `line` to `comp_point` characters, or right-pads with spaces
/// if `comp_point` exceeds the line's length (the Windows quirk §4.J
/// calls out by name).
pub fn adjust_to_comp_point(line: &str, comp_point: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if comp_point <= chars.len() {
        chars[..comp_point].iter().collect()
    } else {
        let mut s = line.to_string();
        s.extend(std::iter::repeat(' ').take(comp_point - chars.len()));
        s
    }
}
