//! Drives a single graph node through Execute, then checks the stream was
//! fully consumed.

use switchyard_core::{CoreError, CoreResult, Data, ExecCtx, ExecuteData, NodeRef, OutputSink, TokenStream};

/// The fixed marker the execute driver appends to stderr after a
/// usage-class error, above which the usage renderer's text is expected.
pub const USAGE_MARKER: &str = "\n======= Command Usage =======";

/// Runs `root` over `stream`, returning the populated sink/data/exec-data
/// on success. On a usage-class error, the caller is expected to render
/// usage text and append it after [`USAGE_MARKER`]; this driver itself
/// never touches rendering.
pub fn run_execute(
    root: &NodeRef,
    stream: &mut TokenStream,
    data: &mut Data,
    sink: &mut OutputSink,
    exec_data: &mut ExecuteData,
) -> CoreResult<()> {
    let mut ctx = ExecCtx {
        stream,
        data,
        sink,
        exec_data,
    };
    root.execute(&mut ctx)?;

    if !ctx.stream.fully_processed() {
        return Err(CoreError::ExtraArgs(ctx.stream.remaining()));
    }
    Ok(())
}
