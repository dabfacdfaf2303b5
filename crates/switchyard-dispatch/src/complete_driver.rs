//! Drives a single graph node through Complete, isolating the token under
//! the cursor and returning whatever [`Completion`] a descendant produced.

use switchyard_core::{CompleteCtx, Completion, CoreResult, Data, NodeRef, TokenStream};

/// Runs `root` in completion mode against `stream`, with `completing_index`
/// naming which token (by position in the original line) is under the
/// cursor. `ExtraArgs`-shaped conditions past the completing token are not
/// fatal here: completion only cares whether a descendant produced a
/// result, so leftover tokens after it are simply ignored.
pub fn run_complete(
    root: &NodeRef,
    stream: &mut TokenStream,
    data: &mut Data,
    completing_index: usize,
) -> CoreResult<Option<Completion>> {
    let mut ctx = CompleteCtx {
        stream,
        data,
        completing_index,
        consumed_before: 0,
        result: None,
    };
    root.complete(&mut ctx)?;
    Ok(ctx.result)
}
