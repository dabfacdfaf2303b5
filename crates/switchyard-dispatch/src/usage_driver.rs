//! Drives a single graph node through Usage. The walk is input-independent:
//! it never touches a [`TokenStream`], only the graph shape itself.

use switchyard_core::{NodeRef, UsageSink};

pub fn run_usage(root: &NodeRef, sink: &mut dyn UsageSink) {
    root.usage(sink);
}
