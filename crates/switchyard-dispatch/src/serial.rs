//! Serial composition: a fixed chain of processors run in order.

use switchyard_core::{CompleteCtx, CoreResult, ExecCtx, NodeRef, Processor, UsageSink};

/// Runs its children in order for every traversal mode.
pub struct Serial {
    children: Vec<NodeRef>,
}

impl Serial {
    pub fn new() -> Self {
        Self { children: Vec::new() }
    }

    pub fn then(mut self, node: NodeRef) -> Self {
        self.children.push(node);
        self
    }
}

impl Default for Serial {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Serial {
    fn execute(&self, ctx: &mut ExecCtx) -> CoreResult<()> {
        for child in &self.children {
            child.execute(ctx)?;
        }
        Ok(())
    }

    fn complete(&self, ctx: &mut CompleteCtx) -> CoreResult<()> {
        for child in &self.children {
            child.complete(ctx)?;
            if ctx.result.is_some() {
                return Ok(());
            }
        }
        Ok(())
    }

    fn usage(&self, sink: &mut dyn UsageSink) {
        for child in &self.children {
            child.usage(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use switchyard_core::{Data, ExecuteData, OutputSink, TokenStream};

    struct Recorder(Arc<Mutex<Vec<&'static str>>>, &'static str);
    impl Processor for Recorder {
        fn execute(&self, _ctx: &mut ExecCtx) -> CoreResult<()> {
            self.0.lock().unwrap().push(self.1);
            Ok(())
        }
        fn complete(&self, _ctx: &mut CompleteCtx) -> CoreResult<()> {
            Ok(())
        }
        fn usage(&self, _sink: &mut dyn UsageSink) {}
    }

    #[test]
    fn runs_children_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let serial = Serial::new()
            .then(Arc::new(Recorder(log.clone(), "a")))
            .then(Arc::new(Recorder(log.clone(), "b")));
        let mut stream = TokenStream::new(Vec::<String>::new());
        let mut data = Data::new();
        let mut sink = OutputSink::default();
        let mut exec_data = ExecuteData::new();
        let mut ctx = ExecCtx {
            stream: &mut stream,
            data: &mut data,
            sink: &mut sink,
            exec_data: &mut exec_data,
        };
        serial.execute(&mut ctx).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }
}
