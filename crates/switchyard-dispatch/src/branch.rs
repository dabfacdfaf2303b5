//! Branch composition: pops one token, matches it against declared labels
//! (and their synonyms), and delegates to the matching child.

use std::collections::BTreeMap;

use switchyard_core::{CompleteCtx, CoreError, CoreResult, ExecCtx, NodeRef, Processor, UsageSink};

struct BranchChild {
    label: String,
    synonyms: Vec<String>,
    node: NodeRef,
}

/// A single-token dispatch point: the next token selects one of several
/// sub-graphs. At most one branch is expected on any given root-to-leaf
/// usage path (the renderer enforces this, not this type).
pub struct Branch {
    children: Vec<BranchChild>,
    default: Option<NodeRef>,
}

impl Branch {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            default: None,
        }
    }

    pub fn case(mut self, label: impl Into<String>, node: NodeRef) -> Self {
        self.children.push(BranchChild {
            label: label.into(),
            synonyms: Vec::new(),
            node,
        });
        self
    }

    /// Registers additional labels that route to the same child as the
    /// most recently added case.
    pub fn synonyms(mut self, synonyms: &[&str]) -> Self {
        if let Some(last) = self.children.last_mut() {
            last.synonyms.extend(synonyms.iter().map(|s| s.to_string()));
        }
        self
    }

    /// A child run when no token is present, or when the token matches no
    /// declared label (in which case it is pushed back for the default to
    /// see, unlike a genuine label match).
    pub fn default(mut self, node: NodeRef) -> Self {
        self.default = Some(node);
        self
    }

    fn find(&self, label: &str) -> Option<&BranchChild> {
        self.children
            .iter()
            .find(|c| c.label == label || c.synonyms.iter().any(|s| s == label))
    }

    fn sorted_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.children.iter().map(|c| c.label.clone()).collect();
        labels.sort();
        labels
    }
}

impl Default for Branch {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for Branch {
    fn execute(&self, ctx: &mut ExecCtx) -> CoreResult<()> {
        match ctx.stream.peek() {
            Some(tok) => {
                let tok = tok.to_string();
                if let Some(child) = self.find(&tok) {
                    ctx.stream.pop(ctx.data);
                    return child.node.execute(ctx);
                }
                match &self.default {
                    Some(default) => default.execute(ctx),
                    None => Err(CoreError::Branching(self.sorted_labels())),
                }
            }
            None => match &self.default {
                Some(default) => default.execute(ctx),
                None => Err(CoreError::Branching(self.sorted_labels())),
            },
        }
    }

    fn complete(&self, ctx: &mut CompleteCtx) -> CoreResult<()> {
        if ctx.at_completing_token() {
            let prefix = ctx.stream.peek().unwrap_or("").to_string();
            let mut labels: Vec<String> = self
                .children
                .iter()
                .flat_map(|c| std::iter::once(c.label.clone()).chain(c.synonyms.clone()))
                .collect();
            labels.sort();
            let completion = switchyard_core::Completion::new(labels).filter_prefix(&prefix);
            ctx.result = Some(completion);
            return Ok(());
        }

        match ctx.stream.peek() {
            Some(tok) => {
                let tok = tok.to_string();
                if let Some(child) = self.find(&tok) {
                    ctx.stream.pop(ctx.data);
                    ctx.consumed_before += 1;
                    return child.node.complete(ctx);
                }
                match &self.default {
                    Some(default) => default.complete(ctx),
                    None => Err(CoreError::Branching(self.sorted_labels())),
                }
            }
            None => match &self.default {
                Some(default) => default.complete(ctx),
                None => Ok(()),
            },
        }
    }

    fn usage(&self, sink: &mut dyn UsageSink) {
        let labels = self.sorted_labels();
        sink.begin_branch(&labels);
        let mut ordered: BTreeMap<&str, &BranchChild> =
            self.children.iter().map(|c| (c.label.as_str(), c)).collect();
        let count = ordered.len();
        for (i, (label, child)) in ordered.iter_mut().enumerate() {
            let is_last = i + 1 == count;
            sink.begin_branch_child(label, is_last);
            child.node.usage(sink);
            sink.end_branch_child();
        }
        sink.end_branch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchyard_core::{Data, ExecuteData, OutputSink, TokenStream};

    struct Tag(&'static str);
    impl Processor for Tag {
        fn execute(&self, ctx: &mut ExecCtx) -> CoreResult<()> {
            ctx.data.set("hit".to_string(), switchyard_core::Value::Str(self.0.into()));
            Ok(())
        }
        fn complete(&self, _ctx: &mut CompleteCtx) -> CoreResult<()> {
            Ok(())
        }
        fn usage(&self, _sink: &mut dyn UsageSink) {}
    }

    fn exec(branch: &Branch, values: &[&str]) -> CoreResult<Data> {
        let mut stream = TokenStream::new(values.to_vec());
        let mut data = Data::new();
        let mut sink = OutputSink::default();
        let mut exec_data = ExecuteData::new();
        let mut ctx = ExecCtx {
            stream: &mut stream,
            data: &mut data,
            sink: &mut sink,
            exec_data: &mut exec_data,
        };
        branch.execute(&mut ctx)?;
        Ok(data)
    }

    #[test]
    fn matching_label_routes_to_its_child() {
        let branch = Branch::new()
            .case("start", Arc::new(Tag("start")))
            .case("stop", Arc::new(Tag("stop")));
        let data = exec(&branch, &["stop"]).unwrap();
        assert_eq!(data.get_str("hit"), Some("stop"));
    }

    #[test]
    fn synonym_routes_to_same_child() {
        let branch = Branch::new()
            .case("start", Arc::new(Tag("start")))
            .synonyms(&["run", "go"]);
        let data = exec(&branch, &["go"]).unwrap();
        assert_eq!(data.get_str("hit"), Some("start"));
    }

    #[test]
    fn unmatched_label_without_default_is_branching_error() {
        let branch = Branch::new().case("start", Arc::new(Tag("start")));
        let err = exec(&branch, &["bogus"]).unwrap_err();
        assert!(matches!(err, CoreError::Branching(labels) if labels == vec!["start".to_string()]));
    }

    #[test]
    fn missing_token_falls_back_to_default() {
        let branch = Branch::new()
            .case("start", Arc::new(Tag("start")))
            .default(Arc::new(Tag("fallback")));
        let data = exec(&branch, &[]).unwrap();
        assert_eq!(data.get_str("hit"), Some("fallback"));
    }

    #[test]
    fn labels_reported_sorted_in_branching_error() {
        let branch = Branch::new()
            .case("zeta", Arc::new(Tag("z")))
            .case("alpha", Arc::new(Tag("a")));
        let err = exec(&branch, &["nope"]).unwrap_err();
        assert_eq!(err.to_string(), "Branching argument must be one of [alpha zeta]");
    }
}
