//! Accumulates a [`switchyard_core::UsageSink`] walk into a tree the
//! renderer can lay out, plus the two alphabetical trailing sections
//! (Arguments, Flags) that are collected globally rather than per-branch.

use std::collections::BTreeMap;

use switchyard_core::UsageSink;

#[derive(Debug, Clone)]
pub struct PositionalDisplay {
    pub name: String,
    pub required: usize,
    pub optional: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct FlagDisplay {
    pub long: String,
    pub short: Option<char>,
}

#[derive(Debug, Clone, Default)]
pub struct BranchDisplay {
    pub labels: Vec<String>,
    pub children: Vec<(String, UsageTree)>,
}

/// A single root-line's worth of positionals and flags, plus the branch
/// point (if any) that follows them.
#[derive(Debug, Clone, Default)]
pub struct UsageTree {
    pub positionals: Vec<PositionalDisplay>,
    pub flags: Vec<FlagDisplay>,
    pub branch: Option<BranchDisplay>,
}

/// Implements [`UsageSink`], building a [`UsageTree`] plus the global
/// Arguments/Flags description maps (`BTreeMap` keeps them alphabetical
/// for free).
pub struct UsageAccumulator {
    stack: Vec<UsageTree>,
    pending_labels: Vec<String>,
    arguments: BTreeMap<String, String>,
    flags: BTreeMap<String, (Option<char>, String)>,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self {
            stack: vec![UsageTree::default()],
            pending_labels: Vec::new(),
            arguments: BTreeMap::new(),
            flags: BTreeMap::new(),
        }
    }

    /// Consumes the accumulator, returning the root tree and the two
    /// trailing sections. Panics if called mid-walk (unbalanced
    /// begin/end_branch_child calls), which would be a caller bug.
    pub fn finish(mut self) -> (UsageTree, BTreeMap<String, String>, BTreeMap<String, (Option<char>, String)>) {
        let root = self.stack.pop().expect("usage walk left an unbalanced branch stack");
        assert!(self.stack.is_empty(), "usage walk left an unbalanced branch stack");
        (root, self.arguments, self.flags)
    }
}

impl Default for UsageAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageSink for UsageAccumulator {
    fn add_positional(&mut self, name: &str, required: usize, optional: Option<usize>) {
        self.stack.last_mut().unwrap().positionals.push(PositionalDisplay {
            name: name.to_string(),
            required,
            optional,
        });
    }

    fn add_flag(&mut self, long: &str, short: Option<char>, description: &str) {
        self.stack
            .last_mut()
            .unwrap()
            .flags
            .push(FlagDisplay { long: long.to_string(), short });
        self.flags
            .entry(long.to_string())
            .or_insert_with(|| (short, description.to_string()));
    }

    fn add_argument_description(&mut self, name: &str, description: &str) {
        self.arguments.insert(name.to_string(), description.to_string());
    }

    fn begin_branch(&mut self, labels: &[String]) {
        let top = self.stack.last_mut().unwrap();
        assert!(
            top.branch.is_none(),
            "at most one branch point may be inserted per root line"
        );
        top.branch = Some(BranchDisplay {
            labels: labels.to_vec(),
            children: Vec::new(),
        });
    }

    fn begin_branch_child(&mut self, label: &str, _is_last: bool) {
        self.pending_labels.push(label.to_string());
        self.stack.push(UsageTree::default());
    }

    fn end_branch_child(&mut self) {
        let child = self.stack.pop().expect("end_branch_child without a matching begin");
        let label = self.pending_labels.pop().expect("end_branch_child without a matching begin");
        let parent = self.stack.last_mut().unwrap();
        parent
            .branch
            .as_mut()
            .expect("end_branch_child outside an open branch")
            .children
            .push((label, child));
    }

    fn end_branch(&mut self) {}
}
