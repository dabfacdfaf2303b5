//! The value an autocomplete traversal hands back to its driver.

/// A set of candidate completions plus the control bits that decide how
/// the host shell should present them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub candidates: Vec<String>,
    /// Filter out any candidate already present in the argument's existing
    /// list value.
    pub distinct: bool,
    /// Don't append a trailing space when exactly one candidate remains.
    pub suppress_space_on_single: bool,
    pub case_insensitive: bool,
    /// Candidates are file paths; the host shell family may rewrite path
    /// separators accordingly.
    pub is_file_path: bool,
}

impl Completion {
    pub fn new(candidates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn suppress_space_on_single(mut self) -> Self {
        self.suppress_space_on_single = true;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn file_path(mut self) -> Self {
        self.is_file_path = true;
        self
    }

    /// Filters out candidates already present in `existing`, applying
    /// [`Completion::distinct`]'s rule. A no-op if `distinct` is unset.
    pub fn filter_distinct(mut self, existing: &[String]) -> Self {
        if self.distinct {
            self.candidates.retain(|c| !existing.contains(c));
        }
        self
    }

    /// Candidates beginning with `prefix`, honoring case sensitivity.
    pub fn filter_prefix(mut self, prefix: &str) -> Self {
        if self.case_insensitive {
            let lower = prefix.to_lowercase();
            self.candidates
                .retain(|c| c.to_lowercase().starts_with(&lower));
        } else {
            self.candidates.retain(|c| c.starts_with(prefix));
        }
        self
    }
}
