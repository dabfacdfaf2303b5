//! Buffered output with an injectable color-capability collaborator.
//!
//! Color/escape-code formatting is explicitly out of scope for this crate
//! (per the purpose & scope): [`OutputSink`] only ever calls into a
//! [`ColorCapability`] trait object, the same seam `standout-dispatch`
//! draws between itself (format-agnostic) and `standout-render` (owns the
//! actual styling).

/// A single named style a [`ColorCapability`] may or may not be able to
/// render; the set is intentionally small since styling itself lives
/// outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Dim,
    Error,
    Plain,
}

/// External collaborator that knows whether the destination supports
/// color and how to paint it. `switchyard-core` never assumes an
/// implementation; the top-level crate supplies one (or a no-op).
pub trait ColorCapability: Send + Sync {
    fn supports_color(&self) -> bool;
    fn paint(&self, text: &str, style: Style) -> String;
}

/// A [`ColorCapability`] that never colors anything; the default when no
/// other capability is injected.
pub struct NoColor;

impl ColorCapability for NoColor {
    fn supports_color(&self) -> bool {
        false
    }
    fn paint(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

/// One line written to the sink, recorded for tests and for the `usage`
/// phase (which never touches real stdio).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotated {
    Stdout(String),
    Stderr(String),
}

/// A buffered stdout/stderr sink. Real I/O is performed through the
/// `write` callbacks supplied at construction so tests can capture output
/// without touching the process's actual descriptors.
pub struct OutputSink {
    color: Box<dyn ColorCapability>,
    lines: Vec<Annotated>,
    terminated: Option<i32>,
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new(Box::new(NoColor))
    }
}

impl OutputSink {
    pub fn new(color: Box<dyn ColorCapability>) -> Self {
        Self {
            color,
            lines: Vec::new(),
            terminated: None,
        }
    }

    pub fn stdout_line(&mut self, text: impl Into<String>) {
        self.lines.push(Annotated::Stdout(text.into()));
    }

    pub fn stderr_line(&mut self, text: impl Into<String>) {
        self.lines.push(Annotated::Stderr(text.into()));
    }

    /// Writes a styled stderr line through the injected [`ColorCapability`].
    pub fn annotate_stderr(&mut self, text: &str, style: Style) {
        let painted = self.color.paint(text, style);
        self.stderr_line(painted);
    }

    /// Signals that traversal should unwind immediately. Buffered writes
    /// are preserved and may still be flushed by the caller.
    pub fn terminate(&mut self, code: i32) {
        self.terminated = Some(code);
    }

    pub fn termination_code(&self) -> Option<i32> {
        self.terminated
    }

    /// Drains buffered lines in the order they were written.
    pub fn drain(&mut self) -> Vec<Annotated> {
        std::mem::take(&mut self.lines)
    }

    pub fn lines(&self) -> &[Annotated] {
        &self.lines
    }

    /// Flushes buffered lines to real `stdout`/`stderr`, in order written.
    pub fn flush_to_stdio(&mut self) {
        for line in self.drain() {
            match line {
                Annotated::Stdout(s) => println!("{s}"),
                Annotated::Stderr(s) => eprintln!("{s}"),
            }
        }
    }
}
