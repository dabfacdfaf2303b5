//! The side channel a traversal uses to ask the caller's shell to run
//! lines after the go-executable... after this process exits.
//!
//! This is the only way user code can mutate shell state (aliases, env
//! vars, cwd): the dispatcher writes these lines to a temp file the
//! trampoline evaluates in the caller's shell context.

/// Shell lines to evaluate after execution, plus whether they should be
/// wrapped in a shell function (to permit `return`/`local`).
#[derive(Debug, Clone, Default)]
pub struct ExecuteData {
    lines: Vec<String>,
    function_wrap: bool,
}

impl ExecuteData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line. Lines are emitted in the order pushed, which is
    /// traversal order since processors push as they run.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn request_function_wrap(&mut self) {
        self.function_wrap = true;
    }

    pub fn wants_function_wrap(&self) -> bool {
        self.function_wrap
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines with newlines for writing to the trampoline's temp
    /// file, wrapping in a named shell function if requested.
    pub fn render(&self, function_name: Option<&str>) -> String {
        let body = self.lines.join("\n");
        match (self.function_wrap, function_name) {
            (true, Some(name)) => format!("function {name} {{\n{body}\n}}\n{name}\n"),
            _ => body,
        }
    }
}
