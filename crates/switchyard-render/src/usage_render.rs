//! Lays a [`UsageTree`] out as top-down, box-drawing usage text.

use std::collections::BTreeMap;

use crate::usage_tree::{BranchDisplay, FlagDisplay, PositionalDisplay, UsageTree};

const MID_CHILD_INDENT: &str = "┃   ";
const LAST_CHILD_INDENT: &str = "    ";
const MID_ITEM: &str = "┣━━ ";
const LAST_ITEM: &str = "┗━━ ";

fn display_positional(p: &PositionalDisplay) -> String {
    let mut parts = Vec::new();
    for _ in 0..p.required {
        parts.push(p.name.clone());
    }
    match p.optional {
        None => parts.push(format!("[ {0} ... ]", p.name)),
        Some(0) => {}
        Some(_) => parts.push(format!("[ {0} ... {0} ]", p.name)),
    }
    parts.join(" ")
}

fn display_flag(f: &FlagDisplay) -> String {
    match f.short {
        Some(s) => format!("--{}|-{}", f.long, s),
        None => format!("--{}", f.long),
    }
}

fn root_line_tokens(tree: &UsageTree) -> String {
    let mut tokens: Vec<String> = tree.positionals.iter().map(display_positional).collect();
    tokens.retain(|t| !t.is_empty());
    tokens.extend(tree.flags.iter().map(display_flag));
    tokens.join(" ")
}

fn render_branch(branch: &BranchDisplay, indent: &str, out: &mut String) {
    let count = branch.children.len();
    for (i, (label, child)) in branch.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_ITEM } else { MID_ITEM };
        out.push_str(indent);
        out.push_str(connector);
        out.push_str(label);
        let child_line = root_line_tokens(child);
        if !child_line.is_empty() {
            out.push(' ');
            out.push_str(&child_line);
        }
        out.push('\n');

        if let Some(sub_branch) = &child.branch {
            let child_indent = format!(
                "{indent}{}",
                if is_last { LAST_CHILD_INDENT } else { MID_CHILD_INDENT }
            );
            render_branch(sub_branch, &child_indent, out);
        }
    }
}

fn render_section(title: &str, lines: &[String], out: &mut String) {
    if lines.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}

/// Renders the full usage text: root line, branch tree, then the
/// Arguments/Flags/Symbols trailing sections.
pub fn render_usage(
    root_name: &str,
    tree: &UsageTree,
    arguments: &BTreeMap<String, String>,
    flags: &BTreeMap<String, (Option<char>, String)>,
    symbols: &[(String, String)],
) -> String {
    let mut out = String::new();
    let root_tokens = root_line_tokens(tree);
    if root_tokens.is_empty() {
        out.push_str(root_name);
    } else {
        out.push_str(root_name);
        out.push(' ');
        out.push_str(&root_tokens);
    }
    out.push('\n');

    if let Some(branch) = &tree.branch {
        render_branch(branch, "", &mut out);
    }

    let argument_lines: Vec<String> = arguments
        .iter()
        .map(|(name, desc)| format!("  {name}: {desc}"))
        .collect();
    render_section("Arguments:", &argument_lines, &mut out);

    let flag_lines: Vec<String> = flags
        .iter()
        .map(|(long, (short, desc))| {
            let prefix = match short {
                Some(s) => format!("  [{s}] "),
                None => "      ".to_string(),
            };
            format!("{prefix}{long}: {desc}")
        })
        .collect();
    render_section("Flags:", &flag_lines, &mut out);

    let symbol_lines: Vec<String> = symbols
        .iter()
        .map(|(glyph, desc)| format!("  {glyph}  {desc}"))
        .collect();
    render_section("Symbols:", &symbol_lines, &mut out);

    out
}
