//! Drives `BashEmitter`-generated source text through a real `sh`, using
//! [`switchyard_shell::run_piped`] to confirm the emitted syntax actually
//! parses and runs rather than merely matching a string fixture.

use switchyard_shell::{BashEmitter, CliSpec, ShellEmitter, SimplePipe};

#[test]
fn emitted_trampoline_defines_a_shell_function_without_syntax_errors() {
    let emitter = BashEmitter::new();
    let text = emitter.register_clis(false, "echo", "", &[CliSpec::new("widget")]);

    // `sh -n` only checks syntax; it never runs the function body, so this
    // is safe even though the body calls a "goExecutable" that doesn't exist.
    let check = format!("{text}\necho SYNTAX_OK");
    let pipe = SimplePipe::new("sh -n && echo SYNTAX_OK").capture();
    let output = pipe.pipe(&check).expect("sh -n should accept generated source");
    assert!(output.contains("SYNTAX_OK"));
}

#[test]
fn autocomplete_hook_text_parses_under_bash() {
    let emitter = BashEmitter::new();
    let text = emitter.autocomplete_hook(false, "echo", &[CliSpec::new("widget"), CliSpec::new("gadget")]);

    let pipe = SimplePipe::new("bash -n && echo SYNTAX_OK").capture();
    let output = pipe.pipe(&text).expect("bash -n should accept the autocomplete hook");
    assert!(output.contains("SYNTAX_OK"));
}
