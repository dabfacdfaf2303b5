//! The bash-like emitter: POSIX shell using `alias`, `complete`, heredocs,
//! `mktemp`, and `source`.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::emitter::{Aliaser, CliSpec, ShellEmitter};

/// Process-wide toggle for `complete -F ... -o nosort`; some older bash
/// builds choke on `-o nosort`, so callers may disable it globally.
static IGNORE_NOSORT: AtomicBool = AtomicBool::new(false);

pub fn set_ignore_nosort(ignore: bool) {
    IGNORE_NOSORT.store(ignore, Ordering::SeqCst);
}

pub struct BashEmitter;

impl BashEmitter {
    pub fn new() -> Self {
        Self
    }

    fn trampoline(&self, builtin: bool, go_executable: &str, cli: &CliSpec) -> String {
        let builtin_arg = if builtin { " builtin" } else { "" };
        let mut out = String::new();
        if let Some(setup) = &cli.setup {
            out.push_str(&format!("function _switchyard_setup_{name}() {{\n{setup}\n}}\n_switchyard_setup_{name}\n", name = cli.name, setup = setup));
        }
        out.push_str(&format!(
            "function {name}() {{\n  local _sw_tmp\n  _sw_tmp=\"$(mktemp)\"\n  {go_executable}{builtin_arg} execute {name} \"$_sw_tmp\" \"$@\"\n  source \"$_sw_tmp\"\n  if [ -n \"$LEEP_FROG_DEBUG\" ]; then\n    echo \"$_sw_tmp\"\n  else\n    rm -f \"$_sw_tmp\"\n  fi\n}}\n",
            name = cli.name,
            go_executable = go_executable,
            builtin_arg = builtin_arg,
        ));
        out.push_str(&format!(
            "complete -F _switchyard_complete_{target} {nosort}{name}\n",
            target = cli.name,
            name = cli.name,
            nosort = if IGNORE_NOSORT.load(Ordering::SeqCst) { "" } else { "-o nosort " },
        ));
        out
    }
}

impl Default for BashEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellEmitter for BashEmitter {
    fn register_clis(&self, builtin: bool, go_executable: &str, _target: &str, clis: &[CliSpec]) -> String {
        clis.iter()
            .map(|cli| self.trampoline(builtin, go_executable, cli))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn autocomplete_hook(&self, builtin: bool, go_executable: &str, clis: &[CliSpec]) -> String {
        let builtin_arg = if builtin { " builtin" } else { "" };
        clis.iter()
            .map(|cli| {
                format!(
                    "_switchyard_complete_{name}() {{\n  local _sw_out\n  _sw_out=\"$({go_executable}{builtin_arg} autocomplete {name} \"$COMP_TYPE\" \"$COMP_POINT\" \"$COMP_LINE\")\"\n  eval \"$_sw_out\"\n}}\n",
                    name = cli.name,
                    go_executable = go_executable,
                    builtin_arg = builtin_arg,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn aliaser_helper(&self, go_executable: &str) -> String {
        format!(
            "declare -gA _switchyard_alias_cli_map\n_switchyard_aliaser_complete() {{\n  local _sw_cli=\"${{_switchyard_alias_cli_map[${{COMP_WORDS[0]}}]}}\"\n  local _sw_out\n  _sw_out=\"$({go_executable} autocomplete \"$_sw_cli\" \"$COMP_TYPE\" \"$COMP_POINT\" \"$COMP_LINE\")\"\n  eval \"$_sw_out\"\n}}\n",
            go_executable = go_executable,
        )
    }

    fn register_aliaser(&self, go_executable: &str, aliaser: &Aliaser) -> String {
        let values = aliaser.values.join(" ");
        format!(
            "alias {alias}='{go_executable} execute {cli} {values}'\n_switchyard_alias_cli_map[{alias}]='{cli}'\ncomplete -F _switchyard_aliaser_complete -o nosort {alias}\n",
            alias = aliaser.alias,
            go_executable = go_executable,
            cli = aliaser.cli,
            values = values,
        )
    }

    fn verify_aliaser(&self, aliaser: &Aliaser) -> String {
        format!(
            "if ! alias {cli} > /dev/null 2>&1; then\n  echo \"switchyard: '{cli}' is not a sourcerer-generated alias\" >&2\nfi\n",
            cli = aliaser.cli,
        )
    }

    fn sourcerer_go_cli(&self, dir: &str, target: &str) -> String {
        format!(
            "(\n  cd \"{dir}\" && _sw_tmp=\"$(mktemp)\" && go run . source {target} > \"$_sw_tmp\" && source \"$_sw_tmp\" && rm -f \"$_sw_tmp\"\n)\n",
            dir = dir,
            target = target,
        )
    }

    fn handle_autocomplete_success(&self, candidates: &[String], suppress_space_on_single: bool) -> String {
        let joined = candidates.join(" ");
        if candidates.len() == 1 && suppress_space_on_single {
            format!("COMPREPLY=(\"{}\")\n", candidates[0])
        } else {
            format!("COMPREPLY=({joined})\n")
        }
    }

    fn handle_autocomplete_error(&self, message: &str) -> String {
        format!("echo \"{message}\" >&2\nCOMPREPLY=()\n")
    }

    fn function_wrap(&self, name: &str, body: &str) -> String {
        format!("function {name} {{\n{body}\n}}\n{name}\n")
    }

    fn set_env_var(&self, name: &str, value: &str) -> String {
        format!("export {name}=\"{value}\"\n")
    }

    fn unset_env_var(&self, name: &str) -> String {
        format!("unset {name}\n")
    }
}
