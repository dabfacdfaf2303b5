//! The PowerShell-like emitter: `Set-Alias`, `Register-ArgumentCompleter`,
//! `New-TemporaryFile`, `Invoke-Expression`, `$env:`.

use crate::emitter::{Aliaser, CliSpec, ShellEmitter};

pub struct PowerShellEmitter;

impl PowerShellEmitter {
    pub fn new() -> Self {
        Self
    }

    fn trampoline(&self, builtin: bool, go_executable: &str, cli: &CliSpec) -> String {
        let builtin_arg = if builtin { " builtin" } else { "" };
        let mut out = String::new();
        if let Some(setup) = &cli.setup {
            out.push_str(&format!("function Invoke-SwitchyardSetup-{name} {{\n{setup}\n}}\nInvoke-SwitchyardSetup-{name}\n", name = cli.name, setup = setup));
        }
        out.push_str(&format!(
            "function {name} {{\n  $swTmp = New-TemporaryFile\n  & {go_executable}{builtin_arg} execute {name} $swTmp.FullName @args\n  Invoke-Expression (Get-Content $swTmp.FullName -Raw)\n  if ($env:LEEP_FROG_DEBUG) {{\n    Write-Output $swTmp.FullName\n  }} else {{\n    Remove-Item $swTmp.FullName -Force\n  }}\n}}\n",
            name = cli.name,
            go_executable = go_executable,
            builtin_arg = builtin_arg,
        ));
        out.push_str(&format!(
            "Register-ArgumentCompleter -CommandName {name} -ScriptBlock ${{function:_switchyard_complete_{name}}}\n",
            name = cli.name,
        ));
        out
    }
}

impl Default for PowerShellEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellEmitter for PowerShellEmitter {
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
                    "function _switchyard_complete_{name} {{\n  param($wordToComplete, $commandAst, $cursorPosition)\n  $swOut = & {go_executable}{builtin_arg} autocomplete {name} \"$($commandAst.CommandElements.Extent.Text)\" $cursorPosition \"$commandAst\"\n  Invoke-Expression $swOut\n}}\n",
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
            "$SwitchyardAliasCliMap = @{{}}\nfunction _switchyard_aliaser_complete {{\n  param($wordToComplete, $commandAst, $cursorPosition)\n  $swCli = $SwitchyardAliasCliMap[$commandAst.CommandElements[0].Value]\n  $swOut = & {go_executable} autocomplete $swCli \"$($commandAst.CommandElements.Extent.Text)\" $cursorPosition \"$commandAst\"\n  Invoke-Expression $swOut\n}}\n",
            go_executable = go_executable,
        )
    }

    fn register_aliaser(&self, go_executable: &str, aliaser: &Aliaser) -> String {
        let values = aliaser.values.join(" ");
        format!(
            "function {alias} {{ & {go_executable} execute {cli} {values} @args }}\n$SwitchyardAliasCliMap['{alias}'] = '{cli}'\nRegister-ArgumentCompleter -CommandName {alias} -ScriptBlock ${{function:_switchyard_aliaser_complete}}\n",
            alias = aliaser.alias,
            go_executable = go_executable,
            cli = aliaser.cli,
            values = values,
        )
    }

    fn verify_aliaser(&self, aliaser: &Aliaser) -> String {
        format!(
            "if (-not (Get-Command {cli} -ErrorAction SilentlyContinue)) {{\n  Write-Error \"switchyard: '{cli}' is not a sourcerer-generated alias\"\n}}\n",
            cli = aliaser.cli,
        )
    }

    fn sourcerer_go_cli(&self, dir: &str, target: &str) -> String {
        format!(
            "Push-Location \"{dir}\"\n$swTmp = New-TemporaryFile\ngo run . source {target} | Out-File -FilePath $swTmp.FullName -Encoding utf8\nInvoke-Expression (Get-Content $swTmp.FullName -Raw)\nRemove-Item $swTmp.FullName -Force\nPop-Location\n",
            dir = dir,
            target = target,
        )
    }

    /// PowerShell's completion host does not append a trailing space after
    /// a single candidate, so this emitter adds one itself.
    fn handle_autocomplete_success(&self, candidates: &[String], suppress_space_on_single: bool) -> String {
        if candidates.len() == 1 {
            let candidate = if suppress_space_on_single {
                candidates[0].clone()
            } else {
                format!("{} ", candidates[0])
            };
            format!("@('{candidate}')\n")
        } else {
            let quoted: Vec<String> = candidates.iter().map(|c| format!("'{c}'")).collect();
            format!("@({})\n", quoted.join(", "))
        }
    }

    fn handle_autocomplete_error(&self, message: &str) -> String {
        format!("Write-Error \"{message}\"\n@()\n")
    }

    fn function_wrap(&self, name: &str, body: &str) -> String {
        format!("function {name} {{\n{body}\n}}\n{name}\n")
    }

    fn set_env_var(&self, name: &str, value: &str) -> String {
        format!("$env:{name} = \"{value}\"\n")
    }

    fn unset_env_var(&self, name: &str) -> String {
        format!("Remove-Item Env:{name} -ErrorAction SilentlyContinue\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_candidate_gets_trailing_space() {
        let emitter = PowerShellEmitter::new();
        let text = emitter.handle_autocomplete_success(&["alpha".to_string()], false);
        assert_eq!(text, "@('alpha ')\n");
    }

    #[test]
    fn single_candidate_space_suppressed_when_requested() {
        let emitter = PowerShellEmitter::new();
        let text = emitter.handle_autocomplete_success(&["alpha".to_string()], true);
        assert_eq!(text, "@('alpha')\n");
    }

    #[test]
    fn multiple_candidates_are_not_space_padded() {
        let emitter = PowerShellEmitter::new();
        let text = emitter.handle_autocomplete_success(&["alpha".to_string(), "bravo".to_string()], false);
        assert_eq!(text, "@('alpha', 'bravo')\n");
    }

    #[test]
    fn register_clis_uses_temporary_file_and_invoke_expression() {
        let emitter = PowerShellEmitter::new();
        let text = emitter.register_clis(false, "mygo.exe", "", &[CliSpec::new("widget")]);
        assert!(text.contains("New-TemporaryFile"));
        assert!(text.contains("Invoke-Expression"));
    }

    #[test]
    fn autocomplete_hook_defines_one_function_per_cli() {
        let emitter = PowerShellEmitter::new();
        let text = emitter.autocomplete_hook(false, "mygo.exe", &[CliSpec::new("widget")]);
        assert!(text.contains("function _switchyard_complete_widget"));
        assert!(text.contains("mygo.exe autocomplete widget"));
    }

    #[test]
    fn register_aliaser_populates_the_lookup_map() {
        let emitter = PowerShellEmitter::new();
        let aliaser = Aliaser::new("gw", "widget", vec![]);
        let text = emitter.register_aliaser("mygo.exe", &aliaser);
        assert!(text.contains("$SwitchyardAliasCliMap['gw'] = 'widget'"));
    }
}
