//! The `sourcerer` binary: the thin process entry point around
//! [`switchyard::dispatcher::Sourcerer`].
//!
//! This binary ships with an empty [`CliRegistry`] — the builtin CLIs
//! (debugger, package updater) the spec calls out are explicitly out of
//! scope (§1). A real deployment links against the `switchyard` library
//! and registers its own CLIs before calling [`Sourcerer::dispatch`]; this
//! `main` is the reference shape that wiring takes.

use std::io::Write;
use std::process::ExitCode;

use switchyard::{CliRegistry, Env, FileCache, RealEnv, Sourcerer};

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let env = RealEnv;
    let cache = FileCache::from_env(&env);
    let registry = CliRegistry::new();
    let go_executable = std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "sourcerer".to_string());

    let sourcerer = Sourcerer::new(registry, Box::new(cache), Box::new(env), go_executable);

    match sourcerer.dispatch(&argv) {
        Ok(outcome) => {
            if !outcome.stdout.is_empty() {
                println!("{}", outcome.stdout);
            }
            if !outcome.stderr.is_empty() {
                eprintln!("{}", outcome.stderr);
            }
            if let Some((path, content)) = outcome.execute_file {
                if let Err(e) = std::fs::write(&path, content) {
                    eprintln!("failed to write execute file: {e}");
                    return ExitCode::FAILURE;
                }
            }
            exit_code(outcome.exit_code)
        }
        Err(err) => {
            let _ = std::io::stderr().flush();
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(code.clamp(1, 255) as u8)
    }
}
