//! Resolves which [`switchyard_core::HostOs`] (and therefore which
//! [`switchyard_shell::ShellEmitter`]) the current invocation should use.
//!
//! Detection defaults to the compiled target OS and can be forced by
//! `LEEP_FROG_CLI_OS_OVERRIDE`, so a single binary running on, say, Linux
//! CI can still be made to emit PowerShell-like output for testing.

use switchyard_core::HostOs;
use switchyard_shell::{BashEmitter, PowerShellEmitter, ShellEmitter};

use crate::env::{Env, LEEP_FROG_CLI_OS_OVERRIDE};

/// Resolves the host OS for this invocation: an explicit override wins,
/// otherwise the compiled target family.
pub fn resolve_host_os(env: &dyn Env) -> HostOs {
    match env.var(LEEP_FROG_CLI_OS_OVERRIDE).as_deref() {
        Some("windows") | Some("powershell") => HostOs::PowerShellLike,
        Some("bash") | Some("posix") => HostOs::BashLike,
        _ => {
            if cfg!(windows) {
                HostOs::PowerShellLike
            } else {
                HostOs::BashLike
            }
        }
    }
}

/// Builds the shell emitter matching a resolved [`HostOs`].
pub fn emitter_for(host_os: HostOs) -> Box<dyn ShellEmitter> {
    match host_os {
        HostOs::BashLike => Box::new(BashEmitter::new()),
        HostOs::PowerShellLike => Box::new(PowerShellEmitter::new()),
    }
}
