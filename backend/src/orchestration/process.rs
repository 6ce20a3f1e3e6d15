//! Child process supervision.

use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{debug, info};

use super::OrchestrationError;

/// Exit code mirroring `status`.
///
/// A child killed by a signal maps to `128 + signal`, as shells report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Run `command` to completion, forwarding Ctrl-C to the child.
///
/// On interrupt the child receives SIGINT (or is killed where signals are
/// unavailable) and is then awaited, so its own exit status is reported.
///
/// # Errors
///
/// Fails when the process cannot be spawned or awaited.
pub async fn run_forwarding_interrupts(mut command: Command) -> Result<i32, OrchestrationError> {
    let program = command.as_std().get_program().to_string_lossy().into_owned();
    let spawn_error = |source| OrchestrationError::Spawn {
        program: program.clone(),
        source,
    };

    let mut child = command.spawn().map_err(spawn_error)?;
    debug!(pid = child.id(), program = %program, "spawned child process");

    let status = tokio::select! {
        status = child.wait() => status,
        interrupt = tokio::signal::ctrl_c() => {
            match interrupt {
                Ok(()) => {
                    info!(program = %program, "interrupt received; forwarding to child");
                    interrupt_child(&mut child);
                }
                Err(error) => debug!(%error, "cannot listen for interrupts"),
            }
            child.wait().await
        }
    }
    .map_err(spawn_error)?;

    let code = exit_code(status);
    debug!(program = %program, code, "child process exited");
    Ok(code)
}

#[cfg(unix)]
fn interrupt_child(child: &mut tokio::process::Child) {
    let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    // SAFETY: `kill` has no memory-safety preconditions; `pid` belongs to a
    // child we have not yet reaped, so it cannot have been recycled.
    let result = unsafe { libc::kill(pid, libc::SIGINT) };
    if result != 0 {
        debug!(pid, error = %std::io::Error::last_os_error(), "failed to forward SIGINT");
    }
}

#[cfg(not(unix))]
fn interrupt_child(child: &mut tokio::process::Child) {
    if let Err(error) = child.start_kill() {
        debug!(%error, "failed to stop child process");
    }
}
