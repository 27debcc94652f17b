// src/exec.rs

//! Child-process supervision: run one shell command and relay process-control
//! signals to it for as long as it lives.

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Run `cmd_str` under the platform shell and return its exit code.
///
/// The command string is trusted shell syntax; interpreting it is delegated
/// to the shell entirely. On unix, SIGCONT and SIGTERM received by this
/// process while the child runs are forwarded verbatim to the child's pid;
/// the wrapper never acts on them itself, so the scheduler can manage the
/// child exactly as if it supervised it directly. The wait ends only when
/// the child exits; there is no timeout and no cancellation.
///
/// A spawn failure (the shell itself cannot be started) is a fatal error.
pub async fn run_command(cmd_str: &str) -> Result<i32> {
    info!(cmd = %cmd_str, "starting task process");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd_str);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_str);
        c
    };

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning shell for command '{}'", cmd_str))?;

    let status = wait_with_relay(&mut child).await?;

    let code = exit_code(&status);
    info!(exit_code = code, success = status.success(), "task process exited");
    Ok(code)
}

/// Wait for the child while relaying SIGCONT and SIGTERM to it.
///
/// The signal streams live only inside this function, so the relay is scoped
/// to the lifetime of the wait; no handler outlives the child.
#[cfg(unix)]
async fn wait_with_relay(child: &mut Child) -> Result<std::process::ExitStatus> {
    use nix::sys::signal::Signal;
    use nix::unistd::Pid;
    use tokio::signal::unix::{SignalKind, signal};

    let pid = child
        .id()
        .map(|id| Pid::from_raw(id as i32))
        .context("child process has no pid")?;

    let mut sigterm = signal(SignalKind::terminate()).context("installing SIGTERM listener")?;
    let mut sigcont = signal(SignalKind::from_raw(Signal::SIGCONT as i32))
        .context("installing SIGCONT listener")?;

    loop {
        tokio::select! {
            status = child.wait() => {
                return status.context("waiting for child process");
            }
            _ = sigterm.recv() => forward(pid, Signal::SIGTERM),
            _ = sigcont.recv() => forward(pid, Signal::SIGCONT),
        }
    }
}

#[cfg(unix)]
fn forward(pid: nix::unistd::Pid, sig: nix::sys::signal::Signal) {
    debug!(pid = %pid, signal = %sig, "forwarding signal to child");
    // The child may already be gone by the time the signal lands here.
    if let Err(err) = nix::sys::signal::kill(pid, sig) {
        debug!(pid = %pid, signal = %sig, error = %err, "signal forward failed");
    }
}

#[cfg(not(unix))]
async fn wait_with_relay(child: &mut Child) -> Result<std::process::ExitStatus> {
    child.wait().await.context("waiting for child process")
}

/// Map an exit status to the code this process should propagate.
///
/// A signal-terminated child has no exit code of its own; by shell convention
/// it is reported as `128 + signo`.
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    status.code().unwrap_or(-1)
}
