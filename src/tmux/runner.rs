// ABOUTME: Command executor for the tmux binary
// Runs tmux subcommands synchronously, or records them in dry-run mode

use std::process::Command;

use tracing::debug;

use crate::tmux::error::TmuxError;

enum Mode {
    /// Spawn tmux and wait for each command to finish.
    Execute,
    /// Record every would-be invocation instead of spawning anything.
    /// `live_sessions` seeds the answer to existence checks, so the
    /// already-running path can be exercised without a real tmux server.
    DryRun {
        log: Vec<String>,
        live_sessions: Vec<String>,
    },
}

/// Executes tmux subcommands on behalf of the session builder.
///
/// All state (mode, dry-run log) lives in this object; it is constructed
/// once at startup and borrowed by each provisioning step.
pub struct TmuxRunner {
    mode: Mode,
}

impl TmuxRunner {
    /// Create a runner that actually spawns tmux. Fails fast when the
    /// binary is not on PATH.
    pub fn new() -> Result<Self, TmuxError> {
        Self::check_installed()?;
        Ok(Self {
            mode: Mode::Execute,
        })
    }

    /// Create a recording-only runner. No process is ever spawned, and
    /// existence checks answer "not running".
    pub fn dry_run() -> Self {
        Self {
            mode: Mode::DryRun {
                log: Vec::new(),
                live_sessions: Vec::new(),
            },
        }
    }

    /// Recording-only runner that pretends the given sessions are live.
    pub fn dry_run_with_live_sessions(names: &[&str]) -> Self {
        Self {
            mode: Mode::DryRun {
                log: Vec::new(),
                live_sessions: names.iter().map(ToString::to_string).collect(),
            },
        }
    }

    /// Check if tmux is installed on the host
    pub fn check_installed() -> Result<(), TmuxError> {
        let output = Command::new("which")
            .arg("tmux")
            .output()
            .map_err(|_| TmuxError::TmuxNotInstalled)?;

        if !output.status.success() {
            return Err(TmuxError::TmuxNotInstalled);
        }
        Ok(())
    }

    /// Run one tmux subcommand and wait for it.
    ///
    /// Spawn failure, non-zero exit, and signal termination all surface as
    /// `CommandFailed` naming the provisioning step.
    pub fn run(&mut self, step: &'static str, args: &[&str]) -> Result<(), TmuxError> {
        if let Mode::DryRun { log, .. } = &mut self.mode {
            log.push(render(args));
            return Ok(());
        }

        debug!("tmux {}", args.join(" "));

        let output = Command::new("tmux")
            .args(args)
            .output()
            .map_err(|e| TmuxError::CommandFailed {
                step,
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(TmuxError::CommandFailed { step, detail });
        }

        Ok(())
    }

    /// Query whether a session with this name is already running.
    pub fn session_exists(&mut self, name: &str) -> bool {
        let args = ["has-session", "-t", name];

        match &mut self.mode {
            Mode::DryRun { log, live_sessions } => {
                log.push(render(&args));
                live_sessions.iter().any(|s| s == name)
            }
            Mode::Execute => Command::new("tmux")
                .args(args)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false),
        }
    }

    /// Attach the invoking terminal to the session, blocking until the
    /// user detaches. Stdin/stdout/stderr are inherited from this process.
    pub fn attach(&mut self, name: &str) -> Result<(), TmuxError> {
        let args = ["attach", "-t", name];

        if let Mode::DryRun { log, .. } = &mut self.mode {
            log.push(render(&args));
            return Ok(());
        }

        let status = Command::new("tmux")
            .args(args)
            .status()
            .map_err(|e| TmuxError::CommandFailed {
                step: "attach session",
                detail: e.to_string(),
            })?;

        if !status.success() {
            return Err(TmuxError::CommandFailed {
                step: "attach session",
                detail: status.to_string(),
            });
        }

        Ok(())
    }

    /// The ordered record of dry-run invocations. Empty in execute mode.
    pub fn log(&self) -> &[String] {
        match &self.mode {
            Mode::DryRun { log, .. } => log,
            Mode::Execute => &[],
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self.mode, Mode::DryRun { .. })
    }
}

fn render(args: &[&str]) -> String {
    format!("$> tmux {}", args.join(" "))
}
