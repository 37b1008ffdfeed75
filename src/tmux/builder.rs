// ABOUTME: Session builder translating the declarative config into tmux calls
// Walks session -> windows -> panes and emits ordered create/rename/split/send
// operations, honoring tmux's implicit first window and first pane

use std::env;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{SessionConfig, WindowConfig};
use crate::paths;
use crate::tmux::error::TmuxError;
use crate::tmux::runner::TmuxRunner;

/// How a `build` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The session was created and provisioned from scratch.
    Created,
    /// A session with this name was already live; nothing was provisioned.
    /// The declared config is not reconciled against the running layout.
    AlreadyRunning,
}

/// Translates a [`SessionConfig`] into an ordered sequence of tmux commands.
///
/// Windows and panes are addressed 1-indexed (`session:window` and
/// `session:window.pane`); this assumes a tmux configured with `base-index 1`.
/// The first declared window is never created explicitly. tmux starts every
/// session with one window and one pane already present, so window 1 is only
/// renamed and pane 1 of any window is never split off.
pub struct SessionBuilder<'a> {
    config: &'a SessionConfig,
    runner: &'a mut TmuxRunner,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(config: &'a SessionConfig, runner: &'a mut TmuxRunner) -> Self {
        Self { config, runner }
    }

    /// Drive the session from absent to fully provisioned.
    ///
    /// Any failing tmux command aborts the run immediately; whatever was
    /// provisioned up to that point is left in place for the operator.
    pub fn build(&mut self) -> Result<BuildOutcome, TmuxError> {
        let config = self.config;
        let name = config.name.as_str();

        if self.runner.session_exists(name) {
            info!("session {name} is already running, attaching as-is");
            return Ok(BuildOutcome::AlreadyRunning);
        }

        let root = self.resolve_root()?;
        let root_str = root.to_string_lossy().into_owned();

        self.runner.run(
            "session creation",
            &["new-session", "-d", "-s", name, "-c", &root_str, "-n", "main"],
        )?;

        for (k, window) in config.windows.iter().enumerate() {
            let index = k + 1;

            if index == 1 {
                // The implicit default window only gets renamed; its cwd
                // stays whatever new-session established, so a `path` on
                // the first window is not honored.
                let target = self.window_target(index);
                self.runner
                    .run("first window rename", &["rename-window", "-t", &target, &window.name])?;
            } else {
                self.create_window(&root, index, window)?;
            }

            if window.has_panes() {
                self.provision_panes(&root, index, window)?;
            } else {
                self.inject(index, 1, &window.cmd)?;
            }
        }

        let first = self.window_target(1);
        self.runner
            .run("window selection", &["select-window", "-t", &first])?;

        Ok(BuildOutcome::Created)
    }

    /// Session root: the expanded `root` field, or the invocation's current
    /// working directory when none was declared.
    fn resolve_root(&self) -> Result<PathBuf, TmuxError> {
        if self.config.root.is_empty() {
            return Ok(env::current_dir()?);
        }
        Ok(paths::expand(&self.config.root))
    }

    fn create_window(
        &mut self,
        root: &Path,
        index: usize,
        window: &WindowConfig,
    ) -> Result<(), TmuxError> {
        // The first pane's path substitutes for the window's launch
        // directory when panes are declared.
        let launch_dir = match window.panes.first() {
            Some(pane) => paths::resolve(root, &pane.path),
            None => paths::resolve(root, &window.path),
        };

        let target = self.window_target(index);
        self.runner.run(
            "window creation",
            &[
                "new-window",
                "-t",
                &target,
                "-n",
                &window.name,
                "-c",
                &launch_dir.to_string_lossy(),
            ],
        )
    }

    fn provision_panes(
        &mut self,
        root: &Path,
        index: usize,
        window: &WindowConfig,
    ) -> Result<(), TmuxError> {
        for (i, pane) in window.panes.iter().enumerate() {
            let pane_index = i + 1;

            // Pane 1 occupies the window's initial pane and is never split.
            if pane_index > 1 {
                let side = if pane.horizontal { "-h" } else { "-v" };
                let dir = paths::resolve(root, &pane.path);
                let target = self.window_target(index);
                self.runner.run(
                    "window split",
                    &["split-window", side, "-t", &target, "-c", &dir.to_string_lossy()],
                )?;
            }

            self.inject(index, pane_index, &pane.cmd)?;
        }

        Ok(())
    }

    /// Send a command as literal keystrokes to `session:window.pane`,
    /// followed by Enter. Empty commands are a no-op.
    fn inject(&mut self, window: usize, pane: usize, cmd: &str) -> Result<(), TmuxError> {
        if cmd.is_empty() {
            return Ok(());
        }

        let target = format!("{}:{}.{}", self.config.name, window, pane);
        self.runner
            .run("command injection", &["send-keys", "-t", &target, cmd, "C-m"])
    }

    fn window_target(&self, index: usize) -> String {
        format!("{}:{}", self.config.name, index)
    }
}
