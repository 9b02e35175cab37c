//! Process launch orchestration: games spawn as detached children with
//! their stdio dropped, fire-and-forget. The one embedded session, if
//! any, is tracked so the shell can suspend navigation and hand the
//! foreground back on minimize.

use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{info, warn};

use crate::input::dispatcher::Orchestrator;
use crate::registry::Game;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("executable not found: {0}")]
    Missing(PathBuf),
    #[error("failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: io::Error,
    },
}

struct EmbeddedSession {
    title: String,
    child: Child,
    minimized: bool,
}

pub struct Launcher {
    embedded: Option<EmbeddedSession>,
    /// Retained only so exits can be reaped; never supervised.
    detached: Vec<Child>,
    /// Sticky, for the debug overlay.
    last_error: Option<String>,
    /// Drained by the shell to raise an error notification.
    pending_error: Option<String>,
    /// Drained by the shell to raise a launch notification.
    pending_launch: Option<String>,
}

impl Launcher {
    pub fn new() -> Self {
        Self {
            embedded: None,
            detached: Vec::new(),
            last_error: None,
            pending_error: None,
            pending_launch: None,
        }
    }

    pub fn launch(&mut self, game: &Game) -> Result<(), LaunchError> {
        if !game.executable.exists() {
            return Err(LaunchError::Missing(game.executable.clone()));
        }

        let child = Command::new(&game.executable)
            .args(&game.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                path: game.executable.clone(),
                source,
            })?;

        info!(game = %game.title, pid = child.id(), embedded = game.embedded, "game launched");

        if game.embedded {
            self.embedded = Some(EmbeddedSession {
                title: game.title.clone(),
                child,
                minimized: false,
            });
        } else {
            self.detached.push(child);
        }
        Ok(())
    }

    /// Reap finished children without blocking. An embedded exit clears
    /// the embedded state. Called once per tick.
    pub fn poll(&mut self) {
        if let Some(ref mut session) = self.embedded {
            if matches!(session.child.try_wait(), Ok(Some(_))) {
                info!(game = %session.title, "embedded game exited");
                self.embedded = None;
            }
        }
        self.detached
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }

    pub fn embedded_title(&self) -> Option<&str> {
        self.embedded.as_ref().map(|s| s.title.as_str())
    }

    pub fn embedded_minimized(&self) -> bool {
        self.embedded.as_ref().is_some_and(|s| s.minimized)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_pending_error(&mut self) -> Option<String> {
        self.pending_error.take()
    }

    pub fn take_pending_launch(&mut self) -> Option<String> {
        self.pending_launch.take()
    }
}

impl Orchestrator for Launcher {
    fn embedded_active(&self) -> bool {
        self.embedded.as_ref().is_some_and(|s| !s.minimized)
    }

    fn minimize_embedded(&mut self) {
        if let Some(ref mut session) = self.embedded {
            if !session.minimized {
                info!(game = %session.title, "embedded game minimized");
                session.minimized = true;
            }
        }
    }

    fn select_game(&mut self, game: &Game) {
        match self.launch(game) {
            Ok(()) => self.pending_launch = Some(game.title.clone()),
            Err(err) => {
                warn!(game = %game.title, %err, "launch failed");
                let message = err.to_string();
                self.last_error = Some(message.clone());
                self.pending_error = Some(message);
            }
        }
    }
}
