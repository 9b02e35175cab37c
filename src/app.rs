use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyEvent;
use tracing::{error, info, warn};

use crate::admin::{AdminOutcome, AdminState};
use crate::audio::{Audio, Cue};
use crate::config::Config;
use crate::input::dispatcher::{Feedback as _, Orchestrator as _, Outcome, Shell, Surface as _};
use crate::input::{Dispatcher, Key, KeyPress};
use crate::launch::Launcher;
use crate::registry::Registry;
use crate::store::JsonStore;
use crate::ui::components::debug_overlay::DebugInfo;
use crate::ui::theme::Theme;
use crate::ui::{ModalKind, NoticeKind, SurfaceState};

/// Delay between a confirmed exit and process shutdown. Deliberately not
/// cancelable once confirmed.
const EXIT_DELAY: Duration = Duration::from_millis(2000);

const LAUNCH_NOTICE: Duration = Duration::from_millis(5000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Grid,
    Admin,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub registry: Registry,
    pub launcher: Launcher,
    pub audio: Audio,
    pub surface: SurfaceState,
    pub dispatcher: Dispatcher,
    pub admin: AdminState,
    pub admin_mode: bool,
    pub pending_exit: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(games_file: Option<PathBuf>, muted: bool) -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.validate();

        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = match games_file {
            Some(ref path) => JsonStore::with_games_path(path).ok(),
            None => JsonStore::new().ok(),
        };
        if store.is_none() {
            warn!("game store unavailable; registry changes will not persist");
        }
        let registry = Registry::load(store);
        info!(games = registry.len(), "registry loaded");

        let mut audio = Audio::spawn();
        let volume = if muted || !config.audio_enabled {
            0.0
        } else {
            config.master_volume
        };
        audio.set_volume(volume);

        Self {
            screen: AppScreen::Grid,
            config,
            theme,
            registry,
            launcher: Launcher::new(),
            audio,
            surface: SurfaceState::new(),
            dispatcher: Dispatcher::new(),
            admin: AdminState::new(),
            admin_mode: false,
            pending_exit: None,
            should_quit: false,
        }
    }

    pub fn set_theme(&mut self, name: &str) {
        if let Some(theme) = Theme::load(name) {
            let theme: &'static Theme = Box::leak(Box::new(theme));
            self.theme = theme;
            self.config.theme = name.to_string();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let press = KeyPress::from_event(&key);
        let screen = self.screen;

        // The dispatcher sees every key first. On screens that own their
        // key handling only the global steps (secret sequences, debug
        // toggle) run.
        let outcome = {
            let mut shell = Shell {
                catalog: &self.registry,
                surface: &mut self.surface,
                audio: &mut self.audio,
                launcher: &mut self.launcher,
            };
            match screen {
                AppScreen::Grid => self.dispatcher.handle_key(&press, &mut shell),
                AppScreen::Admin => self.dispatcher.observe_global(&press, &mut shell),
            }
        };
        if outcome == Outcome::Consumed {
            return;
        }

        if let Some(modal) = self.surface.active_modal() {
            self.handle_modal_key(modal, &press);
            return;
        }

        match screen {
            AppScreen::Admin => {
                if self.admin.handle_key(&press, &mut self.registry) == AdminOutcome::Leave {
                    self.leave_admin();
                }
            }
            AppScreen::Grid => {
                // Kiosk exit request: password gated, never direct. Raw
                // mode delivers Ctrl+C as an ordinary key event.
                if press.ctrl
                    && (press.key == Key::Char('c')
                        || (press.alt && press.key == Key::Char('x')))
                {
                    self.request_exit();
                }
            }
        }
    }

    fn leave_admin(&mut self) {
        self.screen = AppScreen::Grid;
        self.admin_mode = false;

        // The grid may have shrunk under the selection.
        if let Some(selected) = self.dispatcher.selected() {
            if selected >= self.registry.len() {
                let fallback = self.registry.len().checked_sub(1);
                self.dispatcher.select(fallback);
            }
        }
    }

    fn handle_modal_key(&mut self, modal: ModalKind, press: &KeyPress) {
        match modal {
            ModalKind::PasswordAdmin | ModalKind::PasswordExit => match press.key {
                Key::Enter => self.submit_password(modal),
                Key::Backspace => {
                    self.surface.password.input.pop();
                }
                Key::Char(ch) if !press.ctrl && !press.alt => {
                    self.surface.password.input.push(ch);
                    self.surface.password.error = false;
                }
                _ => {}
            },
            ModalKind::ConfirmExit => match press.key {
                Key::Left | Key::Right | Key::Tab => {
                    self.surface.confirm_yes = !self.surface.confirm_yes;
                }
                Key::Enter => {
                    let confirmed = self.surface.confirm_yes;
                    self.surface.close_all_modals();
                    if confirmed {
                        self.confirm_exit();
                    } else {
                        info!("exit cancelled at confirmation");
                    }
                }
                _ => {}
            },
        }
    }

    /// Plaintext comparison against the config. A wrong password keeps
    /// the prompt open with an inline error.
    fn submit_password(&mut self, modal: ModalKind) {
        let entered = std::mem::take(&mut self.surface.password.input);
        match modal {
            ModalKind::PasswordAdmin => {
                if entered == self.config.admin_password {
                    info!("admin mode unlocked");
                    self.surface.close_all_modals();
                    self.admin_mode = true;
                    self.admin = AdminState::new();
                    self.screen = AppScreen::Admin;
                } else {
                    warn!("wrong admin password");
                    self.surface.password.error = true;
                }
            }
            ModalKind::PasswordExit => {
                if entered == self.config.exit_password {
                    self.surface.close_all_modals();
                    self.surface.open_modal(ModalKind::ConfirmExit);
                } else {
                    warn!("wrong exit password");
                    self.surface.password.error = true;
                }
            }
            ModalKind::ConfirmExit => {}
        }
    }

    pub fn request_exit(&mut self) {
        self.audio.play(Cue::Click);
        self.surface.open_modal(ModalKind::PasswordExit);
    }

    /// Confirmed exit. Best-effort: a failure while entering the shutdown
    /// sequence reverts the loading state instead of leaving the shell
    /// stuck.
    fn confirm_exit(&mut self) {
        if let Err(err) = self.begin_shutdown() {
            error!("exit sequence failed: {err:#}");
            self.audio.play(Cue::Error);
            self.surface.hide_loading();
        }
    }

    fn begin_shutdown(&mut self) -> Result<()> {
        self.audio.play(Cue::Shutdown);
        self.surface.show_loading();
        self.registry.flush()?;
        self.config.save()?;
        self.pending_exit = Some(Instant::now() + EXIT_DELAY);
        info!("exit confirmed, shutting down shortly");
        Ok(())
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        self.surface.expire(now);
        self.launcher.poll();

        if let Some(title) = self.launcher.take_pending_launch() {
            self.surface
                .notify("GAME STARTED", &title, NoticeKind::Info, LAUNCH_NOTICE);
        }
        if let Some(message) = self.launcher.take_pending_error() {
            self.audio.play(Cue::Error);
            self.surface
                .notify("LAUNCH FAILED", &message, NoticeKind::Error, LAUNCH_NOTICE);
        }

        if let Some(deadline) = self.pending_exit {
            if now >= deadline {
                info!("exit delay elapsed, shutting down");
                self.should_quit = true;
            }
        }
    }

    pub fn on_resize(&mut self, width: u16) {
        self.surface.set_term_width(width);
    }

    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            games_loaded: self.registry.len(),
            admin_mode: self.admin_mode,
            embedded_active: self.launcher.embedded_active(),
            audio_loaded: self.audio.is_loaded(),
            last_error: self.launcher.last_error().map(str::to_string),
        }
    }
}
