//! Per-keystroke arbitration between secret-sequence detection, the debug
//! overlay toggle, and primary grid navigation.
//!
//! The dispatcher owns the navigation and detector state and talks to the
//! rest of the shell through the four collaborator traits below, so the
//! whole state machine can be driven in tests with in-memory fakes.

use std::time::Duration;

use crate::audio::Cue;
use crate::registry::{Game, GameId};
use crate::ui::components::debug_overlay::DebugOverlay;
use crate::ui::{ModalKind, NoticeKind};

use super::navigation::{self, Direction, NavState};
use super::secret::SecretDetector;
use super::{Key, KeyPress};

const KONAMI_NOTICE: Duration = Duration::from_millis(5000);
const KONAMI_FLASH: Duration = Duration::from_millis(2000);

/// Game lookup, by id and in card order.
pub trait Catalog {
    fn game(&self, id: GameId) -> Option<&Game>;
    fn games(&self) -> &[Game];
}

/// Modal, notification, loading and layout surface of the shell.
pub trait Surface {
    fn modal_open(&self) -> bool;
    fn open_modal(&mut self, kind: ModalKind);
    fn close_all_modals(&mut self);
    fn notify(&mut self, title: &str, body: &str, kind: NoticeKind, duration: Duration);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn flash(&mut self, duration: Duration);
    fn scroll_to(&mut self, index: usize);
    /// Column count the card grid laid out at the last render, if any.
    fn grid_columns(&self) -> Option<usize>;
    /// Current terminal width in cells, if known.
    fn width(&self) -> Option<u16>;
}

/// Audio feedback cues.
pub trait Feedback {
    fn play(&mut self, cue: Cue);
    fn set_volume(&mut self, volume: f32);
}

/// Process launch orchestration.
pub trait Orchestrator {
    fn embedded_active(&self) -> bool;
    fn minimize_embedded(&mut self);
    fn select_game(&mut self, game: &Game);
}

/// Borrowed collaborator bundle handed to the dispatcher per event.
pub struct Shell<'a> {
    pub catalog: &'a dyn Catalog,
    pub surface: &'a mut dyn Surface,
    pub audio: &'a mut dyn Feedback,
    pub launcher: &'a mut dyn Orchestrator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Handled here; the host loop must not route the event any further.
    Consumed,
    /// Not ours; the active screen or modal may still use it.
    Passed,
}

pub struct Dispatcher {
    nav: NavState,
    secret: SecretDetector,
    debug: DebugOverlay,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            nav: NavState::new(),
            secret: SecretDetector::new(),
            debug: DebugOverlay::new(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.nav.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.nav.select(index);
    }

    pub fn debug_overlay(&self) -> &DebugOverlay {
        &self.debug
    }

    pub fn sequence_len(&self) -> usize {
        self.secret.len()
    }

    /// Full pipeline for the grid screen.
    pub fn handle_key(&mut self, press: &KeyPress, shell: &mut Shell<'_>) -> Outcome {
        if self.observe_global(press, shell) == Outcome::Consumed {
            return Outcome::Consumed;
        }

        // Escape stays live while navigation is suspended: it is the only
        // way back from a modal or an embedded game.
        if press.key == Key::Escape {
            shell.surface.close_all_modals();
            if shell.launcher.embedded_active() {
                shell.launcher.minimize_embedded();
            }
            return Outcome::Consumed;
        }

        if shell.launcher.embedded_active() {
            return Outcome::Passed;
        }
        if shell.surface.modal_open() {
            return Outcome::Passed;
        }

        match press.key {
            Key::Up => self.navigate(Direction::Up, shell),
            Key::Down => self.navigate(Direction::Down, shell),
            Key::Left => self.navigate(Direction::Left, shell),
            Key::Right => self.navigate(Direction::Right, shell),
            Key::Enter => {
                self.activate_selected(shell);
                Outcome::Consumed
            }
            _ => Outcome::Passed,
        }
    }

    /// Only the globally-active steps: secret sequences and the debug
    /// toggle. Screens that own their key handling (admin panel) still
    /// route every event through here first.
    pub fn observe_global(&mut self, press: &KeyPress, shell: &mut Shell<'_>) -> Outcome {
        let observed = self.secret.observe(press);
        if observed.konami {
            self.activate_konami(shell);
        }
        if observed.admin_chord {
            shell.audio.play(Cue::Click);
            shell.surface.open_modal(ModalKind::PasswordAdmin);
            return Outcome::Consumed;
        }

        if press.ctrl && press.shift && matches!(press.key, Key::Char(ch) if ch.eq_ignore_ascii_case(&'d'))
        {
            self.debug.toggle();
            return Outcome::Consumed;
        }

        Outcome::Passed
    }

    fn navigate(&mut self, direction: Direction, shell: &mut Shell<'_>) -> Outcome {
        let count = shell.catalog.games().len();
        let columns =
            navigation::grid_columns(shell.surface.grid_columns(), shell.surface.width());

        // Selection change, centered scroll and the hover cue are one
        // atomic step: all of them or none.
        if let Some(next) = self.nav.advance(direction, count, columns) {
            shell.surface.scroll_to(next);
            shell.audio.play(Cue::Hover);
        }
        Outcome::Consumed
    }

    fn activate_selected(&mut self, shell: &mut Shell<'_>) {
        let Some(index) = self.nav.selected() else {
            return;
        };
        let catalog = shell.catalog;
        let Some(card) = catalog.games().get(index) else {
            return;
        };
        if let Some(game) = catalog.game(card.id) {
            shell.launcher.select_game(game);
        }
    }

    fn activate_konami(&mut self, shell: &mut Shell<'_>) {
        shell.audio.play(Cue::Success);
        shell.surface.notify(
            "KONAMI CODE ACTIVATED!",
            "You found the secret! Extra sound effects enabled.",
            NoticeKind::Success,
            KONAMI_NOTICE,
        );
        shell.audio.set_volume(1.0);
        shell.surface.flash(KONAMI_FLASH);
    }
}
