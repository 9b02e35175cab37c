//! Presentation-side state the input dispatcher manipulates through the
//! `Surface` trait: the modal stack, transient notices, loading and flash
//! overlays, and the layout feedback grid navigation reads back.

use std::time::{Duration, Instant};

use crate::input::dispatcher::Surface;

use super::{ModalKind, NoticeKind};

pub struct Notice {
    pub title: String,
    pub body: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Text entry state for the password modals. Reset whenever a password
/// modal opens so a cancelled attempt never leaks into the next one.
#[derive(Default)]
pub struct PasswordEntry {
    pub input: String,
    pub error: bool,
}

pub struct SurfaceState {
    modals: Vec<ModalKind>,
    pub notices: Vec<Notice>,
    pub password: PasswordEntry,
    /// Which confirm-dialog button is selected.
    pub confirm_yes: bool,
    loading: bool,
    flash_until: Option<Instant>,
    scroll_target: Option<usize>,
    grid_columns: Option<usize>,
    term_width: Option<u16>,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self {
            modals: Vec::new(),
            notices: Vec::new(),
            password: PasswordEntry::default(),
            confirm_yes: false,
            loading: false,
            flash_until: None,
            scroll_target: None,
            grid_columns: None,
            term_width: None,
        }
    }

    /// The interactive modal, if any.
    pub fn active_modal(&self) -> Option<ModalKind> {
        self.modals.last().copied()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn flash_active(&self) -> bool {
        self.flash_until.is_some()
    }

    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    /// The card grid reports how many columns it actually laid out, which
    /// becomes the authoritative signal for vertical navigation.
    pub fn record_grid_layout(&mut self, columns: usize) {
        self.grid_columns = Some(columns.max(1));
    }

    pub fn set_term_width(&mut self, width: u16) {
        self.term_width = Some(width);
    }

    /// Drop expired notices and a finished flash. Called each tick.
    pub fn expire(&mut self, now: Instant) {
        self.notices.retain(|notice| notice.expires_at > now);
        if self.flash_until.is_some_and(|until| now >= until) {
            self.flash_until = None;
        }
    }
}

impl Surface for SurfaceState {
    fn modal_open(&self) -> bool {
        !self.modals.is_empty()
    }

    fn open_modal(&mut self, kind: ModalKind) {
        if self.modals.contains(&kind) {
            return;
        }
        match kind {
            ModalKind::PasswordAdmin | ModalKind::PasswordExit => {
                self.password = PasswordEntry::default();
            }
            ModalKind::ConfirmExit => {
                self.confirm_yes = false;
            }
        }
        self.modals.push(kind);
    }

    fn close_all_modals(&mut self) {
        self.modals.clear();
        self.password = PasswordEntry::default();
    }

    fn notify(&mut self, title: &str, body: &str, kind: NoticeKind, duration: Duration) {
        self.notices.push(Notice {
            title: title.to_string(),
            body: body.to_string(),
            kind,
            expires_at: Instant::now() + duration,
        });
    }

    fn show_loading(&mut self) {
        self.loading = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn flash(&mut self, duration: Duration) {
        self.flash_until = Some(Instant::now() + duration);
    }

    fn scroll_to(&mut self, index: usize) {
        self.scroll_target = Some(index);
    }

    fn grid_columns(&self) -> Option<usize> {
        self.grid_columns
    }

    fn width(&self) -> Option<u16> {
        self.term_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_password_modal_resets_entry() {
        let mut surface = SurfaceState::new();
        surface.password.input = "stale".to_string();
        surface.password.error = true;
        surface.open_modal(ModalKind::PasswordAdmin);
        assert!(surface.password.input.is_empty());
        assert!(!surface.password.error);
        assert_eq!(surface.active_modal(), Some(ModalKind::PasswordAdmin));
    }

    #[test]
    fn test_open_modal_is_idempotent_per_kind() {
        let mut surface = SurfaceState::new();
        surface.open_modal(ModalKind::PasswordExit);
        surface.open_modal(ModalKind::PasswordExit);
        surface.close_all_modals();
        assert!(!surface.modal_open());
    }

    #[test]
    fn test_expire_drops_finished_notices_and_flash() {
        let mut surface = SurfaceState::new();
        surface.notify("a", "b", NoticeKind::Info, Duration::from_millis(10));
        surface.flash(Duration::from_millis(10));
        assert!(surface.flash_active());

        surface.expire(Instant::now() + Duration::from_millis(50));
        assert!(surface.notices.is_empty());
        assert!(!surface.flash_active());
    }

    #[test]
    fn test_expire_keeps_live_notices() {
        let mut surface = SurfaceState::new();
        surface.notify("a", "b", NoticeKind::Success, Duration::from_secs(60));
        surface.expire(Instant::now());
        assert_eq!(surface.notices.len(), 1);
    }
}
