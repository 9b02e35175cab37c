pub mod components;
pub mod layout;
pub mod surface;
pub mod theme;

pub use surface::SurfaceState;

/// Modal surfaces the shell can stack. At most one is interactive (the
/// top of the stack).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    /// Masked prompt for the admin password.
    PasswordAdmin,
    /// Masked prompt for the exit password.
    PasswordExit,
    /// Two-button exit confirmation.
    ConfirmExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}
