pub mod admin_panel;
pub mod card_grid;
pub mod debug_overlay;
pub mod dialog;
pub mod loading;
pub mod notification;
