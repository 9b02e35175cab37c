use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Visibility toggle for the debug overlay. `show` while shown and `hide`
/// while hidden are no-ops.
pub struct DebugOverlay {
    visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }
}

/// Runtime counters the overlay displays. Collected by the shell at
/// render time.
pub struct DebugInfo {
    pub games_loaded: usize,
    pub admin_mode: bool,
    pub embedded_active: bool,
    pub audio_loaded: bool,
    pub last_error: Option<String>,
}

pub struct DebugOverlayWidget<'a> {
    info: &'a DebugInfo,
    theme: &'a Theme,
}

impl<'a> DebugOverlayWidget<'a> {
    pub fn new(info: &'a DebugInfo, theme: &'a Theme) -> Self {
        Self { info, theme }
    }
}

impl Widget for DebugOverlayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let width = 44.min(area.width);
        let height = 10.min(area.height);
        let overlay = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1,
            width,
            height,
        );

        Clear.render(overlay, buf);
        let block = Block::bordered()
            .title(" DEBUG (Ctrl+Shift+D to close) ")
            .border_style(Style::default().fg(colors.overlay_fg()))
            .style(
                Style::default()
                    .bg(colors.overlay_bg())
                    .fg(colors.overlay_fg()),
            );
        let inner = block.inner(overlay);
        block.render(overlay, buf);

        let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
        let info = self.info;
        let lines = vec![
            Line::from("System Status: OK"),
            Line::from(format!("Games Loaded: {}", info.games_loaded)),
            Line::from(format!("Admin Mode: {}", on_off(info.admin_mode))),
            Line::from(format!(
                "Embedded Game: {}",
                if info.embedded_active { "ACTIVE" } else { "INACTIVE" }
            )),
            Line::from(format!(
                "Audio Engine: {}",
                if info.audio_loaded { "LOADED" } else { "NOT LOADED" }
            )),
            Line::from(Span::styled(
                format!(
                    "Last Error: {}",
                    info.last_error.as_deref().unwrap_or("None")
                ),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
