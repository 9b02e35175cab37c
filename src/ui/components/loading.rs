use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Fullscreen loading surface shown during the shutdown countdown.
/// Always rendered topmost.
pub struct LoadingScreen<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for LoadingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        Block::default()
            .style(Style::default().bg(colors.bg()))
            .render(area, buf);

        let middle = area.height / 2;
        let text_area = Rect::new(area.x, area.y + middle.saturating_sub(1), area.width, 3);
        let lines = vec![
            Line::from(Span::styled(
                self.message,
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "please wait...",
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}
