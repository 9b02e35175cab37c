use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

/// Masked password prompt. The entered text lives in the surface state;
/// this widget only renders it.
pub struct PasswordPrompt<'a> {
    title: &'a str,
    entered: usize,
    error: bool,
    theme: &'a Theme,
}

impl<'a> PasswordPrompt<'a> {
    pub fn new(title: &'a str, entered: usize, error: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            entered,
            error,
            theme,
        }
    }
}

impl Widget for PasswordPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let popup = centered_rect(40, 25, area);

        Clear.render(popup, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let masked: String = "*".repeat(self.entered);
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Enter password:",
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                format!("[ {masked:<16} ]"),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if self.error {
            lines.push(Line::from(Span::styled(
                "Wrong password, try again",
                Style::default().fg(colors.error()),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "[Enter] Submit   [Esc] Cancel",
            Style::default().fg(colors.text_dim()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

/// Two-button confirmation dialog.
pub struct ConfirmDialog<'a> {
    title: &'a str,
    body: &'a str,
    yes_selected: bool,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, body: &'a str, yes_selected: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            body,
            yes_selected,
            theme,
        }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let popup = centered_rect(40, 25, area);

        Clear.render(popup, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let button = |label: &str, selected: bool| {
            let style = if selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.border_selected())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_dim())
            };
            Span::styled(format!("[ {label} ]"), style)
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.body, Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(vec![
                button("YES", self.yes_selected),
                Span::raw("   "),
                button("NO", !self.yes_selected),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "[←/→] Choose   [Enter] Confirm   [Esc] Cancel",
                Style::default().fg(colors.text_dim()),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
