use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::registry::Game;
use crate::ui::layout::{self, CARD_GAP, CARD_HEIGHT, CARD_WIDTH};
use crate::ui::theme::Theme;

/// The card grid: games laid out row-major, selected card highlighted,
/// selection kept in a centered scroll window.
pub struct CardGrid<'a> {
    games: &'a [Game],
    selected: Option<usize>,
    columns: usize,
    flash: bool,
    theme: &'a Theme,
}

impl<'a> CardGrid<'a> {
    pub fn new(games: &'a [Game], selected: Option<usize>, columns: usize, theme: &'a Theme) -> Self {
        Self {
            games,
            selected,
            columns: columns.max(1),
            flash: false,
            theme,
        }
    }

    pub fn flash(mut self, flash: bool) -> Self {
        self.flash = flash;
        self
    }

    fn render_card(&self, game: &Game, selected: bool, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border_color = if self.flash {
            colors.warning()
        } else if selected {
            colors.border_selected()
        } else {
            colors.border()
        };
        let border_type = if selected {
            BorderType::Double
        } else {
            BorderType::Rounded
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title_color = if selected { colors.fg() } else { colors.card_title() };
        let exe_name = game
            .executable
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                game.title.clone(),
                Style::default()
                    .fg(title_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                exe_name,
                Style::default().fg(colors.text_dim()),
            )),
        ];
        if game.embedded {
            lines.push(Line::from(Span::styled(
                "embedded",
                Style::default().fg(colors.accent_dim()),
            )));
        }
        if selected {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "▶ ENTER TO PLAY",
                Style::default()
                    .fg(colors.border_selected())
                    .add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

impl Widget for &CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.games.is_empty() {
            let colors = &self.theme.colors;
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No games installed",
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press Ctrl+Alt+A to open the admin panel",
                    Style::default().fg(colors.text_dim()),
                )),
            ])
            .alignment(Alignment::Center);
            empty.render(area, buf);
            return;
        }

        let columns = self.columns;
        let row_height = CARD_HEIGHT + 1;
        let total_rows = self.games.len().div_ceil(columns);
        let visible_rows = ((area.height / row_height) as usize).max(1);

        let selected_row = self.selected.unwrap_or(0) / columns;
        let first_row = layout::centered_first_row(selected_row, total_rows, visible_rows);

        // Center the used width inside the area.
        let used_width = columns as u16 * (CARD_WIDTH + CARD_GAP) - CARD_GAP;
        let x0 = area.x + area.width.saturating_sub(used_width) / 2;

        for (index, game) in self.games.iter().enumerate() {
            let row = index / columns;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let col = index % columns;

            let x = x0 + col as u16 * (CARD_WIDTH + CARD_GAP);
            let y = area.y + (row - first_row) as u16 * row_height;
            if x + CARD_WIDTH > area.x + area.width || y + CARD_HEIGHT > area.y + area.height {
                continue;
            }

            let card_area = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT);
            self.render_card(game, self.selected == Some(index), card_area, buf);
        }
    }
}
