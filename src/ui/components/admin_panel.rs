use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::admin::{AdminMode, AdminState, EditField};
use crate::registry::Game;
use crate::ui::components::dialog::ConfirmDialog;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

pub struct AdminPanel<'a> {
    state: &'a AdminState,
    games: &'a [Game],
    theme: &'a Theme,
}

impl<'a> AdminPanel<'a> {
    pub fn new(state: &'a AdminState, games: &'a [Game], theme: &'a Theme) -> Self {
        Self {
            state,
            games,
            theme,
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        if self.games.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No games yet — press [a] to add one",
                Style::default().fg(colors.text_dim()),
            )))
            .render(layout[0], buf);
        } else {
            let mut lines = Vec::new();
            for (i, game) in self.games.iter().enumerate() {
                let is_selected = i == self.state.selected;
                let indicator = if is_selected { ">" } else { " " };
                let marker = if game.embedded { " [embedded]" } else { "" };
                let text = format!(
                    " {indicator} #{id:<3} {title:<24} {path}{marker}",
                    id = game.id,
                    title = game.title,
                    path = game.executable.display(),
                );
                lines.push(Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(if is_selected { colors.accent() } else { colors.fg() })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )));
            }
            Paragraph::new(lines).render(layout[0], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            " [a] Add  [e/Enter] Edit  [d] Delete  [Esc] Back to grid",
            Style::default().fg(colors.text_dim()),
        )))
        .render(layout[1], buf);
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let Some(ref form) = self.state.form else {
            return;
        };
        let colors = &self.theme.colors;

        let popup = centered_rect(60, 70, area);
        let title = if form.id.is_some() { " EDIT GAME " } else { " ADD GAME " };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::from("")];
        for field in EditField::ALL {
            let is_selected = field == form.field;
            let indicator = if is_selected { " > " } else { "   " };
            let value = form.value(field);
            let value = if is_selected && form.editing {
                format!("{value}▌")
            } else {
                value
            };

            lines.push(Line::from(Span::styled(
                format!("{indicator}{}:", field.label()),
                Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )));
            lines.push(Line::from(Span::styled(
                format!("     {value}"),
                Style::default().fg(if is_selected && form.editing {
                    colors.border_selected()
                } else {
                    colors.text_dim()
                }),
            )));
        }

        lines.push(Line::from(""));
        if let Some(ref error) = form.error {
            lines.push(Line::from(Span::styled(
                format!("   {error}"),
                Style::default().fg(colors.error()),
            )));
        }
        lines.push(Line::from(Span::styled(
            if form.editing {
                "   [Enter] Done  [Esc] Revert field"
            } else {
                "   [Enter] Edit field  [s] Save  [Esc] Discard"
            },
            Style::default().fg(colors.text_dim()),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for &AdminPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.mode {
            AdminMode::List => self.render_list(area, buf),
            AdminMode::Edit => {
                self.render_list(area, buf);
                self.render_form(area, buf);
            }
            AdminMode::ConfirmDelete => {
                self.render_list(area, buf);
                let title = self
                    .games
                    .get(self.state.selected)
                    .map(|g| g.title.clone())
                    .unwrap_or_default();
                let body = format!("Delete \"{title}\"? [y/n]");
                ConfirmDialog::new("DELETE GAME", &body, false, self.theme).render(area, buf);
            }
        }
    }
}
