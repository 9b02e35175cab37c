use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::surface::Notice;
use crate::ui::theme::Theme;
use crate::ui::NoticeKind;

const NOTICE_WIDTH: u16 = 46;
const NOTICE_HEIGHT: u16 = 4;

/// Transient toasts stacked in the top-right corner, newest on top.
pub struct Notifications<'a> {
    notices: &'a [Notice],
    theme: &'a Theme,
}

impl<'a> Notifications<'a> {
    pub fn new(notices: &'a [Notice], theme: &'a Theme) -> Self {
        Self { notices, theme }
    }
}

impl Widget for Notifications<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let width = NOTICE_WIDTH.min(area.width);

        for (slot, notice) in self.notices.iter().rev().enumerate() {
            let y = area.y + 1 + slot as u16 * (NOTICE_HEIGHT + 1);
            if y + NOTICE_HEIGHT > area.y + area.height {
                break;
            }
            let rect = Rect::new(
                area.x + area.width.saturating_sub(width + 1),
                y,
                width,
                NOTICE_HEIGHT,
            );

            let border = match notice.kind {
                NoticeKind::Info => colors.accent(),
                NoticeKind::Success => colors.success(),
                NoticeKind::Error => colors.error(),
            };

            Clear.render(rect, buf);
            let block = Block::bordered()
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg()));
            let inner = block.inner(rect);
            block.render(rect, buf);

            let lines = vec![
                Line::from(Span::styled(
                    notice.title.clone(),
                    Style::default().fg(border).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    notice.body.clone(),
                    Style::default().fg(colors.fg()),
                )),
            ];
            Paragraph::new(lines).render(inner, buf);
        }
    }
}
