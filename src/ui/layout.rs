use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Fixed card metrics the grid is laid out with. Column derivation and
/// the rendered grid must agree on these.
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 9;
pub const CARD_GAP: u16 = 2;
/// Used when no layout signal is available at all.
pub const DEFAULT_COLUMNS: usize = 4;

/// Columns that fit the given width. May be zero; callers that need a
/// usable count go through `input::navigation::grid_columns`.
pub fn estimate_columns(width: u16) -> usize {
    (width / (CARD_WIDTH + CARD_GAP)) as usize
}

/// First visible row such that `selected_row` sits as close to the middle
/// of the viewport as the grid ends allow.
pub fn centered_first_row(selected_row: usize, total_rows: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || total_rows <= visible_rows {
        return 0;
    }
    selected_row
        .saturating_sub(visible_rows / 2)
        .min(total_rows - visible_rows)
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 44;
    const MIN_POPUP_HEIGHT: u16 = 9;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_columns() {
        let per_card = CARD_WIDTH + CARD_GAP;
        assert_eq!(estimate_columns(per_card * 4), 4);
        assert_eq!(estimate_columns(per_card - 1), 0);
        assert_eq!(estimate_columns(0), 0);
    }

    #[test]
    fn test_centered_first_row_small_grid_never_scrolls() {
        assert_eq!(centered_first_row(1, 2, 3), 0);
        assert_eq!(centered_first_row(0, 3, 3), 0);
    }

    #[test]
    fn test_centered_first_row_centers_and_clamps() {
        // 10 rows, 3 visible: selection centered where possible.
        assert_eq!(centered_first_row(0, 10, 3), 0);
        assert_eq!(centered_first_row(5, 10, 3), 4);
        assert_eq!(centered_first_row(9, 10, 3), 7);
    }

    #[test]
    fn test_centered_rect_stays_within_area() {
        let area = Rect::new(0, 0, 120, 40);
        let rect = centered_rect(50, 50, area);
        assert!(rect.x + rect.width <= area.width);
        assert!(rect.y + rect.height <= area.height);
    }
}
