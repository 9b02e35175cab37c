//! Arrow-key navigation over the row-major card grid.

use crate::ui::layout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Number of columns in the rendered grid.
///
/// Prefers the count the grid actually laid out at the last render. Without
/// that, estimates from the terminal width and the fixed card metrics. A
/// non-positive estimate or a missing width degrades to the default rather
/// than failing.
pub fn grid_columns(reported: Option<usize>, terminal_width: Option<u16>) -> usize {
    if let Some(columns) = reported {
        if columns >= 1 {
            return columns;
        }
    }
    if let Some(width) = terminal_width {
        let estimate = (width / (layout::CARD_WIDTH + layout::CARD_GAP)) as usize;
        if estimate >= 1 {
            return estimate;
        }
    }
    layout::DEFAULT_COLUMNS
}

/// Which card is selected, if any. Exactly zero or one card is selected at
/// all times; the grid renders selection styling from this index alone.
pub struct NavState {
    selected: Option<usize>,
}

impl NavState {
    pub fn new() -> Self {
        Self { selected: None }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Explicit selection, e.g. after the card list shrinks.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Move the selection one step. Returns the new index, or `None` when
    /// the grid is empty (no-op). With no current selection, any direction
    /// selects index 0.
    pub fn advance(
        &mut self,
        direction: Direction,
        card_count: usize,
        columns: usize,
    ) -> Option<usize> {
        if card_count == 0 {
            return None;
        }
        let columns = columns.max(1);

        let next = match self.selected {
            None => 0,
            Some(current) => {
                let current = current.min(card_count - 1);
                match direction {
                    Direction::Left => {
                        if current > 0 {
                            current - 1
                        } else {
                            card_count - 1
                        }
                    }
                    Direction::Right => {
                        if current + 1 < card_count {
                            current + 1
                        } else {
                            0
                        }
                    }
                    Direction::Up => {
                        if current >= columns {
                            current - columns
                        } else {
                            // Wrap to the last row, keeping the column
                            // offset; step back one row if that lands past
                            // the end of a partial row.
                            let mut index =
                                (card_count - 1) / columns * columns + current % columns;
                            if index > card_count - 1 {
                                index -= columns;
                            }
                            index
                        }
                    }
                    Direction::Down => {
                        let index = current + columns;
                        if index < card_count {
                            index
                        } else {
                            current % columns
                        }
                    }
                }
            }
        };

        self.selected = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(start: Option<usize>, direction: Direction, count: usize, cols: usize) -> Option<usize> {
        let mut nav = NavState::new();
        nav.select(start);
        nav.advance(direction, count, cols)
    }

    #[test]
    fn test_empty_grid_is_a_noop() {
        let mut nav = NavState::new();
        assert_eq!(nav.advance(Direction::Down, 0, 4), None);
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn test_no_selection_selects_first() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(advanced(None, direction, 8, 4), Some(0));
        }
    }

    #[test]
    fn test_left_right_wrap() {
        assert_eq!(advanced(Some(0), Direction::Left, 8, 4), Some(7));
        assert_eq!(advanced(Some(7), Direction::Right, 8, 4), Some(0));
        assert_eq!(advanced(Some(3), Direction::Left, 8, 4), Some(2));
        assert_eq!(advanced(Some(3), Direction::Right, 8, 4), Some(4));
    }

    #[test]
    fn test_left_then_right_is_identity() {
        for count in [1, 2, 5, 8, 9] {
            for start in 0..count {
                let mut nav = NavState::new();
                nav.select(Some(start));
                nav.advance(Direction::Left, count, 4);
                nav.advance(Direction::Right, count, 4);
                assert_eq!(nav.selected(), Some(start), "count={count} start={start}");

                nav.advance(Direction::Right, count, 4);
                nav.advance(Direction::Left, count, 4);
                assert_eq!(nav.selected(), Some(start), "count={count} start={start}");
            }
        }
    }

    #[test]
    fn test_down_wraps_to_same_column() {
        assert_eq!(advanced(Some(0), Direction::Down, 8, 4), Some(4));
        assert_eq!(advanced(Some(4), Direction::Down, 8, 4), Some(0));
        assert_eq!(advanced(Some(6), Direction::Down, 8, 4), Some(2));
    }

    #[test]
    fn test_up_wraps_to_last_row_same_column() {
        assert_eq!(advanced(Some(0), Direction::Up, 8, 4), Some(4));
        // Partial last row: column 3 has no card in the last row, so the
        // wrap steps back one full row.
        assert_eq!(advanced(Some(3), Direction::Up, 6, 4), Some(3));
        assert_eq!(advanced(Some(1), Direction::Up, 6, 4), Some(5));
    }

    #[test]
    fn test_grid_columns_prefers_reported() {
        assert_eq!(grid_columns(Some(3), Some(200)), 3);
    }

    #[test]
    fn test_grid_columns_estimates_from_width() {
        let per_card = layout::CARD_WIDTH + layout::CARD_GAP;
        assert_eq!(grid_columns(None, Some(per_card * 5)), 5);
        assert_eq!(grid_columns(None, Some(per_card)), 1);
    }

    #[test]
    fn test_grid_columns_defaults_when_unknown() {
        assert_eq!(grid_columns(None, None), layout::DEFAULT_COLUMNS);
        // Width too small for a single card still falls back to the default.
        assert_eq!(grid_columns(None, Some(0)), layout::DEFAULT_COLUMNS);
        assert_eq!(grid_columns(Some(0), None), layout::DEFAULT_COLUMNS);
    }
}
