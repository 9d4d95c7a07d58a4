use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalculatorLayout {
    pub display: Rect,
    pub keypad: Rect,
    pub status: Rect,
}

/// Vertical split: display pane (expression plus preview), keypad grid,
/// one-line status bar.
pub fn split_calculator_layout(area: Rect) -> CalculatorLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    CalculatorLayout {
        display: chunks[0],
        keypad: chunks[1],
        status: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_into_three_panes() {
        let area = Rect::new(0, 0, 60, 24);
        let panes = split_calculator_layout(area);

        assert_eq!(panes.display.height, 4);
        assert_eq!(panes.keypad.height, 19);
        assert_eq!(panes.status.height, 1);
        assert_eq!(panes.display.y, 0);
        assert_eq!(panes.keypad.y, 4);
        assert_eq!(panes.status.y, 23);
    }

    #[test]
    fn keypad_absorbs_extra_height() {
        let small = split_calculator_layout(Rect::new(0, 0, 60, 12));
        let large = split_calculator_layout(Rect::new(0, 0, 60, 40));
        assert!(large.keypad.height > small.keypad.height);
        assert_eq!(large.display.height, small.display.height);
        assert_eq!(large.status.height, small.status.height);
    }
}
