use crate::engine::{format_number, HistoryEntry};
use crate::ui::keypad::{KeypadCursor, KEYPAD};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Display pane: the human-facing expression, right-aligned, with the
/// best-effort live preview underneath. A too-long expression keeps its tail
/// visible, since that is where editing happens.
pub fn render_display(
    frame: &mut Frame<'_>,
    area: Rect,
    theme: &Theme,
    expression: &str,
    preview: &str,
) {
    if area.height == 0 || area.width <= 2 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .style(theme.display_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let expression_line = Rect::new(inner.x, inner.y, inner.width, 1);
    frame.render_widget(
        Paragraph::new(tail_to_display_width(expression, width))
            .style(theme.display_style())
            .alignment(Alignment::Right),
        expression_line,
    );

    if inner.height > 1 && !preview.is_empty() {
        let preview_line = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        frame.render_widget(
            Paragraph::new(tail_to_display_width(preview, width))
                .style(theme.preview_style())
                .alignment(Alignment::Right),
            preview_line,
        );
    }
}

/// Keypad grid. Each key renders as one centered cell; the focused cell is
/// highlighted with the theme's focus colors.
pub fn render_keypad(frame: &mut Frame<'_>, area: Rect, theme: &Theme, cursor: KeypadCursor) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let rows = KEYPAD.len() as u16;
    let row_height = (area.height / rows).max(1);

    for (row_index, row) in KEYPAD.iter().enumerate() {
        let y = area.y + row_index as u16 * row_height;
        if y >= area.y + area.height {
            break;
        }
        let cols = row.len() as u16;
        let cell_width = (area.width / cols).max(1);

        for (col_index, key) in row.iter().enumerate() {
            let x = area.x + col_index as u16 * cell_width;
            if x >= area.x + area.width {
                break;
            }
            let cell = Rect::new(
                x,
                y,
                cell_width.min(area.x + area.width - x),
                row_height.min(area.y + area.height - y),
            );
            let focused = cursor.row == row_index && cursor.col == col_index;
            let label_row = cell.y + cell.height / 2;
            let label_area = Rect::new(cell.x, label_row, cell.width, 1);

            frame.render_widget(
                Paragraph::new("").style(theme.key_style(focused)),
                cell,
            );
            frame.render_widget(
                Paragraph::new(key.label)
                    .style(theme.key_style(focused))
                    .alignment(Alignment::Center),
                label_area,
            );
        }
    }
}

pub fn render_status_line(frame: &mut Frame<'_>, area: Rect, theme: &Theme, status: &str) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let text = truncate_line(status, area.width as usize);
    frame.render_widget(Paragraph::new(text).style(theme.status_style()), area);
}

/// Centered popup listing the calculation history, newest entry last.
pub fn render_history_overlay(
    frame: &mut Frame<'_>,
    theme: &Theme,
    entries: &[HistoryEntry],
    scroll: usize,
) {
    let size = frame.area();
    let width = size.width.clamp(30, 64);
    let height = size.height.clamp(8, 18);
    let x = size.x + (size.width.saturating_sub(width)) / 2;
    let y = size.y + (size.height.saturating_sub(height)) / 2;
    let area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("History")
        .style(Style::default().fg(theme.overlay_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let mut lines = Vec::new();
    if entries.is_empty() {
        lines.push(Line::from("no calculations yet"));
    } else {
        let visible = inner.height.saturating_sub(1) as usize;
        let scroll = scroll.min(entries.len().saturating_sub(1));
        for entry in entries.iter().skip(scroll).take(visible.max(1)) {
            let text = format!("{} = {}", entry.expression, format_number(entry.value));
            lines.push(Line::from(truncate_line(&text, inner.width as usize)));
        }
    }
    lines.push(Line::from("\u{2191}/\u{2193} scroll   esc close"));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(theme.overlay_fg)),
        inner,
    );
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Keep the trailing characters that fit within `max_width` columns.
pub fn tail_to_display_width(text: &str, max_width: usize) -> String {
    let mut kept: Vec<char> = Vec::new();
    let mut used = 0usize;
    for ch in text.chars().rev() {
        let ch_width = char_display_width(ch);
        if used + ch_width > max_width {
            break;
        }
        kept.push(ch);
        used += ch_width;
    }
    kept.into_iter().rev().collect()
}

fn truncate_line(input: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::new();
    let mut used = 0usize;

    for ch in input.chars() {
        let ch_width = char_display_width(ch);
        if used + ch_width > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}
