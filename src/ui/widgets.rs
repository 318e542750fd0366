//! Shared widget helpers: themed blocks and the popups for menus and prompts.

use crate::config::Config;
use crate::core::formatter::truncate_to_width;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Block with the configured border shape and accent color.
pub fn themed_block<'a>(title: impl Into<Line<'a>>, config: &Config) -> Block<'a> {
    let mut block = Block::default().title(title);
    if config.display().borders() {
        block = block
            .borders(Borders::ALL)
            .border_type(config.display().border_type())
            .border_style(config.theme().accent_style());
    }
    block
}

/// Rect of `width_pct` percent of `area`'s width and `height` rows, centered.
pub fn centered_rect(area: Rect, width_pct: u16, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    let side = (100u16.saturating_sub(width_pct.min(100))) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(width_pct.min(100)),
            Constraint::Percentage(side),
        ])
        .split(vertical[1])[1]
}

/// Draws a choice list over whatever is already on screen.
pub fn draw_menu(frame: &mut Frame, title: &str, options: &[String], selected: usize, config: &Config) {
    let theme = config.theme();
    // two border rows plus a hint line
    let height = options.len() as u16 + 3;
    let area = centered_rect(frame.area(), 60, height);
    frame.render_widget(Clear, area);

    let block = themed_block(format!(" {} ", title), config)
        .borders(Borders::ALL)
        .title_bottom(Line::styled(" ↑↓ move • Enter choose • Esc back ", theme.muted_style()));
    let inner_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if idx == selected {
                theme.selection_icon()
            } else {
                " "
            };
            let label = truncate_to_width(option, inner_width.saturating_sub(marker.width() + 1));
            let style = if idx == selected {
                theme.selection_style()
            } else {
                theme.entry_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), theme.accent_style()),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !options.is_empty() {
        state.select(Some(selected.min(options.len() - 1)));
    }
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Draws a one-line text input with a visible cursor cell.
pub fn draw_prompt(frame: &mut Frame, title: &str, input: &str, config: &Config) {
    let theme = config.theme();
    let area = centered_rect(frame.area(), 60, 3);
    frame.render_widget(Clear, area);

    let block = themed_block(format!(" {} ", title), config).borders(Borders::ALL);
    let visible_width = area.width.saturating_sub(3) as usize;
    let shown = input_field_view(input, visible_width);

    let line = Line::from(vec![
        Span::styled(shown, theme.entry_style()),
        Span::styled("█", theme.accent_style()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Tail of `input` that fits in `visible_width` cells, so the cursor end stays visible.
fn input_field_view(input: &str, visible_width: usize) -> &str {
    if input.width() <= visible_width {
        return input;
    }
    let mut width = 0;
    let mut start = input.len();
    for (idx, ch) in input.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > visible_width {
            break;
        }
        width += w;
        start = idx;
    }
    &input[start..]
}

/// Style for the one-line status message.
pub fn status_style(is_error: bool, config: &Config) -> Style {
    if is_error {
        config.theme().error_style()
    } else {
        config.theme().accent_style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_view_keeps_the_tail() {
        assert_eq!(input_field_view("short", 10), "short");
        assert_eq!(input_field_view("abcdefghij", 4), "ghij");
        assert_eq!(input_field_view("", 0), "");
    }

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(area, 60, 10);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.width, 60);
        assert!(popup.x >= 20 && popup.y >= 15);
    }
}
