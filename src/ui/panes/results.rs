//! Stage output pane rendering

use crate::report::{ReportLine, Tone};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Normal => Style::default().fg(DEFAULT_THEME.fg),
        Tone::Muted => Style::default().fg(DEFAULT_THEME.comment),
        Tone::Success => Style::default().fg(DEFAULT_THEME.success),
        Tone::Failure => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    }
}

/// Render the output of one analysis stage.
///
/// `placeholder` is shown while the stage has not produced anything yet.
pub fn render_results_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[ReportLine],
    placeholder: &str,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    if lines.is_empty() {
        let paragraph = Paragraph::new(placeholder)
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));

    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line.text.as_str()).style(tone_style(line.tone)))
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
