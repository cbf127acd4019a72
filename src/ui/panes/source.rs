//! Source pane rendering with category highlighting
//!
//! Each word run and punctuation character is colored by the same classifier
//! the lexical pass uses, so the highlighting never disagrees with the token
//! list. Lines that produced a diagnostic get a marker in the gutter.

use crate::analysis::lexer::is_word_char;
use crate::analysis::token::{classify, TokenCategory};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Why a source line is flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMark {
    /// Holds the unexpected token that stopped the lexical pass
    Unexpected,
    /// First line rejected by the syntax pass
    InvalidSyntax,
    /// Assignment whose value does not fit its type
    TypeMismatch,
}

fn category_style(category: TokenCategory) -> Style {
    match category {
        TokenCategory::Keyword => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenCategory::Operator | TokenCategory::Delimiter | TokenCategory::AssignmentOperator => {
            Style::default().fg(DEFAULT_THEME.operator)
        }
        TokenCategory::BooleanLiteral => Style::default().fg(DEFAULT_THEME.boolean),
        TokenCategory::NumberLiteral => Style::default().fg(DEFAULT_THEME.number),
        TokenCategory::Identifier => Style::default().fg(DEFAULT_THEME.identifier),
        TokenCategory::Unexpected => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
    }
}

/// Split a line into styled spans, keeping whitespace as-is.
fn highlight_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(ch) = rest.chars().next() {
        let len = if is_word_char(ch) {
            rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len())
        } else {
            ch.len_utf8()
        };
        let (piece, tail) = rest.split_at(len);

        if ch.is_whitespace() {
            spans.push(Span::raw(piece));
        } else {
            spans.push(Span::styled(piece, category_style(classify(piece))));
        }
        rest = tail;
    }

    Line::from(spans)
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    source_name: Option<&str>,
    marks: &FxHashMap<usize, LineMark>,
    scroll_offset: &mut usize,
) {
    let title = match source_name {
        Some(name) => format!(" Source: {} ", name),
        None => " Source ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    if source_code.is_empty() {
        let paragraph = Paragraph::new("(no source loaded; press 'o' to open a file)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let mark = marks.get(&line_num).copied();

            let (marker, num_style) = match mark {
                Some(LineMark::InvalidSyntax) => (
                    "✗",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(LineMark::TypeMismatch) => (
                    "≠",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(LineMark::Unexpected) => (
                    "?",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                None => (" ", Style::default().fg(DEFAULT_THEME.comment)),
            };

            let mut content_line = highlight_line(line);
            if mark == Some(LineMark::InvalidSyntax) {
                // Whole rejected line in error colors
                for span in &mut content_line.spans {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(ratatui::style::Color::Black);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{}{:4} ", marker, line_num), num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
