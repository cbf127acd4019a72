//! Status bar rendering with gate state and keybindings

use crate::analysis::Stage;
use crate::pipeline::PipelineState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn state_badge(state: PipelineState) -> (&'static str, Color) {
    match state {
        PipelineState::NotStarted => (" NOT STARTED ", DEFAULT_THEME.comment),
        PipelineState::LexicalOk => (" LEXICAL OK ", DEFAULT_THEME.primary),
        PipelineState::SyntaxOk => (" SYNTAX OK ", DEFAULT_THEME.success),
        PipelineState::SemanticDone => (" LOCKED ", DEFAULT_THEME.error),
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, state: PipelineState) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: gate state and last message
    let (badge, badge_color) = state_badge(state);
    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds, greyed out when the gate is closed
    let key_style = |enabled: bool| {
        let bg = if enabled {
            DEFAULT_THEME.comment
        } else {
            DEFAULT_THEME.disabled
        };
        Style::default().bg(bg).fg(Color::Black)
    };
    let desc_style = |enabled: bool| {
        let fg = if enabled {
            DEFAULT_THEME.fg
        } else {
            DEFAULT_THEME.disabled
        };
        Style::default().bg(DEFAULT_THEME.status_bg).fg(fg)
    };
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings = [
        ("o", "open", true),
        ("l", "lexical", state.can_run(Stage::Lexical)),
        ("s", "syntax", state.can_run(Stage::Syntax)),
        ("m", "semantic", state.can_run(Stage::Semantic)),
        ("r", "reset", true),
        ("c", "clear", true),
        ("q", "quit", true),
    ];

    let mut right_spans = Vec::new();
    for (idx, (key, desc, enabled)) in bindings.iter().enumerate() {
        if idx > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style(*enabled)));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style(*enabled)));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

/// Render the file path prompt in place of the status bar.
pub fn render_path_prompt(frame: &mut Frame, area: Rect, input: &str) {
    let spans = vec![
        Span::styled(
            " OPEN ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}█", input),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
        Span::styled(
            "   ↵ load  esc cancel",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}
