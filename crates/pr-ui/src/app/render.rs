//! Render functions

use super::state::{AppMode, AppState, Reviewer};
use crate::highlight::Highlighter;
use crate::layout::{centered_rect, ReviewLayout};
use crate::theme::Theme;
use pr_core::record::Record;
use pr_core::session::{Decision, ReviewSession};
use ratatui::{prelude::*, widgets::*};

/// Draw the whole screen for the current mode
pub(super) fn render(frame: &mut Frame, reviewer: &Reviewer, highlighter: &Highlighter, theme: &Theme) {
    let area = frame.area();
    let state = &reviewer.state;

    let mode = match state.mode {
        AppMode::Help => state.help_return,
        mode => mode,
    };

    match (mode, reviewer.session()) {
        (AppMode::Review, Some(session)) => {
            render_review(frame, area, state, session, highlighter, theme)
        }
        (AppMode::Complete, Some(session)) => {
            render_complete(frame, area, state, session, theme)
        }
        _ => render_select_start(frame, area, state, reviewer.record_count(), theme),
    }

    if state.mode == AppMode::Help {
        render_help(frame, area, theme);
    }
}

fn render_select_start(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    record_count: usize,
    theme: &Theme,
) {
    let popup = centered_rect(60, 40, area);
    let block = Block::default()
        .title(" Prompt Reviewer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.focus_border));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let intro = format!(
        "{} records loaded. Enter starting record index (0-based, 0..={}):",
        record_count,
        record_count.saturating_sub(1)
    );
    frame.render_widget(Paragraph::new(intro).wrap(Wrap { trim: true }), chunks[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.focus_border));
    let input_inner = input_block.inner(chunks[1]);
    frame.render_widget(
        Paragraph::new(state.index_input.as_str()).block(input_block),
        chunks[1],
    );
    let cursor_x = input_inner
        .x
        .saturating_add(state.index_input.as_str().len() as u16)
        .min(input_inner.right().saturating_sub(1));
    frame.set_cursor_position((cursor_x, input_inner.y));

    let mut lines = vec![Line::from(Span::styled(
        "Enter confirm  ↑/↓ adjust  q quit",
        Style::default().fg(theme.muted),
    ))];
    if let Some(msg) = &state.message {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            message_style(state, theme),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[2]);
}

fn render_review(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &ReviewSession,
    highlighter: &Highlighter,
    theme: &Theme,
) {
    let layout = ReviewLayout::new(area);
    let Some(record) = session.current_record() else {
        return;
    };
    let position = session.state().cursor() + 1;
    let total = session.state().len();

    let header = Line::from(vec![
        Span::styled(" Prompt Reviewer ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("| Prompt {} / {}", position, total)),
    ]);
    frame.render_widget(Paragraph::new(header), layout.header);

    if state.show_raw {
        render_raw_record(frame, layout.body, record, highlighter, theme);
    } else {
        render_prompt(frame, layout.body, record, theme);
    }

    render_preview(frame, layout.preview, record, theme);
    render_actions(frame, layout.actions, theme);
    render_status_bar(frame, layout.status, state, session, theme);
}

fn render_prompt(frame: &mut Frame, area: Rect, record: &Record, theme: &Theme) {
    let style = if record.has_prompt() {
        Style::default()
    } else {
        Style::default().fg(theme.muted)
    };
    frame.render_widget(
        Paragraph::new(record.prompt().into_owned())
            .style(style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Prompt ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.focus_border)),
            ),
        area,
    );
}

fn render_raw_record(
    frame: &mut Frame,
    area: Rect,
    record: &Record,
    highlighter: &Highlighter,
    theme: &Theme,
) {
    let lines = match record.to_pretty_json() {
        Ok(json) => highlighter.highlight_json(&json),
        Err(e) => vec![Line::from(format!("Cannot render record: {}", e))],
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Record (r to close) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.focus_border)),
        ),
        area,
    );
}

fn render_preview(frame: &mut Frame, area: Rect, record: &Record, theme: &Theme) {
    let content = match record.preview_url() {
        Some(url) => Line::from(url.to_string()),
        None => Line::from(Span::styled(
            "No preview URL available.",
            Style::default().fg(theme.muted),
        )),
    };
    frame.render_widget(
        Paragraph::new(content).block(
            Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.unfocus_border)),
        ),
        area,
    );
}

fn render_actions(frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans = Vec::new();
    for (key, decision) in [('k', Decision::Keep), ('d', Decision::Discard), ('s', Decision::Skip)] {
        spans.push(Span::styled(
            format!(" [{}] {} ", key, decision.action_label()),
            Style::default()
                .fg(theme.decision_color(decision))
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        " [e] Export  [r] Raw  [?] Help  [q] Quit",
        Style::default().fg(theme.muted),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_complete(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &ReviewSession,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let summary = session.summary();
    let mut lines = vec![
        Line::from(Span::styled(
            "Review complete!",
            Style::default()
                .fg(theme.kept)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for decision in Decision::ALL {
        lines.push(Line::from(Span::styled(
            format!(
                "Total {}: {}",
                decision.bucket_label(),
                summary.count(decision)
            ),
            Style::default().fg(theme.decision_color(decision)),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Buckets saved to {}", session.store_location()),
        Style::default().fg(theme.muted),
    )));
    lines.push(Line::from(Span::styled(
        "[e] Export  [w] Save again  [q] Quit",
        Style::default().fg(theme.muted),
    )));

    let popup = centered_rect(60, 60, chunks[0]);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Done ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.focus_border)),
        ),
        popup,
    );
    render_status_bar(frame, chunks[1], state, session, theme);
}

fn message_style(state: &AppState, theme: &Theme) -> Style {
    if state.message_is_warning {
        Style::default().fg(theme.warning)
    } else {
        Style::default()
    }
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &ReviewSession,
    theme: &Theme,
) {
    let summary = session.summary();
    let counts = format!(
        " kept {} | discarded {} | skipped {} | {} ",
        summary.kept,
        summary.discarded,
        summary.skipped,
        &summary.id.as_str()[..14.min(summary.id.as_str().len())]
    );

    let text = match &state.message {
        Some(msg) => format!(" {} |{}", msg, counts),
        None => counts,
    };

    let style = if state.message_is_warning {
        Style::default().bg(theme.status_bg).fg(theme.warning)
    } else {
        Style::default().bg(theme.status_bg).fg(Color::White)
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled("Prompt Reviewer", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Decisions", Style::default().fg(Color::Yellow))),
        Line::from("  k           Keep current record"),
        Line::from("  d           Discard current record"),
        Line::from("  s           Skip current record"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().fg(Color::Yellow))),
        Line::from("  e           Export all buckets"),
        Line::from("  w           Write buckets to disk again"),
        Line::from("  r           Toggle raw record view"),
        Line::from("  q           Quit"),
        Line::from("  ?           Show this help"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(Color::DarkGray))),
    ];

    let help_area = centered_rect(50, 70, area);
    frame.render_widget(Clear, help_area);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.focus_border))
        ),
        help_area
    );
}
