use jstutor_core::{MessageKind, QUICK_ACTIONS};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};

pub fn render(app: &mut App, frame: &mut Frame) {
    let [chat_area, actions_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_chat(app, frame, chat_area);
    render_quick_actions(frame, actions_area);
    render_input(app, frame, input_area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let chat_focused = app.input_mode == InputMode::Normal;
    let border_color = if chat_focused { Color::Cyan } else { Color::DarkGray };

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" JavaScript Tutor ");

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.controller.messages() {
        match msg.kind {
            MessageKind::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(line));
                }
            }
            MessageKind::Assistant => {
                lines.push(Line::from(Span::styled(
                    "Tutor:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(line));
                }
                if let Some(code) = &msg.code {
                    lines.push(Line::default());
                    for line in code.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("  {line}"),
                            Style::default().fg(Color::Green),
                        )));
                    }
                }
                if let Some(explanation) = &msg.explanation {
                    for line in explanation.lines() {
                        lines.push(Line::from(Span::styled(
                            line,
                            Style::default()
                                .fg(Color::Gray)
                                .add_modifier(Modifier::ITALIC),
                        )));
                    }
                }
            }
            MessageKind::Error => {
                lines.push(Line::from(Span::styled(
                    "Error:",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(line, Style::default().fg(Color::Red))));
                }
            }
            MessageKind::Suggestion => {
                lines.push(Line::from(Span::styled(
                    "Tip:",
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(
                        line,
                        Style::default()
                            .fg(Color::Gray)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.controller.is_pending() {
        lines.push(Line::from(Span::styled(
            "Tutor:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_quick_actions(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Quick actions (Esc, then 1-6) ");

    let mut spans: Vec<Span> = Vec::new();
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        spans.push(Span::styled(
            format!("[{}] ", i + 1),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(action.label));
        if i + 1 < QUICK_ACTIONS.len() {
            spans.push(Span::raw("  "));
        }
    }

    let actions = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(actions, area);
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let title = if app.controller.is_pending() {
        " Ask (waiting for reply...) "
    } else if editing {
        " Ask (Enter to send, Esc for keys) "
    } else {
        " Ask (i to type) "
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    // Horizontal scrolling keeps the cursor inside the visible slice.
    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width == 0 {
        0
    } else if app.cursor >= inner_width {
        app.cursor - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);

    if editing {
        let cursor_x = area.x + 1 + (app.cursor - scroll_offset) as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}
