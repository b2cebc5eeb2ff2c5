use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use folio_core::{Bubble, BubbleKind, ComingSoon};
use crate::app::{App, FocusPane, InputMode, TextInput};

const SPINNER: [&str; 3] = ["·  ", "·· ", "···"];

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }

            // Find closing **
            let mut bold_text = String::new();
            let mut found_close = false;
            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Lines for one bubble: role label, body, blank spacer.
fn bubble_lines(bubble: &Bubble, frame_idx: u8, lines: &mut Vec<Line<'static>>) {
    match bubble.kind {
        BubbleKind::User => {
            lines.push(Line::from(Span::styled(
                "You:",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            for line in bubble.text.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }
        BubbleKind::Bot => {
            lines.push(Line::from(Span::styled(
                "AI:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for line in bubble.text.lines() {
                lines.push(parse_markdown_line(line));
            }
        }
        BubbleKind::Loading => {
            lines.push(Line::from(Span::styled(
                "AI:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![
                Span::styled(
                    bubble.text.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ),
                Span::raw(" "),
                Span::styled(SPINNER[frame_idx as usize % SPINNER.len()], Style::default().fg(Color::DarkGray)),
            ]));
        }
        BubbleKind::Error => {
            lines.push(Line::from(Span::styled(
                "AI:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                bubble.text.clone(),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::default());
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [chat_area, side_area] = Layout::horizontal([
        Constraint::Percentage(60),
        Constraint::Percentage(40),
    ])
    .areas(body_area);

    render_chat(app, frame, chat_area);

    let [search_area, actions_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(9),
    ])
    .areas(side_area);

    render_search(app, frame, search_area);
    render_actions(app, frame, actions_area);
    render_footer(app, frame, footer_area);

    if app.notice().is_some() {
        render_notice(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let key_indicator = match app.key_source {
        Some(source) => format!(" [key: {}]", source),
        None => " [no API key]".to_string(),
    };

    let title = Line::from(vec![
        Span::styled(" folio ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("model: {}", app.model), Style::default().fg(Color::White)),
        Span::styled(key_indicator, Style::default().fg(Color::Black)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Black),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

/// Slice of `value` that fits `width` columns with the cursor in view, and
/// the cursor column inside that slice. Assumes one column per char.
fn input_window(value: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = usize::from(width.max(1));
    let cursor = cursor.min(value.chars().count());
    // The last column is kept free for a cursor sitting past the text
    let offset = cursor.saturating_sub(width - 1);
    let shown = value.chars().skip(offset).take(width).collect();
    (shown, u16::try_from(cursor - offset).unwrap_or(u16::MAX))
}

fn render_input(
    input: &TextInput,
    title: &str,
    placeholder: &str,
    editing: bool,
    focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            border_style(focused)
        })
        .title(title.to_string());

    let (shown, column) = input_window(&input.value, input.cursor, area.width.saturating_sub(2));
    let content = if input.value.is_empty() && !editing {
        Paragraph::new(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(shown)
    };
    frame.render_widget(content.block(block), area);

    if editing {
        let x = area.x.saturating_add(1).saturating_add(column);
        frame.set_cursor_position((x, area.y.saturating_add(1)));
    }
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let [transcript_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    let focused = app.focus == FocusPane::Chat;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" Chat ");

    let transcript = app.chat.transcript();
    let text = if transcript.is_empty() {
        Text::from(Span::styled(
            "Ask anything about this portfolio...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();
        for bubble in transcript.bubbles() {
            bubble_lines(bubble, app.animation_frame, &mut lines);
        }
        Text::from(lines)
    };

    // Measure the wrapped height before the border is attached
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    let rendered = paragraph.line_count(transcript_area.width.saturating_sub(2));
    app.fit_chat_view(
        transcript_area.height.saturating_sub(2),
        u16::try_from(rendered).unwrap_or(u16::MAX),
    );

    let paragraph = paragraph.block(block).scroll((app.chat_scroll, 0));
    frame.render_widget(paragraph, transcript_area);

    let editing = focused && app.input_mode == InputMode::Editing;
    render_input(
        &app.chat_input,
        " Message (Enter to send) ",
        "Press i to type a message",
        editing,
        focused,
        frame,
        input_area,
    );
}

fn render_search(app: &App, frame: &mut Frame, area: Rect) {
    let [input_area, result_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let focused = app.focus == FocusPane::Search;
    let editing = focused && app.input_mode == InputMode::Editing;
    render_input(
        &app.search_input,
        " Search ",
        "Ask about skills, projects...",
        editing,
        focused,
        frame,
        input_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" Answer ");

    let text = match app.search.pane().content() {
        Some(bubble) => {
            let mut lines = Vec::new();
            bubble_lines(bubble, app.animation_frame, &mut lines);
            // Drop the role label and trailing spacer; the pane title says enough
            lines.remove(0);
            lines.pop();
            Text::from(lines)
        }
        None => Text::from(Span::styled(
            "Results appear here.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        result_area,
    );
}

fn render_actions(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Actions;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" Actions ");

    let button = app.summary.button();
    let button_style = if button.is_disabled() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let key_style = Style::default().fg(Color::Yellow);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" s ", key_style),
            Span::styled(format!("[ {} ]", button.label()), button_style),
        ]),
        Line::from(vec![
            Span::styled(" r ", key_style),
            Span::raw("Recommend a project"),
        ]),
    ];

    if let Some(recommendation) = app.recommender.pane().content() {
        lines.push(Line::from(Span::styled(
            format!("   {}", recommendation.text),
            Style::default().fg(Color::Green),
        )));
    }

    for (key, feature) in ["v", "t", "a"].iter().zip(ComingSoon::all()) {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(feature.display_name(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut spans = vec![Span::styled(mode_text, mode_style)];

    if !app.has_client() {
        spans.push(Span::styled(
            " No API key: set OPENAI_API_KEY or run `folio config set-key <KEY>` ",
            Style::default().bg(Color::Red).fg(Color::White),
        ));
    }

    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Normal => &[
            ("Tab", "focus"),
            ("i", "type"),
            ("j/k", "scroll"),
            ("s", "summary"),
            ("q", "quit"),
        ],
        InputMode::Editing => &[("Enter", "send"), ("Esc", "done")],
    };
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notice) = app.notice() else {
        return;
    };

    // Calculate popup size and position (centered)
    let popup_width = 60.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2).max(1) as usize;
    let text_lines = (notice.text().chars().count() / inner_width + 1) as u16;
    let popup_height = (text_lines + 4).min(area.height.saturating_sub(2));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Notice (any key to close) ");

    let text = Text::from(vec![
        Line::from(notice.text().to_string()),
        Line::default(),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ]);

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        popup_area,
    );
}
