use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Output};
use crate::models::BackendStatus;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

/// Centered popup area clamped to `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    Rect {
        x: area.x + x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_text_field(frame: &mut Frame, title: &str, value: &str, placeholder: &str, focused: bool, area: Rect) {
    let (text, style) = if value.is_empty() {
        (placeholder, Style::default().fg(Color::Gray))
    } else {
        (value, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    };

    let text = if focused {
        Line::from(vec![Span::styled(text, style), Span::raw("▏")])
    } else {
        Line::from(Span::styled(text, style))
    };

    let field = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(border_style(focused)),
    );

    frame.render_widget(field, area);
}

fn render_choice_field(frame: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let arrows = Style::default().fg(if focused { Color::Yellow } else { Color::DarkGray });
    let line = Line::from(vec![
        Span::styled("◀ ", arrows),
        Span::styled(value, Style::default().fg(Color::Cyan)),
        Span::styled(" ▶", arrows),
    ]);

    let field = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(border_style(focused)),
    );

    frame.render_widget(field, area);
}

/// Draws the five input fields into `areas`, in form order.
pub fn render_form(frame: &mut Frame, app: &App, areas: &[Rect]) {
    let [topic, blog_type, word_count, tone, audience] = areas else {
        return;
    };

    render_text_field(
        frame,
        "Topic",
        &app.topic,
        "What should the post be about?",
        app.focus == Field::Topic,
        *topic,
    );
    render_choice_field(frame, "Blog Type", app.blog_type(), app.focus == Field::BlogType, *blog_type);
    render_text_field(
        frame,
        "Word Count",
        &app.word_count,
        "e.g. 500",
        app.focus == Field::WordCount,
        *word_count,
    );
    render_choice_field(frame, "Tone", app.tone(), app.focus == Field::Tone, *tone);
    render_choice_field(frame, "Audience", app.audience(), app.focus == Field::Audience, *audience);
}

pub fn render_generate_button(frame: &mut Frame, app: &App, area: Rect) {
    let disabled = app.generation.is_in_flight();
    let focused = app.focus == Field::GenerateButton;

    let style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let button = Paragraph::new(app.generate_label())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(focused)));

    frame.render_widget(button, area);
}

pub fn render_copy_button(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Field::CopyButton;
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else if app.copy.is_confirming() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };

    let button = Paragraph::new(app.copy.label())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(focused)));

    frame.render_widget(button, area);
}

pub fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stat = |name: &'static str, value: String| {
        Line::from(vec![
            Span::raw(name),
            Span::styled(value, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ])
    };

    let stats = &app.stats;
    let lines = vec![
        stat("Words:           ", stats.words.to_string()),
        stat("Characters:      ", stats.characters.to_string()),
        stat("Read time (min): ", stats.read_time.to_string()),
        stat("Generated in (s):", format!(" {}", stats.generation_time_display())),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Stats ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(panel, area);
}

pub fn render_output(frame: &mut Frame, app: &mut App, area: Rect) {
    let lines: Vec<Line> = match &app.output {
        Output::Placeholder => vec![Line::from(Span::styled(
            "Your generated blog post will appear here.",
            Style::default().fg(Color::DarkGray),
        ))],
        Output::Loading => {
            let ticks = app.generation.elapsed().as_millis() / 100;
            let frame_index = usize::try_from(ticks).unwrap_or(0) % SPINNER.len();
            vec![Line::from(vec![
                Span::styled(SPINNER[frame_index], Style::default().fg(Color::Magenta)),
                Span::raw(" Generating your blog post..."),
            ])]
        }
        // Shown as literal text, no markdown rendering
        Output::Content(text) => text.lines().map(|l| Line::from(l.to_string())).collect(),
        Output::Error(text) => vec![Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::Red),
        ))],
    };

    // Clamp the scroll offset to the wrapped height of the text
    let available_width = area.width.saturating_sub(2).max(1) as usize;
    let total_visual_lines: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(available_width).max(1))
        .sum();
    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    if app.output_scroll > max_scroll {
        app.output_scroll = max_scroll;
    }

    let output = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Blog Post ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(app.output_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(output, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (backend_text, color) = match &app.backend {
        BackendStatus::Unknown => ("backend: checking...".to_string(), Color::DarkGray),
        BackendStatus::Online(health) => (
            format!("backend: online ({}, ollama {})", health.model, health.ollama_status),
            Color::Green,
        ),
        BackendStatus::Offline => ("backend: offline".to_string(), Color::Red),
    };

    let mut spans = vec![Span::styled(backend_text, Style::default().fg(color))];
    if let Some(model) = &app.last_model {
        spans.push(Span::styled(
            format!(" | last model: {model}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.generation.is_in_flight() {
        spans.push(Span::styled(
            " [Generating...]",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);

    frame.render_widget(status, area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Tab: Next field | ←/→: Change | Enter: Generate | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text).alignment(Alignment::Center).style(style);

    frame.render_widget(bar, area);
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled(
            "BlogDraft - Keyboard Shortcuts",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Form:", bold)),
        Line::from("  Tab / Shift+Tab - Move between fields"),
        Line::from("  Left / Right    - Change a choice"),
        Line::from("  Enter           - Generate (topic or button)"),
        Line::from(""),
        Line::from(Span::styled("Output:", bold)),
        Line::from("  PgUp / PgDn     - Scroll the post"),
        Line::from("  Ctrl+Y          - Copy the post"),
        Line::from(""),
        Line::from(Span::styled("General:", bold)),
        Line::from("  Ctrl+H          - Show/hide this help"),
        Line::from("  Ctrl+Q          - Quit"),
        Line::from("  Ctrl+C (twice)  - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    let area = popup_area(area, 52, 20);
    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

pub fn render_alert(frame: &mut Frame, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let alert = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Alert ")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: false });

    let area = popup_area(area, 44, 6);
    frame.render_widget(Clear, area);
    frame.render_widget(alert, area);
}
