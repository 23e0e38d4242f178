use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::core::constants::INDICATOR_SPACE;
use crate::core::conversation::CatalogState;

const MODELS_PANE_WIDTH: u16 = 34;

pub fn ui(f: &mut Frame, app: &App) {
    // Paint the full frame background first so panes can rely on it.
    let background = Block::default().style(Style::default().bg(app.theme.background_color));
    f.render_widget(background, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let (transcript_area, models_area) = if app.show_models_pane {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(MODELS_PANE_WIDTH)])
            .split(chunks[0]);
        (columns[0], Some(columns[1]))
    } else {
        (chunks[0], None)
    };

    render_transcript(f, app, transcript_area);
    if let Some(area) = models_area {
        render_models_pane(f, app, area);
    }
    render_input(f, app, chunks[1]);

    if app.show_help {
        render_help_overlay(f, app, chunks[0]);
    }
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let lines = app.build_display_lines();

    let available_height = area.height.saturating_sub(1);
    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let title = format!(
        "Causerie v{} - {} \u{2022} Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.server_label,
        app.logging_status()
    );

    let transcript = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, app.theme.title_style)))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));

    f.render_widget(transcript, area);
}

fn render_models_pane(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    match app.conversation.catalog() {
        CatalogState::Loading => {
            lines.push(Line::from(Span::styled(
                "Loading models...",
                app.theme.system_text_style,
            )));
        }
        CatalogState::Failed => {
            lines.push(Line::from(Span::styled(
                "Failed to load models",
                app.theme.system_text_style,
            )));
        }
        CatalogState::Loaded => {
            for entry in app.conversation.selector_entries() {
                lines.push(Line::from(vec![
                    Span::styled("\u{2022} ", app.theme.system_text_style),
                    Span::styled(entry.label, app.theme.assistant_text_style),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("  {}", entry.id),
                    app.theme.system_text_style,
                )));
            }
        }
    }

    let pane = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.input_border_style)
                .title(Span::styled("Models", app.theme.input_title_style)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(pane, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input_title = if let Some(status) = &app.status {
        status.clone()
    } else if app.conversation.is_sending() {
        "Waiting for reply... (/help for help, Ctrl+C to quit)".to_string()
    } else {
        "Type your message (Enter to send, /help for help, Ctrl+C to quit)".to_string()
    };

    // Keep the cursor in view by scrolling the line horizontally. The
    // sending indicator eats into the usable width when present.
    let reserved = if app.conversation.is_sending() {
        2 + INDICATOR_SPACE
    } else {
        2
    };
    let inner_width = area.width.saturating_sub(reserved);
    let prefix: String = app.input.chars().take(app.input_cursor_position).collect();
    let cursor_width = prefix.width() as u16;
    let hscroll = cursor_width.saturating_sub(inner_width.saturating_sub(1));

    let input = Paragraph::new(app.input.as_str())
        .style(app.theme.input_text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.input_border_style)
                .title(Span::styled(input_title, app.theme.input_title_style)),
        )
        .scroll((0, hscroll));

    f.render_widget(input, area);

    if app.conversation.is_sending() && area.width > INDICATOR_SPACE {
        let indicator_area = Rect {
            x: area.x + area.width - INDICATOR_SPACE + 1,
            y: area.y + 1,
            width: 1,
            height: 1,
        };
        let indicator = Paragraph::new(pulse_symbol(app)).style(app.theme.sending_indicator_style);
        f.render_widget(indicator, indicator_area);
    }

    let cursor_x = area.x + 1 + cursor_width.saturating_sub(hscroll);
    f.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
}

/// Pulse through empty, half, and full circles while a request is out.
fn pulse_symbol(app: &App) -> &'static str {
    let elapsed = app.pulse_start.elapsed().as_millis() as f32 / 1000.0;
    let pulse_phase = (elapsed * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        "\u{25cb}"
    } else if pulse_intensity < 0.66 {
        "\u{25d0}"
    } else {
        "\u{25cf}"
    }
}

fn render_help_overlay(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Commands", app.theme.user_prefix_style)),
        Line::from("  /clear            Clear the conversation"),
        Line::from("  /models           Refresh and show the model catalog"),
        Line::from("  /log [filename]   Enable or pause transcript logging"),
        Line::from("  /help             Show this help"),
        Line::from(""),
        Line::from(Span::styled("Keys", app.theme.user_prefix_style)),
        Line::from("  Enter             Send the message"),
        Line::from("  Up/Down/PgUp/PgDn Scroll through history"),
        Line::from("  F2                Toggle the model catalog pane"),
        Line::from("  Esc               Close this help or the catalog pane"),
        Line::from("  Ctrl+C            Quit"),
    ];

    let popup = centered_rect(area, 56, (lines.len() + 2) as u16);
    f.render_widget(Clear, popup);
    let help = Paragraph::new(lines)
        .style(app.theme.assistant_text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.input_border_style)
                .title(Span::styled("Help", app.theme.input_title_style)),
        );
    f.render_widget(help, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
