//! Main chat event loop
//!
//! This module runs the interactive session: it draws the UI, feeds key
//! events into the app, and applies completed backend calls. Network work
//! happens in spawned tasks that report back over an mpsc channel; the
//! loop itself never blocks on the backend.

use std::{error::Error, io, sync::Arc, time::Duration};

use ratatui::crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::api::{Backend, HttpBackend, ModelEntry};
use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::core::config::Config;
use crate::core::conversation::PendingChat;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;
use crate::utils::input::sanitize_text_input;

/// Outcome of one background backend call, reported to the event loop.
/// Each variant is independent: a chat reply and a catalog refresh may
/// resolve in either order.
enum LoopEvent {
    Chat {
        generation: u64,
        outcome: Result<String, String>,
    },
    Models {
        outcome: Result<Vec<ModelEntry>, String>,
    },
    Health {
        healthy: bool,
    },
}

pub async fn run_chat(
    server_url: String,
    log_file: Option<String>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let theme = Theme::from_name(config.theme.as_deref().unwrap_or("dark"));
    let mut app = App::new(&server_url, theme, log_file)?;
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(server_url));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<LoopEvent>();

    // Startup: one health probe and an initial catalog load, both fire
    // and forget.
    spawn_health_probe(Arc::clone(&backend), tx.clone());
    spawn_model_refresh(Arc::clone(&backend), tx.clone());

    let result = run_event_loop(&mut terminal, &mut app, &backend, &tx, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    backend: &Arc<dyn Backend>,
    tx: &mpsc::UnboundedSender<LoopEvent>,
    rx: &mut mpsc::UnboundedReceiver<LoopEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        if app.exit_requested {
            break Ok(());
        }

        terminal.draw(|f| ui(f, app))?;

        let term_size = terminal.size().unwrap_or_default();
        let available_height = transcript_height(term_size.height);

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(app, backend, tx, key.code, key.modifiers, available_height);
                }
                Event::Paste(text) => {
                    app.insert_str_at_cursor(&sanitize_text_input(&text));
                }
                _ => {}
            }
        }

        // Drain everything the background tasks produced this tick.
        let mut received_any = false;
        while let Ok(loop_event) = rx.try_recv() {
            apply_loop_event(app, loop_event);
            received_any = true;
        }
        if received_any {
            app.update_scroll_position(available_height);
        }
    }
}

/// Height of the transcript viewport: full terminal minus the input box
/// and the title line.
fn transcript_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(3).saturating_sub(1)
}

fn handle_key(
    app: &mut App,
    backend: &Arc<dyn Backend>,
    tx: &mpsc::UnboundedSender<LoopEvent>,
    code: KeyCode,
    modifiers: KeyModifiers,
    available_height: u16,
) {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.exit_requested = true;
        }
        KeyCode::Esc => {
            app.show_help = false;
            app.show_models_pane = false;
            app.clear_status();
        }
        KeyCode::F(2) => {
            app.show_models_pane = !app.show_models_pane;
        }
        KeyCode::Enter => {
            app.clear_status();
            let input_text = app.input.clone();
            match process_input(app, &input_text) {
                CommandResult::Continue => {
                    app.clear_input();
                }
                CommandResult::RefreshModels => {
                    app.clear_input();
                    spawn_model_refresh(Arc::clone(backend), tx.clone());
                }
                CommandResult::ProcessAsMessage(_) => {
                    if let Some(pending) = app.submit_input() {
                        spawn_chat_request(Arc::clone(backend), tx.clone(), pending);
                    }
                }
            }
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if !c.is_control() {
                app.insert_char_at_cursor(c);
            }
        }
        KeyCode::Backspace => {
            app.delete_char_before_cursor();
        }
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_to_beginning(),
        KeyCode::End => app.move_cursor_to_end(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1, available_height),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10, available_height),
        _ => {}
    }
}

fn apply_loop_event(app: &mut App, loop_event: LoopEvent) {
    match loop_event {
        LoopEvent::Chat {
            generation,
            outcome,
        } => {
            app.apply_chat_outcome(generation, outcome);
        }
        LoopEvent::Models { outcome } => {
            app.conversation.apply_models(outcome);
        }
        LoopEvent::Health { healthy } => {
            if healthy {
                tracing::info!("backend is ready");
            } else {
                tracing::warn!("backend health probe failed");
                app.set_status("Backend connection issue - check the server");
            }
        }
    }
}

fn spawn_chat_request(
    backend: Arc<dyn Backend>,
    tx: mpsc::UnboundedSender<LoopEvent>,
    pending: PendingChat,
) {
    tokio::spawn(async move {
        let outcome = backend
            .send_chat(&pending.text)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(LoopEvent::Chat {
            generation: pending.generation,
            outcome,
        });
    });
}

fn spawn_model_refresh(backend: Arc<dyn Backend>, tx: mpsc::UnboundedSender<LoopEvent>) {
    tokio::spawn(async move {
        let outcome = backend.fetch_models().await.map_err(|e| e.to_string());
        let _ = tx.send(LoopEvent::Models { outcome });
    });
}

fn spawn_health_probe(backend: Arc<dyn Backend>, tx: mpsc::UnboundedSender<LoopEvent>) {
    tokio::spawn(async move {
        let healthy = backend.check_health().await;
        let _ = tx.send(LoopEvent::Health { healthy });
    });
}
