// Input handling and the async side of the form

use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::api::BlogClient;
use crate::app::{App, Field};
use crate::clipboard::Clipboard;
use crate::events::AppEvent;
use crate::models::BackendStatus;

const SCROLL_PAGE: usize = 10;

/// Start a generation request unless one is already outstanding or the form
/// is invalid. The outcome comes back as [`AppEvent::GenerationFinished`].
pub fn generate_blog(
    app: &mut App,
    client: &BlogClient,
    event_tx: &UnboundedSender<AppEvent>,
) -> Option<JoinHandle<()>> {
    let request = app.begin_generation()?;

    tracing::info!(
        topic = %request.topic,
        blog_type = %request.blog_type,
        word_count = request.word_count,
        "requesting blog post"
    );

    let client = client.clone();
    let tx = event_tx.clone();
    Some(tokio::spawn(async move {
        let outcome = client.generate_blog(&request).await;
        let _ = tx.send(AppEvent::GenerationFinished(outcome));
    }))
}

pub fn copy_to_clipboard(
    app: &mut App,
    clipboard: &mut dyn Clipboard,
    event_tx: &UnboundedSender<AppEvent>,
) {
    match clipboard.set_text(app.output.text()) {
        Ok(()) => app.copy.confirm(event_tx),
        Err(err) => {
            tracing::error!(error = %err, "failed to copy text");
            app.alert = Some("Failed to copy to clipboard".to_string());
        }
    }
}

/// Probe the backend once; the result only feeds the status bar.
pub fn check_backend(client: &BlogClient, event_tx: &UnboundedSender<AppEvent>) -> JoinHandle<()> {
    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let status = match client.health_check().await {
            Ok(health) => {
                tracing::info!(
                    url = client.base_url(),
                    model = %health.model,
                    ollama = %health.ollama_status,
                    "backend reachable"
                );
                BackendStatus::Online(health)
            }
            Err(err) => {
                tracing::warn!(url = client.base_url(), error = %err, "backend unreachable");
                BackendStatus::Offline
            }
        };
        let _ = tx.send(AppEvent::BackendChecked(status));
    })
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::GenerationFinished(outcome) => app.finish_generation(outcome),
        AppEvent::CopyLabelExpired(token) => app.copy.expire(token),
        AppEvent::BackendChecked(status) => app.backend = status,
    }
}

pub fn handle_key(
    app: &mut App,
    key: KeyCode,
    modifiers: KeyModifiers,
    client: &BlogClient,
    clipboard: &mut dyn Clipboard,
    event_tx: &UnboundedSender<AppEvent>,
) -> Option<JoinHandle<()>> {
    // Alerts are modal
    if app.alert.is_some() {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return None;
    }

    if app.show_help {
        match key {
            KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => app.toggle_help(),
            KeyCode::Esc => app.show_help = false,
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            if app.exit_pending {
                app.quit();
            } else {
                app.exit_pending = true;
            }
            return None;
        }
        KeyCode::Esc if app.exit_pending => {
            app.exit_pending = false;
            return None;
        }
        _ if app.exit_pending => {
            // Any other key cancels pending exit
            app.exit_pending = false;
        }
        _ => {}
    }

    match key {
        KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => app.toggle_help(),
        KeyCode::Char('y') if modifiers.contains(KeyModifiers::CONTROL) => {
            if app.copy_visible {
                copy_to_clipboard(app, clipboard, event_tx);
            }
        }
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::PageUp => app.scroll_up(SCROLL_PAGE),
        KeyCode::PageDown => app.scroll_down(SCROLL_PAGE),
        KeyCode::Left => app.cycle_choice(false),
        KeyCode::Right => app.cycle_choice(true),
        KeyCode::Enter => return activate_focused(app, key, client, clipboard, event_tx),
        KeyCode::Char(' ') if is_plain(modifiers) => {
            return activate_focused(app, key, client, clipboard, event_tx);
        }
        KeyCode::Backspace => {
            if let Some(input) = app.focused_input() {
                input.pop();
            }
        }
        KeyCode::Char(c) if is_plain(modifiers) => {
            if let Some(input) = app.focused_input() {
                input.push(c);
            }
        }
        _ => {}
    }
    None
}

/// Typed characters carry no modifier other than Shift.
fn is_plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn activate_focused(
    app: &mut App,
    key: KeyCode,
    client: &BlogClient,
    clipboard: &mut dyn Clipboard,
    event_tx: &UnboundedSender<AppEvent>,
) -> Option<JoinHandle<()>> {
    match (app.focus, key) {
        // Enter in the topic field behaves like pressing the button
        (Field::Topic, KeyCode::Enter) => generate_blog(app, client, event_tx),
        (Field::GenerateButton, _) if !app.generation.is_in_flight() => {
            generate_blog(app, client, event_tx)
        }
        (Field::CopyButton, _) if app.copy_visible => {
            copy_to_clipboard(app, clipboard, event_tx);
            None
        }
        (_, KeyCode::Char(c)) => {
            if let Some(input) = app.focused_input() {
                input.push(c);
            }
            None
        }
        _ => None,
    }
}
