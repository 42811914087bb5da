//! Main chat event loop
//!
//! Drives the terminal: draws frames, feeds keystrokes into the input
//! line, and keeps exactly one provider request in flight. The busy flag
//! blocks further submissions until the spawned call delivers its result
//! over the reply channel.

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, sync::Arc, time::Duration};
use tokio::sync::{mpsc, Mutex};

use crate::api::generate::generate_content;
use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::core::constants::EMPTY_REPLY;
use crate::ui::renderer::ui;

/// Rows taken by the input box plus the transcript title row.
const CHROME_HEIGHT: u16 = 4;

pub async fn run_chat(app: App) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(app));
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, String>>();

    let result = loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|f| ui(f, &app_guard))?;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        submit(&app, &tx).await;
                    }
                    KeyCode::Char(c) => {
                        let mut app_guard = app.lock().await;
                        if !app_guard.is_processing {
                            app_guard.input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        let mut app_guard = app.lock().await;
                        app_guard.input.pop();
                    }
                    KeyCode::Up => {
                        scroll_by(&app, &terminal, -1).await;
                    }
                    KeyCode::Down => {
                        scroll_by(&app, &terminal, 1).await;
                    }
                    KeyCode::PageUp => {
                        scroll_by(&app, &terminal, -10).await;
                    }
                    KeyCode::PageDown => {
                        scroll_by(&app, &terminal, 10).await;
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        scroll_by(&app, &terminal, -3).await;
                    }
                    MouseEventKind::ScrollDown => {
                        scroll_by(&app, &terminal, 3).await;
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Drain any finished provider call.
        let mut received_any = false;
        while let Ok(outcome) = rx.try_recv() {
            let mut app_guard = app.lock().await;
            app_guard.complete_exchange(outcome);
            let size = terminal.size().unwrap_or_default();
            app_guard.update_scroll_position(size.height.saturating_sub(CHROME_HEIGHT), size.width);
            received_any = true;
        }
        if received_any {
            continue;
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn submit(app: &Arc<Mutex<App>>, tx: &mpsc::UnboundedSender<Result<String, String>>) {
    let mut app_guard = app.lock().await;
    if app_guard.is_processing || app_guard.input.trim().is_empty() {
        return;
    }

    let input_text = std::mem::take(&mut app_guard.input);
    let text = match process_input(&mut app_guard, &input_text) {
        CommandResult::Continue => return,
        CommandResult::ProcessAsMessage(text) => text,
    };

    if app_guard.missing_required_image() {
        app_guard.push_notice("Бро, сначала закинь фотку! 📸 (/image <файл>)");
        // Hand the draft back so it is not lost.
        app_guard.input = text;
        return;
    }

    let request = app_guard.begin_exchange(text);
    let client = app_guard.client.clone();
    let base_url = app_guard.config.base_url.clone();
    let api_key = app_guard.api_key.clone();
    let model = app_guard.config.model.clone();
    drop(app_guard);

    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = match generate_content(&client, &base_url, &api_key, &model, &request).await
        {
            Ok(Some(text)) => Ok(text),
            Ok(None) => Ok(EMPTY_REPLY.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let _ = tx.send(outcome);
    });
}

async fn scroll_by(
    app: &Arc<Mutex<App>>,
    terminal: &Terminal<CrosstermBackend<io::Stdout>>,
    delta: i32,
) {
    let mut app_guard = app.lock().await;
    let size = terminal.size().unwrap_or_default();
    let available_height = size.height.saturating_sub(CHROME_HEIGHT);
    let max_scroll = app_guard.max_scroll_offset(available_height, size.width);

    if delta < 0 {
        app_guard.auto_scroll = false;
        app_guard.scroll_offset = app_guard
            .scroll_offset
            .saturating_sub(delta.unsigned_abs() as u16);
    } else {
        app_guard.scroll_offset = app_guard
            .scroll_offset
            .saturating_add(delta as u16)
            .min(max_scroll);
        // Reaching the bottom re-arms auto-scroll.
        if app_guard.scroll_offset >= max_scroll {
            app_guard.auto_scroll = true;
        }
    }
}
