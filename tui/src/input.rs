//! Input handling for the Brochure TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::warn;

use brochure_engine::App;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Pumps crossterm events from a blocking reader thread into the async frame
/// loop over a bounded channel.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first to ensure the input thread unblocks if it
        // is currently backpressured on a send.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping
                    // events, so held-down scroll keys never skip.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drains up to [`MAX_EVENTS_PER_FRAME`] pending events into the app.
/// Returns `Ok(true)` when the app should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(false)
}

/// Applies one terminal event. Returns `true` when the app should exit.
fn apply_event(app: &mut App, ev: Event) -> bool {
    let Event::Key(key) = ev else {
        // Resize is handled implicitly: the next frame re-measures the
        // document at the new width. Paste and focus events carry no meaning
        // for a read-only viewer.
        return false;
    };
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.notice_visible() {
        handle_notice_key(app, key);
    } else {
        handle_key(app, key);
    }
    app.should_quit()
}

/// While the notice overlay is up it owns the keyboard; only dismissal and
/// quitting get through.
fn handle_notice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.dismiss_modal();
        }
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => {
            if !app.close_nav() {
                app.clear_status();
            }
        }
        KeyCode::Char('m') | KeyCode::Tab => app.toggle_nav(),
        KeyCode::Char('l') => app.toggle_language(),
        KeyCode::Char('y') => yank_link(app),
        KeyCode::Char('r') => app.reload_site(),
        KeyCode::Up | KeyCode::Char('k') => {
            if app.nav().is_open() {
                app.nav_select_prev();
            } else {
                app.scroll_lines(-1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.nav().is_open() {
                app.nav_select_next();
            } else {
                app.scroll_lines(1);
            }
        }
        KeyCode::Enter => {
            if app.nav().is_open() {
                app.activate_selected_link();
            }
        }
        KeyCode::PageUp => app.scroll_pages(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_pages(1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        KeyCode::Char(']') => app.next_page(),
        KeyCode::Char('[') => app.prev_page(),
        KeyCode::Char(c @ '1'..='9') => app.open_page_at(usize::from(c as u8 - b'1')),
        _ => {}
    }
}

fn yank_link(app: &mut App) {
    let link = app.current_link();
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(link.clone())) {
        Ok(()) => app.set_status(format!("Copied {link}")),
        Err(e) => {
            warn!("Clipboard unavailable: {e}");
            app.set_status("Clipboard unavailable");
        }
    }
}
