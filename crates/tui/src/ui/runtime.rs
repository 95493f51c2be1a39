//! Runtime: the event loop and terminal lifecycle.
//!
//! - Owns the terminal (raw mode, alternate screen) and always restores it.
//! - A dedicated input thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel.
//! - Ticks run fast while something animates (row scrolling, the row
//!   indicator, a pending search) and slowly otherwise.
//! - Effects returned by `App::update` are handed to `cmd`; their tasks are
//!   polled through a `FuturesUnordered` and fed back as messages.

use std::io::Stdout;
use std::mem;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::app::{App, Effect, Msg};
use crate::cmd::{self, Services};
use crate::ui::main::draw;
use crate::ui::theme::{self, Theme};

const FAST_TICK: Duration = Duration::from_millis(50);
const IDLE_TICK: Duration = Duration::from_secs(5);

type TerminalBackend = CrosstermBackend<Stdout>;

/// Spawn the input thread. It exits when reading fails or the receiver is
/// dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read terminal event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

fn setup_terminal() -> Result<Terminal<TerminalBackend>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn cleanup_terminal(terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<TerminalBackend>, app: &App, theme: &dyn Theme) -> Result<()> {
    terminal.draw(|frame| draw(frame, app, theme))?;
    Ok(())
}

fn is_interrupt(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translate a terminal event into a message, if it carries one.
fn input_message(event: Event) -> Option<Msg> {
    match event {
        Event::Key(key) => Some(Msg::Key(key)),
        Event::Resize(width, height) => Some(Msg::Resize(width, height)),
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the loop, and
/// restores the terminal however the loop ended.
pub async fn run_app(mut app: App, services: Services) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let theme = theme::load();
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app, &services, theme.as_ref(), &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<TerminalBackend>,
    app: &mut App,
    services: &Services,
    theme: &dyn Theme,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut pending: FuturesUnordered<JoinHandle<Msg>> = FuturesUnordered::new();
    let mut effects: Vec<Effect> = app.initial_effects();

    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        app.update(Msg::Resize(width, height));
    }

    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, theme)?;

    loop {
        if !effects.is_empty() {
            let batch = cmd::run_from_effects(services, mem::take(&mut effects));
            pending.extend(batch.pending);
        }

        let needs_animation = app.is_animating();
        let target_interval = if needs_animation { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                if is_interrupt(&event) {
                    break;
                }
                if let Some(msg) = input_message(event) {
                    effects.extend(app.update(msg));
                    needs_render = true;
                }
            }

            _ = ticker.tick() => {
                effects.extend(app.update(Msg::Tick));
                needs_render = needs_animation;
            }

            Some(joined) = pending.next(), if !pending.is_empty() => {
                match joined {
                    Ok(msg) => effects.extend(app.update(msg)),
                    Err(error) => warn!("Background task failed: {}", error),
                }
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if app.should_quit {
            break;
        }

        // Some terminals drop resize notifications; poll the size as a fallback.
        if let Ok((width, height)) = crossterm::terminal::size()
            && last_size != Some((width, height))
        {
            last_size = Some((width, height));
            app.update(Msg::Resize(width, height));
            needs_render = true;
        }

        if needs_render {
            render(terminal, app, theme)?;
        }
    }

    for task in pending {
        task.abort();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};

    #[test]
    fn ctrl_c_is_an_interrupt() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let plain_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&plain_c));
    }

    #[test]
    fn mouse_events_are_ignored() {
        let mouse = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(input_message(mouse).is_none());
        assert!(matches!(input_message(Event::Resize(10, 5)), Some(Msg::Resize(10, 5))));
    }
}
