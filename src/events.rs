//! Event types and the main event loop driver for the overhead TUI.
//!
//! This module defines the [`Event`] enum (keyboard input, ticks, finished
//! searches, and geolocation results) and the [`EventHandler`], which runs a
//! background task that polls crossterm for key events and emits periodic
//! [`Event::Tick`]s. Spawned search and locate tasks send their results back
//! through [`EventHandler::tx`].

use crate::coords::GeoPoint;
use crate::errors::FetchError;
use crate::search::SearchOutcome;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::error;

/// Events processed by the application event loop.
pub enum Event {
    /// Periodic tick used for the spinner while a search is running.
    Tick,
    /// User key press from the terminal.
    Input(KeyEvent),
    /// A search task finished, successfully or not.
    SearchFinished {
        origin: GeoPoint,
        result: Result<SearchOutcome, FetchError>,
        finished_at: DateTime<Local>,
    },
    /// IP geolocation answered; `None` if it failed.
    Located(Option<GeoPoint>),
}

/// Multiplexes terminal input and ticks into a single event stream.
///
/// Holds an unbounded channel: the sender ([`tx`](EventHandler::tx)) is cloned
/// into spawned tasks, while the receiver is consumed by
/// [`next`](EventHandler::next) in the main loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Creates a new event handler and spawns the input/tick task.
    ///
    /// The task polls crossterm with a timeout of `tick_rate_ms`. Key presses
    /// become [`Event::Input`], and [`Event::Tick`] is sent whenever the tick
    /// interval elapses. If the terminal stops answering the task logs the
    /// error and exits, which ends the stream.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::from_secs(0));

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            event_tx.send(Event::Input(key)).ok();
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Terminal read failed: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Terminal poll failed: {}", e);
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    event_tx.send(Event::Tick).ok();
                    last_tick = Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// Receives the next event from the channel.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
