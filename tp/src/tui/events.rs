//! Terminal input for the form
//!
//! crossterm's `poll`/`read` block, so they run on their own thread. What the
//! form cares about is forwarded over a tokio channel and the runner
//! `select!`s on it next to request results. A quiet poll interval becomes a
//! `Tick` so the Pending label keeps redrawing.

use std::time::Duration;

use crossterm::event::{self as term, KeyEvent, KeyEventKind};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Input the runner reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Nothing arrived within one poll interval
    Tick,
}

/// Narrow a raw terminal event to the ones the form handles
///
/// Key releases and repeats are dropped; so are mouse, focus and paste.
fn translate(raw: term::Event) -> Option<Event> {
    match raw {
        term::Event::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        term::Event::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

/// Block for at most `interval` and report what happened
fn poll_terminal(interval: Duration) -> Option<Event> {
    match term::poll(interval) {
        Ok(true) => match term::read() {
            Ok(raw) => translate(raw),
            Err(err) => {
                warn!(error = %err, "poll_terminal: read failed");
                None
            }
        },
        Ok(false) => Some(Event::Tick),
        Err(err) => {
            warn!(error = %err, "poll_terminal: poll failed");
            Some(Event::Tick)
        }
    }
}

/// Receiving end of the input thread
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Start the input thread; it exits once the handler is dropped
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            while !tx.is_closed() {
                if let Some(event) = poll_terminal(tick_rate)
                    && tx.send(event).is_err()
                {
                    break;
                }
            }
            debug!("EventHandler: input thread exiting");
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.rx.recv().await.ok_or_else(|| eyre::eyre!("Event channel closed"))
    }
}
