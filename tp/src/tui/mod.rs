//! Terminal User Interface for the trip planner
//!
//! A single-screen form: city input, submit affordance, error banner,
//! numbered itinerary and a download affordance for the KML file.

mod app;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, DownloadStatus};

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::{Context, Result};
use tracing::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::client::{HttpPlanningClient, PlanningService};

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen, undone on drop
///
/// Created before the terminal so an error partway through setup still
/// leaves the user's shell usable.
struct TerminalSession;

impl TerminalSession {
    fn enter() -> Result<(Self, Tui)> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let session = Self;
        execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")?;
        Ok((session, terminal))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = disable_raw_mode().and_then(|()| execute!(io::stdout(), LeaveAlternateScreen));
        if let Err(err) = restored {
            warn!(error = %err, "TerminalSession: failed to restore terminal");
        }
    }
}

/// Run the interactive form until the user quits
pub async fn run(service: Arc<HttpPlanningClient>, download_dir: PathBuf) -> Result<()> {
    debug!(base_url = %service.base_url(), "tui::run: called");
    let (_session, terminal) = TerminalSession::enter()?;
    TuiRunner::new(terminal, service, download_dir).run().await
}
