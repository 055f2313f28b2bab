//! TUI application state
//!
//! Pure data structures for the form. No rendering logic here.

use tracing::debug;

use crate::client::PlanError;
use crate::domain::ArtifactReference;
use crate::planner::{Planner, RequestState, Ticket};

/// Placeholder shown in the empty input field
pub const INPUT_PLACEHOLDER: &str = "e.g., Paris, Tokyo, New York";

/// Outcome of the last artifact download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Saved { path: String, bytes: u64 },
    Failed(String),
}

/// Complete TUI state
#[derive(Debug)]
pub struct AppState {
    /// Text in the city input field
    pub input: String,
    /// Cursor position in `input` (byte offset, always on a char boundary)
    pub cursor_pos: usize,
    /// Request state machine
    pub planner: Planner,
    /// Ticket waiting to be dispatched by the runner
    pub pending_dispatch: Option<Ticket>,
    /// Artifact waiting to be downloaded by the runner
    pub pending_download: Option<ArtifactReference>,
    /// Last download outcome, shown under the results
    pub download_status: Option<DownloadStatus>,
    /// Service base address for resolving download links
    pub base_url: String,
    /// Vertical scroll offset of the results block
    pub results_scroll: u16,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Set when the app should exit
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self {
            input: String::new(),
            cursor_pos: 0,
            planner: Planner::new(),
            pending_dispatch: None,
            pending_download: None,
            download_status: None,
            base_url: String::new(),
            results_scroll: 0,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    pub fn request(&self) -> &RequestState {
        self.planner.state()
    }

    /// Input and submit affordance are disabled while a request is in flight
    pub fn input_enabled(&self) -> bool {
        !self.request().is_pending()
    }

    /// Submit the current input from the primary affordance
    ///
    /// Ignored while `Pending`. Empty input fails immediately and queues
    /// nothing for the runner.
    pub fn submit(&mut self) {
        debug!(input_len = self.input.len(), "AppState::submit: called");
        if !self.input_enabled() {
            debug!("AppState::submit: request in flight, ignoring");
            return;
        }

        self.download_status = None;
        self.results_scroll = 0;
        match self.planner.submit(&self.input) {
            Ok(ticket) => {
                debug!(generation = ticket.generation(), "AppState::submit: queued for dispatch");
                self.pending_dispatch = Some(ticket);
            }
            Err(err) => {
                debug!(%err, "AppState::submit: rejected locally");
            }
        }
    }

    /// Queue the current artifact for download
    pub fn request_download(&mut self) {
        debug!("AppState::request_download: called");
        match self.request().artifact().cloned() {
            Some(artifact) => self.pending_download = Some(artifact),
            None => {
                self.download_status = Some(DownloadStatus::Failed("No download available".to_string()));
            }
        }
    }

    pub fn finish_download(&mut self, result: Result<(String, u64), PlanError>) {
        debug!(ok = result.is_ok(), "AppState::finish_download: called");
        self.download_status = Some(match result {
            Ok((path, bytes)) => DownloadStatus::Saved { path, bytes },
            Err(err) => DownloadStatus::Failed(err.to_string()),
        });
    }

    // === Input editing ===

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn delete_before_cursor(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.replace_range(prev..self.cursor_pos, "");
            self.cursor_pos = prev;
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.input.replace_range(self.cursor_pos..next, "");
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_pos = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor_pos = next;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor_pos]
            .chars()
            .next_back()
            .map(|c| self.cursor_pos - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.input[self.cursor_pos..]
            .chars()
            .next()
            .map(|c| self.cursor_pos + c.len_utf8())
    }

    // === Results scrolling ===

    pub fn scroll_down(&mut self, lines: u16) {
        self.results_scroll = self.results_scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.results_scroll = self.results_scroll.saturating_sub(lines);
    }
}
