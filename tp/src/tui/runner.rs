//! TUI Runner - main loop that owns the terminal and the request tasks
//!
//! The TuiRunner is responsible for:
//! - Rendering the form on every event
//! - Dispatching queued tickets to the planning service on a background task
//! - Feeding results back into the planner exactly once per ticket
//! - Running artifact downloads without blocking input

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::AppState;
use super::views;
use crate::client::{HttpPlanningClient, PlanError, PlanOutcome, PlanningService};
use crate::download::{default_destination, download_artifact};
use crate::planner::Ticket;

/// Redraw interval while idle
const TICK_RATE: Duration = Duration::from_millis(100);

/// Result from a background task
#[derive(Debug)]
enum TaskResult {
    /// The planning request for `ticket` finished
    Plan {
        ticket: Ticket,
        result: Result<PlanOutcome, PlanError>,
    },
    /// An artifact download finished
    Download(Result<(String, u64), PlanError>),
}

/// Background plan and download tasks, plus the channel they report on
///
/// Planning goes through any [`PlanningService`]; downloads need the HTTP
/// client itself.
pub struct TaskDispatcher {
    planning: Arc<dyn PlanningService>,
    downloads: Arc<HttpPlanningClient>,
    download_dir: PathBuf,
    result_tx: mpsc::UnboundedSender<TaskResult>,
    result_rx: mpsc::UnboundedReceiver<TaskResult>,
    /// Handle to the in-flight planning request
    plan_task: Option<JoinHandle<()>>,
    /// Handle to the in-flight download
    download_task: Option<JoinHandle<()>>,
}

impl TaskDispatcher {
    pub fn new(planning: Arc<dyn PlanningService>, downloads: Arc<HttpPlanningClient>, download_dir: PathBuf) -> Self {
        debug!(base_url = %planning.base_url(), ?download_dir, "TaskDispatcher::new: called");
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            planning,
            downloads,
            download_dir,
            result_tx,
            result_rx,
            plan_task: None,
            download_task: None,
        }
    }

    /// Spawn background work queued by key handling
    fn dispatch_pending(&mut self, state: &mut AppState) {
        if let Some(ticket) = state.pending_dispatch.take() {
            self.start_plan_request(ticket);
        }
        if let Some(artifact) = state.pending_download.take() {
            let dest = default_destination(&self.download_dir, &artifact);
            info!(artifact = %artifact, dest = %dest.display(), "Starting download");

            if let Some(task) = self.download_task.take() {
                task.abort();
            }
            let client = Arc::clone(&self.downloads);
            let tx = self.result_tx.clone();
            self.download_task = Some(tokio::spawn(async move {
                let result = download_artifact(&client, &artifact, &dest)
                    .await
                    .map(|bytes| (dest.display().to_string(), bytes));
                let _ = tx.send(TaskResult::Download(result));
            }));
        }
    }

    fn start_plan_request(&mut self, ticket: Ticket) {
        info!(city = %ticket.query(), generation = ticket.generation(), "Dispatching plan request");

        // A newer ticket supersedes whatever is still in flight
        if let Some(task) = self.plan_task.take()
            && !task.is_finished()
        {
            warn!("TaskDispatcher::start_plan_request: aborting superseded request");
            task.abort();
        }

        let service = Arc::clone(&self.planning);
        let tx = self.result_tx.clone();
        self.plan_task = Some(tokio::spawn(async move {
            let result = service.plan(ticket.query()).await;
            let _ = tx.send(TaskResult::Plan { ticket, result });
        }));
    }

    async fn next_result(&mut self) -> Option<TaskResult> {
        self.result_rx.recv().await
    }

    fn handle_task_result(&mut self, state: &mut AppState, result: TaskResult) {
        debug!(?result, "TaskDispatcher::handle_task_result: called");
        match result {
            TaskResult::Plan { ticket, result } => {
                if let Err(ref e) = result {
                    warn!("Plan request failed: {}", e);
                }
                if state.planner.complete(&ticket, result) {
                    self.plan_task = None;
                }
            }
            TaskResult::Download(result) => {
                if let Err(ref e) = result {
                    warn!("Download failed: {}", e);
                }
                state.finish_download(result);
                self.download_task = None;
            }
        }
    }

    fn abort_tasks(&mut self) {
        for task in [self.plan_task.take(), self.download_task.take()].into_iter().flatten() {
            task.abort();
        }
    }
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Plan and download tasks
    tasks: TaskDispatcher,
}

impl TuiRunner {
    pub fn new(terminal: Tui, service: Arc<HttpPlanningClient>, download_dir: PathBuf) -> Self {
        debug!(base_url = %service.base_url(), ?download_dir, "TuiRunner::new: called");
        let state = AppState::with_base_url(service.base_url());
        let planning: Arc<dyn PlanningService> = service.clone();

        Self {
            app: App::with_state(state),
            terminal,
            event_handler: EventHandler::new(TICK_RATE),
            tasks: TaskDispatcher::new(planning, service, download_dir),
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.tasks.dispatch_pending(self.app.state_mut());

            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {}
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(result) = self.tasks.next_result() => {
                    self.tasks.handle_task_result(self.app.state_mut(), result);
                }
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        self.tasks.abort_tasks();
        debug!("TuiRunner::run: exiting");
        Ok(())
    }
}
