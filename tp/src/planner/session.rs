//! Planner session
//!
//! Owns the single `RequestState`, the query being displayed, and a ticket
//! counter. Every accepted submit issues a new ticket; a result is applied only
//! if it carries the current ticket, so a newer submit supersedes any older
//! request still in flight.

use tracing::{debug, info, warn};

use super::state::{RequestEvent, RequestState, transition};
use crate::client::{PlanError, PlanOutcome, PlanningService};
use crate::domain::Query;

/// Handle for one dispatched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: Query,
}

impl Ticket {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Stateful request/response coordinator
#[derive(Debug, Default)]
pub struct Planner {
    state: RequestState,
    query: Option<Query>,
    generation: u64,
}

impl Planner {
    pub fn new() -> Self {
        debug!("Planner::new: called");
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Query of the most recent accepted submit, used for display
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Validate input and move to `Pending`
    ///
    /// Empty input fails synchronously with `EmptyInput` and no ticket is
    /// issued. A rejection also retires the ticket of any request still in
    /// flight. A valid submit clears any previous result before returning.
    pub fn submit(&mut self, raw: &str) -> Result<Ticket, PlanError> {
        debug!(raw_len = raw.len(), generation = self.generation, "Planner::submit: called");
        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(err) => {
                debug!(%err, "Planner::submit: rejected");
                if self.state.is_pending() {
                    info!(generation = self.generation, "Planner::submit: retiring in-flight request");
                    self.generation += 1;
                }
                self.state = transition(&self.state, RequestEvent::Rejected(err.clone()));
                return Err(err);
            }
        };

        if self.state.is_pending() {
            info!(generation = self.generation, "Planner::submit: superseding in-flight request");
        }

        self.generation += 1;
        self.state = transition(&self.state, RequestEvent::Submit);
        self.query = Some(query.clone());

        Ok(Ticket {
            generation: self.generation,
            query,
        })
    }

    /// Apply the result of a dispatched request
    ///
    /// Returns false (and leaves state untouched) if the ticket was superseded.
    pub fn complete(&mut self, ticket: &Ticket, result: Result<PlanOutcome, PlanError>) -> bool {
        debug!(
            ticket = ticket.generation,
            current = self.generation,
            ok = result.is_ok(),
            "Planner::complete: called"
        );
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Planner::complete: dropping stale result"
            );
            return false;
        }

        self.state = transition(&self.state, RequestEvent::Resolved(result));
        true
    }

    /// Submit, await the service, and apply the result
    pub async fn plan(&mut self, service: &dyn PlanningService, raw: &str) -> &RequestState {
        debug!("Planner::plan: called");
        if let Ok(ticket) = self.submit(raw) {
            let result = service.plan(ticket.query()).await;
            self.complete(&ticket, result);
        }
        &self.state
    }
}
