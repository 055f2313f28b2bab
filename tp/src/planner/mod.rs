//! Request state machine and the session that drives it
//!
//! - [`state`] holds the pure `RequestState` transitions
//! - [`session`] owns the state, the displayed query and the ticket counter

pub mod session;
pub mod state;

pub use session::{Planner, Ticket};
pub use state::{RequestEvent, RequestState, ResultView, transition};
