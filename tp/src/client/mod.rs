//! Planning service client
//!
//! The [`PlanningService`] trait is the single seam between the client state
//! machine and the remote planner. [`HttpPlanningClient`] talks to the real
//! service over HTTP.

use async_trait::async_trait;

mod error;
mod http;
mod types;

pub use error::PlanError;
pub use http::HttpPlanningClient;
pub use types::{PlanOutcome, PlanRequest, PlanResponse};

use crate::domain::Query;

/// Remote trip planner
///
/// One call per submitted query. Implementations never retry.
#[async_trait]
pub trait PlanningService: Send + Sync {
    /// Ask the service to plan a trip for the given city
    async fn plan(&self, query: &Query) -> Result<PlanOutcome, PlanError>;

    /// Base address used to resolve artifact references
    fn base_url(&self) -> &str;
}
