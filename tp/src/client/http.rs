//! HTTP implementation of the planning service
//!
//! Sends `POST {base}/api/plan/` with a JSON body and classifies the answer.
//! There is no retry loop: a failed request surfaces immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::{PlanError, PlanOutcome, PlanRequest, PlanResponse, PlanningService};
use crate::config::ServiceConfig;
use crate::domain::Query;

/// Path of the planning endpoint, relative to the base address
pub const PLAN_PATH: &str = "/api/plan/";

/// Planning service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpPlanningClient {
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl HttpPlanningClient {
    /// Create a new client from service configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, PlanError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(PlanError::network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    /// Underlying HTTP client, shared with artifact downloads
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn plan_url(&self) -> String {
        format!("{}{}", self.base_url, PLAN_PATH)
    }
}

#[async_trait]
impl PlanningService for HttpPlanningClient {
    async fn plan(&self, query: &Query) -> Result<PlanOutcome, PlanError> {
        let url = self.plan_url();
        debug!(%url, %query, "plan: called");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&PlanRequest { city: query.as_str() })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "plan: network error");
                PlanError::network(e)
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            // Body is not inspected on this path
            warn!(status, "plan: non-success status");
            return Err(PlanError::http_status(status));
        }

        let body: PlanResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "plan: failed to decode body");
            PlanError::network(e)
        })?;

        let outcome = body.into_outcome();
        match &outcome {
            Ok(plan) => info!(
                city = %query,
                stops = plan.itinerary.len(),
                has_artifact = plan.artifact.is_some(),
                "plan: success"
            ),
            Err(e) => info!(city = %query, error = %e, "plan: service did not return an itinerary"),
        }
        outcome
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            timeout_ms: 5_000,
        }
    }

    #[test]
    fn test_plan_url() {
        let client = HttpPlanningClient::from_config(&config("http://localhost:8000")).unwrap();
        assert_eq!(client.plan_url(), "http://localhost:8000/api/plan/");
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalised() {
        let client = HttpPlanningClient::from_config(&config("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.plan_url(), "http://localhost:8000/api/plan/");
    }

    #[test]
    fn test_timeout_from_config() {
        let client = HttpPlanningClient::from_config(&config("http://localhost:8000")).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on loopback is not expected to accept HTTP
        let client = HttpPlanningClient::from_config(&config("http://127.0.0.1:9")).unwrap();
        let err = client.plan(&Query::parse("Paris").unwrap()).await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().starts_with("Failed to plan trip: "));
    }
}
