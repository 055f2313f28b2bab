//! Wire types for the planning service

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PlanError;
use crate::domain::{ArtifactReference, Attraction, Itinerary};

/// Body of `POST /api/plan/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest<'a> {
    pub city: &'a str,
}

/// Body of a 2xx answer from `/api/plan/`
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanResponse {
    #[serde(default)]
    pub itinerary: Option<Vec<Attraction>>,
    #[serde(default)]
    pub kml_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful plan: the itinerary plus an optional artifact reference
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub itinerary: Itinerary,
    pub artifact: Option<ArtifactReference>,
}

impl PlanResponse {
    /// Classify the payload
    ///
    /// An itinerary wins over a simultaneous error field. A blank error
    /// message counts as no error at all.
    pub fn into_outcome(self) -> Result<PlanOutcome, PlanError> {
        debug!(
            has_itinerary = self.itinerary.is_some(),
            has_error = self.error.is_some(),
            "PlanResponse::into_outcome: called"
        );
        let error = self.error.filter(|message| !message.trim().is_empty());
        match (self.itinerary, error) {
            (Some(attractions), _) => Ok(PlanOutcome {
                itinerary: Itinerary::new(attractions),
                artifact: ArtifactReference::from_path(self.kml_path),
            }),
            (None, Some(message)) => Err(PlanError::Service(message)),
            (None, None) => Err(PlanError::AmbiguousEmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<PlanOutcome, PlanError> {
        serde_json::from_str::<PlanResponse>(json).unwrap().into_outcome()
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(PlanRequest { city: "Paris" }).unwrap();
        assert_eq!(body, serde_json::json!({ "city": "Paris" }));
    }

    #[test]
    fn test_itinerary_with_kml_path() {
        let outcome = parse(
            r#"{"itinerary":[{"name":"Eiffel Tower","lat":48.858370,"lng":2.294481}],"kml_path":"/files/paris.kml"}"#,
        )
        .unwrap();
        assert_eq!(outcome.itinerary.len(), 1);
        assert_eq!(outcome.artifact.unwrap().path(), "/files/paris.kml");
    }

    #[test]
    fn test_itinerary_without_kml_path_is_still_success() {
        let outcome = parse(r#"{"itinerary":[{"name":"Louvre","lat":48.8606,"lng":2.3376}]}"#).unwrap();
        assert!(outcome.artifact.is_none());
    }

    #[test]
    fn test_empty_itinerary_with_null_kml_path() {
        let outcome = parse(r#"{"itinerary":[],"kml_path":null}"#).unwrap();
        assert!(outcome.itinerary.is_empty());
        assert!(outcome.artifact.is_none());
    }

    #[test]
    fn test_service_error() {
        let err = parse(r#"{"error":"X"}"#).unwrap_err();
        assert_eq!(err, PlanError::Service("X".to_string()));
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn test_itinerary_takes_precedence_over_error() {
        let outcome = parse(r#"{"itinerary":[],"error":"partial"}"#);
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_neither_field_is_ambiguous() {
        let err = parse(r#"{"status":"success","message":"Successfully received city: Paris"}"#).unwrap_err();
        assert_eq!(err, PlanError::AmbiguousEmptyResponse);
    }

    #[test]
    fn test_blank_error_is_ambiguous() {
        assert_eq!(parse(r#"{"error":""}"#).unwrap_err(), PlanError::AmbiguousEmptyResponse);
        assert_eq!(parse(r#"{"error":"   "}"#).unwrap_err(), PlanError::AmbiguousEmptyResponse);
    }
}
