//! Client-side request state
//!
//! `transition` is a pure function of (current state, event). Nothing here
//! knows about terminals, HTTP or tasks.

use tracing::debug;

use crate::client::{PlanError, PlanOutcome};
use crate::domain::{ArtifactReference, Itinerary};

/// Submit button label while idle
pub const SUBMIT_LABEL: &str = "Plan Trip";

/// Submit button label while a request is in flight
pub const WORKING_LABEL: &str = "Planning your trip...";

/// Exactly one of these holds at any time
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded {
        itinerary: Itinerary,
        artifact: Option<ArtifactReference>,
    },
    Failed(PlanError),
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum RequestEvent {
    /// A valid query was dispatched
    Submit,
    /// Input was rejected locally before dispatch
    Rejected(PlanError),
    /// The in-flight request finished
    Resolved(Result<PlanOutcome, PlanError>),
}

/// What the results block should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    NoResultYet,
    EmptyResult,
    NonEmptyResult {
        itinerary: &'a Itinerary,
        artifact: Option<&'a ArtifactReference>,
    },
}

/// Compute the next state
///
/// - `Submit` always clears any prior result or error and goes to `Pending`
/// - `Rejected` always fails, even over an in-flight request
/// - `Resolved` only applies while `Pending`
pub fn transition(state: &RequestState, event: RequestEvent) -> RequestState {
    debug!(?state, ?event, "transition: called");
    match (state, event) {
        (_, RequestEvent::Submit) => RequestState::Pending,
        (_, RequestEvent::Rejected(err)) => RequestState::Failed(err),
        (RequestState::Pending, RequestEvent::Resolved(Ok(outcome))) => RequestState::Succeeded {
            itinerary: outcome.itinerary,
            artifact: outcome.artifact,
        },
        (RequestState::Pending, RequestEvent::Resolved(Err(err))) => RequestState::Failed(err),
        (other, RequestEvent::Resolved(_)) => {
            debug!("transition: resolution without pending request, ignoring");
            other.clone()
        }
    }
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn error(&self) -> Option<&PlanError> {
        match self {
            RequestState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            RequestState::Succeeded { itinerary, .. } => Some(itinerary),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&ArtifactReference> {
        match self {
            RequestState::Succeeded { artifact, .. } => artifact.as_ref(),
            _ => None,
        }
    }

    /// Submit affordance label for this state
    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() { WORKING_LABEL } else { SUBMIT_LABEL }
    }

    /// Collapse the state into the three cases the results block cares about
    pub fn result_view(&self) -> ResultView<'_> {
        match self {
            RequestState::Succeeded { itinerary, .. } if itinerary.is_empty() => ResultView::EmptyResult,
            RequestState::Succeeded { itinerary, artifact } => ResultView::NonEmptyResult {
                itinerary,
                artifact: artifact.as_ref(),
            },
            _ => ResultView::NoResultYet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attraction;

    fn paris() -> PlanOutcome {
        PlanOutcome {
            itinerary: Itinerary::new(vec![Attraction::new("Eiffel Tower", 48.858370, 2.294481)]),
            artifact: ArtifactReference::from_path(Some("/files/paris.kml".to_string())),
        }
    }

    fn succeeded() -> RequestState {
        transition(&RequestState::Pending, RequestEvent::Resolved(Ok(paris())))
    }

    #[test]
    fn test_idle_to_pending_on_submit() {
        let next = transition(&RequestState::Idle, RequestEvent::Submit);
        assert_eq!(next, RequestState::Pending);
        assert_eq!(next.submit_label(), WORKING_LABEL);
    }

    #[test]
    fn test_submit_clears_prior_success() {
        let next = transition(&succeeded(), RequestEvent::Submit);
        assert_eq!(next, RequestState::Pending);
        assert!(next.itinerary().is_none());
        assert!(next.artifact().is_none());
    }

    #[test]
    fn test_submit_clears_prior_failure() {
        let failed = RequestState::Failed(PlanError::http_status(500));
        let next = transition(&failed, RequestEvent::Submit);
        assert!(next.error().is_none());
    }

    #[test]
    fn test_pending_to_succeeded() {
        let state = succeeded();
        assert_eq!(state.itinerary().map(Itinerary::len), Some(1));
        assert_eq!(state.artifact().map(ArtifactReference::path), Some("/files/paris.kml"));
        assert_eq!(state.submit_label(), SUBMIT_LABEL);
    }

    #[test]
    fn test_pending_to_failed_sets_no_result() {
        let state = transition(
            &RequestState::Pending,
            RequestEvent::Resolved(Err(PlanError::http_status(502))),
        );
        assert_eq!(state.error().and_then(PlanError::status), Some(502));
        assert!(state.itinerary().is_none());
        assert!(state.artifact().is_none());
    }

    #[test]
    fn test_rejection_from_idle_fails() {
        let state = transition(&RequestState::Idle, RequestEvent::Rejected(PlanError::EmptyInput));
        assert_eq!(state, RequestState::Failed(PlanError::EmptyInput));
    }

    #[test]
    fn test_rejection_while_pending_fails() {
        let state = transition(&RequestState::Pending, RequestEvent::Rejected(PlanError::EmptyInput));
        assert_eq!(state, RequestState::Failed(PlanError::EmptyInput));
        assert_eq!(state.submit_label(), SUBMIT_LABEL);
    }

    #[test]
    fn test_resolution_when_not_pending_is_ignored() {
        let state = transition(&RequestState::Idle, RequestEvent::Resolved(Ok(paris())));
        assert_eq!(state, RequestState::Idle);
    }

    #[test]
    fn test_result_view_tri_state() {
        assert_eq!(RequestState::Idle.result_view(), ResultView::NoResultYet);
        assert_eq!(RequestState::Pending.result_view(), ResultView::NoResultYet);

        let empty = RequestState::Succeeded {
            itinerary: Itinerary::default(),
            artifact: None,
        };
        assert_eq!(empty.result_view(), ResultView::EmptyResult);

        let state = succeeded();
        assert!(matches!(
            state.result_view(),
            ResultView::NonEmptyResult { artifact: Some(_), .. }
        ));
    }
}
