//! Plain-text rendering of the request state
//!
//! Pure functions of (RequestState, Query, base address). The TUI views reuse
//! the same labels so both surfaces read alike.

use std::fmt::Write;

use tracing::trace;

use crate::client::PlanError;
use crate::domain::{ArtifactReference, Itinerary, Query};
use crate::planner::{RequestState, ResultView};

pub const DOWNLOAD_LABEL: &str = "📥 Download KML File";
pub const DOWNLOAD_HINT: &str = "Open in Google Earth or Google Maps";

fn city(query: Option<&Query>) -> &str {
    query.map(Query::as_str).unwrap_or_default()
}

pub fn results_title(query: Option<&Query>) -> String {
    format!("Your Optimized Itinerary for {}", city(query))
}

pub fn count_label(count: usize) -> String {
    format!("{} attractions planned", count)
}

pub fn empty_result_message(query: Option<&Query>) -> String {
    format!("No attractions found for {}", city(query))
}

pub fn error_label(err: &PlanError) -> String {
    format!("Error: {}", err)
}

fn write_itinerary(out: &mut String, itinerary: &Itinerary) {
    for (position, attraction) in itinerary.numbered() {
        let _ = writeln!(out, "{:>3}. {}", position, attraction.name());
        let _ = writeln!(out, "     {}", attraction.coordinates_label());
    }
}

fn write_download(out: &mut String, artifact: &ArtifactReference, base_url: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}: {}", DOWNLOAD_LABEL, artifact.resolve(base_url));
    let _ = writeln!(out, "{}", DOWNLOAD_HINT);
}

/// Render the state as text
pub fn render_text(state: &RequestState, query: Option<&Query>, base_url: &str) -> String {
    trace!(?state, "render_text: called");
    let mut out = String::new();

    match state {
        RequestState::Idle => {}
        RequestState::Pending => {
            let _ = writeln!(out, "{}", state.submit_label());
        }
        RequestState::Failed(err) => {
            let _ = writeln!(out, "{}", error_label(err));
        }
        RequestState::Succeeded { .. } => match state.result_view() {
            ResultView::NonEmptyResult { itinerary, artifact } => {
                let _ = writeln!(out, "{}", results_title(query));
                let _ = writeln!(out, "{}", count_label(itinerary.len()));
                let _ = writeln!(out);
                write_itinerary(&mut out, itinerary);
                if let Some(artifact) = artifact {
                    write_download(&mut out, artifact, base_url);
                }
            }
            ResultView::EmptyResult => {
                let _ = writeln!(out, "{}", empty_result_message(query));
            }
            ResultView::NoResultYet => {}
        },
    }

    out
}
