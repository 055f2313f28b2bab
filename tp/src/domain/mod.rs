//! Domain types for the trip planner
//!
//! Queries are validated on construction. Attractions and itineraries are
//! only ever produced by the planning service and are read-only afterwards.

mod itinerary;
mod query;

pub use itinerary::{ArtifactReference, Attraction, Itinerary, format_coordinate};
pub use query::{EMPTY_INPUT_MESSAGE, Query};
