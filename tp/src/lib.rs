//! Trip Planner - terminal client for the trip planning service
//!
//! Collects a city name, posts it to the planning service and renders the
//! returned itinerary together with a link to the generated KML file.
//!
//! # Modules
//!
//! - [`domain`] - Query, Attraction, Itinerary and ArtifactReference
//! - [`client`] - `PlanningService` trait and HTTP implementation
//! - [`planner`] - Request state machine and session
//! - [`render`] - Plain-text rendering for one-shot output
//! - [`download`] - KML artifact downloads
//! - [`tui`] - Interactive terminal form
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod download;
pub mod planner;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use client::{HttpPlanningClient, PlanError, PlanOutcome, PlanResponse, PlanningService};
pub use config::{Config, DownloadConfig, ServiceConfig};
pub use domain::{ArtifactReference, Attraction, Itinerary, Query};
pub use planner::{Planner, RequestEvent, RequestState, ResultView, Ticket, transition};
