//! Attractions, itineraries and artifact references

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single stop returned by the planning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    name: String,
    lat: f64,
    lng: f64,
}

impl Attraction {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Coordinates for display, e.g. "📍 48.8584, 2.2945"
    ///
    /// Rounding happens only in the returned string; the stored values keep
    /// their full precision.
    pub fn coordinates_label(&self) -> String {
        format!("📍 {}, {}", format_coordinate(self.lat), format_coordinate(self.lng))
    }
}

/// Format a latitude or longitude with exactly 4 decimal places
///
/// A value sitting exactly halfway between two 4-place decimals rounds away
/// from zero. Only multiples of 1/32 can be such ties, and for those the
/// scaled value is exact.
pub fn format_coordinate(value: f64) -> String {
    trace!(value, "format_coordinate: called");
    let scaled = value * 10_000.0;
    if (value * 32.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        return format!("{:.4}", scaled.round() / 10_000.0);
    }
    format!("{:.4}", value)
}

/// Ordered attractions in visit order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary(Vec<Attraction>);

impl Itinerary {
    pub fn new(attractions: Vec<Attraction>) -> Self {
        Self(attractions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.0
    }

    /// Entries paired with their 1-based position
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Attraction)> {
        self.0.iter().enumerate().map(|(idx, a)| (idx + 1, a))
    }
}

impl From<Vec<Attraction>> for Itinerary {
    fn from(attractions: Vec<Attraction>) -> Self {
        Self(attractions)
    }
}

/// Server-relative path to a generated KML file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference(String);

impl ArtifactReference {
    /// Build a reference from the service's `kml_path`; blank paths mean "none"
    pub fn from_path(path: Option<String>) -> Option<Self> {
        trace!(?path, "ArtifactReference::from_path: called");
        path.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).map(Self)
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Absolute URL of the artifact on the given service base address
    pub fn resolve(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.0.starts_with('/') {
            format!("{}{}", base, self.0)
        } else {
            format!("{}/{}", base, self.0)
        }
    }

    /// Last path segment, used as the default local file name
    pub fn file_name(&self) -> Option<&str> {
        self.0.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

impl fmt::Display for ArtifactReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
