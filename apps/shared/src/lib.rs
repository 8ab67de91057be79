//! Types shared by the roadmap API and its client.

pub mod roadmap;

pub use roadmap::{is_valid_roadmap, Resource, RoadmapShapeError, RoadmapSuggestion};
