use thiserror::Error;

use crate::registry::RouteId;

/// Convenient result alias for the roadnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant describes a rejected request; the map is left exactly as it
/// was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// City names must be non-empty and free of control characters and `;`.
    #[error("invalid city name {name:?}")]
    InvalidCityName { name: String },

    /// Raised when adding a city whose name is already taken.
    #[error("city {name} already exists")]
    DuplicateCity { name: String },

    /// Raised when a city name could not be found in the network.
    #[error("unknown city name: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when both ends of a segment or route are the same city.
    #[error("segment or route endpoints must differ, got {name} twice")]
    IdenticalEndpoints { name: String },

    /// Segment lengths must be positive.
    #[error("segment length must be positive")]
    InvalidLength,

    /// Construction and repair years must be non-zero.
    #[error("invalid year {year}")]
    InvalidYear { year: i32 },

    /// At most one segment may join a pair of cities.
    #[error("a segment between {a} and {b} already exists")]
    DuplicateSegment { a: String, b: String },

    /// Raised when no segment joins the two named cities.
    #[error("no segment between {a} and {b}")]
    UnknownSegment { a: String, b: String },

    /// Repairs may only move a segment's year forward.
    #[error("segment year {current} is newer than requested year {requested}")]
    RepairYearTooOld { current: i32, requested: i32 },

    /// Raised when an explicit route disagrees with an existing segment length.
    #[error("segment between {a} and {b} has length {existing}, not {requested}")]
    SegmentLengthMismatch {
        a: String,
        b: String,
        existing: u32,
        requested: u32,
    },

    /// Route identifiers live in `1..=999`.
    #[error("route id {id} is outside 1..=999")]
    InvalidRouteId { id: RouteId },

    /// Raised when creating a route under an identifier already in use.
    #[error("route {id} already exists")]
    RouteExists { id: RouteId },

    /// Raised when the requested route does not exist.
    #[error("route {id} does not exist")]
    UnknownRoute { id: RouteId },

    /// Extending a route through a city it already visits would close a cycle.
    #[error("city {city} is already on route {route}")]
    CityAlreadyOnRoute { route: RouteId, city: String },

    /// Raised when an explicit route visits the same city twice.
    #[error("route {route} visits {city} more than once")]
    RouteHasLoop { route: RouteId, city: String },

    /// Explicit routes need at least one leg.
    #[error("route {route} needs at least two cities")]
    RouteTooShort { route: RouteId },

    /// Raised when no path exists between two cities under the current exclusions.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when two equally good paths exist and neither is preferable.
    #[error("ambiguous shortest path between {start} and {goal}")]
    AmbiguousPath { start: String, goal: String },

    /// Raised when both ends of a route are equally close to the new city.
    #[error("route {route} can be extended to {city} from either end")]
    AmbiguousExtension { route: RouteId, city: String },

    /// Raised when a dependent route has no unique detour around a removed segment.
    #[error("route {route} has no detour between {start} and {goal}")]
    DetourUnavailable {
        route: RouteId,
        start: String,
        goal: String,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
