//! Roadnet library entry points.
//!
//! This crate keeps a network of cities joined by undirected road segments
//! and a registry of numbered routes through it. Routes are built along the
//! shortest path (preferring recently built roads on ties), extended one city
//! at a time, and rerouted around segments that get removed. Higher-level
//! consumers (the CLI) should only depend on the items exported here.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod map;
pub mod output;
pub mod path;
pub mod registry;
pub mod routing;

pub use error::{Error, Result};
pub use graph::{City, CityId, RoadNetwork, Segment, SegmentId};
pub use map::RoadMap;
pub use output::{RouteDescription, RouteLeg, RouteRenderMode};
pub use path::{find_shortest_path, PathConstraints, PathOutcome, ShortestPath};
pub use registry::{is_valid_route_id, Route, RouteId, RouteRegistry};
pub use routing::RouteEnd;
