//! Route maintenance on top of the path engine.
//!
//! This module provides:
//! - [`create_route`] - register a new route along the best path between two cities
//! - [`extend_route`] - grow a route from whichever end is strictly closer to a city
//! - [`remove_route`] - drop a route and its segment back-references
//! - [`remove_segment`] - delete a segment, rerouting every dependent route
//! - [`define_route`] - register a route from an explicit list of legs
//!
//! Every operation is a transaction: on error the network and the registry are
//! left exactly as they were.

mod define;
mod detour;

pub use define::define_route;
pub use detour::remove_segment;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{CityId, RoadNetwork, SegmentId};
use crate::path::{find_shortest_path, PathConstraints, PathOutcome};
use crate::registry::{is_valid_route_id, Route, RouteId, RouteRegistry};

/// End of a route that an extension grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEnd {
    First,
    Last,
}

/// Create route `id` along the unique best path from `first` to `last`.
pub fn create_route(
    network: &mut RoadNetwork,
    routes: &mut RouteRegistry,
    id: RouteId,
    first: CityId,
    last: CityId,
) -> Result<()> {
    ensure_route_id_available(routes, id)?;
    let first_name = city_label(network, first);
    if first == last {
        return Err(Error::IdenticalEndpoints { name: first_name });
    }

    // Searching towards `first` lets the backward walk yield route order.
    let outcome = find_shortest_path(network, last, first, &PathConstraints::default());
    let path = match outcome {
        PathOutcome::Found(path) => path,
        other => return Err(path_failure(network, &other, first, last)),
    };

    let chain = path.segments_from_destination().to_vec();
    debug!(
        route = id,
        first = %first_name,
        last = %city_label(network, last),
        distance = path.distance,
        hops = chain.len(),
        "created route"
    );
    register_route(network, routes, Route::new(id, first, last, chain));
    Ok(())
}

/// Extend route `id` so that it ends (or starts) at `city`.
///
/// Every city already on the route is excluded from both searches, so the
/// extended route stays simple. Returns the end the route grew from.
pub fn extend_route(
    network: &mut RoadNetwork,
    routes: &mut RouteRegistry,
    id: RouteId,
    city: CityId,
) -> Result<RouteEnd> {
    let route = lookup_route(routes, id)?;
    let city_name = network
        .city_name(city)
        .map(str::to_string)
        .ok_or_else(|| Error::UnknownCity {
            name: format!("#{city}"),
            suggestions: Vec::new(),
        })?;
    if route.contains_city(network, city) {
        return Err(Error::CityAlreadyOnRoute {
            route: id,
            city: city_name,
        });
    }

    let (first, last) = (route.first_city(), route.last_city());
    let constraints = PathConstraints::excluding(route.cities(network));
    let front = find_shortest_path(network, first, city, &constraints);
    let back = find_shortest_path(network, city, last, &constraints);

    let (end, chain) = match (front, back) {
        (PathOutcome::Found(front), PathOutcome::Found(back)) => {
            if front.distance < back.distance {
                (RouteEnd::First, front.segments_from_destination().to_vec())
            } else if back.distance < front.distance {
                (RouteEnd::Last, back.segments_from_destination().to_vec())
            } else {
                return Err(Error::AmbiguousExtension {
                    route: id,
                    city: city_name,
                });
            }
        }
        (PathOutcome::Found(front), _) => {
            (RouteEnd::First, front.segments_from_destination().to_vec())
        }
        (_, PathOutcome::Found(back)) => {
            (RouteEnd::Last, back.segments_from_destination().to_vec())
        }
        (front, back) => {
            let start = city_label(network, first);
            return Err(if front.is_ambiguous() || back.is_ambiguous() {
                Error::AmbiguousPath {
                    start,
                    goal: city_name,
                }
            } else {
                Error::RouteNotFound {
                    start,
                    goal: city_name,
                }
            });
        }
    };

    link_chain(network, &chain, id);
    if let Some(route) = routes.get_mut(id) {
        match end {
            // Both backward walks already run in route order.
            RouteEnd::First => route.prepend(city, &chain),
            RouteEnd::Last => route.append(city, &chain),
        }
    }
    debug!(route = id, city = %city_name, ?end, hops = chain.len(), "extended route");
    Ok(end)
}

/// Remove route `id` and every back-reference to it.
pub fn remove_route(
    network: &mut RoadNetwork,
    routes: &mut RouteRegistry,
    id: RouteId,
) -> Result<Route> {
    lookup_route(routes, id)?;
    let route = routes.remove(id).ok_or(Error::UnknownRoute { id })?;
    for &segment in route.segments() {
        network.unlink_route(segment, id);
    }
    debug!(route = id, hops = route.hop_count(), "removed route");
    Ok(route)
}

/// Fail unless `id` is in range and not yet taken.
fn ensure_route_id_available(routes: &RouteRegistry, id: RouteId) -> Result<()> {
    if !is_valid_route_id(id) {
        return Err(Error::InvalidRouteId { id });
    }
    if routes.contains(id) {
        return Err(Error::RouteExists { id });
    }
    Ok(())
}

fn lookup_route(routes: &RouteRegistry, id: RouteId) -> Result<&Route> {
    if !is_valid_route_id(id) {
        return Err(Error::InvalidRouteId { id });
    }
    routes.get(id).ok_or(Error::UnknownRoute { id })
}

/// Link every segment of `route` back to it and store it.
fn register_route(network: &mut RoadNetwork, routes: &mut RouteRegistry, route: Route) {
    link_chain(network, route.segments(), route.id());
    routes.insert(route);
}

fn link_chain(network: &mut RoadNetwork, chain: &[SegmentId], route: RouteId) {
    for &segment in chain {
        network.link_route(segment, route);
    }
}

fn path_failure(network: &RoadNetwork, outcome: &PathOutcome, start: CityId, goal: CityId) -> Error {
    let start = city_label(network, start);
    let goal = city_label(network, goal);
    if outcome.is_ambiguous() {
        Error::AmbiguousPath { start, goal }
    } else {
        Error::RouteNotFound { start, goal }
    }
}

fn city_label(network: &RoadNetwork, id: CityId) -> String {
    network
        .city_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{id}"))
}
