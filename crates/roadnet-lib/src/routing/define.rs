use std::collections::HashSet;

use tracing::debug;

use super::{ensure_route_id_available, register_route};
use crate::error::{Error, Result};
use crate::graph::{is_valid_city_name, is_valid_length, is_valid_year, RoadNetwork};
use crate::output::RouteLeg;
use crate::registry::{Route, RouteId, RouteRegistry};

/// Register route `id` from `origin` through every leg in order.
///
/// Missing cities and segments are created. A segment that already joins two
/// consecutive cities must have the given length, and its year is raised to
/// the given one. All checks run before the network is touched.
pub fn define_route(
    network: &mut RoadNetwork,
    routes: &mut RouteRegistry,
    id: RouteId,
    origin: &str,
    legs: &[RouteLeg],
) -> Result<()> {
    ensure_route_id_available(routes, id)?;
    validate_legs(network, id, origin, legs)?;

    let first = network.city_or_insert(origin)?;
    let mut current = first;
    let mut chain = Vec::with_capacity(legs.len());
    for leg in legs {
        let next = network.city_or_insert(&leg.city)?;
        let segment = match network.find_segment(current, next) {
            Some(_) => network.repair_segment(current, next, leg.year)?,
            None => network.add_segment(current, next, leg.length, leg.year)?,
        };
        chain.push(segment);
        current = next;
    }

    debug!(route = id, origin, hops = chain.len(), "defined route");
    register_route(network, routes, Route::new(id, first, current, chain));
    Ok(())
}

fn validate_legs(network: &RoadNetwork, id: RouteId, origin: &str, legs: &[RouteLeg]) -> Result<()> {
    if legs.is_empty() {
        return Err(Error::RouteTooShort { route: id });
    }

    let mut seen = HashSet::with_capacity(legs.len() + 1);
    let names = std::iter::once(origin).chain(legs.iter().map(|leg| leg.city.as_str()));
    for name in names {
        if !is_valid_city_name(name) {
            return Err(Error::InvalidCityName {
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(Error::RouteHasLoop {
                route: id,
                city: name.to_string(),
            });
        }
    }

    let mut previous = origin;
    for leg in legs {
        if !is_valid_length(leg.length) {
            return Err(Error::InvalidLength);
        }
        if !is_valid_year(leg.year) {
            return Err(Error::InvalidYear { year: leg.year });
        }

        let existing = network
            .city_id(previous)
            .zip(network.city_id(&leg.city))
            .and_then(|(a, b)| network.find_segment(a, b))
            .and_then(|segment| network.segment(segment));
        if let Some(segment) = existing {
            if segment.length != leg.length {
                return Err(Error::SegmentLengthMismatch {
                    a: previous.to_string(),
                    b: leg.city.clone(),
                    existing: segment.length,
                    requested: leg.length,
                });
            }
            if segment.year > leg.year {
                return Err(Error::RepairYearTooOld {
                    current: segment.year,
                    requested: leg.year,
                });
            }
        }
        previous = &leg.city;
    }
    Ok(())
}
