use tracing::debug;

use super::{city_label, link_chain};
use crate::error::{Error, Result};
use crate::graph::{CityId, RoadNetwork, SegmentId};
use crate::path::{find_shortest_path, PathConstraints, PathOutcome};
use crate::registry::{RouteId, RouteRegistry};

/// Replacement chain for one route, computed while the segment is pending removal.
#[derive(Debug)]
struct Detour {
    route: RouteId,
    position: usize,
    chain: Vec<SegmentId>,
}

/// Remove the segment joining `a` and `b`, rerouting every route that uses it.
///
/// Detours for all dependent routes are computed before anything is changed.
/// If one of them has no unique detour the removal is abandoned and the map is
/// left untouched. Returns the number of rerouted routes.
pub fn remove_segment(
    network: &mut RoadNetwork,
    routes: &mut RouteRegistry,
    a: CityId,
    b: CityId,
) -> Result<usize> {
    let segment = network.require_segment(a, b)?;
    let dependents: Vec<RouteId> = network
        .segment(segment)
        .map(|s| s.routes().to_vec())
        .unwrap_or_default();

    network.set_pending_removal(segment, true);
    let planned = plan_detours(network, routes, segment, &dependents);
    network.set_pending_removal(segment, false);
    let detours = match planned {
        Ok(detours) => detours,
        Err(err) => {
            debug!(segment, error = %err, "segment removal abandoned");
            return Err(err);
        }
    };

    for detour in &detours {
        link_chain(network, &detour.chain, detour.route);
        if let Some(route) = routes.get_mut(detour.route) {
            route.replace_segment(detour.position, &detour.chain);
        }
    }
    network.remove_segment(segment);
    debug!(
        segment,
        a = %city_label(network, a),
        b = %city_label(network, b),
        rerouted = detours.len(),
        "removed segment"
    );
    Ok(detours.len())
}

fn plan_detours(
    network: &RoadNetwork,
    routes: &RouteRegistry,
    segment: SegmentId,
    dependents: &[RouteId],
) -> Result<Vec<Detour>> {
    let mut detours = Vec::with_capacity(dependents.len());
    for &id in dependents {
        let Some(route) = routes.get(id) else {
            continue;
        };
        let Some(position) = route.position_of(segment) else {
            continue;
        };
        let cities = route.cities(network);
        let (Some(&start), Some(&stop)) = (cities.get(position), cities.get(position + 1)) else {
            continue;
        };

        // Search towards `start` so the backward walk runs start..stop.
        let constraints = PathConstraints::excluding(cities.iter().copied());
        match find_shortest_path(network, stop, start, &constraints) {
            PathOutcome::Found(path) => {
                detours.push(Detour {
                    route: id,
                    position,
                    chain: path.segments_from_destination().to_vec(),
                });
            }
            outcome => {
                debug!(route = id, ambiguous = outcome.is_ambiguous(), "no detour");
                return Err(Error::DetourUnavailable {
                    route: id,
                    start: city_label(network, start),
                    goal: city_label(network, stop),
                });
            }
        }
    }
    Ok(detours)
}
