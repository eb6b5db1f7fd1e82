//! Common test utilities and map builders.
//!
//! Integration tests describe small road networks as `(a, b, length, year)`
//! tuples and build a [`RoadMap`] from them.

use roadnet_lib::{CityId, RoadMap, RoadNetwork};

/// Build a map from `(a, b, length, year)` road tuples.
pub fn map_with_roads(roads: &[(&str, &str, u32, i32)]) -> RoadMap {
    let mut map = RoadMap::new();
    for &(a, b, length, year) in roads {
        map.add_road(a, b, length, year)
            .unwrap_or_else(|err| panic!("road {a}-{b} should be valid: {err}"));
    }
    map
}

/// Resolve a city that the fixture is known to contain.
#[allow(dead_code)]
pub fn city(network: &RoadNetwork, name: &str) -> CityId {
    network
        .city_id(name)
        .unwrap_or_else(|| panic!("fixture city {name} missing"))
}

/// City names of route `id`, in route order.
#[allow(dead_code)]
pub fn route_cities(map: &RoadMap, id: u32) -> Vec<String> {
    let route = map.routes().get(id).expect("route exists");
    route
        .cities(map.network())
        .into_iter()
        .map(|city| map.network().city_name(city).unwrap().to_string())
        .collect()
}

/// Two disjoint paths of equal length between X and Y:
/// X-P-Y with years (p1, p2) and X-Q-Y with years (q1, q2).
#[allow(dead_code)]
pub fn diamond(p: (i32, i32), q: (i32, i32)) -> RoadMap {
    map_with_roads(&[
        ("X", "P", 5, p.0),
        ("P", "Y", 5, p.1),
        ("X", "Q", 5, q.0),
        ("Q", "Y", 5, q.1),
    ])
}
