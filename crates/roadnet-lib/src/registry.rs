use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::graph::{CityId, RoadNetwork, SegmentId};

/// Numeric identifier for a route.
pub type RouteId = u32;

/// Smallest assignable route identifier.
pub const MIN_ROUTE_ID: RouteId = 1;

/// Largest assignable route identifier.
pub const MAX_ROUTE_ID: RouteId = 999;

/// Whether `id` lies in the assignable range `1..=999`.
pub fn is_valid_route_id(id: RouteId) -> bool {
    (MIN_ROUTE_ID..=MAX_ROUTE_ID).contains(&id)
}

/// A simple path through the network stored as an ordered chain of segments.
///
/// The chain always starts at `first_city` and ends at `last_city`; every
/// pair of consecutive segments shares exactly one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id: RouteId,
    chain: Vec<SegmentId>,
    first_city: CityId,
    last_city: CityId,
}

impl Route {
    pub(crate) fn new(
        id: RouteId,
        first_city: CityId,
        last_city: CityId,
        chain: Vec<SegmentId>,
    ) -> Self {
        Self {
            id,
            chain,
            first_city,
            last_city,
        }
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn first_city(&self) -> CityId {
        self.first_city
    }

    pub fn last_city(&self) -> CityId {
        self.last_city
    }

    /// Segments in route order, from the first city to the last.
    pub fn segments(&self) -> &[SegmentId] {
        &self.chain
    }

    /// Number of segments in the route.
    pub fn hop_count(&self) -> usize {
        self.chain.len()
    }

    /// Index of `segment` within the chain.
    pub fn position_of(&self, segment: SegmentId) -> Option<usize> {
        self.chain.iter().position(|&id| id == segment)
    }

    /// Cities visited by the route, in order, starting with the first city.
    pub fn cities(&self, network: &RoadNetwork) -> Vec<CityId> {
        let mut cities = Vec::with_capacity(self.chain.len() + 1);
        let mut current = self.first_city;
        cities.push(current);
        for &id in &self.chain {
            let Some(next) = network
                .segment(id)
                .and_then(|segment| segment.other_end(current))
            else {
                break;
            };
            cities.push(next);
            current = next;
        }
        cities
    }

    /// Whether the route passes through `city`, including its endpoints.
    pub fn contains_city(&self, network: &RoadNetwork, city: CityId) -> bool {
        city == self.first_city
            || city == self.last_city
            || self.chain.iter().any(|&id| {
                network
                    .segment(id)
                    .map(|segment| segment.touches(city))
                    .unwrap_or(false)
            })
    }

    /// Put `chain` in front of the route; it must end at the current first city.
    pub(crate) fn prepend(&mut self, new_first: CityId, chain: &[SegmentId]) {
        self.chain.splice(0..0, chain.iter().copied());
        self.first_city = new_first;
    }

    /// Append `chain`; it must start at the current last city.
    pub(crate) fn append(&mut self, new_last: CityId, chain: &[SegmentId]) {
        self.chain.extend_from_slice(chain);
        self.last_city = new_last;
    }

    /// Replace the segment at `index` with `chain`, which must join the same
    /// two cities in route order.
    pub(crate) fn replace_segment(&mut self, index: usize, chain: &[SegmentId]) {
        self.chain.splice(index..=index, chain.iter().copied());
    }
}

/// Registry of routes keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: BTreeMap<RouteId, Route>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.routes.get_mut(&id)
    }

    pub fn contains(&self, id: RouteId) -> bool {
        self.routes.contains_key(&id)
    }

    pub(crate) fn insert(&mut self, route: Route) {
        self.routes.insert(route.id, route);
    }

    pub(crate) fn remove(&mut self, id: RouteId) -> Option<Route> {
        self.routes.remove(&id)
    }

    /// Routes in ascending identifier order.
    pub fn iter(&self) -> btree_map::Values<'_, RouteId, Route> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
