use crate::error::{Error, Result};
use crate::graph::{is_valid_city_name, is_valid_length, is_valid_year, CityId, RoadNetwork};
use crate::output::{RouteDescription, RouteLeg};
use crate::registry::{RouteId, RouteRegistry};
use crate::routing::{self, RouteEnd};

/// Name-based entry point owning the road network and its routes.
///
/// Every mutating method either succeeds completely or leaves the map equal
/// to its previous state, which makes `Clone` + `PartialEq` usable as a
/// before/after snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadMap {
    network: RoadNetwork,
    routes: RouteRegistry,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    pub fn add_city(&mut self, name: &str) -> Result<CityId> {
        self.network.add_city(name)
    }

    /// Add a road between `a` and `b`, creating either city when it is new.
    pub fn add_road(&mut self, a: &str, b: &str, length: u32, year: i32) -> Result<()> {
        for name in [a, b] {
            if !is_valid_city_name(name) {
                return Err(Error::InvalidCityName {
                    name: name.to_string(),
                });
            }
        }
        if a == b {
            return Err(Error::IdenticalEndpoints {
                name: a.to_string(),
            });
        }
        if !is_valid_length(length) {
            return Err(Error::InvalidLength);
        }
        if !is_valid_year(year) {
            return Err(Error::InvalidYear { year });
        }
        if let (Some(id_a), Some(id_b)) = (self.network.city_id(a), self.network.city_id(b)) {
            if self.network.find_segment(id_a, id_b).is_some() {
                return Err(Error::DuplicateSegment {
                    a: a.to_string(),
                    b: b.to_string(),
                });
            }
        }

        let id_a = self.network.city_or_insert(a)?;
        let id_b = self.network.city_or_insert(b)?;
        self.network.add_segment(id_a, id_b, length, year)?;
        Ok(())
    }

    /// Move the year of the road between `a` and `b` forward.
    pub fn repair_road(&mut self, a: &str, b: &str, year: i32) -> Result<()> {
        let id_a = self.network.require_city(a)?;
        let id_b = self.network.require_city(b)?;
        self.network.repair_segment(id_a, id_b, year)?;
        Ok(())
    }

    pub fn new_route(&mut self, id: RouteId, a: &str, b: &str) -> Result<()> {
        let id_a = self.network.require_city(a)?;
        let id_b = self.network.require_city(b)?;
        routing::create_route(&mut self.network, &mut self.routes, id, id_a, id_b)
    }

    pub fn extend_route(&mut self, id: RouteId, city: &str) -> Result<RouteEnd> {
        let city = self.network.require_city(city)?;
        routing::extend_route(&mut self.network, &mut self.routes, id, city)
    }

    /// Remove the road between `a` and `b`, detouring every route that uses it.
    pub fn remove_road(&mut self, a: &str, b: &str) -> Result<usize> {
        let id_a = self.network.require_city(a)?;
        let id_b = self.network.require_city(b)?;
        routing::remove_segment(&mut self.network, &mut self.routes, id_a, id_b)
    }

    pub fn remove_route(&mut self, id: RouteId) -> Result<()> {
        routing::remove_route(&mut self.network, &mut self.routes, id).map(|_| ())
    }

    pub fn define_route(&mut self, id: RouteId, origin: &str, legs: &[RouteLeg]) -> Result<()> {
        routing::define_route(&mut self.network, &mut self.routes, id, origin, legs)
    }

    /// Structured description of route `id`, `None` when the id is unused.
    pub fn route_description(&self, id: RouteId) -> Option<RouteDescription> {
        self.routes
            .get(id)
            .map(|route| RouteDescription::from_route(&self.network, route))
    }

    /// `id;city;length;year;city;...`, or an empty string for unused ids.
    pub fn describe_route(&self, id: RouteId) -> String {
        self.route_description(id)
            .map(|description| description.to_string())
            .unwrap_or_default()
    }
}
