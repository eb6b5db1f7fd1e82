use std::collections::HashMap;

use strsim::jaro_winkler;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::RouteId;

/// Dense identifier for a city, assigned in creation order.
pub type CityId = usize;

/// Stable identifier for a road segment. Identifiers are never reused.
pub type SegmentId = usize;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A named city together with the segments that touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    incident: Vec<SegmentId>,
}

impl City {
    /// Segments incident to this city, in insertion order.
    pub fn segments(&self) -> &[SegmentId] {
        &self.incident
    }

    /// Number of segments touching this city.
    pub fn degree(&self) -> usize {
        self.incident.len()
    }
}

/// Undirected road segment between two distinct cities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    ends: (CityId, CityId),
    pub length: u32,
    pub year: i32,
    pending_removal: bool,
    routes: Vec<RouteId>,
}

impl Segment {
    /// Both endpoints in the order they were given at creation.
    pub fn endpoints(&self) -> (CityId, CityId) {
        self.ends
    }

    /// The endpoint opposite `city`, or `None` when `city` is not an endpoint.
    pub fn other_end(&self, city: CityId) -> Option<CityId> {
        match self.ends {
            (a, b) if a == city => Some(b),
            (a, b) if b == city => Some(a),
            _ => None,
        }
    }

    pub fn touches(&self, city: CityId) -> bool {
        self.ends.0 == city || self.ends.1 == city
    }

    /// Whether this segment joins `a` and `b`, in either order.
    pub fn connects(&self, a: CityId, b: CityId) -> bool {
        self.ends == (a, b) || self.ends == (b, a)
    }

    /// Routes currently traversing this segment.
    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }

    /// Set only while a removal is probing for detours.
    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }
}

/// Check the naming rules shared by every city: non-empty, no control
/// characters below U+0020 and no `;`.
pub fn is_valid_city_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c < ' ' || c == ';')
}

/// Segment lengths must be strictly positive.
pub fn is_valid_length(length: u32) -> bool {
    length > 0
}

/// Years may be negative (BCE) but never zero.
pub fn is_valid_year(year: i32) -> bool {
    year != 0
}

/// In-memory graph of cities and road segments.
///
/// Cities live in a dense vector indexed by [`CityId`]. Segments live in
/// slots indexed by [`SegmentId`]; a removed segment leaves an empty slot
/// behind so identifiers held elsewhere never alias a different segment.
/// Empty slots are never reclaimed, so the slot vector grows with every
/// segment ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadNetwork {
    cities: Vec<City>,
    name_to_id: HashMap<String, CityId>,
    segments: Vec<Option<Segment>>,
    live_segments: usize,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new city. Fails when the name is invalid or already taken.
    pub fn add_city(&mut self, name: &str) -> Result<CityId> {
        if !is_valid_city_name(name) {
            return Err(Error::InvalidCityName {
                name: name.to_string(),
            });
        }
        if self.name_to_id.contains_key(name) {
            return Err(Error::DuplicateCity {
                name: name.to_string(),
            });
        }

        let id = self.cities.len();
        self.cities.push(City {
            id,
            name: name.to_string(),
            incident: Vec::new(),
        });
        self.name_to_id.insert(name.to_string(), id);
        debug!(city = id, name, "added city");
        Ok(id)
    }

    /// Return the identifier of `name`, creating the city if needed.
    pub fn city_or_insert(&mut self, name: &str) -> Result<CityId> {
        match self.city_id(name) {
            Some(id) => Ok(id),
            None => self.add_city(name),
        }
    }

    /// Lookup a city identifier by its case-sensitive name.
    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a city name, suggesting close matches when it is unknown.
    pub fn require_city(&self, name: &str) -> Result<CityId> {
        self.city_id(name).ok_or_else(|| Error::UnknownCity {
            name: name.to_string(),
            suggestions: self.fuzzy_city_matches(name, 3),
        })
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id)
    }

    /// Lookup a city name by identifier.
    pub fn city_name(&self, id: CityId) -> Option<&str> {
        self.cities.get(id).map(|city| city.name.as_str())
    }

    /// All cities in creation order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Return up to `limit` existing city names that resemble `name`, best
    /// match first.
    pub fn fuzzy_city_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .cities
            .iter()
            .map(|city| (jaro_winkler(name, &city.name), city.name.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Add a segment between two existing, distinct cities.
    pub fn add_segment(
        &mut self,
        a: CityId,
        b: CityId,
        length: u32,
        year: i32,
    ) -> Result<SegmentId> {
        let name_a = self.known_name(a)?;
        let name_b = self.known_name(b)?;
        if a == b {
            return Err(Error::IdenticalEndpoints { name: name_a });
        }
        if !is_valid_length(length) {
            return Err(Error::InvalidLength);
        }
        if !is_valid_year(year) {
            return Err(Error::InvalidYear { year });
        }
        if self.find_segment(a, b).is_some() {
            return Err(Error::DuplicateSegment {
                a: name_a,
                b: name_b,
            });
        }

        let id = self.segments.len();
        self.segments.push(Some(Segment {
            id,
            ends: (a, b),
            length,
            year,
            pending_removal: false,
            routes: Vec::new(),
        }));
        self.cities[a].incident.push(id);
        self.cities[b].incident.push(id);
        self.live_segments += 1;
        debug!(segment = id, a = %name_a, b = %name_b, length, year, "added segment");
        Ok(id)
    }

    /// Find the segment joining `a` and `b`, regardless of argument order.
    pub fn find_segment(&self, a: CityId, b: CityId) -> Option<SegmentId> {
        let city = self.cities.get(a)?;
        city.incident.iter().copied().find(|&id| {
            self.segment(id)
                .map(|segment| segment.other_end(a) == Some(b))
                .unwrap_or(false)
        })
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id).and_then(Option::as_ref)
    }

    /// Iterate over live segments in identifier order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter_map(Option::as_ref)
    }

    pub fn segment_count(&self) -> usize {
        self.live_segments
    }

    /// Move the year of the segment joining `a` and `b` forward. Equal years
    /// are accepted; older years are rejected.
    pub fn repair_segment(&mut self, a: CityId, b: CityId, year: i32) -> Result<SegmentId> {
        if !is_valid_year(year) {
            return Err(Error::InvalidYear { year });
        }
        let id = self.require_segment(a, b)?;
        if let Some(segment) = self.segment_mut(id) {
            if segment.year > year {
                return Err(Error::RepairYearTooOld {
                    current: segment.year,
                    requested: year,
                });
            }
            segment.year = year;
        }
        Ok(id)
    }

    /// Resolve the segment joining `a` and `b` or report both city names.
    pub fn require_segment(&self, a: CityId, b: CityId) -> Result<SegmentId> {
        self.find_segment(a, b).ok_or_else(|| Error::UnknownSegment {
            a: self.city_name(a).unwrap_or("<unknown>").to_string(),
            b: self.city_name(b).unwrap_or("<unknown>").to_string(),
        })
    }

    /// Detach a segment from both endpoints and release it, together with its
    /// route back-references. Callers must make sure no route still relies
    /// on it.
    pub fn remove_segment(&mut self, id: SegmentId) -> Option<Segment> {
        let segment = self.segments.get_mut(id)?.take()?;
        let (a, b) = segment.ends;
        for city in [a, b] {
            self.cities[city].incident.retain(|&incident| incident != id);
        }
        self.live_segments -= 1;
        debug!(segment = id, "released segment");
        Some(segment)
    }

    pub(crate) fn set_pending_removal(&mut self, id: SegmentId, pending: bool) {
        if let Some(segment) = self.segment_mut(id) {
            segment.pending_removal = pending;
        }
    }

    pub(crate) fn link_route(&mut self, id: SegmentId, route: RouteId) {
        if let Some(segment) = self.segment_mut(id) {
            segment.routes.push(route);
        }
    }

    pub(crate) fn unlink_route(&mut self, id: SegmentId, route: RouteId) {
        if let Some(segment) = self.segment_mut(id) {
            segment.routes.retain(|&linked| linked != route);
        }
    }

    fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(id).and_then(Option::as_mut)
    }

    fn known_name(&self, id: CityId) -> Result<String> {
        self.city_name(id)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownCity {
                name: format!("#{id}"),
                suggestions: Vec::new(),
            })
    }
}
