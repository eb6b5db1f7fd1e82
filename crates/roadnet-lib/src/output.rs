use std::fmt::{self, Write};

use serde::Serialize;

use crate::graph::RoadNetwork;
use crate::registry::{Route, RouteId};

/// Presentation style for turning a [`RouteDescription`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Single `;`-separated line: `id;city;length;year;city;...`.
    Compact,
    /// One line per leg, for humans.
    PlainText,
}

/// One hop of a route: the segment travelled and the city it leads to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteLeg {
    pub length: u32,
    pub year: i32,
    pub city: String,
}

impl RouteLeg {
    pub fn new(length: u32, year: i32, city: impl Into<String>) -> Self {
        Self {
            length,
            year,
            city: city.into(),
        }
    }
}

/// Structured, deterministic description of a registered route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteDescription {
    pub id: RouteId,
    pub origin: String,
    pub legs: Vec<RouteLeg>,
}

impl RouteDescription {
    /// Walk `route` from its first city and resolve every leg against the
    /// network.
    pub fn from_route(network: &RoadNetwork, route: &Route) -> Self {
        let mut current = route.first_city();
        let origin = network.city_name(current).unwrap_or("<unknown>").to_string();
        let mut legs = Vec::with_capacity(route.hop_count());

        for &segment_id in route.segments() {
            let Some(segment) = network.segment(segment_id) else {
                break;
            };
            let Some(next) = segment.other_end(current) else {
                break;
            };
            legs.push(RouteLeg {
                length: segment.length,
                year: segment.year,
                city: network.city_name(next).unwrap_or("<unknown>").to_string(),
            });
            current = next;
        }

        Self {
            id: route.id(),
            origin,
            legs,
        }
    }

    /// Sum of all leg lengths.
    pub fn total_length(&self) -> u64 {
        self.legs.iter().map(|leg| u64::from(leg.length)).sum()
    }

    /// City names in route order, origin first.
    pub fn city_names(&self) -> Vec<&str> {
        std::iter::once(self.origin.as_str())
            .chain(self.legs.iter().map(|leg| leg.city.as_str()))
            .collect()
    }

    /// Render the description using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::Compact => self.to_string(),
            RouteRenderMode::PlainText => self.render_plain(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route {}: {} hops, total length {}",
            self.id,
            self.legs.len(),
            self.total_length()
        );
        let _ = writeln!(buffer, "  {}", self.origin);
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "  -> {} (length {}, year {})",
                leg.city, leg.length, leg.year
            );
        }
        buffer
    }
}

impl fmt::Display for RouteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.id, self.origin)?;
        for leg in &self.legs {
            write!(f, ";{};{};{}", leg.length, leg.year, leg.city)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteDescription {
        RouteDescription {
            id: 12,
            origin: "Alpha".to_string(),
            legs: vec![RouteLeg::new(10, 2000, "Beta"), RouteLeg::new(5, -20, "Gamma")],
        }
    }

    #[test]
    fn compact_rendering_interleaves_legs() {
        assert_eq!(sample().to_string(), "12;Alpha;10;2000;Beta;5;-20;Gamma");
        assert_eq!(sample().render(RouteRenderMode::Compact), sample().to_string());
    }

    #[test]
    fn plain_rendering_lists_every_leg() {
        let text = sample().render(RouteRenderMode::PlainText);
        assert!(text.starts_with("Route 12: 2 hops, total length 15"));
        assert!(text.contains("-> Gamma (length 5, year -20)"));
    }

    #[test]
    fn city_names_start_with_origin() {
        assert_eq!(sample().city_names(), vec!["Alpha", "Beta", "Gamma"]);
    }
}
