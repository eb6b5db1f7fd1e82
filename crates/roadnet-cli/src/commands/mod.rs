//! Text commands understood by the CLI.
//!
//! Each input line is parsed into a [`Command`] by [`parse_line`] and applied
//! to a [`RoadMap`]. The [`Session`] drives a whole input stream and reports
//! rejected lines as `ERROR <line>`.

mod parse;
mod session;

pub use parse::{parse_line, ParseError};
pub use session::{LineError, Session, SessionSummary};

use roadnet_lib::{RoadMap, RouteDescription, RouteId, RouteLeg};

/// A single parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddRoad {
        a: String,
        b: String,
        length: u32,
        year: i32,
    },
    RepairRoad {
        a: String,
        b: String,
        year: i32,
    },
    GetRouteDescription {
        id: RouteId,
    },
    NewRoute {
        id: RouteId,
        a: String,
        b: String,
    },
    ExtendRoute {
        id: RouteId,
        city: String,
    },
    RemoveRoad {
        a: String,
        b: String,
    },
    RemoveRoute {
        id: RouteId,
    },
    DefineRoute {
        id: RouteId,
        origin: String,
        legs: Vec<RouteLeg>,
    },
}

/// What a successfully applied command asks the caller to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Silent,
    Description {
        id: RouteId,
        description: Option<RouteDescription>,
    },
}

impl Command {
    /// Apply the command to `map`.
    pub fn apply(self, map: &mut RoadMap) -> roadnet_lib::Result<CommandOutput> {
        match self {
            Command::AddRoad { a, b, length, year } => map.add_road(&a, &b, length, year)?,
            Command::RepairRoad { a, b, year } => map.repair_road(&a, &b, year)?,
            Command::GetRouteDescription { id } => {
                return Ok(CommandOutput::Description {
                    id,
                    description: map.route_description(id),
                });
            }
            Command::NewRoute { id, a, b } => map.new_route(id, &a, &b)?,
            Command::ExtendRoute { id, city } => {
                map.extend_route(id, &city)?;
            }
            Command::RemoveRoad { a, b } => {
                map.remove_road(&a, &b)?;
            }
            Command::RemoveRoute { id } => map.remove_route(id)?,
            Command::DefineRoute { id, origin, legs } => map.define_route(id, &origin, &legs)?,
        }
        Ok(CommandOutput::Silent)
    }
}
