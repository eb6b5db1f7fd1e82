use roadnet_lib::{RouteId, RouteLeg};
use thiserror::Error;

use super::Command;

/// Reasons a line cannot be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("{command} expects {expected} parameters, got {found}")]
    FieldCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("route definition must be origin followed by length;year;city triples")]
    MalformedRouteDefinition,
}

/// Parse one line with its trailing newline already removed.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let fields: Vec<&str> = line.split(';').collect();
    let (name, params) = fields
        .split_first()
        .ok_or_else(|| ParseError::UnknownCommand(line.to_string()))?;

    match *name {
        "addRoad" => {
            let [a, b, length, year] = expect_fields::<4>("addRoad", params)?;
            Ok(Command::AddRoad {
                a: a.to_string(),
                b: b.to_string(),
                length: parse_unsigned(length)?,
                year: parse_year(year)?,
            })
        }
        "repairRoad" => {
            let [a, b, year] = expect_fields::<3>("repairRoad", params)?;
            Ok(Command::RepairRoad {
                a: a.to_string(),
                b: b.to_string(),
                year: parse_year(year)?,
            })
        }
        "getRouteDescription" => {
            let [id] = expect_fields::<1>("getRouteDescription", params)?;
            Ok(Command::GetRouteDescription {
                id: parse_unsigned(id)?,
            })
        }
        "newRoute" => {
            let [id, a, b] = expect_fields::<3>("newRoute", params)?;
            Ok(Command::NewRoute {
                id: parse_unsigned(id)?,
                a: a.to_string(),
                b: b.to_string(),
            })
        }
        "extendRoute" => {
            let [id, city] = expect_fields::<2>("extendRoute", params)?;
            Ok(Command::ExtendRoute {
                id: parse_unsigned(id)?,
                city: city.to_string(),
            })
        }
        "removeRoad" => {
            let [a, b] = expect_fields::<2>("removeRoad", params)?;
            Ok(Command::RemoveRoad {
                a: a.to_string(),
                b: b.to_string(),
            })
        }
        "removeRoute" => {
            let [id] = expect_fields::<1>("removeRoute", params)?;
            Ok(Command::RemoveRoute {
                id: parse_unsigned(id)?,
            })
        }
        other if is_digits(other) => parse_definition(parse_unsigned(other)?, params),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// `origin;length;year;city;length;year;city...`
fn parse_definition(id: RouteId, params: &[&str]) -> Result<Command, ParseError> {
    let (origin, rest) = params
        .split_first()
        .ok_or(ParseError::MalformedRouteDefinition)?;
    if rest.is_empty() || rest.len() % 3 != 0 {
        return Err(ParseError::MalformedRouteDefinition);
    }

    let legs = rest
        .chunks_exact(3)
        .map(|leg| -> Result<RouteLeg, ParseError> {
            Ok(RouteLeg::new(
                parse_unsigned(leg[0])?,
                parse_year(leg[1])?,
                leg[2],
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Command::DefineRoute {
        id,
        origin: origin.to_string(),
        legs,
    })
}

fn expect_fields<'a, const N: usize>(
    command: &'static str,
    params: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(params).map_err(|_| ParseError::FieldCount {
        command,
        expected: N,
        found: params.len(),
    })
}

fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// ASCII digits only, must fit `u32`.
fn parse_unsigned(field: &str) -> Result<u32, ParseError> {
    if !is_digits(field) {
        return Err(ParseError::InvalidNumber(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| ParseError::InvalidNumber(field.to_string()))
}

/// Optional `-` followed by ASCII digits, must fit `i32`.
fn parse_year(field: &str) -> Result<i32, ParseError> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if !is_digits(digits) {
        return Err(ParseError::InvalidNumber(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| ParseError::InvalidNumber(field.to_string()))
}
