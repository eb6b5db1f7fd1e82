//! Output formatting for route descriptions.

use std::io::{self, Write};

use roadnet_lib::{RouteDescription, RouteId, RouteRenderMode};

/// Output format for `getRouteDescription` results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `id;city;length;year;city;...`, an empty line for unused ids.
    #[default]
    Text,
    /// One line per leg with totals.
    Plain,
    /// One JSON object per line, `null` for unused ids.
    Json,
}

impl OutputFormat {
    /// Write the description of route `id` followed by a newline.
    pub fn write_description<W: Write>(
        self,
        out: &mut W,
        id: RouteId,
        description: Option<&RouteDescription>,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                let line = description
                    .map(|d| d.render(RouteRenderMode::Compact))
                    .unwrap_or_default();
                writeln!(out, "{line}")
            }
            OutputFormat::Plain => match description {
                Some(d) => write!(out, "{}", d.render(RouteRenderMode::PlainText)),
                None => writeln!(out, "Route {id} is not defined"),
            },
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &description)?;
                writeln!(out)
            }
        }
    }
}
