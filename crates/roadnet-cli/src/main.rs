use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadnet_cli::{OutputFormat, Session};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road network and route maintenance commands")]
struct Cli {
    /// Read commands from this file instead of standard input.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Format used for route descriptions.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut session = Session::new(cli.format);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open command file {}", path.display()))?;
            session.run(BufReader::new(file), &mut out, &mut err)
        }
        None => session.run(io::stdin().lock(), &mut out, &mut err),
    }
    .context("failed to process commands")?;

    tracing::debug!(
        lines = summary.lines,
        rejected = summary.rejected,
        cities = session.map().network().city_count(),
        routes = session.map().routes().len(),
        "session finished"
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
