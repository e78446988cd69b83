use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use one_brc::{aggregate, input::open_mapped, report::write_summary, Config};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Measurements file, one `<name>;<value>` record per line
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mmap = open_mapped(&args.path)?;
    let global = aggregate(Arc::new(mmap), &Config::default())?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_summary(&global, start.elapsed(), &mut out)?;
    out.flush()?;
    Ok(())
}
