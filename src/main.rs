use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, Level};

use rollbook::cli::Menu;
use rollbook::{Store, DEFAULT_DATA_FILE};

/// Interactive student record book.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CliArguments {
    /// JSON file holding the student records.
    #[arg(long, env = "ROLLBOOK_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Verbosity level (-v WARN, -vv INFO, -vvv DEBUG, etc)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode, no log will be emitted.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl CliArguments {
    fn verbosity_level(&self) -> Option<Level> {
        if self.quiet {
            None
        } else {
            match self.verbose {
                0 => Some(Level::ERROR),
                1 => Some(Level::WARN),
                2 => Some(Level::INFO),
                3 => Some(Level::DEBUG),
                _ => Some(Level::TRACE),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArguments::parse();

    if let Some(level) = args.verbosity_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();
    }

    info!(data_file = %args.data_file.display(), "starting");

    let mut store = Store::open(&args.data_file)
        .inspect_err(|e| error!("{e:?}"))
        .with_context(|| {
            format!(
                "could not load student records from `{}`",
                args.data_file.display()
            )
        })?;

    let stdin = io::stdin();
    Menu::new(&mut store, stdin.lock(), io::stdout()).run()?;

    debug!("exited");
    Ok(())
}
