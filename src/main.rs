use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mazescore::{
    app::{self, App},
    config::{RunConfig, Seed},
    scorers::DEFAULT_HEIGHT_RANGE,
};

/// Generate perfect mazes, solve them and rank them by score.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Maze width in cells
    #[arg(short, long, default_value_t = 10)]
    width: usize,

    /// Maze height in cells
    #[arg(short = 'H', long, default_value_t = 10)]
    height: usize,

    /// Numeric seed or any text to hash; defaults to the current time
    #[arg(long)]
    seed: Option<String>,

    /// Number of mazes to generate from the seed
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Generator name, any part of it is enough
    #[arg(short, long, env = "MAZE_GENERATOR", default_value = "kruskal")]
    generator: String,

    /// Scorer name; defaults to the first registered one
    #[arg(short, long, env = "MAZE_SCORER")]
    scorer: Option<String>,

    /// Number of levels used by the height scorer
    #[arg(long, env = "MAZE_LEVEL_HEIGHT", default_value_t = DEFAULT_HEIGHT_RANGE)]
    level_height: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Replay the hashes in this file, or store the run's hashes if it does not exist
    #[arg(long)]
    hashes_file: Option<PathBuf>,

    /// List the available generators and scorers
    #[arg(long)]
    list: bool,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            width: self.width,
            height: self.height,
            seed: self.seed.as_deref().map_or_else(Seed::now, Seed::parse),
            count: self.count,
            generator: self.generator.clone(),
            scorer: self.scorer.clone(),
            level_height: self.level_height,
            hashes_file: self.hashes_file.clone(),
        }
    }
}

/// Installs the subscriber. The returned guard flushes the log file on drop.
fn init_logging(log_file: Option<&PathBuf>) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(args.log_file.as_ref())?;

    let config = args.run_config();
    let app = App::from_config(&config)?;

    if args.list {
        println!("generators:");
        app.registry()
            .generator_names()
            .for_each(|name| println!("  {}", name));
        println!("scorers:");
        app.registry()
            .scorer_names()
            .for_each(|name| println!("  {}", name));
        return Ok(());
    }

    let known = match &config.hashes_file {
        Some(path) => app::read_hashes(path)
            .with_context(|| format!("cannot read hashes file {}", path.display()))?,
        None => None,
    };
    let replay = known.is_some();
    let reports = app.batch(&config, known)?;

    let colored = std::io::stdout().is_terminal();
    for report in &reports {
        if colored {
            println!("{}", report.to_colored_text());
        } else {
            println!("{}", report.to_text());
        }
    }

    if let Some(path) = config.hashes_file.as_ref().filter(|_| !replay) {
        app::store_hashes(path, &reports)
            .with_context(|| format!("cannot write hashes file {}", path.display()))?;
        tracing::info!("[main] stored {} hashes in {}", reports.len(), path.display());
    }
    Ok(())
}
