use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fitbench::bench;
use fitbench::config;
use fitbench::display;
use fitbench::exec::ShellExecutor;
use fitbench::types::TimingMode;

#[derive(Parser)]
#[command(
    name = "fitbench",
    version,
    about = "Benchmark the Clojure and Java fitness functions by averaging repeated runs"
)]
struct Cli {
    /// Directory holding the `clojure/` and `java/` benchmark programs
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML file of [[target]] entries to run instead of the built-in pair
    #[arg(long, conflicts_with = "root")]
    targets: Option<PathBuf>,

    /// Number of runs averaged per target
    #[arg(short = 'n', long, default_value_t = config::DEFAULT_REPETITIONS)]
    repetitions: usize,

    #[arg(long, value_enum, default_value_t = TimingMode::Wall)]
    timing: TimingMode,

    #[arg(long)]
    json: bool,

    /// Log every sample to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fitbench=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let targets = match &cli.targets {
        Some(path) => config::load_targets(path)?,
        None => config::builtin_targets(&cli.root),
    };

    let mut executor = ShellExecutor::new(cli.timing);
    let mut reports = Vec::with_capacity(targets.len());

    for target in &targets {
        let report = bench::run_target(&mut executor, target, cli.repetitions)?;
        if !cli.json {
            // Print as each target finishes so a later failure keeps earlier results
            print!("{}", display::format_line(&report));
            std::io::stdout().flush()?;
        }
        reports.push(report);
    }

    if cli.json {
        print!("{}", display::format_json(&reports));
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
