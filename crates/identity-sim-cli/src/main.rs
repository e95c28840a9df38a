use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use identity_sim_core::{RunSummary, SimConfig, World};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "identity-sim")]
#[command(about = "Multi-agent fronting simulation")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print the per-tick population state
    Run {
        /// Path to config file (JSON). Uses the stock population if omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of ticks to run (default: value from config, 50 for the stock config)
        #[arg(long, allow_negative_numbers = true)]
        ticks: Option<i64>,

        /// Override the stimulus seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for summary.json (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Suppress per-tick observation lines
        #[arg(long)]
        quiet: bool,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config file {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file)).context("failed to parse config")
        }
        None => Ok(SimConfig::default()),
    }
}

fn print_front_table(summary: &RunSummary) {
    println!("--- {} ticks (seed {}) ---", summary.ticks, summary.seed);
    for entry in &summary.front_counts {
        println!("  {:<12} fronted {:>5} ticks", entry.name, entry.count);
    }
    println!("  {:<12}         {:>5} ticks", "(none)", summary.idle_ticks);
    if let Some(dominant) = summary.dominant() {
        println!("  Dominant:    {}", dominant.name);
    }
}

fn run(
    config: Option<PathBuf>,
    ticks: Option<i64>,
    seed: Option<u64>,
    out: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let mut sim_config = load_config(config.as_ref())?;
    if let Some(ticks) = ticks {
        sim_config.ticks = ticks;
    }
    if let Some(seed) = seed {
        sim_config.seed = seed;
    }
    sim_config.validate().context("Config validation error")?;

    let mut world = World::new(sim_config).context("Failed to initialize world")?;

    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut write_failed = false;
    let summary = world.run_configured_with(|obs| {
        if !quiet && !write_failed {
            write_failed = writeln!(writer, "{obs}").is_err();
        }
    })?;
    writer.flush().context("failed to flush observations")?;
    drop(writer);

    print_front_table(&summary);

    if let Some(out_dir) = out {
        std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
        let summary_path = out_dir.join("summary.json");
        let file = File::create(summary_path).context("failed to create summary file")?;
        serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
        println!("Run complete. Results saved to {:?}", out_dir);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            ticks,
            seed,
            out,
            quiet,
        } => run(config, ticks, seed, out, quiet)?,
    }
    Ok(())
}
