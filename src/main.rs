//! titan-bench CLI: CPU and GPU throughput benchmark with tiered scoring.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use titan_bench::report::{analysis_markdown, group_thousands, summary};
use titan_bench::{
    BenchConfig, HistoryEntry, HistoryLog, MonotonicClock, Orchestrator, SystemDescriptor, TIERS,
};

#[derive(Parser)]
#[command(name = "titan-bench")]
#[command(about = "CPU single/multi-core and GPU shader benchmark with a composite power tier")]
#[command(version)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full benchmark
    Run {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Single-core measurement window (ms)
        #[arg(long)]
        single_ms: Option<u64>,

        /// Multi-core measurement window (ms)
        #[arg(long)]
        multi_ms: Option<u64>,

        /// GPU measurement window (ms)
        #[arg(long)]
        gpu_ms: Option<u64>,

        /// Multi-core thread count (defaults to the logical CPU count)
        #[arg(long)]
        threads: Option<usize>,

        /// Skip the GPU phase (scores 0)
        #[arg(long)]
        no_gpu: bool,

        /// Do not record the run
        #[arg(long)]
        no_history: bool,

        /// Also print the Markdown analysis report
        #[arg(long)]
        markdown: bool,
    },

    /// List past runs, newest first
    History {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Delete the history file
        #[arg(long)]
        clear: bool,
    },

    /// Print the tier table
    Tiers,

    /// Print the system descriptor
    Info,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Run {
            config,
            single_ms,
            multi_ms,
            gpu_ms,
            threads,
            no_gpu,
            no_history,
            markdown,
        } => {
            let mut config = BenchConfig::load_or_default(config.as_deref())?;
            if let Some(ms) = single_ms {
                config.durations.single_ms = ms;
            }
            if let Some(ms) = multi_ms {
                config.durations.multi_ms = ms;
            }
            if let Some(ms) = gpu_ms {
                config.durations.gpu_ms = ms;
            }
            if threads.is_some() {
                config.multi_core.threads = threads;
            }
            if no_gpu {
                config.gpu.enabled = false;
            }
            if no_history {
                config.history.enabled = false;
            }
            cmd_run(&config, markdown)
        }
        Commands::History { config, clear } => {
            let config = BenchConfig::load_or_default(config.as_deref())?;
            cmd_history(&config, clear)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tiers => {
            cmd_tiers();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Info => {
            cmd_info()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_run(config: &BenchConfig, markdown: bool) -> Result<ExitCode> {
    let system = if config.gpu.enabled {
        SystemDescriptor::collect()
    } else {
        SystemDescriptor::cpu_only()
    };

    let mut orchestrator = Orchestrator::from_config(config, system, MonotonicClock::shared())?;
    orchestrator.on_progress(|event| {
        if event.status.is_terminal() {
            println!("{}", event.status.message());
        } else {
            println!("[{:>3}%] {}", event.progress, event.status.message());
        }
    });

    let report = match orchestrator.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}: {}", orchestrator.status().message(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!();
    print!("{}", summary(&report));

    if config.history.enabled {
        let mut history = HistoryLog::load(&config.history.path)?;
        history
            .append(HistoryEntry::from_report(&report))
            .context("Failed to record run")?;
        if history
            .best()
            .map_or(false, |best| best.total_score == report.composite.total)
        {
            println!("New personal best!");
        }
    }

    if markdown {
        println!();
        println!("{}", analysis_markdown(&report));
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_history(config: &BenchConfig, clear: bool) -> Result<()> {
    let mut history = HistoryLog::load(&config.history.path)?;

    if clear {
        let removed = history.len();
        history.clear()?;
        println!("Cleared {} runs from {}", removed, config.history.path.display());
        return Ok(());
    }

    if history.is_empty() {
        println!("No runs recorded in {}", config.history.path.display());
        return Ok(());
    }

    println!(
        "{:<20} {:>12} {:>12} {:>10} {:>12}  Tier",
        "Date", "Single", "Multi", "GPU", "Total"
    );
    for entry in history.entries().iter().rev() {
        let date = entry
            .recorded_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| entry.id.clone());
        println!(
            "{:<20} {:>12} {:>12} {:>10} {:>12}  {}",
            date,
            group_thousands(entry.scores.cpu_single),
            group_thousands(entry.scores.cpu_multi),
            group_thousands(entry.scores.gpu_score),
            group_thousands(entry.total_score),
            entry.tier_name
        );
    }

    if let Some(best) = history.best() {
        println!(
            "\nBest: {} ({})",
            group_thousands(best.total_score),
            best.tier_name
        );
    }
    Ok(())
}

fn cmd_tiers() {
    for tier in TIERS.iter().rev() {
        println!(
            "{} {:<20} {:>10}+  {}",
            tier.emoji,
            tier.name,
            group_thousands(tier.min_score),
            tier.short_description
        );
    }
}

fn cmd_info() -> Result<()> {
    let system = SystemDescriptor::collect();
    println!("{}", serde_json::to_string_pretty(&system)?);
    Ok(())
}
