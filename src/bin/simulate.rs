use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bullheads::mcts::SearchConfig;
use bullheads::sim::{run_batch, write_csv, MatchConfig};

/// Batch match simulator: the MCTS bot against random baselines.
#[derive(Debug, Parser)]
#[command(name = "simulate", version, about = "Seeded bullheads match batches")]
struct Cli {
    /// Number of random opponents seated after the bot.
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Cards dealt to each seat per deal.
    #[arg(long, default_value_t = 10)]
    hand_size: usize,

    /// Matches to play.
    #[arg(short, long, default_value_t = 100)]
    matches: u32,

    /// Search simulations per bot decision.
    #[arg(short, long, default_value_t = 100)]
    simulations: u32,

    /// Base RNG seed; match i runs with seed + i.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Where to write the CSV report.
    #[arg(short = 'O', long, default_value = "results.csv")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = MatchConfig::default()
        .with_opponents(cli.opponents)
        .with_hand_size(cli.hand_size)
        .with_seed(cli.seed)
        .with_search(SearchConfig::default().with_simulations(cli.simulations));

    info!(
        matches = cli.matches,
        opponents = cli.opponents,
        hand_size = cli.hand_size,
        simulations = cli.simulations,
        "starting batch"
    );

    let outcomes = run_batch(&config, cli.matches).context("batch aborted")?;

    let file = File::create(&cli.out)
        .with_context(|| format!("creating report at {}", cli.out.display()))?;
    write_csv(BufWriter::new(file), &outcomes)
        .with_context(|| format!("writing report to {}", cli.out.display()))?;

    let bot_mean = outcomes.iter().map(|o| f64::from(o.heads[0])).sum::<f64>()
        / outcomes.len().max(1) as f64;
    let wins = outcomes
        .iter()
        .filter(|o| o.winner.as_csv() == 0)
        .count();

    info!(
        report = %cli.out.display(),
        bot_mean_heads = format!("{bot_mean:.1}"),
        bot_wins = wins,
        "batch complete"
    );
    Ok(())
}
