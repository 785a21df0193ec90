//! pathmine CLI - Debug tool for trajectory hotspot mining
//!
//! Usage:
//!   pathmine mine <file.json> [--kmin N] [--mmin N] [--strategy <s>]
//!   pathmine hash <file.json>
//!   pathmine compare <a.json> <b.json>
//!
//! Input files carry a JSON array of trajectories in the library's
//! camelCase boundary format. The mine subcommand prints the mined hotspot
//! set plus a summary of the run; hash prints the canonical idempotency
//! hash of an already-mined hotspot file; compare mines two batches and
//! scores their similarity.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pathmine::{
    canonical_hash, hotspot_similarity, mine, Hotspot, MineConfig, Mined, MiningStrategy,
    NodeIdentity, SimilarityConfig, Trajectory,
};

#[derive(Parser)]
#[command(name = "pathmine")]
#[command(about = "Trajectory hotspot mining debug tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine hotspots from a trajectory batch
    Mine {
        /// JSON file with an array of trajectories
        file: PathBuf,

        /// Minimum hotspot path length in nodes
        #[arg(long, default_value = "2")]
        kmin: u32,

        /// Minimum support (distinct trajectories)
        #[arg(long, default_value = "2")]
        mmin: u32,

        /// Force a strategy (join | traversal | graph-dfs); default auto
        #[arg(long)]
        strategy: Option<MiningStrategy>,

        /// Node identity policy (geometry | geometry-and-time)
        #[arg(long, default_value = "geometry")]
        identity: NodeIdentity,

        /// Pretty-print the hotspot JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the canonical hash of a mined hotspot file
    Hash {
        /// JSON file with an array of hotspots
        file: PathBuf,
    },

    /// Mine two batches and print their similarity score
    Compare {
        /// First trajectory batch
        a: PathBuf,

        /// Second trajectory batch
        b: PathBuf,

        /// Minimum hotspot path length in nodes
        #[arg(long, default_value = "2")]
        kmin: u32,

        /// Minimum support (distinct trajectories)
        #[arg(long, default_value = "2")]
        mmin: u32,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{:5}] {}", record.level(), record.args())
        })
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Mine {
            file,
            kmin,
            mmin,
            strategy,
            identity,
            pretty,
        } => run_mine(&file, kmin, mmin, strategy, identity, pretty),
        Commands::Hash { file } => run_hash(&file),
        Commands::Compare { a, b, kmin, mmin } => run_compare(&a, &b, kmin, mmin),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn load_trajectories(file: &PathBuf) -> Result<Vec<Trajectory>, String> {
    let raw = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {}", file.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", file.display(), e))
}

fn mine_file(
    file: &PathBuf,
    kmin: u32,
    mmin: u32,
    strategy: Option<MiningStrategy>,
    identity: NodeIdentity,
) -> Result<Mined, String> {
    let trajectories = load_trajectories(file)?;
    let config = MineConfig {
        min_path_len: kmin,
        min_support: mmin,
        strategy,
        node_identity: identity,
        ..Default::default()
    };
    mine(&trajectories, &config).map_err(|e| e.to_string())
}

fn run_mine(
    file: &PathBuf,
    kmin: u32,
    mmin: u32,
    strategy: Option<MiningStrategy>,
    identity: NodeIdentity,
    pretty: bool,
) -> Result<(), String> {
    let mined = mine_file(file, kmin, mmin, strategy, identity)?;

    let json = if pretty {
        serde_json::to_string_pretty(&mined.hotspots)
    } else {
        serde_json::to_string(&mined.hotspots)
    }
    .map_err(|e| format!("cannot serialize hotspots: {}", e))?;
    println!("{}", json);

    println!("\n{}", "=".repeat(60));
    println!("Hotspots:   {}", mined.hotspots.len());
    println!("Strategy:   {}", mined.stats.strategy);
    println!("Iterations: {}", mined.stats.iterations);
    println!("Truncated:  {}", mined.truncated);
    println!("Elapsed:    {}ms", mined.stats.elapsed_ms);
    println!("Hash:       {}", canonical_hash(&mined.hotspots));
    println!("{}", "=".repeat(60));
    Ok(())
}

fn run_hash(file: &PathBuf) -> Result<(), String> {
    let raw = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {}", file.display(), e))?;
    let hotspots: Vec<Hotspot> =
        serde_json::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", file.display(), e))?;
    println!("{}", canonical_hash(&hotspots));
    Ok(())
}

fn run_compare(a: &PathBuf, b: &PathBuf, kmin: u32, mmin: u32) -> Result<(), String> {
    // Similarity needs timestamps, so compare mines with the full policy.
    let mined_a = mine_file(a, kmin, mmin, None, NodeIdentity::GeometryAndTime)?;
    let mined_b = mine_file(b, kmin, mmin, None, NodeIdentity::GeometryAndTime)?;

    let score = hotspot_similarity(
        &mined_a.hotspots,
        &mined_b.hotspots,
        &SimilarityConfig::default(),
    );

    println!("{}", "=".repeat(60));
    println!("Hotspots A: {}", mined_a.hotspots.len());
    println!("Hotspots B: {}", mined_b.hotspots.len());
    println!("Similarity: {:.4}", score);
    println!("{}", "=".repeat(60));
    Ok(())
}
