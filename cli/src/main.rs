use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pairup_core::*;
use pairup_records::{DEFAULT_SCORE_FILE, ScoreLog};
use tracing_subscriber::EnvFilter;

mod arithmetic;
mod matching;
mod prompt;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// File finished rounds are appended to
    #[arg(long, global = true, default_value = DEFAULT_SCORE_FILE)]
    scores: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flip cards two at a time and find every pair
    Match {
        /// Difficulty level, 1 to 3
        #[arg(short, long, default_value_t = Tier::One, value_parser = parse_tier)]
        tier: Tier,

        /// Mismatches allowed before the round is lost
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        attempts: u8,

        /// How long a mismatched pair stays face up
        #[arg(long, default_value_t = 1000)]
        hide_delay_ms: u64,
    },
    /// Drag the right answer into the slot
    Math {
        /// Difficulty level, 1 to 3
        #[arg(short, long, default_value_t = Tier::One, value_parser = parse_tier)]
        tier: Tier,

        /// Problems in the level
        #[arg(long, default_value_t = DEFAULT_PROBLEMS_PER_LEVEL)]
        problems: u8,
    },
    /// Print every recorded score
    Scores,
}

fn parse_tier(value: &str) -> std::result::Result<Tier, String> {
    let number: u8 = value.parse().map_err(|err| format!("{err}"))?;
    Tier::try_from(number).map_err(|err| err.to_string())
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = verbose.log_level_filter().to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn random_seed() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn show_scores(scores: &ScoreLog, mut output: impl io::Write) -> Result<()> {
    let lines = scores
        .history()
        .with_context(|| format!("Could not read {}", scores.path().display()))?;
    if lines.is_empty() {
        writeln!(output, "No scores recorded yet")?;
    }
    for line in lines {
        writeln!(output, "{line}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {}", seed);

    let scores = ScoreLog::new(args.scores);
    let input = io::stdin().lock();
    let output = io::stdout().lock();

    match args.command {
        Command::Match {
            tier,
            attempts,
            hide_delay_ms,
        } => {
            let config = RoundConfig::new(attempts, Duration::from_millis(hide_delay_ms));
            let mut game = MatchingGame::new(
                SystemClock,
                scores,
                ShuffledDeckGenerator::new(seed),
                config,
            );
            matching::play(&mut game, tier, input, output)
        }
        Command::Math { tier, problems } => {
            let config = ArithmeticConfig::new(problems, DEFAULT_OPERAND_MAX);
            let mut session = ArithmeticSession::new(tier, config, seed, scores);
            arithmetic::play(&mut session, input, output)
        }
        Command::Scores => show_scores(&scores, output),
    }
}
