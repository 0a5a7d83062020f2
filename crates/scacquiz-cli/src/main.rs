//! scacquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "scacquiz", version, about = "Timed SCAC carrier trivia")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round of carrier trivia
    Play {
        /// Bank file or directory (defaults to the configured path)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Player name on the scoreboard
        #[arg(long)]
        player: Option<String>,

        /// Seed the question order for a reproducible round
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many questions instead of draining the bank
        #[arg(long)]
        questions: Option<usize>,

        /// Show each question's hint up front
        #[arg(long)]
        hints: bool,

        /// Skip recording this round on the scoreboard
        #[arg(long)]
        no_save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Import carriers from CSV into a TOML bank
    Import {
        /// Source CSV file (code,name,mode,note)
        #[arg(long)]
        csv: PathBuf,

        /// Destination bank file
        #[arg(long)]
        bank: PathBuf,
    },

    /// Export a bank (or directory of banks) to CSV
    Export {
        /// Bank file or directory
        #[arg(long)]
        bank: PathBuf,

        /// Destination CSV file
        #[arg(long)]
        csv: PathBuf,
    },

    /// Show the top of the scoreboard
    Leaderboard {
        /// Rows to display
        #[arg(long, default_value = "10")]
        top: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate bank files
    Validate {
        /// Bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create a starter config and example bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scacquiz_core=info".parse().unwrap())
                .add_directive("scacquiz_store=info".parse().unwrap())
                .add_directive("scacquiz_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            player,
            seed,
            questions,
            hints,
            no_save,
            config,
        } => commands::play::execute(bank, player, seed, questions, hints, no_save, config),
        Commands::Import { csv, bank } => commands::import::execute(csv, bank),
        Commands::Export { bank, csv } => commands::export::execute(bank, csv),
        Commands::Leaderboard { top, config } => commands::leaderboard::execute(top, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
