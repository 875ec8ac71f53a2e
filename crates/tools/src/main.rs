use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use caverns::{GameSession, JournalWriter, load_journal_from_file, render_dungeon, replay_checked};
use clap::{Parser, Subcommand};
use tools::console::{HELP, run_session, status_message};
use tools::settings::{DungeonArgs, ResolvedSettings};
use tools::{APP_NAME, BUILD_ID, init_tracing};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = APP_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore a generated dungeon from the terminal
    Play {
        #[command(flatten)]
        dungeon: DungeonArgs,
        /// Record every accepted action to this JSONL journal
        #[arg(long)]
        journal: Option<PathBuf>,
    },
    /// Print the diagnostic map of a generated dungeon
    Render {
        #[command(flatten)]
        dungeon: DungeonArgs,
        /// Print the starting snapshot as JSON instead of the map
        #[arg(long)]
        json: bool,
    },
    /// Replay a recorded journal and print the final state
    Replay {
        /// Path to the JSONL journal to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn build_session(dungeon: &DungeonArgs) -> Result<(ResolvedSettings, GameSession)> {
    let settings = dungeon.resolve()?;
    let seed = settings.seed.value();
    info!(seed, source = settings.seed.source(), "resolved seed");
    let session = GameSession::new_seeded(&settings.config, seed)
        .with_context(|| format!("failed to build a dungeon from seed {seed}"))?;
    Ok((settings, session))
}

fn play(dungeon: &DungeonArgs, journal: Option<PathBuf>) -> Result<()> {
    let (settings, mut session) = build_session(dungeon)?;
    let seed = settings.seed.value();

    let mut writer = match &journal {
        Some(path) => Some(
            JournalWriter::create(path, seed, BUILD_ID, &settings.config)
                .with_context(|| format!("failed to create journal {}", path.display()))?,
        ),
        None => None,
    };

    println!("Seed {seed} ({}). Type `help` for commands.", settings.seed.source());
    println!("{HELP}\n");

    let mut arrived = Instant::now();
    let mut since_last_move = || {
        let stayed = arrived.elapsed();
        arrived = Instant::now();
        stayed
    };
    let stdin = io::stdin();
    let status = run_session(
        &mut session,
        stdin.lock(),
        &mut io::stdout(),
        writer.as_mut(),
        &mut since_last_move,
    )?;

    if status_message(status).is_none() {
        println!("Leaving the caves after {} moves.", session.moves_made());
    }
    if let Some(path) = journal {
        println!("Journal written to {}", path.display());
    }
    Ok(())
}

fn render(dungeon: &DungeonArgs, json: bool) -> Result<()> {
    let (settings, session) = build_session(dungeon)?;
    if json {
        let snapshot = serde_json::to_string_pretty(&session.snapshot())
            .context("failed to serialize snapshot")?;
        println!("{snapshot}");
    } else {
        println!("Seed {} ({})", settings.seed.value(), settings.seed.source());
        println!("{}", render_dungeon(session.dungeon()));
        println!("start {}  end {}", session.dungeon().start(), session.dungeon().end());
    }
    Ok(())
}

fn replay_journal(path: &Path) -> Result<()> {
    let loaded = load_journal_from_file(path)
        .with_context(|| format!("failed to load journal {}", path.display()))?;
    if loaded.torn_tail {
        warn!(path = %path.display(), "journal ends in a partial line; it was ignored");
    }
    let result = replay_checked(&loaded).context("replay failed during execution")?;

    println!("Replay complete.");
    println!("Recorded by: {}", loaded.build);
    println!("Actions applied: {}", result.actions_applied);
    println!("Final location: {}", result.final_snapshot.location);
    println!("Status: {:?}", result.final_status);
    println!("Snapshot hash: {:016x}", result.final_snapshot_hash);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { dungeon, journal } => play(&dungeon, journal),
        Commands::Render { dungeon, json } => render(&dungeon, json),
        Commands::Replay { journal } => replay_journal(&journal),
    }
}
