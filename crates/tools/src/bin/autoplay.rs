use anyhow::{Result, bail, ensure};
use caverns::{Action, ActionJournal, ActionOutcome, GameSession, SessionStatus, Smell, replay};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::init_tracing;
use tools::settings::DungeonArgs;
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about = "Drive a session with random legal actions", long_about = None)]
struct Args {
    #[command(flatten)]
    dungeon: DungeonArgs,
    /// Upper bound on moves before the run is abandoned
    #[arg(long, default_value_t = 1000)]
    steps: u32,
    /// Seconds reported as spent at each location, fed to the thief check
    #[arg(long, default_value_t = 1)]
    linger_secs: u64,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

/// Prefers picking things up, shoots when a monster is close, otherwise wanders.
fn next_action(session: &GameSession, rng: &mut ChaCha8Rng) -> Action {
    let snapshot = session.snapshot();
    if let Some(&treasure) = snapshot.treasure_here.first() {
        return Action::PickTreasure { treasure };
    }
    if snapshot.arrows_here > 0 {
        return Action::PickArrow;
    }
    let exits = session.available_moves();
    if snapshot.smell == Some(Smell::MorePungent) && snapshot.player_arrows > 0 {
        let distance = 1 + (rng.next_u64() % 2) as u32;
        return Action::Shoot { distance, direction: choose(rng, &exits) };
    }
    Action::Move { direction: choose(rng, &exits) }
}

fn carried_and_placed(session: &GameSession) -> (usize, usize) {
    let nodes = session.dungeon().nodes();
    let treasure = nodes.iter().map(|node| node.treasure.len()).sum::<usize>()
        + session.player().treasure.len();
    let arrows = nodes.iter().map(|node| node.arrows).sum::<usize>() + session.player().arrows;
    (treasure, arrows)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let settings = args.dungeon.resolve()?;
    let seed = settings.seed.value();

    println!("Starting autoplay on seed {seed} for max {} moves...", args.steps);
    let mut session = GameSession::new_seeded(&settings.config, seed)?;
    let mut journal = ActionJournal::new(seed, settings.config.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut record = |session: &mut GameSession, action: Action| -> Result<ActionOutcome> {
        let before = carried_and_placed(session);
        let outcome = match session.apply(&action) {
            Ok(outcome) => outcome,
            Err(error) => bail!("autoplay chose an illegal action {action:?}: {error}"),
        };
        journal.append(action);

        let after = carried_and_placed(session);
        match outcome {
            ActionOutcome::Robbery { stolen: true } => {
                ensure!(after.0 <= before.0 && after.1 <= before.1, "robbery added items");
            }
            ActionOutcome::Shot(_) => {
                ensure!(after == (before.0, before.1 - 1), "a shot must consume one arrow");
            }
            _ => ensure!(after == before, "{action:?} created or destroyed items"),
        }
        Ok(outcome)
    };

    let linger = Action::CheckTreasureStolen { elapsed_ms: args.linger_secs * 1000 };
    let mut moves = 0;
    while moves < args.steps && !session.is_over() {
        let action = next_action(&session, &mut rng);
        let outcome = record(&mut session, action)?;
        debug!(?action, ?outcome, "autoplay step");

        if matches!(outcome, ActionOutcome::Moved { .. }) {
            moves += 1;
            record(&mut session, linger)?;
            record(&mut session, Action::CheckStatus)?;
        }
    }

    let status = session.snapshot().status;
    let result = replay(&journal)?;
    ensure!(
        result.final_snapshot_hash == session.snapshot_hash(),
        "replaying the recorded journal diverged from the live session"
    );
    info!(actions = result.actions_applied, "journal replay matched");

    match status {
        SessionStatus::InProgress => println!("Still exploring after {moves} moves."),
        other => println!("Finished with {other:?} after {moves} moves."),
    }
    println!("Snapshot hash: {:016x}", result.final_snapshot_hash);
    Ok(())
}
