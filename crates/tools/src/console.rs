//! This module exists to drive a `GameSession` from line-oriented text input.
//! It does not own the game rules or the journal format, only command parsing and wording.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use caverns::{
    Action, ActionError, ActionOutcome, Direction, GameSession, JournalWriter, MONSTER_FULL_HEALTH,
    NodeKind, SessionSnapshot, SessionStatus, ShotOutcome, Smell, Sound, Treasure,
    render_with_player,
};
use tracing::debug;

pub const HELP: &str = "\
commands:
  n | s | e | w           move north, south, east or west
  t <treasure>            pick up a diamond, ruby or sapphire
  a                       pick up an arrow
  shoot <distance> <dir>  shoot an arrow, e.g. `shoot 2 n`
  map                     show the dungeon
  help                    show this list
  q                       quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    PickTreasure(Treasure),
    PickArrow,
    Shoot { distance: u32, direction: Direction },
    Map,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["q" | "quit"] => Ok(Command::Quit),
        ["map" | "m"] => Ok(Command::Map),
        ["help" | "h" | "?"] => Ok(Command::Help),
        ["a" | "arrow"] => Ok(Command::PickArrow),
        ["t" | "take", name] => name
            .parse::<Treasure>()
            .map(Command::PickTreasure)
            .map_err(|_| format!("'{name}' is not a treasure (diamond, ruby or sapphire)")),
        ["shoot", distance, direction] => {
            let distance = distance
                .parse::<u32>()
                .map_err(|_| format!("shot distance '{distance}' must be a number"))?;
            Ok(Command::Shoot { distance, direction: parse_direction(direction)? })
        }
        [direction] => parse_direction(direction).map(Command::Move),
        [] => Err("type a command, or `help`".to_string()),
        _ => Err(format!("unknown command '{}'", line.trim())),
    }
}

fn parse_direction(word: &str) -> Result<Direction, String> {
    match word {
        "n" => Ok(Direction::North),
        "s" => Ok(Direction::South),
        "e" => Ok(Direction::East),
        "w" => Ok(Direction::West),
        other => other.parse::<Direction>().map_err(|_| format!("unknown command '{other}'")),
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

pub fn describe(snapshot: &SessionSnapshot) -> String {
    let kind = match snapshot.kind {
        NodeKind::Cave => "cave",
        NodeKind::Tunnel => "tunnel",
    };
    let mut lines = vec![
        format!(
            "You are in {kind} {} (row {}, column {}).",
            snapshot.location, snapshot.position.row, snapshot.position.col
        ),
        format!("Exits: {}", join(&snapshot.exits)),
    ];

    if !snapshot.treasure_here.is_empty() {
        lines.push(format!("You see treasure: {}", join(&snapshot.treasure_here)));
    }
    if snapshot.arrows_here > 0 {
        lines.push(format!("You see {} arrow(s) on the ground.", snapshot.arrows_here));
    }
    let monster = match snapshot.monster_health {
        Some(0) => Some("A dead monster lies here."),
        Some(health) if health < MONSTER_FULL_HEALTH => Some("A wounded monster is here!"),
        Some(_) => Some("A monster is here!"),
        None => None,
    };
    lines.extend(monster.map(str::to_string));
    if snapshot.thief {
        lines.push("A thief eyes your belongings.".to_string());
    }
    match snapshot.smell {
        Some(Smell::MorePungent) => lines.push("Something smells terrible nearby.".to_string()),
        Some(Smell::Pungent) => lines.push("Something smells faintly foul.".to_string()),
        None => {}
    }
    if let Some(Sound::Crackling) = snapshot.sound {
        lines.push("You hear crackling nearby.".to_string());
    }
    lines.push(format!(
        "You carry {} arrow(s) and treasure: {}",
        snapshot.player_arrows,
        join(&snapshot.player_treasure)
    ));
    lines.join("\n")
}

pub fn describe_outcome(outcome: &ActionOutcome) -> Option<String> {
    match outcome {
        ActionOutcome::Moved { .. } | ActionOutcome::Status(_) => None,
        ActionOutcome::PickedTreasure(treasure) => Some(format!("You pick up the {treasure}.")),
        ActionOutcome::PickedArrow => Some("You pick up an arrow.".to_string()),
        ActionOutcome::Shot(ShotOutcome::Hit { monster_health: 0, .. }) => {
            Some("A howl echoes through the caves. The monster is dead.".to_string())
        }
        ActionOutcome::Shot(ShotOutcome::Hit { .. }) => {
            Some("A howl echoes through the caves. You wounded the monster.".to_string())
        }
        ActionOutcome::Shot(ShotOutcome::Missed { .. }) => {
            Some("Your arrow clatters somewhere in the dark.".to_string())
        }
        ActionOutcome::Robbery { stolen: true } => {
            Some("You lingered too long. The thief took your treasure and arrows!".to_string())
        }
        ActionOutcome::Robbery { stolen: false } => None,
    }
}

pub fn status_message(status: SessionStatus) -> Option<&'static str> {
    match status {
        SessionStatus::InProgress => None,
        SessionStatus::ReachedEnd => Some("You found the way out. You win!"),
        SessionStatus::Killed => Some("The monster got you. Game over."),
        SessionStatus::Fallen => Some("You fell into a bottomless pit. Game over."),
    }
}

/// Applies an action and appends it to the journal when the session accepted it.
fn apply_recorded(
    session: &mut GameSession,
    journal: &mut Option<&mut JournalWriter>,
    action: Action,
) -> Result<Result<ActionOutcome, ActionError>> {
    let result = session.apply(&action);
    if let Ok(outcome) = &result
        && let Some(writer) = journal
    {
        writer.record(&action, outcome).context("failed to append to journal")?;
        debug!(seq = writer.next_seq(), ?action, ?outcome, "journaled action");
    }
    Ok(result)
}

/// Runs the read-eval-print loop until the session ends, `q` is entered or input runs out.
///
/// `since_last_move` reports the time spent at the previous location; it is called once per
/// successful move and feeds the thief check.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    output: &mut W,
    mut journal: Option<&mut JournalWriter>,
    since_last_move: &mut dyn FnMut() -> Duration,
) -> Result<SessionStatus> {
    writeln!(output, "{}", describe(&session.snapshot()))?;
    let mut lines = input.lines();

    while !session.is_over() {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read command")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        let action = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::Map => {
                writeln!(output, "{}", render_with_player(session.dungeon(), session.location()))?;
                continue;
            }
            Command::Move(direction) => Action::Move { direction },
            Command::PickTreasure(treasure) => Action::PickTreasure { treasure },
            Command::PickArrow => Action::PickArrow,
            Command::Shoot { distance, direction } => Action::Shoot { distance, direction },
        };

        match apply_recorded(session, &mut journal, action)? {
            Err(error) => writeln!(output, "{error}")?,
            Ok(ActionOutcome::Moved { .. }) => {
                let robbery = Action::check_treasure_stolen(since_last_move());
                if let Ok(outcome) = apply_recorded(session, &mut journal, robbery)?
                    && let Some(message) = describe_outcome(&outcome)
                {
                    writeln!(output, "{message}")?;
                }
                if let Ok(ActionOutcome::Status(status)) =
                    apply_recorded(session, &mut journal, Action::CheckStatus)?
                    && let Some(message) = status_message(status)
                {
                    writeln!(output, "{message}")?;
                    break;
                }
                writeln!(output, "{}", describe(&session.snapshot()))?;
            }
            Ok(outcome) => {
                if let Some(message) = describe_outcome(&outcome) {
                    writeln!(output, "{message}")?;
                }
            }
        }
    }

    Ok(session.snapshot().status)
}
