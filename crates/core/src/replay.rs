use crate::error::ReplayError;
use crate::game::{ActionOutcome, GameSession, SessionSnapshot};
use crate::journal::{ActionJournal, JOURNAL_FORMAT_VERSION};
use crate::journal_file::LoadedJournal;
use crate::types::SessionStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_snapshot: SessionSnapshot,
    pub final_snapshot_hash: u64,
    pub final_status: SessionStatus,
    pub actions_applied: usize,
}

/// Rebuilds the session from the journal's seed and config and applies every recorded action.
/// The first rejected action aborts the replay.
pub fn replay(journal: &ActionJournal) -> Result<ReplayResult, ReplayError> {
    run(journal, &[])
}

/// Replays a loaded log and also requires every action to reproduce its recorded outcome.
pub fn replay_checked(loaded: &LoadedJournal) -> Result<ReplayResult, ReplayError> {
    run(&loaded.journal, &loaded.outcomes)
}

fn run(journal: &ActionJournal, recorded: &[ActionOutcome]) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat {
            found: journal.format_version,
            expected: JOURNAL_FORMAT_VERSION,
        });
    }

    let mut session = GameSession::new_seeded(&journal.config, journal.seed)?;
    for (index, record) in journal.actions.iter().enumerate() {
        let replayed = session
            .apply(&record.action)
            .map_err(|source| ReplayError::Action { seq: record.seq, source })?;
        if let Some(&recorded) = recorded.get(index)
            && recorded != replayed
        {
            return Err(ReplayError::Diverged { seq: record.seq, recorded, replayed });
        }
    }

    let final_snapshot = session.snapshot();
    Ok(ReplayResult {
        final_status: final_snapshot.status,
        final_snapshot_hash: session.snapshot_hash(),
        final_snapshot,
        actions_applied: journal.actions.len(),
    })
}
