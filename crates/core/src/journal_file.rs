//! On-disk session log.
//!
//! The first line is a header naming the format version, the recording build, the seed and the
//! dungeon config. Every following line is one accepted action together with the outcome the
//! live session produced for it, so a replay can tell exactly where it stops agreeing with the
//! recording. Lines are linked by a running SHA-256 `chain` value: each line's chain is the
//! digest of the previous chain and that line's `seq`, action and outcome.
//!
//! A line without its terminating newline is a torn write from an interrupted session. Loading
//! drops it, and [`JournalWriter::resume`] cuts it off before appending again.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::DungeonConfig;
use crate::error::ConfigError;
use crate::game::ActionOutcome;
use crate::journal::{Action, ActionJournal, ActionRecord, JOURNAL_FORMAT_VERSION};

/// Chain value that precedes the first recorded action.
pub const CHAIN_ROOT: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize)]
struct Header {
    version: u16,
    build: String,
    seed: u64,
    config: DungeonConfig,
}

#[derive(Serialize, Deserialize)]
struct Entry {
    seq: u64,
    action: Action,
    outcome: ActionOutcome,
    chain: String,
}

/// The part of an [`Entry`] covered by its chain value.
#[derive(Serialize)]
struct Linked<'a> {
    seq: u64,
    action: &'a Action,
    outcome: &'a ActionOutcome,
}

fn extend_chain(previous: &str, linked: &Linked<'_>) -> serde_json::Result<String> {
    let mut digest = Sha256::new();
    digest.update(previous.as_bytes());
    digest.update(serde_json::to_vec(linked)?);
    Ok(format!("{:064x}", digest.finalize()))
}

/// Records accepted actions and their outcomes, flushing each line as it is written.
pub struct JournalWriter {
    out: BufWriter<File>,
    chain: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Starts a new log at `path`, creating missing parent directories.
    pub fn create(
        path: &Path,
        seed: u64,
        build: &str,
        config: &DungeonConfig,
    ) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let header = Header {
            version: JOURNAL_FORMAT_VERSION,
            build: build.to_string(),
            seed,
            config: config.clone(),
        };
        let out = BufWriter::new(File::create(path)?);
        let mut writer = Self { out, chain: CHAIN_ROOT.to_string(), next_seq: 0 };
        writer.write_line(&header)?;
        Ok(writer)
    }

    /// Continues a log that was loaded from `path`. A torn final line is cut off first so the
    /// next entry starts on a fresh line.
    pub fn resume(path: &Path, loaded: &LoadedJournal) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        file.set_len(loaded.valid_len)?;
        let out = BufWriter::new(file);
        Ok(Self { out, chain: loaded.chain.clone(), next_seq: loaded.next_seq })
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn record(&mut self, action: &Action, outcome: &ActionOutcome) -> io::Result<()> {
        let linked = Linked { seq: self.next_seq, action, outcome };
        let chain = extend_chain(&self.chain, &linked).map_err(io::Error::other)?;
        let entry = Entry { seq: self.next_seq, action: *action, outcome: *outcome, chain };
        self.write_line(&entry)?;

        self.chain = entry.chain;
        self.next_seq += 1;
        Ok(())
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value).map_err(io::Error::other)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: ActionJournal,
    /// Outcome recorded for each entry of `journal.actions`, index for index.
    pub outcomes: Vec<ActionOutcome>,
    pub build: String,
    /// Chain value of the last complete entry, or [`CHAIN_ROOT`] when there is none.
    pub chain: String,
    pub next_seq: u64,
    /// Byte length of the complete lines; anything past it was a torn write.
    pub valid_len: u64,
    pub torn_tail: bool,
}

#[derive(Error, Debug)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("journal has no complete header line")]
    MissingHeader,

    #[error("unreadable journal header: {message}")]
    Header { message: String },

    #[error("journal format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("journal header holds an unusable dungeon config: {0}")]
    Config(#[from] ConfigError),

    #[error("bad journal entry at line {line}: {message}")]
    Entry { line: usize, message: String },

    #[error("journal entry at line {line} does not continue the chain")]
    Tampered { line: usize },
}

pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    let complete = match content.rfind('\n') {
        Some(end) => &content[..=end],
        None => "",
    };
    let torn_tail = complete.len() < content.len();

    let mut lines = complete.lines();
    let header_line = lines.next().ok_or(JournalLoadError::MissingHeader)?;
    let header: Header = serde_json::from_str(header_line)
        .map_err(|error| JournalLoadError::Header { message: error.to_string() })?;
    if header.version != JOURNAL_FORMAT_VERSION {
        return Err(JournalLoadError::UnsupportedVersion {
            found: header.version,
            expected: JOURNAL_FORMAT_VERSION,
        });
    }
    header.config.validate()?;

    let mut journal = ActionJournal::new(header.seed, header.config);
    let mut outcomes = Vec::new();
    let mut chain = CHAIN_ROOT.to_string();

    for (index, text) in lines.enumerate() {
        let line = index + 2;
        let bad_entry = |message: String| JournalLoadError::Entry { line, message };

        let entry: Entry =
            serde_json::from_str(text).map_err(|error| bad_entry(error.to_string()))?;
        let expected_seq = journal.next_seq();
        if entry.seq != expected_seq {
            return Err(bad_entry(format!("expected seq {expected_seq}, found {}", entry.seq)));
        }

        let linked = Linked { seq: entry.seq, action: &entry.action, outcome: &entry.outcome };
        let recomputed =
            extend_chain(&chain, &linked).map_err(|error| bad_entry(error.to_string()))?;
        if recomputed != entry.chain {
            return Err(JournalLoadError::Tampered { line });
        }

        journal.actions.push(ActionRecord { seq: entry.seq, action: entry.action });
        outcomes.push(entry.outcome);
        chain = entry.chain;
    }

    let next_seq = journal.next_seq();
    Ok(LoadedJournal {
        journal,
        outcomes,
        build: header.build,
        chain,
        next_seq,
        valid_len: complete.len() as u64,
        torn_tail,
    })
}
