//! Layered dungeon settings: built-in defaults, then an optional TOML file, then command-line
//! overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caverns::DungeonConfig;
use clap::Args;
use serde::Deserialize;

use crate::seed::{SeedChoice, generate_runtime_seed, resolve_seed};

/// Shape of a `--config` file. Every key is optional.
///
/// ```toml
/// seed = 42
///
/// [dungeon]
/// rows = 10
/// columns = 12
/// wrapping = true
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub seed: Option<u64>,
    pub dungeon: DungeonConfig,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DungeonArgs {
    /// Seed for dungeon generation and every in-game roll
    #[arg(long)]
    pub seed: Option<u64>,
    /// TOML settings file applied before the overrides below
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub rows: Option<u32>,
    #[arg(long)]
    pub columns: Option<u32>,
    /// Connect opposite borders (`--wrapping true|false`)
    #[arg(long)]
    pub wrapping: Option<bool>,
    /// Extra edges added on top of the spanning tree
    #[arg(long)]
    pub interconnectivity: Option<u32>,
    /// Share of caves seeded with treasure, 0-100
    #[arg(long)]
    pub treasure: Option<u32>,
    #[arg(long)]
    pub monsters: Option<u32>,
    #[arg(long)]
    pub thieves: Option<u32>,
    #[arg(long)]
    pub pits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub seed: SeedChoice,
    pub config: DungeonConfig,
}

impl DungeonArgs {
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let file = match &self.config {
            Some(path) => load_settings_file(path)?,
            None => SettingsFile::default(),
        };
        Ok(self.layer_over(file, generate_runtime_seed()))
    }

    fn layer_over(&self, file: SettingsFile, generated_seed: u64) -> ResolvedSettings {
        let mut config = file.dungeon;
        self.apply_overrides(&mut config);
        ResolvedSettings { seed: resolve_seed(self.seed, file.seed, generated_seed), config }
    }

    pub fn apply_overrides(&self, config: &mut DungeonConfig) {
        let overrides = [
            (&mut config.rows, self.rows),
            (&mut config.columns, self.columns),
            (&mut config.interconnectivity, self.interconnectivity),
            (&mut config.treasure_percentage, self.treasure),
            (&mut config.monsters, self.monsters),
            (&mut config.thieves, self.thieves),
            (&mut config.pits, self.pits),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(wrapping) = self.wrapping {
            config.wrapping = wrapping;
        }
    }
}

pub fn load_settings_file(path: &Path) -> Result<SettingsFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse settings file {}", path.display()))
}
