use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the session seed came from, so the front end can echo it back for reproduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    File(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::File(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "command line",
            Self::File(_) => "settings file",
            Self::Generated(_) => "generated",
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Command line beats the settings file; with neither, the generated seed is used.
pub fn resolve_seed(cli: Option<u64>, file: Option<u64>, generated: u64) -> SeedChoice {
    match (cli, file) {
        (Some(seed), _) => SeedChoice::Cli(seed),
        (None, Some(seed)) => SeedChoice::File(seed),
        (None, None) => SeedChoice::Generated(generated),
    }
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
