//! Runner configuration: command line flags, then `BLOCKFALL_*` environment variables,
//! then defaults.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use flexi_logger::LogSpecification;

use crate::core::SessionConfig;
use crate::types::{DEFAULT_QUEUE_LEN, FALL_INTERVAL_MS, MAX_QUEUE_LEN};

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_FALL_MS: &str = "BLOCKFALL_FALL_MS";
pub const ENV_QUEUE_LEN: &str = "BLOCKFALL_QUEUE_LEN";
pub const ENV_LOG_DIR: &str = "BLOCKFALL_LOG_DIR";

/// Log filter used when `--log-level` is absent and `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Falling-block puzzle for the terminal.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "blockfall", version, about)]
pub struct Cli {
    /// RNG seed for the piece sequence (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Gravity interval in milliseconds
    #[arg(short, long = "fall-ms")]
    pub fall_ms: Option<u32>,

    /// Number of upcoming pieces to show
    #[arg(short, long = "queue-len")]
    pub queue_len: Option<usize>,

    /// Log filter, e.g. `debug` or `blockfall_core=trace`
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Write logs into this directory (logging is off otherwise)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved runner settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub session: SessionConfig,
    /// Explicit `--log-level`; when set it wins over `RUST_LOG`.
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Parse the process arguments and environment.
    pub fn load() -> Result<Self> {
        Self::resolve(Cli::parse(), |key| std::env::var(key).ok())
    }

    /// Merge `cli` over the variables returned by `env`, then validate.
    pub fn resolve(cli: Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed = match cli.seed {
            Some(seed) => Some(seed),
            None => parse_env(&env, ENV_SEED)?,
        };
        let fall_ms = match cli.fall_ms {
            Some(ms) => ms,
            None => parse_env(&env, ENV_FALL_MS)?.unwrap_or(FALL_INTERVAL_MS),
        };
        let queue_len = match cli.queue_len {
            Some(len) => len,
            None => parse_env(&env, ENV_QUEUE_LEN)?.unwrap_or(DEFAULT_QUEUE_LEN),
        };
        let log_dir = cli.log_dir.or_else(|| {
            env(ENV_LOG_DIR)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        });

        let config = Self {
            seed: seed.unwrap_or_else(clock_seed),
            session: SessionConfig {
                fall_interval_ms: fall_ms,
                queue_len,
            },
            log_level: cli.log_level,
            log_dir,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session.fall_interval_ms == 0 {
            bail!("fall interval must be at least 1 ms");
        }
        if !(1..=MAX_QUEUE_LEN).contains(&self.session.queue_len) {
            bail!(
                "queue length must be between 1 and {}, got {}",
                MAX_QUEUE_LEN,
                self.session.queue_len
            );
        }
        if let Some(level) = &self.log_level {
            LogSpecification::parse(level)
                .with_context(|| format!("invalid log level {level:?}"))?;
        }
        Ok(())
    }

    /// Log filter: the flag, else `RUST_LOG`, else [`DEFAULT_LOG_LEVEL`].
    pub fn log_spec(&self) -> Result<LogSpecification> {
        let spec = match &self.log_level {
            Some(level) => LogSpecification::parse(level)?,
            None => LogSpecification::env_or_parse(DEFAULT_LOG_LEVEL)?,
        };
        Ok(spec)
    }
}

fn parse_env<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = env(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .with_context(|| format!("invalid {key}={raw:?}"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
