//! Runtime configuration read from `BLOCKFALL_*` environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | clock | Randomizer seed |
//! | `BLOCKFALL_WIDTH` | 10 | Board columns (4-64) |
//! | `BLOCKFALL_HEIGHT` | 20 | Board rows (4-64) |
//! | `BLOCKFALL_RANDOMIZER` | `uniform` | `uniform` or `bag` |
//! | `BLOCKFALL_STATS_PATH` | data dir | Stats record file |
//! | `BLOCKFALL_STATS_DISABLED` | unset | `1`/`true` disables the record |
//! | `BLOCKFALL_LOG` | unset | Log file; no logging when unset |
//! | `BLOCKFALL_LOG_LEVEL` | `info` | `error`, `warn`, `info`, `debug`, `trace` |
//!
//! Values that do not parse fall back to their defaults.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Level;

use crate::core::EngineConfig;
use crate::records::RecordStore;
use crate::types::RandomizerKind;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// `None` disables the stats record.
    pub stats_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            stats_path: Some(RecordStore::default_path()),
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source (the process environment in `from_env`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            width: var("BLOCKFALL_WIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.width),
            height: var("BLOCKFALL_HEIGHT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.height),
            randomizer: var("BLOCKFALL_RANDOMIZER")
                .and_then(|s| RandomizerKind::from_str(&s))
                .unwrap_or(defaults.randomizer),
            seed: var("BLOCKFALL_SEED")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(clock_seed),
            ..defaults
        }
        .sanitized();

        let stats_disabled = var("BLOCKFALL_STATS_DISABLED")
            .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let stats_path = if stats_disabled {
            None
        } else {
            Some(
                var("BLOCKFALL_STATS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(RecordStore::default_path),
            )
        };

        Self {
            engine,
            stats_path,
            log_path: var("BLOCKFALL_LOG").map(PathBuf::from),
            log_level: var("BLOCKFALL_LOG_LEVEL")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        }
    }

    pub fn record_store(&self) -> Option<RecordStore> {
        self.stats_path.clone().map(RecordStore::new)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
