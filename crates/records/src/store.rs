use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use blockfall_core::GameOverReport;

use crate::achievements::Achievement;
use crate::record::StatsRecord;

/// Result of folding one game into the stored record
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub best_updated: bool,
    pub unlocked: Option<&'static Achievement>,
    /// The record as saved
    pub record: StatsRecord,
}

/// JSON file holding the [`StatsRecord`]
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/blockfall/stats.json`, falling back to
    /// `$HOME/.local/share` and then the working directory.
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".local");
                    p.push("share");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("blockfall");
        path.push("stats.json");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. A missing file yields the default record; a file that
    /// does not parse is logged and also yields the default.
    pub fn load(&self) -> Result<StatsRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stats record yet");
                return Ok(StatsRecord::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_slice::<StatsRecord>(&bytes) {
            Ok(record) => {
                debug!(path = %self.path.display(), games = record.games_played, "stats record loaded");
                Ok(record.sanitized())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed stats record, starting fresh");
                Ok(StatsRecord::default())
            }
        }
    }

    /// Write the record through a temporary file and rename it into place.
    pub fn save(&self, record: &StatsRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let text = serde_json::to_string_pretty(record).context("failed to encode stats record")?;

        let tmp = self.tmp_path();
        fs::write(&tmp, text).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!(
                "failed to move {} to {}",
                tmp.display(),
                self.path.display()
            )
        })?;

        debug!(path = %self.path.display(), "stats record saved");
        Ok(())
    }

    /// Load, fold in `report`, save, and return what changed.
    pub fn record_game(&self, report: &GameOverReport) -> Result<RecordOutcome> {
        let mut record = self.load()?;
        let (best_updated, unlocked) = record.apply(report);
        self.save(&record)?;

        if let Some(a) = unlocked {
            debug!(id = a.id, "achievement unlocked");
        }

        Ok(RecordOutcome {
            best_updated,
            unlocked,
            record,
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "stats.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
