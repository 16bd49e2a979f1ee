use serde::{Deserialize, Serialize};

use blockfall_core::GameOverReport;

use crate::achievements::{self, Achievement};

/// Best value seen for each statistic, tracked independently
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestStats {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub lines: u32,
    #[serde(default)]
    pub max_combo: u32,
}

impl BestStats {
    /// Raise every field the report beats. Returns true if any field changed.
    pub fn merge(&mut self, report: &GameOverReport) -> bool {
        let mut updated = false;
        for (best, value) in [
            (&mut self.score, report.score),
            (&mut self.level, report.level),
            (&mut self.lines, report.lines),
            (&mut self.max_combo, report.max_combo),
        ] {
            if value > *best {
                *best = value;
                updated = true;
            }
        }
        updated
    }
}

/// Everything persisted between runs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsRecord {
    #[serde(default)]
    pub best: BestStats,
    /// Ids of earned achievements, in unlock order
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub games_played: u32,
}

impl StatsRecord {
    /// Fold one finished game into the record.
    ///
    /// Returns whether any best stat improved and the achievement unlocked by
    /// this game, if any.
    pub fn apply(&mut self, report: &GameOverReport) -> (bool, Option<&'static Achievement>) {
        self.games_played = self.games_played.saturating_add(1);
        let best_updated = self.best.merge(report);

        let unlocked = achievements::next_unlock(report, &self.achievements);
        if let Some(a) = unlocked {
            self.achievements.push(a.id.to_string());
        }

        (best_updated, unlocked)
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Drop unknown and duplicate achievement ids
    pub fn sanitized(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.achievements.len());
        for id in self.achievements.drain(..) {
            if achievements::find(&id).is_some() && !seen.contains(&id) {
                seen.push(id);
            }
        }
        self.achievements = seen;
        self
    }
}
