//! End-of-session statistics

/// Final statistics of a session, produced once when it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverReport {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub max_combo: u32,
    /// Time spent running, pauses excluded
    pub play_time_ms: u64,
    pub pieces_locked: u32,
    /// Score per minute of play, rounded; 0 for a zero-length session
    pub avg_score_per_minute: u32,
}

impl GameOverReport {
    pub fn new(
        score: u32,
        level: u32,
        lines: u32,
        max_combo: u32,
        play_time_ms: u64,
        pieces_locked: u32,
    ) -> Self {
        Self {
            score,
            level,
            lines,
            max_combo,
            play_time_ms,
            pieces_locked,
            avg_score_per_minute: avg_score_per_minute(score, play_time_ms),
        }
    }

    /// Play time as `MM:SS`
    pub fn play_time(&self) -> String {
        format_play_time(self.play_time_ms)
    }
}

/// Rounded score per minute of play
pub fn avg_score_per_minute(score: u32, play_time_ms: u64) -> u32 {
    if play_time_ms == 0 {
        return 0;
    }
    let minutes = play_time_ms as f64 / 60_000.0;
    (score as f64 / minutes).round().min(u32::MAX as f64) as u32
}

/// Format milliseconds as `MM:SS` (minutes keep growing past 99)
pub fn format_play_time(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
