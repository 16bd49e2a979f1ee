//! Achievement catalog
//!
//! Achievements are checked in catalog order against a finished game. A game
//! unlocks at most one new achievement: the first one not yet earned whose
//! condition holds.

use blockfall_core::GameOverReport;

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    condition: fn(&GameOverReport) -> bool,
}

impl Achievement {
    pub fn is_met(&self, report: &GameOverReport) -> bool {
        (self.condition)(report)
    }
}

pub static ACHIEVEMENTS: [Achievement; 11] = [
    Achievement {
        id: "first_game",
        name: "First Steps",
        description: "Finish your first game",
        condition: |_| true,
    },
    Achievement {
        id: "score_1000",
        name: "Warming Up",
        description: "Score 1000 points in one game",
        condition: |r| r.score >= 1000,
    },
    Achievement {
        id: "score_5000",
        name: "Seasoned Player",
        description: "Score 5000 points in one game",
        condition: |r| r.score >= 5000,
    },
    Achievement {
        id: "score_10000",
        name: "Block Master",
        description: "Score 10000 points in one game",
        condition: |r| r.score >= 10000,
    },
    Achievement {
        id: "level_5",
        name: "Climbing",
        description: "Reach level 5",
        condition: |r| r.level >= 5,
    },
    Achievement {
        id: "level_10",
        name: "Speed King",
        description: "Reach level 10",
        condition: |r| r.level >= 10,
    },
    Achievement {
        id: "lines_50",
        name: "Line Expert",
        description: "Clear 50 lines",
        condition: |r| r.lines >= 50,
    },
    Achievement {
        id: "lines_100",
        name: "Clean Sweep",
        description: "Clear 100 lines",
        condition: |r| r.lines >= 100,
    },
    Achievement {
        id: "tetris",
        name: "Tetris!",
        description: "Clear 4 lines at once",
        condition: |r| r.max_combo >= 4,
    },
    Achievement {
        id: "time_10min",
        name: "Endurance",
        description: "Play a single game for 10 minutes",
        condition: |r| r.play_time_ms >= 600_000,
    },
    Achievement {
        id: "efficiency",
        name: "Efficient",
        description: "Average more than 500 points per minute",
        condition: |r| r.avg_score_per_minute >= 500,
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// First achievement not in `earned` whose condition `report` meets
pub fn next_unlock(report: &GameOverReport, earned: &[String]) -> Option<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .find(|a| !earned.iter().any(|id| id == a.id) && a.is_met(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: u32, level: u32, lines: u32, max_combo: u32, play_time_ms: u64) -> GameOverReport {
        GameOverReport::new(score, level, lines, max_combo, play_time_ms, 10)
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            assert!(ACHIEVEMENTS[i + 1..].iter().all(|b| b.id != a.id), "{}", a.id);
        }
    }

    #[test]
    fn test_first_game_always_unlocks_first() {
        let r = report(20_000, 12, 120, 4, 900_000);
        assert_eq!(next_unlock(&r, &[]).unwrap().id, "first_game");
    }

    #[test]
    fn test_unlocks_in_catalog_order() {
        let r = report(6000, 3, 20, 4, 600_000);
        let mut earned = vec!["first_game".to_string()];

        let a = next_unlock(&r, &earned).unwrap();
        assert_eq!(a.id, "score_1000");
        earned.push(a.id.to_string());

        let a = next_unlock(&r, &earned).unwrap();
        assert_eq!(a.id, "score_5000");
        earned.push(a.id.to_string());

        // level_5 and lines_* not met; tetris is next.
        assert_eq!(next_unlock(&r, &earned).unwrap().id, "tetris");
    }

    #[test]
    fn test_nothing_left_to_unlock() {
        let r = report(0, 1, 0, 0, 1000);
        let earned = vec!["first_game".to_string()];
        assert!(next_unlock(&r, &earned).is_none());
    }

    #[test]
    fn test_efficiency_uses_average() {
        // 1000 points over two minutes = 500/min
        let r = report(1000, 1, 5, 1, 120_000);
        assert!(find("efficiency").unwrap().is_met(&r));
        assert!(!find("efficiency").unwrap().is_met(&report(998, 1, 5, 1, 120_000)));
    }
}
