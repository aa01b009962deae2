use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use sudoku_engine::Difficulty;

/// Completion times kept for the rolling average.
const ROLLING_WINDOW: usize = 10;

/// Aggregates for one difficulty level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub played: usize,
    pub completed: usize,
    pub best_time_secs: Option<u64>,
    /// Completion times of the last few wins, newest last.
    pub recent_times: Vec<u64>,
    pub total_hints: usize,
}

impl DifficultyStats {
    /// Percentage of played games that were completed, rounded.
    pub fn completion_rate(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        (self.completed as f64 / self.played as f64 * 100.0).round() as u32
    }

    /// Rolling average completion time.
    pub fn average_time_secs(&self) -> Option<u64> {
        if self.recent_times.is_empty() {
            return None;
        }
        let sum: u64 = self.recent_times.iter().sum();
        Some(sum / self.recent_times.len() as u64)
    }
}

/// Player statistics across all difficulties. Persisted as JSON in the
/// platform data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub easy: DifficultyStats,
    pub medium: DifficultyStats,
    pub hard: DifficultyStats,
    pub total_play_secs: u64,
    /// Unix seconds of the most recent recorded game.
    pub last_played: Option<u64>,
}

impl Statistics {
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku-term-stats.json")
    }

    /// Load saved statistics, or start fresh when none exist.
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk, best effort.
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(Self::save_path(), json);
        }
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> &DifficultyStats {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn for_difficulty_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyStats {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Record a finished or abandoned game. Does not save; callers decide
    /// when to hit the disk.
    pub fn record_game(
        &mut self,
        difficulty: Difficulty,
        time_secs: u64,
        completed: bool,
        hints_used: usize,
    ) {
        self.total_play_secs += time_secs;
        self.last_played = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .ok();

        let entry = self.for_difficulty_mut(difficulty);
        entry.played += 1;
        entry.total_hints += hints_used;

        if completed {
            entry.completed += 1;
            entry.best_time_secs = Some(match entry.best_time_secs {
                Some(best) => best.min(time_secs),
                None => time_secs,
            });
            entry.recent_times.push(time_secs);
            if entry.recent_times.len() > ROLLING_WINDOW {
                entry.recent_times.remove(0);
            }
        }
    }

    /// Completion rate across one difficulty, or all of them.
    pub fn completion_rate(&self, difficulty: Option<Difficulty>) -> u32 {
        match difficulty {
            Some(d) => self.for_difficulty(d).completion_rate(),
            None => {
                let played = self.easy.played + self.medium.played + self.hard.played;
                let completed =
                    self.easy.completed + self.medium.completed + self.hard.completed;
                if played == 0 {
                    0
                } else {
                    (completed as f64 / played as f64 * 100.0).round() as u32
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Format seconds as MM:SS for the stats screen.
pub fn format_secs(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_wins_and_losses() {
        let mut stats = Statistics::default();
        stats.record_game(Difficulty::Easy, 120, true, 1);
        stats.record_game(Difficulty::Easy, 300, false, 0);
        stats.record_game(Difficulty::Hard, 900, true, 4);

        assert_eq!(stats.easy.played, 2);
        assert_eq!(stats.easy.completed, 1);
        assert_eq!(stats.easy.total_hints, 1);
        assert_eq!(stats.hard.completed, 1);
        assert_eq!(stats.total_play_secs, 1320);
        assert!(stats.last_played.is_some());
    }

    #[test]
    fn best_time_only_improves() {
        let mut stats = Statistics::default();
        stats.record_game(Difficulty::Medium, 500, true, 0);
        stats.record_game(Difficulty::Medium, 400, true, 0);
        stats.record_game(Difficulty::Medium, 600, true, 0);
        assert_eq!(stats.medium.best_time_secs, Some(400));
    }

    #[test]
    fn rolling_average_keeps_a_window() {
        let mut stats = Statistics::default();
        for i in 0..15 {
            stats.record_game(Difficulty::Easy, 100 + i, true, 0);
        }
        assert_eq!(stats.easy.recent_times.len(), ROLLING_WINDOW);
        // Only the last ten times (105..=114) remain.
        assert_eq!(stats.easy.recent_times[0], 105);
        assert_eq!(stats.easy.average_time_secs(), Some((105 + 114) / 2));
    }

    #[test]
    fn completion_rates() {
        let mut stats = Statistics::default();
        assert_eq!(stats.completion_rate(None), 0);

        stats.record_game(Difficulty::Easy, 60, true, 0);
        stats.record_game(Difficulty::Easy, 60, false, 0);
        stats.record_game(Difficulty::Hard, 60, false, 0);

        assert_eq!(stats.completion_rate(Some(Difficulty::Easy)), 50);
        assert_eq!(stats.completion_rate(Some(Difficulty::Hard)), 0);
        assert_eq!(stats.completion_rate(None), 33);
    }

    #[test]
    fn reset_clears_everything() {
        let mut stats = Statistics::default();
        stats.record_game(Difficulty::Easy, 60, true, 2);
        stats.reset();
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn serde_round_trip() {
        let mut stats = Statistics::default();
        stats.record_game(Difficulty::Hard, 777, true, 3);
        let json = serde_json::to_string(&stats).unwrap();
        let back: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
