//! JSON persistence for the problem collection and user stats.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Difficulty, Problem, UserStats};
use crate::srs::DEFAULT_INTERVALS;

const PROBLEMS_FILE: &str = "problems.json";
const STATS_FILE: &str = "stats.json";

const BACKUP_VERSION: u32 = 1;
const BACKUP_APP: &str = "LeetCycle";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid backup file: {0}")]
    InvalidBackupFormat(&'static str),
}

/// Backup envelope. `app` and `version` identify the producer; import
/// validates the shape before touching persisted state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Backup {
    pub problems: Vec<Problem>,
    pub stats: UserStats,
    pub timestamp: i64,
    pub version: u32,
    pub app: String,
}

/// Handles problem and stats persistence under one data directory.
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        Ok(Self { data_dir })
    }

    /// Get default storage location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("leetcycle")
    }

    fn problems_path(&self) -> PathBuf {
        self.data_dir.join(PROBLEMS_FILE)
    }

    fn stats_path(&self) -> PathBuf {
        self.data_dir.join(STATS_FILE)
    }

    /// Load the tracked problems. A missing file seeds the starter problem
    /// for first-time users; a corrupt file falls back to an empty
    /// collection so the scheduler is never fed malformed data.
    pub fn load_problems(&self) -> Vec<Problem> {
        let path = self.problems_path();
        if !path.exists() {
            return sample_problems(chrono::Utc::now().timestamp_millis());
        }

        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(problems) => problems,
                Err(e) => {
                    warn!("Corrupt problems file {:?}, starting empty: {}", path, e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("Could not read {:?}, starting empty: {}", path, e);
                Vec::new()
            }
        }
    }

    pub fn save_problems(&self, problems: &[Problem]) -> Result<()> {
        let json = serde_json::to_string_pretty(problems)?;
        fs::write(self.problems_path(), json)
            .with_context(|| format!("Failed to write {:?}", self.problems_path()))?;
        Ok(())
    }

    /// Load user stats, falling back to defaults when missing or corrupt.
    pub fn load_stats(&self) -> UserStats {
        let path = self.stats_path();
        if !path.exists() {
            return UserStats::default();
        }

        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(stats) => stats,
                Err(e) => {
                    warn!("Corrupt stats file {:?}, using defaults: {}", path, e);
                    UserStats::default()
                }
            },
            Err(e) => {
                warn!("Could not read {:?}, using defaults: {}", path, e);
                UserStats::default()
            }
        }
    }

    pub fn save_stats(&self, stats: &UserStats) -> Result<()> {
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(self.stats_path(), json)
            .with_context(|| format!("Failed to write {:?}", self.stats_path()))?;
        Ok(())
    }

    /// Export everything to a backup file. Returns the problem count.
    pub fn export_backup(&self, path: &Path) -> Result<usize> {
        let backup = Backup {
            problems: self.load_problems(),
            stats: self.load_stats(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            version: BACKUP_VERSION,
            app: BACKUP_APP.to_string(),
        };

        let json = serde_json::to_string_pretty(&backup)?;
        fs::write(path, json).with_context(|| format!("Failed to write backup {:?}", path))?;
        info!("Exported {} problems to {:?}", backup.problems.len(), path);
        Ok(backup.problems.len())
    }

    /// Import a backup, overwriting persisted state. The whole payload is
    /// validated and parsed before anything is written, so a bad file never
    /// leaves a partial merge behind.
    pub fn import_backup(&self, path: &Path) -> Result<usize> {
        let json =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let value: serde_json::Value =
            serde_json::from_str(&json).with_context(|| format!("Failed to parse {:?}", path))?;

        if !value.get("problems").map_or(false, |p| p.is_array()) {
            return Err(StoreError::InvalidBackupFormat("missing problems list").into());
        }
        if value.get("stats").is_none() {
            return Err(StoreError::InvalidBackupFormat("missing stats").into());
        }

        let backup: Backup =
            serde_json::from_value(value).with_context(|| format!("Failed to parse {:?}", path))?;

        self.save_problems(&backup.problems)?;
        self.save_stats(&backup.stats)?;
        info!("Imported {} problems from {:?}", backup.problems.len(), path);
        Ok(backup.problems.len())
    }

    /// Get default backup path.
    pub fn default_backup_path() -> PathBuf {
        let date = chrono::Utc::now().format("%Y-%m-%d");
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!("leetcycle-backup-{}.json", date))
    }
}

/// Starter collection for first-time users.
fn sample_problems(now_ms: i64) -> Vec<Problem> {
    vec![Problem::new(
        "Two Sum".to_string(),
        Difficulty::Easy,
        vec!["Array".to_string(), "Hash Table".to_string()],
        Some("https://leetcode.com/problems/two-sum/".to_string()),
        None,
        now_ms,
        &DEFAULT_INTERVALS,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().to_path_buf()).unwrap();
        (dir, storage)
    }

    fn tracked_problem(title: &str) -> Problem {
        let mut p = Problem::new(
            title.to_string(),
            Difficulty::Medium,
            vec!["Graph".to_string()],
            Some("https://leetcode.com/problems/course-schedule/".to_string()),
            Some("Topological sort".to_string()),
            1_700_000_000_000,
            &DEFAULT_INTERVALS,
        );
        p.apply_review(
            crate::srs::Review {
                level: 1,
                next_review: 1_700_300_000_000,
            },
            Rating::Medium,
            1_700_100_000_000,
        );
        p
    }

    #[test]
    fn first_run_seeds_sample_then_round_trips() {
        let (_dir, storage) = storage();
        let seeded = storage.load_problems();
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].title, "Two Sum");

        let problems = vec![tracked_problem("Course Schedule")];
        storage.save_problems(&problems).unwrap();
        assert_eq!(storage.load_problems(), problems);
    }

    #[test]
    fn corrupt_files_fall_back_without_crashing() {
        let (dir, storage) = storage();
        fs::write(dir.path().join(PROBLEMS_FILE), "not json{").unwrap();
        fs::write(dir.path().join(STATS_FILE), "[1,2").unwrap();

        assert!(storage.load_problems().is_empty());
        assert_eq!(storage.load_stats(), UserStats::default());
    }

    #[test]
    fn stats_round_trip() {
        let (_dir, storage) = storage();
        let stats = UserStats {
            xp: 570,
            streak: 4,
            last_login_date: "2024-01-15".into(),
            total_solved: 9,
            total_reviewed: 21,
            level: 1,
            daily_limit: 3,
        };
        storage.save_stats(&stats).unwrap();
        assert_eq!(storage.load_stats(), stats);
    }

    #[test]
    fn backup_round_trips_collection_and_stats() {
        let (dir, storage) = storage();
        let problems = vec![tracked_problem("Course Schedule"), tracked_problem("3Sum")];
        let stats = UserStats {
            xp: 140,
            ..Default::default()
        };
        storage.save_problems(&problems).unwrap();
        storage.save_stats(&stats).unwrap();

        let backup_path = dir.path().join("backup.json");
        assert_eq!(storage.export_backup(&backup_path).unwrap(), 2);

        // Restore into a fresh directory: identical, id for id.
        let (_dir2, other) = self::storage();
        assert_eq!(other.import_backup(&backup_path).unwrap(), 2);
        assert_eq!(other.load_problems(), problems);
        assert_eq!(other.load_stats(), stats);
    }

    #[test]
    fn import_rejects_malformed_envelopes_atomically() {
        let (dir, storage) = storage();
        let existing = vec![tracked_problem("Reorder List")];
        storage.save_problems(&existing).unwrap();

        for bad in [
            r#"{"stats": {}}"#,
            r#"{"problems": {}, "stats": {}}"#,
            r#"{"problems": []}"#,
        ] {
            let path = dir.path().join("bad.json");
            fs::write(&path, bad).unwrap();
            assert!(storage.import_backup(&path).is_err());
        }

        // Nothing was overwritten by the failed imports.
        assert_eq!(storage.load_problems(), existing);
    }
}
