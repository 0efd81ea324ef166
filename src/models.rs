//! Data models for tracked problems and user stats.
//!
//! Serialized field names stay camelCase and timestamps stay epoch
//! milliseconds so existing backup files round-trip without loss.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::MS_PER_DAY;
use crate::srs::{Review, SrsError};

/// Problem difficulty as tagged on the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Cycle through variants, for the add/edit form.
    pub fn next(&self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn color_for_theme(&self, theme: &crate::ui::theme::Theme) -> ratatui::style::Color {
        match self {
            Self::Easy => theme.colors.difficulty_easy,
            Self::Medium => theme.colors.difficulty_medium,
            Self::Hard => theme.colors.difficulty_hard,
        }
    }
}

/// Self-assessed recall quality at review time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Forgot, // No recall, full reset
    Hard,   // Recalled with serious difficulty
    Medium, // Adequate recall
    Easy,   // Clean recall
}

impl Rating {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Forgot),
            '2' => Some(Self::Hard),
            '3' => Some(Self::Medium),
            '4' => Some(Self::Easy),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Forgot => "Forgot",
            Self::Hard => "Hard",
            Self::Medium => "Medium",
            Self::Easy => "Easy",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forgot => "forgot",
            Self::Hard => "hard",
            Self::Medium => "medium",
            Self::Easy => "easy",
        }
    }

    pub fn all() -> [Rating; 4] {
        [Self::Forgot, Self::Hard, Self::Medium, Self::Easy]
    }

    pub fn color_for_theme(&self, theme: &crate::ui::theme::Theme) -> ratatui::style::Color {
        match self {
            Self::Forgot => theme.colors.rating_forgot,
            Self::Hard => theme.colors.rating_hard,
            Self::Medium => theme.colors.rating_medium,
            Self::Easy => theme.colors.rating_easy,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = SrsError;

    /// Ratings outside the four recognized values are rejected, never
    /// defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forgot" => Ok(Self::Forgot),
            "hard" => Ok(Self::Hard),
            "medium" => Ok(Self::Medium),
            "easy" => Ok(Self::Easy),
            other => Err(SrsError::InvalidRating(other.to_string())),
        }
    }
}

/// One review event. `problem_title` is a snapshot taken at review time so
/// the history log stays readable even if the problem is renamed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
    pub date: i64,
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
}

/// A tracked problem in the review rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // Scheduler-owned fields. `level` indexes the interval table and
    // `next_review` is always derived from it; nothing outside
    // `apply_review` writes them after creation.
    pub last_reviewed: i64,
    pub next_review: i64,
    pub level: usize,

    #[serde(default)]
    pub history: Vec<ReviewLog>,
    pub created_at: i64,
}

impl Problem {
    /// Create a problem at level 0, due after the first interval. The
    /// creation event is logged with rating `easy` by convention; it is not
    /// a real recall assessment.
    pub fn new(
        title: String,
        difficulty: Difficulty,
        tags: Vec<String>,
        link: Option<String>,
        notes: Option<String>,
        created_at: i64,
        intervals: &[u32],
    ) -> Self {
        let first_interval = i64::from(intervals.first().copied().unwrap_or(1));
        Self {
            id: Uuid::new_v4().to_string(),
            history: vec![ReviewLog {
                date: created_at,
                rating: Rating::Easy,
                problem_title: Some(title.clone()),
            }],
            title,
            difficulty,
            tags,
            link,
            notes,
            last_reviewed: created_at,
            next_review: created_at + first_interval * MS_PER_DAY,
            level: 0,
            created_at,
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_review <= now_ms
    }

    /// Completed reviews, excluding the creation entry.
    pub fn total_reviews(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Apply a scheduler result: update level and due date, append one
    /// history entry. This is the only code path that mutates `level`.
    pub fn apply_review(&mut self, review: Review, rating: Rating, now_ms: i64) {
        self.level = review.level;
        self.next_review = review.next_review;
        self.last_reviewed = now_ms;
        self.history.push(ReviewLog {
            date: now_ms,
            rating,
            problem_title: Some(self.title.clone()),
        });
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }
}

/// Persisted user statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub xp: u32,
    pub streak: u32,
    /// "YYYY-MM-DD" in the fixed reference timezone.
    pub last_login_date: String,
    pub total_solved: u32,
    pub total_reviewed: u32,
    pub level: u32,
    /// Daily review quota. Older stats files predate this field.
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

fn default_daily_limit() -> u32 {
    2
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            xp: 0,
            streak: 0,
            last_login_date: String::new(),
            total_solved: 0,
            total_reviewed: 0,
            level: 1,
            daily_limit: default_daily_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srs::DEFAULT_INTERVALS;

    #[test]
    fn new_problem_starts_at_level_zero_due_after_first_interval() {
        let p = Problem::new(
            "Two Sum".into(),
            Difficulty::Easy,
            vec!["Array".into()],
            None,
            None,
            1_000,
            &DEFAULT_INTERVALS,
        );
        assert_eq!(p.level, 0);
        assert_eq!(p.next_review, 1_000 + MS_PER_DAY);
        assert_eq!(p.history.len(), 1);
        assert_eq!(p.history[0].rating, Rating::Easy);
        assert_eq!(p.history[0].problem_title.as_deref(), Some("Two Sum"));
        assert_eq!(p.total_reviews(), 0);
    }

    #[test]
    fn problem_round_trips_original_persisted_shape() {
        let json = r#"{
            "id": "two-sum",
            "title": "Two Sum",
            "difficulty": "Easy",
            "tags": ["Array", "Hash Table"],
            "link": "https://leetcode.com/problems/two-sum/",
            "lastReviewed": 1700000000000,
            "nextReview": 1700086400000,
            "level": 2,
            "history": [
                { "date": 1700000000000, "rating": "easy", "problemTitle": "Two Sum" },
                { "date": 1700050000000, "rating": "forgot" }
            ],
            "createdAt": 1700000000000
        }"#;

        let p: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(p.level, 2);
        assert_eq!(p.history[1].rating, Rating::Forgot);
        assert!(p.notes.is_none());

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["nextReview"], 1_700_086_400_000_i64);
        assert_eq!(back["history"][0]["problemTitle"], "Two Sum");
        assert_eq!(back["history"][1]["rating"], "forgot");
        // Absent optionals are omitted, not serialized as null.
        assert!(back.get("notes").is_none());

        let again: Problem = serde_json::from_value(back).unwrap();
        assert_eq!(again, p);
    }

    #[test]
    fn rating_parse_rejects_unknown_values() {
        assert_eq!("medium".parse::<Rating>().unwrap(), Rating::Medium);
        let err = "ok".parse::<Rating>().unwrap_err();
        assert!(err.to_string().contains("ok"));
    }

    #[test]
    fn stats_missing_daily_limit_defaults_to_two() {
        let json = r#"{
            "xp": 120,
            "streak": 3,
            "lastLoginDate": "2024-01-15",
            "totalSolved": 4,
            "totalReviewed": 6,
            "level": 1
        }"#;
        let stats: UserStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.daily_limit, 2);
    }

    #[test]
    fn apply_review_appends_snapshot() {
        let mut p = Problem::new(
            "Valid Anagram".into(),
            Difficulty::Easy,
            vec![],
            None,
            None,
            0,
            &DEFAULT_INTERVALS,
        );
        let review = Review {
            level: 2,
            next_review: 7 * MS_PER_DAY,
        };
        p.apply_review(review, Rating::Easy, 100);
        assert_eq!(p.level, 2);
        assert_eq!(p.last_reviewed, 100);
        assert_eq!(p.history.len(), 2);
        assert_eq!(p.history[1].problem_title.as_deref(), Some("Valid Anagram"));
    }
}
