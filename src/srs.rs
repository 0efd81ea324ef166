//! Fixed-interval spaced repetition scheduler.
//!
//! The scheduler is deterministic: a problem's mastery level indexes a table
//! of review gaps in days, and each rating maps to a level transition plus an
//! interval lookup. No ease factors, no randomness, no clock reads — callers
//! pass `now` in.

use thiserror::Error;

use crate::calendar::MS_PER_DAY;
use crate::models::{Problem, Rating};

/// Review gaps in days, indexed by mastery level. Level 0 reviews tomorrow,
/// the top level every 90 days.
pub const DEFAULT_INTERVALS: [u32; 7] = [1, 3, 7, 14, 30, 60, 90];

#[derive(Debug, Error)]
pub enum SrsError {
    #[error("unrecognized rating '{0}' (expected forgot, hard, medium or easy)")]
    InvalidRating(String),
}

/// Outcome of a single review: the new mastery level and when the problem
/// comes due again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Review {
    pub level: usize,
    pub next_review: i64,
}

/// Compute the level transition and next due date for one review event.
///
/// Total over valid inputs: every `Rating` variant produces a result, and the
/// returned level is always within `[0, intervals.len() - 1]`.
pub fn compute_next_review(level: usize, rating: Rating, now_ms: i64, intervals: &[u32]) -> Review {
    let last = intervals.len().saturating_sub(1);

    let (new_level, interval_days) = match rating {
        // Full reset, regardless of how mastered the problem was.
        Rating::Forgot => (0, intervals.first().copied().unwrap_or(1)),

        // Demote one level, then schedule at the demoted (shorter) gap.
        Rating::Hard => {
            let new_level = level.saturating_sub(1).min(last);
            (new_level, intervals.get(new_level).copied().unwrap_or(1))
        }

        // Interval is looked up at the pre-increment level, and only then
        // does the level advance. Swapping these two steps changes the
        // schedule.
        Rating::Medium => {
            let days = intervals.get(level).copied().unwrap_or(3);
            (level.saturating_add(1).min(last), days)
        }

        // Jump two levels to graduate quickly; the gap comes from the
        // post-jump level.
        Rating::Easy => {
            let new_level = level.saturating_add(2).min(last);
            (new_level, intervals.get(new_level).copied().unwrap_or(7))
        }
    };

    Review {
        level: new_level,
        next_review: now_ms + i64::from(interval_days) * MS_PER_DAY,
    }
}

/// Indices of due problems, least mastered first, ties broken by how overdue
/// they are.
pub fn due_order(problems: &[Problem], now_ms: i64) -> Vec<usize> {
    let mut due: Vec<usize> = problems
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_due(now_ms))
        .map(|(i, _)| i)
        .collect();

    due.sort_by(|&a, &b| {
        problems[a]
            .level
            .cmp(&problems[b].level)
            .then(problems[a].next_review.cmp(&problems[b].next_review))
    });
    due
}

/// Project the dates of the next `k` reviews past the pending one, assuming
/// every future review is rated medium: bump the level one step (capped) and
/// accumulate that level's interval. Advisory only — never persisted.
pub fn project_schedule(level: usize, next_review: i64, k: usize, intervals: &[u32]) -> Vec<i64> {
    let last = intervals.len().saturating_sub(1);
    let mut projected = Vec::with_capacity(k);
    let mut sim_level = level;
    let mut at = next_review;

    for _ in 0..k {
        sim_level = sim_level.saturating_add(1).min(last);
        let days = intervals.get(sim_level).copied().unwrap_or(30);
        at += i64::from(days) * MS_PER_DAY;
        projected.push(at);
    }
    projected
}

/// Scheduler with an injectable interval table.
pub struct Scheduler {
    intervals: Vec<u32>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }

    pub fn with_intervals(intervals: Vec<u32>) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    pub fn compute_next_review(&self, level: usize, rating: Rating, now_ms: i64) -> Review {
        compute_next_review(level, rating, now_ms, &self.intervals)
    }

    /// Score one review: compute the transition and apply it to the problem,
    /// appending the history entry. Returns the computed review.
    pub fn review(&self, problem: &mut Problem, rating: Rating, now_ms: i64) -> Review {
        let review = self.compute_next_review(problem.level, rating, now_ms);
        problem.apply_review(review, rating, now_ms);
        review
    }

    /// Interval in days each rating would schedule, for the rating buttons.
    pub fn preview(&self, level: usize) -> [(Rating, u32); 4] {
        Rating::all().map(|rating| {
            let review = self.compute_next_review(level, rating, 0);
            (rating, (review.next_review / MS_PER_DAY) as u32)
        })
    }

    pub fn due_order(&self, problems: &[Problem], now_ms: i64) -> Vec<usize> {
        due_order(problems, now_ms)
    }

    pub fn project(&self, problem: &Problem, k: usize) -> Vec<i64> {
        project_schedule(problem.level, problem.next_review, k, &self.intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    const T: i64 = 1_700_000_000_000;

    fn problem_at(level: usize, next_review: i64) -> Problem {
        let mut p = Problem::new(
            format!("p{level}"),
            Difficulty::Medium,
            vec![],
            None,
            None,
            0,
            &DEFAULT_INTERVALS,
        );
        p.level = level;
        p.next_review = next_review;
        p
    }

    #[test]
    fn forgot_resets_to_level_zero_from_any_level() {
        for level in 0..DEFAULT_INTERVALS.len() {
            let r = compute_next_review(level, Rating::Forgot, T, &DEFAULT_INTERVALS);
            assert_eq!(r.level, 0);
            assert_eq!(r.next_review, T + MS_PER_DAY);
        }
    }

    #[test]
    fn hard_demotes_one_level_and_floors_at_zero() {
        for level in 1..DEFAULT_INTERVALS.len() {
            let r = compute_next_review(level, Rating::Hard, T, &DEFAULT_INTERVALS);
            assert_eq!(r.level, level - 1);
            assert_eq!(
                r.next_review,
                T + i64::from(DEFAULT_INTERVALS[level - 1]) * MS_PER_DAY
            );
        }
        let r = compute_next_review(0, Rating::Hard, T, &DEFAULT_INTERVALS);
        assert_eq!(r.level, 0);
        assert_eq!(r.next_review, T + MS_PER_DAY);
    }

    #[test]
    fn medium_looks_up_interval_before_incrementing() {
        // Level 5 reviews at the level-5 gap (60 days) but lands on level 6.
        let r = compute_next_review(5, Rating::Medium, T, &DEFAULT_INTERVALS);
        assert_eq!(r.level, 6);
        assert_eq!(r.next_review, T + 60 * MS_PER_DAY);
    }

    #[test]
    fn medium_caps_at_last_level() {
        let last = DEFAULT_INTERVALS.len() - 1;
        let r = compute_next_review(last, Rating::Medium, T, &DEFAULT_INTERVALS);
        assert_eq!(r.level, last);
        assert_eq!(r.next_review, T + 90 * MS_PER_DAY);
    }

    #[test]
    fn easy_jumps_two_levels_and_uses_post_jump_interval() {
        let r = compute_next_review(0, Rating::Easy, T, &DEFAULT_INTERVALS);
        assert_eq!(r.level, 2);
        assert_eq!(r.next_review, T + 7 * MS_PER_DAY);
    }

    #[test]
    fn hard_at_level_three_schedules_seven_days() {
        let r = compute_next_review(3, Rating::Hard, T, &DEFAULT_INTERVALS);
        assert_eq!(r.level, 2);
        assert_eq!(r.next_review, T + 7 * MS_PER_DAY);
    }

    #[test]
    fn level_stays_clamped_under_any_rating_sequence() {
        let last = DEFAULT_INTERVALS.len() - 1;

        // Repeated easy converges to the top and stays there.
        let mut level = 0;
        for _ in 0..20 {
            level = compute_next_review(level, Rating::Easy, T, &DEFAULT_INTERVALS).level;
            assert!(level <= last);
        }
        assert_eq!(level, last);

        // Repeated forgot stays at zero.
        for _ in 0..5 {
            level = compute_next_review(level, Rating::Forgot, T, &DEFAULT_INTERVALS).level;
        }
        assert_eq!(level, 0);

        // A mixed sequence never escapes the table.
        let sequence = [
            Rating::Easy,
            Rating::Easy,
            Rating::Medium,
            Rating::Hard,
            Rating::Easy,
            Rating::Forgot,
            Rating::Medium,
            Rating::Easy,
            Rating::Easy,
            Rating::Easy,
        ];
        for rating in sequence {
            level = compute_next_review(level, rating, T, &DEFAULT_INTERVALS).level;
            assert!(level <= last);
        }
    }

    #[test]
    fn alternate_interval_tables_are_honored() {
        let table = [2, 5, 11];
        let r = compute_next_review(0, Rating::Medium, T, &table);
        assert_eq!(r.level, 1);
        assert_eq!(r.next_review, T + 2 * MS_PER_DAY);

        // Easy from level 1 would be level 3, clamped to the last index.
        let r = compute_next_review(1, Rating::Easy, T, &table);
        assert_eq!(r.level, 2);
        assert_eq!(r.next_review, T + 11 * MS_PER_DAY);

        // Same table injected through the scheduler.
        let scheduler = Scheduler::with_intervals(table.to_vec());
        assert_eq!(scheduler.intervals(), &table);
        let r = scheduler.compute_next_review(1, Rating::Easy, T);
        assert_eq!(r.level, 2);
        assert_eq!(r.next_review, T + 11 * MS_PER_DAY);
    }

    #[test]
    fn due_order_surfaces_least_mastered_first() {
        // Levels [2, 0, 1], all equally overdue.
        let problems = vec![
            problem_at(2, T - 1000),
            problem_at(0, T - 1000),
            problem_at(1, T - 1000),
        ];
        assert_eq!(due_order(&problems, T), vec![1, 2, 0]);
    }

    #[test]
    fn due_order_breaks_level_ties_by_overdue_time() {
        let problems = vec![
            problem_at(1, T - 500),
            problem_at(1, T - 2_000),
            problem_at(1, T + 1), // not due
        ];
        assert_eq!(due_order(&problems, T), vec![1, 0]);
    }

    #[test]
    fn due_includes_exactly_at_now() {
        let problems = vec![problem_at(0, T)];
        assert_eq!(due_order(&problems, T), vec![0]);
    }

    #[test]
    fn projection_simulates_medium_ratings() {
        // Level 1, next due at T. Future steps level up 2 -> 3 -> 4 and
        // accumulate 7, 14, 30 days.
        let projected = project_schedule(1, T, 3, &DEFAULT_INTERVALS);
        assert_eq!(
            projected,
            vec![
                T + 7 * MS_PER_DAY,
                T + 21 * MS_PER_DAY,
                T + 51 * MS_PER_DAY,
            ]
        );
    }

    #[test]
    fn projection_caps_at_top_level() {
        let last = DEFAULT_INTERVALS.len() - 1;
        let projected = project_schedule(last, T, 2, &DEFAULT_INTERVALS);
        assert_eq!(
            projected,
            vec![T + 90 * MS_PER_DAY, T + 180 * MS_PER_DAY]
        );
    }

    #[test]
    fn scheduler_review_applies_transition_and_logs() {
        let scheduler = Scheduler::new();
        let mut p = problem_at(0, T - 1);
        let before = p.history.len();

        let review = scheduler.review(&mut p, Rating::Easy, T);
        assert_eq!(review.level, 2);
        assert_eq!(p.level, 2);
        assert_eq!(p.next_review, T + 7 * MS_PER_DAY);
        assert_eq!(p.history.len(), before + 1);
        assert_eq!(p.history.last().unwrap().rating, Rating::Easy);
    }

    #[test]
    fn preview_reports_interval_days_per_rating() {
        let scheduler = Scheduler::new();
        let preview = scheduler.preview(3);
        assert_eq!(preview[0], (Rating::Forgot, 1));
        assert_eq!(preview[1], (Rating::Hard, 7));
        assert_eq!(preview[2], (Rating::Medium, 14));
        assert_eq!(preview[3], (Rating::Easy, 60));
    }
}
