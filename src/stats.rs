//! Streak, XP and achievement bookkeeping derived from review events.

use chrono::{Duration, FixedOffset, NaiveDate};

use crate::calendar;
use crate::models::{Problem, UserStats};

pub const XP_ADD_PROBLEM: u32 = 50;
pub const XP_REVIEW_PROBLEM: u32 = 20;

/// Rank titles by XP threshold, ascending.
pub const RANKS: [(&str, u32); 6] = [
    ("Novice", 0),
    ("Apprentice", 500),
    ("Adept", 1500),
    ("Expert", 3500),
    ("Master", 6000),
    ("Grandmaster", 10000),
];

pub fn rank_title(xp: u32) -> &'static str {
    RANKS
        .iter()
        .rev()
        .find(|(_, threshold)| xp >= *threshold)
        .map(|(title, _)| *title)
        .unwrap_or("Novice")
}

/// XP needed to reach the next rank, or the top threshold once there.
pub fn next_rank_xp(xp: u32) -> u32 {
    RANKS
        .iter()
        .map(|(_, threshold)| *threshold)
        .find(|threshold| xp < *threshold)
        .unwrap_or(RANKS[RANKS.len() - 1].1)
}

/// Advance the login streak for the current calendar day.
///
/// Idempotent within a day: if `last_login_date` is already today this is a
/// no-op. A login on the reference timezone's yesterday extends the streak;
/// any longer gap (or a first login) resets it to 1.
pub fn advance_streak(stats: &mut UserStats, now_ms: i64, offset: FixedOffset) {
    let today = calendar::day_string(now_ms, offset);
    if stats.last_login_date == today {
        return;
    }

    if stats.last_login_date == calendar::yesterday_string(now_ms, offset) {
        stats.streak += 1;
    } else {
        stats.streak = 1;
    }
    stats.last_login_date = today;
}

/// Review events logged today across all problems' histories, in the fixed
/// reference timezone. Creation entries count: a problem logged today already
/// occupies a quota slot.
pub fn reviews_today(problems: &[Problem], now_ms: i64, offset: FixedOffset) -> usize {
    problems
        .iter()
        .flat_map(|p| &p.history)
        .filter(|log| calendar::same_day(log.date, now_ms, offset))
        .count()
}

/// Due slots left today. The cap is applied after due-sorting, never by
/// sampling.
pub fn remaining_quota(daily_limit: u32, reviews_today: usize) -> usize {
    (daily_limit as usize).saturating_sub(reviews_today)
}

pub fn record_added(stats: &mut UserStats) {
    stats.xp += XP_ADD_PROBLEM;
    stats.total_solved += 1;
}

pub fn record_review(stats: &mut UserStats) {
    stats.xp += XP_REVIEW_PROBLEM;
    stats.total_reviewed += 1;
}

/// A badge with a predicate over the current stats.
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub earned: fn(&UserStats) -> bool,
}

pub fn achievements() -> &'static [Achievement] {
    &[
        Achievement {
            id: "first_blood",
            title: "Hello World",
            description: "Log your first problem",
            earned: |s| s.total_solved >= 1,
        },
        Achievement {
            id: "streak_3",
            title: "Momentum",
            description: "Reach a 3-day streak",
            earned: |s| s.streak >= 3,
        },
        Achievement {
            id: "streak_7",
            title: "Unstoppable",
            description: "Reach a 7-day streak",
            earned: |s| s.streak >= 7,
        },
        Achievement {
            id: "novice_review",
            title: "Dedicated",
            description: "Review 10 problems total",
            earned: |s| s.total_reviewed >= 10,
        },
        Achievement {
            id: "master_log",
            title: "Algorithmist",
            description: "Log 50 unique problems",
            earned: |s| s.total_solved >= 50,
        },
        Achievement {
            id: "xp_hunter",
            title: "Level Up",
            description: "Reach 1000 XP",
            earned: |s| s.xp >= 1000,
        },
    ]
}

/// Activity counts for the trailing `days` calendar days (oldest first):
/// creations plus every logged review, bucketed by reference-timezone day.
pub fn activity_counts(
    problems: &[Problem],
    now_ms: i64,
    offset: FixedOffset,
    days: usize,
) -> Vec<(NaiveDate, usize)> {
    let today = calendar::date_at(now_ms, offset);
    let start = today - Duration::days(days.saturating_sub(1) as i64);

    let mut counts: Vec<(NaiveDate, usize)> = (0..days)
        .map(|i| (start + Duration::days(i as i64), 0))
        .collect();

    let mut bump = |date: NaiveDate| {
        if date >= start && date <= today {
            let idx = (date - start).num_days() as usize;
            counts[idx].1 += 1;
        }
    };

    for p in problems {
        bump(calendar::date_at(p.created_at, offset));
        for log in &p.history {
            bump(calendar::date_at(log.date, offset));
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MS_PER_DAY;
    use crate::models::{Difficulty, Problem, Rating, ReviewLog};
    use crate::srs::DEFAULT_INTERVALS;

    // 2024-01-15 00:00:00 UTC
    const NOW: i64 = 1_705_276_800_000;

    fn utc() -> FixedOffset {
        calendar::offset_from_minutes(0)
    }

    #[test]
    fn streak_is_idempotent_within_a_day() {
        let mut stats = UserStats {
            streak: 4,
            last_login_date: "2024-01-15".into(),
            ..Default::default()
        };
        advance_streak(&mut stats, NOW, utc());
        advance_streak(&mut stats, NOW + 3_600_000, utc());
        assert_eq!(stats.streak, 4);
        assert_eq!(stats.last_login_date, "2024-01-15");
    }

    #[test]
    fn streak_extends_from_yesterday() {
        let mut stats = UserStats {
            streak: 4,
            last_login_date: "2024-01-14".into(),
            ..Default::default()
        };
        advance_streak(&mut stats, NOW, utc());
        assert_eq!(stats.streak, 5);
        assert_eq!(stats.last_login_date, "2024-01-15");
    }

    #[test]
    fn streak_resets_after_a_gap_or_first_login() {
        let mut stats = UserStats {
            streak: 9,
            last_login_date: "2024-01-10".into(),
            ..Default::default()
        };
        advance_streak(&mut stats, NOW, utc());
        assert_eq!(stats.streak, 1);

        let mut fresh = UserStats::default();
        advance_streak(&mut fresh, NOW, utc());
        assert_eq!(fresh.streak, 1);
    }

    #[test]
    fn reviews_today_counts_all_histories_in_reference_days() {
        let mut a = Problem::new(
            "A".into(),
            Difficulty::Easy,
            vec![],
            None,
            None,
            NOW - 10 * MS_PER_DAY,
            &DEFAULT_INTERVALS,
        );
        a.history.push(ReviewLog {
            date: NOW + 1_000,
            rating: Rating::Medium,
            problem_title: None,
        });
        a.history.push(ReviewLog {
            date: NOW - MS_PER_DAY,
            rating: Rating::Hard,
            problem_title: None,
        });

        // Created today: the creation entry itself takes a quota slot.
        let b = Problem::new(
            "B".into(),
            Difficulty::Medium,
            vec![],
            None,
            None,
            NOW + 2_000,
            &DEFAULT_INTERVALS,
        );

        assert_eq!(reviews_today(&[a, b], NOW, utc()), 2);
    }

    #[test]
    fn quota_caps_after_sorting() {
        assert_eq!(remaining_quota(2, 0), 2);
        assert_eq!(remaining_quota(2, 2), 0);
        assert_eq!(remaining_quota(2, 5), 0);
        assert_eq!(remaining_quota(5, 3), 2);
    }

    #[test]
    fn ranks_follow_xp_thresholds() {
        assert_eq!(rank_title(0), "Novice");
        assert_eq!(rank_title(499), "Novice");
        assert_eq!(rank_title(500), "Apprentice");
        assert_eq!(rank_title(3500), "Expert");
        assert_eq!(rank_title(12_000), "Grandmaster");
        assert_eq!(next_rank_xp(0), 500);
        assert_eq!(next_rank_xp(600), 1500);
        assert_eq!(next_rank_xp(20_000), 10_000);
    }

    #[test]
    fn xp_rewards_accumulate() {
        let mut stats = UserStats::default();
        record_added(&mut stats);
        record_review(&mut stats);
        record_review(&mut stats);
        assert_eq!(stats.xp, XP_ADD_PROBLEM + 2 * XP_REVIEW_PROBLEM);
        assert_eq!(stats.total_solved, 1);
        assert_eq!(stats.total_reviewed, 2);
    }

    #[test]
    fn achievements_evaluate_against_stats() {
        let stats = UserStats {
            total_solved: 1,
            streak: 3,
            ..Default::default()
        };
        let earned: Vec<&str> = achievements()
            .iter()
            .filter(|a| (a.earned)(&stats))
            .map(|a| a.id)
            .collect();
        assert_eq!(earned, vec!["first_blood", "streak_3"]);
    }

    #[test]
    fn activity_counts_bucket_by_reference_day() {
        let p = Problem::new(
            "A".into(),
            Difficulty::Easy,
            vec![],
            None,
            None,
            NOW - 2 * MS_PER_DAY,
            &DEFAULT_INTERVALS,
        );
        let counts = activity_counts(&[p], NOW, utc(), 7);
        assert_eq!(counts.len(), 7);
        // Creation day holds the created_at bump plus the creation log entry.
        assert_eq!(counts[4].1, 2);
        assert_eq!(counts[6].1, 0);
    }
}
