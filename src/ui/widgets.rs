//! Custom widgets for the tracker TUI.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Gauge, Paragraph, Widget},
};

use super::theme::Theme;
use crate::models::Rating;
use crate::stats;

// ══════════════════════════════════════════════════════════════════════════
// Logo Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct Logo<'a> {
    theme: &'a Theme,
}

impl<'a> Logo<'a> {
    const ART: &'static str = r#"
    ╭──────────────────────────────────────────────╮
    │  _              _    ____           _        │
    │ | |    ___  ___| |_ / ___|   _  ___| | ___   │
    │ | |   / _ \/ _ \ __| |  | | | |/ __| |/ _ \  │
    │ | |__|  __/  __/ |_| |__| |_| | (__| |  __/  │
    │ |_____\___|\___|\__|\____\__, |\___|_|\___|  │
    │                          |___/               │
    │        spaced repetition for problems        │
    ╰──────────────────────────────────────────────╯"#;

    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn render_to(theme: &Theme, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = Self::ART
            .lines()
            .skip(1)
            .map(|line| {
                Line::from(vec![Span::styled(
                    line,
                    Style::default().fg(theme.colors.primary),
                )])
            })
            .collect();

        let para = Paragraph::new(lines).alignment(Alignment::Center);
        para.render(area, buf);
    }
}

impl Widget for Logo<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_to(self.theme, area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Stats Cards Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct StatsCards<'a> {
    stats: &'a crate::models::UserStats,
    theme: &'a Theme,
}

impl<'a> StatsCards<'a> {
    pub fn new(stats: &'a crate::models::UserStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }

    fn card(&self, title: &str, value: String, color: ratatui::style::Color, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.text_dim));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                title.to_string(),
                Style::default().fg(self.theme.colors.text_muted),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

impl Widget for StatsCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

        self.card(
            "Day Streak",
            format!("🔥 {}", self.stats.streak),
            self.theme.colors.warning,
            chunks[0],
            buf,
        );
        self.card(
            &format!("{} / {} XP", self.stats.xp, stats::next_rank_xp(self.stats.xp)),
            stats::rank_title(self.stats.xp).to_string(),
            self.theme.colors.primary,
            chunks[1],
            buf,
        );
        self.card(
            "Total Logged",
            self.stats.total_solved.to_string(),
            self.theme.colors.success,
            chunks[2],
            buf,
        );
        self.card(
            "Reviews Done",
            self.stats.total_reviewed.to_string(),
            self.theme.colors.info,
            chunks[3],
            buf,
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Daily Goal Gauge
// ══════════════════════════════════════════════════════════════════════════

pub struct DailyGoalGauge<'a> {
    reviews_today: usize,
    daily_limit: u32,
    theme: &'a Theme,
}

impl<'a> DailyGoalGauge<'a> {
    pub fn new(reviews_today: usize, daily_limit: u32, theme: &'a Theme) -> Self {
        Self {
            reviews_today,
            daily_limit,
            theme,
        }
    }
}

impl Widget for DailyGoalGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let limit = self.daily_limit.max(1) as f64;
        let ratio = (self.reviews_today as f64 / limit).min(1.0);
        let done = self.reviews_today >= self.daily_limit as usize;

        let color = if done {
            self.theme.colors.success
        } else {
            self.theme.colors.primary
        };

        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.text_dim))
                    .title(" Daily Goal ")
                    .title_style(self.theme.subtitle()),
            )
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(format!("{} / {} revised", self.reviews_today, self.daily_limit))
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Rating Buttons Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct RatingButtons<'a> {
    preview: &'a [(Rating, u32); 4],
    theme: &'a Theme,
}

impl<'a> RatingButtons<'a> {
    pub fn new(preview: &'a [(Rating, u32); 4], theme: &'a Theme) -> Self {
        Self { preview, theme }
    }
}

impl Widget for RatingButtons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

        for (i, (rating, days)) in self.preview.iter().enumerate() {
            let color = rating.color_for_theme(self.theme);
            let key = (i + 1).to_string();

            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));

            let inner = button.inner(chunks[i]);
            button.render(chunks[i], buf);

            let key_line = Line::from(vec![Span::styled(
                &key,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]);
            Paragraph::new(key_line)
                .alignment(Alignment::Center)
                .render(Rect { y: inner.y, ..inner }, buf);

            let name_line = Line::from(vec![Span::styled(
                rating.name(),
                Style::default().fg(color),
            )]);
            Paragraph::new(name_line)
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y: inner.y + 1,
                        ..inner
                    },
                    buf,
                );

            let interval_line = Line::from(vec![Span::styled(
                format!("in {}d", days),
                Style::default().fg(self.theme.colors.text_muted),
            )]);
            Paragraph::new(interval_line)
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y: inner.y + 2,
                        ..inner
                    },
                    buf,
                );
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        let line = Line::from(spans);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Activity Heatmap Widget
// ══════════════════════════════════════════════════════════════════════════

/// GitHub-style activity grid over the trailing weeks, one cell per
/// reference-timezone calendar day.
pub struct ActivityHeatmap<'a> {
    counts: &'a [(NaiveDate, usize)],
    theme: &'a Theme,
}

impl<'a> ActivityHeatmap<'a> {
    const DAYS_PER_ROW: usize = 28;

    pub fn new(counts: &'a [(NaiveDate, usize)], theme: &'a Theme) -> Self {
        Self { counts, theme }
    }

    fn cell_style(&self, count: usize) -> Style {
        let color = match count {
            0 => self.theme.colors.bg_highlight,
            1..=2 => self.theme.colors.secondary,
            3..=4 => self.theme.colors.primary,
            _ => self.theme.colors.accent,
        };
        Style::default().fg(color)
    }
}

impl Widget for ActivityHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.text_dim))
            .title(" Activity (Last 12 Weeks) ")
            .title_style(self.theme.subtitle());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .counts
            .chunks(Self::DAYS_PER_ROW)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|(_, count)| Span::styled("▪ ", self.cell_style(*count)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
