//! Main application state and logic.

use std::time::Instant;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use super::widgets::{
    ActivityHeatmap, DailyGoalGauge, KeyHints, Logo, RatingButtons, StatsCards,
};
use crate::calendar::MS_PER_DAY;
use crate::catalog::{self, CatalogEntry};
use crate::config::Config;
use crate::models::{Difficulty, Problem, Rating, UserStats};
use crate::srs::Scheduler;
use crate::stats;
use crate::storage::Storage;

/// Trailing days shown in the activity heatmap (12 weeks).
const HEATMAP_DAYS: usize = 84;

/// Future reviews shown in the projected schedule.
const PROJECTION_STEPS: usize = 3;

/// History screen shows the most recent N review events.
const HISTORY_LIMIT: usize = 50;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Review,
    AddProblem,
    Browser,
    Roadmap,
    History,
    Stats,
}

/// Input buffer for the add/edit form.
#[derive(Debug, Default)]
pub struct ProblemForm {
    pub title: String,
    pub tags: String,
    pub link: String,
    pub notes: String,
    pub difficulty: Option<Difficulty>,
    pub focus: usize, // 0 title, 1 tags, 2 link, 3 notes, 4 difficulty
}

impl ProblemForm {
    const FIELDS: usize = 5;

    fn difficulty(&self) -> Difficulty {
        self.difficulty.unwrap_or(Difficulty::Medium)
    }

    fn from_problem(p: &Problem) -> Self {
        Self {
            title: p.title.clone(),
            tags: p.tags.join(", "),
            link: p.link.clone().unwrap_or_default(),
            notes: p.notes.clone().unwrap_or_default(),
            difficulty: Some(p.difficulty),
            focus: 0,
        }
    }

    fn parsed_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.title),
            1 => Some(&mut self.tags),
            2 => Some(&mut self.link),
            3 => Some(&mut self.notes),
            _ => None,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    // Storage and scheduler
    pub storage: Storage,
    pub scheduler: Scheduler,

    // In-memory collection
    pub problems: Vec<Problem>,
    pub stats: UserStats,

    // Dashboard state
    pub due_queue: Vec<usize>, // Indices into problems, capped by quota
    pub backlog: usize,        // Due problems beyond today's quota
    pub reviews_today: usize,
    pub dash_state: ListState,

    // Review state
    pub review_idx: Option<usize>,
    pub review_return: Screen,
    pub preview: [(Rating, u32); 4],

    // Add/edit form state
    pub form: ProblemForm,
    pub editing_id: Option<String>,

    // Browser state
    pub browser_rows: Vec<usize>,
    pub browser_state: ListState,
    pub search: String,
    pub search_active: bool,
    pub delete_pending: bool,

    // Roadmap state
    pub roadmap_pack: usize,
    pub roadmap_state: ListState,

    // Status message (shown temporarily)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(storage: Storage, config: Config) -> Self {
        let theme = Theme::from_name(&config.theme);
        let problems = storage.load_problems();
        let mut stats = storage.load_stats();

        // Login streak advances at most once per calendar day.
        stats::advance_streak(&mut stats, now_ms(), config.reference_offset());
        let _ = storage.save_stats(&stats);

        let mut app = Self {
            screen: Screen::Dashboard,
            running: true,
            config,
            theme,
            storage,
            scheduler: Scheduler::new(),
            problems,
            stats,
            due_queue: Vec::new(),
            backlog: 0,
            reviews_today: 0,
            dash_state: ListState::default().with_selected(Some(0)),
            review_idx: None,
            review_return: Screen::Dashboard,
            preview: [
                (Rating::Forgot, 0),
                (Rating::Hard, 0),
                (Rating::Medium, 0),
                (Rating::Easy, 0),
            ],
            form: ProblemForm::default(),
            editing_id: None,
            browser_rows: Vec::new(),
            browser_state: ListState::default(),
            search: String::new(),
            search_active: false,
            delete_pending: false,
            roadmap_pack: 0,
            roadmap_state: ListState::default().with_selected(Some(0)),
            status_message: None,
        };
        app.refresh_queues();
        app
    }

    /// Recompute today's review count, the capped due queue and the backlog.
    pub fn refresh_queues(&mut self) {
        let now = now_ms();
        let offset = self.config.reference_offset();

        self.reviews_today = stats::reviews_today(&self.problems, now, offset);
        let due = self.scheduler.due_order(&self.problems, now);
        let remaining = stats::remaining_quota(self.stats.daily_limit, self.reviews_today);

        self.backlog = due.len().saturating_sub(remaining);
        self.due_queue = due.into_iter().take(remaining).collect();

        let selected = self.dash_state.selected().unwrap_or(0);
        if self.due_queue.is_empty() {
            self.dash_state.select(None);
        } else {
            self.dash_state
                .select(Some(selected.min(self.due_queue.len() - 1)));
        }
    }

    /// Rebuild the browser rows: every problem sorted by due date, filtered
    /// by the search query over title and tags.
    pub fn refresh_browser(&mut self) {
        let mut rows: Vec<usize> = (0..self.problems.len())
            .filter(|&i| self.search.is_empty() || self.problems[i].matches_query(&self.search))
            .collect();
        rows.sort_by_key(|&i| self.problems[i].next_review);
        self.browser_rows = rows;

        if self.browser_rows.is_empty() {
            self.browser_state.select(None);
        } else {
            let selected = self.browser_state.selected().unwrap_or(0);
            self.browser_state
                .select(Some(selected.min(self.browser_rows.len() - 1)));
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save_problems(&self.problems) {
            self.set_status(format!("Save failed: {}", e));
        }
        if let Err(e) = self.storage.save_stats(&self.stats) {
            self.set_status(format!("Save failed: {}", e));
        }
    }

    pub fn cycle_theme(&mut self) {
        let new_theme_name = self.theme.name.next();
        self.theme = Theme::new(new_theme_name);
        self.config.theme = new_theme_name.as_str().to_string();
        let _ = self.config.save();
        self.set_status(format!("Theme: {}", new_theme_name.display_name()));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    // ══════════════════════════════════════════════════════════════════════
    // Review flow
    // ══════════════════════════════════════════════════════════════════════

    pub fn start_review(&mut self, problem_idx: usize, return_to: Screen) {
        self.preview = self.scheduler.preview(self.problems[problem_idx].level);
        self.review_idx = Some(problem_idx);
        self.review_return = return_to;
        self.screen = Screen::Review;
    }

    pub fn rate_current(&mut self, rating: Rating) {
        let Some(idx) = self.review_idx.take() else {
            return;
        };

        self.scheduler.review(&mut self.problems[idx], rating, now_ms());
        stats::record_review(&mut self.stats);
        self.persist();
        self.refresh_queues();

        // Keep the session rolling while quota and backlog allow.
        if self.review_return == Screen::Dashboard {
            if let Some(&next) = self.due_queue.first() {
                self.start_review(next, Screen::Dashboard);
                return;
            }
            if self.backlog > 0 {
                self.set_status(format!(
                    "Daily goal reached! {} more in the backlog.",
                    self.backlog
                ));
            }
        }
        self.screen = self.review_return;
        if self.review_return == Screen::Browser {
            self.refresh_browser();
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Add / edit / delete
    // ══════════════════════════════════════════════════════════════════════

    pub fn open_add_form(&mut self) {
        self.form = ProblemForm::default();
        self.editing_id = None;
        self.screen = Screen::AddProblem;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(&idx) = self
            .browser_state
            .selected()
            .and_then(|i| self.browser_rows.get(i))
        {
            self.form = ProblemForm::from_problem(&self.problems[idx]);
            self.editing_id = Some(self.problems[idx].id.clone());
            self.screen = Screen::AddProblem;
        }
    }

    pub fn submit_form(&mut self) {
        let title = self.form.title.trim().to_string();
        if title.is_empty() {
            self.set_status("Title is required".to_string());
            return;
        }

        let tags = self.form.parsed_tags();
        let link = Some(self.form.link.trim().to_string()).filter(|s| !s.is_empty());
        let notes = Some(self.form.notes.trim().to_string()).filter(|s| !s.is_empty());

        if let Some(ref id) = self.editing_id {
            if let Some(p) = self.problems.iter_mut().find(|p| &p.id == id) {
                p.title = title;
                p.difficulty = self.form.difficulty();
                p.tags = tags;
                p.link = link;
                p.notes = notes;
            }
            self.editing_id = None;
            self.set_status("Problem updated".to_string());
            self.screen = Screen::Browser;
        } else {
            let problem = Problem::new(
                title,
                self.form.difficulty(),
                tags,
                link,
                notes,
                now_ms(),
                self.scheduler.intervals(),
            );
            self.problems.push(problem);
            stats::record_added(&mut self.stats);
            self.set_status(format!("Logged! +{} XP", stats::XP_ADD_PROBLEM));
            self.screen = Screen::Dashboard;
        }

        self.persist();
        self.refresh_queues();
        self.refresh_browser();
    }

    pub fn delete_selected_problem(&mut self) {
        if let Some(&idx) = self
            .browser_state
            .selected()
            .and_then(|i| self.browser_rows.get(i))
        {
            let removed = self.problems.remove(idx);
            self.set_status(format!("Deleted '{}'", removed.title));
            self.persist();
            self.refresh_queues();
            self.refresh_browser();
        }
        self.delete_pending = false;
    }

    // ══════════════════════════════════════════════════════════════════════
    // Roadmap import
    // ══════════════════════════════════════════════════════════════════════

    fn roadmap_entries(&self) -> &'static [CatalogEntry] {
        catalog::packs()[self.roadmap_pack].1
    }

    fn is_tracked(&self, title: &str) -> bool {
        self.problems.iter().any(|p| p.title == title)
    }

    pub fn add_roadmap_selection(&mut self) {
        let Some(i) = self.roadmap_state.selected() else {
            return;
        };
        let entries = self.roadmap_entries();
        let Some(entry) = entries.get(i) else {
            return;
        };

        if self.is_tracked(entry.title) {
            self.set_status(format!("'{}' is already tracked", entry.title));
            return;
        }

        let problem = Problem::new(
            entry.title.to_string(),
            entry.difficulty,
            vec![entry.category.to_string()],
            Some(entry.link.to_string()),
            None,
            now_ms(),
            self.scheduler.intervals(),
        );
        let title = problem.title.clone();
        self.problems.push(problem);
        stats::record_added(&mut self.stats);
        self.persist();
        self.refresh_queues();
        self.set_status(format!("Added '{}' to the rotation", title));
    }

    pub fn export_backup(&mut self) {
        let path = Storage::default_backup_path();
        match self.storage.export_backup(&path) {
            Ok(count) => {
                self.set_status(format!("Exported {} problems to {}", count, path.display()));
            }
            Err(e) => {
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.screen {
                    Screen::Dashboard => self.handle_dashboard_keys(key.code),
                    Screen::Review => self.handle_review_keys(key.code),
                    Screen::AddProblem => self.handle_form_keys(key.code),
                    Screen::Browser => self.handle_browser_keys(key.code),
                    Screen::Roadmap => self.handle_roadmap_keys(key.code),
                    Screen::History => self.handle_history_keys(key.code),
                    Screen::Stats => self.handle_stats_keys(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_dashboard_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.due_queue.is_empty() {
                    let i = self.dash_state.selected().unwrap_or(0);
                    let new_i = if i == 0 { self.due_queue.len() - 1 } else { i - 1 };
                    self.dash_state.select(Some(new_i));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.due_queue.is_empty() {
                    let i = self.dash_state.selected().unwrap_or(0);
                    let new_i = if i >= self.due_queue.len() - 1 { 0 } else { i + 1 };
                    self.dash_state.select(Some(new_i));
                }
            }
            KeyCode::Enter => {
                if let Some(&idx) = self
                    .dash_state
                    .selected()
                    .and_then(|i| self.due_queue.get(i))
                {
                    self.start_review(idx, Screen::Dashboard);
                }
            }
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('b') => {
                self.search.clear();
                self.search_active = false;
                self.refresh_browser();
                self.screen = Screen::Browser;
            }
            KeyCode::Char('r') => {
                self.roadmap_state = ListState::default().with_selected(Some(0));
                self.screen = Screen::Roadmap;
            }
            KeyCode::Char('h') => self.screen = Screen::History,
            KeyCode::Char('s') => self.screen = Screen::Stats,
            KeyCode::Char('x') => self.export_backup(),
            _ => {}
        }
    }

    fn handle_review_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.review_idx = None;
                self.screen = self.review_return;
            }
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char(c) => {
                if let Some(rating) = Rating::from_key(c) {
                    self.rate_current(rating);
                }
            }
            _ => {}
        }
    }

    fn handle_form_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = if self.editing_id.take().is_some() {
                    Screen::Browser
                } else {
                    Screen::Dashboard
                };
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus = (self.form.focus + 1) % ProblemForm::FIELDS;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus =
                    (self.form.focus + ProblemForm::FIELDS - 1) % ProblemForm::FIELDS;
            }
            KeyCode::Left | KeyCode::Right if self.form.focus == 4 => {
                self.form.difficulty = Some(self.form.difficulty().next());
            }
            KeyCode::Enter => {
                if self.form.focus == ProblemForm::FIELDS - 1 {
                    self.submit_form();
                } else {
                    self.form.focus += 1;
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.form.field_mut() {
                    field.push(c);
                } else if c == ' ' {
                    self.form.difficulty = Some(self.form.difficulty().next());
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.form.field_mut() {
                    field.pop();
                }
            }
            _ => {}
        }
    }

    fn handle_browser_keys(&mut self, key: KeyCode) {
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.search.clear();
                    self.search_active = false;
                    self.refresh_browser();
                }
                KeyCode::Enter => self.search_active = false,
                KeyCode::Char(c) => {
                    self.search.push(c);
                    self.refresh_browser();
                }
                KeyCode::Backspace => {
                    self.search.pop();
                    self.refresh_browser();
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Dashboard;
                self.refresh_queues();
            }
            KeyCode::Char('/') => {
                self.delete_pending = false;
                self.search_active = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.delete_pending = false;
                if !self.browser_rows.is_empty() {
                    let i = self.browser_state.selected().unwrap_or(0);
                    let new_i = if i == 0 { self.browser_rows.len() - 1 } else { i - 1 };
                    self.browser_state.select(Some(new_i));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.delete_pending = false;
                if !self.browser_rows.is_empty() {
                    let i = self.browser_state.selected().unwrap_or(0);
                    let new_i = if i >= self.browser_rows.len() - 1 { 0 } else { i + 1 };
                    self.browser_state.select(Some(new_i));
                }
            }
            KeyCode::Enter => {
                if let Some(&idx) = self
                    .browser_state
                    .selected()
                    .and_then(|i| self.browser_rows.get(i))
                {
                    self.start_review(idx, Screen::Browser);
                }
            }
            KeyCode::Char('e') => {
                self.delete_pending = false;
                self.open_edit_form();
            }
            KeyCode::Char('d') => {
                if self.delete_pending {
                    self.delete_selected_problem();
                } else {
                    self.delete_pending = true;
                }
            }
            KeyCode::Char('a') => {
                self.delete_pending = false;
                self.open_add_form();
            }
            KeyCode::Char('t') => {
                self.delete_pending = false;
                self.cycle_theme();
            }
            _ => {
                self.delete_pending = false;
            }
        }
    }

    fn handle_roadmap_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Dashboard;
                self.refresh_queues();
            }
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.roadmap_pack = (self.roadmap_pack + 1) % catalog::packs().len();
                self.roadmap_state = ListState::default().with_selected(Some(0));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.roadmap_entries().len();
                let i = self.roadmap_state.selected().unwrap_or(0);
                let new_i = if i == 0 { len - 1 } else { i - 1 };
                self.roadmap_state.select(Some(new_i));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.roadmap_entries().len();
                let i = self.roadmap_state.selected().unwrap_or(0);
                let new_i = if i >= len - 1 { 0 } else { i + 1 };
                self.roadmap_state.select(Some(new_i));
            }
            KeyCode::Enter => self.add_roadmap_selection(),
            _ => {}
        }
    }

    fn handle_history_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Dashboard,
            _ => {}
        }
    }

    fn handle_stats_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Dashboard,
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        match self.screen {
            Screen::Dashboard => self.render_dashboard(frame, area),
            Screen::Review => self.render_review(frame, area),
            Screen::AddProblem => self.render_form(frame, area),
            Screen::Browser => self.render_browser(frame, area),
            Screen::Roadmap => self.render_roadmap(frame, area),
            Screen::History => self.render_history(frame, area),
            Screen::Stats => self.render_stats(frame, area),
        }
    }

    fn due_in_label(&self, next_review: i64) -> String {
        let now = now_ms();
        let days = (next_review - now + MS_PER_DAY - 1).div_euclid(MS_PER_DAY);
        if next_review <= now {
            let overdue = (now - next_review) / MS_PER_DAY;
            if overdue == 0 {
                "due today".to_string()
            } else {
                format!("overdue {}d", overdue)
            }
        } else if days == 1 {
            "tomorrow".to_string()
        } else {
            format!("in {}d", days)
        }
    }

    fn format_day(&self, ts_ms: i64) -> String {
        crate::calendar::date_at(ts_ms, self.config.reference_offset())
            .format("%b %d")
            .to_string()
    }

    fn problem_line(&self, p: &Problem) -> Line<'static> {
        let due_color = if p.is_due(now_ms()) {
            self.theme.colors.error
        } else {
            self.theme.colors.text_dim
        };
        let mut spans = vec![
            Span::styled(
                p.title.clone(),
                Style::default()
                    .fg(self.theme.colors.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                p.difficulty.name().to_string(),
                Style::default().fg(p.difficulty.color_for_theme(&self.theme)),
            ),
            Span::styled(
                format!("  lvl {}", p.level),
                Style::default().fg(self.theme.colors.text_muted),
            ),
            Span::styled(
                format!("  {}", self.due_in_label(p.next_review)),
                Style::default().fg(due_color),
            ),
        ];
        if !p.tags.is_empty() {
            spans.push(Span::styled(
                format!("  [{}]", p.tags.join(", ")),
                Style::default().fg(self.theme.colors.text_dim),
            ));
        }
        Line::from(spans)
    }

    fn render_status(&self, frame: &mut Frame, above: Rect) {
        if let Some((ref msg, time)) = self.status_message {
            if time.elapsed().as_secs() < 5 {
                let status = Paragraph::new(msg.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(self.theme.colors.success));
                let status_area = Rect {
                    x: above.x,
                    y: above.y.saturating_sub(1),
                    width: above.width,
                    height: 1,
                };
                frame.render_widget(status, status_area);
            }
        }
    }

    fn render_dashboard(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1),  // Top padding
            Constraint::Length(9),  // Logo
            Constraint::Length(5),  // Stats cards
            Constraint::Length(3),  // Daily goal gauge
            Constraint::Min(5),     // Due list
            Constraint::Length(3),  // Help
        ])
        .split(area);

        frame.render_widget(Logo::new(&self.theme), chunks[1]);

        let cards_area = centered_rect(90, 100, chunks[2]);
        frame.render_widget(StatsCards::new(&self.stats, &self.theme), cards_area);

        let gauge_area = centered_rect(60, 100, chunks[3]);
        frame.render_widget(
            DailyGoalGauge::new(self.reviews_today, self.stats.daily_limit, &self.theme),
            gauge_area,
        );

        let list_area = centered_rect(70, 100, chunks[4]);

        if self.due_queue.is_empty() {
            let text = if self.backlog > 0 {
                format!(
                    "You're done for today!\n\n{} more problems wait in the backlog.\nCome back tomorrow.",
                    self.backlog
                )
            } else if self.problems.is_empty() {
                "Nothing here yet.\n\nPress 'a' to log your first problem\nor 'r' to pick from a roadmap.".to_string()
            } else {
                "Nothing due right now.".to_string()
            };
            let empty = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.colors.text_muted))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(self.theme.colors.text_dim))
                        .title(" Due Today ")
                        .title_style(self.theme.subtitle()),
                );
            frame.render_widget(empty, list_area);
        } else {
            let items: Vec<ListItem> = self
                .due_queue
                .iter()
                .map(|&idx| ListItem::new(self.problem_line(&self.problems[idx])))
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(self.theme.colors.primary))
                        .title(format!(" Due Today ({}) ", self.due_queue.len()))
                        .title_style(self.theme.highlight()),
                )
                .highlight_style(self.theme.selected())
                .highlight_symbol("> ");

            frame.render_stateful_widget(list, list_area, &mut self.dash_state);
        }

        let hints = KeyHints::new(
            &[
                ("j/k", "nav"),
                ("Enter", "review"),
                ("a", "add"),
                ("b", "browse"),
                ("r", "roadmap"),
                ("h", "history"),
                ("s", "stats"),
                ("x", "export"),
                ("t", "theme"),
                ("q", "quit"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[5]);

        self.render_status(frame, chunks[5]);
    }

    fn render_review(&mut self, frame: &mut Frame, area: Rect) {
        let Some(idx) = self.review_idx else {
            return;
        };
        let p = &self.problems[idx];

        let chunks = Layout::vertical([
            Constraint::Length(3),  // Header
            Constraint::Length(1),  // Spacing
            Constraint::Min(8),     // Problem card
            Constraint::Length(4),  // Projected schedule
            Constraint::Length(5),  // Rating buttons
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(p.title.clone(), self.theme.title()),
            Span::raw("  "),
            Span::styled(
                p.difficulty.name(),
                Style::default()
                    .fg(p.difficulty.color_for_theme(&self.theme))
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        // Problem details
        let card_area = centered_rect(80, 100, chunks[2]);
        let mut detail_lines = vec![
            Line::from(vec![
                Span::styled("Level: ", self.theme.subtitle()),
                Span::styled(
                    format!("{}", p.level),
                    Style::default().fg(self.theme.colors.primary),
                ),
                Span::styled(
                    format!("   Reviews: {}", p.total_reviews()),
                    self.theme.subtitle(),
                ),
                Span::styled(
                    format!("   Last: {}", self.format_day(p.last_reviewed)),
                    self.theme.subtitle(),
                ),
            ]),
            Line::from(""),
        ];
        if !p.tags.is_empty() {
            detail_lines.push(Line::from(vec![
                Span::styled("Tags: ", self.theme.subtitle()),
                Span::styled(
                    p.tags.join(", "),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]));
        }
        if let Some(ref link) = p.link {
            detail_lines.push(Line::from(vec![
                Span::styled("Link: ", self.theme.subtitle()),
                Span::styled(link.clone(), Style::default().fg(self.theme.colors.info)),
            ]));
        }
        if let Some(ref notes) = p.notes {
            detail_lines.push(Line::from(""));
            detail_lines.push(Line::from(Span::styled(
                notes.clone(),
                Style::default().fg(self.theme.colors.text),
            )));
        }

        let card = Paragraph::new(detail_lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.accent))
                    .title(" How well did you recall it? ")
                    .title_alignment(Alignment::Center)
                    .title_style(Style::default().fg(self.theme.colors.accent)),
            );
        frame.render_widget(card, card_area);

        // Projected schedule, assuming medium recall from here on.
        let projected = self.scheduler.project(p, PROJECTION_STEPS);
        let base = p.total_reviews() + 1;
        let mut spans = vec![
            Span::styled(
                format!("R{}", base),
                Style::default()
                    .fg(self.theme.colors.info)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ({})", self.format_day(p.next_review), self.due_in_label(p.next_review)),
                Style::default().fg(self.theme.colors.info),
            ),
        ];
        for (i, ts) in projected.iter().enumerate() {
            spans.push(Span::styled("  ·  ", self.theme.key_hint()));
            spans.push(Span::styled(
                format!("R{} {} est.", base + i + 1, self.format_day(*ts)),
                Style::default().fg(self.theme.colors.text_dim),
            ));
        }
        let schedule = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(self.theme.colors.text_dim))
                    .title(" Review Schedule ")
                    .title_style(self.theme.subtitle()),
            );
        frame.render_widget(schedule, centered_rect(80, 100, chunks[3]));

        let buttons_area = centered_rect(90, 100, chunks[4]);
        frame.render_widget(RatingButtons::new(&self.preview, &self.theme), buttons_area);

        let hints = KeyHints::new(
            &[
                ("1", "Forgot"),
                ("2", "Hard"),
                ("3", "Medium"),
                ("4", "Easy"),
                ("Esc", "back"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[5]);
    }

    fn render_form(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Title input
            Constraint::Length(3), // Tags input
            Constraint::Length(3), // Link input
            Constraint::Length(3), // Notes input
            Constraint::Length(3), // Difficulty selector
            Constraint::Min(1),    // Spacer
            Constraint::Length(2), // Hints
        ])
        .split(centered_rect(60, 100, area));

        let heading = if self.editing_id.is_some() {
            "Edit Problem"
        } else {
            "Log a Solved Problem"
        };
        let title = Paragraph::new(heading)
            .alignment(Alignment::Center)
            .style(self.theme.title());
        frame.render_widget(title, chunks[0]);

        let fields = [
            (" Title ", &self.form.title, 0usize),
            (" Tags (comma separated) ", &self.form.tags, 1),
            (" Link ", &self.form.link, 2),
            (" Notes ", &self.form.notes, 3),
        ];
        for (label, value, focus) in fields {
            let style = if self.form.focus == focus {
                Style::default().fg(self.theme.colors.accent)
            } else {
                Style::default().fg(self.theme.colors.text_muted)
            };
            let input = Paragraph::new(value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .title(label)
                    .title_style(style),
            );
            let field_area = chunks[1 + focus];
            frame.render_widget(input, field_area);

            if self.form.focus == focus {
                let cursor_x = field_area.x + 1 + value.chars().count() as u16;
                frame.set_cursor_position((cursor_x.min(field_area.right() - 2), field_area.y + 1));
            }
        }

        // Difficulty selector
        let diff_style = if self.form.focus == 4 {
            Style::default().fg(self.theme.colors.accent)
        } else {
            Style::default().fg(self.theme.colors.text_muted)
        };
        let current = self.form.difficulty();
        let diff_spans: Vec<Span> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .iter()
            .flat_map(|d| {
                let style = if *d == current {
                    Style::default()
                        .fg(d.color_for_theme(&self.theme))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.colors.text_dim)
                };
                vec![Span::styled(d.name(), style), Span::raw("   ")]
            })
            .collect();
        let difficulty = Paragraph::new(Line::from(diff_spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(diff_style)
                    .title(" Difficulty (←/→) ")
                    .title_style(diff_style),
            );
        frame.render_widget(difficulty, chunks[5]);

        let hints = KeyHints::new(
            &[
                ("Tab", "next field"),
                ("Enter", "save"),
                ("Esc", "cancel"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[7]);

        self.render_status(frame, chunks[7]);
    }

    fn render_browser(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header / search
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Hints
        ])
        .split(area);

        let header = if self.search_active || !self.search.is_empty() {
            Paragraph::new(Line::from(vec![
                Span::styled("Search: ", self.theme.subtitle()),
                Span::styled(
                    self.search.clone(),
                    Style::default().fg(self.theme.colors.text),
                ),
                Span::styled(
                    if self.search_active { "▌" } else { "" },
                    Style::default().fg(self.theme.colors.accent),
                ),
            ]))
            .alignment(Alignment::Center)
        } else {
            Paragraph::new(format!("All Problems ({})", self.problems.len()))
                .alignment(Alignment::Center)
                .style(self.theme.title())
        };
        frame.render_widget(header, chunks[0]);

        let main_chunks = Layout::horizontal([
            Constraint::Percentage(45), // Problem list
            Constraint::Percentage(55), // Details
        ])
        .split(chunks[1]);

        let items: Vec<ListItem> = self
            .browser_rows
            .iter()
            .map(|&idx| ListItem::new(self.problem_line(&self.problems[idx])))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.primary))
                    .title(" Problems ")
                    .title_style(self.theme.highlight()),
            )
            .highlight_style(self.theme.selected())
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, main_chunks[0], &mut self.browser_state);

        if let Some(&idx) = self
            .browser_state
            .selected()
            .and_then(|i| self.browser_rows.get(i))
        {
            self.render_problem_details(frame, main_chunks[1], idx);
        }

        let hints = if self.search_active {
            KeyHints::new(&[("Enter", "done"), ("Esc", "clear")], &self.theme)
        } else if self.delete_pending {
            KeyHints::new(&[("d", "confirm delete"), ("any", "cancel")], &self.theme)
        } else {
            KeyHints::new(
                &[
                    ("j/k", "nav"),
                    ("Enter", "review"),
                    ("/", "search"),
                    ("e", "edit"),
                    ("d", "delete"),
                    ("a", "add"),
                    ("Esc", "back"),
                ],
                &self.theme,
            )
        };
        frame.render_widget(hints, chunks[2]);

        self.render_status(frame, chunks[2]);
    }

    fn render_problem_details(&self, frame: &mut Frame, area: Rect, idx: usize) {
        let p = &self.problems[idx];

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Difficulty: ", self.theme.subtitle()),
                Span::styled(
                    p.difficulty.name(),
                    Style::default().fg(p.difficulty.color_for_theme(&self.theme)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Level: ", self.theme.subtitle()),
                Span::styled(
                    format!("{}", p.level),
                    Style::default().fg(self.theme.colors.primary),
                ),
            ]),
            Line::from(vec![
                Span::styled("Next review: ", self.theme.subtitle()),
                Span::styled(
                    format!(
                        "{} ({})",
                        self.format_day(p.next_review),
                        self.due_in_label(p.next_review)
                    ),
                    Style::default().fg(self.theme.colors.info),
                ),
            ]),
            Line::from(vec![
                Span::styled("Added: ", self.theme.subtitle()),
                Span::styled(
                    self.format_day(p.created_at),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]),
            Line::from(vec![
                Span::styled("Reviews: ", self.theme.subtitle()),
                Span::styled(
                    p.total_reviews().to_string(),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]),
        ];

        if let Some(ref link) = p.link {
            lines.push(Line::from(vec![
                Span::styled("Link: ", self.theme.subtitle()),
                Span::styled(link.clone(), Style::default().fg(self.theme.colors.info)),
            ]));
        }
        if let Some(ref notes) = p.notes {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notes.clone(),
                Style::default().fg(self.theme.colors.text),
            )));
        }

        // Recent ratings, newest last.
        if p.total_reviews() > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Recent ratings:",
                self.theme.subtitle(),
            )));
            for log in p.history.iter().skip(1).rev().take(5) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} ", self.format_day(log.date)),
                        Style::default().fg(self.theme.colors.text_dim),
                    ),
                    Span::styled(
                        log.rating.name(),
                        Style::default().fg(log.rating.color_for_theme(&self.theme)),
                    ),
                ]));
            }
        }

        let details = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.text_dim))
                .title(format!(" {} ", p.title))
                .title_style(self.theme.title()),
        );
        frame.render_widget(details, area);
    }

    fn render_roadmap(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // List
            Constraint::Length(2), // Hints
        ])
        .split(area);

        let tab_spans: Vec<Span> = catalog::packs()
            .iter()
            .enumerate()
            .flat_map(|(i, (name, _))| {
                let style = if i == self.roadmap_pack {
                    self.theme.highlight()
                } else {
                    self.theme.subtitle()
                };
                vec![Span::styled(name.to_string(), style), Span::raw("    ")]
            })
            .collect();
        let tabs = Paragraph::new(Line::from(tab_spans)).alignment(Alignment::Center);
        frame.render_widget(tabs, chunks[0]);

        let entries = self.roadmap_entries();
        let items: Vec<ListItem> = entries
            .iter()
            .map(|e| {
                let tracked = self.is_tracked(e.title);
                let marker = if tracked { "✓ " } else { "  " };
                let title_style = if tracked {
                    Style::default().fg(self.theme.colors.text_dim)
                } else {
                    Style::default().fg(self.theme.colors.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(self.theme.colors.success)),
                    Span::styled(e.title, title_style),
                    Span::styled(
                        format!("  {}", e.difficulty.name()),
                        Style::default().fg(e.difficulty.color_for_theme(&self.theme)),
                    ),
                    Span::styled(
                        format!("  · {}", e.category),
                        Style::default().fg(self.theme.colors.text_dim),
                    ),
                ]))
            })
            .collect();

        let list_area = centered_rect(80, 100, chunks[1]);
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.primary))
                    .title(" Pick problems you have already solved ")
                    .title_style(self.theme.highlight()),
            )
            .highlight_style(self.theme.selected())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, list_area, &mut self.roadmap_state);

        let hints = KeyHints::new(
            &[
                ("j/k", "nav"),
                ("Tab", "switch list"),
                ("Enter", "add"),
                ("Esc", "back"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[2]);

        self.render_status(frame, chunks[2]);
    }

    fn render_history(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Log
            Constraint::Length(2), // Hints
        ])
        .split(area);

        let title = Paragraph::new("Recent Activity")
            .alignment(Alignment::Center)
            .style(self.theme.title());
        frame.render_widget(title, chunks[0]);

        // Flatten every history entry, newest first.
        let mut logs: Vec<(i64, String, Rating)> = self
            .problems
            .iter()
            .flat_map(|p| {
                p.history.iter().map(|log| {
                    let title = log
                        .problem_title
                        .clone()
                        .unwrap_or_else(|| p.title.clone());
                    (log.date, title, log.rating)
                })
            })
            .collect();
        logs.sort_by(|a, b| b.0.cmp(&a.0));
        logs.truncate(HISTORY_LIMIT);

        let lines: Vec<Line> = if logs.is_empty() {
            vec![Line::from(Span::styled(
                "No activity recorded yet.",
                self.theme.subtitle(),
            ))]
        } else {
            logs.iter()
                .map(|(date, title, rating)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{}  ", self.format_day(*date)),
                            Style::default().fg(self.theme.colors.text_dim),
                        ),
                        Span::styled(
                            format!("{:<10}", rating.name()),
                            Style::default().fg(rating.color_for_theme(&self.theme)),
                        ),
                        Span::styled(title.clone(), Style::default().fg(self.theme.colors.text)),
                    ])
                })
                .collect()
        };

        let log_area = centered_rect(70, 100, chunks[1]);
        let log = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.text_dim))
                .title(format!(" Last {} events ", HISTORY_LIMIT))
                .title_style(self.theme.subtitle()),
        );
        frame.render_widget(log, log_area);

        let hints = KeyHints::new(&[("Esc", "back")], &self.theme);
        frame.render_widget(hints, chunks[2]);
    }

    fn render_stats(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Stats cards
            Constraint::Length(7), // Heatmap
            Constraint::Min(8),    // Achievements
            Constraint::Length(2), // Hints
        ])
        .split(area);

        let title = Paragraph::new("Progress")
            .alignment(Alignment::Center)
            .style(self.theme.title());
        frame.render_widget(title, chunks[0]);

        let cards_area = centered_rect(90, 100, chunks[1]);
        frame.render_widget(StatsCards::new(&self.stats, &self.theme), cards_area);

        let counts = stats::activity_counts(
            &self.problems,
            now_ms(),
            self.config.reference_offset(),
            HEATMAP_DAYS,
        );
        let heatmap_area = centered_rect(70, 100, chunks[2]);
        frame.render_widget(ActivityHeatmap::new(&counts, &self.theme), heatmap_area);

        // Achievements
        let lines: Vec<Line> = stats::achievements()
            .iter()
            .map(|a| {
                let earned = (a.earned)(&self.stats);
                let (marker, style) = if earned {
                    ("★ ", Style::default().fg(self.theme.colors.warning))
                } else {
                    ("☆ ", Style::default().fg(self.theme.colors.text_dim))
                };
                Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(
                        format!("{:<14}", a.title),
                        if earned {
                            Style::default()
                                .fg(self.theme.colors.text)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(self.theme.colors.text_dim)
                        },
                    ),
                    Span::styled(a.description, self.theme.subtitle()),
                ])
            })
            .collect();

        let achievements_area = centered_rect(70, 100, chunks[3]);
        let achievements = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.accent))
                .title(" Achievements ")
                .title_style(Style::default().fg(self.theme.colors.accent)),
        );
        frame.render_widget(achievements, achievements_area);

        let hints = KeyHints::new(&[("t", "theme"), ("Esc", "back")], &self.theme);
        frame.render_widget(hints, chunks[4]);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewLog;
    use tempfile::TempDir;

    fn seeded_app(problems: &[Problem]) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().to_path_buf()).unwrap();
        storage.save_problems(problems).unwrap();
        let app = App::new(storage, Config::default());
        (dir, app)
    }

    fn overdue_problem(title: &str, now: i64) -> Problem {
        // Created ten days ago, so the creation entry is off today's quota
        // and the first review is long overdue.
        Problem::new(
            title.to_string(),
            Difficulty::Easy,
            vec![],
            None,
            None,
            now - 10 * MS_PER_DAY,
            &crate::srs::DEFAULT_INTERVALS,
        )
    }

    #[test]
    fn due_queue_surfaces_exactly_the_remaining_quota() {
        let now = now_ms();
        let problems: Vec<Problem> = (0..5)
            .map(|i| overdue_problem(&format!("p{i}"), now))
            .collect();

        // Five due, default limit 2: exactly two surface, three wait.
        let (_dir, mut app) = seeded_app(&problems);
        assert_eq!(app.due_queue.len(), 2);
        assert_eq!(app.backlog, 3);

        // Two reviews already logged today exhaust the quota.
        for idx in 0..2 {
            app.problems[idx].history.push(ReviewLog {
                date: now,
                rating: Rating::Medium,
                problem_title: None,
            });
        }
        app.refresh_queues();
        assert_eq!(app.reviews_today, 2);
        assert!(app.due_queue.is_empty());
        assert_eq!(app.backlog, 5);
    }

    #[test]
    fn form_parses_and_trims_tags() {
        let form = ProblemForm {
            tags: "Array,  Hash Table , ,Graph".to_string(),
            ..Default::default()
        };
        assert_eq!(form.parsed_tags(), vec!["Array", "Hash Table", "Graph"]);
    }

    #[test]
    fn form_prefills_from_problem() {
        let p = Problem::new(
            "3Sum".into(),
            Difficulty::Medium,
            vec!["Two Pointers".into()],
            Some("https://leetcode.com/problems/3sum/".into()),
            None,
            0,
            &crate::srs::DEFAULT_INTERVALS,
        );
        let form = ProblemForm::from_problem(&p);
        assert_eq!(form.title, "3Sum");
        assert_eq!(form.tags, "Two Pointers");
        assert_eq!(form.difficulty, Some(Difficulty::Medium));
        assert!(form.notes.is_empty());
    }
}
