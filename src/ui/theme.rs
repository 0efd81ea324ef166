//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Background Colors
    pub bg_dark: Color,
    pub bg_highlight: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,

    // Rating Colors
    pub rating_forgot: Color,
    pub rating_hard: Color,
    pub rating_medium: Color,
    pub rating_easy: Color,

    // Difficulty Colors
    pub difficulty_easy: Color,
    pub difficulty_medium: Color,
    pub difficulty_hard: Color,
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Default,
    KanagawaWave,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::KanagawaWave => "kanagawa-wave",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Default => "Default",
            ThemeName::KanagawaWave => "Kanagawa Wave",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "kanagawa-wave" | "kanagawa_wave" | "kanagawa" => ThemeName::KanagawaWave,
            _ => ThemeName::Default,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Default => ThemeName::KanagawaWave,
            ThemeName::KanagawaWave => ThemeName::Default,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Default => Self::default_colors(),
            ThemeName::KanagawaWave => Self::kanagawa_wave_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::from_str(name))
    }

    fn default_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(168, 85, 247),      // Purple
            secondary: Color::Rgb(139, 92, 246),    // Violet
            accent: Color::Rgb(236, 72, 153),       // Pink

            // Semantic Colors
            success: Color::Rgb(16, 185, 129),      // Emerald
            warning: Color::Rgb(250, 204, 21),      // Yellow
            error: Color::Rgb(239, 68, 68),         // Red
            info: Color::Rgb(59, 130, 246),         // Blue

            // Background Colors
            bg_dark: Color::Rgb(9, 9, 11),          // Zinc 950
            bg_highlight: Color::Rgb(63, 63, 70),   // Zinc 700

            // Text Colors
            text: Color::Rgb(244, 244, 245),        // Zinc 100
            text_muted: Color::Rgb(161, 161, 170),  // Zinc 400
            text_dim: Color::Rgb(113, 113, 122),    // Zinc 500

            // Rating Colors
            rating_forgot: Color::Rgb(113, 113, 122), // Zinc
            rating_hard: Color::Rgb(244, 63, 94),     // Rose
            rating_medium: Color::Rgb(245, 158, 11),  // Amber
            rating_easy: Color::Rgb(16, 185, 129),    // Emerald

            // Difficulty Colors
            difficulty_easy: Color::Rgb(45, 212, 191),   // Teal
            difficulty_medium: Color::Rgb(251, 191, 36), // Amber
            difficulty_hard: Color::Rgb(251, 113, 133),  // Rose
        }
    }

    /// Kanagawa Wave theme - inspired by the famous painting and kanagawa.nvim
    fn kanagawa_wave_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors - using Kanagawa palette
            primary: Color::Rgb(0x7E, 0x9C, 0xD8),   // crystalBlue
            secondary: Color::Rgb(0x95, 0x7F, 0xB8), // oniViolet
            accent: Color::Rgb(0xD2, 0x7E, 0x99),    // sakuraPink

            // Semantic Colors
            success: Color::Rgb(0x98, 0xBB, 0x6C),   // springGreen
            warning: Color::Rgb(0xFF, 0x9E, 0x3B),   // roninYellow
            error: Color::Rgb(0xE8, 0x24, 0x24),     // samuraiRed
            info: Color::Rgb(0x7F, 0xB4, 0xCA),      // springBlue

            // Background Colors
            bg_dark: Color::Rgb(0x16, 0x16, 0x1D),      // sumiInk0
            bg_highlight: Color::Rgb(0x36, 0x36, 0x46), // sumiInk3

            // Text Colors
            text: Color::Rgb(0xDC, 0xD7, 0xBA),      // fujiWhite
            text_muted: Color::Rgb(0xC8, 0xC0, 0x93), // oldWhite
            text_dim: Color::Rgb(0x54, 0x54, 0x6D),   // sumiInk4

            // Rating Colors
            rating_forgot: Color::Rgb(0x54, 0x54, 0x6D), // sumiInk4
            rating_hard: Color::Rgb(0xE8, 0x24, 0x24),   // samuraiRed
            rating_medium: Color::Rgb(0xFF, 0x9E, 0x3B), // roninYellow
            rating_easy: Color::Rgb(0x98, 0xBB, 0x6C),   // springGreen

            // Difficulty Colors
            difficulty_easy: Color::Rgb(0x7A, 0xA8, 0x9F),   // waveAqua2
            difficulty_medium: Color::Rgb(0xE6, 0xC3, 0x84), // carpYellow
            difficulty_hard: Color::Rgb(0xD2, 0x7E, 0x99),   // sakuraPink
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default().fg(self.colors.text_muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.colors.bg_highlight)
            .fg(self.colors.text)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Default)
    }
}
