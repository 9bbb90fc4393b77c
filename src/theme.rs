use crate::color_mode::smart_color;
use crate::settings;
use log::{debug, warn};
use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};
use std::sync::atomic::{AtomicUsize, Ordering};

// Color palette structure
#[allow(dead_code)]
#[derive(Clone)]
pub struct Base16Palette {
    pub base_00: Color, // Background
    pub base_01: Color, // Lighter background
    pub base_02: Color, // Selection background
    pub base_03: Color, // Comments, invisibles
    pub base_04: Color, // Dark foreground
    pub base_05: Color, // Default foreground
    pub base_06: Color, // Light foreground
    pub base_07: Color, // Light background
    pub base_08: Color, // Red
    pub base_09: Color, // Orange
    pub base_0a: Color, // Yellow
    pub base_0b: Color, // Green
    pub base_0c: Color, // Cyan
    pub base_0d: Color, // Blue
    pub base_0e: Color, // Purple
    pub base_0f: Color, // Brown
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BuiltinTheme {
    OceanicNext,
    CatppuccinMocha,
    Kanagawa,
}

impl BuiltinTheme {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTheme::OceanicNext => "Oceanic Next",
            BuiltinTheme::CatppuccinMocha => "Catppuccin Mocha",
            BuiltinTheme::Kanagawa => "Kanagawa",
        }
    }

    fn palette(&self) -> &'static Base16Palette {
        match self {
            BuiltinTheme::OceanicNext => &OCEANIC_NEXT_PALETTE,
            BuiltinTheme::CatppuccinMocha => &CATPPUCCIN_MOCHA_PALETTE,
            BuiltinTheme::Kanagawa => &KANAGAWA_PALETTE,
        }
    }

    pub fn all() -> &'static [BuiltinTheme] {
        &[
            BuiltinTheme::OceanicNext,
            BuiltinTheme::CatppuccinMocha,
            BuiltinTheme::Kanagawa,
        ]
    }

    pub fn by_name(name: &str) -> Option<BuiltinTheme> {
        Self::all()
            .iter()
            .copied()
            .find(|theme| theme.name().eq_ignore_ascii_case(name))
    }
}

static CURRENT_THEME_INDEX: AtomicUsize = AtomicUsize::new(0);

/// Apply the theme named in settings
pub fn load_theme_from_settings() {
    let saved_theme = settings::get_theme_name();
    if set_theme_by_name(&saved_theme) {
        debug!("Applied saved theme: {}", current_theme_name());
    } else {
        warn!("Saved theme '{}' not found, using default", saved_theme);
    }
}

pub fn set_theme_by_name(name: &str) -> bool {
    match BuiltinTheme::all()
        .iter()
        .position(|theme| theme.name().eq_ignore_ascii_case(name))
    {
        Some(index) => {
            CURRENT_THEME_INDEX.store(index, Ordering::Relaxed);
            true
        }
        None => false,
    }
}

pub fn current_theme_name() -> &'static str {
    current_builtin().name()
}

pub fn current_theme() -> &'static Base16Palette {
    current_builtin().palette()
}

fn current_builtin() -> BuiltinTheme {
    let index = CURRENT_THEME_INDEX.load(Ordering::Relaxed);
    BuiltinTheme::all()
        .get(index)
        .copied()
        .unwrap_or(BuiltinTheme::OceanicNext)
}

// ============================================================================
// Built-in theme palettes
// ============================================================================

static OCEANIC_NEXT_PALETTE: Lazy<Base16Palette> = Lazy::new(|| Base16Palette {
    base_00: smart_color(0x1B2B34),
    base_01: smart_color(0x343D46),
    base_02: smart_color(0x4F5B66),
    base_03: smart_color(0x65737E),
    base_04: smart_color(0xA7ADBA),
    base_05: smart_color(0xC0C5CE),
    base_06: smart_color(0xCDD3DE),
    base_07: smart_color(0xF0F4F8),
    base_08: smart_color(0xEC5F67),
    base_09: smart_color(0xF99157),
    base_0a: smart_color(0xFAC863),
    base_0b: smart_color(0x99C794),
    base_0c: smart_color(0x5FB3B3),
    base_0d: smart_color(0x6699CC),
    base_0e: smart_color(0xC594C5),
    base_0f: smart_color(0xAB7967),
});

static CATPPUCCIN_MOCHA_PALETTE: Lazy<Base16Palette> = Lazy::new(|| Base16Palette {
    base_00: smart_color(0x1E1E2E),
    base_01: smart_color(0x313244),
    base_02: smart_color(0x45475A),
    base_03: smart_color(0x6C7086),
    base_04: smart_color(0x7F849C),
    base_05: smart_color(0xA6ADC8),
    base_06: smart_color(0xCDD6F4),
    base_07: smart_color(0xF5E0DC),
    base_08: smart_color(0xF38BA8),
    base_09: smart_color(0xFAB387),
    base_0a: smart_color(0xF9E2AF),
    base_0b: smart_color(0xA6E3A1),
    base_0c: smart_color(0x94E2D5),
    base_0d: smart_color(0x89B4FA),
    base_0e: smart_color(0xCBA6F7),
    base_0f: smart_color(0xEBA0AC),
});

static KANAGAWA_PALETTE: Lazy<Base16Palette> = Lazy::new(|| Base16Palette {
    base_00: smart_color(0x1F1F28),
    base_01: smart_color(0x2A2A37),
    base_02: smart_color(0x223249),
    base_03: smart_color(0x727169),
    base_04: smart_color(0xC8C093),
    base_05: smart_color(0xDCD7BA),
    base_06: smart_color(0xDCD7BA),
    base_07: smart_color(0xE6E0C2),
    base_08: smart_color(0xC34043),
    base_09: smart_color(0xFFA066),
    base_0a: smart_color(0xDCA561),
    base_0b: smart_color(0x98BB6C),
    base_0c: smart_color(0x7FB4CA),
    base_0d: smart_color(0x7E9CD8),
    base_0e: smart_color(0x957FB8),
    base_0f: smart_color(0xD27E99),
});

// ============================================================================
// Styles for page content and chrome
// ============================================================================

impl Base16Palette {
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.base_05)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.base_08)
            .add_modifier(Modifier::BOLD)
    }

    pub fn link_style(&self) -> Style {
        Style::default().fg(self.base_0b)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.base_03)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.base_07)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_ignores_case() {
        assert_eq!(
            BuiltinTheme::by_name("kanagawa"),
            Some(BuiltinTheme::Kanagawa)
        );
        assert_eq!(BuiltinTheme::by_name("Solarized"), None);
    }

    #[test]
    fn test_heading_style_is_bold() {
        let palette = BuiltinTheme::OceanicNext.palette();
        assert!(
            palette
                .heading_style()
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }
}
