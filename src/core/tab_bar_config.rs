// Tab Bar Configuration
// Display options supplied by the host; defaults compiled from config.yaml at build time

use ratatui::style::{Color, Style};

use crate::animation::Transition;

// Include the auto-generated defaults from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_defaults.rs"));
}

/// Largest indicator height, in eighths of a cell
pub const MAX_INDICATOR_HEIGHT: u8 = 8;

/// Which taps on the track reach the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistTaps {
    /// Every tap on a tab is delivered
    #[default]
    Never,
    /// Taps anywhere on the track are reported, including empty track
    Always,
    /// Only taps that land on a tab are delivered
    Handled,
}

impl PersistTaps {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "never" => Some(PersistTaps::Never),
            "always" => Some(PersistTaps::Always),
            "handled" => Some(PersistTaps::Handled),
            _ => None,
        }
    }
}

/// Display options for one tab bar
///
/// Supplied fresh by the host on every update; the widget never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct TabBarConfig {
    /// Background of the whole bar
    pub bar_color: Color,

    /// Height of the bar in rows
    pub bar_height: u16,

    /// Label color of the selected tab
    pub active_text_color: Color,

    /// Label color of the other tabs
    pub inactive_text_color: Color,

    pub indicator_color: Color,

    /// Indicator thickness in eighths of a cell (1..=8)
    pub indicator_height: u8,

    /// Fixed-width tabs that may overflow and scroll
    pub scrollable: bool,

    /// Upper-case string labels
    pub uppercase: bool,

    /// Draw a shade row beneath the bar
    pub shadow: bool,

    /// Allow labels to be shortened with an ellipsis instead of clipped
    pub allow_font_scaling: bool,

    /// Patched onto every label
    pub text_style: Style,

    /// Patched onto the selected label after `text_style`
    pub active_text_style: Style,

    pub keyboard_should_persist_taps: PersistTaps,

    /// How the indicator travels to a new tab
    pub indicator_transition: Transition,

    /// How the track scrolls to a new offset
    pub scroll_transition: Transition,
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

impl Default for TabBarConfig {
    fn default() -> Self {
        Self {
            bar_color: rgb(compiled::BAR_COLOR),
            bar_height: compiled::BAR_HEIGHT,
            active_text_color: rgb(compiled::ACTIVE_TEXT_COLOR),
            inactive_text_color: rgb(compiled::INACTIVE_TEXT_COLOR),
            indicator_color: rgb(compiled::INDICATOR_COLOR),
            indicator_height: compiled::INDICATOR_HEIGHT.clamp(1, MAX_INDICATOR_HEIGHT),
            scrollable: false,
            uppercase: true,
            shadow: false,
            allow_font_scaling: true,
            text_style: Style::default(),
            active_text_style: Style::default(),
            keyboard_should_persist_taps: PersistTaps::Never,
            indicator_transition: Transition::spring(),
            scroll_transition: Transition::scroll(),
        }
    }
}

impl TabBarConfig {
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Swap both transitions for instant jumps
    pub fn without_animation(mut self) -> Self {
        self.indicator_transition = Transition::Instant;
        self.scroll_transition = Transition::Instant;
        self
    }
}
