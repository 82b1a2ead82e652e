// UI Styles
// Styles for the bar, labels, indicator and shadow, derived from a TabBarConfig

use ratatui::style::{Color, Modifier, Style};

use crate::core::TabBarConfig;

/// Lower block glyphs indexed by indicator height in eighths (1..=8)
const INDICATOR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Tab bar color scheme and styles
pub struct Styles;

impl Styles {
    // === Bar ===

    pub fn bar(config: &TabBarConfig) -> Style {
        Style::default().bg(config.bar_color)
    }

    /// Shade row drawn beneath the bar
    pub fn shadow() -> Style {
        Style::default()
            .fg(Color::Rgb(40, 40, 40))
            .add_modifier(Modifier::DIM)
    }

    pub fn shadow_glyph() -> char {
        '▀'
    }

    // === Labels ===

    pub fn label(config: &TabBarConfig, active: bool) -> Style {
        let base = Style::default()
            .fg(config.inactive_text_color)
            .bg(config.bar_color)
            .patch(config.text_style);

        if active {
            base.fg(config.active_text_color)
                .add_modifier(Modifier::BOLD)
                .patch(config.active_text_style)
        } else {
            base
        }
    }

    // === Indicator ===

    pub fn indicator(config: &TabBarConfig) -> Style {
        Style::default().fg(config.indicator_color).bg(config.bar_color)
    }

    pub fn indicator_glyph(height: u8) -> char {
        let idx = height.clamp(1, INDICATOR_GLYPHS.len() as u8) as usize - 1;
        INDICATOR_GLYPHS[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_glyph_by_height() {
        assert_eq!(Styles::indicator_glyph(1), '▁');
        assert_eq!(Styles::indicator_glyph(4), '▄');
        assert_eq!(Styles::indicator_glyph(8), '█');
        assert_eq!(Styles::indicator_glyph(0), '▁');
        assert_eq!(Styles::indicator_glyph(20), '█');
    }

    #[test]
    fn test_active_label_style_overrides() {
        let mut config = TabBarConfig::default();
        config.active_text_style = Style::default().add_modifier(Modifier::UNDERLINED);

        let active = Styles::label(&config, true);
        let inactive = Styles::label(&config, false);
        assert_eq!(active.fg, Some(config.active_text_color));
        assert_eq!(inactive.fg, Some(config.inactive_text_color));
        assert!(active.add_modifier.contains(Modifier::UNDERLINED));
        assert!(!inactive.add_modifier.contains(Modifier::UNDERLINED));
    }
}
