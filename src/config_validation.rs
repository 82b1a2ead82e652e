// Configuration validation module
// Converts YAML tab bar options into a TabBarConfig and the host's initial props

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::{warn, LevelFilter};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::animation::{Easing, SpringConfig, Transition};
use crate::config::{load_config, AppConfig, ConfigError, TabBarConfigYaml, TabItemYaml, TextStyleYaml, TransitionYaml};
use crate::core::items::duplicate_keys;
use crate::core::tab_bar_config::MAX_INDICATOR_HEIGHT;
use crate::core::{PersistTaps, TabBarConfig, TabBarProps, TabItem};

/// Load and validate configuration, warning on failure
pub fn load_and_validate_config(config_path: &Path) -> Result<(AppConfig, TabBarProps), ConfigError> {
    let result = load_config(config_path).and_then(|config| {
        let props = convert_tab_bar_config(&config.tab_bar)?;
        parse_log_level(&config.application.log_level)?;
        Ok((config, props))
    });

    if let Err(e) = &result {
        // Logging is not up yet; this reaches the user before the terminal switches screens
        eprintln!("Warning: Failed to load configuration from {}: {}", config_path.display(), e);
    }
    result
}

/// Map a log level name to a filter
pub fn parse_log_level(level: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(level).map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value).map_err(|_| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn color_or(field: &'static str, value: Option<&String>, default: Color) -> Result<Color, ConfigError> {
    value.map(|v| parse_color(field, v)).unwrap_or(Ok(default))
}

fn convert_text_style(field: &'static str, yaml: &TextStyleYaml) -> Result<Style, ConfigError> {
    let mut style = Style::default();
    if let Some(fg) = &yaml.fg {
        style = style.fg(parse_color(field, fg)?);
    }
    if let Some(bg) = &yaml.bg {
        style = style.bg(parse_color(field, bg)?);
    }
    if yaml.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if yaml.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if yaml.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Ok(style)
}

fn convert_transition(yaml: &TransitionYaml) -> Result<Transition, ConfigError> {
    Ok(match yaml {
        TransitionYaml::Spring { tension, friction } => Transition::Spring(SpringConfig::new(*tension, *friction)),
        TransitionYaml::Timing { duration_ms, easing } => {
            let easing = match easing {
                Some(name) => Easing::from_str(name).ok_or_else(|| ConfigError::InvalidEasing(name.clone()))?,
                None => Easing::default(),
            };
            Transition::Timing {
                duration: Duration::from_millis(*duration_ms),
                easing,
            }
        }
        TransitionYaml::Instant => Transition::Instant,
    })
}

/// Convert YAML tab items; keyed items become a single-line content
pub fn create_tab_items(items: &[TabItemYaml]) -> Vec<TabItem> {
    let items: Vec<TabItem> = items
        .iter()
        .map(|item| match item {
            TabItemYaml::Label(label) => TabItem::Label(label.clone()),
            TabItemYaml::Keyed { key, label } => TabItem::keyed(key.clone(), Line::from(label.clone())),
        })
        .collect();

    for key in duplicate_keys(&items) {
        warn!("Tab key '{}' is used more than once", key);
    }
    items
}

/// Convert YAML tab bar configuration into initial props
pub fn convert_tab_bar_config(yaml: &TabBarConfigYaml) -> Result<TabBarProps, ConfigError> {
    let defaults = TabBarConfig::default();

    let bar_height = yaml.bar_height.unwrap_or(defaults.bar_height);
    if bar_height == 0 {
        return Err(ConfigError::InvalidBarHeight);
    }

    let indicator_height = yaml.indicator_height.unwrap_or(defaults.indicator_height);
    if !(1..=MAX_INDICATOR_HEIGHT).contains(&indicator_height) {
        return Err(ConfigError::InvalidIndicatorHeight(indicator_height));
    }

    let keyboard_should_persist_taps = match &yaml.keyboard_should_persist_taps {
        Some(value) => PersistTaps::from_str(value).ok_or_else(|| ConfigError::InvalidPersistTaps(value.clone()))?,
        None => defaults.keyboard_should_persist_taps,
    };

    let config = TabBarConfig {
        bar_color: color_or("bar_color", yaml.bar_color.as_ref(), defaults.bar_color)?,
        bar_height,
        active_text_color: color_or("active_text_color", yaml.active_text_color.as_ref(), defaults.active_text_color)?,
        inactive_text_color: color_or(
            "inactive_text_color",
            yaml.inactive_text_color.as_ref(),
            defaults.inactive_text_color,
        )?,
        indicator_color: color_or("indicator_color", yaml.indicator_color.as_ref(), defaults.indicator_color)?,
        indicator_height,
        scrollable: yaml.scrollable.unwrap_or(defaults.scrollable),
        uppercase: yaml.uppercase.unwrap_or(defaults.uppercase),
        shadow: yaml.shadow.unwrap_or(defaults.shadow),
        allow_font_scaling: yaml.allow_font_scaling.unwrap_or(defaults.allow_font_scaling),
        text_style: match &yaml.text_style {
            Some(style) => convert_text_style("text_style", style)?,
            None => defaults.text_style,
        },
        active_text_style: match &yaml.active_text_style {
            Some(style) => convert_text_style("active_text_style", style)?,
            None => defaults.active_text_style,
        },
        keyboard_should_persist_taps,
        indicator_transition: match &yaml.indicator_transition {
            Some(t) => convert_transition(t)?,
            None => defaults.indicator_transition,
        },
        scroll_transition: match &yaml.scroll_transition {
            Some(t) => convert_transition(t)?,
            None => defaults.scroll_transition,
        },
    };

    let props = TabBarProps::new(create_tab_items(&yaml.items), yaml.selected_index, config);
    if props.items.is_empty() {
        warn!("Tab bar has no items; nothing will be drawn until tabs are added");
    } else {
        props.valid_selection().map_err(ConfigError::InvalidSelection)?;
    }

    Ok(props)
}
