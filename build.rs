// Build script - reads config.yaml at compile time and generates widget defaults
// This allows changing defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_defaults.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let defaults = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_defaults(&content)
    } else {
        CompiledDefaults::default()
    };

    // Generate Rust code with the compiled-in values
    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const BAR_COLOR: (u8, u8, u8) = {bar_color};
pub const BAR_HEIGHT: u16 = {bar_height};
pub const ACTIVE_TEXT_COLOR: (u8, u8, u8) = {active_text_color};
pub const INACTIVE_TEXT_COLOR: (u8, u8, u8) = {inactive_text_color};
pub const INDICATOR_COLOR: (u8, u8, u8) = {indicator_color};
pub const INDICATOR_HEIGHT: u8 = {indicator_height};

pub const SPRING_TENSION: f32 = {spring_tension:?};
pub const SPRING_FRICTION: f32 = {spring_friction:?};
pub const SCROLL_DURATION_MS: u64 = {scroll_duration_ms};
"#,
        bar_color = rgb_tuple(defaults.bar_color),
        bar_height = defaults.bar_height,
        active_text_color = rgb_tuple(defaults.active_text_color),
        inactive_text_color = rgb_tuple(defaults.inactive_text_color),
        indicator_color = rgb_tuple(defaults.indicator_color),
        indicator_height = defaults.indicator_height,
        spring_tension = defaults.spring_tension,
        spring_friction = defaults.spring_friction,
        scroll_duration_ms = defaults.scroll_duration_ms,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled defaults");
}

struct CompiledDefaults {
    bar_color: (u8, u8, u8),
    bar_height: u16,
    active_text_color: (u8, u8, u8),
    inactive_text_color: (u8, u8, u8),
    indicator_color: (u8, u8, u8),
    indicator_height: u8,
    spring_tension: f32,
    spring_friction: f32,
    scroll_duration_ms: u64,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            bar_color: (19, 137, 123),             // #13897b
            bar_height: 3,
            active_text_color: (255, 255, 255),
            inactive_text_color: (179, 179, 179),  // white at 70%
            indicator_color: (255, 255, 255),
            indicator_height: 4,
            spring_tension: 300.0,
            spring_friction: 20.0,
            scroll_duration_ms: 250,
        }
    }
}

fn rgb_tuple(rgb: (u8, u8, u8)) -> String {
    format!("({}, {}, {})", rgb.0, rgb.1, rgb.2)
}

fn parse_defaults(content: &str) -> CompiledDefaults {
    let mut defaults = CompiledDefaults::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_defaults = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // A non-indented key starts a new top-level section
        if !line.starts_with(' ') && !line.starts_with('\t') && !trimmed.is_empty() && !trimmed.starts_with('#') {
            in_defaults = trimmed.starts_with("defaults:");
            continue;
        }

        if !in_defaults {
            continue;
        }

        if let Some((key, value)) = parse_kv(trimmed) {
            match key {
                "bar_color" => defaults.bar_color = parse_hex_color(value, defaults.bar_color),
                "bar_height" => defaults.bar_height = value.parse().unwrap_or(defaults.bar_height),
                "active_text_color" => {
                    defaults.active_text_color = parse_hex_color(value, defaults.active_text_color)
                }
                "inactive_text_color" => {
                    defaults.inactive_text_color = parse_hex_color(value, defaults.inactive_text_color)
                }
                "indicator_color" => {
                    defaults.indicator_color = parse_hex_color(value, defaults.indicator_color)
                }
                "indicator_height" => {
                    defaults.indicator_height = value.parse().unwrap_or(defaults.indicator_height)
                }
                "spring_tension" => {
                    defaults.spring_tension = value.parse().unwrap_or(defaults.spring_tension)
                }
                "spring_friction" => {
                    defaults.spring_friction = value.parse().unwrap_or(defaults.spring_friction)
                }
                "scroll_duration_ms" => {
                    defaults.scroll_duration_ms = value.parse().unwrap_or(defaults.scroll_duration_ms)
                }
                _ => {}
            }
        }
    }

    defaults
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    // Skip comments and empty lines
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Remove inline comments, but keep the # of a hex color
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    if value.is_empty() {
        return None;
    }

    Some((key, value.trim_matches('"').trim_matches('\'')))
}

fn parse_hex_color(s: &str, fallback: (u8, u8, u8)) -> (u8, u8, u8) {
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[0..2], 16),
            u8::from_str_radix(&s[2..4], 16),
            u8::from_str_radix(&s[4..6], 16),
        ) {
            return (r, g, b);
        }
    }

    fallback
}
