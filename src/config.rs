use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;
use ratatui::style::Color;

use crate::geometry::Coord;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "TURTLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSettings {
    pub width: i32,
    pub height: i32,
    pub start_x: i32,
    pub start_y: i32,
    pub delay_ms: u64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            start_x: 3,
            start_y: 3,
            delay_ms: 1000,
        }
    }
}

impl GridSettings {
    pub fn dims(&self) -> Coord {
        Coord::new(self.width, self.height)
    }

    pub fn start(&self) -> Coord {
        Coord::new(self.start_x, self.start_y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    pub cell_marked: Color,
    pub cell_clear: Color,
    pub turtle: Color,
    pub border: Color,
    pub status_text: Color,
    pub status_error: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            cell_marked: Color::White,
            cell_clear: Color::DarkGray,
            turtle: Color::Green,
            border: Color::Gray,
            status_text: Color::White,
            status_error: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub grid: GridSettings,
    pub colors: Colors,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| load_from_toml().unwrap_or_default())
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.is_ascii() && hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
    } else {
        let name = s.to_ascii_lowercase();
        return Some(match name.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "gray" | "grey" => Color::Gray,
            "darkgray" | "dark_grey" | "darkgrey" | "dark_gray" => Color::DarkGray,
            "lightred" | "light_red" => Color::LightRed,
            "lightgreen" | "light_green" => Color::LightGreen,
            "lightblue" | "light_blue" => Color::LightBlue,
            "white" => Color::White,
            _ => return None,
        });
    }
    None
}

fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }

    // On Linux: resolves to /home/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("turtle.toml");
    Some(path)
}

fn load_from_toml() -> Option<Settings> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    tracing::debug!(path = %path.display(), "loaded turtle config");
    Some(parse_settings(&content))
}

/// Read `[grid]` and `[colors]` sections of `key = value` pairs.
/// Unknown keys and malformed values are ignored.
pub fn parse_settings(content: &str) -> Settings {
    let mut section = String::new();
    let mut map: HashMap<(String, String), String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len()-1].trim().to_string();
            continue;
        }
        if let Some((key, val_raw)) = line.split_once('=') {
            let val_raw = val_raw.trim();
            // Accept quoted or unquoted
            let val = val_raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val_raw);
            map.insert((section.clone(), key.trim().to_string()), val.to_string());
        }
    }

    let mut cfg = Settings::default();
    let get = |section: &str, key: &str| map.get(&(section.to_string(), key.to_string()));

    macro_rules! set_num {
        ($field:ident) => {
            if let Some(v) = get("grid", stringify!($field)).and_then(|s| s.parse().ok()) { cfg.grid.$field = v; }
        };
    }
    macro_rules! set_color {
        ($field:ident) => {
            if let Some(v) = get("colors", stringify!($field)).and_then(|s| parse_color(s)) { cfg.colors.$field = v; }
        };
    }

    set_num!(width);
    set_num!(height);
    set_num!(start_x);
    set_num!(start_y);
    set_num!(delay_ms);

    set_color!(cell_marked);
    set_color!(cell_clear);
    set_color!(turtle);
    set_color!(border);
    set_color!(status_text);
    set_color!(status_error);

    cfg
}
