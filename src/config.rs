use crate::cmds::Cmd;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use termion::event::Key;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "ALMANAC_CONFIG_FILE";
const DEFAULT_TICK_RATE_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeserializeFromStr)]
pub struct KeySpec(Key);

impl KeySpec {
    pub fn key(&self) -> Key {
        self.0
    }
}

impl FromStr for KeySpec {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "insert" => Key::Insert,
            "esc" => Key::Esc,
            "space" => Key::Char(' '),
            _ => {
                if let Some(c) = s.strip_prefix("ctrl+").and_then(|rest| single_char(rest)) {
                    Key::Ctrl(c)
                } else if let Some(c) = s.strip_prefix("alt+").and_then(|rest| single_char(rest)) {
                    Key::Alt(c)
                } else if let Some(n) = s.strip_prefix('f').and_then(|rest| rest.parse().ok()) {
                    Key::F(n)
                } else if let Some(c) = single_char(s) {
                    Key::Char(c)
                } else {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Key '{}' not recognized", s),
                    ));
                }
            }
        };

        Ok(KeySpec(key))
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
            Key::PageUp => write!(f, "pageup"),
            Key::PageDown => write!(f, "pagedown"),
            Key::Backspace => write!(f, "backspace"),
            Key::Delete => write!(f, "delete"),
            Key::Insert => write!(f, "insert"),
            Key::Esc => write!(f, "esc"),
            Key::Char(' ') => write!(f, "space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "ctrl+{}", c),
            Key::Alt(c) => write!(f, "alt+{}", c),
            Key::F(n) => write!(f, "f{}", n),
            _ => write!(f, "?"),
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub prev_month: KeySpec,
    pub next_month: KeySpec,
    pub quit: KeySpec,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            prev_month: KeySpec(Key::Left),
            next_month: KeySpec(Key::Right),
            quit: KeySpec(Key::Char('q')),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn key_map(&self) -> KeyMap {
        let mut key_map = KeyMap::new();

        key_map.insert(self.keys.prev_month.key(), Cmd::PrevMonth);
        key_map.insert(self.keys.next_month.key(), Cmd::NextMonth);
        key_map.insert(self.keys.quit.key(), Cmd::Exit);

        key_map
    }
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("almanac").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".almanac.toml"));
    }

    locations
}

pub fn load_suitable_config(explicit: Option<&Path>) -> io::Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    for location in find_configfile_locations() {
        if location.exists() {
            log::info!("Using configuration from '{}'", location.display());
            return load_config(&location);
        }
    }

    log::info!("No configuration file found, using defaults");
    Ok(Config::default())
}

fn load_config(path: &Path) -> io::Result<Config> {
    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
