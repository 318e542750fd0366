//! Key mapping for superfile.
//!
//! Maps decoded [Key]s to the symbolic [Action] vocabulary. Bindings come from the
//! `[keys]` table of the configuration.

use crate::app::input::Key;
use crate::config::Config;

use std::collections::HashMap;

/// Symbolic user intent, independent of the key that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Search,
    ToggleHidden,
    Sort,
    Refresh,
    Favorite,
    Quit,
}

/// Stores the mapping from [Key] to [Action], built from the config.
#[derive(Debug, Clone)]
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        bind!(keys.up(),            Action::Up);
        bind!(keys.down(),          Action::Down);
        bind!(keys.left(),          Action::Left);
        bind!(keys.right(),         Action::Right);
        bind!(keys.enter(),         Action::Enter);
        bind!(keys.tab(),           Action::Tab);
        bind!(keys.search(),        Action::Search);
        bind!(keys.toggle_hidden(), Action::ToggleHidden);
        bind!(keys.sort(),          Action::Sort);
        bind!(keys.refresh(),       Action::Refresh);
        bind!(keys.favorite(),      Action::Favorite);
        bind!(keys.quit(),          Action::Quit);

        Keymap { map }
    }

    pub fn lookup(&self, key: Key) -> Option<Action> {
        self.map.get(&key).copied()
    }
}

/// Parses a binding such as `"Up"`, `"space"` or `"q"`.
pub fn parse_key(s: &str) -> Option<Key> {
    let trimmed = s.trim();
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key::Char(c));
    }
    if s == " " {
        return Some(Key::Char(' '));
    }

    match trimmed.to_lowercase().as_str() {
        "up" => Some(Key::Up),
        "down" => Some(Key::Down),
        "left" => Some(Key::Left),
        "right" => Some(Key::Right),
        "enter" | "return" => Some(Key::Enter),
        "tab" => Some(Key::Tab),
        "esc" | "escape" => Some(Key::Esc),
        "backspace" | "back" => Some(Key::Backspace),
        "space" | "spc" => Some(Key::Char(' ')),
        _ => None,
    }
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(binding = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_chars() {
        assert_eq!(parse_key("Up"), Some(Key::Up));
        assert_eq!(parse_key("ENTER"), Some(Key::Enter));
        assert_eq!(parse_key("space"), Some(Key::Char(' ')));
        assert_eq!(parse_key(" "), Some(Key::Char(' ')));
        assert_eq!(parse_key("/"), Some(Key::Char('/')));
        assert_eq!(parse_key("Q"), Some(Key::Char('Q')));
        assert_eq!(parse_key("F13"), None);
    }

    #[test]
    fn default_bindings() {
        let keymap = Keymap::from_config(&Config::default());
        assert_eq!(keymap.lookup(Key::Up), Some(Action::Up));
        assert_eq!(keymap.lookup(Key::Char(' ')), Some(Action::Right));
        assert_eq!(keymap.lookup(Key::Right), Some(Action::Right));
        assert_eq!(keymap.lookup(Key::Enter), Some(Action::Enter));
        assert_eq!(keymap.lookup(Key::Char('/')), Some(Action::Search));
        assert_eq!(keymap.lookup(Key::Char('h')), Some(Action::ToggleHidden));
        assert_eq!(keymap.lookup(Key::Char('s')), Some(Action::Sort));
        assert_eq!(keymap.lookup(Key::Char('r')), Some(Action::Refresh));
        assert_eq!(keymap.lookup(Key::Char('f')), Some(Action::Favorite));
        assert_eq!(keymap.lookup(Key::Char('q')), Some(Action::Quit));
        assert_eq!(keymap.lookup(Key::Char('z')), None);
        assert_eq!(keymap.lookup(Key::Unknown), None);
    }
}
