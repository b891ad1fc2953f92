//! Process-wide keyboard shortcuts.
//!
//! Bindings are active whatever the onboarding state. While focus sits in a
//! form field only the dismiss shortcut (`Escape`) gets through, so typing a
//! space or a question mark never triggers anything.

use std::str::FromStr;

use serde::Serialize;

use crate::model::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Char(char),
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    pub const fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
        }
    }
}

impl FromStr for KeyPress {
    type Err = String;

    /// Accepts `space`, `escape`/`esc`, a single character, or `ctrl+<char>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let (ctrl, rest) = match lower.strip_prefix("ctrl+") {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };
        let key = match rest {
            "space" => Key::Space,
            "escape" | "esc" => Key::Escape,
            _ => {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(format!("unknown key '{s}'")),
                }
            }
        };
        Ok(Self { key, ctrl })
    }
}

/// Where keyboard focus is when a key arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Page,
    /// A text input, textarea or select.
    FormField,
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "section", rename_all = "kebab-case")]
pub enum Shortcut {
    ToggleClock,
    Navigate(Section),
    ShowHelp,
    /// Close the onboarding overlay and any achievement notification.
    Dismiss,
}

/// A row in the help center's shortcut list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub keys: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    press: KeyPress,
    #[serde(skip)]
    pub shortcut: Shortcut,
}

pub const BINDINGS: [Binding; 7] = [
    Binding {
        keys: "Space",
        label: "Clock in / out",
        press: KeyPress::plain(Key::Space),
        shortcut: Shortcut::ToggleClock,
    },
    Binding {
        keys: "Ctrl+D",
        label: "Go to dashboard",
        press: KeyPress::ctrl('d'),
        shortcut: Shortcut::Navigate(Section::Dashboard),
    },
    Binding {
        keys: "Ctrl+T",
        label: "Go to time tracking",
        press: KeyPress::ctrl('t'),
        shortcut: Shortcut::Navigate(Section::TimeTracking),
    },
    Binding {
        keys: "Ctrl+A",
        label: "Go to attendance",
        press: KeyPress::ctrl('a'),
        shortcut: Shortcut::Navigate(Section::Attendance),
    },
    Binding {
        keys: "Ctrl+R",
        label: "Go to reports",
        press: KeyPress::ctrl('r'),
        shortcut: Shortcut::Navigate(Section::Reports),
    },
    Binding {
        keys: "?",
        label: "Open the help center",
        press: KeyPress::plain(Key::Char('?')),
        shortcut: Shortcut::ShowHelp,
    },
    Binding {
        keys: "Esc",
        label: "Close overlays",
        press: KeyPress::plain(Key::Escape),
        shortcut: Shortcut::Dismiss,
    },
];

/// Looks up the shortcut bound to `press`, honoring form-field focus.
pub fn resolve(press: KeyPress, focus: Focus) -> Option<Shortcut> {
    let press = match press.key {
        Key::Char(c) => KeyPress {
            key: Key::Char(c.to_ascii_lowercase()),
            ..press
        },
        _ => press,
    };
    let shortcut = BINDINGS.iter().find(|b| b.press == press)?.shortcut;
    if focus == Focus::FormField && shortcut != Shortcut::Dismiss {
        return None;
    }
    Some(shortcut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bound_keys() {
        assert_eq!(
            resolve(KeyPress::plain(Key::Space), Focus::Page),
            Some(Shortcut::ToggleClock)
        );
        assert_eq!(
            resolve(KeyPress::ctrl('R'), Focus::Page),
            Some(Shortcut::Navigate(Section::Reports))
        );
        assert_eq!(
            resolve(KeyPress::plain(Key::Char('?')), Focus::Page),
            Some(Shortcut::ShowHelp)
        );
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(resolve(KeyPress::plain(Key::Char('d')), Focus::Page), None);
        assert_eq!(resolve(KeyPress::ctrl('x'), Focus::Page), None);
    }

    #[test]
    fn form_fields_swallow_everything_but_escape() {
        assert_eq!(resolve(KeyPress::plain(Key::Space), Focus::FormField), None);
        assert_eq!(resolve(KeyPress::ctrl('d'), Focus::FormField), None);
        assert_eq!(
            resolve(KeyPress::plain(Key::Escape), Focus::FormField),
            Some(Shortcut::Dismiss)
        );
    }

    #[test]
    fn parses_key_names() {
        assert_eq!("space".parse::<KeyPress>().unwrap(), KeyPress::plain(Key::Space));
        assert_eq!("Esc".parse::<KeyPress>().unwrap(), KeyPress::plain(Key::Escape));
        assert_eq!("ctrl+t".parse::<KeyPress>().unwrap(), KeyPress::ctrl('t'));
        assert_eq!(
            "?".parse::<KeyPress>().unwrap(),
            KeyPress::plain(Key::Char('?'))
        );
        assert!("ctrl+".parse::<KeyPress>().is_err());
        assert!("f12".parse::<KeyPress>().is_err());
    }
}
