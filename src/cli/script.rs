//! Scripted onboarding events for `punchclock onboard`.
//!
//! Each event is one token: a bare verb (`next`, `try`) or `name=value`.

use std::str::FromStr;
use std::time::Duration;

use punchclock::model::{Activity, Role};
use punchclock::onboarding::Input;
use punchclock::shortcuts::{Focus, Key, KeyPress};
use punchclock::wizard::Preference;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("bad value in '{token}': {reason}")]
    BadValue { token: String, reason: String },
}

/// One step of an onboarding script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(Input),
    /// Runs whatever is left of the flow to completion.
    Finish,
}

impl FromStr for Event {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let input = match token {
            "finish" => return Ok(Self::Finish),
            "start" => Input::Start,
            "skip" => Input::Skip,
            "next" => Input::Next,
            "prev" => Input::Prev,
            "complete" => Input::Complete,
            "try" => Input::TryFeature,
            "help" => Input::ShowHelp,
            "shortcuts" => Input::ToggleShortcuts,
            "dismiss" => Input::DismissNotification,
            "escape" => Input::Key(KeyPress::plain(Key::Escape), Focus::Page),
            _ => {
                let (name, value) = token
                    .split_once('=')
                    .ok_or_else(|| ScriptError::UnknownEvent(token.to_string()))?;
                parse_assignment(token, name, value)?
            }
        };
        Ok(Self::Input(input))
    }
}

fn parse_assignment(token: &str, name: &str, value: &str) -> Result<Input, ScriptError> {
    let bad = |reason: String| ScriptError::BadValue {
        token: token.to_string(),
        reason,
    };
    let input = match name {
        "role" => Input::SelectRole(value.parse::<Role>().map_err(|e| bad(e.to_string()))?),
        "name" => Input::SetName(value.to_string()),
        "department" => Input::SetDepartment(value.to_string()),
        "pref" => Input::TogglePreference(value.parse::<Preference>().map_err(bad)?),
        "key" => Input::Key(value.parse::<KeyPress>().map_err(bad)?, Focus::Page),
        "field-key" => Input::Key(value.parse::<KeyPress>().map_err(bad)?, Focus::FormField),
        "activity" => Input::Activity(value.parse::<Activity>().map_err(bad)?),
        "wait" => {
            let ms = value
                .parse::<u64>()
                .map_err(|e| bad(format!("expected milliseconds: {e}")))?;
            Input::Wait(Duration::from_millis(ms))
        }
        _ => return Err(ScriptError::UnknownEvent(token.to_string())),
    };
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(token: &str) -> Input {
        match token.parse::<Event>().unwrap() {
            Event::Input(input) => input,
            Event::Finish => panic!("expected an input for {token}"),
        }
    }

    #[test]
    fn parses_verbs() {
        assert_eq!(input("next"), Input::Next);
        assert_eq!(input("try"), Input::TryFeature);
        assert_eq!(
            input("escape"),
            Input::Key(KeyPress::plain(Key::Escape), Focus::Page)
        );
        assert_eq!("finish".parse::<Event>().unwrap(), Event::Finish);
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(input("role=manager"), Input::SelectRole(Role::Manager));
        assert_eq!(input("name=Ada Lovelace"), Input::SetName("Ada Lovelace".into()));
        assert_eq!(input("wait=1500"), Input::Wait(Duration::from_millis(1500)));
        assert_eq!(
            input("field-key=space"),
            Input::Key(KeyPress::plain(Key::Space), Focus::FormField)
        );
        assert_eq!(input("activity=report"), Input::Activity(Activity::ReportGenerated));
        assert_eq!(
            input("pref=dark"),
            Input::TogglePreference(Preference::DarkTheme)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "jump".parse::<Event>(),
            Err(ScriptError::UnknownEvent(_))
        ));
        assert!(matches!(
            "color=red".parse::<Event>(),
            Err(ScriptError::UnknownEvent(_))
        ));
        assert!(matches!(
            "wait=soon".parse::<Event>(),
            Err(ScriptError::BadValue { .. })
        ));
        assert!(matches!(
            "role=captain".parse::<Event>(),
            Err(ScriptError::BadValue { .. })
        ));
    }
}
