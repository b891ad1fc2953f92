//! Output formatting for CLI display.

use punchclock::model::{Profile, TourStop};
use punchclock::onboarding::Screen;

/// One line per profile for `punchclock users`.
pub(super) fn format_profile_line(profile: &Profile) -> String {
    let first = if profile.is_first_login {
        "first-login"
    } else {
        "onboarded"
    };
    format!(
        "{:<28} {:<16} {:<9} {:<12} [{first}]",
        profile.email,
        profile.name,
        profile.role.as_str(),
        profile.department,
    )
}

pub(super) fn format_tour_stop(index: usize, stop: &TourStop) -> String {
    let demo = stop
        .demo()
        .map(|d| format!(" (try: {d:?})").to_lowercase())
        .unwrap_or_default();
    format!(
        "{:>2}. {} [{} · {:?}]{demo}\n    {}",
        index + 1,
        stop.title,
        stop.target,
        stop.position,
        stop.description,
    )
}

pub(super) fn format_screen(screen: Screen) -> &'static str {
    match screen {
        Screen::Dormant => "dormant",
        Screen::Welcome => "welcome",
        Screen::Wizard => "wizard",
        Screen::Tour => "tour",
        Screen::Help => "help",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use punchclock::model::TOUR_SCRIPT;

    #[test]
    fn tour_lines_mention_the_demo() {
        let line = format_tour_stop(1, &TOUR_SCRIPT[1]);
        assert!(line.starts_with(" 2. "));
        assert!(line.contains("clock-toggle"));
        assert!(line.contains("(try: clock)"));

        assert!(!format_tour_stop(0, &TOUR_SCRIPT[0]).contains("try:"));
    }
}
