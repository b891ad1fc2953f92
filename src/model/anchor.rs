//! Anchors: the dashboard elements a tour stop can point at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::tour::Demo;

/// A content section of the dashboard, reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Dashboard,
    TimeTracking,
    Attendance,
    Reports,
    Team,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::TimeTracking,
        Self::Attendance,
        Self::Reports,
        Self::Team,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::TimeTracking => "time-tracking",
            Self::Attendance => "attendance",
            Self::Reports => "reports",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A dashboard element the tour can highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anchor {
    /// The dashboard overview panel.
    Dashboard,
    /// The clock in/out button.
    ClockToggle,
    /// The global search field in the header.
    GlobalSearch,
    /// The light/dark theme switch.
    ThemeToggle,
    /// A sidebar navigation link.
    NavLink(Section),
}

impl Anchor {
    /// The demo this anchor can run from a tour stop, if any.
    pub fn demo(self) -> Option<Demo> {
        match self {
            Self::ClockToggle => Some(Demo::Clock),
            Self::GlobalSearch => Some(Demo::Search),
            Self::ThemeToggle => Some(Demo::Theme),
            Self::Dashboard | Self::NavLink(_) => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => f.write_str("dashboard"),
            Self::ClockToggle => f.write_str("clock-toggle"),
            Self::GlobalSearch => f.write_str("global-search"),
            Self::ThemeToggle => f.write_str("theme-toggle"),
            Self::NavLink(section) => write!(f, "nav:{section}"),
        }
    }
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown anchor '{0}' (expected dashboard, clock-toggle, global-search, theme-toggle or nav:<section>)")]
pub struct ParseAnchorError(String);

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => return Ok(Self::Dashboard),
            "clock-toggle" => return Ok(Self::ClockToggle),
            "global-search" => return Ok(Self::GlobalSearch),
            "theme-toggle" => return Ok(Self::ThemeToggle),
            _ => {}
        }
        s.strip_prefix("nav:")
            .and_then(|slug| Section::ALL.into_iter().find(|sec| sec.slug() == slug))
            .map(Self::NavLink)
            .ok_or_else(|| ParseAnchorError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_parse_from_their_display_form() {
        let anchors = [
            Anchor::Dashboard,
            Anchor::ClockToggle,
            Anchor::GlobalSearch,
            Anchor::ThemeToggle,
            Anchor::NavLink(Section::TimeTracking),
            Anchor::NavLink(Section::Team),
        ];
        for anchor in anchors {
            assert_eq!(anchor.to_string().parse::<Anchor>().unwrap(), anchor);
        }
    }

    #[test]
    fn unknown_anchor_is_rejected() {
        assert!("nav:payroll".parse::<Anchor>().is_err());
        assert!("sidebar".parse::<Anchor>().is_err());
    }

    #[test]
    fn only_header_controls_carry_demos() {
        assert_eq!(Anchor::ClockToggle.demo(), Some(Demo::Clock));
        assert_eq!(Anchor::GlobalSearch.demo(), Some(Demo::Search));
        assert_eq!(Anchor::ThemeToggle.demo(), Some(Demo::Theme));
        assert_eq!(Anchor::Dashboard.demo(), None);
        assert_eq!(Anchor::NavLink(Section::Reports).demo(), None);
    }
}
