//! The guided tour script.

use serde::Serialize;

use super::achievement::Achievement;
use super::anchor::{Anchor, Section};

/// Where the tooltip card sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TooltipPosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// A "try it" demo run from an interactive tour stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Demo {
    /// Toggle the clock.
    Clock,
    /// Type into the search field, then clear it.
    Search,
    /// Flip the theme.
    Theme,
}

impl Demo {
    /// The achievement earned once the demo has run.
    pub fn achievement(self) -> Achievement {
        match self {
            Self::Clock => Achievement::FirstClockIn,
            Self::Search => Achievement::FirstSearch,
            Self::Theme => Achievement::ThemeSwitcher,
        }
    }
}

/// One stop of the guided tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TourStop {
    pub target: Anchor,
    pub title: &'static str,
    pub description: &'static str,
    pub position: TooltipPosition,
}

impl TourStop {
    pub fn demo(&self) -> Option<Demo> {
        self.target.demo()
    }

    pub fn is_interactive(&self) -> bool {
        self.demo().is_some()
    }
}

/// The stops of the first-login tour, in order.
pub const TOUR_SCRIPT: [TourStop; 8] = [
    TourStop {
        target: Anchor::Dashboard,
        title: "Your Dashboard",
        description: "Your central hub showing today's status, weekly hours, and important notifications at a glance.",
        position: TooltipPosition::Bottom,
    },
    TourStop {
        target: Anchor::ClockToggle,
        title: "Clock In/Out",
        description: "Easily track your work hours with our one-click clock in and out system.",
        position: TooltipPosition::Top,
    },
    TourStop {
        target: Anchor::GlobalSearch,
        title: "Global Search",
        description: "Quickly find employees, projects, reports, and more using our powerful search feature.",
        position: TooltipPosition::Bottom,
    },
    TourStop {
        target: Anchor::ThemeToggle,
        title: "Theme Toggle",
        description: "Switch between light and dark modes to match your preference and lighting conditions.",
        position: TooltipPosition::Bottom,
    },
    TourStop {
        target: Anchor::NavLink(Section::TimeTracking),
        title: "Time Tracking",
        description: "View your timesheets, track project hours, and manage your work schedule.",
        position: TooltipPosition::Right,
    },
    TourStop {
        target: Anchor::NavLink(Section::Attendance),
        title: "Attendance & Leave",
        description: "Request time off, view your attendance history, and check your leave balance.",
        position: TooltipPosition::Right,
    },
    TourStop {
        target: Anchor::NavLink(Section::Reports),
        title: "Reports",
        description: "Generate detailed reports on your work hours, productivity, and attendance patterns.",
        position: TooltipPosition::Right,
    },
    TourStop {
        target: Anchor::NavLink(Section::Team),
        title: "Team Overview",
        description: "View team status, collaborate on projects, and stay connected with colleagues.",
        position: TooltipPosition::Right,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_has_three_interactive_stops() {
        let interactive: Vec<Demo> = TOUR_SCRIPT.iter().filter_map(TourStop::demo).collect();
        assert_eq!(interactive, vec![Demo::Clock, Demo::Search, Demo::Theme]);
    }

    #[test]
    fn demos_earn_their_achievements() {
        assert_eq!(Demo::Clock.achievement(), Achievement::FirstClockIn);
        assert_eq!(Demo::Search.achievement(), Achievement::FirstSearch);
        assert_eq!(Demo::Theme.achievement(), Achievement::ThemeSwitcher);
    }
}
