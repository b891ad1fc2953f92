//! Achievement catalog: one-shot badges earned by trying features.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A one-shot achievement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    FirstClockIn,
    FirstSearch,
    ThemeSwitcher,
    LeaveRequester,
    ReportGenerator,
    OnboardingComplete,
}

/// Display data for an achievement notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub key: Achievement,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl Achievement {
    pub const ALL: [Self; 6] = [
        Self::FirstClockIn,
        Self::FirstSearch,
        Self::ThemeSwitcher,
        Self::LeaveRequester,
        Self::ReportGenerator,
        Self::OnboardingComplete,
    ];

    /// The stable string key, as hosts refer to it.
    pub fn key(self) -> &'static str {
        match self {
            Self::FirstClockIn => "first-clock-in",
            Self::FirstSearch => "first-search",
            Self::ThemeSwitcher => "theme-switcher",
            Self::LeaveRequester => "leave-requester",
            Self::ReportGenerator => "report-generator",
            Self::OnboardingComplete => "onboarding-complete",
        }
    }

    /// Looks up a key. Unknown keys have no definition.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn definition(self) -> AchievementDefinition {
        let (title, description, icon) = match self {
            Self::FirstClockIn => (
                "Time Tracker",
                "Successfully clocked in for the first time",
                "⏰",
            ),
            Self::FirstSearch => ("Search Master", "Used the global search feature", "🔍"),
            Self::ThemeSwitcher => (
                "Style Setter",
                "Switched between light and dark themes",
                "🎨",
            ),
            Self::LeaveRequester => (
                "Vacation Planner",
                "Submitted your first leave request",
                "🏖️",
            ),
            Self::ReportGenerator => ("Data Analyst", "Generated your first report", "📊"),
            Self::OnboardingComplete => (
                "TimeTracker Pro Expert",
                "Completed the full onboarding experience",
                "🎓",
            ),
        };
        AchievementDefinition {
            key: self,
            title,
            description,
            icon,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A trackable action performed somewhere in the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    ClockToggled,
    SearchPerformed,
    ThemeToggled,
    LeaveRequested,
    ReportGenerated,
}

impl Activity {
    /// The achievement this activity earns.
    pub fn achievement(self) -> Achievement {
        match self {
            Self::ClockToggled => Achievement::FirstClockIn,
            Self::SearchPerformed => Achievement::FirstSearch,
            Self::ThemeToggled => Achievement::ThemeSwitcher,
            Self::LeaveRequested => Achievement::LeaveRequester,
            Self::ReportGenerated => Achievement::ReportGenerator,
        }
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clock" => Ok(Self::ClockToggled),
            "search" => Ok(Self::SearchPerformed),
            "theme" => Ok(Self::ThemeToggled),
            "leave" => Ok(Self::LeaveRequested),
            "report" => Ok(Self::ReportGenerated),
            other => Err(format!(
                "unknown activity '{other}' (expected clock, search, theme, leave or report)"
            )),
        }
    }
}
