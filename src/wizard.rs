//! Setup wizard: four linear steps between the welcome screen and the tour.

use std::str::FromStr;

use serde::Serialize;

use crate::model::{Role, UserRecord};

/// Number of wizard steps.
pub const TOTAL_STEPS: u8 = 4;

/// A wizard step. The discriminant is the 1-based step number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    /// Confirm name and department.
    Profile = 1,
    /// Pick a role card.
    Role = 2,
    /// Notification and display preferences.
    Preferences = 3,
    /// Review before starting the tour.
    Review = 4,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Profile),
            2 => Some(Self::Role),
            3 => Some(Self::Preferences),
            4 => Some(Self::Review),
            _ => None,
        }
    }
}

/// Result of a `next`/`prev` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTransition {
    /// The wizard moved to this step.
    Moved(WizardStep),
    /// Already on the last step; the caller should complete the wizard.
    ReadyToComplete,
    /// Not allowed from here; nothing changed.
    Rejected,
}

/// A toggle on the preferences step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    EmailNotifications,
    DarkTheme,
    WeeklySummary,
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email-notifications" | "notifications" => Ok(Self::EmailNotifications),
            "dark-theme" | "dark" => Ok(Self::DarkTheme),
            "weekly-summary" | "summary" => Ok(Self::WeeklySummary),
            other => Err(format!(
                "unknown preference '{other}' (expected notifications, dark or summary)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub email_notifications: bool,
    pub dark_theme: bool,
    pub weekly_summary: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            dark_theme: false,
            weekly_summary: true,
        }
    }
}

impl Preferences {
    fn toggle(&mut self, preference: Preference) -> bool {
        let slot = match preference {
            Preference::EmailNotifications => &mut self.email_notifications,
            Preference::DarkTheme => &mut self.dark_theme,
            Preference::WeeklySummary => &mut self.weekly_summary,
        };
        *slot = !*slot;
        *slot
    }
}

/// What the wizard renders for its current step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: u8,
    pub total_steps: u8,
    pub counter: String,
    pub progress_percent: f64,
    pub show_prev: bool,
    pub show_next: bool,
    pub show_complete: bool,
    pub name: String,
    pub department: String,
    pub selected_role: Option<Role>,
    pub preferences: Preferences,
}

/// The wizard's state: the active step plus the form being filled in.
#[derive(Debug, Clone)]
pub struct SetupWizard {
    step: WizardStep,
    name: String,
    department: String,
    selected_role: Option<Role>,
    preferences: Preferences,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SetupWizard {
    /// Starts at step 1, pre-filled from `user` when there is one.
    pub fn new(user: Option<&UserRecord>) -> Self {
        Self {
            step: WizardStep::Profile,
            name: user.map(|u| u.name.clone()).unwrap_or_default(),
            department: user.map(|u| u.department.clone()).unwrap_or_default(),
            selected_role: None,
            preferences: Preferences::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_last_step(&self) -> bool {
        self.step.number() == TOTAL_STEPS
    }

    pub fn next(&mut self) -> WizardTransition {
        match WizardStep::from_number(self.step.number() + 1) {
            Some(step) => {
                self.step = step;
                WizardTransition::Moved(step)
            }
            None => WizardTransition::ReadyToComplete,
        }
    }

    pub fn prev(&mut self) -> WizardTransition {
        match self
            .step
            .number()
            .checked_sub(1)
            .and_then(WizardStep::from_number)
        {
            Some(step) => {
                self.step = step;
                WizardTransition::Moved(step)
            }
            None => WizardTransition::Rejected,
        }
    }

    /// Marks `role` as the selected card. Returns `false` if it already was.
    pub fn select_role(&mut self, role: Role) -> bool {
        self.selected_role.replace(role) != Some(role)
    }

    pub fn selected_role(&self) -> Option<Role> {
        self.selected_role
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
    }

    /// Flips a preference, returning its new value.
    pub fn toggle_preference(&mut self, preference: Preference) -> bool {
        self.preferences.toggle(preference)
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Writes the confirmed name and department onto `user`.
    ///
    /// Blank fields leave the existing value alone.
    pub fn apply_to(&self, user: &mut UserRecord) {
        if !self.name.trim().is_empty() {
            user.name = self.name.trim().to_string();
        }
        if !self.department.trim().is_empty() {
            user.department = self.department.trim().to_string();
        }
        if let Some(role) = self.selected_role {
            user.role = role;
        }
    }

    pub fn view(&self) -> WizardView {
        let n = self.step.number();
        let last = n == TOTAL_STEPS;
        WizardView {
            step: self.step,
            step_number: n,
            total_steps: TOTAL_STEPS,
            counter: format!("Step {n} of {TOTAL_STEPS}"),
            progress_percent: f64::from(n) / f64::from(TOTAL_STEPS) * 100.0,
            show_prev: n > 1,
            show_next: !last,
            show_complete: last,
            name: self.name.clone(),
            department: self.department.clone(),
            selected_role: self.selected_role,
            preferences: self.preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn sample_user() -> UserRecord {
        UserRecord {
            name: "Sarah Johnson".into(),
            role: Role::Manager,
            department: "HR".into(),
            is_first_login: true,
        }
    }

    #[test]
    fn starts_on_step_one_prefilled() {
        let wizard = SetupWizard::new(Some(&sample_user()));
        let view = wizard.view();
        assert_eq!(view.step_number, 1);
        assert_eq!(view.counter, "Step 1 of 4");
        assert_eq!(view.name, "Sarah Johnson");
        assert_eq!(view.department, "HR");
        assert!(!view.show_prev);
        assert!(view.show_next);
        assert!(!view.show_complete);
    }

    #[test]
    fn without_a_user_the_form_is_blank() {
        let view = SetupWizard::new(None).view();
        assert!(view.name.is_empty());
        assert!(view.department.is_empty());
    }

    #[test]
    fn walks_forward_to_review() {
        let mut wizard = SetupWizard::default();
        assert_eq!(wizard.next(), WizardTransition::Moved(WizardStep::Role));
        assert_eq!(wizard.next(), WizardTransition::Moved(WizardStep::Preferences));
        assert_eq!(wizard.next(), WizardTransition::Moved(WizardStep::Review));

        let view = wizard.view();
        assert_eq!(view.progress_percent, 100.0);
        assert!(view.show_prev);
        assert!(!view.show_next);
        assert!(view.show_complete);
    }

    #[test]
    fn next_on_last_step_signals_completion_without_moving() {
        let mut wizard = SetupWizard::default();
        for _ in 0..3 {
            wizard.next();
        }
        assert_eq!(wizard.next(), WizardTransition::ReadyToComplete);
        assert_eq!(wizard.step(), WizardStep::Review);
    }

    #[test]
    fn prev_on_first_step_is_rejected() {
        let mut wizard = SetupWizard::default();
        assert_eq!(wizard.prev(), WizardTransition::Rejected);
        assert_eq!(wizard.step(), WizardStep::Profile);
    }

    #[test]
    fn role_selection_is_exclusive_and_keeps_the_step() {
        let mut wizard = SetupWizard::default();
        wizard.next();
        assert!(wizard.select_role(Role::Admin));
        assert!(!wizard.select_role(Role::Admin));
        assert!(wizard.select_role(Role::Employee));
        assert_eq!(wizard.selected_role(), Some(Role::Employee));
        assert_eq!(wizard.step(), WizardStep::Role);
    }

    #[test]
    fn apply_keeps_existing_values_for_blank_fields() {
        let mut wizard = SetupWizard::new(Some(&sample_user()));
        wizard.set_name("  ");
        wizard.set_department("People Ops");
        let mut user = sample_user();
        wizard.apply_to(&mut user);
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(user.department, "People Ops");
    }

    #[test]
    fn preferences_toggle() {
        let mut wizard = SetupWizard::default();
        assert!(wizard.toggle_preference(Preference::DarkTheme));
        assert!(!wizard.toggle_preference(Preference::EmailNotifications));
        assert!(wizard.preferences().dark_theme);
        assert!(!wizard.preferences().email_notifications);
    }

    #[derive(Debug, Clone, Copy)]
    enum Move {
        Next,
        Prev,
    }

    proptest! {
        #[test]
        fn step_always_in_range(moves in prop::collection::vec(
            prop_oneof![Just(Move::Next), Just(Move::Prev)], 0..64,
        )) {
            let mut wizard = SetupWizard::default();
            for m in moves {
                let before = wizard.step().number();
                let transition = match m {
                    Move::Next => wizard.next(),
                    Move::Prev => wizard.prev(),
                };
                let after = wizard.step().number();
                prop_assert!((1..=TOTAL_STEPS).contains(&after));
                match transition {
                    WizardTransition::Moved(step) => prop_assert_eq!(step.number(), after),
                    WizardTransition::ReadyToComplete | WizardTransition::Rejected => {
                        prop_assert_eq!(before, after);
                    }
                }
                let view = wizard.view();
                prop_assert_eq!(view.show_prev, after > 1);
                prop_assert_eq!(view.show_complete, after == TOTAL_STEPS);
                prop_assert_eq!(view.show_next, !view.show_complete);
            }
        }
    }
}
