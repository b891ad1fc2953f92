//! Read-only snapshots of the onboarding flow for renderers.

use serde::Serialize;

use crate::model::{Achievement, AchievementDefinition};
use crate::shortcuts::Binding;
use crate::tour::StopView;
use crate::wizard::WizardView;

/// What the overlay shows, plus the achievement side channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingView {
    pub is_active: bool,
    pub screen: ScreenView,
    pub notification: Option<AchievementDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScreenView {
    Dormant,
    Welcome { message: String },
    Wizard(WizardView),
    Tour(StopView),
    Help(HelpView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpView {
    pub shortcuts_visible: bool,
    pub shortcuts: Vec<Binding>,
}

/// The per-session onboarding state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub current_wizard_step: u8,
    pub current_tour_index: usize,
    pub unlocked_achievements: Vec<Achievement>,
    pub is_active: bool,
}
