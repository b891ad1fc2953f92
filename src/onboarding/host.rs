//! The host application, as the onboarding flow sees it.

use crate::model::{Section, UserRecord};
use crate::tour::AnchorLocator;

/// Severity of a toast notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Hooks the onboarding flow calls back into.
///
/// The host owns the signed-in user and every piece of dashboard state; the
/// flow only asks it to act.
pub trait Host: AnchorLocator {
    fn current_user(&self) -> Option<&UserRecord>;

    fn current_user_mut(&mut self) -> Option<&mut UserRecord>;

    /// Persists that the user has finished onboarding.
    fn clear_first_login(&mut self) {
        if let Some(user) = self.current_user_mut() {
            user.is_first_login = false;
        }
    }

    fn toggle_clock(&mut self);

    fn navigate_to(&mut self, section: Section);

    /// Focuses the search field and fills it with `text`.
    fn focus_search(&mut self, text: &str);

    fn clear_search(&mut self);

    fn toggle_theme(&mut self);

    /// Shows a toast.
    fn notify(&mut self, message: &str, level: NoticeLevel);
}
