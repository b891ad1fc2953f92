//! Achievement tracking for the current session.
//!
//! The tracker decides whether an unlock fires and which notification is on
//! screen. Scheduling the auto-dismiss is left to the caller: it hands in the
//! [`TimerId`] it scheduled and gets back any timer that is now stale.

use std::collections::BTreeSet;

use crate::model::Achievement;
use crate::timer::TimerId;

/// The notification currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub achievement: Achievement,
    /// The pending auto-dismiss, if one was scheduled.
    pub dismiss_timer: Option<TimerId>,
}

/// Which achievements this session has unlocked.
#[derive(Debug, Default)]
pub struct AchievementTracker {
    unlocked: BTreeSet<Achievement>,
    notification: Option<Notification>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `achievement`. Returns `true` only the first time.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        let fired = self.unlocked.insert(achievement);
        if fired {
            tracing::info!(achievement = achievement.key(), "achievement unlocked");
        }
        fired
    }

    /// String-keyed unlock for hosts. Unknown keys never fire.
    pub fn unlock_key(&mut self, key: &str) -> bool {
        match Achievement::from_key(key) {
            Some(achievement) => self.unlock(achievement),
            None => {
                tracing::debug!(key, "ignoring unknown achievement key");
                false
            }
        }
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Puts `achievement` on screen, replacing whatever was showing.
    ///
    /// Returns the replaced notification's dismiss timer, which the caller
    /// must cancel.
    pub fn show(
        &mut self,
        achievement: Achievement,
        dismiss_timer: Option<TimerId>,
    ) -> Option<TimerId> {
        let previous = self.notification.replace(Notification {
            achievement,
            dismiss_timer,
        });
        previous.and_then(|n| n.dismiss_timer)
    }

    /// Manual dismiss. Returns the pending timer to cancel, if any.
    pub fn dismiss(&mut self) -> Option<TimerId> {
        self.notification.take().and_then(|n| n.dismiss_timer)
    }

    /// Auto-dismiss. Only closes the notification that owns `timer`.
    pub fn expire(&mut self, timer: TimerId) -> bool {
        match self.notification {
            Some(n) if n.dismiss_timer == Some(timer) => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }
}
