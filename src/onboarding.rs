//! Onboarding orchestrator.
//!
//! Sequences the first-login experience:
//!
//! ```text
//! Dormant ──first login──▶ Welcome ──start──▶ Wizard ──complete──▶ Tour ──finish/skip──▶ Help ──complete──▶ Dormant
//!                             │                                                              ▲
//!                             └──skip──▶ Dormant          help menu / `?` from anywhere ─────┘
//! ```
//!
//! `Escape` from any screen abandons to `Dormant` and leaves the user's
//! first-login flag alone, so the next sign-in starts over at Welcome.
//! Achievement notifications are a side channel that can be on screen
//! alongside any state.
//!
//! The orchestrator owns all per-session onboarding state. The host is passed
//! into every call that needs it; nothing here is global.

mod host;
mod view;

use std::time::Duration;

use crate::achievements::AchievementTracker;
use crate::model::{Achievement, Activity, Demo, Role};
use crate::shortcuts::{self, BINDINGS, Focus, KeyPress, Shortcut};
use crate::timer::{TimerId, TimerScope, Timers};
use crate::tour::{GuidedTour, TourTransition};
use crate::wizard::{Preference, SetupWizard, WizardTransition};

pub use host::{Host, NoticeLevel};
pub use view::{HelpView, OnboardingState, OnboardingView, ScreenView};

/// Text typed into the search field by the search demo.
pub const SEARCH_DEMO_TEXT: &str = "Search demo";

const SKIP_NOTICE: &str = "You can access onboarding help anytime from the user menu";

/// Which onboarding screen owns the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dormant,
    Welcome,
    Wizard,
    Tour,
    Help,
}

/// Delays used to pace the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long an achievement notification stays up.
    pub notification: Duration,
    /// How long the search demo text stays in the field.
    pub search_demo: Duration,
    /// Pause after a "try it" demo before the tour moves on.
    pub try_advance: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            notification: Duration::from_millis(3000),
            search_demo: Duration::from_millis(1000),
            try_advance: Duration::from_millis(1500),
        }
    }
}

/// Deferred work, fired by [`Onboarding::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    DismissNotification,
    ClearSearchDemo,
    AdvanceTour,
}

/// A user action, for hosts that route input generically.
///
/// `Next`, `Prev`, `Skip` and `Complete` apply to whichever screen is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Skip,
    Next,
    Prev,
    Complete,
    TryFeature,
    SelectRole(Role),
    SetName(String),
    SetDepartment(String),
    TogglePreference(Preference),
    ToggleShortcuts,
    ShowHelp,
    DismissNotification,
    Key(KeyPress, Focus),
    Activity(Activity),
    Wait(Duration),
}

#[derive(Debug)]
pub struct Onboarding {
    timing: Timing,
    screen: Screen,
    welcome_message: String,
    wizard: SetupWizard,
    tour: GuidedTour,
    achievements: AchievementTracker,
    timers: Timers<TimerAction>,
    search_demo: Option<TimerId>,
    shortcuts_visible: bool,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Onboarding {
    pub fn new(timing: Timing) -> Self {
        Self::with_tour(timing, GuidedTour::default())
    }

    /// Uses a custom tour in place of the standard script.
    pub fn with_tour(timing: Timing, tour: GuidedTour) -> Self {
        Self {
            timing,
            screen: Screen::Dormant,
            welcome_message: String::new(),
            wizard: SetupWizard::default(),
            tour,
            achievements: AchievementTracker::new(),
            timers: Timers::new(),
            search_demo: None,
            shortcuts_visible: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Whether the overlay is up and owns input.
    pub fn is_active(&self) -> bool {
        self.screen != Screen::Dormant
    }

    pub fn wizard(&self) -> &SetupWizard {
        &self.wizard
    }

    pub fn tour(&self) -> &GuidedTour {
        &self.tour
    }

    pub fn achievements(&self) -> &AchievementTracker {
        &self.achievements
    }

    /// Number of timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Discards all session state, as on sign-out.
    pub fn reset(&mut self) {
        *self = Self::with_tour(self.timing, GuidedTour::new(self.tour.stops().to_vec()));
    }

    // ── Entry points for the host ──

    /// Call once after sign-in. Opens the welcome screen for first-login users.
    pub fn check_first_time_login(&mut self, host: &mut impl Host) -> bool {
        if !host.current_user().is_some_and(|u| u.is_first_login) {
            return false;
        }
        self.show_welcome(host);
        true
    }

    /// Records a tracked action. Returns `true` if it unlocked something new.
    pub fn check_achievement(&mut self, key: &str) -> bool {
        match Achievement::from_key(key) {
            Some(achievement) => self.unlock(achievement),
            None => self.achievements.unlock_key(key),
        }
    }

    pub fn record(&mut self, activity: Activity) -> bool {
        self.unlock(activity.achievement())
    }

    /// Opens the help center from wherever the flow is.
    pub fn show_help_center(&mut self, host: &mut impl Host) {
        self.shortcuts_visible = false;
        self.enter(Screen::Help, host);
    }

    // ── Welcome ──

    pub fn show_welcome(&mut self, host: &mut impl Host) {
        self.welcome_message = welcome_message(&*host);
        self.enter(Screen::Welcome, host);
    }

    pub fn start(&mut self, host: &mut impl Host) -> bool {
        if self.screen != Screen::Welcome {
            return false;
        }
        self.wizard = SetupWizard::new(host.current_user());
        self.enter(Screen::Wizard, host);
        true
    }

    pub fn skip_welcome(&mut self, host: &mut impl Host) -> bool {
        if self.screen != Screen::Welcome {
            return false;
        }
        self.enter(Screen::Dormant, host);
        tracing::info!("onboarding skipped");
        host.notify(SKIP_NOTICE, NoticeLevel::Info);
        true
    }

    // ── Wizard ──

    /// Moves the wizard forward. On the last step this completes it instead.
    pub fn wizard_next(&mut self, host: &mut impl Host) -> WizardTransition {
        if self.screen != Screen::Wizard {
            return WizardTransition::Rejected;
        }
        let transition = self.wizard.next();
        match transition {
            WizardTransition::Moved(step) => tracing::debug!(step = step.number(), "wizard step"),
            WizardTransition::ReadyToComplete => {
                self.complete_setup(host);
            }
            WizardTransition::Rejected => {}
        }
        transition
    }

    pub fn wizard_prev(&mut self) -> WizardTransition {
        if self.screen != Screen::Wizard {
            return WizardTransition::Rejected;
        }
        let transition = self.wizard.prev();
        if let WizardTransition::Moved(step) = transition {
            tracing::debug!(step = step.number(), "wizard step");
        }
        transition
    }

    /// Picks a role card and writes it straight to the user.
    pub fn select_role(&mut self, role: Role, host: &mut impl Host) -> bool {
        if self.screen != Screen::Wizard {
            return false;
        }
        self.wizard.select_role(role);
        if let Some(user) = host.current_user_mut() {
            user.role = role;
        }
        true
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        if self.screen != Screen::Wizard {
            return false;
        }
        self.wizard.set_name(name);
        true
    }

    pub fn set_department(&mut self, department: &str) -> bool {
        if self.screen != Screen::Wizard {
            return false;
        }
        self.wizard.set_department(department);
        true
    }

    pub fn toggle_preference(&mut self, preference: Preference) -> bool {
        if self.screen != Screen::Wizard {
            return false;
        }
        self.wizard.toggle_preference(preference);
        true
    }

    /// Finishes the wizard and starts the tour. Only from the last step.
    pub fn complete_setup(&mut self, host: &mut impl Host) -> bool {
        if self.screen != Screen::Wizard || !self.wizard.is_last_step() {
            return false;
        }
        if let Some(user) = host.current_user_mut() {
            self.wizard.apply_to(user);
        }
        self.enter(Screen::Tour, host);
        let transition = self.tour.start(&*host);
        self.after_tour_move(transition, host);
        true
    }

    // ── Tour ──

    pub fn tour_next(&mut self, host: &mut impl Host) -> TourTransition {
        if self.screen != Screen::Tour {
            return TourTransition::Rejected;
        }
        self.timers.cancel_scope(TimerScope::TourStop);
        let transition = self.tour.next(&*host);
        self.after_tour_move(transition, host);
        transition
    }

    pub fn tour_prev(&mut self, host: &mut impl Host) -> TourTransition {
        if self.screen != Screen::Tour {
            return TourTransition::Rejected;
        }
        let transition = self.tour.prev(&*host);
        if transition != TourTransition::Rejected {
            self.timers.cancel_scope(TimerScope::TourStop);
        }
        self.after_tour_move(transition, host);
        transition
    }

    pub fn skip_tour(&mut self, host: &mut impl Host) -> bool {
        if self.screen != Screen::Tour {
            return false;
        }
        let transition = self.tour.skip();
        self.after_tour_move(transition, host);
        true
    }

    /// Runs the current stop's demo, then moves on after a pause.
    pub fn try_feature(&mut self, host: &mut impl Host) -> Option<Demo> {
        if self.screen != Screen::Tour {
            return None;
        }
        let demo = self.tour.try_feature()?;
        tracing::debug!(?demo, "running tour demo");
        match demo {
            Demo::Clock => {
                host.toggle_clock();
                self.unlock(demo.achievement());
            }
            Demo::Search => {
                host.focus_search(SEARCH_DEMO_TEXT);
                let id = self.timers.schedule(
                    TimerScope::Tour,
                    self.timing.search_demo,
                    TimerAction::ClearSearchDemo,
                );
                self.search_demo = Some(id);
            }
            Demo::Theme => {
                host.toggle_theme();
                self.unlock(demo.achievement());
            }
        }
        self.timers.schedule(
            TimerScope::TourStop,
            self.timing.try_advance,
            TimerAction::AdvanceTour,
        );
        Some(demo)
    }

    fn after_tour_move(&mut self, transition: TourTransition, host: &mut impl Host) {
        if transition == TourTransition::Finished {
            tracing::debug!("tour finished");
            self.show_help_center(host);
        }
    }

    // ── Help ──

    pub fn toggle_shortcuts(&mut self) -> bool {
        if self.screen != Screen::Help {
            return false;
        }
        self.shortcuts_visible = !self.shortcuts_visible;
        true
    }

    /// Closes the help center for good: clears the first-login flag.
    pub fn complete_onboarding(&mut self, host: &mut impl Host) -> bool {
        if self.screen != Screen::Help {
            return false;
        }
        self.enter(Screen::Dormant, host);
        host.clear_first_login();
        tracing::info!("onboarding complete");
        self.unlock(Achievement::OnboardingComplete);
        true
    }

    // ── Overlay ──

    /// Closes the overlay and any notification. Returns whether anything closed.
    pub fn close_overlay(&mut self, host: &mut impl Host) -> bool {
        let was_active = self.is_active();
        if was_active {
            tracing::debug!(from = ?self.screen, "onboarding abandoned");
            self.enter(Screen::Dormant, host);
        }
        self.dismiss_notification() || was_active
    }

    pub fn dismiss_notification(&mut self) -> bool {
        if self.achievements.notification().is_none() {
            return false;
        }
        if let Some(timer) = self.achievements.dismiss() {
            self.timers.cancel(timer);
        }
        true
    }

    // ── Input ──

    /// Applies a bound key. Returns the shortcut that ran, if any.
    pub fn handle_key(
        &mut self,
        press: KeyPress,
        focus: Focus,
        host: &mut impl Host,
    ) -> Option<Shortcut> {
        let shortcut = shortcuts::resolve(press, focus)?;
        match shortcut {
            Shortcut::ToggleClock => {
                host.toggle_clock();
                self.unlock(Achievement::FirstClockIn);
            }
            Shortcut::Navigate(section) => host.navigate_to(section),
            Shortcut::ShowHelp => self.show_help_center(host),
            Shortcut::Dismiss => {
                self.close_overlay(host);
            }
        }
        Some(shortcut)
    }

    /// Routes a generic input to the matching operation.
    ///
    /// Returns `false` when the input does not apply to the current screen.
    pub fn dispatch(&mut self, input: Input, host: &mut impl Host) -> bool {
        match input {
            Input::Start => self.start(host),
            Input::Skip => match self.screen {
                Screen::Welcome => self.skip_welcome(host),
                Screen::Tour => self.skip_tour(host),
                _ => false,
            },
            Input::Next => match self.screen {
                Screen::Wizard => self.wizard_next(host) != WizardTransition::Rejected,
                Screen::Tour => self.tour_next(host) != TourTransition::Rejected,
                _ => false,
            },
            Input::Prev => match self.screen {
                Screen::Wizard => self.wizard_prev() != WizardTransition::Rejected,
                Screen::Tour => self.tour_prev(host) != TourTransition::Rejected,
                _ => false,
            },
            Input::Complete => match self.screen {
                Screen::Wizard => self.complete_setup(host),
                Screen::Help => self.complete_onboarding(host),
                _ => false,
            },
            Input::TryFeature => self.try_feature(host).is_some(),
            Input::SelectRole(role) => self.select_role(role, host),
            Input::SetName(name) => self.set_name(&name),
            Input::SetDepartment(department) => self.set_department(&department),
            Input::TogglePreference(preference) => self.toggle_preference(preference),
            Input::ToggleShortcuts => self.toggle_shortcuts(),
            Input::ShowHelp => {
                self.show_help_center(host);
                true
            }
            Input::DismissNotification => self.dismiss_notification(),
            Input::Key(press, focus) => self.handle_key(press, focus, host).is_some(),
            Input::Activity(activity) => {
                self.record(activity);
                true
            }
            Input::Wait(delta) => {
                self.advance(delta, host);
                true
            }
        }
    }

    /// Moves the clock forward, firing whatever comes due on the way.
    pub fn advance(&mut self, delta: Duration, host: &mut impl Host) {
        let until = self.timers.now().saturating_add(delta);
        while let Some((id, action)) = self.timers.pop_due(until) {
            self.fire(id, action, host);
        }
        self.timers.settle(until);
    }

    fn fire(&mut self, id: TimerId, action: TimerAction, host: &mut impl Host) {
        match action {
            TimerAction::DismissNotification => {
                self.achievements.expire(id);
            }
            TimerAction::ClearSearchDemo => {
                self.search_demo = None;
                host.clear_search();
                self.unlock(Achievement::FirstSearch);
            }
            TimerAction::AdvanceTour => {
                self.tour_next(host);
            }
        }
    }

    // ── Views ──

    pub fn view(&self) -> OnboardingView {
        let screen = match self.screen {
            Screen::Dormant => ScreenView::Dormant,
            Screen::Welcome => ScreenView::Welcome {
                message: self.welcome_message.clone(),
            },
            Screen::Wizard => ScreenView::Wizard(self.wizard.view()),
            // The tour screen is only entered with a stop on show.
            Screen::Tour => self
                .tour
                .current()
                .cloned()
                .map_or(ScreenView::Dormant, ScreenView::Tour),
            Screen::Help => ScreenView::Help(HelpView {
                shortcuts_visible: self.shortcuts_visible,
                shortcuts: BINDINGS.to_vec(),
            }),
        };
        OnboardingView {
            is_active: self.is_active(),
            screen,
            notification: self
                .achievements
                .notification()
                .map(|n| n.achievement.definition()),
        }
    }

    pub fn state(&self) -> OnboardingState {
        OnboardingState {
            current_wizard_step: self.wizard.step().number(),
            current_tour_index: self.tour.index(),
            unlocked_achievements: self.achievements.unlocked().collect(),
            is_active: self.is_active(),
        }
    }

    // ── Internals ──

    /// Switches screens, tearing down whatever the old screen owned.
    fn enter(&mut self, screen: Screen, host: &mut impl Host) {
        if self.screen == Screen::Tour && screen != Screen::Tour {
            self.leave_tour(screen, host);
        }
        if self.screen != screen {
            tracing::debug!(from = ?self.screen, to = ?screen, "onboarding screen");
        }
        self.screen = screen;
    }

    /// Tears down the tour. A search demo cut short still counts unless the
    /// tour is being abandoned.
    fn leave_tour(&mut self, to: Screen, host: &mut impl Host) {
        self.tour.clear_highlight();
        self.timers.cancel_scope(TimerScope::TourStop);
        if let Some(id) = self.search_demo.take()
            && self.timers.cancel(id)
        {
            host.clear_search();
            if to != Screen::Dormant {
                self.unlock(Achievement::FirstSearch);
            }
        }
        self.timers.cancel_scope(TimerScope::Tour);
    }

    fn unlock(&mut self, achievement: Achievement) -> bool {
        if !self.achievements.unlock(achievement) {
            return false;
        }
        let timer = self.timers.schedule(
            TimerScope::Notification,
            self.timing.notification,
            TimerAction::DismissNotification,
        );
        if let Some(stale) = self.achievements.show(achievement, Some(timer)) {
            self.timers.cancel(stale);
        }
        true
    }
}

/// Greeting for the welcome screen, personalised by role.
fn welcome_message(host: &impl Host) -> String {
    let Some(user) = host.current_user() else {
        return "Welcome to TimeTracker Pro!".to_string();
    };
    let name = user.first_name();
    if name.is_empty() {
        return "Welcome to TimeTracker Pro!".to_string();
    }
    match user.role {
        Role::Admin => format!("Welcome back, Administrator {name}!"),
        Role::Manager => format!("Welcome, Manager {name}!"),
        Role::Employee => format!("Welcome to TimeTracker Pro, {name}!"),
    }
}
