//! End-to-end onboarding sessions against the in-memory dashboard.

use std::time::Duration;

use tempfile::TempDir;

use punchclock::auth::{Auth, SAMPLE_PASSWORD};
use punchclock::dashboard::{AnchorLayout, Dashboard, Theme};
use punchclock::model::{Achievement, Anchor, Section, TooltipPosition, Viewport};
use punchclock::onboarding::{Input, Onboarding, Screen, ScreenView, Timing};
use punchclock::shortcuts::{Focus, Key, KeyPress};
use punchclock::storage::Storage;
use punchclock::tour::TourTransition;
use punchclock::wizard::WizardTransition;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn dashboard() -> Dashboard {
    Dashboard::new(AnchorLayout::standard(Viewport::new(1280.0, 800.0)))
}

/// Signs a sample employee in and runs the first-login check.
fn signed_in(storage: &Storage, email: &str) -> (Dashboard, Onboarding) {
    let auth = Auth::new(storage);
    auth.seed_sample_employees().unwrap();
    let session = auth.sign_in(email, SAMPLE_PASSWORD).unwrap();
    let mut dash = dashboard();
    dash.sign_in(session.profile.user_record());
    let mut flow = Onboarding::new(Timing::default());
    assert!(flow.check_first_time_login(&mut dash));
    (dash, flow)
}

fn to_tour(flow: &mut Onboarding, dash: &mut Dashboard) {
    flow.start(dash);
    for _ in 0..3 {
        flow.wizard_next(dash);
    }
    assert!(flow.complete_setup(dash));
}

#[test]
fn full_session_persists_completion() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "mike.davis@company.com");

    let ScreenView::Welcome { message } = flow.view().screen else {
        panic!("expected welcome");
    };
    assert_eq!(message, "Welcome to TimeTracker Pro, Mike!");

    for input in [
        Input::Start,
        Input::SetDepartment("Platform".into()),
        Input::Next,
        Input::SelectRole(punchclock::model::Role::Manager),
        Input::Next,
        Input::Next,
        Input::Next,
    ] {
        assert!(flow.dispatch(input, &mut dash));
    }
    assert_eq!(flow.screen(), Screen::Tour);

    // Walk every stop, running the demos where offered.
    while flow.screen() == Screen::Tour {
        if flow.try_feature(&mut dash).is_some() {
            flow.advance(ms(1500), &mut dash);
        } else {
            flow.tour_next(&mut dash);
        }
    }
    assert_eq!(flow.screen(), Screen::Help);
    assert!(dash.is_clocked_in());
    assert_eq!(dash.theme(), Theme::Dark);
    assert_eq!(dash.search(), "");

    assert!(flow.complete_onboarding(&mut dash));
    for achievement in [
        Achievement::FirstClockIn,
        Achievement::FirstSearch,
        Achievement::ThemeSwitcher,
        Achievement::OnboardingComplete,
    ] {
        assert!(flow.achievements().is_unlocked(achievement), "{achievement}");
    }

    let auth = Auth::new(&storage);
    let mut session = auth.sign_in("mike.davis@company.com", SAMPLE_PASSWORD).unwrap();
    let user = dash.sign_out().unwrap();
    assert!(session.save(&auth, &user).unwrap());

    let stored = auth.profile("mike.davis@company.com").unwrap().unwrap();
    assert!(!stored.is_first_login);
    assert_eq!(stored.department, "Platform");
    assert_eq!(stored.role, punchclock::model::Role::Manager);

    // Second sign-in: nothing to show.
    let mut dash = dashboard();
    dash.sign_in(stored.user_record());
    let mut flow = Onboarding::default();
    assert!(!flow.check_first_time_login(&mut dash));
}

#[test]
fn escape_leaves_onboarding_pending() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "lisa.chen@company.com");
    to_tour(&mut flow, &mut dash);

    flow.handle_key(KeyPress::plain(Key::Escape), Focus::Page, &mut dash);
    assert!(!flow.is_active());
    assert!(dash.user().unwrap().is_first_login);

    flow.check_first_time_login(&mut dash);
    assert_eq!(flow.screen(), Screen::Welcome);
}

#[test]
fn hidden_search_field_is_skipped() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "david.wilson@company.com");
    dash.layout_mut().hide(Anchor::GlobalSearch);
    to_tour(&mut flow, &mut dash);

    assert_eq!(flow.tour_next(&mut dash), TourTransition::Shown(1));
    assert_eq!(flow.tour_next(&mut dash), TourTransition::Shown(3));
    assert_eq!(flow.tour().highlighted(), Some(Anchor::ThemeToggle));
    assert_eq!(flow.tour_prev(&mut dash), TourTransition::Shown(1));
}

#[test]
fn nav_stops_place_tooltips_right_of_the_sidebar() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "john.smith@company.com");
    to_tour(&mut flow, &mut dash);
    for _ in 0..4 {
        flow.tour_next(&mut dash);
    }
    let ScreenView::Tour(stop) = flow.view().screen else {
        panic!("expected tour stop");
    };
    assert_eq!(stop.highlighted, Anchor::NavLink(Section::TimeTracking));
    assert_eq!(stop.position, TooltipPosition::Right);
    assert_eq!(stop.counter, "5 of 8");
    assert!(stop.tooltip.left >= 240.0);
}

#[test]
fn wizard_back_button_is_bounded() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "sarah.johnson@company.com");
    flow.start(&mut dash);
    assert_eq!(flow.wizard_prev(), WizardTransition::Rejected);
    assert_eq!(flow.state().current_wizard_step, 1);
}

#[test]
fn skip_welcome_shows_a_toast() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "john.smith@company.com");
    assert!(flow.dispatch(Input::Skip, &mut dash));
    assert_eq!(dash.notices().len(), 1);
    assert!(dash.user().unwrap().is_first_login);
}

#[test]
fn view_serializes_for_renderers() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    let (mut dash, mut flow) = signed_in(&storage, "john.smith@company.com");
    to_tour(&mut flow, &mut dash);
    flow.tour_next(&mut dash);
    flow.try_feature(&mut dash);

    let json = serde_json::to_value(flow.view()).unwrap();
    assert_eq!(json["isActive"], true);
    assert_eq!(json["screen"]["kind"], "tour");
    assert_eq!(json["screen"]["highlighted"], "clock-toggle");
    assert_eq!(json["notification"]["key"], "first-clock-in");
}
