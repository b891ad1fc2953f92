//! CLI interface for punchclock.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//! `onboard` replays a scripted session against an in-memory dashboard and
//! prints the resulting view as JSON, so the whole first-login flow can be
//! exercised from a shell.

mod format;
mod script;

use clap::{Parser, Subcommand};
use serde::Serialize;

use punchclock::auth::{Auth, SignUpData};
use punchclock::config::Config;
use punchclock::dashboard::{AnchorLayout, Dashboard, DashboardSnapshot};
use punchclock::model::{Anchor, Role, TOUR_SCRIPT};
use punchclock::onboarding::{Input, Onboarding, OnboardingState, OnboardingView, Screen};
use punchclock::storage::Storage;

use format::{format_profile_line, format_screen, format_tour_stop};
use script::Event;

/// Punchclock: first-login onboarding for the time-tracking dashboard.
#[derive(Debug, Parser)]
#[command(name = "punchclock", after_long_help = SCRIPT_HELP)]
pub struct Cli {
    /// Log flow transitions to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const SCRIPT_HELP: &str = r"Onboarding scripts:
  punchclock onboard mike.davis@company.com start next role=manager next next complete
  punchclock onboard lisa.chen@company.com --hide global-search start finish
  punchclock onboard sarah.johnson@company.com --trace start next next next complete next try wait=1500

Events:
  start skip next prev complete try finish help shortcuts dismiss escape
  role=<r> name=<n> department=<d> pref=<p> key=<k> field-key=<k>
  activity=<a> wait=<ms>";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List profiles and whether they still have onboarding ahead.
    Users,

    /// Create an account.
    Signup {
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        role: Option<Role>,
    },

    /// Sign in and replay onboarding events.
    ///
    /// Prints the final view, onboarding state and dashboard as JSON.
    /// Profile edits made during the session are saved.
    Onboard {
        email: String,

        #[arg(long, default_value = punchclock::auth::SAMPLE_PASSWORD)]
        password: String,

        /// Anchors to leave off screen (e.g. `global-search`, `nav:reports`).
        #[arg(long)]
        hide: Vec<Anchor>,

        /// Print the view after every event, one JSON object per line.
        #[arg(long)]
        trace: bool,

        /// Events to replay, in order.
        events: Vec<Event>,
    },

    /// Inspect or reset a stored profile.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Print the guided tour script.
    Tour,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Print a profile as JSON.
    Show { email: String },

    /// Set the first-login flag again so onboarding runs on next sign-in.
    Reset { email: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceLine<'a> {
    event: &'a str,
    applied: bool,
    view: OnboardingView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    view: OnboardingView,
    state: OnboardingState,
    dashboard: DashboardSnapshot,
    profile_saved: bool,
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config, storage: &Storage) -> Result<(), String> {
    let auth = Auth::new(storage);
    auth.seed_sample_employees()
        .map_err(|e| format!("failed to seed sample employees: {e}"))?;

    match cli.command {
        Command::Users => cmd_users(&auth),
        Command::Signup {
            email,
            password,
            name,
            department,
            role,
        } => {
            let data = SignUpData {
                name,
                department,
                role,
            };
            let profile = auth
                .sign_up(&email, &password, &data)
                .map_err(|e| format!("sign-up failed: {e}"))?;
            println!("{}", profile.id);
            Ok(())
        }
        Command::Onboard {
            email,
            password,
            hide,
            trace,
            events,
        } => cmd_onboard(config, &auth, &email, &password, &hide, trace, &events),
        Command::Profile { command } => match command {
            ProfileCommand::Show { email } => {
                let profile = require_profile(&auth, &email)?;
                print_json(&profile)
            }
            ProfileCommand::Reset { email } => {
                let mut profile = require_profile(&auth, &email)?;
                profile.is_first_login = true;
                auth.update_profile(&mut profile)
                    .map_err(|e| format!("failed to update profile: {e}"))?;
                eprintln!("Onboarding will run on {email}'s next sign-in");
                Ok(())
            }
        },
        Command::Tour => {
            for (i, stop) in TOUR_SCRIPT.iter().enumerate() {
                println!("{}", format_tour_stop(i, stop));
            }
            Ok(())
        }
    }
}

fn cmd_users(auth: &Auth<'_>) -> Result<(), String> {
    let profiles = auth
        .profiles()
        .map_err(|e| format!("failed to list profiles: {e}"))?;
    if profiles.is_empty() {
        println!("No users");
        return Ok(());
    }
    for profile in &profiles {
        println!("{}", format_profile_line(profile));
    }
    Ok(())
}

fn cmd_onboard(
    config: &Config,
    auth: &Auth<'_>,
    email: &str,
    password: &str,
    hide: &[Anchor],
    trace: bool,
    events: &[Event],
) -> Result<(), String> {
    let mut session = auth
        .sign_in(email, password)
        .map_err(|e| format!("sign-in failed: {e}"))?;

    let mut layout = AnchorLayout::standard(config.viewport());
    for anchor in hide {
        if !layout.hide(*anchor) {
            tracing::warn!(%anchor, "anchor already hidden");
        }
    }
    let mut dashboard = Dashboard::new(layout);
    dashboard.sign_in(session.profile.user_record());

    let mut flow = Onboarding::new(config.timing());
    if !flow.check_first_time_login(&mut dashboard) {
        eprintln!("{email} has already completed onboarding");
    }

    for event in events {
        let applied = match event {
            Event::Input(input) => flow.dispatch(input.clone(), &mut dashboard),
            Event::Finish => finish(&mut flow, &mut dashboard),
        };
        if !applied {
            tracing::warn!(?event, screen = format_screen(flow.screen()), "event ignored");
        }
        if trace {
            let line = TraceLine {
                event: event_label(event),
                applied,
                view: flow.view(),
            };
            let json = serde_json::to_string(&line)
                .map_err(|e| format!("failed to serialize trace: {e}"))?;
            println!("{json}");
        }
    }

    let profile_saved = match dashboard.user().cloned() {
        Some(user) => session
            .save(auth, &user)
            .map_err(|e| format!("failed to save profile: {e}"))?,
        None => false,
    };

    let report = Report {
        view: flow.view(),
        state: flow.state(),
        dashboard: dashboard.snapshot(),
        profile_saved,
    };
    auth.sign_out(session);
    print_json(&report)
}

/// Drives the flow to `Dormant` the way a hurried user would.
fn finish(flow: &mut Onboarding, dashboard: &mut Dashboard) -> bool {
    let mut applied = false;
    loop {
        let input = match flow.screen() {
            Screen::Dormant => return applied,
            Screen::Welcome => Input::Start,
            Screen::Wizard => Input::Next,
            Screen::Tour => Input::Skip,
            Screen::Help => Input::Complete,
        };
        if !flow.dispatch(input, dashboard) {
            return applied;
        }
        applied = true;
    }
}

fn event_label(event: &Event) -> &'static str {
    match event {
        Event::Finish => "finish",
        Event::Input(input) => match input {
            Input::Start => "start",
            Input::Skip => "skip",
            Input::Next => "next",
            Input::Prev => "prev",
            Input::Complete => "complete",
            Input::TryFeature => "try",
            Input::SelectRole(_) => "role",
            Input::SetName(_) => "name",
            Input::SetDepartment(_) => "department",
            Input::TogglePreference(_) => "pref",
            Input::ToggleShortcuts => "shortcuts",
            Input::ShowHelp => "help",
            Input::DismissNotification => "dismiss",
            Input::Key(..) => "key",
            Input::Activity(_) => "activity",
            Input::Wait(_) => "wait",
        },
    }
}

fn require_profile(auth: &Auth<'_>, email: &str) -> Result<punchclock::model::Profile, String> {
    auth.profile(email)
        .map_err(|e| format!("failed to load profile: {e}"))?
        .ok_or_else(|| format!("no profile for {email}"))
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
