//! Punchclock: the first-login onboarding flow of a time-tracking dashboard.
//!
//! [`onboarding::Onboarding`] sequences a welcome screen, a setup wizard, a
//! guided tour and a help center, and awards one-shot achievements along the
//! way. The host dashboard is reached only through the
//! [`onboarding::Host`] trait; [`dashboard::Dashboard`] is an in-memory host
//! used by the binary and the tests.

pub mod achievements;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod onboarding;
pub mod shortcuts;
pub mod storage;
pub mod timer;
pub mod tour;
pub mod wizard;
