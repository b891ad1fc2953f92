//! Core data model for punchclock.
//!
//! These types describe the dashboard the onboarding flow walks through:
//! users and their profiles, the anchors a tour can point at, the
//! achievement catalog, and the static tour script.

mod achievement;
mod anchor;
mod geometry;
mod profile;
mod tour;
mod user;

pub use achievement::{Achievement, AchievementDefinition, Activity};
pub use anchor::{Anchor, ParseAnchorError, Section};
pub use geometry::{Point, Rect, Viewport};
pub use profile::{Account, Profile, ProfileStatus};
pub use tour::{Demo, TOUR_SCRIPT, TooltipPosition, TourStop};
pub use user::{ParseRoleError, Role, UserRecord};
