//! Stored accounts and profiles.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, UserRecord};

/// Sign-in credentials. Separate from the profile, which may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    /// Hex SHA-256 of the account id followed by the password.
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Whether a profile is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileStatus {
    #[default]
    Active,
    Inactive,
}

impl ProfileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A user's profile, keyed by account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub department: String,
    pub role: Role,
    pub status: ProfileStatus,
    pub is_first_login: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// The record handed to the host on sign-in.
    pub fn user_record(&self) -> UserRecord {
        UserRecord {
            name: self.name.clone(),
            role: self.role,
            department: self.department.clone(),
            is_first_login: self.is_first_login,
        }
    }

    /// Copies host-side edits back. Returns whether anything changed.
    pub fn apply(&mut self, user: &UserRecord) -> bool {
        let changed = self.name != user.name
            || self.role != user.role
            || self.department != user.department
            || self.is_first_login != user.is_first_login;
        if changed {
            self.name.clone_from(&user.name);
            self.role = user.role;
            self.department.clone_from(&user.department);
            self.is_first_login = user.is_first_login;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "mike.davis@company.com".into(),
            name: "Mike Davis".into(),
            department: "Engineering".into(),
            role: Role::Employee,
            status: ProfileStatus::Active,
            is_first_login: true,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn apply_reports_changes() {
        let mut profile = sample_profile();
        let mut user = profile.user_record();
        assert!(!profile.apply(&user));

        user.is_first_login = false;
        user.role = Role::Manager;
        assert!(profile.apply(&user));
        assert!(!profile.is_first_login);
        assert_eq!(profile.role, Role::Manager);
    }
}
