//! The signed-in user, as the onboarding flow sees it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's role in the organisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Employee,
    Manager,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Employee, Self::Manager, Self::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected employee, manager or admin)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Case-insensitive: role cards carry lowercase values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// The host's current user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub role: Role,
    pub department: String,
    pub is_first_login: bool,
}

impl UserRecord {
    /// First word of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserRecord {
        UserRecord {
            name: name.into(),
            role: Role::Employee,
            department: "Sales".into(),
            is_first_login: true,
        }
    }

    #[test]
    fn first_name_is_first_word() {
        assert_eq!(user("Lisa Chen").first_name(), "Lisa");
        assert_eq!(user("  Cher ").first_name(), "Cher");
        assert_eq!(user("").first_name(), "");
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("intern".parse::<Role>().is_err());
    }
}
