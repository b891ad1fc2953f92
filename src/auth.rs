//! Sign-up, sign-in and profile bootstrap over local storage.
//!
//! Stands in for the hosted auth backend. Passwords are never stored; each
//! account keeps a hex SHA-256 of its id followed by the password.

use jiff::Timestamp;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::model::{Account, Profile, ProfileStatus, Role, UserRecord};
use crate::storage::{Storage, StorageError};

/// The five demo employees seeded into an empty store.
const SAMPLE_EMPLOYEES: [(&str, Role, &str); 5] = [
    ("John Smith", Role::Admin, "IT"),
    ("Sarah Johnson", Role::Manager, "HR"),
    ("Mike Davis", Role::Employee, "Engineering"),
    ("Lisa Chen", Role::Employee, "Sales"),
    ("David Wilson", Role::Manager, "Engineering"),
];

pub const SAMPLE_PASSWORD: &str = "password";

const DEFAULT_DEPARTMENT: &str = "General";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account already exists for {0}")]
    AccountExists(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("password must not be empty")]
    EmptyPassword,

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AccountExists(email) => Self::AccountExists(email),
            other => Self::Storage(other),
        }
    }
}

pub type Result<T> = core::result::Result<T, AuthError>;

/// Optional profile fields given at sign-up.
#[derive(Debug, Clone, Default)]
pub struct SignUpData {
    pub name: Option<String>,
    pub department: Option<String>,
    pub role: Option<Role>,
}

/// A signed-in user.
#[derive(Debug, Clone)]
pub struct Session {
    pub profile: Profile,
    pub signed_in_at: Timestamp,
}

impl Session {
    /// Writes host-side edits back to the stored profile.
    ///
    /// Returns whether anything changed.
    pub fn save(&mut self, auth: &Auth<'_>, user: &UserRecord) -> Result<bool> {
        if !self.profile.apply(user) {
            return Ok(false);
        }
        self.profile.updated_at = Timestamp::now();
        auth.storage.update_profile(&self.profile)?;
        tracing::debug!(email = %self.profile.email, "profile saved");
        Ok(true)
    }
}

pub struct Auth<'a> {
    storage: &'a Storage,
}

impl<'a> Auth<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Inserts the sample employees if the store has no accounts yet.
    ///
    /// Returns how many were created.
    pub fn seed_sample_employees(&self) -> Result<usize> {
        if self.storage.count_accounts()? > 0 {
            return Ok(0);
        }
        for (name, role, department) in SAMPLE_EMPLOYEES {
            let email = sample_email(name);
            let data = SignUpData {
                name: Some(name.to_string()),
                department: Some(department.to_string()),
                role: Some(role),
            };
            self.sign_up(&email, SAMPLE_PASSWORD, &data)?;
        }
        tracing::info!(count = SAMPLE_EMPLOYEES.len(), "seeded sample employees");
        Ok(SAMPLE_EMPLOYEES.len())
    }

    /// Creates an account and its first-login profile.
    pub fn sign_up(&self, email: &str, password: &str, data: &SignUpData) -> Result<Profile> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        let id = Uuid::new_v4();
        let now = Timestamp::now();
        let account = Account {
            id,
            email: email.clone(),
            password_hash: credential_hash(id, password),
            created_at: now,
        };
        let profile = new_profile(id, &email, data, now);
        self.storage.create_account_with_profile(&account, &profile)?;
        tracing::info!(%email, "account created");
        Ok(profile)
    }

    /// Checks credentials and opens a session.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email)?;
        let account = self
            .storage
            .find_account(&email)?
            .ok_or(AuthError::InvalidCredentials)?;
        if credential_hash(account.id, password) != account.password_hash {
            tracing::warn!(%email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let profile = self.ensure_profile(&account)?;
        tracing::info!(%email, "signed in");
        Ok(Session {
            profile,
            signed_in_at: Timestamp::now(),
        })
    }

    pub fn sign_out(&self, session: Session) {
        tracing::info!(email = %session.profile.email, "signed out");
    }

    /// Loads the account's profile, creating a default one if it is missing.
    pub fn ensure_profile(&self, account: &Account) -> Result<Profile> {
        match self.storage.load_profile(account.id) {
            Ok(profile) => Ok(profile),
            Err(StorageError::ProfileNotFound(_)) => {
                tracing::warn!(email = %account.email, "profile missing, creating default");
                let profile = new_profile(
                    account.id,
                    &account.email,
                    &SignUpData::default(),
                    Timestamp::now(),
                );
                self.storage.create_profile(&profile)?;
                Ok(profile)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn profile(&self, email: &str) -> Result<Option<Profile>> {
        Ok(self.storage.find_profile(email)?)
    }

    pub fn profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.storage.list_profiles()?)
    }

    pub fn update_profile(&self, profile: &mut Profile) -> Result<()> {
        profile.updated_at = Timestamp::now();
        self.storage.update_profile(profile)?;
        Ok(())
    }
}

fn new_profile(id: Uuid, email: &str, data: &SignUpData, now: Timestamp) -> Profile {
    let local_part = email.split('@').next().unwrap_or(email);
    Profile {
        id,
        email: email.to_string(),
        name: data
            .name
            .clone()
            .unwrap_or_else(|| local_part.to_string()),
        department: data
            .department
            .clone()
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        role: data.role.unwrap_or_default(),
        status: ProfileStatus::Active,
        is_first_login: true,
        created_at: now,
        updated_at: now,
    }
}

/// `first.last@company.com` from a two-word name.
fn sample_email(name: &str) -> String {
    let local = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".");
    format!("{local}@company.com")
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

fn credential_hash(id: Uuid, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
