//! Profile storage: create, load, update, and list profiles.

use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::model::{Profile, ProfileStatus, Role};

use super::{Result, Storage, StorageError, parse_timestamp, parse_uuid, unique_violation};

const COLUMNS: &str =
    "id, email, name, department, role, status, is_first_login, created_at, updated_at";

/// Raw column values, before parsing.
type ProfileRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    bool,
    String,
    String,
);

impl Storage {
    pub fn create_profile(&self, profile: &Profile) -> Result<()> {
        insert_profile(&self.conn, profile)
    }

    /// Writes every mutable column back. The email and creation time are fixed.
    pub fn update_profile(&self, profile: &Profile) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE profile
             SET name = ?1, department = ?2, role = ?3, status = ?4,
                 is_first_login = ?5, updated_at = ?6
             WHERE id = ?7",
            rusqlite::params![
                &profile.name,
                &profile.department,
                profile.role.as_str(),
                profile.status.as_str(),
                profile.is_first_login,
                profile.updated_at.to_string(),
                profile.id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::ProfileNotFound(profile.id));
        }
        Ok(())
    }

    pub fn load_profile(&self, id: Uuid) -> Result<Profile> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM profile WHERE id = ?1"),
                [id.to_string()],
                read_row,
            )
            .optional()?
            .ok_or(StorageError::ProfileNotFound(id))
            .and_then(parse_profile)
    }

    /// Looks up a profile by email, ignoring case.
    pub fn find_profile(&self, email: &str) -> Result<Option<Profile>> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM profile WHERE email = ?1 COLLATE NOCASE"),
                [email],
                read_row,
            )
            .optional()?
            .map(parse_profile)
            .transpose()
    }

    /// All profiles, oldest first.
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM profile ORDER BY created_at, name"
        ))?;
        let rows = stmt.query_map([], read_row)?;
        let mut profiles = Vec::new();
        for row in rows {
            profiles.push(parse_profile(row?)?);
        }
        Ok(profiles)
    }
}

pub(super) fn insert_profile(conn: &Connection, profile: &Profile) -> Result<()> {
    conn.execute(
        &format!("INSERT INTO profile ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        rusqlite::params![
            profile.id.to_string(),
            &profile.email,
            &profile.name,
            &profile.department,
            profile.role.as_str(),
            profile.status.as_str(),
            profile.is_first_login,
            profile.created_at.to_string(),
            profile.updated_at.to_string(),
        ],
    )
    .map_err(|e| unique_violation(e, &profile.email))?;
    Ok(())
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ProfileRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn parse_profile(row: ProfileRow) -> Result<Profile> {
    let (id, email, name, department, role, status, is_first_login, created_at, updated_at) = row;
    let role = role
        .parse::<Role>()
        .map_err(|e| StorageError::Corrupt(e.to_string()))?;
    Ok(Profile {
        id: parse_uuid(&id)?,
        email,
        name,
        department,
        role,
        status: parse_status(&status)?,
        is_first_login,
        created_at: parse_timestamp(&created_at, "created_at")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
    })
}

fn parse_status(status: &str) -> Result<ProfileStatus> {
    match status {
        "active" => Ok(ProfileStatus::Active),
        "inactive" => Ok(ProfileStatus::Inactive),
        other => Err(StorageError::Corrupt(format!(
            "unknown profile status: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        (dir, storage)
    }

    fn sample_profile(email: &str) -> Profile {
        let now = Timestamp::now();
        Profile {
            id: Uuid::new_v4(),
            email: email.into(),
            name: "Mike Davis".into(),
            department: "Engineering".into(),
            role: Role::Employee,
            status: ProfileStatus::Active,
            is_first_login: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_and_load_profile() {
        let (_dir, storage) = test_storage();
        let profile = sample_profile("mike.davis@company.com");

        storage.create_profile(&profile).unwrap();

        assert_eq!(storage.load_profile(profile.id).unwrap(), profile);
        assert_eq!(
            storage
                .find_profile("Mike.Davis@company.com")
                .unwrap()
                .map(|p| p.id),
            Some(profile.id)
        );
    }

    #[test]
    fn duplicate_email_fails() {
        let (_dir, storage) = test_storage();
        storage
            .create_profile(&sample_profile("mike.davis@company.com"))
            .unwrap();
        let err = storage
            .create_profile(&sample_profile("mike.davis@company.com"))
            .unwrap_err();
        assert!(matches!(err, StorageError::AccountExists(_)));
    }

    #[test]
    fn update_profile_fields() {
        let (_dir, storage) = test_storage();
        let mut profile = sample_profile("mike.davis@company.com");
        storage.create_profile(&profile).unwrap();

        profile.role = Role::Manager;
        profile.is_first_login = false;
        profile.status = ProfileStatus::Inactive;
        storage.update_profile(&profile).unwrap();

        let loaded = storage.load_profile(profile.id).unwrap();
        assert_eq!(loaded.role, Role::Manager);
        assert!(!loaded.is_first_login);
        assert_eq!(loaded.status, ProfileStatus::Inactive);
    }

    #[test]
    fn update_nonexistent_profile_fails() {
        let (_dir, storage) = test_storage();
        let err = storage
            .update_profile(&sample_profile("ghost@company.com"))
            .unwrap_err();
        assert!(matches!(err, StorageError::ProfileNotFound(_)));
    }

    #[test]
    fn load_nonexistent_profile_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_profile(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StorageError::ProfileNotFound(_)));
    }

    #[test]
    fn list_profiles_sorted_by_created_at() {
        let (_dir, storage) = test_storage();

        let mut first = sample_profile("first@company.com");
        first.created_at = Timestamp::new(1_000_000_000, 0).unwrap();
        let mut second = sample_profile("second@company.com");
        second.created_at = Timestamp::new(2_000_000_000, 0).unwrap();

        storage.create_profile(&second).unwrap();
        storage.create_profile(&first).unwrap();

        let emails: Vec<_> = storage
            .list_profiles()
            .unwrap()
            .into_iter()
            .map(|p| p.email)
            .collect();
        assert_eq!(emails, ["first@company.com", "second@company.com"]);
    }

    #[test]
    fn unknown_role_is_corrupt() {
        let (_dir, storage) = test_storage();
        let profile = sample_profile("mike.davis@company.com");
        storage.create_profile(&profile).unwrap();
        storage
            .conn
            .execute("UPDATE profile SET role = 'Captain'", [])
            .unwrap();
        let err = storage.load_profile(profile.id).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
