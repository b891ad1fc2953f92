//! Account storage: credentials keyed by email.

use rusqlite::{Connection, OptionalExtension};

use crate::model::{Account, Profile};

use super::profile::insert_profile;
use super::{Result, Storage, StorageError, parse_timestamp, parse_uuid, unique_violation};

impl Storage {
    /// Inserts a new account. Emails are unique.
    pub fn create_account(&self, account: &Account) -> Result<()> {
        insert_account(&self.conn, account)
    }

    /// Inserts an account and its profile together, or neither.
    pub fn create_account_with_profile(&self, account: &Account, profile: &Profile) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        insert_account(&tx, account)?;
        insert_profile(&tx, profile)?;
        tx.commit()?;
        Ok(())
    }

    /// Looks up an account by email, ignoring case.
    pub fn find_account(&self, email: &str) -> Result<Option<Account>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM account
                 WHERE email = ?1 COLLATE NOCASE",
                [email],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        let Some((id, email, password_hash, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(Account {
            id: parse_uuid(&id)?,
            email,
            password_hash,
            created_at: parse_timestamp(&created_at, "created_at")?,
        }))
    }

    /// Like [`find_account`](Self::find_account), but missing is an error.
    pub fn load_account(&self, email: &str) -> Result<Account> {
        self.find_account(email)?
            .ok_or_else(|| StorageError::AccountNotFound(email.to_string()))
    }

    pub fn count_accounts(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM account", [], |row| row.get(0))?;
        usize::try_from(n).map_err(|e| StorageError::Corrupt(format!("account count: {e}")))
    }
}

fn insert_account(conn: &Connection, account: &Account) -> Result<()> {
    conn.execute(
        "INSERT INTO account (id, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            account.id.to_string(),
            &account.email,
            &account.password_hash,
            account.created_at.to_string(),
        ],
    )
    .map_err(|e| unique_violation(e, &account.email))?;
    Ok(())
}
