//! User repository.

use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::model::{new_record_id, NewUser, User};
use crate::query::now_stamp;
use crate::table::Table;

pub struct UserRepository {
    table: Table<User>,
}

impl UserRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    /// Create a user, enforcing alias/email uniqueness (case-insensitive)
    /// and the first-user-admin rule.
    ///
    /// The check and the append run inside one table critical section, so
    /// two concurrent registrations of the same alias cannot both succeed.
    pub fn create(&self, new_user: NewUser) -> Result<User> {
        self.table.append_with(|existing| {
            if existing
                .iter()
                .any(|user| user.alias.eq_ignore_ascii_case(&new_user.alias))
            {
                return Err(StoreError::Conflict(format!(
                    "alias \"{}\" is already taken",
                    new_user.alias
                )));
            }
            if !new_user.email.is_empty()
                && existing
                    .iter()
                    .any(|user| user.email.eq_ignore_ascii_case(&new_user.email))
            {
                return Err(StoreError::Conflict(format!(
                    "email \"{}\" is already registered",
                    new_user.email
                )));
            }

            Ok(User {
                id: new_record_id(),
                alias: new_user.alias.clone(),
                firstname: new_user.firstname.clone(),
                lastname: new_user.lastname.clone(),
                email: new_user.email.clone(),
                password: new_user.password_hash.clone(),
                created_at: now_stamp(),
                // The very first user administers the site
                is_admin: existing.is_empty(),
                remember_token: None,
            })
        })
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.table.scan_all()?.into_iter().find(|user| user.id == id))
    }

    pub fn find_by_alias(&self, alias: &str) -> Result<Option<User>> {
        Ok(self
            .table
            .scan_all()?
            .into_iter()
            .find(|user| user.alias.eq_ignore_ascii_case(alias)))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        if email.is_empty() {
            return Ok(None);
        }
        Ok(self
            .table
            .scan_all()?
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email)))
    }

    /// Replace the record with the same id, preserving its position and
    /// every other record byte-for-byte. Returns `Ok(false)` when the id
    /// does not exist.
    pub fn update(&self, user: &User) -> Result<bool> {
        self.table.update_with(|records| {
            match records.iter_mut().find(|existing| existing.id == user.id) {
                Some(slot) => {
                    *slot = user.clone();
                    true
                }
                None => false,
            }
        })
    }

    pub fn all(&self) -> Result<Vec<User>> {
        self.table.scan_all()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.table.scan_all()?.len())
    }
}
