use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::{inserted_id, Account, NewAccount, Store, StoreError};
use crate::schema::accounts;

impl Store {
    /// `password_hash` must already be hashed, this layer stores it as given.
    pub fn create_account(
        &self,
        username: &str,
        password_hash: &str,
        now: NaiveDateTime,
    ) -> Result<Account, StoreError> {
        self.transaction(|conn| {
            diesel::insert_into(accounts::table)
                .values(&NewAccount {
                    username,
                    password: password_hash,
                    created_at: now,
                    updated_at: now,
                })
                .execute(conn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateUsername
                    }
                    other => other.into(),
                })?;

            let id = inserted_id(conn)?;
            Ok(accounts::table.find(id).first::<Account>(conn)?)
        })
    }

    pub fn find_account_by_username(&self, username: &str) -> Result<Account, StoreError> {
        self.with_conn(|conn| {
            Ok(accounts::table
                .filter(accounts::username.eq(username))
                .first::<Account>(conn)?)
        })
    }
}
