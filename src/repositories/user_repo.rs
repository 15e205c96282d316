use rusqlite::{OptionalExtension, TransactionBehavior};

use super::CredentialStore;
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, LoginCredentials, Registration, User, UserId};
use crate::password::{dummy_verify, hash_password, verify_password};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?")?;
        let result = stmt.query_row([id], User::from_row).optional()?;
        Ok(result)
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT * FROM users WHERE username = ?")?;
        let result = stmt.query_row([username], User::from_row).optional()?;
        Ok(result)
    }
}

impl CredentialStore for UserRepository {
    fn register(&self, registration: &Registration) -> Result<UserId> {
        let username = registration.validate()?;
        let record = hash_password(&registration.password);

        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists: bool = tx.query_row(
            "SELECT COUNT(*) > 0 FROM users WHERE username = ?",
            [username],
            |row| row.get(0),
        )?;
        if exists {
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let inserted = tx.execute(
            "INSERT INTO users (username, password_hash, salt) VALUES (?, ?, ?)",
            rusqlite::params![username, record.password_hash, record.salt],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(AppError::DuplicateUsername(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let id = UserId(tx.last_insert_rowid());
        tx.commit()?;

        tracing::info!(user_id = %id, "Registered user {}", username);
        Ok(id)
    }

    fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId> {
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        match self.find_by_username(username)? {
            Some(user) => {
                if verify_password(&credentials.password, &user.password_hash, &user.salt)? {
                    tracing::debug!(user_id = %user.id, "Authenticated {}", username);
                    Ok(user.id)
                } else {
                    tracing::info!("Failed login for {}", username);
                    Err(AppError::InvalidCredentials)
                }
            }
            None => {
                dummy_verify(&credentials.password);
                tracing::info!("Failed login for unknown user {}", username);
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
