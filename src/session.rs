use crate::error::{AppError, Result};
use crate::models::{LoginCredentials, UserId};
use crate::repositories::CredentialStore;

/// Login state of the person using the tracker.
///
/// Passed explicitly to whatever needs the current user instead of living in
/// process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        user_id: UserId,
        username: String,
    },
}

impl Session {
    pub fn login<S>(store: &S, credentials: &LoginCredentials) -> Result<Self>
    where
        S: CredentialStore + ?Sized,
    {
        let user_id = store.authenticate(credentials)?;
        Ok(Session::LoggedIn {
            user_id,
            username: credentials.username.trim().to_string(),
        })
    }

    pub fn logout(&mut self) {
        *self = Session::LoggedOut;
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username, .. } => Some(username),
            Session::LoggedOut => None,
        }
    }

    pub fn require_user(&self) -> Result<UserId> {
        match self {
            Session::LoggedIn { user_id, .. } => Ok(*user_id),
            Session::LoggedOut => Err(AppError::Unauthorized),
        }
    }
}
