pub mod user_repo;
pub mod workout_repo;

pub use user_repo::UserRepository;
pub use workout_repo::WorkoutRepository;

use crate::error::Result;
use crate::models::{LoginCredentials, Registration, Summary, UserId, WorkoutEntry, WorkoutForm};

/// Owns user records and checks login attempts.
pub trait CredentialStore {
    /// Fails with `InvalidInput` for empty fields or a mismatched
    /// confirmation, and `DuplicateUsername` when the name is taken.
    fn register(&self, registration: &Registration) -> Result<UserId>;

    /// Fails with `InvalidCredentials` for an unknown user or wrong password.
    fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId>;
}

/// Owns per-user workout records and their summary statistics.
pub trait WorkoutLedger {
    /// Validates and appends one entry. Nothing is written on failure.
    fn log_workout(&self, user_id: UserId, form: &WorkoutForm) -> Result<WorkoutEntry>;

    /// All entries for the user, by date then insertion order.
    fn list_workouts(&self, user_id: UserId) -> Result<Vec<WorkoutEntry>>;

    fn summarize(&self, user_id: UserId) -> Result<Summary>;
}
