pub mod from_row;
pub mod summary;
pub mod user;
pub mod workout;

pub use from_row::FromSqliteRow;
pub use summary::{Summary, SummaryReport, WeightPoint};
pub use user::{LoginCredentials, Registration, User, UserId};
pub use workout::{NewWorkout, WorkoutEntry, WorkoutForm, WorkoutType, DATE_FORMAT};
