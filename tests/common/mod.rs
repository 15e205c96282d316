#![allow(dead_code)]

use fittrack::db::{create_memory_pool, DbPool};
use fittrack::migrations::run_migrations;
use fittrack::models::{Registration, UserId, WorkoutEntry, WorkoutForm};
use fittrack::repositories::{CredentialStore, UserRepository, WorkoutLedger, WorkoutRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_user(pool: &DbPool, username: &str, password: &str) -> UserId {
    UserRepository::new(pool.clone())
        .register(&Registration::new(username, password, password))
        .unwrap()
}

/// Insert a user row without running the password hash.
pub fn insert_user_row(pool: &DbPool, username: &str) -> UserId {
    let conn = pool.get().unwrap();
    conn.execute(
        "INSERT INTO users (username, password_hash, salt) VALUES (?, ?, ?)",
        rusqlite::params![username, "00".repeat(32), "00".repeat(16)],
    )
    .unwrap();
    UserId(conn.last_insert_rowid())
}

pub fn form(date: &str, workout_type: &str, duration: &str, calories: &str, weight: &str) -> WorkoutForm {
    WorkoutForm::new(date, workout_type, duration, calories, weight)
}

pub fn create_test_workout(
    pool: &DbPool,
    user_id: UserId,
    date: &str,
    calories: i64,
    weight: f64,
) -> WorkoutEntry {
    WorkoutRepository::new(pool.clone())
        .log_workout(
            user_id,
            &form(
                date,
                "Running",
                "30",
                &calories.to_string(),
                &weight.to_string(),
            ),
        )
        .unwrap()
}

pub fn workout_rows(pool: &DbPool) -> i64 {
    let conn = pool.get().unwrap();
    conn.query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
        .unwrap()
}
