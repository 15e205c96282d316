use rusqlite::TransactionBehavior;

use super::WorkoutLedger;
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Summary, UserId, WeightPoint, WorkoutEntry, WorkoutForm};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn count_by_user(&self, user_id: UserId) -> Result<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM workouts WHERE user_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl WorkoutLedger for WorkoutRepository {
    fn log_workout(&self, user_id: UserId, form: &WorkoutForm) -> Result<WorkoutEntry> {
        let workout = form.parse()?;
        let date = workout.date_text();

        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let user_exists: bool = tx.query_row(
            "SELECT COUNT(*) > 0 FROM users WHERE id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        if !user_exists {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        tx.execute(
            "INSERT INTO workouts (user_id, date, type, duration, calories, weight)
             VALUES (?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                user_id,
                date,
                workout.workout_type,
                workout.duration_minutes,
                workout.calories,
                workout.weight_kg
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!(
            user_id = %user_id,
            workout_id = id,
            "Logged {} workout on {}",
            workout.workout_type,
            date
        );

        Ok(WorkoutEntry {
            id,
            user_id,
            date,
            workout_type: workout.workout_type,
            duration_minutes: workout.duration_minutes,
            calories: workout.calories,
            weight_kg: workout.weight_kg,
        })
    }

    fn list_workouts(&self, user_id: UserId) -> Result<Vec<WorkoutEntry>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, date, type, duration, calories, weight
             FROM workouts
             WHERE user_id = ?
             ORDER BY date, id",
        )?;
        let entries = WorkoutEntry::query_all(&mut stmt, [user_id])?;
        Ok(entries)
    }

    fn summarize(&self, user_id: UserId) -> Result<Summary> {
        let conn = self.pool.get()?;

        let (total_count, total_calories): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(calories), 0) FROM workouts WHERE user_id = ?",
            [user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = conn.prepare(
            "SELECT date, weight
             FROM workouts
             WHERE user_id = ? AND weight IS NOT NULL
             ORDER BY date, id",
        )?;
        let weight_series = WeightPoint::query_all(&mut stmt, [user_id])?;

        Ok(Summary {
            total_count,
            total_calories,
            weight_series,
        })
    }
}
