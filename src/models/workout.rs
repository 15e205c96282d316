use std::fmt;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::Serialize;

use super::{FromSqliteRow, UserId};
use crate::error::{AppError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound for minutes and calories of a single workout.
pub const MAX_COUNT: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
    Weightlifting,
    Swimming,
    Yoga,
    Other,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 6] = [
        WorkoutType::Running,
        WorkoutType::Cycling,
        WorkoutType::Weightlifting,
        WorkoutType::Swimming,
        WorkoutType::Yoga,
        WorkoutType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::Weightlifting => "Weightlifting",
            WorkoutType::Swimming => "Swimming",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for WorkoutType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for WorkoutType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        WorkoutType::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown workout type: {}", s).into()))
    }
}

/// A logged workout as stored in the `workouts` table.
///
/// `date` is kept as stored text: new rows are always `YYYY-MM-DD`, but
/// databases from earlier versions may hold free-form dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutEntry {
    pub id: i64,
    pub user_id: UserId,
    pub date: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub duration_minutes: i64,
    pub calories: i64,
    pub weight_kg: f64,
}

impl FromSqliteRow for WorkoutEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            workout_type: row.get("type")?,
            duration_minutes: row.get("duration")?,
            calories: row.get("calories")?,
            weight_kg: row.get("weight")?,
        })
    }
}

/// Raw workout fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct WorkoutForm {
    pub date: String,
    pub workout_type: String,
    pub duration: String,
    pub calories: String,
    pub weight: String,
}

/// A workout that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub workout_type: WorkoutType,
    pub duration_minutes: i64,
    pub calories: i64,
    pub weight_kg: f64,
}

impl NewWorkout {
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl WorkoutForm {
    pub fn new(date: &str, workout_type: &str, duration: &str, calories: &str, weight: &str) -> Self {
        Self {
            date: date.to_string(),
            workout_type: workout_type.to_string(),
            duration: duration.to_string(),
            calories: calories.to_string(),
            weight: weight.to_string(),
        }
    }

    pub fn parse(&self) -> Result<NewWorkout> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(AppError::InvalidInput("Please enter the date".to_string()));
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| AppError::InvalidInput(format!("Date must be YYYY-MM-DD, got '{}'", date)))?;

        let workout_type = WorkoutType::parse(&self.workout_type).ok_or_else(|| {
            AppError::InvalidInput(format!("Unknown workout type '{}'", self.workout_type.trim()))
        })?;

        let duration_minutes = parse_count("Duration", &self.duration)?;
        let calories = parse_count("Calories", &self.calories)?;

        let weight_kg: f64 = self.weight.trim().parse().map_err(|_| {
            AppError::InvalidInput(format!("Weight must be a number, got '{}'", self.weight.trim()))
        })?;
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(AppError::InvalidInput(
                "Weight must be a positive number".to_string(),
            ));
        }

        Ok(NewWorkout {
            date,
            workout_type,
            duration_minutes,
            calories,
            weight_kg,
        })
    }
}

fn parse_count(field: &str, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    let value: i64 = raw.parse().map_err(|_| {
        AppError::InvalidInput(format!("{} must be a whole number, got '{}'", field, raw))
    })?;
    if value < 0 {
        return Err(AppError::InvalidInput(format!("{} cannot be negative", field)));
    }
    if value > MAX_COUNT {
        return Err(AppError::InvalidInput(format!(
            "{} cannot exceed {}",
            field, MAX_COUNT
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form() -> WorkoutForm {
        WorkoutForm::new("2024-01-01", "Running", "30", "300", "70.0")
    }

    fn expect_invalid(form: &WorkoutForm) -> String {
        match form.parse() {
            Err(AppError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_workout_type_round_trips_through_name() {
        for t in WorkoutType::ALL {
            assert_eq!(WorkoutType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_workout_type_parse_is_case_insensitive() {
        assert_eq!(WorkoutType::parse("yoga"), Some(WorkoutType::Yoga));
        assert_eq!(WorkoutType::parse(" CYCLING "), Some(WorkoutType::Cycling));
        assert_eq!(WorkoutType::parse("Pilates"), None);
        assert_eq!(WorkoutType::parse(""), None);
    }

    #[test]
    fn test_workout_type_default() {
        assert_eq!(WorkoutType::default(), WorkoutType::Running);
    }

    #[test]
    fn test_parse_valid_form() {
        let workout = form().parse().unwrap();
        assert_eq!(workout.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(workout.workout_type, WorkoutType::Running);
        assert_eq!(workout.duration_minutes, 30);
        assert_eq!(workout.calories, 300);
        assert_eq!(workout.weight_kg, 70.0);
    }

    #[test]
    fn test_parse_trims_fields() {
        let form = WorkoutForm::new(" 2024-01-01 ", "swimming", " 30 ", "300 ", " 70.5");
        let workout = form.parse().unwrap();
        assert_eq!(workout.workout_type, WorkoutType::Swimming);
        assert_eq!(workout.weight_kg, 70.5);
    }

    #[test]
    fn test_parse_rejects_empty_date() {
        let mut f = form();
        f.date = "  ".to_string();
        assert_eq!(expect_invalid(&f), "Please enter the date");
    }

    #[test]
    fn test_parse_rejects_malformed_date() {
        for date in ["2024-13-01", "01/02/2024", "2024-02-30", "yesterday"] {
            let mut f = form();
            f.date = date.to_string();
            expect_invalid(&f);
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_duration() {
        let mut f = form();
        f.duration = "abc".to_string();
        assert!(expect_invalid(&f).starts_with("Duration"));
    }

    #[test]
    fn test_parse_rejects_fractional_calories() {
        let mut f = form();
        f.calories = "300.5".to_string();
        assert!(expect_invalid(&f).starts_with("Calories"));
    }

    #[test]
    fn test_parse_rejects_negative_counts() {
        let mut f = form();
        f.duration = "-5".to_string();
        assert_eq!(expect_invalid(&f), "Duration cannot be negative");

        let mut f = form();
        f.calories = "-1".to_string();
        assert_eq!(expect_invalid(&f), "Calories cannot be negative");
    }

    #[test]
    fn test_parse_rejects_oversized_counts() {
        let mut f = form();
        f.calories = i64::MAX.to_string();
        assert_eq!(expect_invalid(&f), "Calories cannot exceed 1000000");

        let mut f = form();
        f.duration = (MAX_COUNT + 1).to_string();
        assert_eq!(expect_invalid(&f), "Duration cannot exceed 1000000");

        let mut f = form();
        f.duration = MAX_COUNT.to_string();
        assert!(f.parse().is_ok());
    }

    #[test]
    fn test_new_workout_date_text_is_zero_padded() {
        let mut f = form();
        f.date = "2024-3-7".to_string();
        assert_eq!(f.parse().unwrap().date_text(), "2024-03-07");
    }

    #[test]
    fn test_parse_accepts_zero_counts() {
        let mut f = form();
        f.duration = "0".to_string();
        f.calories = "0".to_string();
        assert!(f.parse().is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_weight() {
        for weight in ["", "heavy", "0", "-70", "NaN", "inf"] {
            let mut f = form();
            f.weight = weight.to_string();
            assert!(expect_invalid(&f).starts_with("Weight"), "weight {:?}", weight);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let mut f = form();
        f.workout_type = "Pilates".to_string();
        assert_eq!(expect_invalid(&f), "Unknown workout type 'Pilates'");
    }

    #[test]
    fn test_entry_serializes_type_field() {
        let entry = WorkoutEntry {
            id: 1,
            user_id: UserId(1),
            date: "2024-01-10".to_string(),
            workout_type: WorkoutType::Yoga,
            duration_minutes: 45,
            calories: 200,
            weight_kg: 69.0,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Yoga");
        assert_eq!(json["date"], "2024-01-10");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_non_negative_counts_parse(duration in 0i64..100_000, calories in 0i64..100_000) {
            let mut f = form();
            f.duration = duration.to_string();
            f.calories = calories.to_string();
            let workout = f.parse().unwrap();
            prop_assert_eq!(workout.duration_minutes, duration);
            prop_assert_eq!(workout.calories, calories);
        }

        #[test]
        fn prop_non_numeric_duration_is_rejected(duration in "[a-zA-Z ]{1,12}") {
            let mut f = form();
            f.duration = duration;
            prop_assert!(matches!(f.parse(), Err(AppError::InvalidInput(_))));
        }
    }
}
