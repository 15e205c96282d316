use std::fmt;

use rusqlite::Row;
use serde::Serialize;

use super::FromSqliteRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    pub date: String,
    pub weight_kg: f64,
}

impl FromSqliteRow for WeightPoint {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get("date")?,
            weight_kg: row.get("weight")?,
        })
    }
}

/// Weights always show a decimal point: `70.0`, `69.5`.
fn kg(weight: f64) -> String {
    format!("{:?}", weight)
}

/// Aggregate over all of one user's workouts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub total_count: i64,
    pub total_calories: i64,
    /// Ordered by date, ties by insertion order.
    pub weight_series: Vec<WeightPoint>,
}

impl Summary {
    pub fn first_weight(&self) -> Option<f64> {
        self.weight_series.first().map(|p| p.weight_kg)
    }

    pub fn last_weight(&self) -> Option<f64> {
        self.weight_series.last().map(|p| p.weight_kg)
    }

    /// Signed change from the first to the last recorded weight.
    pub fn weight_delta(&self) -> Option<f64> {
        Some(self.last_weight()? - self.first_weight()?)
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No workouts logged yet.");
        }
        writeln!(f, "Total workouts: {}", self.total_count)?;
        writeln!(f, "Total calories burned: {}", self.total_calories)?;
        if let (Some(first), Some(last), Some(delta)) =
            (self.first_weight(), self.last_weight(), self.weight_delta())
        {
            writeln!(
                f,
                "Weight: {} kg \u{2192} {} kg (change: {:+.2} kg)",
                kg(first),
                kg(last),
                delta
            )?;
        }
        Ok(())
    }
}

/// JSON shape used by `summary --json`, with the derived weight fields.
#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    #[serde(flatten)]
    pub summary: &'a Summary,
    pub first_weight: Option<f64>,
    pub last_weight: Option<f64>,
    pub weight_delta: Option<f64>,
}

impl<'a> From<&'a Summary> for SummaryReport<'a> {
    fn from(summary: &'a Summary) -> Self {
        Self {
            summary,
            first_weight: summary.first_weight(),
            last_weight: summary.last_weight(),
            weight_delta: summary.weight_delta(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, weight_kg: f64) -> WeightPoint {
        WeightPoint {
            date: format!("2024-01-{:02}", day),
            weight_kg,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::default();
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.total_calories, 0);
        assert_eq!(summary.first_weight(), None);
        assert_eq!(summary.last_weight(), None);
        assert_eq!(summary.weight_delta(), None);
        assert_eq!(summary.to_string(), "No workouts logged yet.\n");
    }

    #[test]
    fn test_weight_delta_is_signed() {
        let summary = Summary {
            total_count: 2,
            total_calories: 750,
            weight_series: vec![point(1, 70.0), point(10, 69.0)],
        };
        assert_eq!(summary.first_weight(), Some(70.0));
        assert_eq!(summary.last_weight(), Some(69.0));
        assert_eq!(summary.weight_delta(), Some(-1.0));
    }

    #[test]
    fn test_single_entry_has_zero_delta() {
        let summary = Summary {
            total_count: 1,
            total_calories: 100,
            weight_series: vec![point(5, 80.5)],
        };
        assert_eq!(summary.weight_delta(), Some(0.0));
    }

    #[test]
    fn test_display() {
        let summary = Summary {
            total_count: 2,
            total_calories: 750,
            weight_series: vec![point(1, 70.0), point(10, 69.0)],
        };
        assert_eq!(
            summary.to_string(),
            "Total workouts: 2\nTotal calories burned: 750\nWeight: 70.0 kg \u{2192} 69.0 kg (change: -1.00 kg)\n"
        );
    }

    #[test]
    fn test_display_keeps_fractional_weights() {
        let summary = Summary {
            total_count: 1,
            total_calories: 10,
            weight_series: vec![point(2, 69.5)],
        };
        assert!(summary
            .to_string()
            .ends_with("Weight: 69.5 kg \u{2192} 69.5 kg (change: +0.00 kg)\n"));
    }

    #[test]
    fn test_report_includes_derived_fields() {
        let summary = Summary {
            total_count: 2,
            total_calories: 750,
            weight_series: vec![point(1, 70.0), point(10, 72.5)],
        };
        let json = serde_json::to_value(SummaryReport::from(&summary)).unwrap();
        assert_eq!(json["total_count"], 2);
        assert_eq!(json["total_calories"], 750);
        assert_eq!(json["weight_delta"], 2.5);
        assert_eq!(json["weight_series"][1]["date"], "2024-01-10");
    }
}
