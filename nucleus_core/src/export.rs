//! CSV export of weekly plans and import of schedules.
//!
//! An exported plan has one row per day: the workout followed by that day's
//! adjusted targets. Import reads the workout columns back and ignores the
//! targets, which are always recomputed.

use crate::{
    DayPlan, Error, Intensity, Result, Weekday, WorkoutDay, WorkoutSchedule, WorkoutType,
};
use crate::schedule::check_calories_burned;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, Serialize)]
struct PlanRow<'a> {
    day: &'static str,
    date: Option<String>,
    #[serde(rename = "type")]
    workout_type: &'static str,
    intensity: &'static str,
    duration: u32,
    calories_burned: f64,
    name: Option<&'a str>,
    notes: Option<&'a str>,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl<'a> From<&'a DayPlan> for PlanRow<'a> {
    fn from(plan: &'a DayPlan) -> Self {
        let workout = &plan.workout;
        PlanRow {
            day: workout.day.as_str(),
            date: workout.date.map(|d| d.to_string()),
            workout_type: workout.workout_type.as_str(),
            intensity: workout.intensity.as_str(),
            duration: workout.duration,
            calories_burned: workout.calories_burned,
            name: workout.name.as_deref(),
            notes: workout.notes.as_deref(),
            calories: plan.targets.calories,
            protein: plan.targets.protein,
            carbs: plan.targets.carbs,
            fat: plan.targets.fat,
        }
    }
}

/// CSV row format for reading a plan back
#[derive(Debug, Deserialize)]
struct ImportRow {
    day: String,
    date: Option<String>,
    #[serde(rename = "type")]
    workout_type: String,
    intensity: String,
    duration: u32,
    calories_burned: f64,
    name: Option<String>,
    notes: Option<String>,
}

impl ImportRow {
    fn into_workout(self, line: usize) -> Result<WorkoutDay> {
        let invalid = |e: Error| Error::Import {
            line,
            message: e.to_string(),
        };

        let date = match self.date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::Import {
                    line,
                    message: format!("Invalid date {:?}: {}", s, e),
                })?,
            ),
            _ => None,
        };

        check_calories_burned(self.calories_burned).map_err(invalid)?;

        Ok(WorkoutDay {
            day: self.day.parse::<Weekday>().map_err(invalid)?,
            date,
            workout_type: self.workout_type.parse::<WorkoutType>().map_err(invalid)?,
            intensity: self.intensity.parse::<Intensity>().map_err(invalid)?,
            duration: self.duration,
            calories_burned: self.calories_burned,
            name: self.name.filter(|s| !s.is_empty()),
            notes: self.notes.filter(|s| !s.is_empty()),
        })
    }
}

/// Write a weekly plan to CSV, replacing any existing file
///
/// Returns the number of rows written.
pub fn export_plan_csv(path: &Path, plans: &[DayPlan]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for plan in plans {
        writer.serialize(PlanRow::from(plan))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} plan rows to {:?}", plans.len(), path);
    Ok(plans.len())
}

/// Read a schedule from a CSV file produced by [`export_plan_csv`]
pub fn import_schedule_csv(path: &Path) -> Result<WorkoutSchedule> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut days = Vec::new();

    for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = result.map_err(|e| Error::Import {
            line,
            message: e.to_string(),
        })?;
        days.push(row.into_workout(line)?);
    }

    tracing::info!("Imported {} days from {:?}", days.len(), path);
    WorkoutSchedule::from_days(days)
}
