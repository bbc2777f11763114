//! The workout schedule store.
//!
//! Holds one record per weekday in insertion order and supports point
//! lookups and partial updates by day.

use crate::{Error, Intensity, Result, Weekday, WorkoutDay, WorkoutPatch, WorkoutType};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered set of workout days with at most one record per weekday
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<WorkoutDay>", into = "Vec<WorkoutDay>")]
pub struct WorkoutSchedule {
    days: Vec<WorkoutDay>,
}

impl Default for WorkoutSchedule {
    /// The default plan for the current local week
    fn default() -> Self {
        Self::default_week(current_week_start())
    }
}

impl TryFrom<Vec<WorkoutDay>> for WorkoutSchedule {
    type Error = Error;

    fn try_from(days: Vec<WorkoutDay>) -> Result<Self> {
        Self::from_days(days)
    }
}

impl From<WorkoutSchedule> for Vec<WorkoutDay> {
    fn from(schedule: WorkoutSchedule) -> Self {
        schedule.days
    }
}

/// Monday of the current local week
pub fn current_week_start() -> NaiveDate {
    let today = Local::now().date_naive();
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

impl WorkoutSchedule {
    /// Build the default seven-day plan with dates starting at `week_start`
    pub fn default_week(week_start: NaiveDate) -> Self {
        let template: [(WorkoutType, Intensity, u32, f64, Option<&str>); 7] = [
            (WorkoutType::Strength, Intensity::High, 60, 400.0, Some("Upper Body")),
            (WorkoutType::Cardio, Intensity::Medium, 30, 250.0, Some("Morning Run")),
            (WorkoutType::Rest, Intensity::Low, 0, 0.0, None),
            (WorkoutType::Strength, Intensity::High, 60, 400.0, Some("Lower Body")),
            (WorkoutType::Hiit, Intensity::High, 30, 350.0, Some("HIIT Circuit")),
            (WorkoutType::Cardio, Intensity::Low, 45, 200.0, Some("Easy Bike Ride")),
            (WorkoutType::Rest, Intensity::Low, 0, 0.0, None),
        ];

        let days = Weekday::ALL
            .into_iter()
            .zip(template)
            .enumerate()
            .map(
                |(offset, (day, (workout_type, intensity, duration, burned, name)))| WorkoutDay {
                    day,
                    date: week_start.checked_add_signed(Duration::days(offset as i64)),
                    workout_type,
                    intensity,
                    duration,
                    calories_burned: burned,
                    name: name.map(String::from),
                    notes: None,
                },
            )
            .collect();

        Self { days }
    }

    /// Build a schedule from records in calendar order
    ///
    /// Any number of days is accepted, but each weekday at most once.
    pub fn from_days(days: Vec<WorkoutDay>) -> Result<Self> {
        check_days(&days)?;
        Ok(Self { days })
    }

    /// Replace every record at once
    pub fn set_days(&mut self, days: Vec<WorkoutDay>) -> Result<()> {
        check_days(&days)?;
        tracing::debug!("Replaced schedule with {} days", days.len());
        self.days = days;
        Ok(())
    }

    pub fn get(&self, day: Weekday) -> Option<&WorkoutDay> {
        self.days.iter().find(|w| w.day == day)
    }

    /// Lookup by exact day name, e.g. "Monday"
    pub fn get_by_name(&self, name: &str) -> Option<&WorkoutDay> {
        self.days.iter().find(|w| w.day.as_str() == name)
    }

    /// Merge a partial update into the record for `day`
    ///
    /// Fails with [`Error::DayNotFound`] rather than inserting a new day.
    pub fn update(&mut self, day: Weekday, patch: WorkoutPatch) -> Result<&WorkoutDay> {
        if let Some(burned) = patch.calories_burned {
            check_calories_burned(burned)?;
        }

        let record = self
            .days
            .iter_mut()
            .find(|w| w.day == day)
            .ok_or(Error::DayNotFound(day))?;

        record.apply(patch);
        tracing::info!(
            "Updated {}: {} / {} / {} min / {} cal",
            day,
            record.workout_type,
            record.intensity,
            record.duration,
            record.calories_burned
        );
        Ok(&*record)
    }

    pub fn days(&self) -> &[WorkoutDay] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<'a> IntoIterator for &'a WorkoutSchedule {
    type Item = &'a WorkoutDay;
    type IntoIter = std::slice::Iter<'a, WorkoutDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_days(days: &[WorkoutDay]) -> Result<()> {
    let mut seen = HashSet::new();
    for workout in days {
        if !seen.insert(workout.day) {
            return Err(Error::DuplicateDay(workout.day));
        }
        check_calories_burned(workout.calories_burned)?;
    }
    Ok(())
}

/// Calories burned must be a finite, non-negative number
pub(crate) fn check_calories_burned(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidValue {
            field: "calories burned",
            value: value.to_string(),
        })
    }
}
