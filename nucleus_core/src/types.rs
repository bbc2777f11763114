//! Core domain types for the Nucleus macro planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Macro targets (baseline and adjusted)
//! - Weekdays, workout types and intensities
//! - Workout day records and partial updates

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Macro Targets
// ============================================================================

/// Daily calorie and macronutrient targets.
///
/// Used both for the rest-day baseline a user configures and for the
/// workout-adjusted targets derived from it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MacroTargets {
    pub calories: f64,
    /// grams
    pub protein: f64,
    /// grams
    pub carbs: f64,
    /// grams
    pub fat: f64,
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            calories: 2200.0,
            protein: 180.0,
            carbs: 200.0,
            fat: 70.0,
        }
    }
}

impl MacroTargets {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Copy with every negative or non-finite field replaced by 0
    pub fn clamped(&self) -> Self {
        Self {
            calories: non_negative(self.calories),
            protein: non_negative(self.protein),
            carbs: non_negative(self.carbs),
            fat: non_negative(self.fat),
        }
    }

    /// Reject negative or non-finite fields
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "baseline {} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// ============================================================================
// Closed Sets
// ============================================================================

/// Day of the week a workout is scheduled on
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    /// Accepts full names and three-letter abbreviations, case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_lowercase();
                lower == name || lower == name[..3]
            })
            .ok_or_else(|| Error::InvalidValue {
                field: "day",
                value: s.to_string(),
            })
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::ALL[day.num_days_from_monday() as usize]
    }
}

/// Kind of workout performed on a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkoutType {
    Rest,
    Cardio,
    Strength,
    #[serde(rename = "HIIT")]
    Hiit,
    Yoga,
    Sports,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 6] = [
        WorkoutType::Rest,
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Hiit,
        WorkoutType::Yoga,
        WorkoutType::Sports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Rest => "Rest",
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Strength => "Strength",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Sports => "Sports",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        WorkoutType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidValue {
                field: "workout type",
                value: s.to_string(),
            })
    }
}

/// Perceived intensity of a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Intensity::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidValue {
                field: "intensity",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Workout Days
// ============================================================================

/// One calendar day's exercise record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    pub day: Weekday,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub intensity: Intensity,
    /// minutes
    pub duration: u32,
    pub calories_burned: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutDay {
    /// A rest day with no activity
    pub fn rest(day: Weekday) -> Self {
        Self {
            day,
            date: None,
            workout_type: WorkoutType::Rest,
            intensity: Intensity::Low,
            duration: 0,
            calories_burned: 0.0,
            name: None,
            notes: None,
        }
    }

    pub fn is_workout_day(&self) -> bool {
        self.workout_type != WorkoutType::Rest
    }

    /// Merge the set fields of a patch into this record
    pub fn apply(&mut self, patch: WorkoutPatch) {
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
        if let Some(workout_type) = patch.workout_type {
            self.workout_type = workout_type;
        }
        if let Some(intensity) = patch.intensity {
            self.intensity = intensity;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(calories_burned) = patch.calories_burned {
            self.calories_burned = calories_burned;
        }
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }
}

/// Partial update for a [`WorkoutDay`]; unset fields are left unchanged
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutPatch {
    pub date: Option<NaiveDate>,
    pub workout_type: Option<WorkoutType>,
    pub intensity: Option<Intensity>,
    pub duration: Option<u32>,
    pub calories_burned: Option<f64>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

impl WorkoutPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
