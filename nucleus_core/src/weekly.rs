//! Week-level summaries and per-day plans.

use crate::types::non_negative;
use crate::{Adjustment, AdjustmentPolicy, MacroTargets, WorkoutDay};
use serde::Serialize;

/// Totals across a schedule of workout days
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct WeeklySummary {
    /// Sum of the adjusted daily calorie targets
    pub weekly_calories: f64,
    /// `weekly_calories / day_count`, rounded; 0 for an empty schedule
    pub avg_daily_calories: f64,
    /// Sum of raw calories burned, unrelated to the targets above
    pub total_calories_burned: f64,
    pub workout_day_count: usize,
    pub day_count: usize,
}

/// One row of a weekly plan
#[derive(Clone, Debug, Serialize)]
pub struct DayPlan {
    pub workout: WorkoutDay,
    pub targets: MacroTargets,
    pub adjustments: Vec<Adjustment>,
}

impl AdjustmentPolicy {
    /// Summarize any number of days; the average divides by the actual count
    pub fn summarize(&self, baseline: &MacroTargets, days: &[WorkoutDay]) -> WeeklySummary {
        if days.is_empty() {
            tracing::debug!("Empty schedule, returning zero summary");
            return WeeklySummary::default();
        }

        let weekly_calories: f64 = days
            .iter()
            .map(|day| self.adjust(baseline, day).calories)
            .sum();
        let total_calories_burned: f64 = days.iter().map(|d| non_negative(d.calories_burned)).sum();
        let workout_day_count = days.iter().filter(|d| d.is_workout_day()).count();

        WeeklySummary {
            weekly_calories,
            avg_daily_calories: (weekly_calories / days.len() as f64).round(),
            total_calories_burned,
            workout_day_count,
            day_count: days.len(),
        }
    }

    /// Adjusted targets and applied bonuses for every day, in schedule order
    pub fn plan(&self, baseline: &MacroTargets, days: &[WorkoutDay]) -> Vec<DayPlan> {
        days.iter()
            .map(|day| DayPlan {
                workout: day.clone(),
                targets: self.adjust(baseline, day),
                adjustments: self.reasons(day),
            })
            .collect()
    }
}

/// Summarize a schedule using the default policy
pub fn summarize_week(baseline: &MacroTargets, days: &[WorkoutDay]) -> WeeklySummary {
    AdjustmentPolicy::default().summarize(baseline, days)
}

pub fn plan_week(
    baseline: &MacroTargets,
    days: &[WorkoutDay],
    policy: &AdjustmentPolicy,
) -> Vec<DayPlan> {
    policy.plan(baseline, days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adjust_macros, Intensity, Weekday, WorkoutSchedule, WorkoutType};
    use chrono::NaiveDate;

    fn default_days() -> Vec<WorkoutDay> {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        WorkoutSchedule::default_week(monday).days().to_vec()
    }

    #[test]
    fn test_default_week_summary() {
        let baseline = MacroTargets::default();
        let summary = summarize_week(&baseline, &default_days());

        // burned: 400 + 250 + 0 + 400 + 350 + 200 + 0 = 1600, half eaten back
        assert_eq!(summary.weekly_calories, 7.0 * 2200.0 + 800.0);
        assert_eq!(summary.avg_daily_calories, 2314.0);
        assert_eq!(summary.total_calories_burned, 1600.0);
        assert_eq!(summary.workout_day_count, 5);
        assert_eq!(summary.day_count, 7);
    }

    #[test]
    fn test_weekly_sum_matches_adjuster() {
        let baseline = MacroTargets::new(1900.5, 140.0, 160.0, 55.0);
        let days = default_days();
        let expected: f64 = days.iter().map(|d| adjust_macros(&baseline, d).calories).sum();
        assert_eq!(summarize_week(&baseline, &days).weekly_calories, expected);
    }

    #[test]
    fn test_empty_schedule_is_zero() {
        let summary = summarize_week(&MacroTargets::default(), &[]);
        assert_eq!(summary, WeeklySummary::default());
        assert_eq!(summary.avg_daily_calories, 0.0);
        assert!(!summary.avg_daily_calories.is_nan());
    }

    #[test]
    fn test_average_uses_actual_day_count() {
        let days = vec![
            WorkoutDay {
                workout_type: WorkoutType::Cardio,
                intensity: Intensity::Medium,
                duration: 30,
                calories_burned: 300.0,
                ..WorkoutDay::rest(Weekday::Monday)
            },
            WorkoutDay::rest(Weekday::Tuesday),
        ];
        let summary = summarize_week(&MacroTargets::default(), &days);
        assert_eq!(summary.weekly_calories, 2350.0 + 2200.0);
        assert_eq!(summary.avg_daily_calories, 2275.0);
        assert_eq!(summary.workout_day_count, 1);
    }

    #[test]
    fn test_plan_preserves_order_and_notes() {
        let baseline = MacroTargets::default();
        let plans = plan_week(&baseline, &default_days(), &AdjustmentPolicy::default());

        assert_eq!(plans.len(), 7);
        let days: Vec<_> = plans.iter().map(|p| p.workout.day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());

        assert_eq!(plans[0].targets, MacroTargets::new(2400.0, 200.0, 230.0, 70.0));
        assert_eq!(plans[0].adjustments.len(), 3);
        assert!(plans[2].adjustments.is_empty());
    }
}
