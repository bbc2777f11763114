//! Workout-aware macro adjustment.
//!
//! Each day's targets are the rest-day baseline plus independent, additive
//! bonuses:
//! - Calories: a share of the calories burned is eaten back
//! - Protein: flat bonus on strength days
//! - Carbs: flat bonus on high-intensity days, whatever the workout type
//!
//! Fat is never adjusted.

use crate::types::non_negative;
use crate::{Error, Intensity, MacroTargets, Result, WorkoutDay, WorkoutType};
use serde::{Deserialize, Serialize};

/// Tunable parameters of the adjustment rules
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdjustmentPolicy {
    /// Fraction of burned calories added back, in `[0, 1]`
    #[serde(default = "default_eat_back_ratio")]
    pub eat_back_ratio: f64,

    #[serde(default = "default_strength_protein_bonus")]
    pub strength_protein_bonus: f64,

    #[serde(default = "default_high_intensity_carb_bonus")]
    pub high_intensity_carb_bonus: f64,
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self {
            eat_back_ratio: default_eat_back_ratio(),
            strength_protein_bonus: default_strength_protein_bonus(),
            high_intensity_carb_bonus: default_high_intensity_carb_bonus(),
        }
    }
}

fn default_eat_back_ratio() -> f64 {
    0.5
}

fn default_strength_protein_bonus() -> f64 {
    20.0
}

fn default_high_intensity_carb_bonus() -> f64 {
    30.0
}

/// A single bonus that was applied to a day's targets
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    EatBack { calories: f64 },
    StrengthProtein { grams: f64 },
    HighIntensityCarbs { grams: f64 },
}

impl AdjustmentPolicy {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.eat_back_ratio) {
            return Err(Error::Config(format!(
                "eat_back_ratio must be between 0 and 1, got {}",
                self.eat_back_ratio
            )));
        }
        for (name, value) in [
            ("strength_protein_bonus", self.strength_protein_bonus),
            ("high_intensity_carb_bonus", self.high_intensity_carb_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Compute a day's adjusted targets
    ///
    /// Calories, protein and carbs are rounded half-up to whole units only
    /// after all bonuses are summed. Fat is passed through as given. Negative
    /// inputs are treated as 0.
    pub fn adjust(&self, baseline: &MacroTargets, workout: &WorkoutDay) -> MacroTargets {
        let base = baseline.clamped();

        let calorie_bonus = non_negative(workout.calories_burned) * self.eat_back_ratio;
        let protein_bonus = if workout.workout_type == WorkoutType::Strength {
            self.strength_protein_bonus
        } else {
            0.0
        };
        let carb_bonus = if workout.intensity == Intensity::High {
            self.high_intensity_carb_bonus
        } else {
            0.0
        };

        let adjusted = MacroTargets {
            calories: (base.calories + calorie_bonus).round(),
            protein: (base.protein + protein_bonus).round(),
            carbs: (base.carbs + carb_bonus).round(),
            fat: base.fat,
        };

        tracing::debug!(
            "Adjusted macros for {} ({} / {}): {:?}",
            workout.day,
            workout.workout_type,
            workout.intensity,
            adjusted
        );

        adjusted
    }

    /// List the bonuses that apply to a workout
    pub fn reasons(&self, workout: &WorkoutDay) -> Vec<Adjustment> {
        let mut reasons = Vec::new();

        let eat_back = non_negative(workout.calories_burned) * self.eat_back_ratio;
        if eat_back > 0.0 {
            reasons.push(Adjustment::EatBack { calories: eat_back });
        }
        if workout.workout_type == WorkoutType::Strength && self.strength_protein_bonus > 0.0 {
            reasons.push(Adjustment::StrengthProtein {
                grams: self.strength_protein_bonus,
            });
        }
        if workout.intensity == Intensity::High && self.high_intensity_carb_bonus > 0.0 {
            reasons.push(Adjustment::HighIntensityCarbs {
                grams: self.high_intensity_carb_bonus,
            });
        }

        reasons
    }
}

/// Adjust a baseline for one workout using the default policy
pub fn adjust_macros(baseline: &MacroTargets, workout: &WorkoutDay) -> MacroTargets {
    AdjustmentPolicy::default().adjust(baseline, workout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Weekday;

    fn baseline() -> MacroTargets {
        MacroTargets::new(2200.0, 180.0, 200.0, 70.0)
    }

    fn workout(workout_type: WorkoutType, intensity: Intensity, burned: f64) -> WorkoutDay {
        WorkoutDay {
            workout_type,
            intensity,
            calories_burned: burned,
            duration: if burned > 0.0 { 60 } else { 0 },
            ..WorkoutDay::rest(Weekday::Monday)
        }
    }

    #[test]
    fn test_strength_high_day() {
        crate::logging::init_test();

        let adjusted = adjust_macros(
            &baseline(),
            &workout(WorkoutType::Strength, Intensity::High, 400.0),
        );
        assert_eq!(adjusted, MacroTargets::new(2400.0, 200.0, 230.0, 70.0));
    }

    #[test]
    fn test_rest_day_is_identity() {
        let adjusted = adjust_macros(&baseline(), &WorkoutDay::rest(Weekday::Sunday));
        assert_eq!(adjusted, baseline());
    }

    #[test]
    fn test_high_intensity_rest_day_gets_carbs() {
        let adjusted = adjust_macros(&baseline(), &workout(WorkoutType::Rest, Intensity::High, 0.0));
        assert_eq!(adjusted.carbs, 230.0);
        assert_eq!(adjusted.protein, 180.0);
        assert_eq!(adjusted.calories, 2200.0);
    }

    #[test]
    fn test_protein_bonus_only_on_strength() {
        for workout_type in WorkoutType::ALL {
            let adjusted =
                adjust_macros(&baseline(), &workout(workout_type, Intensity::Medium, 100.0));
            let expected = if workout_type == WorkoutType::Strength {
                200.0
            } else {
                180.0
            };
            assert_eq!(adjusted.protein, expected, "type {}", workout_type);
        }
    }

    #[test]
    fn test_fat_passes_through_unrounded() {
        let base = MacroTargets::new(2000.0, 150.5, 180.0, 65.4);
        let adjusted = adjust_macros(&base, &workout(WorkoutType::Strength, Intensity::High, 333.0));
        assert_eq!(adjusted.fat, 65.4);
        assert_eq!(adjusted.protein, 171.0);
    }

    #[test]
    fn test_rounding_happens_after_summing() {
        // 2200.3 + 0.5 * 255 = 2327.8
        let base = MacroTargets::new(2200.3, 180.0, 200.0, 70.0);
        let adjusted = adjust_macros(&base, &workout(WorkoutType::Cardio, Intensity::Low, 255.0));
        assert_eq!(adjusted.calories, 2328.0);

        // half rounds up
        let adjusted = adjust_macros(&baseline(), &workout(WorkoutType::Cardio, Intensity::Low, 1.0));
        assert_eq!(adjusted.calories, 2201.0);
    }

    #[test]
    fn test_calories_monotonic_in_burned() {
        let mut last = 0.0;
        for burned in (0..=1000).step_by(37) {
            let adjusted = adjust_macros(
                &baseline(),
                &workout(WorkoutType::Cardio, Intensity::Medium, burned as f64),
            );
            assert!(adjusted.calories >= last);
            last = adjusted.calories;
        }
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let base = MacroTargets::new(-50.0, -1.0, 100.0, -3.0);
        let adjusted = adjust_macros(&base, &workout(WorkoutType::Cardio, Intensity::Low, -200.0));
        assert_eq!(adjusted, MacroTargets::new(0.0, 0.0, 100.0, 0.0));
    }

    #[test]
    fn test_custom_policy() {
        let policy = AdjustmentPolicy {
            eat_back_ratio: 1.0,
            strength_protein_bonus: 35.0,
            high_intensity_carb_bonus: 0.0,
        };
        let day = workout(WorkoutType::Strength, Intensity::High, 400.0);
        let adjusted = policy.adjust(&baseline(), &day);
        assert_eq!(adjusted, MacroTargets::new(2600.0, 215.0, 200.0, 70.0));
        assert_eq!(
            policy.reasons(&day),
            vec![
                Adjustment::EatBack { calories: 400.0 },
                Adjustment::StrengthProtein { grams: 35.0 },
            ]
        );
    }

    #[test]
    fn test_reasons_empty_on_rest_day() {
        let policy = AdjustmentPolicy::default();
        assert!(policy.reasons(&WorkoutDay::rest(Weekday::Wednesday)).is_empty());
    }

    #[test]
    fn test_policy_validation() {
        assert!(AdjustmentPolicy::default().validate().is_ok());

        let policy = AdjustmentPolicy {
            eat_back_ratio: 1.5,
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(Error::Config(_))));

        let policy = AdjustmentPolicy {
            high_intensity_carb_bonus: -5.0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }
}
