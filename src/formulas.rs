//! Empirical body composition formulas.
//!
//! Every function here is a single formula step. Rounding to one decimal
//! place happens inside each step so that downstream formulas consume the
//! same rounded values that end up in the report.

use crate::domain::Gender;

/// Deurenberg-derived body fat coefficients.
mod body_fat {
    pub const BMI_FACTOR: f64 = 1.39;
    pub const AGE_FACTOR: f64 = 0.16;
    pub const MALE_OFFSET: f64 = 10.34;
    pub const MALE_ADJUSTMENT: f64 = 3.9;
    pub const FEMALE_OFFSET: f64 = 9.34;
    /// Fixed calibration applied after the raw estimate.
    pub const CALIBRATION: f64 = 0.2;
    pub const MIN_PCT: f64 = 5.0;
    pub const MAX_PCT: f64 = 50.0;
}

mod visceral_fat {
    pub const BMI_FACTOR: f64 = 0.6;
    pub const AGE_FACTOR: f64 = 0.2;
    pub const OFFSET: f64 = 10.7;
    pub const MIN_LEVEL: f64 = 1.0;
    pub const MAX_LEVEL: f64 = 15.0;
}

mod metabolic_age {
    /// Reference BMR for an average adult male (kcal).
    pub const MALE_BASELINE_BMR: f64 = 1600.0;
    /// Reference BMR for an average adult female (kcal).
    pub const FEMALE_BASELINE_BMR: f64 = 1400.0;
    /// kcal of BMR difference per year of metabolic age.
    pub const KCAL_PER_YEAR: f64 = 80.0;
    pub const MIN_AGE: f64 = 18.0;
}

/// Share of lean mass counted as muscle.
const MUSCLE_SHARE_OF_LEAN: f64 = 0.95;

/// Bone mass as a share of bodyweight.
const BONE_SHARE_OF_WEIGHT: f64 = 0.038;

/// Rounds to one decimal place, halves to even (20.85 becomes 20.8).
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Calculates Body Mass Index.
///
/// Formula:
/// ```text
/// BMI = weight / height_m²
/// ```
///
/// # Arguments
/// * `weight_kg` - Bodyweight in kilograms
/// * `height_m` - Height in meters
///
/// # Returns
/// BMI rounded to 0.1. A zero height yields a non-finite value.
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    round_to_tenth(weight_kg / (height_m * height_m))
}

/// Calculates body fat percentage from BMI and age.
///
/// Formula:
/// ```text
/// Male:   1.39 × BMI + 0.16 × age − 10.34 − 3.9
/// Female: 1.39 × BMI + 0.16 × age − 9.34
/// ```
/// The rounded estimate is then reduced by 0.2 and clamped to [5, 50].
///
/// # Arguments
/// * `bmi` - Rounded BMI
/// * `age_years` - Age in whole years
/// * `gender` - Selects the offset
///
/// # Returns
/// Body fat percentage in [5, 50], rounded to 0.1
pub fn calculate_body_fat_rate(bmi: f64, age_years: u32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    let estimate = match gender {
        Gender::Male => {
            body_fat::BMI_FACTOR * bmi + body_fat::AGE_FACTOR * age
                - body_fat::MALE_OFFSET
                - body_fat::MALE_ADJUSTMENT
        }
        Gender::Female => {
            body_fat::BMI_FACTOR * bmi + body_fat::AGE_FACTOR * age - body_fat::FEMALE_OFFSET
        }
    };

    let calibrated = round_to_tenth(estimate) - body_fat::CALIBRATION;
    round_to_tenth(calibrated.clamp(body_fat::MIN_PCT, body_fat::MAX_PCT))
}

/// Calculates lean body weight (bodyweight minus fat mass).
///
/// # Arguments
/// * `weight_kg` - Bodyweight in kilograms
/// * `body_fat_rate` - Clamped body fat percentage
///
/// # Returns
/// Lean body weight in kilograms
pub fn calculate_lean_body_weight(weight_kg: f64, body_fat_rate: f64) -> f64 {
    round_to_tenth(weight_kg - weight_kg * body_fat_rate / 100.0)
}

/// Calculates skeletal muscle mass.
///
/// Formula:
/// ```text
/// muscle = weight × (1 − BF% / 100) × 0.95
/// ```
pub fn calculate_muscle_mass(weight_kg: f64, body_fat_rate: f64) -> f64 {
    round_to_tenth(weight_kg * (1.0 - body_fat_rate / 100.0) * MUSCLE_SHARE_OF_LEAN)
}

/// Calculates the visceral fat index, clamped to [1, 15].
pub fn calculate_visceral_fat_level(bmi: f64, age_years: u32) -> f64 {
    let level = round_to_tenth(
        visceral_fat::BMI_FACTOR * bmi + visceral_fat::AGE_FACTOR * f64::from(age_years)
            - visceral_fat::OFFSET,
    );
    level.clamp(visceral_fat::MIN_LEVEL, visceral_fat::MAX_LEVEL)
}

/// Calculates total body water as a percentage of bodyweight.
pub fn calculate_body_water_rate(bmi: f64) -> f64 {
    round_to_tenth(50.0 + 0.15 * bmi)
}

/// Calculates bone mass in kilograms.
pub fn calculate_bone_mass(weight_kg: f64) -> f64 {
    round_to_tenth(weight_kg * BONE_SHARE_OF_WEIGHT)
}

/// Calculates basal metabolic rate from lean body weight (Katch-McArdle form).
///
/// Formula:
/// ```text
/// BMR = 370 + 21.6 × LBW
/// ```
///
/// # Returns
/// BMR in kcal/day, rounded to 0.1
pub fn calculate_bmr(lean_body_weight_kg: f64) -> f64 {
    round_to_tenth(370.0 + 21.6 * lean_body_weight_kg)
}

/// Calculates protein as a percentage of bodyweight.
pub fn calculate_protein_level(bmi: f64) -> f64 {
    round_to_tenth(15.0 + 0.08 * bmi)
}

/// Returns the population-average BMR the metabolic age is measured against.
pub fn baseline_bmr(gender: Gender) -> f64 {
    match gender {
        Gender::Male => metabolic_age::MALE_BASELINE_BMR,
        Gender::Female => metabolic_age::FEMALE_BASELINE_BMR,
    }
}

/// Calculates metabolic age by comparing BMR to the gender baseline.
///
/// Formula:
/// ```text
/// metabolic_age = max(18, age + (BMR − baseline) / 80)
/// ```
///
/// # Arguments
/// * `bmr` - Rounded BMR in kcal/day
/// * `age_years` - Actual age in years
/// * `gender` - Selects the baseline (see [`baseline_bmr`])
///
/// # Returns
/// Metabolic age in years, never below 18
pub fn calculate_metabolic_age(bmr: f64, age_years: u32, gender: Gender) -> f64 {
    let age = round_to_tenth(
        f64::from(age_years) + (bmr - baseline_bmr(gender)) / metabolic_age::KCAL_PER_YEAR,
    );
    age.max(metabolic_age::MIN_AGE)
}
