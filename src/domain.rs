//! Domain types for the anthropometric input profile.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Serialize;

use crate::error::InputError;

/// Accepted bodyweight range in kilograms.
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=200.0;

/// Accepted height range in centimeters.
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;

/// Accepted age range in years.
pub const AGE_RANGE_YEARS: RangeInclusive<u32> = 18..=100;

/// Biological sex used by the gender-specific formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns all gender variants.
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female]
    }

    /// Returns the display name for the gender.
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(InputError::UnknownGender(s.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The measurements a single report is computed from.
///
/// Construction does not validate; call [`InputProfile::validate`] before
/// handing user-supplied values to the calculator. The formulas themselves
/// accept any positive values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
}

impl InputProfile {
    /// Creates a new profile.
    pub fn new(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> Self {
        Self {
            weight_kg,
            height_cm,
            age_years,
            gender,
        }
    }

    /// Height converted to meters.
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    /// Checks every field against the accepted input ranges.
    pub fn validate(&self) -> Result<(), InputError> {
        check_range("weight", self.weight_kg, &WEIGHT_RANGE_KG)?;
        check_range("height", self.height_cm, &HEIGHT_RANGE_CM)?;

        if !AGE_RANGE_YEARS.contains(&self.age_years) {
            return Err(InputError::OutOfRange {
                field: "age",
                value: f64::from(self.age_years),
                min: f64::from(*AGE_RANGE_YEARS.start()),
                max: f64::from(*AGE_RANGE_YEARS.end()),
            });
        }

        Ok(())
    }
}

/// Rejects an empty or whitespace-only name, returning the trimmed name.
pub fn validate_name(name: &str) -> Result<&str, InputError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingName);
    }
    Ok(trimmed)
}

fn check_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field, value });
    }
    if !range.contains(&value) {
        return Err(InputError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}
