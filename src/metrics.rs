//! Metrics calculation from an input profile.
//!
//! The formulas depend on each other (BMI feeds body fat, body fat feeds lean
//! body weight, lean body weight feeds BMR, BMR feeds metabolic age). The
//! [`MetricsPipeline`] makes that order explicit: each stage is a distinct
//! type, so a later stage can only be reached through the earlier ones.

use serde::Serialize;

use crate::domain::{Gender, InputProfile};
use crate::formulas::{
    calculate_bmi, calculate_bmr, calculate_body_fat_rate, calculate_body_water_rate,
    calculate_bone_mass, calculate_lean_body_weight, calculate_metabolic_age,
    calculate_muscle_mass, calculate_protein_level, calculate_visceral_fat_level,
};

/// A named step of the metrics pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Bmi,
    BodyFat,
    LeanMass,
    Metabolism,
    Finish,
}

impl Stage {
    /// Stages in evaluation order.
    pub const ORDER: [Stage; 5] = [
        Stage::Bmi,
        Stage::BodyFat,
        Stage::LeanMass,
        Stage::Metabolism,
        Stage::Finish,
    ];

    /// Stages whose outputs this stage reads.
    pub fn depends_on(&self) -> &'static [Stage] {
        match self {
            Stage::Bmi => &[],
            Stage::BodyFat => &[Stage::Bmi],
            Stage::LeanMass => &[Stage::BodyFat],
            Stage::Metabolism => &[Stage::LeanMass],
            Stage::Finish => &[Stage::Bmi, Stage::Metabolism],
        }
    }

    /// Returns the display name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Bmi => "bmi",
            Stage::BodyFat => "body fat",
            Stage::LeanMass => "lean mass",
            Stage::Metabolism => "metabolism",
            Stage::Finish => "finish",
        }
    }
}

/// Complete set of derived metrics for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsRecord {
    pub bmi: f64,
    pub body_fat_rate: f64,
    pub muscle_mass_kg: f64,
    pub lean_body_weight_kg: f64,
    pub visceral_fat_level: f64,
    pub body_water_rate: f64,
    pub bone_mass_kg: f64,
    pub bmr_kcal: f64,
    pub protein_level: f64,
    pub metabolic_age: f64,
    /// Input bodyweight, kept for converting masses to percentages.
    pub weight_kg: f64,
}

impl MetricsRecord {
    /// Muscle mass as a percentage of bodyweight.
    pub fn muscle_pct(&self) -> f64 {
        self.muscle_mass_kg / self.weight_kg * 100.0
    }

    /// Bone mass as a percentage of bodyweight.
    pub fn bone_pct(&self) -> f64 {
        self.bone_mass_kg / self.weight_kg * 100.0
    }

    /// Table rows of (label, formatted value with unit), in report order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("BMI", format!("{:.1}", self.bmi)),
            ("Body Fat Rate", format!("{:.1}%", self.body_fat_rate)),
            ("Muscle Mass", format!("{:.1} kg", self.muscle_mass_kg)),
            ("Lean Body Weight", format!("{:.1} kg", self.lean_body_weight_kg)),
            ("Visceral Fat Level", format!("{:.1}", self.visceral_fat_level)),
            ("Body Water Rate", format!("{:.1}%", self.body_water_rate)),
            ("Bone Mass", format!("{:.1} kg", self.bone_mass_kg)),
            ("Basal Metabolic Rate (BMR)", format!("{:.1} kcal", self.bmr_kcal)),
            ("Protein Level", format!("{:.1}%", self.protein_level)),
            ("Metabolic Age", format!("{:.1} years", self.metabolic_age)),
        ]
    }
}

/// Pipeline start: only the profile is known.
#[derive(Debug, Clone, Copy)]
pub struct Start;

#[derive(Debug, Clone, Copy)]
pub struct WithBmi {
    bmi: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct WithBodyFat {
    bmi: f64,
    body_fat_rate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct WithLeanMass {
    bmi: f64,
    body_fat_rate: f64,
    lean_body_weight_kg: f64,
    muscle_mass_kg: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct WithMetabolism {
    bmi: f64,
    body_fat_rate: f64,
    lean_body_weight_kg: f64,
    muscle_mass_kg: f64,
    bmr_kcal: f64,
    metabolic_age: f64,
}

/// Ordered metrics computation over a single profile.
#[derive(Debug, Clone, Copy)]
pub struct MetricsPipeline<S> {
    profile: InputProfile,
    state: S,
}

impl MetricsPipeline<Start> {
    /// Starts a pipeline for the given profile.
    pub fn new(profile: InputProfile) -> Self {
        Self {
            profile,
            state: Start,
        }
    }

    pub fn bmi(self) -> MetricsPipeline<WithBmi> {
        let bmi = calculate_bmi(self.profile.weight_kg, self.profile.height_m());
        log::trace!("stage {}: bmi={}", Stage::Bmi.display_name(), bmi);
        MetricsPipeline {
            profile: self.profile,
            state: WithBmi { bmi },
        }
    }
}

impl MetricsPipeline<WithBmi> {
    pub fn current_bmi(&self) -> f64 {
        self.state.bmi
    }

    /// Body fat is clamped here, before anything reads it.
    pub fn body_fat(self) -> MetricsPipeline<WithBodyFat> {
        let body_fat_rate =
            calculate_body_fat_rate(self.state.bmi, self.profile.age_years, self.profile.gender);
        log::trace!(
            "stage {}: body_fat_rate={}",
            Stage::BodyFat.display_name(),
            body_fat_rate
        );
        MetricsPipeline {
            profile: self.profile,
            state: WithBodyFat {
                bmi: self.state.bmi,
                body_fat_rate,
            },
        }
    }
}

impl MetricsPipeline<WithBodyFat> {
    pub fn current_body_fat_rate(&self) -> f64 {
        self.state.body_fat_rate
    }

    pub fn lean_mass(self) -> MetricsPipeline<WithLeanMass> {
        let weight = self.profile.weight_kg;
        let lean_body_weight_kg = calculate_lean_body_weight(weight, self.state.body_fat_rate);
        let muscle_mass_kg = calculate_muscle_mass(weight, self.state.body_fat_rate);
        log::trace!(
            "stage {}: lbw={} muscle={}",
            Stage::LeanMass.display_name(),
            lean_body_weight_kg,
            muscle_mass_kg
        );
        MetricsPipeline {
            profile: self.profile,
            state: WithLeanMass {
                bmi: self.state.bmi,
                body_fat_rate: self.state.body_fat_rate,
                lean_body_weight_kg,
                muscle_mass_kg,
            },
        }
    }
}

impl MetricsPipeline<WithLeanMass> {
    pub fn current_lean_body_weight(&self) -> f64 {
        self.state.lean_body_weight_kg
    }

    pub fn metabolism(self) -> MetricsPipeline<WithMetabolism> {
        let bmr_kcal = calculate_bmr(self.state.lean_body_weight_kg);
        let metabolic_age =
            calculate_metabolic_age(bmr_kcal, self.profile.age_years, self.profile.gender);
        log::trace!(
            "stage {}: bmr={} metabolic_age={}",
            Stage::Metabolism.display_name(),
            bmr_kcal,
            metabolic_age
        );
        MetricsPipeline {
            profile: self.profile,
            state: WithMetabolism {
                bmi: self.state.bmi,
                body_fat_rate: self.state.body_fat_rate,
                lean_body_weight_kg: self.state.lean_body_weight_kg,
                muscle_mass_kg: self.state.muscle_mass_kg,
                bmr_kcal,
                metabolic_age,
            },
        }
    }
}

impl MetricsPipeline<WithMetabolism> {
    pub fn current_bmr(&self) -> f64 {
        self.state.bmr_kcal
    }

    /// Adds the metrics that depend only on BMI, age or weight.
    pub fn finish(self) -> MetricsRecord {
        let profile = self.profile;
        let s = self.state;
        MetricsRecord {
            bmi: s.bmi,
            body_fat_rate: s.body_fat_rate,
            muscle_mass_kg: s.muscle_mass_kg,
            lean_body_weight_kg: s.lean_body_weight_kg,
            visceral_fat_level: calculate_visceral_fat_level(s.bmi, profile.age_years),
            body_water_rate: calculate_body_water_rate(s.bmi),
            bone_mass_kg: calculate_bone_mass(profile.weight_kg),
            bmr_kcal: s.bmr_kcal,
            protein_level: calculate_protein_level(s.bmi),
            metabolic_age: s.metabolic_age,
            weight_kg: profile.weight_kg,
        }
    }
}

/// Runs the full pipeline for a profile.
pub fn compute_profile_metrics(profile: InputProfile) -> MetricsRecord {
    MetricsPipeline::new(profile)
        .bmi()
        .body_fat()
        .lean_mass()
        .metabolism()
        .finish()
}

/// Computes all metrics from raw measurements.
///
/// No validation happens here: a zero height yields non-finite values.
pub fn compute_metrics(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: Gender,
) -> MetricsRecord {
    compute_profile_metrics(InputProfile::new(weight_kg, height_cm, age_years, gender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_male_profile() {
        let m = compute_metrics(70.0, 175.0, 30, Gender::Male);

        assert_eq!(m.bmi, 22.9);
        assert_eq!(m.body_fat_rate, 22.2);
        assert_eq!(m.lean_body_weight_kg, 54.5);
        assert_eq!(m.muscle_mass_kg, 51.7);
        assert_eq!(m.visceral_fat_level, 9.0);
        assert_eq!(m.body_water_rate, 53.4);
        assert_eq!(m.bone_mass_kg, 2.7);
        assert_eq!(m.bmr_kcal, 1547.2);
        assert_eq!(m.protein_level, 16.8);
        assert_eq!(m.metabolic_age, 29.3);
        assert_eq!(m.weight_kg, 70.0);
    }

    #[test]
    fn test_reference_female_profile() {
        let m = compute_metrics(60.0, 165.0, 45, Gender::Female);

        assert_eq!(m.bmi, 22.0);
        assert_eq!(m.body_fat_rate, 28.2);
        assert_eq!(m.lean_body_weight_kg, 43.1);
        assert_eq!(m.muscle_mass_kg, 40.9);
        assert_eq!(m.visceral_fat_level, 11.5);
        assert_eq!(m.body_water_rate, 53.3);
        assert_eq!(m.bone_mass_kg, 2.3);
        assert_eq!(m.bmr_kcal, 1301.0);
        assert_eq!(m.protein_level, 16.8);
        assert_eq!(m.metabolic_age, 43.8);
    }

    #[test]
    fn test_extremely_low_bmi_clamps_body_fat() {
        let m = compute_metrics(30.0, 250.0, 18, Gender::Male);

        assert_eq!(m.bmi, 4.8);
        assert_eq!(m.body_fat_rate, 5.0);
        assert_eq!(m.visceral_fat_level, 1.0);
        assert_eq!(m.metabolic_age, 18.0);
        // Clamped body fat, not the raw negative estimate, feeds lean mass
        assert_eq!(m.lean_body_weight_kg, 28.5);
        assert_eq!(m.muscle_mass_kg, 27.1);
    }

    #[test]
    fn test_half_tenth_ties_round_to_even() {
        // BF 30.5% of 30 kg leaves 20.85 kg lean
        let m = compute_metrics(30.0, 100.0, 20, Gender::Male);
        assert_eq!(m.bmi, 30.0);
        assert_eq!(m.body_fat_rate, 30.5);
        assert_eq!(m.lean_body_weight_kg, 20.8);
        assert_eq!(m.muscle_mass_kg, 19.8);
        assert_eq!(m.bmr_kcal, 819.3);
        assert_eq!(m.metabolic_age, 18.0);

        // 52 + (754.5 − 1400) / 80 = 43.93125, after LBW 17.85 → 17.8
        let m = compute_metrics(30.0, 100.0, 52, Gender::Female);
        assert_eq!(m.body_fat_rate, 40.5);
        assert_eq!(m.lean_body_weight_kg, 17.8);
        assert_eq!(m.bmr_kcal, 754.5);
        assert_eq!(m.metabolic_age, 43.9);
    }

    #[test]
    fn test_extremely_high_bmi_clamps() {
        let m = compute_metrics(200.0, 100.0, 100, Gender::Female);

        assert_eq!(m.bmi, 200.0);
        assert_eq!(m.body_fat_rate, 50.0);
        assert_eq!(m.visceral_fat_level, 15.0);
        assert_eq!(m.lean_body_weight_kg, 100.0);
        assert_eq!(m.bmr_kcal, 2530.0);
    }

    #[test]
    fn test_clamp_and_floor_invariants_across_ranges() {
        for weight in [30.0, 55.5, 80.0, 120.0, 200.0] {
            for height in [100.0, 150.0, 175.0, 210.0, 250.0] {
                for age in [18, 35, 60, 100] {
                    for gender in Gender::all() {
                        let m = compute_metrics(weight, height, age, *gender);
                        assert!(
                            (5.0..=50.0).contains(&m.body_fat_rate),
                            "body fat {} for {:?}",
                            m.body_fat_rate,
                            (weight, height, age, gender)
                        );
                        assert!((1.0..=15.0).contains(&m.visceral_fat_level));
                        assert!(m.metabolic_age >= 18.0);
                        // Muscle is 95% of lean mass, within rounding
                        assert!(
                            (m.muscle_mass_kg - 0.95 * m.lean_body_weight_kg).abs() <= 0.15,
                            "muscle {} lbw {}",
                            m.muscle_mass_kg,
                            m.lean_body_weight_kg
                        );
                        let fat_mass = weight * m.body_fat_rate / 100.0;
                        assert!(
                            (m.muscle_mass_kg + fat_mass - (0.95 * weight + 0.05 * fat_mass))
                                .abs()
                                <= 0.1
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = compute_metrics(82.3, 181.0, 44, Gender::Male);
        let b = compute_metrics(82.3, 181.0, 44, Gender::Male);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pipeline_exposes_intermediate_values() {
        let profile = InputProfile::new(70.0, 175.0, 30, Gender::Male);

        let with_bmi = MetricsPipeline::new(profile).bmi();
        assert_eq!(with_bmi.current_bmi(), 22.9);

        let with_fat = with_bmi.body_fat();
        assert_eq!(with_fat.current_body_fat_rate(), 22.2);

        let with_lean = with_fat.lean_mass();
        assert_eq!(with_lean.current_lean_body_weight(), 54.5);

        let with_metabolism = with_lean.metabolism();
        assert_eq!(with_metabolism.current_bmr(), 1547.2);

        assert_eq!(
            with_metabolism.finish(),
            compute_metrics(70.0, 175.0, 30, Gender::Male)
        );
    }

    #[test]
    fn test_stage_order_respects_dependencies() {
        for (idx, stage) in Stage::ORDER.iter().enumerate() {
            for dep in stage.depends_on() {
                let dep_idx = Stage::ORDER
                    .iter()
                    .position(|s| s == dep)
                    .expect("dependency must be a pipeline stage");
                assert!(
                    dep_idx < idx,
                    "{} runs before its dependency {}",
                    stage.display_name(),
                    dep.display_name()
                );
            }
        }
    }

    #[test]
    fn test_percentages_of_weight() {
        let m = compute_metrics(70.0, 175.0, 30, Gender::Male);
        assert!((m.muscle_pct() - 51.7 / 70.0 * 100.0).abs() < 1e-9);
        assert!((m.bone_pct() - 2.7 / 70.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_rows() {
        let m = compute_metrics(70.0, 175.0, 30, Gender::Male);
        let rows = m.display_rows();

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], ("BMI", "22.9".to_string()));
        assert_eq!(rows[1], ("Body Fat Rate", "22.2%".to_string()));
        assert_eq!(rows[4], ("Visceral Fat Level", "9.0".to_string()));
        assert_eq!(rows[7], ("Basal Metabolic Rate (BMR)", "1547.2 kcal".to_string()));
        assert_eq!(rows[9], ("Metabolic Age", "29.3 years".to_string()));
    }

    #[test]
    fn test_zero_height_is_not_finite() {
        let m = compute_metrics(70.0, 0.0, 30, Gender::Male);
        assert!(!m.bmi.is_finite());
    }
}
