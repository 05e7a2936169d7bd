//! Rule-based health insights derived from computed metrics.

use serde::Serialize;

use crate::metrics::MetricsRecord;

/// Severity tag attached to a classified insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Warning,
    Good,
    Caution,
    HighRisk,
    Ok,
    Great,
}

impl Severity {
    /// The bracketed tag as it appears inside insight text.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Warning => "[Warning]",
            Severity::Good => "[Good!]",
            Severity::Caution => "[Caution]",
            Severity::HighRisk => "[High Risk]",
            Severity::Ok => "[OK]",
            Severity::Great => "[Great!]",
        }
    }
}

/// What an insight talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InsightTopic {
    Bmi,
    BodyFatRate,
    VisceralFatLevel,
    MetabolicAge,
    General,
}

impl InsightTopic {
    pub fn display_name(&self) -> &'static str {
        match self {
            InsightTopic::Bmi => "BMI",
            InsightTopic::BodyFatRate => "Body Fat Rate",
            InsightTopic::VisceralFatLevel => "Visceral Fat Level",
            InsightTopic::MetabolicAge => "Metabolic Age",
            InsightTopic::General => "General",
        }
    }
}

/// A single advisory line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub topic: InsightTopic,
    /// `None` for the general recommendations.
    pub severity: Option<Severity>,
    pub text: String,
}

impl Insight {
    fn classified(topic: InsightTopic, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            topic,
            severity: Some(severity),
            text: text.into(),
        }
    }

    fn general(text: &str) -> Self {
        Self {
            topic: InsightTopic::General,
            severity: None,
            text: text.to_string(),
        }
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "- {}", self.text)
    }
}

const GENERAL_RECOMMENDATIONS: [&str; 3] = [
    "Focus on maintaining a balance between lean muscle gain and fat loss.",
    "Incorporate strength training exercises to further improve muscle mass.",
    "Monitor visceral fat levels to ensure they remain in the healthy range.",
];

/// Number of insights produced for every report.
pub const INSIGHT_COUNT: usize = 4 + GENERAL_RECOMMENDATIONS.len();

/// Classifies the key metrics and appends the general recommendations.
///
/// Order is fixed: BMI, body fat, visceral fat, metabolic age, then the
/// three general lines.
pub fn generate_insights(metrics: &MetricsRecord, age_years: u32) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(INSIGHT_COUNT);

    insights.push(bmi_insight(metrics.bmi));
    insights.push(body_fat_insight(metrics.body_fat_rate));
    insights.push(visceral_fat_insight(metrics.visceral_fat_level));
    insights.push(metabolic_age_insight(metrics.metabolic_age, age_years));
    insights.extend(GENERAL_RECOMMENDATIONS.iter().map(|text| Insight::general(text)));

    insights
}

fn bmi_insight(bmi: f64) -> Insight {
    let (severity, text) = if bmi < 18.5 {
        (
            Severity::Warning,
            "Your BMI indicates underweight [Warning]. Consider gaining healthy weight through balanced nutrition.",
        )
    } else if bmi < 25.0 {
        (
            Severity::Good,
            "Your BMI is within the healthy range [Good!]. Maintain your current lifestyle.",
        )
    } else if bmi < 30.0 {
        (
            Severity::Caution,
            "Your BMI suggests being slightly overweight [Caution]. Focus on weight management through diet and exercise.",
        )
    } else {
        (
            Severity::HighRisk,
            "Your BMI indicates obesity [High Risk]. Prioritize weight loss through diet and exercise.",
        )
    };
    Insight::classified(InsightTopic::Bmi, severity, text)
}

fn body_fat_insight(body_fat_rate: f64) -> Insight {
    let (severity, text) = if body_fat_rate < 10.0 {
        (
            Severity::Warning,
            "Your Body Fat Rate is very low [Warning]. Ensure adequate nutrition to maintain healthy fat levels.",
        )
    } else if body_fat_rate < 20.0 {
        (
            Severity::Great,
            "Your Body Fat Rate is optimal [Great!]. Keep up the good work.",
        )
    } else if body_fat_rate < 30.0 {
        (
            Severity::Ok,
            "Your Body Fat Rate is moderate [OK]. Monitor it to prevent excessive fat gain.",
        )
    } else {
        (
            Severity::HighRisk,
            "Your Body Fat Rate is high [High Risk]. Focus on fat loss while preserving lean muscle mass.",
        )
    };
    Insight::classified(InsightTopic::BodyFatRate, severity, text)
}

fn visceral_fat_insight(level: f64) -> Insight {
    let (severity, text) = if level < 5.0 {
        (
            Severity::Great,
            "Your Visceral Fat Level is low [Great!]. Continue maintaining a healthy lifestyle.",
        )
    } else if level < 10.0 {
        (
            Severity::Caution,
            "Your Visceral Fat Level is moderate [Caution]. Aim to reduce it through diet and cardio exercises.",
        )
    } else {
        (
            Severity::HighRisk,
            "Your Visceral Fat Level is high [High Risk]. Take immediate action to reduce it through diet and exercise.",
        )
    };
    Insight::classified(InsightTopic::VisceralFatLevel, severity, text)
}

fn metabolic_age_insight(metabolic_age: f64, age_years: u32) -> Insight {
    let age = f64::from(age_years);
    let (severity, text) = if metabolic_age < age {
        (
            Severity::Great,
            format!(
                "Your Metabolic Age ({metabolic_age:.1}) is younger than your actual age ({age_years}) [Great!]. Keep up the good work!"
            ),
        )
    } else if metabolic_age == age {
        (
            Severity::Ok,
            format!(
                "Your Metabolic Age ({metabolic_age:.1}) matches your actual age ({age_years}) [OK]. Maintain your current habits."
            ),
        )
    } else {
        (
            Severity::Caution,
            format!(
                "Your Metabolic Age ({metabolic_age:.1}) is older than your actual age ({age_years}) [Caution]. Focus on improving your metabolism through exercise and diet."
            ),
        )
    };
    Insight::classified(InsightTopic::MetabolicAge, severity, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use crate::metrics::compute_metrics;

    fn record(bmi: f64, body_fat_rate: f64, visceral_fat_level: f64, metabolic_age: f64) -> MetricsRecord {
        MetricsRecord {
            bmi,
            body_fat_rate,
            muscle_mass_kg: 50.0,
            lean_body_weight_kg: 55.0,
            visceral_fat_level,
            body_water_rate: 53.0,
            bone_mass_kg: 2.7,
            bmr_kcal: 1550.0,
            protein_level: 16.8,
            metabolic_age,
            weight_kg: 70.0,
        }
    }

    fn severities(insights: &[Insight]) -> Vec<Option<Severity>> {
        insights.iter().map(|i| i.severity).collect()
    }

    #[test]
    fn test_reference_profile_insights() {
        let metrics = compute_metrics(70.0, 175.0, 30, Gender::Male);
        let insights = generate_insights(&metrics, 30);

        assert_eq!(insights.len(), INSIGHT_COUNT);
        assert_eq!(
            severities(&insights),
            vec![
                Some(Severity::Good),
                Some(Severity::Ok),
                Some(Severity::Caution),
                Some(Severity::Great),
                None,
                None,
                None
            ]
        );
        assert_eq!(
            insights[3].to_string(),
            "- Your Metabolic Age (29.3) is younger than your actual age (30) [Great!]. Keep up the good work!"
        );
    }

    #[test]
    fn test_always_seven_insights_in_fixed_order() {
        for (bmi, bf, vf, ma) in [(15.0, 5.0, 1.0, 18.0), (35.0, 45.0, 15.0, 80.0), (22.0, 15.0, 7.0, 40.0)] {
            let insights = generate_insights(&record(bmi, bf, vf, ma), 40);
            assert_eq!(insights.len(), 7);
            let topics: Vec<InsightTopic> = insights.iter().map(|i| i.topic).collect();
            assert_eq!(
                topics,
                vec![
                    InsightTopic::Bmi,
                    InsightTopic::BodyFatRate,
                    InsightTopic::VisceralFatLevel,
                    InsightTopic::MetabolicAge,
                    InsightTopic::General,
                    InsightTopic::General,
                    InsightTopic::General
                ]
            );
        }
    }

    #[test]
    fn test_bmi_bands() {
        assert_eq!(bmi_insight(18.4).severity, Some(Severity::Warning));
        assert_eq!(bmi_insight(18.5).severity, Some(Severity::Good));
        assert_eq!(bmi_insight(24.9).severity, Some(Severity::Good));
        assert_eq!(bmi_insight(24.95).severity, Some(Severity::Good));
        assert_eq!(bmi_insight(25.0).severity, Some(Severity::Caution));
        assert_eq!(bmi_insight(29.95).severity, Some(Severity::Caution));
        assert_eq!(bmi_insight(30.0).severity, Some(Severity::HighRisk));
    }

    #[test]
    fn test_body_fat_bands() {
        assert_eq!(body_fat_insight(9.9).severity, Some(Severity::Warning));
        assert_eq!(body_fat_insight(10.0).severity, Some(Severity::Great));
        assert_eq!(body_fat_insight(20.0).severity, Some(Severity::Ok));
        assert_eq!(body_fat_insight(29.9).severity, Some(Severity::Ok));
        assert_eq!(body_fat_insight(30.0).severity, Some(Severity::HighRisk));
    }

    #[test]
    fn test_visceral_fat_bands() {
        assert_eq!(visceral_fat_insight(4.9).severity, Some(Severity::Great));
        assert_eq!(visceral_fat_insight(5.0).severity, Some(Severity::Caution));
        assert_eq!(visceral_fat_insight(9.9).severity, Some(Severity::Caution));
        assert_eq!(visceral_fat_insight(10.0).severity, Some(Severity::HighRisk));
    }

    #[test]
    fn test_metabolic_age_matches_actual_age() {
        let insight = metabolic_age_insight(30.0, 30);
        assert_eq!(insight.severity, Some(Severity::Ok));
        assert_eq!(
            insight.to_string(),
            "- Your Metabolic Age (30.0) matches your actual age (30) [OK]. Maintain your current habits."
        );
    }

    #[test]
    fn test_metabolic_age_match_from_computed_metrics() {
        // BMR 1601.2 puts metabolic age at 30.015, which rounds to 30.0
        let metrics = compute_metrics(114.0, 161.0, 30, Gender::Male);
        assert_eq!(metrics.metabolic_age, 30.0);
        let insights = generate_insights(&metrics, 30);
        assert!(insights[3].text.contains("matches your actual age (30) [OK]"));
        assert!(insights[3].text.contains("Metabolic Age (30.0)"));

        // Floor at 18 for a young, light profile equals the actual age
        let metrics = compute_metrics(50.0, 175.0, 18, Gender::Female);
        assert_eq!(metrics.metabolic_age, 18.0);
        assert_eq!(generate_insights(&metrics, 18)[3].severity, Some(Severity::Ok));
    }

    #[test]
    fn test_metabolic_age_older() {
        let insight = metabolic_age_insight(43.8, 40);
        assert_eq!(insight.severity, Some(Severity::Caution));
        assert!(insight.text.starts_with("Your Metabolic Age (43.8) is older than your actual age (40)"));
    }

    #[test]
    fn test_text_carries_severity_tag() {
        let insights = generate_insights(&record(32.0, 8.0, 12.0, 25.0), 40);
        for insight in insights.iter().take(4) {
            let severity = insight.severity.unwrap();
            assert!(insight.text.contains(severity.tag()), "{}", insight.text);
        }
    }

    #[test]
    fn test_general_recommendations_invariant() {
        let a = generate_insights(&record(15.0, 5.0, 1.0, 18.0), 20);
        let b = generate_insights(&record(40.0, 50.0, 15.0, 90.0), 70);
        assert_eq!(a[4..], b[4..]);
        assert_eq!(
            a[4].to_string(),
            "- Focus on maintaining a balance between lean muscle gain and fat loss."
        );
    }
}
