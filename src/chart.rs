//! Chart data for the report's visual breakdown.
//!
//! Builds the two chart descriptions the document embeds: the body
//! composition proportions and the key metrics comparison. All styling comes
//! in through [`ChartStyle`]; nothing here reads global state.

use serde::Serialize;

use crate::metrics::MetricsRecord;

/// Styling for both report charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Slice colors for Fat, Muscle, Water and Bone (RGB hex, no `#`).
    pub breakdown_palette: [String; 4],
    /// Bar colors for BMI, Body Fat % and Visceral Fat.
    pub comparison_palette: [String; 3],
    pub breakdown_title: String,
    pub comparison_title: String,
    /// Chart size in spreadsheet cells (columns, rows).
    pub anchor_size: (u32, u32),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            breakdown_palette: [
                "FF6B6B".to_string(),
                "4ECDC4".to_string(),
                "45B7D1".to_string(),
                "FFBE0B".to_string(),
            ],
            comparison_palette: [
                "2E8B57".to_string(),
                "3CB371".to_string(),
                "66CDAA".to_string(),
            ],
            breakdown_title: "Body Composition".to_string(),
            comparison_title: "Key Metrics".to_string(),
            anchor_size: (4, 15),
        }
    }
}

/// One labeled, colored value in a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub label: &'static str,
    pub value: f64,
    pub color: String,
}

/// Proportion breakdown (pie chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionBreakdown {
    pub title: String,
    pub slices: Vec<ChartEntry>,
}

impl CompositionBreakdown {
    pub fn labels(&self) -> Vec<&'static str> {
        self.slices.iter().map(|s| s.label).collect()
    }

    /// Each slice's share of the whole, in percent.
    ///
    /// The slices overlap (water is part of lean mass), so their raw values
    /// do not add to 100. The shares are what a pie actually draws.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.slices.iter().map(|s| s.value).sum();
        if total <= 0.0 {
            return vec![0.0; self.slices.len()];
        }
        self.slices.iter().map(|s| s.value / total * 100.0).collect()
    }
}

/// Bar comparison of BMI, body fat and visceral fat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub title: String,
    pub bars: Vec<ChartEntry>,
}

impl MetricComparison {
    pub fn labels(&self) -> Vec<&'static str> {
        self.bars.iter().map(|b| b.label).collect()
    }
}

/// Builds the body composition breakdown.
pub fn composition_breakdown(metrics: &MetricsRecord, style: &ChartStyle) -> CompositionBreakdown {
    let values = [
        ("Fat", metrics.body_fat_rate),
        ("Muscle", metrics.muscle_pct()),
        ("Water", metrics.body_water_rate),
        ("Bone", metrics.bone_pct()),
    ];

    CompositionBreakdown {
        title: style.breakdown_title.clone(),
        slices: values
            .iter()
            .zip(style.breakdown_palette.iter())
            .map(|(&(label, value), color)| ChartEntry {
                label,
                value,
                color: color.clone(),
            })
            .collect(),
    }
}

/// Builds the key metrics bar comparison.
pub fn metric_comparison(metrics: &MetricsRecord, style: &ChartStyle) -> MetricComparison {
    let values = [
        ("BMI", metrics.bmi),
        ("Body Fat %", metrics.body_fat_rate),
        ("Visceral Fat", metrics.visceral_fat_level),
    ];

    MetricComparison {
        title: style.comparison_title.clone(),
        bars: values
            .iter()
            .zip(style.comparison_palette.iter())
            .map(|(&(label, value), color)| ChartEntry {
                label,
                value,
                color: color.clone(),
            })
            .collect(),
    }
}
