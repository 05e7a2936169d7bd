//! Body composition metrics, rule-based health insights and spreadsheet
//! summary reports.
//!
//! [`metrics::compute_metrics`] and [`insights::generate_insights`] are the
//! pure core. [`chart`] and [`report`] turn their output into a workbook.

pub mod chart;
pub mod domain;
pub mod error;
pub mod formulas;
pub mod insights;
pub mod metrics;
pub mod report;
