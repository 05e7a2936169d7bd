use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;

use bodycomp::chart::{ChartStyle, composition_breakdown, metric_comparison};
use bodycomp::domain::{Gender, InputProfile, validate_name};
use bodycomp::insights::{Insight, generate_insights};
use bodycomp::metrics::{MetricsRecord, compute_profile_metrics};
use bodycomp::report::{ReportConfig, ReportInput, write_report};

/// Body composition analyzer: metrics, insights and a spreadsheet summary.
#[derive(Parser, Debug)]
#[command(name = "bodycomp")]
#[command(about = "Estimate body composition metrics and write a summary report")]
#[command(version)]
struct Args {
    /// Name shown on the report and used in its file name.
    #[arg(long)]
    name: String,

    /// Bodyweight in kilograms (30-200).
    #[arg(long, value_name = "KG")]
    weight: f64,

    /// Height in centimeters (100-250).
    #[arg(long, value_name = "CM")]
    height: f64,

    /// Age in years (18-100).
    #[arg(long, value_name = "YEARS")]
    age: u32,

    /// Gender used by the body fat and metabolic age formulas (male/female).
    #[arg(long)]
    gender: Gender,

    /// Directory the report is written to.
    /// Can also be set via BODYCOMP_OUTPUT_DIR environment variable.
    #[arg(long, value_name = "DIR", env = "BODYCOMP_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Print metrics and insights as JSON instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Skip writing the spreadsheet report.
    #[arg(long)]
    no_report: bool,
}

/// Machine-readable run output for `--json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    name: &'a str,
    profile: &'a InputProfile,
    metrics: &'a MetricsRecord,
    insights: &'a [Insight],
    report: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    let name = validate_name(&args.name).context("Invalid name")?;
    let profile = InputProfile::new(args.weight, args.height, args.age, args.gender);
    profile.validate().context("Invalid measurements")?;

    log::info!(
        "Computing metrics for {} ({} kg, {} cm, {} years, {})",
        name,
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender
    );

    let metrics = compute_profile_metrics(profile);
    let insights = generate_insights(&metrics, profile.age_years);
    log::debug!("Metrics: {:?}", metrics);

    let report_path = if args.no_report {
        None
    } else {
        let config = ReportConfig {
            output_dir: args.output_dir.clone(),
            ..ReportConfig::default()
        };
        Some(generate_report(name, &profile, &metrics, &insights, &config)?)
    };

    if args.json {
        let output = JsonOutput {
            name,
            profile: &profile,
            metrics: &metrics,
            insights: &insights,
            report: report_path.as_ref().map(|p| p.display().to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(name, &metrics, &insights);
        if let Some(path) = &report_path {
            println!();
            println!("Report generated successfully: {}", path.display());
        }
    }

    Ok(())
}

/// Builds the chart data and writes the workbook.
fn generate_report(
    name: &str,
    profile: &InputProfile,
    metrics: &MetricsRecord,
    insights: &[Insight],
    config: &ReportConfig,
) -> Result<PathBuf> {
    let chart_style: &ChartStyle = &config.chart_style;
    let breakdown = composition_breakdown(metrics, chart_style);
    let comparison = metric_comparison(metrics, chart_style);

    let input = ReportInput {
        name,
        weight_kg: profile.weight_kg,
        height_cm: profile.height_cm,
        metrics,
        insights,
        breakdown: &breakdown,
        comparison: &comparison,
    };

    write_report(&input, config, Local::now().naive_local()).with_context(|| {
        format!(
            "Failed to write report to {}",
            config.output_dir.display()
        )
    })
}

fn print_summary(name: &str, metrics: &MetricsRecord, insights: &[Insight]) {
    println!("=== Body Composition Summary: {} ===", name);
    println!();

    for (label, value) in metrics.display_rows() {
        println!("{:28} {}", label, value);
    }

    println!();
    println!("=== Personalized Insights ===");
    println!();

    for insight in insights {
        println!("{}", insight);
    }
}
