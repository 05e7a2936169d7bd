//! Spreadsheet summary report.
//!
//! Lays out the profile, the metrics table, the chart data with native pie
//! and bar charts, the insights and a footer on a single worksheet, then
//! writes the workbook as `<name>_body_composition_summary.xlsx`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::{Chart, ChartType};
use umya_spreadsheet::{Spreadsheet, Worksheet, new_file, writer};

use crate::chart::{ChartStyle, CompositionBreakdown, MetricComparison};
use crate::error::ReportError;
use crate::formulas::round_to_tenth;
use crate::insights::Insight;
use crate::metrics::MetricsRecord;

/// Name given to the report worksheet.
const SHEET_NAME: &str = "Summary";

/// Last column used by the layout.
const LAST_COLUMN: &str = "D";

const FILE_SUFFIX: &str = "_body_composition_summary.xlsx";

/// Colors and fonts for the document (ARGB hex).
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub banner_fill: String,
    pub banner_text: String,
    pub panel_fill: String,
    pub row_fills: [String; 2],
    pub title_size: f64,
    pub section_size: f64,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            banner_fill: "FF2E8B57".to_string(),
            banner_text: "FFFFFFFF".to_string(),
            panel_fill: "FFF0F8FF".to_string(),
            row_fills: ["FFF5F5F5".to_string(), "FFFFFFFF".to_string()],
            title_size: 24.0,
            section_size: 16.0,
        }
    }
}

/// Where and how the report is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub style: ReportStyle,
    pub chart_style: ChartStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            style: ReportStyle::default(),
            chart_style: ChartStyle::default(),
        }
    }
}

/// Everything the document shows.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub name: &'a str,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub metrics: &'a MetricsRecord,
    pub insights: &'a [Insight],
    pub breakdown: &'a CompositionBreakdown,
    pub comparison: &'a MetricComparison,
}

/// File name for a person's report. Characters unsafe in file names become `_`.
pub fn report_file_name(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", safe, FILE_SUFFIX)
}

/// Builds the workbook and writes it to the configured output directory.
///
/// Returns the path of the written file.
pub fn write_report(
    input: &ReportInput<'_>,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<PathBuf, ReportError> {
    ensure_dir(&config.output_dir)?;

    let book = build_workbook(input, config, generated_at)?;
    let path = config.output_dir.join(report_file_name(input.name));

    writer::xlsx::write(&book, &path).map_err(|e| ReportError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    log::info!("Report written to {}", path.display());
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), ReportError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| ReportError::OutputDir {
        path: dir.display().to_string(),
        source,
    })
}

/// Builds the in-memory workbook.
pub fn build_workbook(
    input: &ReportInput<'_>,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<Spreadsheet, ReportError> {
    let mut book = new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| ReportError::MissingSheet(SHEET_NAME.to_string()))?;
    sheet.set_name(SHEET_NAME);

    for (column, width) in [("A", 34.0), ("B", 18.0), ("C", 34.0), ("D", 18.0)] {
        sheet.get_column_dimension_mut(column).set_width(width);
    }

    let mut layout = Layout {
        sheet,
        style: &config.style,
        row: 1,
    };

    layout.title(input.name);
    layout.profile(input.weight_kg, input.height_cm);
    layout.metrics_table(input.metrics);
    layout.visual_breakdown(input.breakdown, input.comparison, &config.chart_style);
    layout.insights(input.insights);
    layout.footer(generated_at);

    log::debug!("Report layout uses {} rows", layout.row - 1);
    Ok(book)
}

/// Writes sections top to bottom, tracking the next free row.
struct Layout<'a> {
    sheet: &'a mut Worksheet,
    style: &'a ReportStyle,
    row: u32,
}

impl Layout<'_> {
    fn title(&mut self, name: &str) {
        let row = self.row;
        let size = self.style.title_size;
        self.banner(row, "BODY COMPOSITION SUMMARY", size);
        self.banner(row + 1, &format!("Generated for: {}", name), 12.0);
        self.row += 3;
    }

    fn profile(&mut self, weight_kg: f64, height_cm: f64) {
        let row = self.row;
        let style = self.style;
        self.fill_row(row, &style.panel_fill);
        self.fill_row(row + 1, &style.panel_fill);

        self.text(&format!("A{}", row), "USER PROFILE");
        self.bold(&format!("A{}", row), 14.0);
        self.text(&format!("A{}", row + 1), &format!("Weight: {} kg", weight_kg));
        self.text(&format!("C{}", row + 1), &format!("Height: {} cm", height_cm));
        self.row += 3;
    }

    fn metrics_table(&mut self, metrics: &MetricsRecord) {
        self.section("KEY BODY METRICS");

        for (i, (label, value)) in metrics.display_rows().into_iter().enumerate() {
            let row = self.row;
            let style = self.style;
            self.fill_row(row, &style.row_fills[i % 2]);
            self.text(&format!("A{}", row), label);
            self.bold(&format!("A{}", row), 11.0);
            self.text(&format!("B{}", row), &value);
            self.row += 1;
        }
        self.row += 1;
    }

    fn visual_breakdown(
        &mut self,
        breakdown: &CompositionBreakdown,
        comparison: &MetricComparison,
        chart_style: &ChartStyle,
    ) {
        self.section("VISUAL BREAKDOWN");

        let titles = self.row;
        self.text(&format!("A{}", titles), &breakdown.title);
        self.bold(&format!("A{}", titles), 12.0);
        self.text(&format!("C{}", titles), &comparison.title);
        self.bold(&format!("C{}", titles), 12.0);

        let header = titles + 1;
        for (cell, label) in [("A", "Component"), ("B", "Share (%)"), ("C", "Metric"), ("D", "Value")] {
            self.text(&format!("{}{}", cell, header), label);
            self.bold(&format!("{}{}", cell, header), 11.0);
        }

        let first = header + 1;
        for (i, (slice, share)) in breakdown.slices.iter().zip(breakdown.shares()).enumerate() {
            let row = first + i as u32;
            self.text(&format!("A{}", row), slice.label);
            self.number(&format!("B{}", row), round_to_tenth(share));
            self.fill(&format!("A{}", row), &argb(&slice.color));
        }
        for (i, bar) in comparison.bars.iter().enumerate() {
            let row = first + i as u32;
            self.text(&format!("C{}", row), bar.label);
            self.number(&format!("D{}", row), bar.value);
            self.fill(&format!("C{}", row), &argb(&bar.color));
        }

        let data_rows = breakdown.slices.len().max(comparison.bars.len()) as u32;
        let chart_top = first + data_rows + 1;
        let (width, height) = chart_style.anchor_size;

        let pie = ChartSpec {
            kind: ChartType::PieChart,
            title: &breakdown.title,
            series_title: "Share (%)",
            categories: breakdown.labels(),
            values: series_range("B", first, first + breakdown.slices.len() as u32 - 1),
        };
        let bars = ChartSpec {
            kind: ChartType::BarChart,
            title: &comparison.title,
            series_title: "Value",
            categories: comparison.labels(),
            values: series_range("D", first, first + comparison.bars.len() as u32 - 1),
        };

        self.chart(pie, 1, chart_top, width, height);
        self.chart(bars, width + 2, chart_top, width, height);

        self.row = chart_top + height + 1;
    }

    fn insights(&mut self, insights: &[Insight]) {
        self.section("PERSONALIZED INSIGHTS");

        let style = self.style;
        for insight in insights {
            let row = self.row;
            self.fill_row(row, &style.panel_fill);
            self.sheet
                .add_merge_cells(format!("A{}:{}{}", row, LAST_COLUMN, row));
            self.text(&format!("A{}", row), &insight.to_string());
            self.row += 1;
        }
        self.row += 1;
    }

    fn footer(&mut self, generated_at: NaiveDateTime) {
        let row = self.row;
        self.banner(
            row,
            "Thank you for using the Body Composition Analyzer!",
            10.0,
        );
        self.banner(
            row + 1,
            &format!(
                "Report generated on: {}",
                generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
            9.0,
        );
        self.banner(
            row + 2,
            "For more information, contact support@bodycomposition.com",
            9.0,
        );
        self.row += 3;
    }

    // === Cell helpers ===

    fn section(&mut self, title: &str) {
        let row = self.row;
        let size = self.style.section_size;
        self.banner(row, title, size);
        self.row += 1;
    }

    fn banner(&mut self, row: u32, text: &str, size: f64) {
        let style = self.style;
        self.fill_row(row, &style.banner_fill);
        self.sheet
            .add_merge_cells(format!("A{}:{}{}", row, LAST_COLUMN, row));

        let coordinate = format!("A{}", row);
        self.text(&coordinate, text);
        let font = self.sheet.get_style_mut(coordinate.as_str()).get_font_mut();
        font.set_bold(true);
        font.set_size(size);
        font.get_color_mut().set_argb(style.banner_text.as_str());
    }

    fn text(&mut self, coordinate: &str, value: &str) {
        self.sheet.get_cell_mut(coordinate).set_value(value);
    }

    fn number(&mut self, coordinate: &str, value: f64) {
        self.sheet.get_cell_mut(coordinate).set_value_number(value);
    }

    fn bold(&mut self, coordinate: &str, size: f64) {
        let font = self.sheet.get_style_mut(coordinate).get_font_mut();
        font.set_bold(true);
        font.set_size(size);
    }

    fn fill(&mut self, coordinate: &str, argb: &str) {
        self.sheet
            .get_style_mut(coordinate)
            .set_background_color(argb);
    }

    fn fill_row(&mut self, row: u32, argb: &str) {
        for column in ["A", "B", "C", "D"] {
            self.fill(&format!("{}{}", column, row), argb);
        }
    }

    fn chart(&mut self, spec: ChartSpec<'_>, column: u32, row: u32, width: u32, height: u32) {
        let mut from_marker = MarkerType::default();
        from_marker.set_coordinate(format!("{}{}", column_letter(column), row));
        let mut to_marker = MarkerType::default();
        to_marker.set_coordinate(format!(
            "{}{}",
            column_letter(column + width),
            row + height
        ));

        let mut chart = Chart::default();
        chart
            .new_chart(spec.kind, from_marker, to_marker, vec![spec.values.as_str()])
            .set_title(spec.title)
            .set_series_title(vec![spec.series_title])
            .set_series_point_title(spec.categories);
        self.sheet.add_chart(chart);
    }
}

/// One native chart over a single data column.
struct ChartSpec<'a> {
    kind: ChartType,
    title: &'a str,
    series_title: &'a str,
    /// Literal category labels, one per data row.
    categories: Vec<&'static str>,
    values: String,
}

/// Chart palettes are RGB; cell fills want ARGB.
fn argb(rgb: &str) -> String {
    format!("FF{}", rgb.trim_start_matches('#'))
}

fn series_range(column: &str, first: u32, last: u32) -> String {
    format!(
        "{}!${}${}:${}${}",
        SHEET_NAME, column, first, column, last
    )
}

/// 1-based column index to letters (1 → A, 27 → AA).
fn column_letter(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}
