//! Small maud-based HTML report with embedded plotly figures.
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

use crate::bench::BenchSummary;
use crate::metrics;
use crate::report::plots::{plot_calibration_curve, plot_confidence_histogram};
use crate::report::text::format_percentage;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub struct ReportSection {
    title: String,
    blocks: Vec<Markup>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.blocks.push(content);
    }

    pub fn add_plot(&mut self, plot: Plot) {
        let div_id = format!("{}-plot-{}", slugify(&self.title), self.blocks.len());
        self.blocks
            .push(PreEscaped(plot.to_inline_html(Some(div_id.as_str()))));
    }
}

pub struct Report {
    title: String,
    version: String,
    description: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: description.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn render(&self) -> String {
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let page = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style {
                        "body { font-family: sans-serif; margin: 2em auto; max-width: 60em; }"
                        "table { border-collapse: collapse; }"
                        "th, td { border: 1px solid #999; padding: 0.4em 0.8em; }"
                    }
                }
                body {
                    h1 { (self.title) }
                    p { (self.description) }
                    p.meta {
                        "Version " (self.version) ", generated " (generated)
                    }
                    @for section in &self.sections {
                        h2 { (section.title) }
                        @for block in &section.blocks {
                            (block)
                        }
                    }
                }
            }
        };
        page.into_string()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(&path, self.render())
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        log::info!("Report saved to {}", path.as_ref().display());
        Ok(())
    }
}

/// Assemble and write the benchmark report for a finished run.
pub fn write_html_report<P: AsRef<Path>>(summary: &BenchSummary, path: P) -> Result<()> {
    let mut report = Report::new(
        "Tabular classifier benchmark",
        env!("CARGO_PKG_VERSION"),
        "Held-out accuracy comparison across the configured models.",
    );

    struct SummaryRow {
        name: String,
        accuracy: String,
        interval: String,
        correct: String,
    }
    let rows: Vec<SummaryRow> = summary
        .results
        .iter()
        .map(|result| {
            let (lo, hi) =
                metrics::accuracy_confidence_interval(result.correct, result.total, 0.05);
            SummaryRow {
                name: result.name.clone(),
                accuracy: format_percentage(result.accuracy),
                interval: format!(
                    "{} - {}",
                    format_percentage(lo as f32),
                    format_percentage(hi as f32)
                ),
                correct: format!("{} / {}", result.correct, result.total),
            }
        })
        .collect();

    let mut overview = ReportSection::new("Summary");
    overview.add_content(html! {
        p {
            (summary.n_rows) " rows, " (summary.n_features) " features; "
            (summary.n_train) " train / " (summary.n_test) " test "
            "(fraction " (summary.test_fraction) ", seed " (summary.seed) ")."
        }
        table {
            tr { th { "Model" } th { "Accuracy" } th { "95% interval" } th { "Correct" } }
            @for row in &rows {
                tr {
                    td { (row.name) }
                    td { (row.accuracy) }
                    td { (row.interval) }
                    td { (row.correct) }
                }
            }
        }
    });
    report.add_section(overview);

    for result in &summary.results {
        let confidences: Vec<f64> = result
            .probabilities
            .iter()
            .zip(result.predictions.iter())
            .map(|(row, &label)| f64::from(row[label as usize]))
            .collect();
        let correct: Vec<bool> = result
            .predictions
            .iter()
            .zip(summary.truth.iter())
            .map(|(a, b)| a == b)
            .collect();

        let mut section = ReportSection::new(result.name.clone());
        section.add_content(html! {
            p { "Prediction confidence and calibration on the held-out rows." }
        });
        match plot_confidence_histogram(&confidences, &correct, &result.name) {
            Ok(plot) => section.add_plot(plot),
            Err(e) => log::warn!("Skipping confidence histogram for {}: {}", result.name, e),
        }
        match plot_calibration_curve(&confidences, &correct, 10, &result.name) {
            Ok(plot) => section.add_plot(plot),
            Err(e) => log::warn!("Skipping calibration curve for {}: {}", result.name, e),
        }
        report.add_section(section);
    }

    report.save_to_file(path)
}

fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
