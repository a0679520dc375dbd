use crate::bench::BenchSummary;
use crate::metrics;

/// Render a [0, 1] scalar as a percentage with three decimal places.
pub fn format_percentage(value: f32) -> String {
    format!("{:.3}%", value * 100.0)
}

/// Print one accuracy line per model to stdout.
///
/// Stdout stays minimal on purpose; shapes and confidence intervals go to
/// the log instead.
pub fn print_summary(summary: &BenchSummary) {
    for result in &summary.results {
        println!(
            "{} accuracy: {}",
            result.name,
            format_percentage(result.accuracy)
        );
        let (lo, hi) = metrics::accuracy_confidence_interval(result.correct, result.total, 0.05);
        log::info!(
            "{}: {} of {} test rows correct, 95% interval [{}, {}]",
            result.name,
            result.correct,
            result.total,
            format_percentage(lo as f32),
            format_percentage(hi as f32)
        );
    }
}
