//! Plotly figure helpers for the HTML report.
use itertools_num::linspace;
use plotly::common::Mode;
use plotly::layout::{Axis, Layout};
use plotly::{Histogram, Plot, Scatter};

/// Histogram of prediction confidences, split by correctness.
///
/// `confidences[i]` is the probability the model assigned to its own
/// prediction for test row `i`.
pub fn plot_confidence_histogram(
    confidences: &[f64],
    correct: &[bool],
    title: &str,
) -> Result<Plot, String> {
    if confidences.len() != correct.len() {
        return Err("Confidences and correctness flags must have the same length".to_string());
    }

    let mut hits = Vec::new();
    let mut misses = Vec::new();
    for (&c, &ok) in confidences.iter().zip(correct.iter()) {
        if ok {
            hits.push(c);
        } else {
            misses.push(c);
        }
    }

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Prediction confidence"))
        .y_axis(Axis::new().title("Count"));

    let mut plot = Plot::new();
    plot.add_trace(Histogram::new(hits).name("Correct"));
    plot.add_trace(Histogram::new(misses).name("Incorrect"));
    plot.set_layout(layout);
    Ok(plot)
}

/// Reliability curve: mean confidence vs. observed accuracy per bin.
///
/// A well calibrated model tracks the diagonal.
pub fn plot_calibration_curve(
    confidences: &[f64],
    correct: &[bool],
    n_bins: usize,
    title: &str,
) -> Result<Plot, String> {
    if confidences.len() != correct.len() {
        return Err("Confidences and correctness flags must have the same length".to_string());
    }
    if n_bins == 0 {
        return Err("Calibration curve needs at least one bin".to_string());
    }

    let edges: Vec<f64> = linspace::<f64>(0.0, 1.0, n_bins + 1).collect();

    let mut mean_confidence = Vec::new();
    let mut observed_accuracy = Vec::new();
    for w in edges.windows(2) {
        let (lo, hi) = (w[0], w[1]);
        let last = (hi - 1.0).abs() < f64::EPSILON;
        let mut sum = 0.0;
        let mut n = 0usize;
        let mut n_correct = 0usize;
        for (&c, &ok) in confidences.iter().zip(correct.iter()) {
            let inside = c >= lo && (c < hi || (last && c <= hi));
            if inside {
                sum += c;
                n += 1;
                if ok {
                    n_correct += 1;
                }
            }
        }
        if n > 0 {
            mean_confidence.push(sum / n as f64);
            observed_accuracy.push(n_correct as f64 / n as f64);
        }
    }

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Mean confidence"))
        .y_axis(Axis::new().title("Observed accuracy"));

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .name("Ideal")
            .mode(Mode::Lines),
    );
    plot.add_trace(
        Scatter::new(mean_confidence, observed_accuracy)
            .name("Model")
            .mode(Mode::LinesMarkers),
    );
    plot.set_layout(layout);
    Ok(plot)
}
