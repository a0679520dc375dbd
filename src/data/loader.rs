//! CSV dataset readers.
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::data::Dataset;
use crate::math::{Array1, Array2};

/// Configuration for reading a labeled delimited file. The first row must
/// be a header.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Column name holding the class label.
    pub label_column: String,
    /// Columns to skip when collecting features (ids, free text, ...).
    pub ignore_columns: Vec<String>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            label_column: "label".to_string(),
            ignore_columns: Vec::new(),
        }
    }
}

/// Read a labeled CSV file into a `Dataset`.
///
/// Label strings are mapped to dense class indices in sorted order, so the
/// mapping is a function of the file contents alone. Every non-label,
/// non-ignored column must parse as `f32`.
pub fn read_labeled_csv<P: AsRef<Path>>(path: P, config: &CsvReaderConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    let label_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(&config.label_column))
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;

    let feature_indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| {
            *i != label_idx && !config.ignore_columns.iter().any(|ig| ig.eq_ignore_ascii_case(h))
        })
        .map(|(i, _)| i)
        .collect();
    if feature_indices.is_empty() {
        return Err(anyhow!("No feature columns detected in CSV header"));
    }

    let feature_names: Vec<String> = feature_indices
        .iter()
        .map(|&i| headers.get(i).unwrap_or_default().to_string())
        .collect();

    let mut features = Vec::new();
    let mut raw_labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?
            .trim()
            .to_string();
        raw_labels.push(label);

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.trim().parse::<f32>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }
    }

    if raw_labels.is_empty() {
        return Err(anyhow!(
            "Dataset {} contains no data rows",
            path.as_ref().display()
        ));
    }

    // Sorted label strings -> dense class ids.
    let class_map: BTreeMap<String, u32> = {
        let mut unique: Vec<&String> = raw_labels.iter().collect();
        unique.sort();
        unique.dedup();
        unique
            .into_iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i as u32))
            .collect()
    };
    let class_names: Vec<String> = class_map.keys().cloned().collect();
    let y: Vec<u32> = raw_labels.iter().map(|l| class_map[l]).collect();

    let n_rows = y.len();
    let x = Array2::from_shape_vec((n_rows, feature_indices.len()), features)?;

    Ok(Dataset::new(
        x,
        Array1::from_vec(y),
        feature_names,
        class_names,
    )?)
}

/// Read the public 569-row, 30-feature binary tumor dataset in its
/// canonical headerless layout: `id,diagnosis,f1..f30` with diagnosis
/// `B` (benign, class 0) or `M` (malignant, class 1).
pub fn load_wdbc<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut n_features = None;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if record.len() < 3 {
            return Err(anyhow!(
                "Row {} has {} fields, expected id, diagnosis and features",
                row_idx + 1,
                record.len()
            ));
        }

        let label = match record.get(1).unwrap_or_default().trim() {
            "B" => 0u32,
            "M" => 1u32,
            other => {
                return Err(anyhow!(
                    "Unknown diagnosis '{}' at row {} (expected B or M)",
                    other,
                    row_idx + 1
                ))
            }
        };
        labels.push(label);

        let row: Vec<f32> = record
            .iter()
            .skip(2)
            .map(|field| field.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("Invalid feature value at row {}", row_idx + 1))?;

        match n_features {
            None => n_features = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(anyhow!(
                    "Row {} has {} features, expected {}",
                    row_idx + 1,
                    row.len(),
                    n
                ))
            }
            _ => {}
        }
        features.extend(row);
    }

    let n_features =
        n_features.ok_or_else(|| anyhow!("Dataset {} is empty", path.as_ref().display()))?;
    let n_rows = labels.len();

    let feature_names = (0..n_features).map(|i| format!("feature_{}", i)).collect();
    let x = Array2::from_shape_vec((n_rows, n_features), features)?;

    Ok(Dataset::new(
        x,
        Array1::from_vec(labels),
        feature_names,
        vec!["benign".to_string(), "malignant".to_string()],
    )?)
}
