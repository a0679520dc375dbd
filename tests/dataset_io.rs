//! Integration tests for the CSV dataset readers.

use std::io::Write;

use tabbench::data::{load_wdbc, read_labeled_csv, CsvReaderConfig};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

// ---------------------------------------------------------------------------
// WDBC layout
// ---------------------------------------------------------------------------

#[test]
fn wdbc_reader_parses_rows_and_labels() {
    let file = write_temp(
        "8510426,B,13.54,14.36,87.46\n\
         8510653,B,13.08,15.71,85.63\n\
         842302,M,17.99,10.38,122.8\n\
         842517,M,20.57,17.77,132.9\n",
    );

    let dataset = load_wdbc(file.path()).unwrap();
    assert_eq!(dataset.n_rows(), 4);
    assert_eq!(dataset.n_features(), 3);
    assert_eq!(dataset.n_classes(), 2);
    assert_eq!(dataset.class_names, vec!["benign", "malignant"]);
    assert_eq!(dataset.y.to_vec(), vec![0, 0, 1, 1]);
    assert!((dataset.x[(2, 0)] - 17.99).abs() < 1e-5);
}

#[test]
fn wdbc_reader_rejects_unknown_diagnosis() {
    let file = write_temp("1,X,1.0,2.0\n");
    let err = load_wdbc(file.path()).unwrap_err();
    assert!(err.to_string().contains("Unknown diagnosis"));
}

#[test]
fn wdbc_reader_rejects_ragged_rows() {
    let file = write_temp("1,B,1.0,2.0\n2,M,1.0,2.0,3.0\n");
    assert!(load_wdbc(file.path()).is_err());
}

#[test]
fn wdbc_reader_rejects_empty_files() {
    let file = write_temp("");
    assert!(load_wdbc(file.path()).is_err());
}

// ---------------------------------------------------------------------------
// Generic labeled CSV
// ---------------------------------------------------------------------------

#[test]
fn csv_reader_maps_labels_in_sorted_order() {
    let file = write_temp(
        "f1,f2,label\n\
         1.0,2.0,positive\n\
         3.0,4.0,negative\n\
         5.0,6.0,positive\n",
    );

    let dataset = read_labeled_csv(file.path(), &CsvReaderConfig::default()).unwrap();
    assert_eq!(dataset.n_rows(), 3);
    assert_eq!(dataset.n_features(), 2);
    assert_eq!(dataset.feature_names, vec!["f1", "f2"]);
    // Sorted label strings: negative -> 0, positive -> 1.
    assert_eq!(dataset.class_names, vec!["negative", "positive"]);
    assert_eq!(dataset.y.to_vec(), vec![1, 0, 1]);
}

#[test]
fn csv_reader_honors_ignore_columns() {
    let file = write_temp(
        "id,f1,label\n\
         a,1.0,x\n\
         b,2.0,y\n",
    );

    let config = CsvReaderConfig {
        ignore_columns: vec!["id".to_string()],
        ..CsvReaderConfig::default()
    };
    let dataset = read_labeled_csv(file.path(), &config).unwrap();
    assert_eq!(dataset.n_features(), 1);
    assert_eq!(dataset.feature_names, vec!["f1"]);
}

#[test]
fn csv_reader_requires_the_label_column() {
    let file = write_temp("f1,f2\n1.0,2.0\n");
    let err = read_labeled_csv(file.path(), &CsvReaderConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Missing label column"));
}

#[test]
fn csv_reader_rejects_non_numeric_features() {
    let file = write_temp("f1,label\noops,x\n");
    assert!(read_labeled_csv(file.path(), &CsvReaderConfig::default()).is_err());
}

#[test]
fn csv_reader_rejects_empty_data() {
    let file = write_temp("f1,label\n");
    assert!(read_labeled_csv(file.path(), &CsvReaderConfig::default()).is_err());
}

#[test]
fn missing_file_is_fatal() {
    assert!(load_wdbc("/nonexistent/wdbc.data").is_err());
}
