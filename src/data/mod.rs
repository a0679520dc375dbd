//! Dataset container, CSV loaders, and the train/test splitter.
pub mod dataset;
pub mod loader;
pub mod split;

pub use dataset::Dataset;
pub use loader::{load_wdbc, read_labeled_csv, CsvReaderConfig};
pub use split::{train_test_split, TrainTestSplit};
