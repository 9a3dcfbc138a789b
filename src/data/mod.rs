pub mod dataset;
pub mod reader;
pub mod synthetic;

pub use dataset::{BinaryLabels, Dataset, Features};
pub use reader::{load_features, load_labels, read_matrix, DataPaths};
