use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use ndarray::Array2;

use super::dataset::{BinaryLabels, Dataset, Features};
use crate::{HyperplaneErr, Result};

pub const FEATURES_TRAIN: &str = "classifier_binary_2d_linear_features_train.dat";
pub const FEATURES_TEST: &str = "classifier_binary_2d_linear_features_test.dat";
pub const LABELS_TRAIN: &str = "classifier_binary_2d_linear_labels_train.dat";
pub const LABELS_TEST: &str = "classifier_binary_2d_linear_labels_test.dat";

/// Reads a delimited numeric table, one row per non-empty line.
///
/// Values may be separated by commas, whitespace or both.
///
/// # Arguments
/// * `path` - The file to read.
///
/// # Returns
/// A `(rows, cols)` matrix or an error if the file is missing, has a non-numeric token,
/// has rows of different widths or has no rows at all.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f32>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| HyperplaneErr::io(path, e))?;

    let mut data = Vec::new();
    let mut ncols = None;
    let mut nrows = 0;

    for (i, line) in content.lines().enumerate() {
        let start = data.len();

        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value = token.parse::<f32>().map_err(|_| HyperplaneErr::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                token: token.to_string(),
            })?;

            data.push(value);
        }

        let width = data.len() - start;
        if width == 0 {
            continue;
        }

        let expected = *ncols.get_or_insert(width);
        if width != expected {
            return Err(HyperplaneErr::SizeMismatch {
                a: "row",
                b: "first row",
                got: width,
                expected,
            });
        }

        nrows += 1;
    }

    let Some(ncols) = ncols else {
        return Err(HyperplaneErr::EmptyDataset(format!(
            "file '{}'",
            path.display()
        )));
    };

    debug!("read {nrows}x{ncols} table from {}", path.display());

    Array2::from_shape_vec((nrows, ncols), data).map_err(|_| HyperplaneErr::SizeMismatch {
        a: "table",
        b: "rows times columns",
        got: nrows,
        expected: ncols,
    })
}

/// Loads a feature file (one sample per line) into a column-wise `Features`.
pub fn load_features<P: AsRef<Path>>(path: P) -> Result<Features> {
    read_matrix(path).map(Features::from_rows)
}

/// Loads a label file, either one label per line or all labels on one line.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<BinaryLabels> {
    let table = read_matrix(path)?;
    let labels = table.into_iter().collect();
    BinaryLabels::new(labels)
}

/// Locations of the four input files.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub features_train: PathBuf,
    pub features_test: PathBuf,
    pub labels_train: PathBuf,
    pub labels_test: PathBuf,
}

impl DataPaths {
    /// Creates the default file layout under `dir`.
    ///
    /// # Arguments
    /// * `dir` - The directory holding the data files.
    ///
    /// # Returns
    /// A new `DataPaths` instance.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();

        Self {
            features_train: dir.join(FEATURES_TRAIN),
            features_test: dir.join(FEATURES_TEST),
            labels_train: dir.join(LABELS_TRAIN),
            labels_test: dir.join(LABELS_TEST),
        }
    }

    /// Loads every file.
    ///
    /// # Returns
    /// The loaded `Dataset` or the first error found.
    pub fn load(&self) -> Result<Dataset> {
        let dataset = Dataset {
            features_train: load_features(&self.features_train)?,
            features_test: load_features(&self.features_test)?,
            labels_train: load_labels(&self.labels_train)?,
            labels_test: load_labels(&self.labels_test)?,
        };

        info!(
            "loaded {} training and {} test samples",
            dataset.features_train.num_vectors(),
            dataset.features_test.num_vectors()
        );

        Ok(dataset)
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}
