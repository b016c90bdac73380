//! `quorum-datasets` loads labelled tables into [`quorum::Dataset`] structures and generates
//! synthetic ones for tests and benchmarks.
//!
//! ## Loading a table
//!
//! Every column of a delimited text file is read as a floating point feature except for the label
//! column, which has to hold non-negative integral class ids. The header row provides the feature
//! names. Files ending in `.gz` are decompressed on the fly.
//!
//! ```ignore
//! let dataset = quorum_datasets::winequality_red("winequality-red.csv")?;
//! let (train, valid) = dataset.train_test_split(0.2, &mut rng)?;
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use ndarray::{Array1, Array2, Axis};
use ndarray_csv::{Array2Reader, ReadError};
use quorum::Dataset;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub mod generate;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not open the table: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("label column `{0}` is not in the header")]
    MissingLabel(String),
    #[error("could not parse the table: {0}")]
    Parse(#[from] ReadError),
    #[error("row {row} has label {value}, expected a non-negative integer")]
    InvalidLabel { row: usize, value: f64 },
}

/// How a table is read by [`load_csv`] and [`read_csv`]
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptions {
    delimiter: u8,
    label: String,
}

impl LoadOptions {
    /// Read the class from column `label`, fields separated by commas
    pub fn new<I: Into<String>>(label: I) -> Self {
        LoadOptions {
            delimiter: b',',
            label: label.into(),
        }
    }

    /// Field separator
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Name of the label column
    pub fn label<I: Into<String>>(mut self, label: I) -> Self {
        self.label = label.into();
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions::new("class")
    }
}

/// Load a labelled table from `path`
///
/// Gzip compressed files are recognized by their `.gz` extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> Result<Dataset<f64, usize>> {
    let file = BufReader::new(File::open(path.as_ref())?);

    let dataset = match path.as_ref().extension().and_then(|x| x.to_str()) {
        Some("gz") => read_csv(GzDecoder::new(file), options)?,
        _ => read_csv(file, options)?,
    };

    info!(
        rows = dataset.records.nrows(),
        features = dataset.records.ncols(),
        "loaded table"
    );

    Ok(dataset)
}

/// Read a labelled table with a header row from any reader
pub fn read_csv<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset<f64, usize>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = reader
        .headers()?
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>();

    let label_idx = header
        .iter()
        .position(|x| x == &options.label)
        .ok_or_else(|| LoadError::MissingLabel(options.label.clone()))?;

    let mut table: Array2<f64> = reader.deserialize_array2_dynamic()?;
    // an empty body yields a table without columns
    if table.nrows() == 0 {
        table = Array2::zeros((0, header.len()));
    }

    let feature_idx = (0..header.len())
        .filter(|&i| i != label_idx)
        .collect::<Vec<_>>();

    let targets = table
        .column(label_idx)
        .iter()
        .enumerate()
        .map(|(row, &value)| {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                Ok(value as usize)
            } else {
                Err(LoadError::InvalidLabel { row, value })
            }
        })
        .collect::<Result<Array1<usize>>>()?;

    let records = table.select(Axis(1), &feature_idx);
    let feature_names = feature_idx
        .iter()
        .map(|&i| header[i].clone())
        .collect::<Vec<_>>();

    debug!(label = %options.label, ?feature_names, "parsed header");

    Ok(Dataset::new(records, targets).with_feature_names(feature_names))
}

/// Red wine quality table
///
/// Semicolon separated, eleven physicochemical measurements and the `quality` score as label.
pub fn winequality_red<P: AsRef<Path>>(path: P) -> Result<Dataset<f64, usize>> {
    load_csv(path, &LoadOptions::new("quality").delimiter(b';'))
}
