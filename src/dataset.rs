//! In-memory tabular dataset with a CSV file boundary.
//!
//! A [`Dataset`] is an ordered header row plus rows of string fields. No
//! schema validation or type coercion is applied: fields pass through from
//! the input file to the output file unchanged. The CSV boundary reads and
//! writes comma-separated files with a header row and no row index column.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::StageError;

/// An ordered, rectangular table of string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates an empty dataset with the given column names.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Creates a dataset from a header row and data rows.
    pub fn with_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header row is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a data row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Reads a dataset from a CSV file.
    ///
    /// The first row is taken as column names. Rows with a field count
    /// different from the header are rejected as malformed.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::MissingInputFile`] when `path` does not exist,
    /// and [`StageError::MalformedInput`] when the file cannot be parsed as
    /// tabular CSV.
    pub fn read_csv(path: &Path) -> Result<Self, StageError> {
        if !path.is_file() {
            return Err(StageError::MissingInputFile(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| malformed(path, &e))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| malformed(path, &e))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Writes the dataset to a CSV file, header row included.
    ///
    /// Parent directories are created as needed. The file is created or
    /// overwritten in one pass; on error no usable output is left behind.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnwritableOutputLocation`] when the output
    /// directory cannot be created or the file cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<(), StageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| unwritable(path, &e))?;
            }
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| unwritable(path, &e))?;

        writer
            .write_record(&self.headers)
            .map_err(|e| unwritable(path, &e))?;
        for row in &self.rows {
            writer.write_record(row).map_err(|e| unwritable(path, &e))?;
        }
        writer.flush().map_err(|e| unwritable(path, &e))?;

        Ok(())
    }
}

fn malformed(path: &Path, err: &dyn std::fmt::Display) -> StageError {
    StageError::MalformedInput {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn unwritable(path: &Path, err: &dyn std::fmt::Display) -> StageError {
    StageError::UnwritableOutputLocation {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
