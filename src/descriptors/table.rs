use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::DescriptorError;

/// Header of the row-label column in every descriptor table.
pub const LABEL_COLUMN: &str = "Name";

/// Ordered, named numeric columns with one labelled row per molecule
///
/// Values are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl FeatureTable {
    /// Empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, label: impl Into<String>, row: Vec<f64>) -> Result<(), DescriptorError> {
        let label = label.into();
        if row.len() != self.columns.len() {
            return Err(DescriptorError::RowWidth {
                label,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.labels.push(label);
        self.values.extend(row);
        Ok(())
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row labels in order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Values of one row
    pub fn row(&self, index: usize) -> &[f64] {
        let width = self.columns.len();
        &self.values[index * width..(index + 1) * width]
    }

    /// Iterate rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows()).map(move |i| self.row(i))
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy out one column
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows().map(|row| row[index]).collect()
    }

    /// Remove a column by name and return its values
    pub fn take_column(&mut self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        let width = self.columns.len();
        let taken = self.column(index);
        let mut kept = Vec::with_capacity(self.values.len() - taken.len());
        for (i, value) in self.values.iter().enumerate() {
            if i % width != index {
                kept.push(*value);
            }
        }
        self.values = kept;
        self.columns.remove(index);
        Some(taken)
    }

    /// New table holding the given columns, in the given order
    pub fn select(&self, indices: &[usize]) -> FeatureTable {
        let mut values = Vec::with_capacity(self.n_rows() * indices.len());
        for row in self.rows() {
            values.extend(indices.iter().map(|&i| row[i]));
        }
        FeatureTable {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            labels: self.labels.clone(),
            values,
        }
    }

    /// Reorder rows to follow `labels`
    ///
    /// Duplicate labels are matched first-come first-served. Every label must
    /// appear in the table; extra table rows are dropped.
    pub fn align_to(&self, labels: &[String]) -> Result<FeatureTable, String> {
        let mut positions: HashMap<&str, VecDeque<usize>> = HashMap::new();
        for (i, label) in self.labels.iter().enumerate() {
            positions.entry(label.as_str()).or_default().push_back(i);
        }

        let mut aligned = FeatureTable::new(self.columns.clone());
        for label in labels {
            let index = positions
                .get_mut(label.as_str())
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| format!("no descriptor row for molecule '{label}'"))?;
            aligned.labels.push(label.clone());
            aligned.values.extend_from_slice(self.row(index));
        }
        Ok(aligned)
    }

    /// Read a CSV whose first column is the row label
    ///
    /// Every other cell must parse as a number.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let malformed = |reason: String| DescriptorError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();
        match headers.get(0) {
            Some(first) if first.trim() == LABEL_COLUMN => {}
            Some(first) => {
                return Err(malformed(format!(
                    "first column is '{first}', expected '{LABEL_COLUMN}'"
                )))
            }
            None => return Err(malformed("missing header".to_string())),
        }

        let columns: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
        let mut table = FeatureTable::new(columns);

        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let label = record.get(0).unwrap_or_default().to_string();
            let mut row = Vec::with_capacity(table.n_columns());
            for (col, cell) in record.iter().skip(1).enumerate() {
                let value: f64 = cell.trim().parse().map_err(|_| {
                    malformed(format!(
                        "row {} ('{label}'), column '{}': '{cell}' is not numeric",
                        line + 1,
                        table.columns[col]
                    ))
                })?;
                row.push(value);
            }
            table.push_row(label, row)?;
        }
        Ok(table)
    }

    /// Write the table as CSV with the label column first
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), DescriptorError> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        let mut header = Vec::with_capacity(self.n_columns() + 1);
        header.push(LABEL_COLUMN);
        header.extend(self.columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for (label, row) in self.labels.iter().zip(self.rows()) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(label.clone());
            record.extend(row.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
