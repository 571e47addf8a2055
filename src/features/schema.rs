use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::descriptors::FeatureTable;

use super::SchemaError;

/// Ordered column names an estimator was trained on
///
/// Persisted as one name per line. At inference the schema is the only
/// column contract: every name must be present and order follows the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from ordered names
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the schema lists no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Restrict and reorder `table` to the schema
    ///
    /// Fails with [`SchemaError::Mismatch`] naming every absent column.
    /// Extra table columns are ignored.
    pub fn project(&self, table: &FeatureTable) -> Result<FeatureTable, SchemaError> {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(table.n_columns());
        for (i, name) in table.columns().iter().enumerate().rev() {
            positions.insert(name.as_str(), i);
        }

        let mut indices = Vec::with_capacity(self.columns.len());
        let mut missing = Vec::new();
        for name in &self.columns {
            match positions.get(name.as_str()) {
                Some(&i) => indices.push(i),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(SchemaError::Mismatch {
                missing,
                expected: self.columns.len(),
            });
        }
        Ok(table.select(&indices))
    }

    /// Write one name per line
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), SchemaError> {
        for name in &self.columns {
            writeln!(writer, "{name}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a schema written by [`FeatureSchema::write_to`]
    ///
    /// Surrounding whitespace and blank lines are ignored.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, SchemaError> {
        let mut columns = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let name = line.trim();
            if !name.is_empty() {
                columns.push(name.to_string());
            }
        }
        if columns.is_empty() {
            return Err(SchemaError::NoFeatures);
        }
        Ok(Self { columns })
    }

    /// Read a schema file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Write a schema file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), SchemaError> {
        let file = File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}
