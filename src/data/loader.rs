//! CSV dataset loader
use super::dataset::{Dataset, FeatureValue, Row};
use crate::errors::GuessError;
use csv::ReaderBuilder;
use log::{debug, info};
use std::io::Read;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ColumnKind {
    Integer,
    Float,
    Categorical,
}

impl ColumnKind {
    fn infer<'a>(mut cells: impl Iterator<Item = &'a str> + Clone) -> Self {
        if cells.clone().all(|cell| cell.parse::<i64>().is_ok()) {
            ColumnKind::Integer
        } else if cells.all(|cell| cell.parse::<f64>().is_ok()) {
            ColumnKind::Float
        } else {
            ColumnKind::Categorical
        }
    }

    fn convert(self, cell: &str) -> FeatureValue {
        match self {
            ColumnKind::Integer => cell
                .parse::<i64>()
                .map(FeatureValue::Integer)
                .unwrap_or_else(|_| cell.into()),
            ColumnKind::Float => cell
                .parse::<f64>()
                .map(FeatureValue::Float)
                .unwrap_or_else(|_| cell.into()),
            ColumnKind::Categorical => cell.into(),
        }
    }
}

/// Reads a [`Dataset`] from CSV.
///
/// Every column gets a single kind decided from all of its cells: integer if every cell parses
/// as `i64`, float if every cell parses as `f64`, categorical otherwise. By default all columns
/// are used and the last one holds the label.
#[derive(Clone, Debug)]
pub struct CsvLoader {
    has_headers: bool,
    delimiter: u8,
    feature_columns: Option<Vec<String>>,
    label_column: Option<String>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            feature_columns: None,
            label_column: None,
        }
    }

    pub fn set_has_headers(&mut self, has_headers: bool) {
        self.has_headers = has_headers;
    }

    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    /// Restricts the features to the named header columns, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if no column is given.
    pub fn set_feature_columns(&mut self, columns: Vec<String>) -> Result<(), GuessError> {
        if columns.is_empty() {
            return Err(GuessError::TooFewColumns(0));
        }
        self.feature_columns = Some(columns);
        Ok(())
    }

    pub fn set_label_column(&mut self, column: String) {
        self.label_column = Some(column);
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset, GuessError> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());
        let reader = std::fs::File::open(path)?;
        self.load_reader(reader)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset, GuessError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Option<Vec<String>> = if self.has_headers {
            Some(reader.headers()?.iter().map(str::to_string).collect())
        } else {
            None
        };

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        let width = records.first().ok_or(GuessError::EmptyDataset)?.len();
        if width < 2 {
            return Err(GuessError::TooFewColumns(width));
        }

        let label_index = match &self.label_column {
            Some(name) => Self::column_index(headers.as_deref(), name)?,
            None => width - 1,
        };
        let feature_indices = match &self.feature_columns {
            Some(names) => names
                .iter()
                .map(|name| Self::column_index(headers.as_deref(), name))
                .collect::<Result<Vec<_>, _>>()?,
            None => (0..width).filter(|&index| index != label_index).collect(),
        };

        let column_name = |index: usize| match &headers {
            Some(headers) => headers[index].clone(),
            None => format!("column {}", index),
        };
        let feature_names = feature_indices.iter().map(|&i| column_name(i)).collect();

        let kind_of = |index: usize| {
            ColumnKind::infer(records.iter().map(move |record| record[index].as_str()))
        };
        let feature_kinds: Vec<_> = feature_indices.iter().map(|&i| kind_of(i)).collect();
        let label_kind = kind_of(label_index);

        let rows = records
            .iter()
            .map(|record| {
                let features = feature_indices
                    .iter()
                    .zip(feature_kinds.iter())
                    .map(|(&index, kind)| kind.convert(&record[index]))
                    .collect();
                Row::new(features, label_kind.convert(&record[label_index]))
            })
            .collect();

        let dataset = Dataset::with_feature_names(rows, feature_names)?;
        info!(
            "Loaded {} rows with {} features, label column {}",
            dataset.nrows(),
            dataset.n_features(),
            column_name(label_index)
        );
        Ok(dataset)
    }

    fn column_index(headers: Option<&[String]>, name: &str) -> Result<usize, GuessError> {
        let headers = headers.ok_or(GuessError::NoHeaders)?;
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| GuessError::UnknownColumn(name.to_string()))
    }
}
