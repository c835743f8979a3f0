use crate::errors::GuessError;
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

/// A single cell of the dataset.
///
/// `Integer` and `Float` are numeric and compare with each other by value, so `3 == 3.0`.
/// `Categorical` values only compare with other categorical values.
#[derive(Clone, Debug)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
    Categorical(String),
}

impl FeatureValue {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, FeatureValue::Categorical(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Integer(value) => value.to_f64(),
            FeatureValue::Float(value) => Some(*value),
            FeatureValue::Categorical(_) => None,
        }
    }

    /// Ordering used to sort the distinct values of a column.
    ///
    /// Numeric values come first in ascending order, followed by categorical values in
    /// lexicographic order.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FeatureValue::Integer(a), FeatureValue::Integer(b)) => a.cmp(b),
            (FeatureValue::Categorical(a), FeatureValue::Categorical(b)) => a.cmp(b),
            (FeatureValue::Categorical(_), _) => Ordering::Greater,
            (_, FeatureValue::Categorical(_)) => Ordering::Less,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        }
    }
}

impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FeatureValue::Integer(a), FeatureValue::Integer(b)) => a == b,
            (FeatureValue::Categorical(a), FeatureValue::Categorical(b)) => a == b,
            (FeatureValue::Categorical(_), _) | (_, FeatureValue::Categorical(_)) => false,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for FeatureValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FeatureValue::Integer(a), FeatureValue::Integer(b)) => a.partial_cmp(b),
            (FeatureValue::Categorical(a), FeatureValue::Categorical(b)) => a.partial_cmp(b),
            (FeatureValue::Categorical(_), _) | (_, FeatureValue::Categorical(_)) => None,
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(value) => write!(f, "{}", value),
            FeatureValue::Float(value) => write!(f, "{}", value),
            FeatureValue::Categorical(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        FeatureValue::Integer(value.into())
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Categorical(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Categorical(value)
    }
}

/// Feature values followed by the label.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    features: Vec<FeatureValue>,
    label: FeatureValue,
}

impl Row {
    pub fn new(features: Vec<FeatureValue>, label: FeatureValue) -> Self {
        Self { features, label }
    }

    /// Builds a row from raw values, the last one being the label.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::TooFewColumns`] if there is no feature in front of the label.
    pub fn from_values(mut values: Vec<FeatureValue>) -> Result<Self, GuessError> {
        if values.len() < 2 {
            return Err(GuessError::TooFewColumns(values.len()));
        }
        let label = values.pop().ok_or(GuessError::TooFewColumns(0))?;
        Ok(Self::new(values, label))
    }

    pub fn features(&self) -> &[FeatureValue] {
        &self.features
    }

    pub fn feature(&self, index: usize) -> Option<&FeatureValue> {
        self.features.get(index)
    }

    pub fn label(&self) -> &FeatureValue {
        &self.label
    }

    /// Number of values including the label.
    pub fn len(&self) -> usize {
        self.features.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Labels of the given rows, one entry per row, in row order.
pub fn class_counts<'a>(rows: &[&'a Row]) -> Vec<&'a FeatureValue> {
    rows.iter().map(|row| row.label()).collect()
}

/// Non-empty, rectangular collection of rows.
pub struct Dataset {
    rows: Vec<Row>,
    feature_names: Vec<String>,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    features: [")?;
        for name in &self.feature_names {
            write!(f, "{}, ", name)?;
        }
        write!(f, "],\n    rows: [\n")?;

        for row in &self.rows {
            write!(f, "        [")?;
            for value in row.features() {
                write!(f, "{}, ", value)?;
            }
            writeln!(f, "=> {}],", row.label())?;
        }

        write!(f, "    ]\n}}")
    }
}

impl Dataset {
    /// Creates a dataset whose feature columns are named `column 0`, `column 1`, ...
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows or the rows differ in length.
    pub fn new(rows: Vec<Row>) -> Result<Self, GuessError> {
        let n_features = Self::validate(&rows)?;
        let feature_names = (0..n_features).map(|i| format!("column {}", i)).collect();
        Ok(Self {
            rows,
            feature_names,
        })
    }

    /// Creates a dataset with explicit feature column names.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::new`], and additionally if the number of names doesn't match the
    /// number of feature columns.
    pub fn with_feature_names(
        rows: Vec<Row>,
        feature_names: Vec<String>,
    ) -> Result<Self, GuessError> {
        let n_features = Self::validate(&rows)?;
        if feature_names.len() != n_features {
            return Err(GuessError::FeatureNamesMismatch {
                names: feature_names.len(),
                features: n_features,
            });
        }
        Ok(Self {
            rows,
            feature_names,
        })
    }

    fn validate(rows: &[Row]) -> Result<usize, GuessError> {
        let first = rows.first().ok_or(GuessError::EmptyDataset)?;
        let expected = first.len();
        if expected < 2 {
            return Err(GuessError::TooFewColumns(expected));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(GuessError::RaggedRow {
                row: index,
                expected,
                found: row.len(),
            });
        }
        Ok(expected - 1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_refs(&self) -> Vec<&Row> {
        self.rows.iter().collect()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_rows() -> Vec<Row> {
        vec![
            Row::new(vec!["red".into(), 3.into()], "Apple".into()),
            Row::new(vec!["yellow".into(), 3.into()], "Apple".into()),
            Row::new(vec!["red".into(), 1.into()], "Grape".into()),
        ]
    }

    #[test]
    fn test_numeric_values_compare_across_kinds() {
        assert_eq!(FeatureValue::Integer(3), FeatureValue::Float(3.0));
        assert!(FeatureValue::Float(3.5) >= FeatureValue::Integer(3));
        assert_ne!(FeatureValue::from("3"), FeatureValue::Integer(3));
        assert_eq!(
            FeatureValue::from("3").partial_cmp(&FeatureValue::Integer(3)),
            None
        );
    }

    #[test]
    fn test_total_cmp_sorts_numbers_before_categories() {
        let mut values: Vec<FeatureValue> = vec![
            "b".into(),
            10.into(),
            "a".into(),
            2.5.into(),
            (-1).into(),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        let rendered: Vec<_> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["-1", "2.5", "10", "a", "b"]);
    }

    #[test]
    fn test_row_from_values() {
        let row = Row::from_values(vec!["red".into(), 3.into(), "Apple".into()]).unwrap();
        assert_eq!(row.features().len(), 2);
        assert_eq!(row.label(), &FeatureValue::from("Apple"));
        assert_eq!(row.len(), 3);
        assert_eq!(row.feature(1), Some(&FeatureValue::Integer(3)));
        assert_eq!(row.feature(2), None);
    }

    #[test]
    fn test_row_from_values_needs_a_feature() {
        let result = Row::from_values(vec!["Apple".into()]);
        assert!(matches!(result, Err(GuessError::TooFewColumns(1))));
    }

    #[test]
    fn test_dataset_new() {
        let dataset = Dataset::new(fruit_rows()).unwrap();
        assert_eq!(dataset.nrows(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.feature_names(), &["column 0", "column 1"]);
    }

    #[test]
    fn test_dataset_empty() {
        assert!(matches!(
            Dataset::new(Vec::new()),
            Err(GuessError::EmptyDataset)
        ));
    }

    #[test]
    fn test_dataset_ragged() {
        let mut rows = fruit_rows();
        rows.push(Row::new(vec!["green".into()], "Lime".into()));
        match Dataset::new(rows) {
            Err(GuessError::RaggedRow {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_dataset_feature_names_mismatch() {
        let result = Dataset::with_feature_names(fruit_rows(), vec!["color".to_string()]);
        assert!(matches!(
            result,
            Err(GuessError::FeatureNamesMismatch {
                names: 1,
                features: 2
            })
        ));
    }

    #[test]
    fn test_class_counts_keeps_row_order() {
        let rows = fruit_rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let counts = class_counts(&refs);
        let rendered: Vec<_> = counts.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["Apple", "Apple", "Grape"]);
    }

    #[test]
    fn test_dataset_formatting() {
        let dataset = Dataset::with_feature_names(
            fruit_rows(),
            vec!["color".to_string(), "diameter".to_string()],
        )
        .unwrap();

        let expected_str = "\
Dataset {
    features: [color, diameter, ],
    rows: [
        [red, 3, => Apple],
        [yellow, 3, => Apple],
        [red, 1, => Grape],
    ]
}";

        assert_eq!(format!("{:?}", dataset), expected_str);
    }
}
