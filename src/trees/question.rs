use crate::data::dataset::{FeatureValue, Row};
use std::fmt::{self, Display, Formatter};

/// How a [`Question`] compares a row's value with its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// `row[feature] == value`, used for categorical values.
    Equal,
    /// `row[feature] >= value`, used for numeric values.
    AtLeast,
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Equal => write!(f, "=="),
            Comparison::AtLeast => write!(f, ">="),
        }
    }
}

/// Binary test on one feature column.
///
/// The comparison is fixed when the question is created, from the kind of `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    feature_index: usize,
    value: FeatureValue,
    comparison: Comparison,
}

impl Question {
    pub fn new(feature_index: usize, value: FeatureValue) -> Self {
        let comparison = if value.is_numeric() {
            Comparison::AtLeast
        } else {
            Comparison::Equal
        };
        Self {
            feature_index,
            value,
            comparison,
        }
    }

    pub fn feature_index(&self) -> usize {
        self.feature_index
    }

    pub fn value(&self) -> &FeatureValue {
        &self.value
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn matches(&self, row: &Row) -> bool {
        let Some(example) = row.feature(self.feature_index) else {
            return false;
        };
        match self.comparison {
            Comparison::Equal => example == &self.value,
            Comparison::AtLeast => example >= &self.value,
        }
    }

    /// Renders the question using the given feature names, falling back to `column N`.
    pub fn describe(&self, feature_names: &[String]) -> String {
        match feature_names.get(self.feature_index) {
            Some(name) => format!("Is {} {} {}?", name, self.comparison, self.value),
            None => self.to_string(),
        }
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Is column {} {} {}?",
            self.feature_index, self.comparison, self.value
        )
    }
}
