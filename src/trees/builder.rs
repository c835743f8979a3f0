//! Decision tree induction
//!
//! Greedy recursive splitting on Gini impurity. Every value picked as a split point is recorded
//! for the rest of the build and is never offered again, in any column or branch.
use super::node::{DecisionNode, Leaf, Node};
use super::question::Question;
use crate::data::dataset::{class_counts, Dataset, FeatureValue, Row};
use crate::errors::GuessError;
use log::{debug, info};

/// Values already chosen as split points during one build.
#[derive(Clone, Debug, Default)]
pub struct UsedValues {
    values: Vec<FeatureValue>,
}

impl UsedValues {
    pub fn contains(&self, value: &FeatureValue) -> bool {
        self.values.iter().any(|used| used == value)
    }

    pub fn record(&mut self, value: FeatureValue) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureValue> {
        self.values.iter()
    }
}

/// Gini impurity of the labels in `rows`.
pub fn gini(rows: &[&Row]) -> f64 {
    let n = rows.len() as f64;
    let mut counts: Vec<(&FeatureValue, usize)> = Vec::new();
    for label in class_counts(rows) {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.iter().fold(1.0, |impurity, (_, count)| {
        let p_label = *count as f64 / n;
        impurity - p_label * p_label
    })
}

/// Uncertainty of the parent minus the size-weighted impurity of both partitions.
pub fn info_gain(true_rows: &[&Row], false_rows: &[&Row], current_uncertainty: f64) -> f64 {
    let p = true_rows.len() as f64 / (true_rows.len() + false_rows.len()) as f64;
    current_uncertainty - p * gini(true_rows) - (1.0 - p) * gini(false_rows)
}

/// Splits `rows` into those matching `question` and the rest, keeping row order.
pub fn partition<'a>(rows: &[&'a Row], question: &Question) -> (Vec<&'a Row>, Vec<&'a Row>) {
    rows.iter().copied().partition(|row| question.matches(row))
}

/// Builds one tree. Consumed by [`TreeBuilder::build`], so the used values never outlive the
/// build they belong to.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    used_values: UsedValues,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            used_values: UsedValues::default(),
        }
    }

    pub fn used_values(&self) -> &UsedValues {
        &self.used_values
    }

    /// Builds the tree for `rows`.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::EmptyDataset`] if `rows` is empty.
    pub fn build(mut self, rows: &[&Row]) -> Result<Node, GuessError> {
        self.grow(rows)
    }

    fn grow(&mut self, rows: &[&Row]) -> Result<Node, GuessError> {
        let (gain, question) = self.find_best_split(rows);

        match question {
            Some(question) if gain > 0.0 => {
                let (true_rows, false_rows) = partition(rows, &question);
                let true_branch = self.grow(&true_rows)?;
                let false_branch = self.grow(&false_rows)?;
                Ok(Node::Decision(DecisionNode::new(
                    question,
                    true_branch,
                    false_branch,
                )))
            }
            _ => {
                let leaf = Leaf::new(rows).ok_or(GuessError::EmptyDataset)?;
                debug!(
                    "Leaf with {} row(s), predicting {}",
                    rows.len(),
                    leaf.prediction()
                );
                Ok(Node::Leaf(leaf))
            }
        }
    }

    /// Finds the question with the highest information gain over every feature value that
    /// hasn't been used yet.
    ///
    /// Candidates that leave one side empty are skipped. Equal gains favour the candidate
    /// enumerated later. The value of the winning question is recorded as used, even when its
    /// gain is zero. A gain of zero means no split is worth making.
    pub fn find_best_split(&mut self, rows: &[&Row]) -> (f64, Option<Question>) {
        let mut best_gain = 0.0;
        let mut best_question = None;
        let current_uncertainty = gini(rows);
        let num_features = rows.first().map_or(0, |row| row.features().len());

        for feature_index in 0..num_features {
            let mut unique_values: Vec<&FeatureValue> = rows
                .iter()
                .filter_map(|row| row.feature(feature_index))
                .collect();
            unique_values.sort_by(|a, b| a.total_cmp(b));
            unique_values.dedup();

            for value in unique_values {
                if self.used_values.contains(value) {
                    continue;
                }
                let question = Question::new(feature_index, value.clone());
                let (true_rows, false_rows) = partition(rows, &question);

                if true_rows.is_empty() || false_rows.is_empty() {
                    continue;
                }

                let gain = info_gain(&true_rows, &false_rows, current_uncertainty);
                if gain >= best_gain {
                    best_gain = gain;
                    best_question = Some(question);
                }
            }
        }

        if let Some(question) = &best_question {
            debug!(
                "Best split for {} row(s): {} (gain {:.4})",
                rows.len(),
                question,
                best_gain
            );
            self.used_values.record(question.value().clone());
        }
        (best_gain, best_question)
    }
}

/// Builds a tree over every row of `dataset`.
pub fn build_tree(dataset: &Dataset) -> Result<Node, GuessError> {
    let root = TreeBuilder::new().build(&dataset.row_refs())?;
    info!(
        "Built tree with {} leaves and depth {} from {} rows",
        root.leaf_count(),
        root.depth(),
        dataset.nrows()
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::CsvLoader;
    use approx::assert_relative_eq;

    fn row(values: Vec<FeatureValue>) -> Row {
        Row::from_values(values).unwrap()
    }

    fn fruit_rows() -> Vec<Row> {
        vec![
            row(vec!["red".into(), 3.into(), "Apple".into()]),
            row(vec!["yellow".into(), 3.into(), "Apple".into()]),
            row(vec!["red".into(), 1.into(), "Grape".into()]),
        ]
    }

    fn labelled(labels: &[&str]) -> Vec<Row> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &label)| Row::new(vec![(i as i64).into()], label.into()))
            .collect()
    }

    fn leaves(node: &Node) -> Vec<&Leaf> {
        match node {
            Node::Leaf(leaf) => vec![leaf],
            Node::Decision(decision) => {
                let mut found = leaves(&decision.true_branch);
                found.extend(leaves(&decision.false_branch));
                found
            }
        }
    }

    #[test]
    fn test_gini_pure() {
        let rows = labelled(&["a", "a", "a"]);
        let refs: Vec<&Row> = rows.iter().collect();
        assert_relative_eq!(gini(&refs), 0.0);
    }

    #[test]
    fn test_gini_mixed() {
        let rows = labelled(&["a", "a", "b"]);
        let refs: Vec<&Row> = rows.iter().collect();
        assert_relative_eq!(gini(&refs), 4.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_uniform_labels() {
        let rows = labelled(&["a", "b", "c", "d"]);
        let refs: Vec<&Row> = rows.iter().collect();
        assert_relative_eq!(gini(&refs), 1.0 - 1.0 / 4.0, epsilon = 1e-12);

        let rows = labelled(&["a", "b", "c", "d", "a", "b", "c", "d"]);
        let refs: Vec<&Row> = rows.iter().collect();
        assert_relative_eq!(gini(&refs), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_info_gain_of_perfect_split() {
        let rows = labelled(&["a", "a", "b", "b"]);
        let refs: Vec<&Row> = rows.iter().collect();
        let gain = info_gain(&refs[..2], &refs[2..], gini(&refs));
        assert_relative_eq!(gain, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_partition_is_complete() {
        let rows = fruit_rows();
        let refs: Vec<&Row> = rows.iter().collect();
        for question in [
            Question::new(0, "red".into()),
            Question::new(1, 3.into()),
            Question::new(1, 1.into()),
        ] {
            let (true_rows, false_rows) = partition(&refs, &question);
            assert_eq!(true_rows.len() + false_rows.len(), refs.len());
            for row in &refs {
                let in_true = true_rows.iter().any(|r| std::ptr::eq(*r, *row));
                let in_false = false_rows.iter().any(|r| std::ptr::eq(*r, *row));
                assert!(in_true != in_false);
            }
        }
    }

    #[test]
    fn test_identical_features_make_a_leaf() {
        let rows = vec![
            row(vec!["red".into(), 3.into(), "Apple".into()]),
            row(vec!["red".into(), 3.into(), "Cherry".into()]),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        assert_relative_eq!(gini(&refs), 0.5);

        let mut builder = TreeBuilder::new();
        let (gain, question) = builder.find_best_split(&refs);
        assert_eq!(gain, 0.0);
        assert!(question.is_none());

        let root = TreeBuilder::new().build(&refs).unwrap();
        match root {
            Node::Leaf(leaf) => {
                assert_eq!(
                    leaf.label_counts(),
                    &[FeatureValue::from("Apple"), FeatureValue::from("Cherry")]
                );
                assert_eq!(leaf.prediction(), &FeatureValue::from("Apple"));
            }
            other => panic!("expected a leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_fruit_tree() {
        let rows = fruit_rows();
        let refs: Vec<&Row> = rows.iter().collect();

        let mut builder = TreeBuilder::new();
        let root = builder.grow(&refs).unwrap();

        match &root {
            Node::Decision(decision) => {
                assert_eq!(decision.question, Question::new(1, 3.into()));
                assert!(decision.true_branch.is_leaf());
                assert!(decision.false_branch.is_leaf());
            }
            other => panic!("expected a decision node, got {:?}", other),
        }
        for leaf in leaves(&root) {
            let first = leaf.prediction();
            assert!(leaf.label_counts().iter().all(|label| label == first));
        }
        assert_eq!(root.classify(&rows[2]), &FeatureValue::from("Grape"));

        // The zero-gain winner in the pure branch is still recorded.
        let used: Vec<_> = builder.used_values().iter().map(|v| v.to_string()).collect();
        assert_eq!(used, vec!["3", "yellow"]);
    }

    #[test]
    fn test_first_split_has_positive_gain() {
        let rows = fruit_rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let (gain, question) = TreeBuilder::new().find_best_split(&refs);
        assert!(gain > 0.0);
        assert_relative_eq!(gain, 4.0 / 9.0, epsilon = 1e-12);
        assert_eq!(question, Some(Question::new(1, 3.into())));
    }

    #[test]
    fn test_used_values_are_never_offered_again() {
        let rows = fruit_rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let mut builder = TreeBuilder::new();

        let mut chosen = Vec::new();
        loop {
            let (gain, question) = builder.find_best_split(&refs);
            match question {
                Some(question) => {
                    assert!(gain >= 0.0);
                    assert!(!chosen.contains(question.value()));
                    chosen.push(question.value().clone());
                }
                None => {
                    assert_eq!(gain, 0.0);
                    break;
                }
            }
        }

        // `>= 3`, then both colours. `>= 1` never divides the rows.
        assert_eq!(chosen.len(), 3);
        assert_eq!(chosen[0], FeatureValue::Integer(3));
        assert!(chosen.contains(&"red".into()));
        assert!(chosen.contains(&"yellow".into()));
        assert_eq!(builder.used_values().len(), 3);
    }

    #[test]
    fn test_equal_gains_favour_the_later_candidate() {
        let rows = vec![
            row(vec!["a".into(), "p".into(), "first".into()]),
            row(vec!["b".into(), "q".into(), "second".into()]),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        let (gain, question) = TreeBuilder::new().find_best_split(&refs);
        assert_eq!(gain, 0.5);
        assert_eq!(question, Some(Question::new(1, "q".into())));
    }

    #[test]
    fn test_recorded_value_is_excluded_regardless_of_column() {
        let rows = vec![
            row(vec![1.into(), 2.into(), "a".into()]),
            row(vec![0.into(), 2.into(), "b".into()]),
            row(vec![0.into(), 1.into(), "b".into()]),
        ];
        let refs: Vec<&Row> = rows.iter().collect();

        let (gain, question) = TreeBuilder::new().find_best_split(&refs);
        assert_relative_eq!(gain, 4.0 / 9.0, epsilon = 1e-12);
        assert_eq!(question, Some(Question::new(0, 1.into())));

        let mut builder = TreeBuilder::new();
        builder.used_values.record(1.into());
        let (gain, question) = builder.find_best_split(&refs);
        assert_relative_eq!(gain, 1.0 / 9.0, epsilon = 1e-12);
        assert_eq!(question, Some(Question::new(1, 2.into())));
    }

    #[test]
    fn test_builds_are_independent() {
        let rows = fruit_rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let first = TreeBuilder::new().build(&refs).unwrap();
        let second = TreeBuilder::new().build(&refs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_rows() {
        assert!(matches!(
            TreeBuilder::new().build(&[]),
            Err(GuessError::EmptyDataset)
        ));
    }

    #[test]
    fn test_build_tree_on_countries() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/datasets/countries.csv");
        let dataset = CsvLoader::new().load_path(path).unwrap();
        let root = build_tree(&dataset).unwrap();

        let found = leaves(&root);
        assert_eq!(found.len(), root.leaf_count());
        let total: usize = found.iter().map(|leaf| leaf.label_counts().len()).sum();
        assert_eq!(total, dataset.nrows());
        assert!(root.depth() >= 1);
    }
}
