use super::question::Question;
use crate::data::dataset::{FeatureValue, Row};
use std::fmt::{self, Display, Formatter};

/// Terminal node holding the labels of every row that reached it.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    label_counts: Vec<FeatureValue>,
}

impl Leaf {
    /// Collects the labels of `rows` in row order. Returns `None` for an empty subset.
    pub fn new(rows: &[&Row]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            label_counts: rows.iter().map(|row| row.label().clone()).collect(),
        })
    }

    pub fn label_counts(&self) -> &[FeatureValue] {
        &self.label_counts
    }

    /// First label that reached the leaf. Ties between labels are not broken by frequency.
    pub fn prediction(&self) -> &FeatureValue {
        &self.label_counts[0]
    }
}

/// Internal node asking one question, with a branch for each answer.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionNode {
    pub question: Question,
    pub true_branch: Box<Node>,
    pub false_branch: Box<Node>,
}

impl DecisionNode {
    pub fn new(question: Question, true_branch: Node, false_branch: Node) -> Self {
        Self {
            question,
            true_branch: Box::new(true_branch),
            false_branch: Box::new(false_branch),
        }
    }
}

/// Decision tree node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Decision(DecisionNode),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Decision(node) => {
                node.true_branch.leaf_count() + node.false_branch.leaf_count()
            }
        }
    }

    /// Number of decision nodes on the longest path to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Decision(node) => 1 + node.true_branch.depth().max(node.false_branch.depth()),
        }
    }

    /// Follows the questions for `row` down to a leaf and returns its prediction.
    pub fn classify(&self, row: &Row) -> &FeatureValue {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.prediction(),
                Node::Decision(decision) => {
                    node = if decision.question.matches(row) {
                        decision.true_branch.as_ref()
                    } else {
                        decision.false_branch.as_ref()
                    };
                }
            }
        }
    }

    /// Depth-first rendering of the tree, two spaces of indentation per level.
    pub fn render(&self, feature_names: &[String]) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, feature_names, "");
        out
    }

    fn write_tree(&self, out: &mut String, feature_names: &[String], spacing: &str) {
        match self {
            Node::Leaf(leaf) => {
                out.push_str(&format!("{}Predict: {}\n", spacing, leaf.prediction()));
            }
            Node::Decision(node) => {
                let nested = format!("{}  ", spacing);
                out.push_str(&format!(
                    "{}{}\n",
                    spacing,
                    node.question.describe(feature_names)
                ));
                out.push_str(&format!("{}--> True:\n", spacing));
                node.true_branch.write_tree(out, feature_names, &nested);
                out.push_str(&format!("{}--> False:\n", spacing));
                node.false_branch.write_tree(out, feature_names, &nested);
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&[]))
    }
}
