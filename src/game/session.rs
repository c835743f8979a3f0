//! Guessing session
//!
//! A [`PlaySession`] walks a built tree one prompt at a time. The caller reads the pending
//! [`Prompt`] with [`PlaySession::prompt`] and feeds the player's [`Answer`] back through
//! [`PlaySession::answer`], so console and scripted drivers share the same state machine.
//!
//! Answering "don't know" at a question descends into the branch with fewer leaves and defers
//! the other one. When a guess is rejected the most recently deferred branch is tried next.
use crate::data::dataset::FeatureValue;
use crate::errors::GuessError;
use crate::trees::node::Node;
use crate::trees::question::Question;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Unknown,
}

/// What the session is waiting for.
#[derive(Debug, PartialEq)]
pub enum Prompt<'t> {
    /// Answer the question of a decision node.
    Question(&'t Question),
    /// Confirm or reject the predicted label of a leaf.
    Guess(&'t FeatureValue),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The player confirmed this label.
    Guessed(FeatureValue),
    /// A guess was rejected and no deferred branch was left.
    Exhausted,
}

#[derive(Debug, PartialEq)]
pub enum Step<'t> {
    Pending(Prompt<'t>),
    Finished(Outcome),
}

pub struct PlaySession<'t> {
    node: &'t Node,
    backtrack: Vec<&'t Node>,
    outcome: Option<Outcome>,
}

impl<'t> PlaySession<'t> {
    pub fn new(root: &'t Node) -> Self {
        Self {
            node: root,
            backtrack: Vec::new(),
            outcome: None,
        }
    }

    pub fn prompt(&self) -> Step<'t> {
        if let Some(outcome) = &self.outcome {
            return Step::Finished(outcome.clone());
        }
        let node: &'t Node = self.node;
        match node {
            Node::Leaf(leaf) => Step::Pending(Prompt::Guess(leaf.prediction())),
            Node::Decision(decision) => Step::Pending(Prompt::Question(&decision.question)),
        }
    }

    /// Applies the player's answer to the pending prompt and returns the next step.
    ///
    /// At a guess, anything but [`Answer::Yes`] rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::SessionFinished`] if the session already has an outcome.
    pub fn answer(&mut self, answer: Answer) -> Result<Step<'t>, GuessError> {
        if self.outcome.is_some() {
            return Err(GuessError::SessionFinished);
        }
        let node: &'t Node = self.node;
        match node {
            Node::Leaf(leaf) => match answer {
                Answer::Yes => {
                    self.outcome = Some(Outcome::Guessed(leaf.prediction().clone()));
                }
                Answer::No | Answer::Unknown => match self.backtrack.pop() {
                    Some(deferred) => {
                        debug!(
                            "Guess {} rejected, backtracking ({} deferred left)",
                            leaf.prediction(),
                            self.backtrack.len()
                        );
                        self.node = deferred;
                    }
                    None => self.outcome = Some(Outcome::Exhausted),
                },
            },
            Node::Decision(decision) => match answer {
                Answer::Yes => self.node = decision.true_branch.as_ref(),
                Answer::No => self.node = decision.false_branch.as_ref(),
                Answer::Unknown => {
                    let true_count = decision.true_branch.leaf_count();
                    let false_count = decision.false_branch.leaf_count();
                    let (explore, defer) = if false_count < true_count {
                        (decision.false_branch.as_ref(), decision.true_branch.as_ref())
                    } else {
                        (decision.true_branch.as_ref(), decision.false_branch.as_ref())
                    };
                    debug!(
                        "Unknown answer to {}: {} leaves if true, {} if false",
                        decision.question, true_count, false_count
                    );
                    self.backtrack.push(defer);
                    self.node = explore;
                }
            },
        }
        Ok(self.prompt())
    }

    /// Number of branches waiting to be tried.
    pub fn deferred(&self) -> usize {
        self.backtrack.len()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
}
