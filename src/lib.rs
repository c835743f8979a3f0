//! # Guess-tree
//!
//! `guess-tree` builds a decision tree from a small labelled table and uses it to play a
//! "guess the entity" game: every decision node becomes a yes/no question, and every leaf a
//! guess the player can confirm or reject.
//!
//! ## Example Usage
//!
//! Building a tree and walking it with scripted answers:
//!
//! ```rust
//! use guess_tree::data::dataset::{Dataset, Row};
//! use guess_tree::game::session::{Answer, Outcome, PlaySession, Step};
//! use guess_tree::trees::builder::build_tree;
//!
//! let rows = vec![
//!     Row::new(vec!["red".into(), 3.into()], "Apple".into()),
//!     Row::new(vec!["yellow".into(), 3.into()], "Apple".into()),
//!     Row::new(vec!["red".into(), 1.into()], "Grape".into()),
//! ];
//! let dataset = Dataset::new(rows).unwrap();
//! let root = build_tree(&dataset).unwrap();
//!
//! let mut session = PlaySession::new(&root);
//! session.answer(Answer::No).unwrap();
//! let step = session.answer(Answer::Yes).unwrap();
//! assert_eq!(step, Step::Finished(Outcome::Guessed("Grape".into())));
//! ```

/// Dataset types and the CSV loader
pub mod data;
/// Error type
pub mod errors;
/// Interactive guessing game
pub mod game;
/// Decision tree induction
pub mod trees;
