//! Line-oriented driver for [`PlaySession`]
use super::params::AnswerTokens;
use super::session::{Answer, Outcome, PlaySession, Prompt, Step};
use crate::errors::GuessError;
use crate::trees::node::Node;
use log::{info, warn};
use std::io::{BufRead, Write};

/// Plays rounds over any line-based input and output, e.g. stdin/stdout or in-memory buffers.
pub struct ConsoleGame<R, W> {
    input: R,
    output: W,
    tokens: AnswerTokens,
    feature_names: Vec<String>,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    pub fn new(input: R, output: W, tokens: AnswerTokens, feature_names: Vec<String>) -> Self {
        Self {
            input,
            output,
            tokens,
            feature_names,
        }
    }

    pub fn tokens(&self) -> &AnswerTokens {
        &self.tokens
    }

    /// Plays a single round with a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::InputClosed`] if the input ends before the round is over, or an
    /// I/O error from the underlying streams.
    pub fn play_round(&mut self, root: &Node) -> Result<Outcome, GuessError> {
        let mut session = PlaySession::new(root);
        let mut step = session.prompt();
        loop {
            match step {
                Step::Finished(outcome) => {
                    self.report(&outcome)?;
                    return Ok(outcome);
                }
                Step::Pending(Prompt::Question(question)) => {
                    writeln!(self.output, "{}", question.describe(&self.feature_names))?;
                }
                Step::Pending(Prompt::Guess(label)) => {
                    writeln!(self.output, "Predict: {} - did I guess it?", label)?;
                }
            }
            let answer = self.read_answer()?;
            step = session.answer(answer)?;
        }
    }

    /// Plays rounds until the player declines another one or the input ends.
    ///
    /// Returns the number of rounds played.
    pub fn run(&mut self, root: &Node) -> Result<usize, GuessError> {
        let mut rounds = 0;
        loop {
            self.play_round(root)?;
            rounds += 1;

            writeln!(self.output, "Play again?")?;
            let line = match self.read_line() {
                Ok(line) => line,
                Err(GuessError::InputClosed) => break,
                Err(err) => return Err(err),
            };
            if self.tokens.parse(&line) == Some(Answer::No) {
                break;
            }
        }
        info!("Finished after {} round(s)", rounds);
        Ok(rounds)
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn report(&mut self, outcome: &Outcome) -> Result<(), GuessError> {
        match outcome {
            Outcome::Guessed(label) => writeln!(self.output, "Got it, it's {}!", label)?,
            Outcome::Exhausted => {
                writeln!(self.output, "I don't know which one you mean :(")?;
                writeln!(self.output, "One of the answers must have been wrong.")?;
            }
        }
        Ok(())
    }

    fn read_answer(&mut self) -> Result<Answer, GuessError> {
        loop {
            let line = self.read_line()?;
            if let Some(answer) = self.tokens.parse(&line) {
                return Ok(answer);
            }
            warn!("Unrecognised answer {:?}", line.trim());
            writeln!(self.output, "Please answer {}.", self.tokens.hint())?;
        }
    }

    fn read_line(&mut self) -> Result<String, GuessError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GuessError::InputClosed);
        }
        Ok(line)
    }
}
