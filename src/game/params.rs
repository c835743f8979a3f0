use super::session::Answer;
use crate::errors::GuessError;

/// Words the player types to answer a prompt.
///
/// Tokens are matched after trimming and ignoring case, and must be non-empty and distinct.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerTokens {
    yes: String,
    no: String,
    unknown: String,
}

impl Default for AnswerTokens {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerTokens {
    pub fn new() -> Self {
        Self {
            yes: "yes".to_string(),
            no: "no".to_string(),
            unknown: "don't know".to_string(),
        }
    }

    /// `tak` / `nie` / `nie wiem`.
    pub fn polish() -> Self {
        Self {
            yes: "tak".to_string(),
            no: "nie".to_string(),
            unknown: "nie wiem".to_string(),
        }
    }

    /// Creates a custom set of tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::InvalidToken`] if a token is empty or two tokens are the same.
    pub fn with_tokens(yes: &str, no: &str, unknown: &str) -> Result<Self, GuessError> {
        let tokens = Self {
            yes: Self::normalize(yes),
            no: Self::normalize(no),
            unknown: Self::normalize(unknown),
        };
        Self::validate(&tokens.yes, &[&tokens.no, &tokens.unknown])?;
        Self::validate(&tokens.no, &[&tokens.yes, &tokens.unknown])?;
        Self::validate(&tokens.unknown, &[&tokens.yes, &tokens.no])?;
        Ok(tokens)
    }

    pub fn set_yes(&mut self, token: &str) -> Result<(), GuessError> {
        let token = Self::normalize(token);
        Self::validate(&token, &[&self.no, &self.unknown])?;
        self.yes = token;
        Ok(())
    }

    pub fn set_no(&mut self, token: &str) -> Result<(), GuessError> {
        let token = Self::normalize(token);
        Self::validate(&token, &[&self.yes, &self.unknown])?;
        self.no = token;
        Ok(())
    }

    pub fn set_unknown(&mut self, token: &str) -> Result<(), GuessError> {
        let token = Self::normalize(token);
        Self::validate(&token, &[&self.yes, &self.no])?;
        self.unknown = token;
        Ok(())
    }

    pub fn yes(&self) -> &str {
        &self.yes
    }

    pub fn no(&self) -> &str {
        &self.no
    }

    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    pub fn parse(&self, input: &str) -> Option<Answer> {
        let input = Self::normalize(input);
        if input == self.yes {
            Some(Answer::Yes)
        } else if input == self.no {
            Some(Answer::No)
        } else if input == self.unknown {
            Some(Answer::Unknown)
        } else {
            None
        }
    }

    pub fn hint(&self) -> String {
        format!("'{}', '{}' or '{}'", self.yes, self.no, self.unknown)
    }

    fn normalize(token: &str) -> String {
        token.trim().to_lowercase()
    }

    fn validate(token: &str, others: &[&String]) -> Result<(), GuessError> {
        if token.is_empty() || others.iter().any(|other| other.as_str() == token) {
            return Err(GuessError::InvalidToken(token.to_string()));
        }
        Ok(())
    }
}
