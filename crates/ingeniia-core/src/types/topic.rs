//! Course topic identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A neural-network topic served by the content service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Multilayer perceptron.
    Mlp,
    /// Convolutional neural network.
    Cnn,
    /// Recurrent neural network.
    Rnn,
}

impl Topic {
    /// Returns the path segment used by the content service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Mlp => "mlp",
            Topic::Cnn => "cnn",
            Topic::Rnn => "rnn",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mlp" => Ok(Topic::Mlp),
            "cnn" => Ok(Topic::Cnn),
            "rnn" => Ok(Topic::Rnn),
            _ => Err(InvalidInputError::Topic {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("MLP".parse::<Topic>().unwrap(), Topic::Mlp);
        assert_eq!("rnn".parse::<Topic>().unwrap(), Topic::Rnn);
    }

    #[test]
    fn rejects_unknown_topic() {
        assert!("transformer".parse::<Topic>().is_err());
    }
}
