//! Error type shared by the command handlers.

use std::fmt;

use holdem_ai::AiError;
use holdem_engine::errors::GameError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// stdout/stderr or hand-history writes
    Io(std::io::Error),

    /// Bad flags or card text
    InvalidInput(String),

    Config(String),

    /// The engine refused to continue
    Engine(GameError),

    /// Input closed in the middle of a hand
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<AiError> for CliError {
    fn from(error: AiError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = GameError::NotEnoughPlayers.into();
        assert_eq!(
            e.to_string(),
            "Engine error: At least two players with chips are required"
        );
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn unknown_style_is_invalid_input() {
        let e: CliError = AiError::UnknownAi("shark".into()).into();
        assert!(matches!(e, CliError::InvalidInput(ref m) if m.contains("shark")));
    }
}
