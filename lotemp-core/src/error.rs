use std::{io, path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Coordinate '{value}' exceeds max length of {max} characters")]
    CoordinateTooLong { value: String, max: usize },

    #[error("Coordinate '{0}' is not a decimal number")]
    InvalidCoordinate(String),

    #[error("{axis} {value} is out of range [-{limit}, {limit}]")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: String,
        limit: u8,
    },

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config is missing '{key}: <value>'")]
    MissingKey { key: &'static str },

    #[error("Config line {line_no} has key '{key}' but no value")]
    MalformedLine { line_no: usize, key: &'static str },

    #[error("Failed to initialise HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("Request to weather API failed")]
    Transport(#[source] reqwest::Error),

    #[error("Weather API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse weather API response")]
    Decode(#[from] serde_json::Error),
}

/// Broad class of an [`Error`], used by the binary to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Config,
    Transport,
    Parse,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Input | ErrorKind::Config => 1,
            ErrorKind::Transport => 3,
            ErrorKind::Parse => 4,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CoordinateTooLong { .. }
            | Error::InvalidCoordinate(_)
            | Error::CoordinateOutOfRange { .. } => ErrorKind::Input,
            Error::NoHomeDir
            | Error::ConfigNotFound(_)
            | Error::ConfigRead { .. }
            | Error::MissingKey { .. }
            | Error::MalformedLine { .. } => ErrorKind::Config,
            Error::Client(_) | Error::Timeout(_) | Error::Transport(_) | Error::Status { .. } => {
                ErrorKind::Transport
            }
            Error::Decode(_) => ErrorKind::Parse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_per_kind() {
        assert_eq!(ErrorKind::Input.exit_code(), 1);
        assert_eq!(ErrorKind::Config.exit_code(), 1);
        assert_eq!(ErrorKind::Transport.exit_code(), 3);
        assert_eq!(ErrorKind::Parse.exit_code(), 4);
    }

    #[test]
    fn config_errors_are_config_kind() {
        let err = Error::MissingKey { key: "latitude" };
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("latitude"));

        let err = Error::ConfigNotFound(PathBuf::from("/nowhere/.lotemp"));
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("/nowhere/.lotemp"));
    }

    #[test]
    fn too_long_message_mentions_limit() {
        let err = Error::CoordinateTooLong { value: "60.1711600".into(), max: 8 };
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(err.to_string().contains("max length of 8"));
    }

    #[test]
    fn decode_errors_are_parse_kind() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).kind(), ErrorKind::Parse);
    }
}
