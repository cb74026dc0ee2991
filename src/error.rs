use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a rules backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    #[error("cannot notate {mv}: {reason}")]
    Notation { mv: String, reason: String },
}

/// Failures surfaced by the playback controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("could not load scenario position")]
    InvalidPosition(#[source] RulesError),

    /// `ply` is 1-based, matching the "Move N" status line.
    #[error("scripted move {ply} ({mv}) was rejected")]
    IllegalMove {
        ply: usize,
        mv: String,
        #[source]
        source: RulesError,
    },
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scenario file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("scenario '{scenario}': bad move text '{text}' at index {index}")]
    BadMove {
        scenario: String,
        index: usize,
        text: String,
    },

    #[error("no scenario named '{0}'")]
    Unknown(String),
}
