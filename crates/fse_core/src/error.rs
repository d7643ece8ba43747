use thiserror::Error;

/// Every failure the engine reports. All of them are raised before the
/// match state is touched.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("Invalid team '{team}': {reason}")]
    Team { team: String, reason: String },

    #[error("Invalid pitch: {0}")]
    Pitch(String),

    #[error("Invalid match state: {0}")]
    MatchState(String),

    #[error("{entity} at ({x}, {y}) is outside the {width}x{height} pitch")]
    Position { entity: String, x: i32, y: i32, width: i32, height: i32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse error taxonomy for callers that only need to branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    Team,
    Pitch,
    MatchState,
    Position,
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::Argument(_) | MatchError::Json(_) => ErrorKind::Argument,
            MatchError::Team { .. } => ErrorKind::Team,
            MatchError::Pitch(_) => ErrorKind::Pitch,
            MatchError::MatchState(_) => ErrorKind::MatchState,
            MatchError::Position { .. } => ErrorKind::Position,
        }
    }

    pub(crate) fn team(team: &str, reason: impl Into<String>) -> Self {
        MatchError::Team { team: team.to_string(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
