//! JSON API for the transport layer.
//!
//! Each call takes raw `serde_json::Value`s and returns the position snapshot
//! (see [`crate::snapshot`]). The `*_response` variants never fail: they wrap
//! the outcome in an [`ApiResponse`] envelope carrying an error code the
//! transport can map onto its own failure type.

use crate::engine::MatchEngine;
use crate::error::{ErrorKind, MatchError, Result};
use crate::models::{PitchDefinition, TeamDefinition};
use crate::snapshot::{match_details_from_value, PositionSnapshot};
use crate::validate::Validator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    pub schema_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiResponse {
    pub fn from_result(result: Result<Value>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
                schema_version: API_VERSION.to_string(),
            },
            Err(err) => {
                warn!("engine call rejected: {}", err);
                Self {
                    success: false,
                    data: None,
                    error: Some(ApiError {
                        code: error_code(err.kind()).to_string(),
                        message: err.to_string(),
                    }),
                    schema_version: API_VERSION.to_string(),
                }
            }
        }
    }
}

pub fn error_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Argument => "ARGUMENT_ERROR",
        ErrorKind::Team => "TEAM_ERROR",
        ErrorKind::Pitch => "PITCH_ERROR",
        ErrorKind::MatchState => "MATCH_STATE_ERROR",
        ErrorKind::Position => "POSITION_ERROR",
    }
}

/// Create a match and return its first snapshot.
pub fn initiate_json<R: Rng>(
    engine: &mut MatchEngine<R>,
    team1: &Value,
    team2: &Value,
    pitch: &Value,
) -> Result<Value> {
    Validator::validate_json_arguments(team1, team2, pitch)?;
    let team1 = parse_team(team1, "team1")?;
    let team2 = parse_team(team2, "team2")?;
    let pitch = PitchDefinition::deserialize(pitch)
        .map_err(|e| MatchError::Pitch(format!("malformed pitch: {e}")))?;

    let start = engine.initiate(&team1, &team2, &pitch)?;
    info!("match {} created", start.details.match_id);
    PositionSnapshot::new(&start.details, &start.log).to_value()
}

/// Play one tick on a serialized match (bare details or a previous snapshot).
pub fn tick_json<R: Rng>(engine: &mut MatchEngine<R>, details: &Value) -> Result<Value> {
    let mut details = match_details_from_value(details)?;
    let log = engine.tick(&mut details)?;
    PositionSnapshot::new(&details, &log).to_value()
}

pub fn switch_half_json<R: Rng>(engine: &mut MatchEngine<R>, details: &Value) -> Result<Value> {
    let mut details = match_details_from_value(details)?;
    let log = engine.switch_half(&mut details)?;
    PositionSnapshot::new(&details, &log).to_value()
}

pub fn initiate_response<R: Rng>(
    engine: &mut MatchEngine<R>,
    team1: &Value,
    team2: &Value,
    pitch: &Value,
) -> ApiResponse {
    ApiResponse::from_result(initiate_json(engine, team1, team2, pitch))
}

pub fn tick_response<R: Rng>(engine: &mut MatchEngine<R>, details: &Value) -> ApiResponse {
    ApiResponse::from_result(tick_json(engine, details))
}

pub fn switch_half_response<R: Rng>(engine: &mut MatchEngine<R>, details: &Value) -> ApiResponse {
    ApiResponse::from_result(switch_half_json(engine, details))
}

fn parse_team(value: &Value, label: &str) -> Result<TeamDefinition> {
    TeamDefinition::deserialize(value).map_err(|e| {
        let name = value.get("name").and_then(Value::as_str).unwrap_or(label);
        MatchError::team(name, format!("malformed team: {e}"))
    })
}
