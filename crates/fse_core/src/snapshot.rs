//! Position snapshot handed to renderers after every engine call:
//!
//! ```text
//! [pitchWidth, pitchHeight,
//!  kickOffTeam positions as x, y pairs in roster order,
//!  secondTeam positions as x, y pairs in roster order,
//!  ball.x, ball.y,
//!  { ...MatchDetails, "iterationLog": [..] }]
//! ```
//!
//! Consumers split the two rosters by squad size, which never changes during
//! a match.

use crate::error::{MatchError, Result};
use crate::models::{IterationLog, MatchDetails};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotState<'a> {
    #[serde(flatten)]
    details: &'a MatchDetails,
    iteration_log: &'a IterationLog,
}

pub struct PositionSnapshot<'a> {
    details: &'a MatchDetails,
    log: &'a IterationLog,
}

impl<'a> PositionSnapshot<'a> {
    pub fn new(details: &'a MatchDetails, log: &'a IterationLog) -> Self {
        Self { details, log }
    }

    /// The numeric head of the snapshot.
    pub fn positions(&self) -> Vec<i32> {
        let details = self.details;
        let mut out = Vec::with_capacity(4 + details.rules.squad_size * 4);
        out.push(details.pitch.width);
        out.push(details.pitch.height);
        for pos in details.player_positions() {
            out.push(pos.x);
            out.push(pos.y);
        }
        out.push(details.ball.position.x);
        out.push(details.ball.position.y);
        out
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for PositionSnapshot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let positions = self.positions();
        let mut seq = serializer.serialize_seq(Some(positions.len() + 1))?;
        for n in &positions {
            seq.serialize_element(n)?;
        }
        seq.serialize_element(&SnapshotState { details: self.details, iteration_log: self.log })?;
        seq.end()
    }
}

/// Read a match back from either a bare `MatchDetails` object or a full
/// snapshot (its trailing object). The `iterationLog` key is ignored.
pub fn match_details_from_value(value: &Value) -> Result<MatchDetails> {
    let object = match value {
        Value::Array(items) => items.last().ok_or_else(|| {
            MatchError::MatchState("snapshot array is empty".to_string())
        })?,
        Value::Null => return Err(MatchError::Argument("match details are missing".to_string())),
        other => other,
    };
    MatchDetails::deserialize(object)
        .map_err(|e| MatchError::MatchState(format!("malformed match details: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::MatchEvent;
    use crate::test_fixtures::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_layout() {
        let details = small_match();
        let mut log = IterationLog::new();
        log.push(MatchEvent::KickOffTeam { team: "Slugs".into() });
        let value = PositionSnapshot::new(&details, &log).to_value().unwrap();
        let items = value.as_array().unwrap();

        // width, height, 4 players, ball, trailing object
        assert_eq!(items.len(), 2 + 4 * 2 + 2 + 1);
        assert_eq!(items[0], json!(100));
        assert_eq!(items[1], json!(60));
        assert_eq!(items[2], json!(5));
        assert_eq!(items[3], json!(30));
        // Second team keeper mirrored to the far end.
        assert_eq!(items[6], json!(95));
        assert_eq!(items[10], json!(50));
        assert_eq!(items[11], json!(30));

        let state = &items[12];
        assert_eq!(state["half"], json!(1));
        assert_eq!(state["kickOffTeam"]["name"], json!("Slugs"));
        assert_eq!(state["iterationLog"], json!(["Team to kick off - Slugs"]));
    }

    #[test]
    fn test_details_read_back_from_snapshot() {
        let details = small_match();
        let log = IterationLog::new();
        let value = PositionSnapshot::new(&details, &log).to_value().unwrap();

        assert_eq!(match_details_from_value(&value).unwrap(), details);
        let bare = serde_json::to_value(&details).unwrap();
        assert_eq!(match_details_from_value(&bare).unwrap(), details);
    }

    #[test]
    fn test_malformed_details() {
        let err = match_details_from_value(&json!({"half": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MatchState);
        let err = match_details_from_value(&Value::Null).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
    }
}
