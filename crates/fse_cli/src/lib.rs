//! Match runner behind the `fse` binary.
//!
//! Loads team and pitch definitions from JSON files, plays a whole match
//! (first half, half-time switch, second half) and collects the snapshots.

use anyhow::{bail, Context, Result};
use fse_core::engine::EngineConfig;
use fse_core::models::{MatchDetails, PitchDefinition, TeamDefinition, TeamSide};
use fse_core::{IterationLog, MatchEngine, PositionSnapshot, Validator};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Upper bound on each side's goal tally, applied after every engine call.
///
/// Harness policy only: the engine itself never lowers a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalCap {
    pub kick_off_team: u32,
    pub second_team: u32,
}

impl FromStr for GoalCap {
    type Err = anyhow::Error;

    /// Parses `"A,B"`: A for the kickoff team, B for the second team.
    fn from_str(s: &str) -> Result<Self> {
        let Some((a, b)) = s.split_once(',') else {
            bail!("goal cap must look like A,B (got {s:?})");
        };
        let parse = |v: &str| {
            v.trim().parse::<u32>().with_context(|| format!("invalid goal cap {v:?}"))
        };
        Ok(Self { kick_off_team: parse(a)?, second_team: parse(b)? })
    }
}

impl GoalCap {
    pub fn apply(&self, details: &mut MatchDetails) {
        let stats = details.statistics_mut(TeamSide::KickOff);
        stats.goals = stats.goals.min(self.kick_off_team);
        let stats = details.statistics_mut(TeamSide::Second);
        stats.goals = stats.goals.min(self.second_team);
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub team1: PathBuf,
    pub team2: PathBuf,
    pub pitch: PathBuf,
    pub config: Option<PathBuf>,
    pub seed: u64,
    /// Ticks in the whole match, split evenly between the halves.
    pub iterations: u32,
    pub snapshots: bool,
    pub cap_goals: Option<GoalCap>,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct MatchRun {
    pub details: MatchDetails,
    /// One snapshot per engine call, when requested.
    pub snapshots: Vec<Value>,
    /// Every iteration log line, in order.
    pub log_lines: Vec<String>,
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => load_json(path),
        None => Ok(EngineConfig::default()),
    }
}

pub fn run_match(opts: &RunOptions) -> Result<MatchRun> {
    let config = load_config(opts.config.as_deref())?;
    let team1: TeamDefinition = load_json(&opts.team1)?;
    let team2: TeamDefinition = load_json(&opts.team2)?;
    let pitch: PitchDefinition = load_json(&opts.pitch)?;

    let mut engine = MatchEngine::seeded(opts.seed, config);
    let start = engine.initiate(&team1, &team2, &pitch).context("failed to create match")?;

    let mut run = MatchRun { details: start.details, snapshots: Vec::new(), log_lines: Vec::new() };
    run.record(&start.log, opts.snapshots)?;

    let first_half = opts.iterations / 2;
    let halves = run.details.rules.halves;
    for _ in 0..first_half {
        let log = engine.tick(&mut run.details)?;
        run.after_call(&log, opts)?;
    }
    if halves > 1 {
        let log = engine.switch_half(&mut run.details)?;
        run.after_call(&log, opts)?;
    }
    for _ in first_half..opts.iterations {
        let log = engine.tick(&mut run.details)?;
        run.after_call(&log, opts)?;
    }
    Ok(run)
}

impl MatchRun {
    fn after_call(&mut self, log: &IterationLog, opts: &RunOptions) -> Result<()> {
        if let Some(cap) = opts.cap_goals {
            cap.apply(&mut self.details);
        }
        self.record(log, opts.snapshots)
    }

    fn record(&mut self, log: &IterationLog, snapshot: bool) -> Result<()> {
        self.log_lines.extend(log.lines());
        if snapshot {
            self.snapshots.push(PositionSnapshot::new(&self.details, log).to_value()?);
        }
        Ok(())
    }
}

/// Check a single team file against the configured rules and pitch.
pub fn validate_team_file(
    team: &Path,
    pitch: Option<&Path>,
    config: Option<&Path>,
) -> Result<TeamDefinition> {
    let config = load_config(config)?;
    let definition: TeamDefinition = load_json(team)?;
    let pitch = match pitch {
        Some(path) => load_json::<PitchDefinition>(path)?,
        None => PitchDefinition::new(1050, 680),
    };
    Validator::validate_pitch(&pitch)?;
    Validator::validate_team(&definition, &config.rules, &pitch.to_pitch())?;
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fse_core::engine::KickoffPolicy;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    fn team(name: &str) -> Value {
        json!({
            "name": name,
            "players": [
                {"name": format!("{} Player 1", name), "position": "GK", "rating": 70, "startPOS": [5, 30]},
                {"name": format!("{} Player 2", name), "position": "ST", "rating": 70, "startPOS": [40, 30]}
            ]
        })
    }

    fn small_config() -> Value {
        json!({
            "rules": {"squadSize": 2},
            "injury": {"chancePerTick": 0.0},
            "kickoff": {"policy": "team1"}
        })
    }

    struct Inputs {
        team1: NamedTempFile,
        team2: NamedTempFile,
        pitch: NamedTempFile,
        config: NamedTempFile,
    }

    impl Inputs {
        fn new() -> Self {
            Self {
                team1: write_json(&team("Slugs")),
                team2: write_json(&team("Dragons")),
                pitch: write_json(&json!({"pitchWidth": 100, "pitchHeight": 60})),
                config: write_json(&small_config()),
            }
        }

        fn options(&self, iterations: u32) -> RunOptions {
            RunOptions {
                team1: self.team1.path().to_path_buf(),
                team2: self.team2.path().to_path_buf(),
                pitch: self.pitch.path().to_path_buf(),
                config: Some(self.config.path().to_path_buf()),
                seed: 11,
                iterations,
                snapshots: true,
                cap_goals: None,
            }
        }
    }

    #[test]
    fn test_goal_cap_parsing() {
        assert_eq!(
            "3, 1".parse::<GoalCap>().unwrap(),
            GoalCap { kick_off_team: 3, second_team: 1 }
        );
        assert!("3".parse::<GoalCap>().is_err());
        assert!("a,1".parse::<GoalCap>().is_err());
    }

    #[test]
    fn test_run_full_match() {
        let inputs = Inputs::new();
        let run = run_match(&inputs.options(40)).unwrap();

        assert_eq!(run.details.iteration, 40);
        assert_eq!(run.details.half, 2);
        // initiate + 40 ticks + half switch
        assert_eq!(run.snapshots.len(), 42);
        assert_eq!(run.log_lines[0], "Team to kick off - Slugs");
        assert!(run.log_lines.iter().any(|l| l == "Half 2 kick off - Dragons"));
    }

    #[test]
    fn test_same_seed_same_run() {
        let inputs = Inputs::new();
        let a = run_match(&inputs.options(60)).unwrap();
        let b = run_match(&inputs.options(60)).unwrap();
        assert_eq!(a.details, b.details);
        assert_eq!(a.snapshots, b.snapshots);
    }

    #[test]
    fn test_goal_cap_zero() {
        let inputs = Inputs::new();
        let mut opts = inputs.options(200);
        opts.cap_goals = Some(GoalCap { kick_off_team: 0, second_team: 0 });
        let run = run_match(&opts).unwrap();
        assert_eq!(run.details.score(), (0, 0));
    }

    #[test]
    fn test_config_file_keys() {
        let file = write_json(&json!({
            "injury": {"chancePerTick": 0.5},
            "movement": {"forwardRun": 0.05},
            "kickoff": {"policy": "random", "team1Weight": 0.25}
        }));
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.injury.chance_per_tick, 0.5);
        assert_eq!(config.movement.forward_run, 0.05);
        assert_eq!(config.kickoff, KickoffPolicy::Random { team1_weight: 0.25 });
    }

    #[test]
    fn test_missing_file_has_context() {
        let inputs = Inputs::new();
        let mut opts = inputs.options(2);
        opts.team2 = PathBuf::from("/nonexistent/team.json");
        let err = run_match(&opts).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/team.json"));
    }

    #[test]
    fn test_validate_team_file() {
        let inputs = Inputs::new();
        let team = validate_team_file(
            inputs.team1.path(),
            Some(inputs.pitch.path()),
            Some(inputs.config.path()),
        )
        .unwrap();
        assert_eq!(team.players.len(), 2);

        // Default rules expect eleven players.
        assert!(validate_team_file(inputs.team1.path(), Some(inputs.pitch.path()), None).is_err());
    }

    #[test]
    fn test_bundled_data_plays() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        for team in ["team1.json", "team2.json"] {
            validate_team_file(&data.join(team), Some(&data.join("pitch.json")), None).unwrap();
        }

        let opts = RunOptions {
            team1: data.join("team1.json"),
            team2: data.join("team2.json"),
            pitch: data.join("pitch.json"),
            config: None,
            seed: 5,
            iterations: 100,
            snapshots: false,
            cap_goals: None,
        };
        let run = run_match(&opts).unwrap();
        assert_eq!(run.details.kick_off_team.players.len(), 11);
        assert!(run.snapshots.is_empty());
    }
}
