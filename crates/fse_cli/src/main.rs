//! fse CLI
//!
//! Runs a match from JSON team/pitch files and prints the result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use fse_cli::{run_match, validate_team_file, GoalCap, RunOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fse", version = fse_core::VERSION)]
#[command(about = "Football match simulation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a whole match
    Run {
        /// Team 1 definition JSON
        #[arg(long)]
        team1: PathBuf,

        /// Team 2 definition JSON
        #[arg(long)]
        team2: PathBuf,

        /// Pitch definition JSON
        #[arg(long)]
        pitch: PathBuf,

        /// Engine config JSON (defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Ticks in the whole match, split between the halves
        #[arg(long, default_value = "1000")]
        iterations: u32,

        /// Print one snapshot per line instead of the final match state
        #[arg(long, default_value = "false")]
        snapshots: bool,

        /// Print every iteration log line to stderr
        #[arg(long, default_value = "false")]
        verbose: bool,

        /// Clamp goals as "A,B" (kickoff team, second team)
        #[arg(long)]
        cap_goals: Option<GoalCap>,
    },

    /// Validate a team definition file
    Validate {
        /// Team definition JSON
        #[arg(long)]
        team: PathBuf,

        /// Pitch definition JSON (full-size pitch when omitted)
        #[arg(long)]
        pitch: Option<PathBuf>,

        /// Engine config JSON, for the squad size
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            team1,
            team2,
            pitch,
            config,
            seed,
            iterations,
            snapshots,
            verbose,
            cap_goals,
        } => {
            let opts = RunOptions {
                team1,
                team2,
                pitch,
                config,
                seed,
                iterations,
                snapshots,
                cap_goals,
            };
            let run = run_match(&opts)?;

            if verbose {
                for line in &run.log_lines {
                    eprintln!("{}", line);
                }
            }

            if snapshots {
                for snapshot in &run.snapshots {
                    println!("{}", serde_json::to_string(snapshot)?);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&run.details)?);
            }

            let (home, away) = run.details.score();
            eprintln!(
                "{} {} : {} {}",
                run.details.kick_off_team.name, home, away, run.details.second_team.name
            );
        }

        Commands::Validate { team, pitch, config } => {
            let definition = validate_team_file(&team, pitch.as_deref(), config.as_deref())?;
            println!(
                "✅ {} is valid ({} players)",
                definition.name,
                definition.players.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_version(), Some(fse_core::VERSION));
    }
}
