//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SkillEdge Analytics - interview performance reports
///
/// Turns recorded interview sessions into delivery metrics, content and
/// delivery correlation, and multi-session skill trends.
///
/// Examples:
///   skilledge session --session session.json
///   skilledge session --session session.json --verbal verbal.json --format json
///   skilledge progress --history interviews.json
///   skilledge progress --dir ./records --recent 10
///   skilledge --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output file path for the report
    ///
    /// Defaults to skilledge_report.md (or the [general] output setting).
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .skilledge.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "SKILLEDGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Additional filler words to detect (comma-separated)
    ///
    /// Example: --extra-fillers hmm,er,ah
    #[arg(long, value_name = "WORDS", value_delimiter = ',', global = true)]
    pub extra_fillers: Option<Vec<String>>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .skilledge.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze a single interview session
    Session(SessionArgs),
    /// Build the multi-session progress dashboard
    Progress(ProgressArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SessionArgs {
    /// Session record (answers, timings, audio analysis) as JSON
    #[arg(short, long, value_name = "FILE")]
    pub session: PathBuf,

    /// Verbal analysis produced by the content scorer
    ///
    /// Without it only the delivery side of the session is reported.
    #[arg(long, value_name = "FILE")]
    pub verbal: Option<PathBuf>,

    /// Override the non-verbal score (0-100)
    ///
    /// Defaults to the session's computed delivery confidence.
    #[arg(long, value_name = "SCORE")]
    pub nonverbal_score: Option<f64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ProgressArgs {
    /// JSON array of interview records
    #[arg(long, value_name = "FILE", conflicts_with = "dir", required_unless_present = "dir")]
    pub history: Option<PathBuf>,

    /// Directory of interview record files, one record per file
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Number of latest interviews in the recent-performance window
    #[arg(long, value_name = "COUNT")]
    pub recent: Option<usize>,

    /// Maximum number of record files to load from --dir
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    ///
    /// Missing session or history files are not rejected here; the loader
    /// reports them as unavailable data.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        match &self.command {
            None => Err("A subcommand is required: session or progress".to_string()),
            Some(Command::Session(session)) => {
                if let Some(score) = session.nonverbal_score {
                    if !(0.0..=100.0).contains(&score) {
                        return Err("Non-verbal score must be between 0 and 100".to_string());
                    }
                }
                Ok(())
            }
            Some(Command::Progress(progress)) => {
                if progress.recent == Some(0) {
                    return Err("Recent window must be at least 1".to_string());
                }
                if progress.max_files == Some(0) {
                    return Err("Max files must be at least 1".to_string());
                }
                if let Some(ref dir) = progress.dir {
                    if !dir.exists() {
                        return Err(format!("Record directory does not exist: {}", dir.display()));
                    }
                    if !dir.is_dir() {
                        return Err(format!("Record path is not a directory: {}", dir.display()));
                    }
                }
                Ok(())
            }
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Option<Command>) -> Args {
        Args {
            command,
            output: None,
            config: None,
            format: None,
            extra_fillers: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    fn session_command(nonverbal_score: Option<f64>) -> Command {
        Command::Session(SessionArgs {
            session: PathBuf::from("session.json"),
            verbal: None,
            nonverbal_score,
        })
    }

    #[test]
    fn test_parse_session_subcommand() {
        let args = Args::try_parse_from([
            "skilledge",
            "--format",
            "json",
            "session",
            "--session",
            "s.json",
            "--verbal",
            "v.json",
            "--nonverbal-score",
            "72.5",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Json));
        match args.command {
            Some(Command::Session(session)) => {
                assert_eq!(session.session, PathBuf::from("s.json"));
                assert_eq!(session.verbal, Some(PathBuf::from("v.json")));
                assert_eq!(session.nonverbal_score, Some(72.5));
            }
            other => panic!("expected session command, got {:?}", other),
        }
    }

    #[test]
    fn test_progress_requires_a_source() {
        assert!(Args::try_parse_from(["skilledge", "progress"]).is_err());
        assert!(Args::try_parse_from([
            "skilledge", "progress", "--history", "h.json", "--dir", "records"
        ])
        .is_err());

        let args =
            Args::try_parse_from(["skilledge", "progress", "--history", "h.json", "-v"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_extra_fillers_are_comma_separated() {
        let args = Args::try_parse_from([
            "skilledge",
            "session",
            "--session",
            "s.json",
            "--extra-fillers",
            "hmm,er",
        ])
        .unwrap();
        assert_eq!(
            args.extra_fillers,
            Some(vec!["hmm".to_string(), "er".to_string()])
        );
    }

    #[test]
    fn test_validation_requires_subcommand() {
        assert!(make_args(None).validate().is_err());

        let mut args = make_args(None);
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_score_range() {
        assert!(make_args(Some(session_command(Some(55.0)))).validate().is_ok());
        assert!(make_args(Some(session_command(Some(120.0)))).validate().is_err());
        assert!(make_args(Some(session_command(Some(-1.0)))).validate().is_err());
    }

    #[test]
    fn test_validation_progress_options() {
        let progress = |recent, dir: Option<PathBuf>| {
            make_args(Some(Command::Progress(ProgressArgs {
                history: None,
                dir,
                recent,
                max_files: None,
            })))
        };
        assert!(progress(Some(0), None).validate().is_err());
        assert!(progress(Some(3), None).validate().is_ok());
        assert!(progress(None, Some(PathBuf::from("/nonexistent/records")))
            .validate()
            .is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(progress(None, Some(dir.path().to_path_buf()))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Some(session_command(None)));
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Some(session_command(None)));
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
