//! SkillEdge Analytics - interview performance reports
//!
//! A CLI tool that turns recorded interview sessions into delivery
//! metrics, content and delivery correlation, and multi-session
//! progress dashboards.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, corrupt or unreadable record, write failure)
//!   2 - No data to analyze yet (no answers, no interviews)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;
mod scanner;

use analysis::{
    analyze_impact, assess, build_dashboard, correlate, delivery_insights, delivery_scores,
    format_correlation_data, generate_action_items, FillerLexicon, NonVerbalAggregator,
};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, Command, OutputFormat, ProgressArgs, SessionArgs};
use config::{Config, CONFIG_FILE_NAME};
use error::AnalyticsError;
use models::{ProgressReport, ReportMetadata, SessionReport};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("SkillEdge Analytics v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);

            let exit_code = match e.downcast_ref::<AnalyticsError>() {
                Some(analytics_error) => {
                    eprintln!("   {}", analytics_error.user_prompt());
                    analytics_error.exit_code()
                }
                None => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

/// Handle --init-config: generate a default .skilledge.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize filler words, report sections, and the record scanner.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the selected subcommand. Returns the exit code.
fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let output_path = resolve_output(&args, &config);

    let written = match args.command {
        Some(Command::Session(ref session)) => {
            run_session(session, &config, &output_path, args.quiet)?
        }
        Some(Command::Progress(ref progress)) => {
            run_progress(progress, &config, &output_path, args.quiet)?
        }
        // Rejected by validate()
        None => return Ok(1),
    };

    if !args.quiet {
        println!("\n✅ Report saved to: {}", written.display());
    }
    Ok(0)
}

/// Analyze one session and write its report.
fn run_session(
    session_args: &SessionArgs,
    config: &Config,
    output_path: &Path,
    quiet: bool,
) -> Result<PathBuf> {
    let session = loader::load_session(&session_args.session)?;
    info!("Loaded session from {}", session_args.session.display());

    let lexicon = FillerLexicon::new(&config.analysis.extra_filler_words)?;
    debug!("Filler lexicon has {} terms", lexicon.terms().count());
    let aggregator = NonVerbalAggregator::new(lexicon);
    let non_verbal = aggregator.aggregate_session(&session)?;
    let delivery = delivery_scores(&non_verbal);
    let insights = delivery_insights(&non_verbal, &delivery);
    let impact = analyze_impact(&non_verbal, &delivery);
    debug!("Net delivery impact {:+}", impact.net_performance_impact);

    let non_verbal_score = session_args
        .nonverbal_score
        .unwrap_or(delivery.overall_confidence);

    let verbal = match session_args.verbal {
        Some(ref path) => Some(loader::load_verbal(path)?),
        None => {
            warn!("No verbal analysis supplied; reporting delivery only");
            None
        }
    };

    let (assessment, correlation, action_items, chart) = match verbal {
        Some(ref verbal) => {
            let correlation = correlate(
                verbal.overall_score,
                non_verbal_score,
                Some(&verbal.metrics),
                Some(&non_verbal),
            );
            debug!(
                "Correlation strength {}% ({})",
                correlation.overall_correlation.correlation_strength,
                correlation.overall_correlation.alignment
            );
            let action_items = generate_action_items(&correlation);
            let chart = format_correlation_data(&correlation);
            (
                Some(assess(verbal.overall_score, non_verbal_score)),
                Some(correlation),
                action_items,
                chart,
            )
        }
        None => (None, None, Vec::new(), Vec::new()),
    };

    let report = SessionReport {
        metadata: report_metadata(&session_args.session),
        session_id: session.session_id.clone(),
        non_verbal,
        delivery,
        delivery_insights: insights,
        impact,
        non_verbal_score,
        verbal_score: verbal.as_ref().map(|v| v.overall_score),
        assessment,
        correlation,
        action_items,
        chart,
        verbal_recommendations: verbal.map(|v| v.recommendations).unwrap_or_default(),
    };

    let output = match config.general.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_session(&report, &config.report),
    };
    write_output(output_path, &output)?;

    if !quiet {
        let nv = &report.non_verbal;
        println!("\n📊 Session Summary:");
        println!("   Questions: {}", nv.question_count);
        println!(
            "   Pace: {} wpm ({}) | Fillers: {} ({}%)",
            nv.words_per_minute, nv.speech_rate.label, nv.filler_words, nv.filler_percentage
        );
        println!("   Pauses: {}", nv.pause_analysis.pattern);
        println!("   Non-verbal score: {}", report.non_verbal_score);
        println!(
            "   Delivery impact: {:+} (+{} / -{})",
            report.impact.net_performance_impact,
            report.impact.positive_total,
            report.impact.negative_total
        );
        if let Some(ref assessment) = report.assessment {
            println!(
                "   Overall: {}/100 ({})",
                assessment.overall_score, assessment.readiness
            );
        }
        for item in &report.action_items {
            println!("   {} {}", item.priority.emoji(), item.item);
        }
    }

    Ok(output_path.to_path_buf())
}

/// Build the progress dashboard and write its report.
fn run_progress(
    progress_args: &ProgressArgs,
    config: &Config,
    output_path: &Path,
    quiet: bool,
) -> Result<PathBuf> {
    let (records, source) = match (&progress_args.history, &progress_args.dir) {
        (Some(history), _) => (loader::load_history(history)?, history.clone()),
        (None, Some(dir)) => {
            let scan_config = scanner::ScanConfig::from(&config.scanner);
            let record_scanner = scanner::RecordScanner::new(dir.clone(), scan_config);
            let outcome = record_scanner.load_records(!quiet);
            if !outcome.skipped.is_empty() {
                warn!("Skipped {} unreadable record files", outcome.skipped.len());
            }
            (outcome.into_records()?, dir.clone())
        }
        // clap requires one of the two sources
        (None, None) => anyhow::bail!("No interview history given"),
    };
    info!("Loaded {} interview records", records.len());

    let dashboard = build_dashboard(&records, config.analysis.recent_window)?;
    let report = ProgressReport {
        metadata: report_metadata(&source),
        dashboard,
    };

    let output = match config.general.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_progress(&report, &config.report),
    };
    write_output(output_path, &output)?;

    if !quiet {
        let dashboard = &report.dashboard;
        println!("\n📊 Progress Summary:");
        println!("   Interviews: {}", dashboard.total_interviews);
        println!(
            "   Best: {} | Average: {}",
            dashboard.statistics.best_score, dashboard.statistics.average_score
        );
        for (skill, entry) in &dashboard.skill_breakdown {
            println!(
                "   {} {}: {} ({})",
                entry.trend.emoji(),
                skill,
                entry.average_score,
                entry.trend
            );
        }
    }

    Ok(output_path.to_path_buf())
}

fn report_metadata(source: &Path) -> ReportMetadata {
    ReportMetadata {
        source: source.display().to_string(),
        generated_at: Utc::now(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Pick the output path. A JSON report without an explicit path gets a
/// `.json` extension instead of the markdown default.
fn resolve_output(args: &Args, config: &Config) -> PathBuf {
    let path = PathBuf::from(&config.general.output);
    if args.output.is_none()
        && config.general.format == OutputFormat::Json
        && path.extension().is_some_and(|ext| ext == "md")
    {
        return path.with_extension("json");
    }
    path
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
