//! BipGen - FBA to BIP generator
//!
//! CLI entry point for generating Behavior Intervention Plans from intake files.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, warn};

use bipcore::{
    AntecedentCategory, BehaviorFunction, Category, ConsequenceCategory, DataCollectionMethod, Intensity, IntakeRecord,
    SettingEventCategory, generate_on, render_text,
};
use bipgen::capture::EmailCapture;
use bipgen::cli::{CategoryKind, Cli, Command, OutputFormat};
use bipgen::config::Config;
use bipgen::{IntakeErrors, intake_template, load_intake, validate_intake};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to install tracing subscriber: {}", e))?;

    debug!(?level, "Logging initialized");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Generate {
            intake,
            format,
            output,
            email,
            date,
        } => {
            debug!(?format, ?output, ?date, "main: matched Generate command");
            let format = format.unwrap_or(config.output.format);
            cmd_generate(&config, &intake, format, output.as_deref(), email.as_deref(), date).await
        }
        Command::Validate { intake } => {
            debug!("main: matched Validate command");
            cmd_validate(&intake)
        }
        Command::Categories { kind } => {
            debug!(?kind, "main: matched Categories command");
            cmd_categories(kind);
            Ok(())
        }
        Command::Template { output } => {
            debug!(?output, "main: matched Template command");
            cmd_template(output.as_deref())
        }
    }
}

/// Generate a plan and write it to stdout or a file
async fn cmd_generate(
    config: &Config,
    intake_path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    email: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<()> {
    debug!(intake = %intake_path.display(), ?format, "cmd_generate: called");
    let intake = load_intake(intake_path)?;

    if let Err(errors) = validate_intake(&intake) {
        debug!("cmd_generate: intake failed validation");
        report_issues(intake_path, &errors);
        return Err(errors).context(format!("Cannot generate a plan from {}", intake_path.display()));
    }

    // Start the capture first so it overlaps with generation
    let capture = email.and_then(|address| match EmailCapture::new(&config.capture) {
        Ok(client) => client.submit(address),
        Err(e) => {
            warn!(error = %e, "Email capture unavailable");
            None
        }
    });

    let document = render_document(&intake, format, date, config)?;

    match output {
        Some(path) => {
            fs::write(path, &document).context(format!("Failed to write plan to {}", path.display()))?;
            eprintln!("{} Wrote plan to {}", "✓".green(), path.display().to_string().cyan());
        }
        None => println!("{}", document),
    }

    if let Some(handle) = capture {
        debug!("cmd_generate: waiting for email capture");
        handle.finish(Duration::from_millis(config.capture.grace_ms)).await;
    }

    Ok(())
}

fn render_document(
    intake: &IntakeRecord,
    format: OutputFormat,
    date: Option<NaiveDate>,
    config: &Config,
) -> Result<String> {
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let plan = generate_on(intake, date, &config.engine.options());

    match format {
        OutputFormat::Text => Ok(render_text(&plan)),
        OutputFormat::Json => serde_json::to_string_pretty(&plan).context("Failed to serialize plan"),
    }
}

/// Check an intake file and report every violated rule
fn cmd_validate(intake_path: &Path) -> Result<()> {
    debug!(intake = %intake_path.display(), "cmd_validate: called");
    let intake = load_intake(intake_path)?;

    match validate_intake(&intake) {
        Ok(()) => {
            println!("{} {} is complete", "✓".green(), intake_path.display());
            Ok(())
        }
        Err(errors) => {
            report_issues(intake_path, &errors);
            std::process::exit(1);
        }
    }
}

fn report_issues(intake_path: &Path, errors: &IntakeErrors) {
    eprintln!(
        "{} {} has {} problem(s):",
        "✗".red(),
        intake_path.display(),
        errors.0.len()
    );
    for issue in &errors.0 {
        eprintln!("  {} {}", format!("[{}]", issue.step()).yellow(), issue);
    }
}

fn labels<C: Category>() -> Vec<&'static str> {
    C::ALL.iter().map(|c| c.label()).collect()
}

/// List the accepted labels for one or every category kind
fn cmd_categories(kind: Option<CategoryKind>) {
    debug!(?kind, "cmd_categories: called");
    let kinds: Vec<CategoryKind> = match kind {
        Some(k) => vec![k],
        None => CategoryKind::ALL.to_vec(),
    };

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", kind.heading().bold());
        let items = match kind {
            CategoryKind::Antecedents => labels::<AntecedentCategory>(),
            CategoryKind::SettingEvents => labels::<SettingEventCategory>(),
            CategoryKind::Consequences => labels::<ConsequenceCategory>(),
            CategoryKind::Functions => labels::<BehaviorFunction>(),
            CategoryKind::DataCollection => labels::<DataCollectionMethod>(),
            CategoryKind::Intensity => labels::<Intensity>(),
        };
        for label in items {
            println!("  {}", label);
        }
    }
}

/// Write a sample intake file
fn cmd_template(output: Option<&Path>) -> Result<()> {
    debug!(?output, "cmd_template: called");
    let template = intake_template()?;

    match output {
        Some(path) => {
            if path.exists() {
                eyre::bail!("{} already exists", path.display());
            }
            fs::write(path, &template).context(format!("Failed to write template to {}", path.display()))?;
            eprintln!("{} Wrote sample intake to {}", "✓".green(), path.display().to_string().cyan());
        }
        None => print!("{}", template),
    }
    Ok(())
}
