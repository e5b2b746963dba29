//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// BipGen - FBA to BIP generator
#[derive(Parser, Debug)]
#[command(name = "bp")]
#[command(author, version, about = "Generate Behavior Intervention Plans from FBA intake files", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a plan from an intake file
    Generate {
        /// Intake file (YAML or JSON)
        #[arg(required = true)]
        intake: PathBuf,

        /// Output format (default from config, else text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Email address to submit to the capture endpoint
        #[arg(long)]
        email: Option<String>,

        /// Plan date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Check an intake file against the wizard rules
    Validate {
        /// Intake file (YAML or JSON)
        #[arg(required = true)]
        intake: PathBuf,
    },

    /// List the labels accepted for each category
    Categories {
        /// Only list this kind
        #[arg(value_enum)]
        kind: Option<CategoryKind>,
    },

    /// Write a sample intake file
    Template {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Category kinds listed by `bp categories`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryKind {
    Antecedents,
    SettingEvents,
    Consequences,
    Functions,
    DataCollection,
    Intensity,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 6] = [
        CategoryKind::Antecedents,
        CategoryKind::SettingEvents,
        CategoryKind::Consequences,
        CategoryKind::Functions,
        CategoryKind::DataCollection,
        CategoryKind::Intensity,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Antecedents => "Antecedents",
            Self::SettingEvents => "Setting events",
            Self::Consequences => "Consequences",
            Self::Functions => "Functions",
            Self::DataCollection => "Data-collection methods",
            Self::Intensity => "Intensity",
        }
    }
}
