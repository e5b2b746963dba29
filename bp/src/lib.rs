//! BipGen - command-line front end for BipCore
//!
//! Loads FBA intake files, checks them against the intake wizard's rules,
//! generates and writes the Behavior Intervention Plan, and optionally
//! submits an email address to a capture endpoint.

pub mod capture;
pub mod cli;
pub mod config;
pub mod intake_file;
pub mod validate;

pub use capture::{CaptureError, CaptureHandle, CaptureOutcome, EmailCapture};
pub use config::Config;
pub use intake_file::{intake_template, load_intake};
pub use validate::{IntakeErrors, ValidationIssue, WizardStep, validate_intake};
