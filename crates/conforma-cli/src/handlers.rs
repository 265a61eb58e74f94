//! Command handlers
//!
//! Each handler loads its inputs, runs the engine, and renders the outcome
//! through the [`OutputWriter`].

use crate::cli::{CheckSchemaArgs, CompletionsArgs, ValidateArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use clap::CommandFactory;
use conforma_core::{Schema, Validator};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(output), fields(document = %args.document.display(), schema = %args.schema.display()))]
pub fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    info!("Starting validation");
    output.info(&format!(
        "Validating {} against {}",
        args.document.display(),
        args.schema.display()
    ))?;

    let schema = load_schema(&args.schema)?;
    let document = load_document(&args.document)?;

    let validator = if args.all {
        Validator::collect_all()
    } else {
        Validator::new()
    };
    let report = validator.validate(&document, &schema);

    if report.is_valid() {
        info!("Document is valid");
        output.success("✓ Document is valid")?;
        if output.format() != crate::cli::OutputFormat::Human {
            output.report(&report)?;
        }
        Ok(())
    } else {
        let count = report.violations().len();
        warn!(violations = count, "Document failed validation");
        output.error("✗ Document failed validation")?;
        output.report(&report)?;
        Err(Error::ValidationFailed { count })
    }
}

/// Handle the check-schema command
#[instrument(skip(output), fields(schema = %args.schema.display()))]
pub fn handle_check_schema(args: CheckSchemaArgs, output: &mut OutputWriter) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    info!("Schema parsed successfully");
    output.success(&format!(
        "✓ {} is a well-formed schema",
        args.schema.display()
    ))?;
    if output.format() != crate::cli::OutputFormat::Human {
        output.data(&schema)?;
    }
    Ok(())
}

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    let mut cmd = crate::cli::Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(
        args.shell.to_clap_shell(),
        &mut cmd,
        bin_name,
        &mut std::io::stdout(),
    );
    Ok(())
}

/// Load a schema definition from a JSON or YAML file
pub fn load_schema(path: &Path) -> Result<Schema> {
    let value = read_value(path)?;
    serde_json::from_value(value).map_err(|e| Error::MalformedSchema {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load the document to validate from a JSON or YAML file
pub fn load_document(path: &Path) -> Result<Value> {
    read_value(path)
}

/// Read a file as a JSON value, going through YAML when the extension says so
fn read_value(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Reading {}", path.display());
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}
