//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::services::{Direction, TranscoderService};
use crate::cli::args::{Cli, Commands, ConfigCommands, ConvertArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{ConversionResult, DomainError, ErrorKind, ProcessingError, Violation};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::input::collect_domains;
use crate::infrastructure::{InfraError, InfraResult};

/// Run the parsed command and return the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Commands::ToAscii(args) => _convert(cli, Direction::ToAscii, args),
        Commands::ToUnicode(args) => _convert(cli, Direction::ToUnicode, args),
        Commands::Config { command } => _config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
    }
}

fn config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config_dir {
        Some(dir) if !dir.is_dir() => Err(CliError::Usage(format!(
            "config directory does not exist: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("determine current directory", e))),
    }
}

#[instrument(skip(cli, args))]
fn _convert(cli: &Cli, direction: Direction, args: &ConvertArgs) -> CliResult<i32> {
    let dir = config_dir(cli)?;
    let mut settings = Settings::load(Some(&dir))?;
    settings.idna = args.flags.apply(settings.idna);
    debug!(options = ?settings.idna, "effective processing options");
    let container = ServiceContainer::new(settings);
    let json = cli.json || container.settings.output.json;

    let domains = collect_domains(&args.domains, io::stdin().lock())?;
    info!("converting {} domains", domains.len());

    let summary = convert_all(&container.transcoder, direction, &domains, json)?;
    debug!(?summary, "conversion finished");
    Ok(summary.exit_code())
}

/// Outcome counts of one conversion batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub clean: usize,
    pub invalid: usize,
    /// Inputs rejected outright, e.g. over the input size bound
    pub fatal: usize,
}

impl BatchSummary {
    /// `DATAERR` if any input was rejected, `INVALID` if any had violations.
    pub fn exit_code(&self) -> i32 {
        if self.fatal > 0 {
            exitcode::DATAERR
        } else if self.invalid > 0 {
            exitcode::INVALID
        } else {
            exitcode::OK
        }
    }
}

/// Convert and report every domain; a rejected input does not stop the batch.
pub fn convert_all(
    transcoder: &TranscoderService,
    direction: Direction,
    domains: &[String],
    json: bool,
) -> InfraResult<BatchSummary> {
    let mut summary = BatchSummary::default();
    for (index, input) in domains.iter().enumerate() {
        match transcoder.convert(direction, input) {
            Ok(result) => {
                if result.has_error() {
                    summary.invalid += 1;
                } else {
                    summary.clean += 1;
                }
                report(input, &result, json)?;
            }
            Err(e) => {
                warn!(line = index + 1, error = %e, "input rejected");
                summary.fatal += 1;
                report_rejected(index, input, &e, json)?;
            }
        }
    }
    Ok(summary)
}

/// One collected error as printed by `--json`.
#[derive(Debug, Serialize)]
struct ErrorReport {
    label: Option<usize>,
    kind: ErrorKind,
    violation: Violation,
    message: String,
}

impl From<&ProcessingError> for ErrorReport {
    fn from(e: &ProcessingError) -> Self {
        Self {
            label: e.label,
            kind: e.kind(),
            violation: e.violation,
            message: e.violation.to_string(),
        }
    }
}

/// One input line as printed by `--json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a str,
    output: Option<&'a str>,
    has_error: bool,
    errors: Vec<ErrorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fatal: Option<String>,
}

fn json_line(input: &str, result: &ConversionResult) -> InfraResult<String> {
    let report = Report {
        input,
        output: Some(&result.domain),
        has_error: result.has_error(),
        errors: result.errors.iter().map(ErrorReport::from).collect(),
        fatal: None,
    };
    Ok(serde_json::to_string(&report)?)
}

fn rejected_json_line(input: &str, error: &DomainError) -> InfraResult<String> {
    let report = Report {
        input,
        output: None,
        has_error: true,
        errors: Vec::new(),
        fatal: Some(error.to_string()),
    };
    Ok(serde_json::to_string(&report)?)
}

fn report(input: &str, result: &ConversionResult, json: bool) -> InfraResult<()> {
    if json {
        output::info(&json_line(input, result)?);
        return Ok(());
    }
    output::info(&result.domain);
    for error in &result.errors {
        output::violation(input, error);
    }
    Ok(())
}

fn report_rejected(index: usize, input: &str, error: &DomainError, json: bool) -> InfraResult<()> {
    if json {
        output::info(&rejected_json_line(input, error)?);
        return Ok(());
    }
    // keep stdout aligned with the input lines
    output::info("");
    output::error(&format!("input {}: {}", index + 1, error));
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            let dir = config_dir(cli)?;
            let settings = Settings::load(Some(&dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            let dir = config_dir(cli)?;
            output::header("Config paths");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: <no home directory>"),
            }
            output::detail(&format!("local:  {}", local_config_path(&dir).display()));
        }
    }
    Ok(exitcode::OK)
}
