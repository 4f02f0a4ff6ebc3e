//! LogLore - privacy-gated AI troubleshooting for error logs
//!
//! Scans a log for sensitive data, asks for confirmation before anything
//! leaves the machine, submits the text to the analysis service, and prints
//! or exports the returned solution.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use loglore::client::{AnalysisMode, HttpAnalysisClient};
use loglore::config::LogLoreConfig;
use loglore::health::{status_from_poll, HealthMonitor};
use loglore::report::AnalysisReport;
use loglore::scanner::{PiiFinding, Scanner};
use loglore::severity::SeverityClassifier;
use loglore::workflow::{parse_confirmation, SubmitOutcome, Workflow, WorkflowState};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "loglore")]
#[command(version)]
#[command(about = "Privacy-gated AI troubleshooting for error logs")]
struct Cli {
    /// Configuration file path (.yaml)
    #[arg(short, long, env = "LOGLORE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an error log with the AI troubleshooting service
    Analyze {
        /// Log file to analyze (stdin if omitted)
        file: Option<PathBuf>,

        /// Analysis mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Analysis service base URL
        #[arg(long, env = "LOGLORE_API_URL")]
        api_url: Option<String>,

        /// Submit without asking, even when sensitive data was found
        #[arg(short = 'y', long)]
        yes: bool,

        /// Export the result in the given format
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,

        /// Export destination (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan a log for sensitive data without submitting anything
    Scan {
        /// Log file to scan (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Check the analysis service health
    Health {
        /// Analysis service base URL
        #[arg(long, env = "LOGLORE_API_URL")]
        api_url: Option<String>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Beginner,
    Advanced,
}

impl From<ModeArg> for AnalysisMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Beginner => AnalysisMode::Beginner,
            ModeArg::Advanced => AnalysisMode::Advanced,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Markdown,
    Json,
    Issue,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("loglore={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            file,
            mode,
            api_url,
            yes,
            export,
            output,
        } => {
            let mode = mode.map(AnalysisMode::from).unwrap_or(config.api.default_mode);
            let base_url = api_url.unwrap_or_else(|| config.api.base_url.clone());
            analyze(&config, file, mode, &base_url, yes, export, output).await
        }
        Commands::Scan { file } => scan(&config, file),
        Commands::Health { api_url } => {
            let base_url = api_url.unwrap_or_else(|| config.api.base_url.clone());
            health(&config, &base_url).await
        }
        Commands::Config { default } => {
            let shown = if default { LogLoreConfig::default() } else { config };
            println!("{}", shown.to_yaml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<LogLoreConfig> {
    match path {
        Some(path) => LogLoreConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => LogLoreConfig::load_or_default().context("Failed to load config"),
    }
}

async fn analyze(
    config: &LogLoreConfig,
    file: Option<PathBuf>,
    mode: AnalysisMode,
    base_url: &str,
    yes: bool,
    export: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = read_input(file)?;

    let classifier = SeverityClassifier::new(config.severity.clone());
    let severity = classifier.classify(&text);
    println!("Severity: {}", severity);

    let client = HttpAnalysisClient::with_timeout(
        base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let workflow = Workflow::new(Arc::new(client))?;
    workflow.set_mode(mode).await;
    workflow.set_text(&text).await;

    let findings = match workflow.submit().await? {
        SubmitOutcome::ConfirmationRequired(findings) => {
            print_findings(&findings);
            let approved = yes || prompt_confirmation()?;
            if !approved {
                workflow.cancel().await;
                println!("Cancelled. Nothing was sent.");
                return Ok(());
            }
            workflow.proceed().await;
            findings
        }
        _ => Vec::new(),
    };

    match workflow.state().await {
        WorkflowState::Result { response } => {
            println!("\nAI Solution\n-----------");
            println!("{}", response.answer);
            if mode == AnalysisMode::Advanced {
                if let Some(ref redacted) = response.redacted {
                    println!("\nRedacted Log\n------------");
                    println!("{}", redacted);
                }
            }
            if let Some(format) = export {
                let report = AnalysisReport::new(&response, &text, mode, severity, findings);
                write_export(&report, format, output)?;
            }
            Ok(())
        }
        WorkflowState::Failed { failure } => {
            bail!("Analysis failed ({:?}): {}", failure.kind, failure.message)
        }
        other => bail!("Unexpected workflow state: {}", other.name()),
    }
}

fn scan(config: &LogLoreConfig, file: Option<PathBuf>) -> Result<()> {
    let text = read_input(file)?;
    let classifier = SeverityClassifier::new(config.severity.clone());
    println!("Severity: {}", classifier.classify(&text));

    let scanner = Scanner::new()?;
    let findings = scanner.scan(&text);
    if findings.is_empty() {
        println!("No sensitive data detected.");
    } else {
        print_findings(&findings);
    }
    Ok(())
}

async fn health(config: &LogLoreConfig, base_url: &str) -> Result<()> {
    let monitor = HealthMonitor::new(
        base_url,
        Duration::from_secs(config.health.interval_secs),
    )?;
    let result = monitor.check().await;
    let detail = result
        .as_ref()
        .map(|report| format!("gemini_configured: {}", report.gemini_configured))
        .ok();
    println!("Backend: {}", status_from_poll(result));
    if let Some(detail) = detail {
        println!("{}", detail);
    }
    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_findings(findings: &[PiiFinding]) {
    println!("\nSensitive data detected:");
    for finding in findings {
        println!("  {:<14} {} match(es)", finding.category.to_string(), finding.count);
    }
}

/// Ask until the reply parses as yes or no
fn prompt_confirmation() -> Result<bool> {
    let stdin = io::stdin();
    loop {
        print!("Submit anyway? [y/N] ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF counts as a refusal
            return Ok(false);
        }
        if line.trim().is_empty() {
            return Ok(false);
        }
        match parse_confirmation(&line) {
            Some(decision) => return Ok(decision),
            None => println!("Please answer yes or no."),
        }
    }
}

fn write_export(
    report: &AnalysisReport,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let content = match format {
        ExportFormat::Markdown => report.to_markdown(),
        ExportFormat::Json => report.to_json()?,
        ExportFormat::Issue => report.to_issue_template(),
    };
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("\n{}", content),
    }
    Ok(())
}
