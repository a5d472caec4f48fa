use owo_colors::OwoColorize;
use si_usage_report::adapters::outbound::console::StderrProgressReporter;
use si_usage_report::adapters::outbound::filesystem::CfConfigReader;
use si_usage_report::adapters::outbound::network::{CachingServiceCatalog, CfApiClient};
use si_usage_report::application::factories::{OutputFactory, OutputTarget};
use si_usage_report::application::use_cases::GenerateUsageReportUseCase;
use si_usage_report::cli::Args;
use si_usage_report::config::{discover_config, load_config_from_path, ConfigFile, RunSettings};
use si_usage_report::logging;
use si_usage_report::ports::inbound::UsageReportPort;
use si_usage_report::ports::outbound::{OutputPresenter, ReportFormatter};
use si_usage_report::shared::error::{ExitCode, UsageReportError};
use si_usage_report::shared::Result;
use std::io::IsTerminal;
use std::process;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    logging::init(args.verbose);

    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            report_error(&e);
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let settings = RunSettings::resolve(&args, &config)?;
    tracing::debug!(?settings, "resolved settings");

    // Create adapters (Dependency Injection)
    let session = CfConfigReader::from_env().load()?;
    let api_client = CfApiClient::new(&session, settings.api.clone())?;
    let catalog = CachingServiceCatalog::new(api_client.clone());
    let progress_reporter = StderrProgressReporter::new();

    let use_case =
        GenerateUsageReportUseCase::new(session, api_client, catalog, progress_reporter);

    let response = use_case.generate_usage_report(settings.request.clone()).await?;

    let formatter = OutputFactory::formatter(settings.format);
    let output = formatter.format(&response.report)?;

    OutputFactory::presenter(OutputTarget::from(settings.output)).present(&output)?;

    Ok(())
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(&std::env::current_dir()?)?.unwrap_or_default()),
    }
}

fn header(text: &str, on_terminal: bool) -> String {
    if on_terminal {
        text.red().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Prints a failure for the user
///
/// The fixed advisories go to stdout like the CF CLI's own messages; no
/// report is written on failure, so stdout never mixes the two.
fn report_error(e: &anyhow::Error) {
    let stdout_tty = std::io::stdout().is_terminal();
    match e.downcast_ref::<UsageReportError>() {
        Some(UsageReportError::NotAuthenticated) => {
            println!("{}\n run cf login", header("error: not logged in.", stdout_tty));
        }
        Some(UsageReportError::EmptyUpstreamResponse { .. }) => {
            println!(
                "{}",
                header(
                    "error while getting service instances: CF API returned no output",
                    stdout_tty
                )
            );
        }
        _ => {
            let stderr_tty = std::io::stderr().is_terminal();
            eprintln!("\n{}\n", header("❌ An error occurred:", stderr_tty));
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
        }
    }
}
