use clap::Parser;
use plan_cli::execute;
use plan_core::PlanError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Merge Gradle descriptor fragments into one validated, canonical
/// build plan.
#[derive(Parser, Debug)]
#[command(
    name = "buildplan",
    version,
    about = "Build-configuration resolution and normalization"
)]
struct Cli {
    /// Descriptor fragments, oldest first.
    #[arg(value_name = "FRAGMENT", required = true)]
    fragments: Vec<PathBuf>,

    /// Version catalog (libs.versions.toml) for alias resolution.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Emit the plan as JSON instead of canonical text.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the emitted plan.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(&cli.fragments, cli.catalog.as_deref()) {
        Ok(output) => {
            if cli.json {
                match serde_json::to_string_pretty(&output.plan) {
                    Ok(json) => println!("{json}"),
                    Err(err) => {
                        eprintln!("error: {err}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", output.canonical);
            }
            ExitCode::SUCCESS
        }
        Err(PlanError::Rejected { issues }) => {
            eprintln!("build plan rejected:");
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
