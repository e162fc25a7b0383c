use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use library_app::{modules, Catalog, Library};
use library_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "library-cli", version, about = "Library catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the JSON schema of every record type
    Schema,
    /// Import a catalog file into an empty library and report rejected entries
    Check {
        /// Path to a JSON catalog with `authors` and `books` lists
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load library settings")?;
    library_telemetry::init(&settings.telemetry).context("failed to initialize telemetry")?;

    tracing::info!(
        env = ?settings.environment,
        delete_policy = settings.library.delete_policy.as_str(),
        "library-cli bootstrap starting"
    );

    let library = Library::in_memory(&settings.library);
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &library);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let outcome = run(cli.command, &registry, &library).await;

    registry.stop_modules().await?;
    outcome
}

async fn run(
    command: Command,
    registry: &ModuleRegistry,
    library: &Library,
) -> anyhow::Result<ExitCode> {
    match command {
        Command::Schema => {
            let schema = registry.collect_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let catalog = Catalog::from_path(&file)?;
            let report = library.import(catalog).await;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if report.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::warn!(
                    rejected = report.rejected.len(),
                    file = %file.display(),
                    "catalog has rejected entries"
                );
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
