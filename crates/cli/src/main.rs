use anyhow::Context;
use clap::{Parser, Subcommand};
use conditionlist_core::config::non_coded_uuid_from_env_value;
use conditionlist_core::constants::NON_CODED_UUID_ENV_VAR;
use conditionlist_core::records::{read_condition_file, read_conditions_file};
use conditionlist_core::{
    ConditionValidator, GlobalPropertyStore, InMemoryConditionStore, RecordUuid,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "conditions")]
#[command(about = "Condition list validation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a condition against a patient's existing conditions
    Validate {
        /// Candidate condition file (.json, .yaml or .yml)
        #[arg(long)]
        candidate: PathBuf,
        /// Existing conditions file (a list; optional)
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Uuid of the non-coded concept (overrides CONDITION_LIST_NON_CODED_UUID)
        #[arg(long)]
        non_coded_uuid: Option<String>,
    },
    /// Print a newly generated record uuid
    NewUuid,
}

/// Entry point for the `conditions` CLI.
///
/// # Environment Variables
/// - `CONDITION_LIST_NON_CODED_UUID`: uuid of the non-coded concept
/// - `RUST_LOG`: log filter (default: "conditionlist=info")
fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("conditionlist=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate {
            candidate,
            existing,
            non_coded_uuid,
        }) => {
            let non_coded_uuid =
                non_coded_uuid.or_else(|| std::env::var(NON_CODED_UUID_ENV_VAR).ok());
            validate(&candidate, existing.as_deref(), non_coded_uuid)
        }
        Some(Commands::NewUuid) => {
            println!("{}", RecordUuid::new());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Use 'conditions --help' for commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate(
    candidate_path: &Path,
    existing_path: Option<&Path>,
    non_coded_uuid: Option<String>,
) -> anyhow::Result<ExitCode> {
    let properties = match non_coded_uuid_from_env_value(non_coded_uuid)
        .context("invalid non-coded concept uuid")?
    {
        Some(uuid) => GlobalPropertyStore::with_non_coded_uuid(&uuid),
        None => {
            tracing::warn!("no non-coded concept uuid configured");
            GlobalPropertyStore::new()
        }
    };

    let existing = match existing_path {
        Some(path) => read_conditions_file(path)
            .with_context(|| format!("failed to load existing conditions from {}", path.display()))?,
        None => Vec::new(),
    };
    let store = InMemoryConditionStore::from_conditions(existing)
        .context("existing conditions must all carry a uuid")?;

    let candidate = read_condition_file(candidate_path).with_context(|| {
        format!("failed to load candidate from {}", candidate_path.display())
    })?;

    let validator = ConditionValidator::new(Arc::new(store), Arc::new(properties));
    let violations = validator.check(&candidate)?;

    if violations.is_empty() {
        println!("OK");
        return Ok(ExitCode::SUCCESS);
    }

    for violation in &violations {
        println!("{violation}");
    }
    Ok(ExitCode::from(1))
}
