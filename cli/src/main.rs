//! CLI entrypoint for slotguard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use slotguard_application::{
    ConfigurationStore, HandleSubmissionUseCase, ListQuestionsUseCase, NoSubmissionLogger,
    ReauthorizationNotifier, SubmissionLogger, SystemClock, UpdateConfigurationUseCase,
};
use slotguard_domain::{FormResponse, QuestionId, SubmissionEvent};
use slotguard_infrastructure::{
    ConfigLoader, FileConfig, JsonFileFormGateway, JsonFilePropertyStore, JsonlOutbox,
    JsonlSubmissionLogger, PropertyTriggerRegistrar, StaticAuthorization, StaticIdentity,
};
use slotguard_presentation::{Cli, Command, ConsoleFormatter};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.command == Command::ShowConfig {
        print!(
            "{}",
            ConsoleFormatter::format_config_sources(&ConfigLoader::config_sources(
                cli.config.as_deref()
            ))
        );
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    let issues = config.validate();
    if !issues.is_empty() {
        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        bail!("invalid configuration: {}", messages.join("; "));
    }

    info!("Starting slotguard");

    // === Dependency Injection ===
    let store = Arc::new(JsonFilePropertyStore::new(&config.storage.properties_path));
    let form = Arc::new(JsonFileFormGateway::new(&config.storage.form_path));
    let identity = config.identity.resolve(cli.as_identity.as_deref());

    match &cli.command {
        Command::Questions => {
            let questions = ListQuestionsUseCase::new(form).execute().await?;
            let snapshot = ConfigurationStore::new(store).get().await?;
            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&questions));
            } else {
                print!(
                    "{}",
                    ConsoleFormatter::format_questions(&questions, &snapshot.configuration)
                );
            }
        }
        Command::Config => {
            let configuration = ConfigurationStore::new(store);
            let snapshot = configuration.get().await?;
            let owner = configuration.owner().await?;
            if cli.json {
                let value = serde_json::json!({
                    "owner": owner,
                    "configuration": snapshot.configuration,
                    "decode_errors": snapshot.decode_errors,
                });
                println!("{}", ConsoleFormatter::format_json(&value));
            } else {
                print!(
                    "{}",
                    ConsoleFormatter::format_configuration(&snapshot, owner.as_deref())
                );
            }
        }
        Command::Enable { question_id } | Command::Disable { question_id } => {
            let enabled = matches!(cli.command, Command::Enable { .. });
            let Some(caller) = identity else {
                bail!("no identity configured; pass --as <email> or set [identity] email");
            };
            let question_id = QuestionId::try_new(question_id.as_str())?;

            let use_case = UpdateConfigurationUseCase::new(
                store.clone(),
                Arc::new(PropertyTriggerRegistrar::new(store.clone())),
                Arc::new(StaticIdentity::new(caller)),
            );
            let snapshot = use_case.set_enabled(&question_id, enabled).await?;
            let owner = ConfigurationStore::new(store).owner().await?;

            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&snapshot));
            } else {
                print!(
                    "{}",
                    ConsoleFormatter::format_configuration(&snapshot, owner.as_deref())
                );
            }
        }
        Command::Submit { response } => {
            let event = read_submission(response, &config)?;

            let outbox = JsonlOutbox::open(&config.storage.outbox_path).with_context(|| {
                format!(
                    "failed to open outbox {}",
                    config.storage.outbox_path.display()
                )
            })?;
            let notifier = ReauthorizationNotifier::new(
                store.clone(),
                Arc::new(outbox),
                Arc::new(StaticIdentity::new(identity.unwrap_or_default())),
                Arc::new(SystemClock),
            )
            .with_params(config.reauthorization.to_params());

            let handler = HandleSubmissionUseCase::new(
                store,
                form,
                Arc::new(StaticAuthorization::new(config.reauthorization.status)),
                notifier,
            )
            .with_params(config.depletion.to_params())
            .with_logger(submission_logger(&config));

            let outcome = handler.execute(&event).await;
            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&outcome));
            } else {
                print!("{}", ConsoleFormatter::format_outcome(&outcome));
            }
        }
        Command::ShowConfig => {}
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the `-v` count when set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Read a submission payload: `{"itemResponses": [...]}`.
fn read_submission(path: &Path, config: &FileConfig) -> Result<SubmissionEvent> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let response: FormResponse = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a form response", path.display()))?;

    Ok(SubmissionEvent::new(
        config.storage.form_path.display().to_string(),
        response.item_responses,
    ))
}

fn submission_logger(config: &FileConfig) -> Arc<dyn SubmissionLogger> {
    config
        .storage
        .submission_log_path
        .as_ref()
        .and_then(JsonlSubmissionLogger::new)
        .map(|logger| Arc::new(logger) as Arc<dyn SubmissionLogger>)
        .unwrap_or_else(|| Arc::new(NoSubmissionLogger))
}
