//! QuillShift CLI entry point

use std::process::ExitCode;

use clap::Parser;

use quillshift::cli::{
    app::{load_merged_config, run_agent, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging,
    models_cmd::handle_models_command,
    presenter::Presenter,
};
use quillshift::domain::binding::ProviderId;
use quillshift::domain::error::ConfigError;
use quillshift::infrastructure::{build_provider_set, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut presenter = Presenter::new();

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                let code = match e {
                    ConfigError::ValidationError { .. } => EXIT_USAGE_ERROR,
                    _ => EXIT_ERROR,
                };
                return ExitCode::from(code);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Some(Commands::Models { provider }) => {
            let filter = match provider.as_deref().map(str::parse::<ProviderId>).transpose() {
                Ok(f) => f,
                Err(e) => {
                    presenter.error(&e.to_string());
                    return ExitCode::from(EXIT_USAGE_ERROR);
                }
            };

            let store = XdgConfigStore::new();
            let config = load_merged_config(&store).await;
            let providers = build_provider_set(&config);

            if handle_models_command(&providers, &mut presenter, filter).await {
                ExitCode::from(EXIT_SUCCESS)
            } else {
                ExitCode::from(EXIT_ERROR)
            }
        }
        Some(Commands::Run) | None => run_agent().await,
    }
}
