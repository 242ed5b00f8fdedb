//! Models command handler

use crate::application::ports::ModelDescriptor;
use crate::application::ProviderSet;
use crate::domain::binding::ProviderId;

use super::presenter::Presenter;

/// Handle the models subcommand.
///
/// Returns false when a queried provider failed so the caller can set
/// the exit code. Without an explicit `--provider`, providers that are
/// disabled or missing a key are skipped with a warning instead.
pub async fn handle_models_command(
    providers: &ProviderSet,
    presenter: &mut Presenter,
    filter: Option<ProviderId>,
) -> bool {
    let explicit = filter.is_some();
    let ids: Vec<ProviderId> = match filter {
        Some(id) => vec![id],
        None => providers.ids(),
    };

    let mut all_ok = true;
    for id in ids {
        let provider = match providers.resolve(id) {
            Ok(p) => p,
            Err(e) => {
                if explicit {
                    presenter.error(&e.to_string());
                    all_ok = false;
                } else {
                    presenter.warn(&format!("Skipping {}: {}", id.label(), e));
                }
                continue;
            }
        };

        presenter.start_spinner(&format!("Fetching {} models...", id.label()));
        match provider.list_models().await {
            Ok(models) => {
                presenter.spinner_success(&format!("{}: {} models", id.label(), models.len()));
                for model in &models {
                    presenter.output(&format_model_row(model));
                }
            }
            Err(e) => {
                presenter.spinner_fail(&format!("{}: {}", id.label(), e));
                all_ok = false;
            }
        }
    }

    all_ok
}

fn format_model_row(model: &ModelDescriptor) -> String {
    let released = model
        .created
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!("{:<40} {:<30} {}", model.id, model.display_name, released)
}
