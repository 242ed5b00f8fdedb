//! Main app runner for the hotkey agent

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use tokio::sync::broadcast;

use crate::application::ports::{AccessibilityGate, ConfigStore, HotkeyBackend, HotkeyToken};
use crate::application::{
    ProcessingEvent, ProcessingOrchestrator, ProcessingOutcome, ReloadSummary, ShortcutRegistry,
};
use crate::domain::binding::ProviderId;
use crate::domain::config::{AppConfig, ProviderConfig, ProvidersConfig};
use crate::infrastructure::{
    build_provider_set, create_accessibility_gate, create_alert_sink, create_screen_capture,
    create_selection, GlobalHotkeyBackend, PlatformAccessibility, XdgConfigStore,
};

use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::{AgentSignal, AgentSignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Poll interval for the hotkey event channel
const EVENT_POLL: Duration = Duration::from_millis(10);

/// Run the hotkey agent until a shutdown signal arrives
pub async fn run_agent() -> ExitCode {
    let presenter = Presenter::new();

    // Single instance per machine
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let store = XdgConfigStore::new();
    let config = load_merged_config(&store).await;

    // A bad binding row fails startup so misconfigurations are loud
    let bindings = match config.validated_bindings() {
        Ok(b) if b.is_empty() => {
            presenter.error(
                "No bindings configured. Run 'quillshift config init' and edit the config file.",
            );
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        Ok(b) => b,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let providers = build_provider_set(&config);

    let orchestrator = Arc::new(ProcessingOrchestrator::new(
        create_selection(),
        create_screen_capture(),
        create_alert_sink(),
        create_accessibility_gate(),
        providers,
    ));

    // Mirror request outcomes into the terminal alongside desktop alerts
    let mut events = orchestrator.subscribe();
    let event_presenter = Presenter::new();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ProcessingEvent::Started { binding_id }) => {
                    event_presenter.info(&format!("{}: processing...", binding_id));
                }
                Ok(ProcessingEvent::Finished {
                    binding_id,
                    outcome,
                }) => match outcome {
                    ProcessingOutcome::Completed => {
                        event_presenter.success(&format!("{}: done", binding_id));
                    }
                    ProcessingOutcome::Stopped => {
                        event_presenter.info(&format!("{}: nothing to do", binding_id));
                    }
                    ProcessingOutcome::Failed => {
                        event_presenter.error(&format!("{}: failed", binding_id));
                    }
                },
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Hotkeys stay on the main thread
    let backend = match GlobalHotkeyBackend::new() {
        Ok(b) => b,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let mut registry = ShortcutRegistry::new(backend);

    let summary = registry.reload(&bindings);
    report_reload(&presenter, &summary);
    if registry.active_count() == 0 {
        presenter.error("No hotkeys could be registered");
        return ExitCode::from(EXIT_ERROR);
    }

    // Missing permission is not fatal here; the first press prompts for it
    if !PlatformAccessibility::new().granted() {
        presenter.warn("Accessibility permission not granted yet; the first hotkey press will ask for it.");
    }

    let mut signals = match AgentSignalHandler::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.info(&format!(
        "QuillShift is running (PID {}). Select text and press a bound hotkey.",
        std::process::id()
    ));

    // Main event loop
    let receiver = GlobalHotKeyEvent::receiver();
    loop {
        // Drain pending hotkey events
        while let Ok(event) = receiver.try_recv() {
            if event.state != HotKeyState::Pressed {
                continue;
            }
            if let Some(binding) = registry.resolve(HotkeyToken(event.id)) {
                let binding = binding.clone();
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(async move {
                    orchestrator.run(&binding).await;
                });
            }
        }

        tokio::select! {
            signal = signals.recv() => match signal {
                Some(AgentSignal::ReloadConfig) => {
                    reload_bindings(&store, &mut registry, &presenter).await;
                }
                Some(AgentSignal::Shutdown) | None => {
                    presenter.info("Shutting down");
                    break;
                }
            },
            _ = tokio::time::sleep(EVENT_POLL) => {
                // Poll interval to avoid busy-waiting on the hotkey channel
            }
        }
    }

    let _ = pid_file.release();
    ExitCode::from(EXIT_SUCCESS)
}

/// Re-read the config file and swap the hotkey registrations.
///
/// Binding definitions take effect immediately; provider credentials are
/// read once at startup and need a restart.
async fn reload_bindings<B: HotkeyBackend>(
    store: &XdgConfigStore,
    registry: &mut ShortcutRegistry<B>,
    presenter: &Presenter,
) {
    let config = load_merged_config(store).await;
    match config.validated_bindings() {
        Ok(bindings) => {
            let summary = registry.reload(&bindings);
            report_reload(presenter, &summary);
        }
        Err(e) => {
            // Invalid file: keep the previous registrations
            presenter.error(&format!("Reload failed, keeping current hotkeys: {}", e));
        }
    }
}

fn report_reload(presenter: &Presenter, summary: &ReloadSummary) {
    presenter.success(&format!("{} hotkeys active", summary.registered));
    for id in &summary.skipped_duplicates {
        presenter.warn(&format!(
            "Binding '{}' skipped: its combo is already taken by an earlier binding",
            id
        ));
    }
    for (id, err) in &summary.failed {
        presenter.warn(&format!("Binding '{}' skipped: {}", id, err));
    }
}

/// Load and merge configuration from defaults, file, and environment
pub async fn load_merged_config<S: ConfigStore>(store: &S) -> AppConfig {
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Environment API keys override file values
    let env_config = AppConfig {
        providers: Some(ProvidersConfig {
            claude: env_provider(ProviderId::Claude),
            openai: env_provider(ProviderId::OpenAi),
        }),
        bindings: None,
    };

    AppConfig::defaults().merge(file_config).merge(env_config)
}

fn env_provider(id: ProviderId) -> Option<ProviderConfig> {
    let key = env::var(id.env_var()).ok().filter(|s| !s.is_empty())?;
    Some(ProviderConfig {
        api_key: Some(key),
        enabled: None,
        base_url: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn merged_config_prefers_file_over_defaults() {
        // The api_key assertion below would otherwise see a real key
        env::remove_var("ANTHROPIC_API_KEY");

        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let mut file_config = AppConfig::empty();
        file_config.providers = Some(ProvidersConfig {
            claude: Some(ProviderConfig {
                api_key: Some("sk-from-file".to_string()),
                enabled: Some(false),
                base_url: None,
            }),
            openai: None,
        });
        store.save(&file_config).await.unwrap();

        let merged = load_merged_config(&store).await;
        assert_eq!(merged.api_key(ProviderId::Claude), Some("sk-from-file".to_string()));
        assert!(!merged.provider_enabled(ProviderId::Claude));
        // Defaults still supply the starter bindings
        assert!(!merged.validated_bindings().unwrap().is_empty());
    }

    #[tokio::test]
    async fn merged_config_keeps_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("missing.toml"));

        let merged = load_merged_config(&store).await;
        assert!(merged.provider_enabled(ProviderId::Claude));
        assert_eq!(merged.validated_bindings().unwrap().len(), 2);
    }
}
