//! Hotkey-to-replacement processing pipeline

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time;
use tracing::{info, warn};

use crate::domain::enhancement::{recover, ExtractError};
use crate::domain::{Binding, ProcessingRequest};

use super::ports::{
    AccessibilityGate, AlertKind, AlertSink, CaptureError, ProviderError, ScreenCapture,
    SelectionError, TextSelection,
};
use super::provider_set::{ProviderSet, ResolveError};

/// End-to-end budget for one request, provider call included
const DEFAULT_DEADLINE: Duration = Duration::from_secs(45);

/// Grace period after prompting for the accessibility permission
const PERMISSION_SETTLE: Duration = Duration::from_millis(500);

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// How one request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// Text was delivered back to the focused application
    Completed,
    /// Nothing to do (no selection); not an error
    Stopped,
    /// An error was reported to the user
    Failed,
}

/// Lifecycle events broadcast for every request.
///
/// Every `run` emits exactly one `Started` and one `Finished`, whatever
/// path the pipeline takes. Sent regardless of whether anyone listens.
#[derive(Debug, Clone)]
pub enum ProcessingEvent {
    Started {
        binding_id: String,
    },
    Finished {
        binding_id: String,
        outcome: ProcessingOutcome,
    },
}

/// One pipeline step's failure; each maps to a user-facing alert
#[derive(Debug, Error)]
enum StepError {
    #[error("{0}")]
    Permission(String),

    #[error(transparent)]
    ProviderUnavailable(ResolveError),

    #[error("No text selected")]
    EmptySelection,

    #[error(transparent)]
    SelectionRead(SelectionError),

    #[error(transparent)]
    Capture(CaptureError),

    #[error(transparent)]
    Provider(ProviderError),

    #[error(transparent)]
    Extraction(ExtractError),

    #[error(transparent)]
    Delivery(SelectionError),
}

/// Drives one binding press from selection read to text replacement.
///
/// `run` never returns an error; every failure is reported through the
/// alert sink and folded into the outcome.
pub struct ProcessingOrchestrator<S, C, A, G>
where
    S: TextSelection,
    C: ScreenCapture,
    A: AlertSink,
    G: AccessibilityGate,
{
    selection: S,
    screen: C,
    alerts: A,
    permissions: G,
    providers: ProviderSet,
    events: broadcast::Sender<ProcessingEvent>,
    deadline: Duration,
    permission_settle: Duration,
}

impl<S, C, A, G> ProcessingOrchestrator<S, C, A, G>
where
    S: TextSelection,
    C: ScreenCapture,
    A: AlertSink,
    G: AccessibilityGate,
{
    pub fn new(selection: S, screen: C, alerts: A, permissions: G, providers: ProviderSet) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            selection,
            screen,
            alerts,
            permissions,
            providers,
            events,
            deadline: DEFAULT_DEADLINE,
            permission_settle: PERMISSION_SETTLE,
        }
    }

    /// Override the end-to-end deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Override the post-prompt permission settle delay
    pub fn with_permission_settle(mut self, settle: Duration) -> Self {
        self.permission_settle = settle;
        self
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<ProcessingEvent> {
        self.events.subscribe()
    }

    /// Process one binding press end to end.
    ///
    /// The whole pipeline runs under the deadline; on expiry the in-flight
    /// work is dropped and the user is told the request was abandoned.
    pub async fn run(&self, binding: &Binding) -> ProcessingOutcome {
        let _ = self.events.send(ProcessingEvent::Started {
            binding_id: binding.id.clone(),
        });
        info!(binding = %binding.id, provider = %binding.provider, "processing started");

        let outcome = match time::timeout(self.deadline, self.pipeline(binding)).await {
            Ok(Ok(())) => {
                info!(binding = %binding.id, "text delivered");
                ProcessingOutcome::Completed
            }
            Ok(Err(step)) => self.report(binding, step).await,
            Err(_) => {
                warn!(binding = %binding.id, deadline_secs = self.deadline.as_secs(), "deadline expired");
                self.alert(
                    AlertKind::Error,
                    "Timed out",
                    &format!(
                        "No response within {} seconds. The request was abandoned.",
                        self.deadline.as_secs()
                    ),
                )
                .await;
                ProcessingOutcome::Failed
            }
        };

        let _ = self.events.send(ProcessingEvent::Finished {
            binding_id: binding.id.clone(),
            outcome,
        });
        outcome
    }

    async fn pipeline(&self, binding: &Binding) -> Result<(), StepError> {
        self.ensure_permission().await?;

        let provider = self
            .providers
            .resolve(binding.provider)
            .map_err(StepError::ProviderUnavailable)?;

        let request = self.assemble(binding).await?;

        let raw = provider
            .enhance(&request)
            .await
            .map_err(StepError::Provider)?;

        // Screen descriptions are free-form prose; only selection rewrites
        // carry the JSON envelope.
        let text = if request.source.is_screenshot_only() {
            raw
        } else {
            recover(&raw).map_err(StepError::Extraction)?.enhanced_text
        };

        self.deliver(binding, &text).await
    }

    /// Gate on the accessibility permission, prompting once if missing
    async fn ensure_permission(&self) -> Result<(), StepError> {
        if self.permissions.granted() {
            return Ok(());
        }

        info!("accessibility permission missing, prompting");
        self.permissions.request();
        time::sleep(self.permission_settle).await;

        if self.permissions.granted() {
            return Ok(());
        }
        Err(StepError::Permission(self.permissions.remediation()))
    }

    /// Read sources and build the provider request.
    ///
    /// Capture failure is fatal only when the screenshot is the sole
    /// source; a rewrite that merely wanted visual context proceeds
    /// without it.
    async fn assemble(&self, binding: &Binding) -> Result<ProcessingRequest, StepError> {
        if binding.is_screen_only() {
            let image = self.screen.capture().await.map_err(StepError::Capture)?;
            info!(binding = %binding.id, size = %image.human_readable_size(), "captured screen");
            return Ok(ProcessingRequest::screenshot_only(binding, image));
        }

        let text = self
            .selection
            .read()
            .await
            .map_err(StepError::SelectionRead)?;

        // Whitespace-only selections count as empty.
        if text.trim().is_empty() {
            return Err(StepError::EmptySelection);
        }

        let screenshot = if binding.wants_screenshot() {
            match self.screen.capture().await {
                Ok(image) => {
                    info!(binding = %binding.id, size = %image.human_readable_size(), "captured screen");
                    Some(image)
                }
                Err(err) => {
                    warn!(binding = %binding.id, error = %err, "capture failed, continuing without screenshot");
                    None
                }
            }
        } else {
            None
        };

        Ok(ProcessingRequest::for_selection(binding, text, screenshot))
    }

    async fn deliver(&self, binding: &Binding, text: &str) -> Result<(), StepError> {
        if binding.is_screen_only() {
            self.selection
                .insert(text)
                .await
                .map_err(StepError::Delivery)
        } else {
            self.selection
                .replace(text)
                .await
                .map_err(StepError::Delivery)
        }
    }

    async fn report(&self, binding: &Binding, step: StepError) -> ProcessingOutcome {
        let (kind, title, outcome) = match &step {
            StepError::EmptySelection => (
                AlertKind::Info,
                binding.display_name.clone(),
                ProcessingOutcome::Stopped,
            ),
            StepError::Permission(_) => (
                AlertKind::Error,
                "Permission required".to_string(),
                ProcessingOutcome::Failed,
            ),
            StepError::ProviderUnavailable(_) => (
                AlertKind::Error,
                "Provider unavailable".to_string(),
                ProcessingOutcome::Failed,
            ),
            StepError::SelectionRead(_) => (
                AlertKind::Error,
                "Could not read the selection".to_string(),
                ProcessingOutcome::Failed,
            ),
            StepError::Capture(_) => (
                AlertKind::Error,
                "Screen capture failed".to_string(),
                ProcessingOutcome::Failed,
            ),
            StepError::Provider(_) => (
                AlertKind::Error,
                format!("{} request failed", binding.provider.label()),
                ProcessingOutcome::Failed,
            ),
            StepError::Extraction(_) => (
                AlertKind::Error,
                "Unusable model output".to_string(),
                ProcessingOutcome::Failed,
            ),
            StepError::Delivery(_) => (
                AlertKind::Error,
                "Could not deliver the result".to_string(),
                ProcessingOutcome::Failed,
            ),
        };

        let message = step.to_string();
        match outcome {
            ProcessingOutcome::Stopped => {
                info!(binding = %binding.id, "nothing selected, stopping")
            }
            _ => warn!(binding = %binding.id, error = %message, "processing failed"),
        }

        self.alert(kind, &title, &message).await;
        outcome
    }

    async fn alert(&self, kind: AlertKind, title: &str, message: &str) {
        if let Err(err) = self.alerts.show(kind, title, message).await {
            warn!(error = %err, "failed to show alert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AlertError, ModelDescriptor, Provider};
    use crate::domain::{BindingMode, ImageEncoding, ProviderId, ScreenImage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn binding(mode: BindingMode, include_screenshot: bool) -> Binding {
        Binding {
            id: "improve".to_string(),
            display_name: "Improve writing".to_string(),
            combo: "ctrl+shift+e".parse().unwrap(),
            prompt_template: "Improve this text".to_string(),
            provider: ProviderId::Claude,
            model: "claude-sonnet-4-5".to_string(),
            include_screenshot,
            mode,
        }
    }

    #[derive(Default)]
    struct SelectionLog {
        reads: AtomicUsize,
        replaced: Mutex<Vec<String>>,
        inserted: Mutex<Vec<String>>,
    }

    struct StaticSelection {
        text: String,
        fail_write: bool,
        log: Arc<SelectionLog>,
    }

    impl StaticSelection {
        fn returning(text: &str, log: Arc<SelectionLog>) -> Self {
            Self {
                text: text.to_string(),
                fail_write: false,
                log,
            }
        }
    }

    #[async_trait]
    impl TextSelection for StaticSelection {
        async fn read(&self) -> Result<String, SelectionError> {
            self.log.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }

        async fn replace(&self, text: &str) -> Result<(), SelectionError> {
            if self.fail_write {
                return Err(SelectionError::WriteFailed("paste rejected".to_string()));
            }
            self.log.replaced.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn insert(&self, text: &str) -> Result<(), SelectionError> {
            if self.fail_write {
                return Err(SelectionError::WriteFailed("paste rejected".to_string()));
            }
            self.log.inserted.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct StubCapture {
        fail: bool,
    }

    #[async_trait]
    impl ScreenCapture for StubCapture {
        async fn capture(&self) -> Result<ScreenImage, CaptureError> {
            if self.fail {
                return Err(CaptureError::CaptureFailed("no backend".to_string()));
            }
            Ok(ScreenImage::new(vec![0xff, 0xd8], ImageEncoding::Jpeg))
        }
    }

    #[derive(Default)]
    struct AlertLog {
        shown: Mutex<Vec<(AlertKind, String, String)>>,
    }

    struct RecordingAlerts {
        log: Arc<AlertLog>,
    }

    #[async_trait]
    impl AlertSink for RecordingAlerts {
        async fn show(
            &self,
            kind: AlertKind,
            title: &str,
            message: &str,
        ) -> Result<(), AlertError> {
            self.log
                .shown
                .lock()
                .unwrap()
                .push((kind, title.to_string(), message.to_string()));
            Ok(())
        }
    }

    struct OpenGate;

    impl AccessibilityGate for OpenGate {
        fn granted(&self) -> bool {
            true
        }
        fn request(&self) {}
        fn remediation(&self) -> String {
            String::new()
        }
    }

    struct PromptableGate {
        granted: AtomicBool,
        grant_on_request: bool,
        requests: AtomicUsize,
    }

    impl PromptableGate {
        fn new(grant_on_request: bool) -> Arc<Self> {
            Arc::new(Self {
                granted: AtomicBool::new(false),
                grant_on_request,
                requests: AtomicUsize::new(0),
            })
        }
    }

    impl AccessibilityGate for Arc<PromptableGate> {
        fn granted(&self) -> bool {
            self.granted.load(Ordering::SeqCst)
        }

        fn request(&self) {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.grant_on_request {
                self.granted.store(true, Ordering::SeqCst);
            }
        }

        fn remediation(&self) -> String {
            "Grant access under Privacy & Security".to_string()
        }
    }

    #[derive(Default)]
    struct ProviderLog {
        calls: AtomicUsize,
        saw_screenshot: Mutex<Option<bool>>,
    }

    struct ScriptedProvider {
        response: Result<String, ProviderError>,
        hang: bool,
        log: Arc<ProviderLog>,
    }

    impl ScriptedProvider {
        fn returning(raw: &str, log: Arc<ProviderLog>) -> Self {
            Self {
                response: Ok(raw.to_string()),
                hang: false,
                log,
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Claude
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn enhance(&self, request: &ProcessingRequest) -> Result<String, ProviderError> {
            self.log.calls.fetch_add(1, Ordering::SeqCst);
            *self.log.saw_screenshot.lock().unwrap() = Some(request.screenshot.is_some());
            if self.hang {
                time::sleep(Duration::from_secs(600)).await;
            }
            self.response.clone()
        }

        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
            Ok(Vec::new())
        }
    }

    struct Harness {
        selection_log: Arc<SelectionLog>,
        alert_log: Arc<AlertLog>,
        provider_log: Arc<ProviderLog>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                selection_log: Arc::new(SelectionLog::default()),
                alert_log: Arc::new(AlertLog::default()),
                provider_log: Arc::new(ProviderLog::default()),
            }
        }

        fn orchestrator(
            &self,
            selection_text: &str,
            raw_response: &str,
            capture_fails: bool,
        ) -> ProcessingOrchestrator<StaticSelection, StubCapture, RecordingAlerts, OpenGate>
        {
            let mut providers = ProviderSet::new();
            providers.register(
                Arc::new(ScriptedProvider::returning(
                    raw_response,
                    Arc::clone(&self.provider_log),
                )),
                true,
            );

            ProcessingOrchestrator::new(
                StaticSelection::returning(selection_text, Arc::clone(&self.selection_log)),
                StubCapture {
                    fail: capture_fails,
                },
                RecordingAlerts {
                    log: Arc::clone(&self.alert_log),
                },
                OpenGate,
                providers,
            )
        }

        fn provider_calls(&self) -> usize {
            self.provider_log.calls.load(Ordering::SeqCst)
        }

        fn alerts(&self) -> Vec<(AlertKind, String, String)> {
            self.alert_log.shown.lock().unwrap().clone()
        }

        fn replaced(&self) -> Vec<String> {
            self.selection_log.replaced.lock().unwrap().clone()
        }

        fn inserted(&self) -> Vec<String> {
            self.selection_log.inserted.lock().unwrap().clone()
        }
    }

    fn collect_events(mut rx: broadcast::Receiver<ProcessingEvent>) -> Vec<ProcessingEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn rewrite_replaces_selection_with_extracted_text() {
        let harness = Harness::new();
        let orchestrator = harness.orchestrator(
            "helo wrold",
            r#"Sure! Here you go: {"enhancedText": "Hello world"}"#,
            false,
        );
        let rx = orchestrator.subscribe();

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Completed);
        assert_eq!(harness.replaced(), vec!["Hello world"]);
        assert!(harness.inserted().is_empty());
        assert!(harness.alerts().is_empty());

        let events = collect_events(rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], ProcessingEvent::Started { binding_id } if binding_id == "improve"));
        assert!(matches!(
            &events[1],
            ProcessingEvent::Finished { outcome: ProcessingOutcome::Completed, .. }
        ));
    }

    #[tokio::test]
    async fn empty_selection_stops_without_provider_call() {
        let harness = Harness::new();
        let orchestrator = harness.orchestrator("", r#"{"enhancedText": "x"}"#, false);
        let rx = orchestrator.subscribe();

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Stopped);
        assert_eq!(harness.provider_calls(), 0);
        assert!(harness.replaced().is_empty());

        let alerts = harness.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, AlertKind::Info);
        assert_eq!(alerts[0].2, "No text selected");

        let events = collect_events(rx);
        assert!(matches!(
            &events[1],
            ProcessingEvent::Finished { outcome: ProcessingOutcome::Stopped, .. }
        ));
    }

    #[tokio::test]
    async fn whitespace_selection_counts_as_empty() {
        let harness = Harness::new();
        let orchestrator = harness.orchestrator("  \n\t ", r#"{"enhancedText": "x"}"#, false);

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Stopped);
        assert_eq!(harness.provider_calls(), 0);
    }

    #[tokio::test]
    async fn capture_failure_is_fatal_for_screen_only() {
        let harness = Harness::new();
        let orchestrator = harness.orchestrator("ignored", "A tidy desktop.", true);

        let outcome = orchestrator
            .run(&binding(BindingMode::DescribeScreen, false))
            .await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        assert_eq!(harness.provider_calls(), 0);
        let alerts = harness.alerts();
        assert_eq!(alerts[0].1, "Screen capture failed");
    }

    #[tokio::test]
    async fn capture_failure_is_soft_when_screenshot_is_optional() {
        let harness = Harness::new();
        let orchestrator =
            harness.orchestrator("some text", r#"{"enhancedText": "Better text"}"#, true);

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, true)).await;

        assert_eq!(outcome, ProcessingOutcome::Completed);
        assert_eq!(harness.provider_calls(), 1);
        assert_eq!(
            *harness.provider_log.saw_screenshot.lock().unwrap(),
            Some(false)
        );
        assert_eq!(harness.replaced(), vec!["Better text"]);
    }

    #[tokio::test]
    async fn optional_screenshot_is_attached_when_capture_succeeds() {
        let harness = Harness::new();
        let orchestrator =
            harness.orchestrator("some text", r#"{"enhancedText": "Better text"}"#, false);

        orchestrator.run(&binding(BindingMode::Rewrite, true)).await;

        assert_eq!(
            *harness.provider_log.saw_screenshot.lock().unwrap(),
            Some(true)
        );
    }

    #[tokio::test]
    async fn screen_only_inserts_raw_text_verbatim() {
        let harness = Harness::new();
        let raw = "A terminal with two panes; the left shows a failing test.";
        let orchestrator = harness.orchestrator("ignored", raw, false);

        let outcome = orchestrator
            .run(&binding(BindingMode::DescribeScreen, false))
            .await;

        assert_eq!(outcome, ProcessingOutcome::Completed);
        assert_eq!(harness.inserted(), vec![raw]);
        assert!(harness.replaced().is_empty());
        // Selection is never read in screen-only mode.
        assert_eq!(harness.selection_log.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn garbage_model_output_fails_with_alert() {
        let harness = Harness::new();
        let orchestrator = harness.orchestrator("some text", "no json anywhere", false);

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        assert!(harness.replaced().is_empty());
        let alerts = harness.alerts();
        assert_eq!(alerts[0].0, AlertKind::Error);
        assert_eq!(alerts[0].1, "Unusable model output");
    }

    #[tokio::test]
    async fn denied_permission_fails_before_any_io() {
        let gate = PromptableGate::new(false);

        let harness = Harness::new();
        let mut providers = ProviderSet::new();
        providers.register(
            Arc::new(ScriptedProvider::returning(
                r#"{"enhancedText": "x"}"#,
                Arc::clone(&harness.provider_log),
            )),
            true,
        );
        let orchestrator = ProcessingOrchestrator::new(
            StaticSelection::returning("text", Arc::clone(&harness.selection_log)),
            StubCapture { fail: false },
            RecordingAlerts {
                log: Arc::clone(&harness.alert_log),
            },
            Arc::clone(&gate),
            providers,
        )
        .with_permission_settle(Duration::from_millis(1));
        let rx = orchestrator.subscribe();

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        assert_eq!(gate.requests.load(Ordering::SeqCst), 1);
        assert_eq!(harness.selection_log.reads.load(Ordering::SeqCst), 0);
        assert_eq!(harness.provider_calls(), 0);

        let alerts = harness.alerts();
        assert_eq!(alerts[0].1, "Permission required");
        assert!(alerts[0].2.contains("Privacy & Security"));

        let events = collect_events(rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            ProcessingEvent::Finished { outcome: ProcessingOutcome::Failed, .. }
        ));
    }

    #[tokio::test]
    async fn permission_granted_after_prompt_proceeds() {
        let gate = PromptableGate::new(true);

        let harness = Harness::new();
        let mut providers = ProviderSet::new();
        providers.register(
            Arc::new(ScriptedProvider::returning(
                r#"{"enhancedText": "Better"}"#,
                Arc::clone(&harness.provider_log),
            )),
            true,
        );
        let orchestrator = ProcessingOrchestrator::new(
            StaticSelection::returning("text", Arc::clone(&harness.selection_log)),
            StubCapture { fail: false },
            RecordingAlerts {
                log: Arc::clone(&harness.alert_log),
            },
            Arc::clone(&gate),
            providers,
        )
        .with_permission_settle(Duration::from_millis(1));

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Completed);
        assert_eq!(gate.requests.load(Ordering::SeqCst), 1);
        assert_eq!(harness.replaced(), vec!["Better"]);
    }

    #[tokio::test]
    async fn disabled_provider_fails_before_reading_selection() {
        let harness = Harness::new();
        let mut providers = ProviderSet::new();
        providers.register(
            Arc::new(ScriptedProvider::returning(
                r#"{"enhancedText": "x"}"#,
                Arc::clone(&harness.provider_log),
            )),
            false,
        );
        let orchestrator = ProcessingOrchestrator::new(
            StaticSelection::returning("text", Arc::clone(&harness.selection_log)),
            StubCapture { fail: false },
            RecordingAlerts {
                log: Arc::clone(&harness.alert_log),
            },
            OpenGate,
            providers,
        );

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        assert_eq!(harness.selection_log.reads.load(Ordering::SeqCst), 0);
        assert_eq!(harness.provider_calls(), 0);

        let alerts = harness.alerts();
        assert_eq!(alerts[0].1, "Provider unavailable");
        assert!(alerts[0].2.contains("disabled"));
    }

    #[tokio::test]
    async fn provider_error_surfaces_with_provider_name() {
        let harness = Harness::new();
        let mut providers = ProviderSet::new();
        providers.register(
            Arc::new(ScriptedProvider {
                response: Err(ProviderError::RateLimited(ProviderId::Claude)),
                hang: false,
                log: Arc::clone(&harness.provider_log),
            }),
            true,
        );
        let orchestrator = ProcessingOrchestrator::new(
            StaticSelection::returning("text", Arc::clone(&harness.selection_log)),
            StubCapture { fail: false },
            RecordingAlerts {
                log: Arc::clone(&harness.alert_log),
            },
            OpenGate,
            providers,
        );
        let rx = orchestrator.subscribe();

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        let alerts = harness.alerts();
        assert_eq!(alerts[0].1, "Claude request failed");
        assert!(alerts[0].2.contains("rate limiting"));

        let events = collect_events(rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            ProcessingEvent::Finished { outcome: ProcessingOutcome::Failed, .. }
        ));
    }

    #[tokio::test]
    async fn deadline_abandons_hung_provider() {
        let harness = Harness::new();
        let mut providers = ProviderSet::new();
        providers.register(
            Arc::new(ScriptedProvider {
                response: Ok(r#"{"enhancedText": "late"}"#.to_string()),
                hang: true,
                log: Arc::clone(&harness.provider_log),
            }),
            true,
        );
        let orchestrator = ProcessingOrchestrator::new(
            StaticSelection::returning("text", Arc::clone(&harness.selection_log)),
            StubCapture { fail: false },
            RecordingAlerts {
                log: Arc::clone(&harness.alert_log),
            },
            OpenGate,
            providers,
        )
        .with_deadline(Duration::from_millis(50));
        let rx = orchestrator.subscribe();

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        assert!(harness.replaced().is_empty());
        let alerts = harness.alerts();
        assert_eq!(alerts[0].1, "Timed out");

        let events = collect_events(rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            ProcessingEvent::Finished { outcome: ProcessingOutcome::Failed, .. }
        ));
    }

    #[tokio::test]
    async fn delivery_failure_surfaces_as_alert() {
        let harness = Harness::new();
        let mut providers = ProviderSet::new();
        providers.register(
            Arc::new(ScriptedProvider::returning(
                r#"{"enhancedText": "Better"}"#,
                Arc::clone(&harness.provider_log),
            )),
            true,
        );
        let orchestrator = ProcessingOrchestrator::new(
            StaticSelection {
                text: "text".to_string(),
                fail_write: true,
                log: Arc::clone(&harness.selection_log),
            },
            StubCapture { fail: false },
            RecordingAlerts {
                log: Arc::clone(&harness.alert_log),
            },
            OpenGate,
            providers,
        );

        let outcome = orchestrator.run(&binding(BindingMode::Rewrite, false)).await;

        assert_eq!(outcome, ProcessingOutcome::Failed);
        let alerts = harness.alerts();
        assert_eq!(alerts[0].1, "Could not deliver the result");
        assert!(alerts[0].2.contains("paste rejected"));
    }
}
