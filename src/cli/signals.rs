//! Signal handlers for the agent process

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Agent control signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentSignal {
    /// Shut down the agent (SIGINT/SIGTERM)
    Shutdown,
    /// Re-read the config file and re-register hotkeys (SIGHUP)
    ReloadConfig,
}

/// Agent signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and the conventional
/// SIGHUP reload request.
pub struct AgentSignalHandler {
    receiver: mpsc::Receiver<AgentSignal>,
}

impl AgentSignalHandler {
    /// Create a new signal handler and start listening
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        // Setup SIGINT handler (shutdown)
        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            let _ = tx_int.send(AgentSignal::Shutdown).await;
        });

        // Setup SIGTERM handler (shutdown)
        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(AgentSignal::Shutdown).await;
        });

        // Setup SIGHUP handler (config reload); unlike shutdown this one
        // keeps listening for repeat signals
        let tx_hup = tx;
        let mut sighup = signal(SignalKind::hangup())?;
        tokio::spawn(async move {
            loop {
                if sighup.recv().await.is_none() {
                    break;
                }
                eprintln!("{} Received SIGHUP (reload config)", "↻".cyan());
                if tx_hup.send(AgentSignal::ReloadConfig).await.is_err() {
                    break;
                }
            }
        });

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<AgentSignal> {
        self.receiver.recv().await
    }
}
