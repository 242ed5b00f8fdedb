//! Shortcut registry: owns live hotkey registrations across config reloads

use std::collections::HashSet;

use tracing::{info, warn};

use crate::domain::{Binding, KeyCombo};

use super::ports::{HotkeyBackend, HotkeyError, HotkeyToken};

struct ActiveBinding {
    token: HotkeyToken,
    binding: Binding,
}

/// What one reload pass did
#[derive(Debug, Clone, Default)]
pub struct ReloadSummary {
    pub registered: usize,
    /// Binding IDs skipped because an earlier binding claimed the same combo
    pub skipped_duplicates: Vec<String>,
    /// Binding IDs whose registration the OS rejected
    pub failed: Vec<(String, HotkeyError)>,
}

impl ReloadSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped_duplicates.is_empty() && self.failed.is_empty()
    }
}

/// Maps fired hotkey tokens back to the bindings of the current generation.
///
/// `reload` is the only mutator. It tears down every active registration
/// before rebuilding, so a config edit never leaves stale hotkeys behind;
/// tokens from the previous generation stop resolving.
pub struct ShortcutRegistry<B: HotkeyBackend> {
    backend: B,
    active: Vec<ActiveBinding>,
}

impl<B: HotkeyBackend> ShortcutRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: Vec::new(),
        }
    }

    /// Replace all registrations with the given bindings, in declaration
    /// order.
    ///
    /// A combination already claimed earlier in the same pass is skipped
    /// with a warning; the first declaration wins. A registration the OS
    /// rejects likewise skips that one binding and continues.
    pub fn reload(&mut self, bindings: &[Binding]) -> ReloadSummary {
        self.unregister_all();

        let mut summary = ReloadSummary::default();
        let mut claimed: HashSet<KeyCombo> = HashSet::new();

        for binding in bindings {
            if !claimed.insert(binding.combo) {
                warn!(
                    binding = %binding.id,
                    combo = %binding.combo,
                    "duplicate key combination, keeping the first declaration"
                );
                summary.skipped_duplicates.push(binding.id.clone());
                continue;
            }

            match self.backend.register(&binding.combo) {
                Ok(token) => {
                    info!(binding = %binding.id, combo = %binding.combo, "registered hotkey");
                    self.active.push(ActiveBinding {
                        token,
                        binding: binding.clone(),
                    });
                    summary.registered += 1;
                }
                Err(err) => {
                    warn!(
                        binding = %binding.id,
                        combo = %binding.combo,
                        error = %err,
                        "hotkey registration failed, skipping binding"
                    );
                    summary.failed.push((binding.id.clone(), err));
                }
            }
        }

        summary
    }

    /// Look up the binding behind a fired token. Tokens from a previous
    /// generation return None and their events are dropped.
    pub fn resolve(&self, token: HotkeyToken) -> Option<&Binding> {
        self.active
            .iter()
            .find(|active| active.token == token)
            .map(|active| &active.binding)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn unregister_all(&mut self) {
        for active in self.active.drain(..) {
            if let Err(err) = self.backend.unregister(active.token) {
                warn!(binding = %active.binding.id, error = %err, "failed to unregister hotkey");
            }
        }
    }
}
