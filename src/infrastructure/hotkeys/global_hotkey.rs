//! System-wide shortcut adapter using the global-hotkey crate
//!
//! Registrations are process-wide with the OS. Pressed and released
//! events arrive on the crate's global channel, read by the run loop
//! via `GlobalHotKeyEvent::receiver()`.

use std::collections::HashMap;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::GlobalHotKeyManager;

use crate::application::ports::{HotkeyBackend, HotkeyError, HotkeyToken};
use crate::domain::{KeyCode, KeyCombo, Modifier};

/// Hotkey backend using global-hotkey
///
/// Not Send. On macOS the manager must be created and used on the main
/// thread.
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    registered: HashMap<u32, HotKey>,
}

impl GlobalHotkeyBackend {
    /// Create a new backend, connecting to the OS shortcut facility
    pub fn new() -> Result<Self, HotkeyError> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| HotkeyError::BackendUnavailable(e.to_string()))?;

        Ok(Self {
            manager,
            registered: HashMap::new(),
        })
    }
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn register(&mut self, combo: &KeyCombo) -> Result<HotkeyToken, HotkeyError> {
        let modifiers = if combo.modifiers().is_empty() {
            None
        } else {
            Some(to_os_modifiers(combo))
        };
        let hotkey = HotKey::new(modifiers, to_os_code(combo.code()));

        self.manager
            .register(hotkey)
            .map_err(|e| HotkeyError::RegisterFailed {
                combo: combo.to_string(),
                reason: e.to_string(),
            })?;

        self.registered.insert(hotkey.id(), hotkey);
        Ok(HotkeyToken(hotkey.id()))
    }

    fn unregister(&mut self, token: HotkeyToken) -> Result<(), HotkeyError> {
        let hotkey = self.registered.remove(&token.0).ok_or_else(|| {
            HotkeyError::UnregisterFailed(format!("no registration for token {}", token.0))
        })?;

        self.manager
            .unregister(hotkey)
            .map_err(|e| HotkeyError::UnregisterFailed(e.to_string()))?;

        Ok(())
    }
}

impl Drop for GlobalHotkeyBackend {
    fn drop(&mut self) {
        for (_, hotkey) in self.registered.drain() {
            if let Err(e) = self.manager.unregister(hotkey) {
                tracing::error!("Failed to unregister hotkey on shutdown: {}", e);
            }
        }
    }
}

fn to_os_modifiers(combo: &KeyCombo) -> Modifiers {
    let mut result = Modifiers::empty();
    for modifier in combo.modifiers().iter() {
        result |= match modifier {
            Modifier::Control => Modifiers::CONTROL,
            Modifier::Alt => Modifiers::ALT,
            Modifier::Shift => Modifiers::SHIFT,
            Modifier::Super => Modifiers::SUPER,
        };
    }
    result
}

fn to_os_code(code: KeyCode) -> Code {
    match code {
        KeyCode::A => Code::KeyA,
        KeyCode::B => Code::KeyB,
        KeyCode::C => Code::KeyC,
        KeyCode::D => Code::KeyD,
        KeyCode::E => Code::KeyE,
        KeyCode::F => Code::KeyF,
        KeyCode::G => Code::KeyG,
        KeyCode::H => Code::KeyH,
        KeyCode::I => Code::KeyI,
        KeyCode::J => Code::KeyJ,
        KeyCode::K => Code::KeyK,
        KeyCode::L => Code::KeyL,
        KeyCode::M => Code::KeyM,
        KeyCode::N => Code::KeyN,
        KeyCode::O => Code::KeyO,
        KeyCode::P => Code::KeyP,
        KeyCode::Q => Code::KeyQ,
        KeyCode::R => Code::KeyR,
        KeyCode::S => Code::KeyS,
        KeyCode::T => Code::KeyT,
        KeyCode::U => Code::KeyU,
        KeyCode::V => Code::KeyV,
        KeyCode::W => Code::KeyW,
        KeyCode::X => Code::KeyX,
        KeyCode::Y => Code::KeyY,
        KeyCode::Z => Code::KeyZ,
        KeyCode::Digit0 => Code::Digit0,
        KeyCode::Digit1 => Code::Digit1,
        KeyCode::Digit2 => Code::Digit2,
        KeyCode::Digit3 => Code::Digit3,
        KeyCode::Digit4 => Code::Digit4,
        KeyCode::Digit5 => Code::Digit5,
        KeyCode::Digit6 => Code::Digit6,
        KeyCode::Digit7 => Code::Digit7,
        KeyCode::Digit8 => Code::Digit8,
        KeyCode::Digit9 => Code::Digit9,
        KeyCode::F1 => Code::F1,
        KeyCode::F2 => Code::F2,
        KeyCode::F3 => Code::F3,
        KeyCode::F4 => Code::F4,
        KeyCode::F5 => Code::F5,
        KeyCode::F6 => Code::F6,
        KeyCode::F7 => Code::F7,
        KeyCode::F8 => Code::F8,
        KeyCode::F9 => Code::F9,
        KeyCode::F10 => Code::F10,
        KeyCode::F11 => Code::F11,
        KeyCode::F12 => Code::F12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_letter_keys() {
        assert_eq!(to_os_code(KeyCode::A), Code::KeyA);
        assert_eq!(to_os_code(KeyCode::Z), Code::KeyZ);
    }

    #[test]
    fn maps_digit_keys() {
        assert_eq!(to_os_code(KeyCode::Digit0), Code::Digit0);
        assert_eq!(to_os_code(KeyCode::Digit9), Code::Digit9);
    }

    #[test]
    fn maps_function_keys() {
        assert_eq!(to_os_code(KeyCode::F1), Code::F1);
        assert_eq!(to_os_code(KeyCode::F12), Code::F12);
    }

    #[test]
    fn maps_all_modifiers() {
        let combo: KeyCombo = "ctrl+alt+shift+super+e".parse().unwrap();
        let mods = to_os_modifiers(&combo);
        assert!(mods.contains(Modifiers::CONTROL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::SUPER));
    }

    #[test]
    fn partial_modifier_set_leaves_rest_unset() {
        let combo: KeyCombo = "ctrl+shift+e".parse().unwrap();
        let mods = to_os_modifiers(&combo);
        assert!(mods.contains(Modifiers::CONTROL));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SUPER));
    }
}
