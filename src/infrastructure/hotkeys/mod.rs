//! Global hotkey implementations

mod global_hotkey;

pub use global_hotkey::GlobalHotkeyBackend;
