//! QuillShift - rewrite selected text anywhere with a global hotkey
//!
//! Select text in any application, press a bound hotkey, and the text is
//! replaced in place with an LLM rewrite. Bindings can also attach a
//! screenshot for visual context, or skip the selection entirely and
//! insert a description of the screen at the cursor.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Bindings, key combos, provider IDs, config, and the
//!   structured-output envelope
//! - **Application**: The processing pipeline, shortcut registry, and
//!   port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (clipboard selection,
//!   screen capture, hotkeys, providers, alerts)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
