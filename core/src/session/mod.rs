//! The compile session controller.
//!
//! A [`CompileSession`] drives one attempt at a time: it checks the input,
//! locks the trigger, sends a single request through its
//! [`CompilerTransport`](crate::transport::CompilerTransport), and renders
//! whatever comes back into the [`SourceView`](crate::markers::SourceView)
//! and [`OutputPanels`] it was built with.
//!
//! ## Design
//!
//! - All state sits in the session object; front ends own it and lend it
//!   their editor and panels.
//! - Methods take `&self`. Mutable parts live in `Cell`/`RefCell` and no
//!   borrow is held across the network await, so a second trigger arriving
//!   mid-flight sees `Compiling` and is turned away.
//! - The trigger is released by a guard's `Drop`, which covers success,
//!   failure, panics and a dropped future alike.

mod controller;
mod error;
mod panels;
mod state;


pub use controller::{CompileOutput, CompileSession};
pub use error::SessionError;
pub use panels::{BytecodePanel, Notice, OutputPanels};
pub use state::SessionState;

pub mod mock {
    //! Recording output panels for testing.
    //!
    //! Available for integration tests and external test crates.

    use super::{BytecodePanel, Notice, OutputPanels};
    use crate::bytecode::TokenKind;

    /// Owned copy of what the bytecode panel was given.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum BytecodeSnapshot {
        Placeholder(String),
        /// One entry per instruction, each a list of `(kind, text)` pairs.
        Listing(Vec<Vec<(TokenKind, String)>>),
    }

    /// Everything a session did to the panels, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PanelEvent {
        Trigger(bool),
        Result(String),
        Bytecode(BytecodeSnapshot),
        Diagnostic(String),
        ClearDiagnostic,
        Notice(Notice, String),
    }

    /// Panels that only keep a log of calls.
    #[derive(Debug, Default)]
    pub struct RecordingPanels {
        events: Vec<PanelEvent>,
    }

    impl RecordingPanels {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> &[PanelEvent] {
            &self.events
        }

        /// Whether the trigger is currently enabled (it starts enabled).
        pub fn trigger_enabled(&self) -> bool {
            self.events
                .iter()
                .rev()
                .find_map(|event| match event {
                    PanelEvent::Trigger(enabled) => Some(*enabled),
                    _ => None,
                })
                .unwrap_or(true)
        }

        /// Latest text of the result panel.
        pub fn result(&self) -> Option<&str> {
            self.events.iter().rev().find_map(|event| match event {
                PanelEvent::Result(text) => Some(text.as_str()),
                _ => None,
            })
        }

        /// Latest contents of the bytecode panel.
        pub fn bytecode(&self) -> Option<&BytecodeSnapshot> {
            self.events.iter().rev().find_map(|event| match event {
                PanelEvent::Bytecode(snapshot) => Some(snapshot),
                _ => None,
            })
        }

        /// Text currently in the diagnostic panel, if it was not cleared since.
        pub fn diagnostic(&self) -> Option<&str> {
            self.events.iter().rev().find_map(|event| match event {
                PanelEvent::Diagnostic(text) => Some(Some(text.as_str())),
                PanelEvent::ClearDiagnostic => Some(None),
                _ => None,
            })?
        }

        pub fn notices(&self) -> Vec<(Notice, String)> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    PanelEvent::Notice(notice, message) => Some((*notice, message.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    impl OutputPanels for RecordingPanels {
        fn set_trigger_enabled(&mut self, enabled: bool) {
            self.events.push(PanelEvent::Trigger(enabled));
        }

        fn show_result(&mut self, text: &str) {
            self.events.push(PanelEvent::Result(text.to_string()));
        }

        fn show_bytecode(&mut self, panel: BytecodePanel<'_>) {
            let snapshot = match panel {
                BytecodePanel::Placeholder(text) => BytecodeSnapshot::Placeholder(text.to_string()),
                BytecodePanel::Listing(lines) => BytecodeSnapshot::Listing(
                    lines
                        .iter()
                        .map(|line| {
                            line.tokens
                                .iter()
                                .map(|token| (token.kind, token.text.to_string()))
                                .collect()
                        })
                        .collect(),
                ),
            };
            self.events.push(PanelEvent::Bytecode(snapshot));
        }

        fn show_diagnostic(&mut self, text: &str) {
            self.events.push(PanelEvent::Diagnostic(text.to_string()));
        }

        fn clear_diagnostic(&mut self) {
            self.events.push(PanelEvent::ClearDiagnostic);
        }

        fn notify(&mut self, notice: Notice, message: &str) {
            self.events.push(PanelEvent::Notice(notice, message.to_string()));
        }
    }
}
