use std::cell::{Cell, Ref, RefCell, RefMut};

use super::error::SessionError;
use super::panels::{BytecodePanel, Notice, OutputPanels};
use super::state::SessionState;
use crate::bytecode::tokenize_listing;
use crate::diagnostics::{locate, trim_origin};
use crate::markers::{MarkerKind, MarkerRegistry, Position, SourceView};
use crate::options::SessionOptions;
use crate::protocol::{CompileRequest, CompileResponse};
use crate::transport::{CompilerTransport, TransportError};

/// What a successful attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub result: Option<String>,
    pub bytecode: Vec<String>,
}

/// Runs compile attempts against one transport, editor and set of panels.
pub struct CompileSession<T, V: SourceView, P> {
    transport: T,
    view: RefCell<V>,
    panels: RefCell<P>,
    markers: RefCell<MarkerRegistry<V::Marker>>,
    state: Cell<SessionState>,
    options: SessionOptions,
}

impl<T, V, P> CompileSession<T, V, P>
where
    T: CompilerTransport,
    V: SourceView,
    P: OutputPanels,
{
    pub fn new(transport: T, view: V, panels: P, options: SessionOptions) -> Self {
        let markers = MarkerRegistry::new(options.marker_classes.clone());
        Self {
            transport,
            view: RefCell::new(view),
            panels: RefCell::new(panels),
            markers: RefCell::new(markers),
            state: Cell::new(SessionState::Idle),
            options,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    /// Mutable access to the editor, e.g. to load a file into it.
    ///
    /// Do not hold the guard across [`CompileSession::run_compile`].
    pub fn view_mut(&self) -> RefMut<'_, V> {
        self.view.borrow_mut()
    }

    pub fn panels(&self) -> Ref<'_, P> {
        self.panels.borrow()
    }

    /// Highlights currently left in the editor, in creation order.
    pub fn markers(&self) -> Vec<MarkerKind> {
        self.markers.borrow().kinds().collect()
    }

    /// Compiles whatever the editor currently holds.
    pub async fn compile_view(&self) -> Result<CompileOutput, SessionError> {
        let source = self.view.borrow().value();
        self.run_compile(&source).await
    }

    /// Runs one compile attempt for `source`.
    ///
    /// Sends at most one request. Every outcome is rendered before this
    /// returns; the `Err` side only tells the caller which one it was.
    pub async fn run_compile(&self, source: &str) -> Result<CompileOutput, SessionError> {
        if self.state.get().is_compiling() {
            tracing::warn!("compile requested while another attempt is in flight; ignoring");
            return Err(SessionError::Busy);
        }

        let Some(request) = CompileRequest::new(source, self.options.language.as_str()) else {
            self.state.set(SessionState::Idle);
            let err = SessionError::EmptyInput;
            self.panels.borrow_mut().show_diagnostic(&err.to_string());
            return Err(err);
        };

        let _trigger = self.begin_attempt();
        tracing::info!(source_len = request.source().len(), "compile attempt started");

        match self.transport.compile(&request).await {
            Ok(CompileResponse::Success { result, bytecode }) => Ok(self.succeed(result, bytecode)),
            Ok(CompileResponse::Failure { error }) => {
                Err(self.fail_compile(error, trim_origin(source)))
            }
            Err(err) => Err(self.fail_transport(err)),
        }
    }

    /// Moves to `Compiling`: locks the trigger, drops the previous
    /// attempt's markers and shows the pending placeholders.
    fn begin_attempt(&self) -> TriggerGuard<'_, P> {
        self.state.set(SessionState::Compiling);
        let guard = TriggerGuard::acquire(&self.panels, &self.state);
        self.clear_markers();

        let compiling = self.options.placeholders.compiling.as_str();
        let mut panels = self.panels.borrow_mut();
        panels.clear_diagnostic();
        panels.show_result(compiling);
        panels.show_bytecode(BytecodePanel::Placeholder(compiling));
        guard
    }

    fn succeed(&self, result: Option<String>, bytecode: Vec<String>) -> CompileOutput {
        self.state.set(SessionState::Succeeded);
        self.clear_markers();

        {
            let placeholders = &self.options.placeholders;
            let listing = tokenize_listing(&bytecode);
            let mut panels = self.panels.borrow_mut();
            panels.show_result(result.as_deref().unwrap_or(&placeholders.no_output));
            if listing.is_empty() {
                panels.show_bytecode(BytecodePanel::Placeholder(&placeholders.no_bytecode));
            } else {
                panels.show_bytecode(BytecodePanel::Listing(&listing));
            }
            panels.notify(Notice::Success, "Compilation successful");
        }

        tracing::info!(
            has_result = result.is_some(),
            instructions = bytecode.len(),
            "compile attempt succeeded"
        );
        CompileOutput { result, bytecode }
    }

    /// `origin` is where the submitted (trimmed) text starts in the editor;
    /// positions in `message` are relative to it.
    fn fail_compile(&self, message: String, origin: Position) -> SessionError {
        self.state.set(SessionState::Failed);

        let location = locate(&message).map(|location| location.shifted(origin));
        match location {
            Some(location) => {
                let mut view = self.view.borrow_mut();
                let mut markers = self.markers.borrow_mut();
                markers.add_line_highlight(&mut *view, location.line);
                if let Some(column) = location.column {
                    markers.add_point_highlight(&mut *view, location.line, column);
                }
                view.scroll_into_view(location.position());
            }
            None => tracing::debug!(%message, "no source position in compiler error"),
        }

        self.show_failure(&message);
        tracing::info!(?location, "compile attempt rejected by the compiler service");
        SessionError::Compile { message, location }
    }

    fn fail_transport(&self, err: TransportError) -> SessionError {
        self.state.set(SessionState::Failed);
        tracing::warn!(%err, "compile request failed");
        self.show_failure(&format!("{err}\n{}", self.options.remediation_hint));
        SessionError::Transport {
            source: err,
            hint: self.options.remediation_hint.clone(),
        }
    }

    fn show_failure(&self, diagnostic: &str) {
        let failed = self.options.placeholders.failed.as_str();
        let mut panels = self.panels.borrow_mut();
        panels.show_diagnostic(diagnostic);
        panels.show_result(failed);
        panels.show_bytecode(BytecodePanel::Placeholder(failed));
        panels.notify(Notice::Error, "Compilation failed");
    }

    fn clear_markers(&self) {
        let mut view = self.view.borrow_mut();
        self.markers.borrow_mut().clear(&mut *view);
    }
}

/// Holds the trigger disabled for the lifetime of one attempt.
///
/// Dropping it re-enables the trigger and, if the attempt never settled
/// (panic, dropped future), puts the session back to `Idle`.
struct TriggerGuard<'a, P: OutputPanels> {
    panels: &'a RefCell<P>,
    state: &'a Cell<SessionState>,
}

impl<'a, P: OutputPanels> TriggerGuard<'a, P> {
    fn acquire(panels: &'a RefCell<P>, state: &'a Cell<SessionState>) -> Self {
        panels.borrow_mut().set_trigger_enabled(false);
        Self { panels, state }
    }
}

impl<P: OutputPanels> Drop for TriggerGuard<'_, P> {
    fn drop(&mut self) {
        if self.state.get().is_compiling() {
            self.state.set(SessionState::Idle);
        }
        // A panic while the panels were borrowed must not turn into a
        // double panic here.
        if let Ok(mut panels) = self.panels.try_borrow_mut() {
            panels.set_trigger_enabled(true);
        }
    }
}
