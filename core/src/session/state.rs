use serde::Serialize;

/// Where the session is in its compile lifecycle.
///
/// `Succeeded` and `Failed` are settled states: like `Idle`, they accept a
/// new attempt. Only `Compiling` turns callers away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Compiling,
    Succeeded,
    Failed,
}

impl SessionState {
    pub fn is_compiling(self) -> bool {
        self == SessionState::Compiling
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Compiling => "compiling",
            SessionState::Succeeded => "succeeded",
            SessionState::Failed => "failed",
        }
    }
}
