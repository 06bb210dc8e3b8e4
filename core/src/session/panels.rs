use serde::Serialize;

use crate::bytecode::BytecodeLine;

/// Contents for the bytecode panel.
#[derive(Debug, Clone, Copy)]
pub enum BytecodePanel<'a> {
    /// A fixed message instead of a listing.
    Placeholder(&'a str),
    /// The tokenized listing, one entry per instruction.
    Listing(&'a [BytecodeLine<'a>]),
}

/// Kind of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Success,
    Error,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Notice::Success => "success",
            Notice::Error => "error",
        }
    }
}

/// The output side of a control surface: the compile trigger, the three
/// panels and the notification area.
pub trait OutputPanels {
    /// Enables or disables the compile trigger (button, shortcut).
    fn set_trigger_enabled(&mut self, enabled: bool);

    fn show_result(&mut self, text: &str);

    fn show_bytecode(&mut self, panel: BytecodePanel<'_>);

    /// Shows an error message in the diagnostic panel.
    fn show_diagnostic(&mut self, text: &str);

    fn clear_diagnostic(&mut self);

    fn notify(&mut self, notice: Notice, message: &str);
}
