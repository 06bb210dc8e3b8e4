//! Highlights left in the source view by a failed compile attempt.
//!
//! The editor itself is a capability provided by the front end through
//! [`SourceView`]. The [`MarkerRegistry`] is the only owner of the handles the
//! view hands out, which is what lets it promise that no highlight survives
//! into the next attempt.

mod registry;

pub use registry::{MarkerClasses, MarkerKind, MarkerRegistry};

use serde::Serialize;

/// A 0-based line/column pair in the source view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The editing surface the session reads source from and annotates.
///
/// Modeled on what a browser code editor offers: whole-line background
/// classes, ranged marks that come back as removable handles, and scrolling.
pub trait SourceView {
    /// Handle for one annotation. Moved into [`SourceView::remove_marker`]
    /// to release it.
    type Marker;

    /// Current editor contents.
    fn value(&self) -> String;

    /// Replaces the editor contents.
    fn set_value(&mut self, text: &str);

    /// Adds a background class to a whole line.
    fn add_line_class(&mut self, line: u32, class: &str) -> Self::Marker;

    /// Marks the range `from..to` with a class.
    fn mark_range(&mut self, from: Position, to: Position, class: &str) -> Self::Marker;

    /// Removes an annotation previously returned by this view.
    fn remove_marker(&mut self, marker: Self::Marker);

    fn scroll_into_view(&mut self, position: Position);
}

pub mod mock {
    //! In-memory source view for tests.
    //!
    //! Available for integration tests and external test crates.

    use super::{Position, SourceView};

    /// An annotation currently shown by a [`RecordingView`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LiveMark {
        Line { line: u32, class: String },
        Range { from: Position, to: Position, class: String },
    }

    /// Source view that keeps its annotations in a list.
    #[derive(Debug, Default)]
    pub struct RecordingView {
        text: String,
        next_id: u64,
        live: Vec<(u64, LiveMark)>,
        scrolled_to: Vec<Position>,
        removed: usize,
    }

    impl RecordingView {
        pub fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                ..Default::default()
            }
        }

        /// Annotations that have been added and not yet removed.
        pub fn live_marks(&self) -> Vec<LiveMark> {
            self.live.iter().map(|(_, mark)| mark.clone()).collect()
        }

        /// Every position the view was asked to scroll to, oldest first.
        pub fn scrolled_to(&self) -> &[Position] {
            &self.scrolled_to
        }

        /// How many annotations have been removed so far.
        pub fn removed(&self) -> usize {
            self.removed
        }

        fn track(&mut self, mark: LiveMark) -> u64 {
            let id = self.next_id;
            self.next_id += 1;
            self.live.push((id, mark));
            id
        }
    }

    impl SourceView for RecordingView {
        type Marker = u64;

        fn value(&self) -> String {
            self.text.clone()
        }

        fn set_value(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn add_line_class(&mut self, line: u32, class: &str) -> u64 {
            self.track(LiveMark::Line {
                line,
                class: class.to_string(),
            })
        }

        fn mark_range(&mut self, from: Position, to: Position, class: &str) -> u64 {
            self.track(LiveMark::Range {
                from,
                to,
                class: class.to_string(),
            })
        }

        fn remove_marker(&mut self, marker: u64) {
            let before = self.live.len();
            self.live.retain(|(id, _)| *id != marker);
            self.removed += before - self.live.len();
        }

        fn scroll_into_view(&mut self, position: Position) {
            self.scrolled_to.push(position);
        }
    }
}
