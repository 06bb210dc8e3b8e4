use super::{Position, SourceView};

/// What a tracked marker highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// The whole line gets a background class.
    Line { line: u32 },
    /// A single character gets a mark.
    Point { line: u32, column: u32 },
}

/// Class names handed to the source view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClasses {
    pub line: String,
    pub point: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            line: "error-line".to_string(),
            point: "error-mark".to_string(),
        }
    }
}

#[derive(Debug)]
struct Tracked<M> {
    kind: MarkerKind,
    handle: M,
}

/// Owns every highlight created for the current attempt.
///
/// Handles go in when a highlight is created and only come out through
/// [`MarkerRegistry::clear`], which hands them back to the view for removal.
/// Duplicates are kept as separate entries.
#[derive(Debug)]
pub struct MarkerRegistry<M> {
    classes: MarkerClasses,
    tracked: Vec<Tracked<M>>,
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self::new(MarkerClasses::default())
    }
}

impl<M> MarkerRegistry<M> {
    pub fn new(classes: MarkerClasses) -> Self {
        Self {
            classes,
            tracked: Vec::new(),
        }
    }

    /// Removes every tracked highlight from `view`. Calling it on an empty
    /// registry does nothing.
    pub fn clear<V: SourceView<Marker = M>>(&mut self, view: &mut V) {
        if self.tracked.is_empty() {
            return;
        }
        tracing::debug!(count = self.tracked.len(), "clearing markers");
        for tracked in self.tracked.drain(..) {
            view.remove_marker(tracked.handle);
        }
    }

    pub fn add_line_highlight<V: SourceView<Marker = M>>(&mut self, view: &mut V, line: u32) {
        let handle = view.add_line_class(line, &self.classes.line);
        self.track(MarkerKind::Line { line }, handle);
    }

    /// Highlights the single character at `line:column`.
    pub fn add_point_highlight<V: SourceView<Marker = M>>(
        &mut self,
        view: &mut V,
        line: u32,
        column: u32,
    ) {
        let from = Position::new(line, column);
        let to = Position::new(line, column.saturating_add(1));
        let handle = view.mark_range(from, to, &self.classes.point);
        self.track(MarkerKind::Point { line, column }, handle);
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// What is currently highlighted, in creation order.
    pub fn kinds(&self) -> impl Iterator<Item = MarkerKind> + '_ {
        self.tracked.iter().map(|tracked| tracked.kind)
    }

    fn track(&mut self, kind: MarkerKind, handle: M) {
        tracing::debug!(?kind, "marker added");
        self.tracked.push(Tracked { kind, handle });
    }
}
