//! # Drag-and-drop context
//!
//! A minimal pointer-event drag engine behind a small capability surface:
//! cards call [`DragState::begin`] on drag start, columns mark themselves
//! hovered while a card is over them, and the drop handler takes the active
//! id with [`DragState::take_active`]. Only one drag can be active at a
//! time; a second `begin` while one is in flight is ignored.
//!
//! The state lives in a `Signal` provided by the board view, so cards and
//! columns can be separate components without prop-drilling the session.

use dioxus::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    active: Option<String>,
    hover: Option<String>,
}

impl DragState {
    /// Start dragging `id`. No-op while another drag is active.
    pub fn begin(&mut self, id: &str) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(id.to_string());
        true
    }

    /// The id being dragged, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Clear the session and return what was being dragged.
    pub fn take_active(&mut self) -> Option<String> {
        self.hover = None;
        self.active.take()
    }

    pub fn set_hover(&mut self, target: &str) {
        self.hover = Some(target.to_string());
    }

    pub fn clear_hover(&mut self, target: &str) {
        if self.hover.as_deref() == Some(target) {
            self.hover = None;
        }
    }

    pub fn is_hovered(&self, target: &str) -> bool {
        self.hover.as_deref() == Some(target)
    }
}

/// Provide a fresh drag context for a board. Call once in the board view.
pub fn provide_drag_context() -> Signal<DragState> {
    use_context_provider(|| Signal::new(DragState::default()))
}

/// Consume the drag context inside cards and columns.
pub fn use_drag() -> Signal<DragState> {
    use_context::<Signal<DragState>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_drag_at_a_time() {
        let mut drag = DragState::default();
        assert!(drag.begin("a"));
        assert!(!drag.begin("b"));
        assert_eq!(drag.active(), Some("a"));
        assert!(drag.is_dragging("a"));
        assert!(!drag.is_dragging("b"));
    }

    #[test]
    fn take_active_clears_the_session_unconditionally() {
        let mut drag = DragState::default();
        drag.begin("a");
        drag.set_hover("Ganho");
        assert_eq!(drag.take_active(), Some("a".to_string()));
        assert_eq!(drag.active(), None);
        assert!(!drag.is_hovered("Ganho"));
        // A new drag can start afterwards.
        assert!(drag.begin("b"));
    }

    #[test]
    fn hover_only_clears_for_the_matching_target() {
        let mut drag = DragState::default();
        drag.set_hover("Novo");
        drag.clear_hover("Ganho");
        assert!(drag.is_hovered("Novo"));
        drag.clear_hover("Novo");
        assert!(!drag.is_hovered("Novo"));
    }
}
