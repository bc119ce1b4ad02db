//! Interaction state machine for the drag controller.

use featkit_core::Point;

/// Interaction state, advanced by press/move/release.
///
/// Movement cancels a pending deselect. Geometry edits applied by earlier
/// move steps are never rolled back; releasing mid-drag just completes
/// with whatever the last step produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// No feature under edit.
    Idle,
    /// A feature is selected and showing handles.
    Selected,
    /// A handle drag is in progress.
    Dragging {
        /// Id of the dragged handle.
        handle: u64,
        /// Pointer plane position at the previous step.
        last: Point,
    },
    /// A press that deselects on release unless movement intervenes.
    PendingDeselect,
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Interaction::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(Interaction::Idle.is_idle());
        assert!(!Interaction::Selected.is_idle());
        assert!(Interaction::Dragging {
            handle: 1,
            last: Point::new(0.0, 0.0)
        }
        .is_dragging());
        assert!(!Interaction::PendingDeselect.is_dragging());
    }
}
