use crate::element::ElementId;
use crate::state::InteractionMode;

/// Notifications the session emits after its state changes
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The rendered composite is stale and must be redrawn
    RenderInvalidated,
    /// A destructive edit was appended to history
    Committed { index: usize, len: usize },
    /// Undo or redo moved the history cursor
    HistoryMoved { index: usize },
    ModeChanged {
        old: InteractionMode,
        new: InteractionMode,
    },
    OverlayAdded { id: ElementId },
    OverlaysCleared,
    /// History was rewound to the originally loaded image
    SessionReset,
    Exported { bytes: usize },
}
