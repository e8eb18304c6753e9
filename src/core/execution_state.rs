use crate::browser::{FrameId, TabId, TOP_FRAME_ID};

/// Mutable addressing context for one running workflow instance: which tab,
/// which frame, and which selector prefix DOM-targeting blocks must use.
/// Each instance owns an independent copy; nothing is shared across runs.
///
/// At most one of {non-top `frame_id`, `frame_selector`} denotes nested
/// scoping at a time. The three mutators below are the only way to change
/// the addressing fields, and each preserves that invariant:
/// [`reset_to_top`](Self::reset_to_top) clears the selector,
/// [`scope_to_selector`](Self::scope_to_selector) never touches `frame_id`,
/// and [`enter_frame`](Self::enter_frame) never touches the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionState {
    tab_id: TabId,
    frame_id: FrameId,
    frame_selector: Option<String>,
}

impl ExecutionState {
    /// Create the state for a fresh run, addressing the top frame of `tab_id`.
    pub fn new(tab_id: TabId) -> Self {
        Self {
            tab_id,
            frame_id: TOP_FRAME_ID,
            frame_selector: None,
        }
    }

    /// The tab this run executes against. Fixed for the whole run.
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// The currently active browsing context within the tab.
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    /// Selector prefix scoping DOM queries into a same-origin nested
    /// document, if one is active.
    pub fn frame_selector(&self) -> Option<&str> {
        self.frame_selector.as_deref()
    }

    /// Switch back to the main window: top frame, no selector scoping.
    pub fn reset_to_top(&mut self) {
        self.frame_id = TOP_FRAME_ID;
        self.frame_selector = None;
    }

    /// Scope later DOM queries into a same-origin nested document. The
    /// document is reachable from the current frame's DOM, so `frame_id`
    /// stays as it is.
    pub fn scope_to_selector(&mut self, selector: &str) {
        self.frame_selector = Some(selector.to_string());
    }

    /// Switch into a cross-origin frame by id.
    pub fn enter_frame(&mut self, frame_id: FrameId) {
        self.frame_id = frame_id;
    }
}
