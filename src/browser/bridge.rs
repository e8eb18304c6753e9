use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Browser tab identifier.
pub type TabId = i64;

/// Browsing-context identifier within a tab. `0` is the top frame.
pub type FrameId = i64;

/// Frame id of the top-level document of a tab.
pub const TOP_FRAME_ID: FrameId = 0;

/// Reply to a frame probe sent to the top frame of a tab: the document URL
/// the probed selector resolved to, and whether that document shares the
/// top frame's security origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameProbe {
    pub url: String,
    #[serde(rename = "isSameOrigin")]
    pub is_same_origin: bool,
}

/// Failures raised by the browser side of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("tab {0} is unreachable")]
    TabUnreachable(TabId),
    #[error("no content script listening in frame {frame_id} of tab {tab_id}")]
    NoReceiver { tab_id: TabId, frame_id: FrameId },
    #[error("content script injection into frame {frame_id} failed: {message}")]
    InjectionFailed { frame_id: FrameId, message: String },
}

/// Seam between the engine core and the browser messaging/scripting
/// primitives. Each running workflow instance talks to one tab through it.
#[async_trait]
pub trait BrowserBridge: Send + Sync {
    /// Return the frame registry for a tab: document URL to frame id for
    /// every nested frame discovered so far. May be empty.
    async fn get_frames(&self, tab_id: TabId) -> Result<HashMap<String, FrameId>, BridgeError>;

    /// Ask the given frame of a tab which document `selector` matches and
    /// whether it is same-origin with the top frame.
    async fn probe_frame(
        &self,
        tab_id: TabId,
        selector: &str,
        frame_id: FrameId,
    ) -> Result<FrameProbe, BridgeError>;

    /// Inject the engine's content script into a frame so it can receive
    /// further commands.
    async fn execute_content_script(
        &self,
        tab_id: TabId,
        frame_id: FrameId,
    ) -> Result<(), BridgeError>;
}
