//! Bridge between the engine core and the host browser: frame discovery,
//! frame probing, and content-script injection.

pub mod bridge;
pub mod fake;

pub use bridge::{BridgeError, BrowserBridge, FrameId, FrameProbe, TabId, TOP_FRAME_ID};
pub use fake::{BridgeCall, FakeBridge};
