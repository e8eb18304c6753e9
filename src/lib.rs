//! # Tabflow — Execution-Context Core of a Browser Workflow Engine
//!
//! `tabflow` holds the per-step context-resolution machinery of a
//! browser-based workflow-automation engine. A running workflow instance
//! executes blocks against one browser tab; this crate decides, for each
//! switch-context block, which browsing context (top window or a specific
//! iframe) subsequent DOM-targeting blocks must address, and bridges that
//! decision across frame boundaries via asynchronous messaging and
//! content-script injection:
//!
//! - **Execution state**: per-run tab/frame/selector addressing with
//!   enforced scoping invariants.
//! - **Context switching**: main-window reset, same-origin selector scoping,
//!   and cross-origin frame entry backed by a frame registry.
//! - **Structured failures**: every failure carries the target selector and
//!   next-block id so the engine can branch without losing its place.
//! - **Cancellation**: a stop signal threaded through probes, injection, and
//!   settle delays.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tabflow::{
//!     Block, BlockExecutor, BlockExecutorRegistry, ExecutionState, FakeBridge, RuntimeContext,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let context = RuntimeContext::new(Arc::new(FakeBridge::new()));
//!     let mut state = ExecutionState::new(42);
//!
//!     let block: Block = serde_json::from_value(serde_json::json!({
//!         "id": "b1",
//!         "type": "switch-to",
//!         "data": { "windowType": "main-window" },
//!         "outputs": {}
//!     }))
//!     .unwrap();
//!
//!     let registry = BlockExecutorRegistry::new();
//!     let executor = registry.get(&block.block_type).unwrap();
//!     let result = executor.execute(&block, &mut state, &context).await.unwrap();
//!     assert_eq!(result.data, serde_json::json!(""));
//! }
//! ```

pub mod blocks;
pub mod browser;
pub mod core;
pub mod error;
pub mod graph;

pub use crate::browser::{
    BridgeCall, BridgeError, BrowserBridge, FakeBridge, FrameId, FrameProbe, TabId, TOP_FRAME_ID,
};
pub use crate::core::{EngineConfig, ExecutionState, RuntimeContext, StopSignal};
pub use crate::error::{BlockError, BlockResult, FailureContext};
pub use crate::graph::{block_connection, Block, BlockOutput, Connection};
pub use crate::blocks::{
    BlockExecutor, BlockExecutorRegistry, BlockRunResult, SwitchToData, SwitchToExecutor,
    WindowType,
};
