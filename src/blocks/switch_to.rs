use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::blocks::executor::{BlockExecutor, BlockRunResult};
use crate::browser::{BridgeError, TOP_FRAME_ID};
use crate::core::{ExecutionState, RuntimeContext, StopSignal};
use crate::error::{BlockError, FailureContext};
use crate::graph::Block;

/// Target context declared by a switch-to block. Any tag other than
/// `main-window` addresses a nested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    MainWindow,
    Iframe,
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Iframe
    }
}

impl<'de> Deserialize<'de> for WindowType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "main-window" => WindowType::MainWindow,
            _ => WindowType::Iframe,
        })
    }
}

/// Payload of a switch-to block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchToData {
    #[serde(default)]
    pub window_type: WindowType,
    #[serde(default)]
    pub selector: String,
}

/// Failure inside the frame-switch path, before recovery metadata is
/// attached. Collapsed into a [`BlockError`] at the single exit point so
/// every failure carries the same shape.
enum FrameSwitchFailure {
    Bridge(BridgeError),
    NotDiscovered,
    Stopped,
}

/// Executor for switch-to blocks: decides which browsing context later
/// DOM-targeting blocks run in and applies it to the run's state.
pub struct SwitchToExecutor;

#[async_trait]
impl BlockExecutor for SwitchToExecutor {
    async fn execute(
        &self,
        block: &Block,
        state: &mut ExecutionState,
        context: &RuntimeContext,
    ) -> Result<BlockRunResult, BlockError> {
        // Resolved up front so both success and failure results can carry it.
        let next_block_id = block.connection();

        let data: SwitchToData = serde_json::from_value(block.data.clone())
            .map_err(|e| BlockError::InvalidData(e.to_string()))?;

        if data.window_type == WindowType::MainWindow {
            state.reset_to_top();
            return Ok(BlockRunResult {
                data: Value::String(String::new()),
                next_block_id,
            });
        }

        let failure_context = FailureContext {
            selector: data.selector.clone(),
            next_block_id: next_block_id.clone(),
        };
        match switch_into_frame(&data, state, context).await {
            Ok(payload) => Ok(BlockRunResult {
                data: payload,
                next_block_id,
            }),
            Err(FrameSwitchFailure::NotDiscovered) => Err(BlockError::NoIframeId {
                context: failure_context,
            }),
            Err(FrameSwitchFailure::Bridge(source)) => Err(BlockError::Messaging {
                source,
                context: failure_context,
            }),
            Err(FrameSwitchFailure::Stopped) => Err(BlockError::Cancelled {
                context: failure_context,
            }),
        }
    }
}

/// Resolve and apply a switch into a nested frame. Returns the payload
/// describing what changed: the selector for a same-origin document, or the
/// new frame id for a cross-origin one.
async fn switch_into_frame(
    data: &SwitchToData,
    state: &mut ExecutionState,
    context: &RuntimeContext,
) -> Result<Value, FrameSwitchFailure> {
    let tab_id = state.tab_id();
    let stop = &context.stop;

    let frames = race(stop, context.bridge.get_frames(tab_id)).await?;
    let probe = race(
        stop,
        context.bridge.probe_frame(tab_id, &data.selector, TOP_FRAME_ID),
    )
    .await?;

    // Same-origin documents stay reachable from the top frame's DOM, so a
    // selector prefix is enough; no frame switch needed.
    if probe.is_same_origin {
        state.scope_to_selector(&data.selector);
        return Ok(Value::String(data.selector.clone()));
    }

    match frames.get(&probe.url).copied() {
        Some(frame_id) => {
            state.enter_frame(frame_id);
            tracing::debug!(frame_id, url = %probe.url, "switching into cross-origin frame");
            race(stop, context.bridge.execute_content_script(tab_id, frame_id)).await?;

            // The injected script needs time to initialize before it can
            // receive commands; injection completion alone does not cover it.
            tokio::select! {
                biased;
                _ = stop.cancelled() => return Err(FrameSwitchFailure::Stopped),
                _ = tokio::time::sleep(context.config.injection_settle()) => {}
            }

            Ok(Value::from(frame_id))
        }
        None => {
            tracing::warn!(selector = %data.selector, url = %probe.url, "target frame not in registry");
            Err(FrameSwitchFailure::NotDiscovered)
        }
    }
}

/// Race a bridge call against the run's stop signal. A triggered signal
/// always wins over a ready call.
async fn race<T>(
    stop: &StopSignal,
    call: impl Future<Output = Result<T, BridgeError>>,
) -> Result<T, FrameSwitchFailure> {
    tokio::select! {
        biased;
        _ = stop.cancelled() => Err(FrameSwitchFailure::Stopped),
        result = call => result.map_err(FrameSwitchFailure::Bridge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BridgeCall, FakeBridge, FrameProbe};
    use crate::core::EngineConfig;
    use serde_json::json;
    use std::sync::Arc;

    const FRAME_URL: &str = "https://ads.example/frame.html";

    fn switch_block(data: serde_json::Value) -> Block {
        serde_json::from_value(json!({
            "id": "b1",
            "type": "switch-to",
            "data": data,
            "outputs": {
                "output_1": { "connections": [{ "targetBlockId": "b2" }] }
            }
        }))
        .unwrap()
    }

    fn cross_origin_probe() -> FrameProbe {
        FrameProbe {
            url: FRAME_URL.to_string(),
            is_same_origin: false,
        }
    }

    fn context_with(bridge: Arc<FakeBridge>) -> RuntimeContext {
        RuntimeContext::new(bridge).with_config(EngineConfig {
            injection_settle_ms: 0,
        })
    }

    #[tokio::test]
    async fn test_main_window_resets_state_without_bridge_calls() {
        let bridge = Arc::new(FakeBridge::new());
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);
        state.enter_frame(5);

        let block = switch_block(json!({ "windowType": "main-window" }));
        let result = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert_eq!(result.data, json!(""));
        assert_eq!(result.next_block_id, Some("b2".to_string()));
        assert_eq!(state.frame_id(), TOP_FRAME_ID);
        assert!(state.frame_selector().is_none());
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_main_window_clears_selector_scoping() {
        let bridge = Arc::new(FakeBridge::new());
        let context = context_with(bridge);
        let mut state = ExecutionState::new(42);
        state.scope_to_selector("#old");

        let block = switch_block(json!({ "windowType": "main-window" }));
        SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert!(state.frame_selector().is_none());
    }

    #[tokio::test]
    async fn test_main_window_idempotent() {
        let bridge = Arc::new(FakeBridge::new());
        let context = context_with(bridge);
        let mut state = ExecutionState::new(42);
        let block = switch_block(json!({ "windowType": "main-window" }));

        SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();
        let after_first = state.clone();
        SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert_eq!(state, after_first);
    }

    #[tokio::test]
    async fn test_same_origin_scopes_selector_without_frame_switch() {
        let bridge = Arc::new(FakeBridge::new().with_probe(FrameProbe {
            url: "https://shop.example/embed.html".to_string(),
            is_same_origin: true,
        }));
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "windowType": "iframe", "selector": "#checkout" }));
        let result = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert_eq!(result.data, json!("#checkout"));
        assert_eq!(result.next_block_id, Some("b2".to_string()));
        assert_eq!(state.frame_selector(), Some("#checkout"));
        assert_eq!(state.frame_id(), TOP_FRAME_ID);
        assert_eq!(bridge.injection_count(), 0);
    }

    #[tokio::test]
    async fn test_probe_targets_top_frame() {
        let bridge = Arc::new(
            FakeBridge::new()
                .with_frame(FRAME_URL, 7)
                .with_probe(cross_origin_probe()),
        );
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "selector": "#checkout" }));
        SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert!(bridge.calls().contains(&BridgeCall::ProbeFrame {
            tab_id: 42,
            selector: "#checkout".to_string(),
            frame_id: TOP_FRAME_ID,
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cross_origin_enters_frame_after_settle_delay() {
        let bridge = Arc::new(
            FakeBridge::new()
                .with_frame(FRAME_URL, 7)
                .with_probe(cross_origin_probe()),
        );
        // Default config: 1000 ms settle delay.
        let context = RuntimeContext::new(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "windowType": "iframe", "selector": "#checkout" }));
        let started = tokio::time::Instant::now();
        let result = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert!(started.elapsed() >= std::time::Duration::from_millis(1000));
        assert_eq!(result.data, json!(7));
        assert_eq!(state.frame_id(), 7);
        assert!(state.frame_selector().is_none());
        assert_eq!(bridge.injection_count(), 1);
        assert!(bridge.calls().contains(&BridgeCall::ExecuteContentScript {
            tab_id: 42,
            frame_id: 7,
        }));
    }

    #[tokio::test]
    async fn test_undiscovered_frame_fails_with_no_iframe_id() {
        let bridge = Arc::new(FakeBridge::new().with_probe(cross_origin_probe()));
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "selector": "#checkout" }));
        let err = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "no-iframe-id");
        assert_eq!(
            err.context(),
            Some(&FailureContext {
                selector: "#checkout".to_string(),
                next_block_id: Some("b2".to_string()),
            })
        );
        assert_eq!(bridge.injection_count(), 0);
        assert_eq!(state.frame_id(), TOP_FRAME_ID);
    }

    #[tokio::test]
    async fn test_probe_failure_propagates_with_metadata() {
        let bridge =
            Arc::new(FakeBridge::new().with_probe_error(BridgeError::TabUnreachable(42)));
        let context = context_with(bridge);
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "selector": "#checkout" }));
        let err = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap_err();

        match &err {
            BlockError::Messaging { source, context } => {
                assert_eq!(source, &BridgeError::TabUnreachable(42));
                assert_eq!(context.selector, "#checkout");
                assert_eq!(context.next_block_id, Some("b2".to_string()));
            }
            other => panic!("expected messaging failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_injection_failure_propagates_with_metadata() {
        let bridge = Arc::new(
            FakeBridge::new()
                .with_frame(FRAME_URL, 7)
                .with_probe(cross_origin_probe())
                .with_injection_error(BridgeError::InjectionFailed {
                    frame_id: 7,
                    message: "frame was removed".to_string(),
                }),
        );
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "selector": "#checkout" }));
        let err = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "messaging-failure");
        assert_eq!(err.context().unwrap().selector, "#checkout");
        assert_eq!(bridge.injection_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_data_fails_without_bridge_calls() {
        let bridge = Arc::new(FakeBridge::new());
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "windowType": 5 }));
        let err = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "invalid-data");
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_window_type_takes_iframe_path() {
        let bridge = Arc::new(FakeBridge::new().with_probe(FrameProbe {
            url: "https://shop.example/embed.html".to_string(),
            is_same_origin: true,
        }));
        let context = context_with(bridge.clone());
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "windowType": "popup", "selector": "#checkout" }));
        SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap();

        assert!(!bridge.calls().is_empty());
        assert_eq!(state.frame_selector(), Some("#checkout"));
    }

    #[tokio::test]
    async fn test_stop_before_switch_cancels() {
        let bridge = Arc::new(FakeBridge::new().with_probe(cross_origin_probe()));
        let stop = StopSignal::new();
        stop.trigger();
        let context = context_with(bridge).with_stop(stop);
        let mut state = ExecutionState::new(42);

        let block = switch_block(json!({ "selector": "#checkout" }));
        let err = SwitchToExecutor
            .execute(&block, &mut state, &context)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "cancelled");
        assert_eq!(err.context().unwrap().selector, "#checkout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_settle_delay_cancels() {
        let bridge = Arc::new(
            FakeBridge::new()
                .with_frame(FRAME_URL, 7)
                .with_probe(cross_origin_probe()),
        );
        let stop = StopSignal::new();
        let context = RuntimeContext::new(bridge.clone()).with_stop(stop.clone());
        let block = switch_block(json!({ "selector": "#checkout" }));

        let handle = tokio::spawn(async move {
            let mut state = ExecutionState::new(42);
            SwitchToExecutor.execute(&block, &mut state, &context).await
        });

        while bridge.injection_count() == 0 {
            tokio::task::yield_now().await;
        }
        stop.trigger();

        let err = handle.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), "cancelled");
    }
}
