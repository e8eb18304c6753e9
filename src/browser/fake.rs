use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::bridge::{BridgeError, BrowserBridge, FrameId, FrameProbe, TabId};

/// One recorded call made against a [`FakeBridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    GetFrames {
        tab_id: TabId,
    },
    ProbeFrame {
        tab_id: TabId,
        selector: String,
        frame_id: FrameId,
    },
    ExecuteContentScript {
        tab_id: TabId,
        frame_id: FrameId,
    },
}

/// Deterministic [`BrowserBridge`] for testing. Serves a canned frame
/// registry and probe reply, and records every call it receives.
pub struct FakeBridge {
    frames: HashMap<String, FrameId>,
    probe: Result<FrameProbe, BridgeError>,
    injection_error: Option<BridgeError>,
    calls: Mutex<Vec<BridgeCall>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self {
            frames: HashMap::new(),
            probe: Ok(FrameProbe {
                url: String::new(),
                is_same_origin: false,
            }),
            injection_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add an entry to the served frame registry.
    pub fn with_frame(mut self, url: &str, frame_id: FrameId) -> Self {
        self.frames.insert(url.to_string(), frame_id);
        self
    }

    /// Set the reply every probe will receive.
    pub fn with_probe(mut self, probe: FrameProbe) -> Self {
        self.probe = Ok(probe);
        self
    }

    /// Make every probe fail with the given error.
    pub fn with_probe_error(mut self, error: BridgeError) -> Self {
        self.probe = Err(error);
        self
    }

    /// Make every injection attempt fail with the given error.
    pub fn with_injection_error(mut self, error: BridgeError) -> Self {
        self.injection_error = Some(error);
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of content-script injections received so far.
    pub fn injection_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, BridgeCall::ExecuteContentScript { .. }))
            .count()
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for FakeBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserBridge for FakeBridge {
    async fn get_frames(&self, tab_id: TabId) -> Result<HashMap<String, FrameId>, BridgeError> {
        self.record(BridgeCall::GetFrames { tab_id });
        Ok(self.frames.clone())
    }

    async fn probe_frame(
        &self,
        tab_id: TabId,
        selector: &str,
        frame_id: FrameId,
    ) -> Result<FrameProbe, BridgeError> {
        self.record(BridgeCall::ProbeFrame {
            tab_id,
            selector: selector.to_string(),
            frame_id,
        });
        self.probe.clone()
    }

    async fn execute_content_script(
        &self,
        tab_id: TabId,
        frame_id: FrameId,
    ) -> Result<(), BridgeError> {
        self.record(BridgeCall::ExecuteContentScript { tab_id, frame_id });
        match &self.injection_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
