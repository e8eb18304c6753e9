/// Cooperative stop signal for a running workflow instance. Cloned into the
/// runtime context so in-flight bridge calls and settle delays can be
/// abandoned when the owning workflow is torn down.
#[derive(Clone)]
pub struct StopSignal {
    token: tokio_util::sync::CancellationToken,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            token: tokio_util::sync::CancellationToken::new(),
        }
    }

    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger() {
        let signal = StopSignal::new();
        assert!(!signal.is_triggered());
        signal.trigger();
        assert!(signal.is_triggered());
    }

    #[test]
    fn test_clones_share_state() {
        let signal = StopSignal::new();
        let clone = signal.clone();
        signal.trigger();
        assert!(clone.is_triggered());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_trigger() {
        let signal = StopSignal::new();
        signal.trigger();
        signal.cancelled().await;
    }
}
