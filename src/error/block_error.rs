use thiserror::Error;

use crate::browser::BridgeError;

/// Recovery metadata attached to every context-switch failure: the selector
/// the block targeted and the id of the block normal execution would have
/// continued at. Lets the caller branch to an error path without losing its
/// place in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureContext {
    pub selector: String,
    pub next_block_id: Option<String>,
}

/// Errors raised during individual block execution.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The cross-origin target frame's URL was never discovered, so no
    /// frame id exists to switch to. Not retriable here; the caller may
    /// branch to a re-scan step.
    #[error("no iframe id found for selector `{}`", .context.selector)]
    NoIframeId { context: FailureContext },

    /// The probe or injection call failed (tab closed, no listener).
    #[error("messaging failure: {source}")]
    Messaging {
        #[source]
        source: BridgeError,
        context: FailureContext,
    },

    /// The owning workflow was stopped while the switch was in flight.
    #[error("context switch cancelled")]
    Cancelled { context: FailureContext },

    /// The block's `data` payload did not deserialize.
    #[error("invalid block data: {0}")]
    InvalidData(String),
}

impl BlockError {
    /// Stable kind tag, matching the wire-level error names the engine and
    /// UI branch on.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockError::NoIframeId { .. } => "no-iframe-id",
            BlockError::Messaging { .. } => "messaging-failure",
            BlockError::Cancelled { .. } => "cancelled",
            BlockError::InvalidData(_) => "invalid-data",
        }
    }

    /// Recovery metadata, present on every failure raised after the block's
    /// target selector was known.
    pub fn context(&self) -> Option<&FailureContext> {
        match self {
            BlockError::NoIframeId { context }
            | BlockError::Messaging { context, .. }
            | BlockError::Cancelled { context } => Some(context),
            BlockError::InvalidData(_) => None,
        }
    }
}
