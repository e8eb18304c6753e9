use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A single step of a workflow graph.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    /// Block ID (unique within the workflow).
    pub id: String,

    /// Block type (switch-to, event-click, ...).
    #[serde(rename = "type")]
    pub block_type: String,

    /// Type-specific payload, parsed by the block's executor.
    #[serde(default)]
    pub data: Value,

    /// Outgoing connections, keyed by output slot (`output_1`, `output_2`, ...).
    #[serde(default)]
    pub outputs: HashMap<String, BlockOutput>,
}

/// One output slot of a block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockOutput {
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// An edge from a block's output slot to another block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub target_block_id: String,
}
