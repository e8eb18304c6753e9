use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{ExecutionState, RuntimeContext};
use crate::error::BlockError;
use crate::graph::Block;

/// Outcome of one block execution: a payload describing what happened and
/// the id of the block the engine should continue at.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRunResult {
    pub data: Value,
    pub next_block_id: Option<String>,
}

/// Trait for block execution. Each block type implements this.
#[async_trait]
pub trait BlockExecutor: Send + Sync {
    /// Execute the block against the run's mutable state, returning a
    /// BlockRunResult.
    async fn execute(
        &self,
        block: &Block,
        state: &mut ExecutionState,
        context: &RuntimeContext,
    ) -> Result<BlockRunResult, BlockError>;
}

/// Registry of block executors by block type string.
pub struct BlockExecutorRegistry {
    executors: HashMap<String, Box<dyn BlockExecutor>>,
}

impl BlockExecutorRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("switch-to", Box::new(super::switch_to::SwitchToExecutor));
        registry
    }

    pub fn empty() -> Self {
        BlockExecutorRegistry {
            executors: HashMap::new(),
        }
    }

    pub fn register(&mut self, block_type: &str, executor: Box<dyn BlockExecutor>) {
        self.executors.insert(block_type.to_string(), executor);
    }

    pub fn get(&self, block_type: &str) -> Option<&dyn BlockExecutor> {
        self.executors.get(block_type).map(|e| e.as_ref())
    }
}

impl Default for BlockExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
