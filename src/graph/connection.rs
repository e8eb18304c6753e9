use super::types::Block;

/// Look up the successor block id wired to `output_{index}`. Blocks with a
/// single successor use slot 1.
pub fn block_connection(block: &Block, index: usize) -> Option<String> {
    block
        .outputs
        .get(&format!("output_{index}"))
        .and_then(|output| output.connections.first())
        .map(|connection| connection.target_block_id.clone())
}

impl Block {
    /// The single successor of this block, if one is connected.
    pub fn connection(&self) -> Option<String> {
        block_connection(self, 1)
    }
}
