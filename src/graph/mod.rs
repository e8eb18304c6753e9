//! Workflow graph representation.
//!
//! Blocks are deserialized from the workflow definition; [`block_connection`]
//! resolves a block's successor from its outgoing connections.

pub mod connection;
pub mod types;

pub use connection::block_connection;
pub use types::{Block, BlockOutput, Connection};
