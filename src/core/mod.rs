//! Per-run execution machinery: addressing state, runtime context, and the
//! stop signal.

pub mod execution_state;
pub mod runtime_context;
pub mod stop_signal;

pub use execution_state::ExecutionState;
pub use runtime_context::{EngineConfig, RuntimeContext};
pub use stop_signal::StopSignal;
