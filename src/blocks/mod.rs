pub mod executor;
pub mod switch_to;

pub use executor::*;
pub use switch_to::{SwitchToData, SwitchToExecutor, WindowType};
