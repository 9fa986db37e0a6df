pub mod role;
pub mod types;
pub mod prompt;
pub mod simulator;
pub mod gateway;
pub mod gateway_factory;

pub mod backend;

pub use role::*;
pub use types::*;
pub use prompt::*;
pub use simulator::ResponseSimulator;
pub use gateway::*;
pub use gateway_factory::*;
pub use backend::*;
