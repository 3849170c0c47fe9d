mod dispatch;
mod gateway;
mod mount;
pub mod setup;
mod state;

pub use dispatch::{Dispatched, IncomingRequest, dispatch};
pub use gateway::StaticGateway;
pub use setup::{build_pingora_server, run};
pub use state::{RuntimeState, build_runtime_state};
