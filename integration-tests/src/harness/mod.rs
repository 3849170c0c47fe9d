pub mod server;
pub mod site;
pub mod tracing;

pub use server::TestServer;
pub use site::{TestSite, gunzip, unbrotli};
pub use tracing::{CapturedEvent, init_test_tracing};
