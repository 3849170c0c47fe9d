pub mod assets;
pub mod cli;
pub mod conf;
pub mod encoding;
pub(crate) mod headers;
pub mod intercept;
pub mod logging;
pub mod request;
pub mod server;
pub mod static_files;
