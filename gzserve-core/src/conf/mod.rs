mod error;
mod loader;
mod lower;
#[cfg(test)]
mod tests;
pub mod types;
pub mod validation;

pub use error::ConfigError;
pub use loader::{ValidatedConfig, load_config, load_spec, parse_spec, resolve_config};
pub use lower::{DEFAULT_INDEX_FILE, build_registry};
pub use types::RuntimeConfig;
