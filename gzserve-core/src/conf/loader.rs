use crate::conf::error::ConfigError;
use crate::conf::lower::{lower_spec, resolve_root};
use crate::conf::types::{ConfigSpec, RuntimeConfig};
use crate::conf::validation::{ValidationReport, validate_spec};
use std::fs;
use std::path::Path;

/// A runtime config together with the (error free) report it passed.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: RuntimeConfig,
    pub report: ValidationReport,
}

pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let spec = load_spec(path)?;
    let base_dir = base_dir_of(path);

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all errors)
    //--------------------------------------------------------------------------
    let root = resolve_root(base_dir, &spec.assets.root);
    let report = validate_spec(&spec, &root);
    if report.has_errors() {
        return Err(ConfigError::Validation { report });
    }

    //--------------------------------------------------------------------------
    // Build runtime config
    //--------------------------------------------------------------------------
    Ok(ValidatedConfig {
        config: resolve_config(spec, base_dir),
        report,
    })
}

pub fn load_spec(path: &Path) -> Result<ConfigSpec, ConfigError> {
    let source = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_spec(&source, path)
}

/// `path` is only used in error messages.
pub fn parse_spec(source: &str, path: &Path) -> Result<ConfigSpec, ConfigError> {
    hcl::from_str(source).map_err(|e| ConfigError::parse(path, e))
}

/// Lowers a spec without validating it. Relative paths are resolved against `base_dir`.
pub fn resolve_config(spec: ConfigSpec, base_dir: &Path) -> RuntimeConfig {
    lower_spec(spec, base_dir)
}

fn base_dir_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
