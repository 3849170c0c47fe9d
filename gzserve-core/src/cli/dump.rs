use crate::cli::{print_json, print_yaml};
use crate::conf::load_config;
use std::path::Path;

/// Prints the resolved runtime configuration, JSON unless `yaml` is set.
pub fn dump(path: &Path, yaml: bool) -> anyhow::Result<()> {
    let validated = load_config(path)?;

    if yaml {
        print_yaml(&validated.config)
    } else {
        print_json(&validated.config)
    }
}
