use crate::assets::AssetIndex;
use crate::cli::{print_json, print_yaml};
use crate::conf::load_config;
use std::path::Path;

/// Scans the asset root and prints logical path -> encodings, JSON unless `yaml` is set.
pub fn index(path: &Path, yaml: bool) -> anyhow::Result<()> {
    let validated = load_config(path)?;
    let assets = &validated.config.assets;

    let index = AssetIndex::build(&assets.root, &assets.encodings);
    let listing = index.listing();

    if yaml {
        print_yaml(&listing)
    } else {
        print_json(&listing)
    }
}
