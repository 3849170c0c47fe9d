use crate::conf::types::{
    AssetsConfig, AssetsSpec, ConfigSpec, CustomCompressionSpec, IndexSpec, RuntimeConfig,
    ServeOptions, ServeSpec, ServerConfig,
};
use crate::encoding::{Encoding, EncodingRegistry};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// Registers custom encodings first (in declaration order), then `br` when enabled, then `gzip`.
///
/// A name that is already registered is skipped, so a custom `gzip` replaces the built-in one.
pub fn build_registry(
    custom_compressions: &[CustomCompressionSpec],
    enable_brotli: bool,
) -> EncodingRegistry {
    let mut registry = EncodingRegistry::new();

    let custom = custom_compressions
        .iter()
        .map(|c| Encoding::new(c.encoding.trim(), c.extension.trim()));

    let builtin = enable_brotli
        .then(Encoding::brotli)
        .into_iter()
        .chain(std::iter::once(Encoding::gzip()));

    for encoding in custom.chain(builtin) {
        let name = encoding.name().to_string();
        if !registry.register(encoding) {
            tracing::debug!(encoding = %name, "encoding already registered, skipping");
        }
    }

    registry
}

pub(crate) fn lower_spec(spec: ConfigSpec, base_dir: &Path) -> RuntimeConfig {
    let ConfigSpec { server, assets } = spec;

    RuntimeConfig {
        server: ServerConfig {
            listen: server.listen.trim().to_string(),
            threads: server.threads,
        },
        assets: lower_assets(assets, base_dir),
    }
}

fn lower_assets(assets: AssetsSpec, base_dir: &Path) -> AssetsConfig {
    AssetsConfig {
        root: resolve_root(base_dir, &assets.root),
        mount: normalize_mount(&assets.mount),
        encodings: build_registry(&assets.custom_compressions, assets.enable_brotli),
        index_file: resolve_index(assets.index.as_ref()),
        order_preference: assets.order_preference,
        serve: lower_serve(assets.serve),
    }
}

fn lower_serve(serve: ServeSpec) -> ServeOptions {
    ServeOptions {
        dotfiles: serve.dotfiles,
        etag: serve.etag,
        last_modified: serve.last_modified,
        redirect_directories: serve.redirect_directories,
        max_file_size: serve.max_file_size,
        small_file_threshold: serve.small_file_threshold,
        headers: build_header_map(&serve.headers),
        cache_policy: serve.cache_policy.into(),
    }
}

/// Relative roots are relative to the directory holding the config file.
pub(crate) fn resolve_root(base_dir: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() {
        root.to_path_buf()
    } else {
        base_dir.join(root)
    }
}

/// Absent or `true` -> `index.html`, `false` -> disabled, a string names the file.
pub(crate) fn resolve_index(index: Option<&IndexSpec>) -> Option<String> {
    match index {
        None | Some(IndexSpec::Enabled(true)) => Some(DEFAULT_INDEX_FILE.to_string()),
        Some(IndexSpec::Enabled(false)) => None,
        Some(IndexSpec::File(name)) => Some(name.trim().to_string()),
    }
}

/// `"static/"` -> `"/static"`, `""` -> `"/"`.
pub(crate) fn normalize_mount(mount: &str) -> String {
    let trimmed = mount.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn build_header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();

    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "skipping invalid extra header"),
        }
    }

    map
}
