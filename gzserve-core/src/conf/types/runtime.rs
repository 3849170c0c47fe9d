use crate::conf::types::{CachePolicySpec, DotfilesPolicy};
use crate::encoding::EncodingRegistry;
use http::HeaderMap;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// Fully resolved configuration. Built once at startup and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub listen: String,
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetsConfig {
    pub root: PathBuf,

    /// Normalized: leading `/`, no trailing `/` unless it is exactly `/`.
    pub mount: String,

    /// In registration order.
    pub encodings: EncodingRegistry,

    /// `None` when directory -> index rewriting is disabled.
    pub index_file: Option<String>,

    pub order_preference: Vec<String>,

    pub serve: ServeOptions,
}

/// Options of the file-serving collaborator; the encoding layer does not read them.
#[derive(Debug, Clone, Serialize)]
pub struct ServeOptions {
    pub dotfiles: DotfilesPolicy,
    pub etag: bool,
    pub last_modified: bool,
    pub redirect_directories: bool,
    pub max_file_size: u64,
    pub small_file_threshold: u64,
    #[serde(serialize_with = "serialize_header_map")]
    pub headers: HeaderMap,
    pub cache_policy: CachePolicy,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            dotfiles: DotfilesPolicy::default(),
            etag: true,
            last_modified: true,
            redirect_directories: true,
            max_file_size: 10 * 1024 * 1024,
            small_file_threshold: 256 * 1024,
            headers: HeaderMap::new(),
            cache_policy: CachePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CachePolicy {
    pub max_age_seconds: u32,
    pub public: bool,
    pub immutable: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicySpec::default().into()
    }
}

impl From<CachePolicySpec> for CachePolicy {
    fn from(spec: CachePolicySpec) -> Self {
        Self {
            max_age_seconds: spec.max_age_seconds,
            public: spec.public,
            immutable: spec.immutable,
        }
    }
}

fn serialize_header_map<S: Serializer>(headers: &HeaderMap, s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or_default())),
    )
}
