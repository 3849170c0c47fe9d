use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level shape of `gzserve.hcl`, as written by the operator.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigSpec {
    #[serde(default)]
    pub server: ServerSpec,
    pub assets: AssetsSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSpec {
    /// e.g. "0.0.0.0:8080"
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Overrides pingora's worker thread count.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl Default for ServerSpec {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            threads: None,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsSpec {
    /// Directory holding the originals and their pre-compressed siblings.
    pub root: PathBuf,

    /// URL prefix the assets are served under.
    #[serde(default = "default_mount")]
    pub mount: String,

    /// Registers `br` / `.br`. Gzip is always registered.
    #[serde(default)]
    pub enable_brotli: bool,

    /// `false` disables directory -> index file rewriting, a string names the index file.
    #[serde(default)]
    pub index: Option<IndexSpec>,

    /// Encodings the server prefers over the client's order.
    #[serde(default)]
    pub order_preference: Vec<String>,

    /// Registered ahead of the built-in encodings.
    #[serde(default)]
    pub custom_compressions: Vec<CustomCompressionSpec>,

    /// Forwarded to the file server.
    #[serde(default)]
    pub serve: ServeSpec,
}

impl Default for AssetsSpec {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            mount: default_mount(),
            enable_brotli: false,
            index: None,
            order_preference: Vec::new(),
            custom_compressions: Vec::new(),
            serve: ServeSpec::default(),
        }
    }
}

fn default_mount() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IndexSpec {
    Enabled(bool),
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomCompressionSpec {
    /// Matched against `Accept-Encoding` tokens.
    pub encoding: String,

    /// File extension of the compressed sibling, without the dot.
    pub extension: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DotfilesPolicy {
    Allow,
    Deny,
    #[default]
    Ignore,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServeSpec {
    pub dotfiles: DotfilesPolicy,
    pub etag: bool,
    pub last_modified: bool,
    pub redirect_directories: bool,
    pub max_file_size: u64,
    pub small_file_threshold: u64,
    pub headers: BTreeMap<String, String>,
    pub cache_policy: CachePolicySpec,
}

impl Default for ServeSpec {
    fn default() -> Self {
        Self {
            dotfiles: DotfilesPolicy::default(),
            etag: true,
            last_modified: true,
            redirect_directories: true,
            max_file_size: 10 * 1024 * 1024,  // 10 MiB
            small_file_threshold: 256 * 1024, // 256 KiB
            headers: BTreeMap::new(),
            cache_policy: CachePolicySpec::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CachePolicySpec {
    pub max_age_seconds: u32,
    pub public: bool,
    pub immutable: bool,
}

impl Default for CachePolicySpec {
    fn default() -> Self {
        Self {
            max_age_seconds: 0,
            public: true,
            immutable: false,
        }
    }
}
