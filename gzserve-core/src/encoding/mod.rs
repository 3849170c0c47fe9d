mod negotiate;
mod registry;

pub use negotiate::*;
pub use registry::*;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A content-coding that has pre-compressed files on disk.
///
/// `name` is matched against `Accept-Encoding` tokens, `suffix` is the file name suffix of the
/// compressed sibling (always starting with `.`, e.g. `index.html` -> `index.html.gz`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Encoding {
    name: Arc<str>,
    suffix: Arc<str>,
}

impl Encoding {
    pub const GZIP: &'static str = "gzip";
    pub const BROTLI: &'static str = "br";

    /// Builds an encoding from its coding name and a file extension.
    ///
    /// The extension is given without the separating dot (`"gz"`); a leading dot is tolerated.
    pub fn new(name: &str, extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        Self {
            name: Arc::from(name),
            suffix: Arc::from(format!(".{extension}")),
        }
    }

    pub fn gzip() -> Self {
        Self::new(Self::GZIP, "gz")
    }

    pub fn brotli() -> Self {
        Self::new(Self::BROTLI, "br")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_named(&self, name: &str) -> bool {
        *self.name == *name
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.suffix)
    }
}
