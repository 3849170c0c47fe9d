use crate::encoding::{Encoding, EncodingRegistry};
use ahash::AHashMap;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Encodings with a pre-compressed file for one logical path, in registration order.
pub type AssetEncodings = SmallVec<[Encoding; 4]>;

/// Maps logical request paths (`/css/site.css`) to the encodings that exist on disk for them.
///
/// Built once at startup by [`AssetIndex::build`] and read-only afterwards. Only paths with at
/// least one compressed sibling are present.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    assets: AHashMap<String, AssetEncodings>,
}

impl AssetIndex {
    /// Recursively scans `root` for files ending in a registered suffix.
    ///
    /// A missing root yields an empty index. Entries that cannot be read (permissions, symlink
    /// loops, non UTF-8 names) are skipped.
    pub fn build(root: &Path, registry: &EncodingRegistry) -> Self {
        let mut index = Self::default();

        if registry.is_empty() {
            return index;
        }

        if !root.is_dir() {
            tracing::warn!(
                root = %root.display(),
                "asset root is not a directory, no pre-compressed assets indexed"
            );
            return index;
        }

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable asset entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(request_path) = entry
                .path()
                .strip_prefix(root)
                .ok()
                .and_then(request_path_for)
            else {
                tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 asset path");
                continue;
            };

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };

            if let Some((encoding, stem)) = registry.match_file_name(file_name) {
                let logical_len = request_path.len() - (file_name.len() - stem.len());
                let logical = request_path[..logical_len].to_string();

                tracing::trace!(path = %logical, encoding = encoding.name(), "indexed asset");
                index.insert(logical, encoding.clone());
            }
        }

        for encodings in index.assets.values_mut() {
            encodings.sort_by_key(|e| registry.position(e.name()));
        }

        index
    }

    fn insert(&mut self, logical: String, encoding: Encoding) {
        let encodings = self.assets.entry(logical).or_default();
        if !encodings.contains(&encoding) {
            encodings.push(encoding);
        }
    }

    /// Encodings available for a decoded, index-resolved request path.
    pub fn get(&self, path: &str) -> Option<&[Encoding]> {
        self.assets.get(path).map(|e| e.as_slice())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Sorted view of the index: logical path -> encoding names.
    pub fn listing(&self) -> BTreeMap<&str, Vec<&str>> {
        self.assets
            .iter()
            .map(|(path, encodings)| {
                (
                    path.as_str(),
                    encodings.iter().map(Encoding::name).collect(),
                )
            })
            .collect()
    }
}

/// Turns a path relative to the asset root into a request path (`/a/b.txt`).
fn request_path_for(relative: &Path) -> Option<String> {
    let mut out = String::new();

    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                out.push('/');
                out.push_str(segment.to_str()?);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }

    if out.is_empty() { None } else { Some(out) }
}
