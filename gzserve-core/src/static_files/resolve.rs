use crate::conf::types::DotfilesPolicy;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResolveError {
    NotFound,
    Forbidden,
    BadPath,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResolvedStatic {
    File(PathBuf),
    Directory(PathBuf),
}

/// Maps a percent-encoded, mount-relative request path onto a file under `root`.
pub(crate) fn resolve_static_path(
    root: &Path,
    request_path: &str,
    dotfiles: DotfilesPolicy,
) -> Result<ResolvedStatic, ResolveError> {
    if !request_path.starts_with('/') {
        return Err(ResolveError::BadPath);
    }

    // Decoded exactly once; `%252e` stays a literal `%2e` segment.
    let decoded = percent_encoding::percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ResolveError::BadPath)?;

    if decoded.contains('\0') {
        return Err(ResolveError::BadPath);
    }

    let relative_path = PathBuf::from(decoded.trim_start_matches('/'));

    for component in relative_path.components() {
        let segment = match component {
            Component::Normal(segment) => segment,
            Component::CurDir => continue,
            // `..`, a root or a prefix
            _ => return Err(ResolveError::Forbidden),
        };

        let hidden = segment.to_str().is_some_and(|s| s.starts_with('.'));
        match dotfiles {
            _ if !hidden => {}
            DotfilesPolicy::Allow => {}
            DotfilesPolicy::Deny => return Err(ResolveError::Forbidden),
            DotfilesPolicy::Ignore => return Err(ResolveError::NotFound),
        }
    }

    let root_canon = root.canonicalize().map_err(|_| ResolveError::NotFound)?;
    let resolved = root
        .join(&relative_path)
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;

    // Symlinks may point anywhere.
    if !resolved.starts_with(&root_canon) {
        return Err(ResolveError::Forbidden);
    }

    match resolved.metadata() {
        Ok(meta) if meta.is_dir() => Ok(ResolvedStatic::Directory(resolved)),
        Ok(meta) if meta.is_file() => Ok(ResolvedStatic::File(resolved)),
        _ => Err(ResolveError::NotFound),
    }
}
