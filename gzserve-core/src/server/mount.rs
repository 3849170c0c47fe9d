#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MountMatch<'a> {
    /// The path below the mount, always starting with `/`.
    Inside(&'a str),
    /// The mount itself without its trailing slash.
    MountRoot,
    Outside,
}

/// Matches a raw request path against a normalized mount (`/` or `/prefix`).
pub(crate) fn match_mount<'a>(mount: &str, path: &'a str) -> MountMatch<'a> {
    if mount == "/" {
        return MountMatch::Inside(path);
    }

    match path.strip_prefix(mount) {
        Some("") => MountMatch::MountRoot,
        Some(rest) if rest.starts_with('/') => MountMatch::Inside(rest),
        _ => MountMatch::Outside,
    }
}
