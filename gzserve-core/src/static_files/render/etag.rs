use httpdate::parse_http_date;
use std::time::SystemTime;

/// Weak validator built from size and mtime: `W/"<size hex>-<mtime secs hex>"`.
///
/// A compressed sibling has its own size and mtime, so each variant gets a distinct tag.
pub(crate) fn weak_etag(size: u64, modified: Option<SystemTime>) -> String {
    let mtime_secs = modified
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_secs());

    format!("W/\"{size:x}-{mtime_secs:x}\"")
}

/// Weak comparison of `etag` against an `If-None-Match` list.
pub(crate) fn etag_matches(etag: &str, if_none_match: &str) -> bool {
    let if_none_match = if_none_match.trim();
    if if_none_match == "*" {
        return true;
    }

    let opaque = |tag: &str| tag.strip_prefix("W/").unwrap_or(tag).to_string();
    let wanted = opaque(etag);

    if_none_match
        .split(',')
        .map(str::trim)
        .any(|candidate| opaque(candidate) == wanted)
}

/// `true` unless the file is known to be unchanged since `if_modified_since`.
///
/// HTTP dates have one second resolution, so sub-second differences count as unmodified.
pub(crate) fn modified_since(file_modified: Option<SystemTime>, if_modified_since: &str) -> bool {
    let (Some(file_time), Ok(since)) = (file_modified, parse_http_date(if_modified_since)) else {
        return true;
    };

    file_time
        .duration_since(since)
        .is_ok_and(|delta| delta.as_secs() >= 1)
}
