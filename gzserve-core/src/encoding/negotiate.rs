use crate::encoding::Encoding;
use std::cmp::Ordering;

/// The `identity` coding: the client asks for the uncompressed representation.
pub const IDENTITY: &str = "identity";

/// Matches any coding not otherwise listed.
pub const WILDCARD: &str = "*";

/// An empty server-side preference list.
pub const NO_PREFERENCE: &[&str] = &[];

/// One comma-separated entry of an `Accept-Encoding` header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedEncoding<'a> {
    pub name: &'a str,
    pub quality: f32,
}

impl AcceptedEncoding<'_> {
    /// `q=0` means "not acceptable".
    pub fn is_refused(&self) -> bool {
        self.quality <= 0.0
    }
}

/// Parses an `Accept-Encoding` header into its entries, in header order.
///
/// Parsing is permissive: whitespace around tokens, `;` and `=` is ignored, empty tokens are
/// skipped, and a missing, malformed or out-of-range `q` value yields quality `1.0`.
pub fn parse_accept_encoding(header: &str) -> Vec<AcceptedEncoding<'_>> {
    header.split(',').filter_map(parse_entry).collect()
}

fn parse_entry(token: &str) -> Option<AcceptedEncoding<'_>> {
    let mut parts = token.split(';');

    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, value)| parse_quality(value))
        .unwrap_or(1.0);

    Some(AcceptedEncoding { name, quality })
}

fn parse_quality(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|q| (0.0..=1.0).contains(q))
}

/// Orders the acceptable codings of a parsed header.
///
/// Refused entries (`q=0`) are dropped. The rest are stable-sorted by descending quality, so
/// entries of equal quality keep the client's order. Preferred names found in the list are then
/// moved to the front, in preference order, ahead of every non-preferred name.
pub fn rank_encodings<'a, P: AsRef<str>>(
    entries: &[AcceptedEncoding<'a>],
    preference: &[P],
) -> Vec<&'a str> {
    let mut acceptable: Vec<&AcceptedEncoding<'a>> =
        entries.iter().filter(|e| !e.is_refused()).collect();

    // `sort_by` is stable.
    acceptable.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));

    let mut ranked: Vec<&'a str> = acceptable.into_iter().map(|e| e.name).collect();

    // Walking the preference list back to front and always inserting at the head leaves the
    // first preferred name first.
    for preferred in preference.iter().rev() {
        let preferred = preferred.as_ref();
        if let Some(idx) = ranked.iter().position(|name| *name == preferred) {
            let name = ranked.remove(idx);
            ranked.insert(0, name);
        }
    }

    ranked
}

/// Picks the encoding to serve for a request.
///
/// `available` lists the encodings with a pre-compressed file for the requested path, in
/// registration order. Returns `None` when the uncompressed representation should be served:
/// no header, nothing available, `identity` ranked ahead of every available coding, or no
/// overlap between what the client accepts and what exists on disk.
///
/// A wildcard resolves to the first available encoding in registration order. Coding names match
/// exactly.
pub fn select_encoding<'a, P: AsRef<str>>(
    accept_encoding: Option<&str>,
    available: &'a [Encoding],
    preference: &[P],
) -> Option<&'a Encoding> {
    let header = accept_encoding.map(str::trim).filter(|h| !h.is_empty())?;

    if available.is_empty() {
        return None;
    }

    let entries = parse_accept_encoding(header);

    for name in rank_encodings(&entries, preference) {
        if name == IDENTITY {
            return None;
        }

        let matched = if name == WILDCARD {
            available.first()
        } else {
            available.iter().find(|e| e.is_named(name))
        };

        if matched.is_some() {
            return matched;
        }
    }

    None
}
