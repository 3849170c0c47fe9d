use crate::conf::types::CachePolicy;
use crate::static_files::ByteRange;
use http::{HeaderMap, HeaderName, HeaderValue, header};

/// Accumulates response headers.
///
/// Values that are not valid header values are dropped (and any earlier value for the same name
/// removed) instead of failing the response.
#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl HeaderBuilder {
    pub(crate) fn insert(&mut self, name: HeaderName, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) if !value.is_empty() => {
                self.headers.insert(name, value);
            }
            _ => {
                self.headers.remove(name);
            }
        }
    }

    pub(crate) fn accept_ranges(&mut self) {
        self.headers
            .insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    }

    pub(crate) fn allow(&mut self, methods: &str) {
        self.insert(header::ALLOW, methods);
    }

    pub(crate) fn content_type(&mut self, media_type: &str) {
        self.insert(header::CONTENT_TYPE, media_type);
    }

    pub(crate) fn content_length(&mut self, len: &str) {
        self.insert(header::CONTENT_LENGTH, len);
    }

    pub(crate) fn content_range(&mut self, range: ByteRange, total: u64) {
        let value = format!("bytes {}-{}/{total}", range.start, range.end);
        self.insert(header::CONTENT_RANGE, &value);
    }

    pub(crate) fn content_encoding(&mut self, coding: &str) {
        self.insert(header::CONTENT_ENCODING, coding);
    }

    pub(crate) fn etag(&mut self, tag: &str) {
        self.insert(header::ETAG, tag);
    }

    pub(crate) fn last_modified(&mut self, date: &str) {
        self.insert(header::LAST_MODIFIED, date);
    }

    pub(crate) fn location(&mut self, uri: &str) {
        self.insert(header::LOCATION, uri);
    }

    pub(crate) fn vary(&mut self) {
        self.headers
            .insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
    }

    /// `public|private, max-age=N[, immutable]`
    pub(crate) fn cache_control(&mut self, policy: &CachePolicy) {
        let visibility = if policy.public { "public" } else { "private" };
        let mut directives = vec![
            visibility.to_string(),
            format!("max-age={}", policy.max_age_seconds),
        ];
        if policy.immutable {
            directives.push("immutable".to_string());
        }

        self.insert(header::CACHE_CONTROL, &directives.join(", "));
    }

    /// Copies configured extra headers; they were validated when the config was loaded.
    pub(crate) fn extend(&mut self, extra: &HeaderMap) {
        for (name, value) in extra {
            self.headers.insert(name.clone(), value.clone());
        }
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
