use http::{HeaderMap, header};
use std::fmt;

/// A request path plus its (undecoded) query string.
///
/// The path stays percent-encoded; it is decoded by whoever needs the file system view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub path: String,
    pub query: Option<String>,
}

impl RequestTarget {
    pub fn new(path: impl Into<String>, query: Option<&str>) -> Self {
        Self {
            path: path.into(),
            query: query.map(str::to_owned),
        }
    }

    /// Splits `path?query` on the first `?`.
    pub fn parse(path_and_query: &str) -> Self {
        match path_and_query.split_once('?') {
            Some((path, query)) => Self::new(path, Some(query)),
            None => Self::new(path_and_query, None),
        }
    }

    /// The `?query` part, if any, ready to be appended to a path.
    pub fn search(&self) -> String {
        match &self.query {
            Some(q) => format!("?{q}"),
            None => String::new(),
        }
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.search())
    }
}

/// Conditional request headers for cache validation and range requests.
#[derive(Debug, Default, Clone)]
pub struct ConditionalHeaders {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
}

impl ConditionalHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        };

        Self {
            if_none_match: get(header::IF_NONE_MATCH),
            if_modified_since: get(header::IF_MODIFIED_SINCE),
            range: get(header::RANGE),
        }
    }
}

/// Joins multiple `Accept-Encoding` header lines into one comma-separated value.
pub fn accept_encoding(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
