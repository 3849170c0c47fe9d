use crate::encoding::Encoding;
use crate::request::RequestTarget;
use http::{HeaderMap, StatusCode, header};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterceptError {
    /// Invalid percent-escape, or an escape sequence that does not decode to UTF-8.
    #[error("URI malformed")]
    MalformedPath,
}

impl InterceptError {
    pub fn status(&self) -> StatusCode {
        match self {
            InterceptError::MalformedPath => StatusCode::BAD_REQUEST,
        }
    }
}

/// What the interceptor wants done before the file server runs.
#[derive(Debug, Clone)]
pub struct RewriteDecision {
    /// Target to hand to the file server: index-resolved, plus the winning suffix on a rewrite.
    pub target: RequestTarget,

    /// The negotiated encoding, `None` when the request passes through.
    pub encoding: Option<Encoding>,

    /// `Vary`, and on a rewrite `Content-Encoding` and `Content-Type`.
    pub headers: HeaderMap,
}

impl RewriteDecision {
    pub(crate) fn pass_through(target: RequestTarget) -> Self {
        Self {
            target,
            encoding: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn is_rewrite(&self) -> bool {
        self.encoding.is_some()
    }

    /// Whether the path had any pre-compressed variant (`Vary: Accept-Encoding` is emitted).
    pub fn varies(&self) -> bool {
        self.headers.contains_key(header::VARY)
    }

    /// Applies the header directives over the file server's response headers.
    ///
    /// `Vary` is always applied. The representation headers only make sense on a response that
    /// actually carries (or validates) the compressed file, so error responses only get `Vary`.
    pub fn apply(&self, status: StatusCode, response_headers: &mut HeaderMap) {
        let success = !(status.is_client_error() || status.is_server_error());

        for (name, value) in &self.headers {
            if success || *name == header::VARY {
                response_headers.insert(name.clone(), value.clone());
            }
        }
    }
}
