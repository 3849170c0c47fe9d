use crate::headers::HeaderBuilder;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeError {
    NotFound,
    Forbidden,
    Io,
}

impl ServeError {
    pub fn status(self) -> StatusCode {
        match self {
            ServeError::NotFound => StatusCode::NOT_FOUND,
            ServeError::Forbidden => StatusCode::FORBIDDEN,
            ServeError::Io => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What the gateway writes after the headers.
#[derive(Debug)]
pub enum StaticBody {
    Empty,
    /// Already in memory: small files, partial slices of them, error text.
    Bytes(Bytes),
    /// Streamed to EOF in fixed-size chunks.
    File(fs::File),
    /// Streamed from the current file position for `remaining` bytes.
    RangedFile {
        file: fs::File,
        remaining: u64,
    },
}

#[derive(Debug)]
pub struct StaticResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: StaticBody,
}

impl StaticResponse {
    /// A bodyless response with `Content-Length: 0`.
    pub fn empty(status: StatusCode) -> Self {
        let mut headers = HeaderBuilder::default();
        headers.content_length("0");

        Self {
            status,
            headers: headers.build(),
            body: StaticBody::Empty,
        }
    }

    /// A short `text/plain` response, used for malformed requests.
    pub fn text(status: StatusCode, message: &str) -> Self {
        let mut headers = HeaderBuilder::default();
        headers.content_type("text/plain; charset=UTF-8");
        headers.content_length(&message.len().to_string());

        Self {
            status,
            headers: headers.build(),
            body: StaticBody::Bytes(Bytes::copy_from_slice(message.as_bytes())),
        }
    }

    pub fn is_success(&self) -> bool {
        !(self.status.is_client_error() || self.status.is_server_error())
    }

    /// Drops the body but keeps every header, `Content-Length` included.
    pub fn without_body(mut self) -> Self {
        self.body = StaticBody::Empty;
        self
    }
}
