use crate::server::RuntimeState;
use crate::server::dispatch::{IncomingRequest, dispatch};
use crate::static_files::StaticBody;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use std::sync::Arc;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const CHUNK_SIZE: usize = 32 * 1024;

/// Per-request bookkeeping for the access log.
pub struct ServeCtx {
    started: Instant,
    status: Option<u16>,
    encoding: Option<String>,
}

/// Terminal gateway: every request is answered from disk, nothing is proxied.
pub struct StaticGateway {
    state: Arc<RuntimeState>,
}

impl StaticGateway {
    pub fn new(state: Arc<RuntimeState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ProxyHttp for StaticGateway {
    type CTX = ServeCtx;

    fn new_ctx(&self) -> Self::CTX {
        ServeCtx {
            started: Instant::now(),
            status: None,
            encoding: None,
        }
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        // request_filter always answers.
        Err(Error::new(Custom(
            "StaticGateway attempted to proxy upstream (bug)",
        )))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        // Owned copies: the session must not stay borrowed across the file server's awaits.
        let req = session.req_header();
        let method = req.method.clone();
        let path = req.uri.path().to_owned();
        let query = req.uri.query().map(str::to_owned);
        let headers = req.headers.clone();

        let request = IncomingRequest {
            method: &method,
            path: &path,
            query: query.as_deref(),
            headers: &headers,
        };

        let dispatched = dispatch(&self.state, request).await;
        let response = dispatched.response;

        ctx.status = Some(response.status.as_u16());
        ctx.encoding = dispatched.encoding.map(|e| e.name().to_string());

        let mut header = ResponseHeader::build(response.status, Some(response.headers.len()))?;
        for (name, value) in response.headers.iter() {
            header.insert_header(name.clone(), value.clone())?;
        }

        let header_only = matches!(response.body, StaticBody::Empty);
        session
            .write_response_header(Box::new(header), header_only)
            .await?;

        if !header_only {
            write_body(session, response.body).await?;
        }

        Ok(true)
    }

    async fn logging(&self, session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        let req = session.req_header();
        let duration_ms = ctx.started.elapsed().as_secs_f64() * 1000.0;

        match e {
            Some(err) => tracing::warn!(
                method = %req.method,
                path = %req.uri.path(),
                error = %err,
                duration_ms,
                "request failed"
            ),
            None => tracing::info!(
                method = %req.method,
                path = %req.uri.path(),
                status = ctx.status,
                encoding = ctx.encoding.as_deref(),
                duration_ms,
                "request served"
            ),
        }
    }
}

async fn write_body(session: &mut Session, body: StaticBody) -> pingora::Result<()> {
    match body {
        StaticBody::Empty => session.write_response_body(None, true).await,
        StaticBody::Bytes(bytes) => session.write_response_body(Some(bytes), true).await,
        StaticBody::File(file) => stream_file(session, file, u64::MAX).await,
        StaticBody::RangedFile { file, remaining } => stream_file(session, file, remaining).await,
    }
}

/// Copies at most `limit` bytes from `file` to the client, then ends the body.
///
/// A short read (the file shrank after it was opened) ends the body early.
async fn stream_file(session: &mut Session, file: File, limit: u64) -> pingora::Result<()> {
    let mut reader = file.take(limit);
    let mut chunk = BytesMut::zeroed(CHUNK_SIZE);

    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|_| Error::new(Custom("failed to read static file")))?;
        if n == 0 {
            break;
        }

        let data = Bytes::copy_from_slice(&chunk[..n]);
        session.write_response_body(Some(data), false).await?;
    }

    session.write_response_body(None, true).await
}
