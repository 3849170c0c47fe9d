use crate::conf::types::ServeOptions;
use crate::headers::HeaderBuilder;
use crate::request::ConditionalHeaders;
use crate::static_files::render::etag::{etag_matches, modified_since, weak_etag};
use crate::static_files::render::range::parse_range_header;
use crate::static_files::{ServeError, StaticBody, StaticResponse};
use bytes::Bytes;
use http::StatusCode;
use httpdate::fmt_http_date;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

pub(crate) async fn render_file(
    path: PathBuf,
    conditional: &ConditionalHeaders,
    options: &ServeOptions,
) -> Result<StaticResponse, ServeError> {
    let metadata = fs::metadata(&path)
        .await
        .map_err(|_| ServeError::NotFound)?;

    if !metadata.is_file() {
        return Err(ServeError::NotFound);
    }

    let size = metadata.len();
    if size > options.max_file_size {
        return Err(ServeError::Forbidden);
    }

    let modified = metadata.modified().ok();

    let etag = options.etag.then(|| weak_etag(size, modified));
    let last_modified = if options.last_modified {
        modified.map(fmt_http_date)
    } else {
        None
    };

    // If-None-Match takes precedence over If-Modified-Since.
    let not_modified = match (
        etag.as_deref().zip(conditional.if_none_match.as_deref()),
        conditional.if_modified_since.as_deref(),
    ) {
        (Some((etag, inm)), _) => etag_matches(etag, inm),
        (None, Some(ims)) if last_modified.is_some() => !modified_since(modified, ims),
        _ => false,
    };

    // Headers shared by 200, 206 and 304.
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    let mut headers = HeaderBuilder::default();
    headers.accept_ranges();
    headers.content_type(mime.as_ref());
    if let Some(etag) = &etag {
        headers.etag(etag);
    }
    if let Some(lm) = &last_modified {
        headers.last_modified(lm);
    }
    headers.cache_control(&options.cache_policy);
    headers.extend(&options.headers);

    if not_modified {
        headers.content_length("0");
        return Ok(finish(StatusCode::NOT_MODIFIED, headers, StaticBody::Empty));
    }

    let range = conditional
        .range
        .as_deref()
        .and_then(|r| parse_range_header(r, size));

    let mut file = fs::File::open(&path).await.map_err(open_error)?;

    let (status, body) = if size <= options.small_file_threshold {
        let mut buf = Vec::with_capacity(size as usize);
        file.read_to_end(&mut buf)
            .await
            .map_err(|_| ServeError::Io)?;
        let buf = Bytes::from(buf);

        // The file may have changed between stat and read.
        match range.filter(|r| r.end < buf.len() as u64) {
            Some(range) => {
                let part = buf.slice(range.start as usize..=range.end as usize);
                headers.content_range(range, size);
                headers.content_length(&part.len().to_string());
                (StatusCode::PARTIAL_CONTENT, StaticBody::Bytes(part))
            }
            None => {
                headers.content_length(&buf.len().to_string());
                (StatusCode::OK, StaticBody::Bytes(buf))
            }
        }
    } else {
        // Streamed by the gateway.
        match range {
            Some(range) => {
                file.seek(std::io::SeekFrom::Start(range.start))
                    .await
                    .map_err(|_| ServeError::Io)?;
                let remaining = range.len();
                headers.content_range(range, size);
                headers.content_length(&remaining.to_string());
                (
                    StatusCode::PARTIAL_CONTENT,
                    StaticBody::RangedFile { file, remaining },
                )
            }
            None => {
                headers.content_length(&size.to_string());
                (StatusCode::OK, StaticBody::File(file))
            }
        }
    };

    Ok(finish(status, headers, body))
}

fn finish(status: StatusCode, headers: HeaderBuilder, body: StaticBody) -> StaticResponse {
    StaticResponse {
        status,
        headers: headers.build(),
        body,
    }
}

fn open_error(err: std::io::Error) -> ServeError {
    match err.kind() {
        std::io::ErrorKind::NotFound => ServeError::NotFound,
        std::io::ErrorKind::PermissionDenied => ServeError::Forbidden,
        _ => ServeError::Io,
    }
}
