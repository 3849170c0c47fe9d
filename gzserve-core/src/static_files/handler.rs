use crate::conf::types::ServeOptions;
use crate::headers::HeaderBuilder;
use crate::request::{ConditionalHeaders, RequestTarget};
use crate::static_files::render::render_file;
use crate::static_files::resolve::{ResolveError, ResolvedStatic, resolve_static_path};
use crate::static_files::{StaticBody, StaticResponse};
use http::{Method, StatusCode};
use std::path::PathBuf;

/// A directory of files served under a URL prefix.
#[derive(Debug, Clone)]
pub struct StaticSite {
    pub root: PathBuf,
    /// Normalized mount, only used to build redirect locations.
    pub mount: String,
    pub options: ServeOptions,
}

impl StaticSite {
    /// The public URL of a mount-relative path.
    pub fn public_path(&self, path: &str) -> String {
        if self.mount == "/" {
            path.to_string()
        } else {
            format!("{}{}", self.mount, path)
        }
    }
}

/// Serves `target` (a mount-relative, percent-encoded path) from the site root.
pub async fn handle_static_request(
    site: &StaticSite,
    method: &Method,
    target: &RequestTarget,
    conditional: &ConditionalHeaders,
) -> StaticResponse {
    if method != Method::GET && method != Method::HEAD {
        return method_not_allowed();
    }

    let resolved = match resolve_static_path(&site.root, &target.path, site.options.dotfiles) {
        Ok(resolved) => resolved,
        Err(ResolveError::BadPath) => {
            return StaticResponse::text(StatusCode::BAD_REQUEST, "Bad Request");
        }
        Err(ResolveError::Forbidden) => return StaticResponse::empty(StatusCode::FORBIDDEN),
        Err(ResolveError::NotFound) => return StaticResponse::empty(StatusCode::NOT_FOUND),
    };

    let response = match resolved {
        ResolvedStatic::File(path) => render_file(path, conditional, &site.options)
            .await
            .unwrap_or_else(|e| StaticResponse::empty(e.status())),

        ResolvedStatic::Directory(_) => {
            if site.options.redirect_directories && !target.path.ends_with('/') {
                redirect_to_directory(site, target)
            } else {
                // No directory listings.
                StaticResponse::empty(StatusCode::NOT_FOUND)
            }
        }
    };

    if method == Method::HEAD {
        response.without_body()
    } else {
        response
    }
}

fn redirect_to_directory(site: &StaticSite, target: &RequestTarget) -> StaticResponse {
    let location = format!("{}/{}", site.public_path(&target.path), target.search());

    let mut headers = HeaderBuilder::default();
    headers.location(&location);
    headers.content_length("0");

    StaticResponse {
        status: StatusCode::MOVED_PERMANENTLY,
        headers: headers.build(),
        body: StaticBody::Empty,
    }
}

fn method_not_allowed() -> StaticResponse {
    let mut headers = HeaderBuilder::default();
    headers.allow("GET, HEAD");
    headers.content_length("0");

    StaticResponse {
        status: StatusCode::METHOD_NOT_ALLOWED,
        headers: headers.build(),
        body: StaticBody::Empty,
    }
}
