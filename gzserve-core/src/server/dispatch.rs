use crate::encoding::Encoding;
use crate::headers::HeaderBuilder;
use crate::request::{ConditionalHeaders, accept_encoding};
use crate::server::RuntimeState;
use crate::server::mount::{MountMatch, match_mount};
use crate::static_files::{StaticBody, StaticResponse, handle_static_request};
use http::{HeaderMap, Method, StatusCode};

/// The parts of a request the gateway needs, independent of pingora.
#[derive(Debug, Clone, Copy)]
pub struct IncomingRequest<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub headers: &'a HeaderMap,
}

#[derive(Debug)]
pub struct Dispatched {
    pub response: StaticResponse,
    /// The pre-compressed variant that was served, if any.
    pub encoding: Option<Encoding>,
}

impl Dispatched {
    fn plain(response: StaticResponse) -> Self {
        Self {
            response,
            encoding: None,
        }
    }
}

/// Runs one request through the interceptor and the file server.
pub async fn dispatch(state: &RuntimeState, request: IncomingRequest<'_>) -> Dispatched {
    let mount = state.site.mount.as_str();

    let path = match match_mount(mount, request.path) {
        MountMatch::Inside(path) => path,
        MountMatch::MountRoot => return Dispatched::plain(redirect_to_mount(mount, request.query)),
        MountMatch::Outside => return Dispatched::plain(StaticResponse::empty(StatusCode::NOT_FOUND)),
    };

    let accept_encoding = accept_encoding(request.headers);

    let decision = match state
        .interceptor
        .intercept(path, request.query, accept_encoding.as_deref())
    {
        Ok(decision) => decision,
        Err(err) => {
            tracing::debug!(path = %request.path, error = %err, "rejecting malformed request path");
            return Dispatched::plain(StaticResponse::text(err.status(), &err.to_string()));
        }
    };

    let conditional = ConditionalHeaders::from_headers(request.headers);
    let mut response =
        handle_static_request(&state.site, request.method, &decision.target, &conditional).await;

    decision.apply(response.status, &mut response.headers);

    let encoding = decision.encoding.filter(|_| response.is_success());

    Dispatched { response, encoding }
}

fn redirect_to_mount(mount: &str, query: Option<&str>) -> StaticResponse {
    let location = match query {
        Some(q) => format!("{mount}/?{q}"),
        None => format!("{mount}/"),
    };

    let mut headers = HeaderBuilder::default();
    headers.location(&location);
    headers.content_length("0");

    StaticResponse {
        status: StatusCode::MOVED_PERMANENTLY,
        headers: headers.build(),
        body: StaticBody::Empty,
    }
}
