use crate::assets::AssetIndex;
use crate::encoding::select_encoding;
use crate::headers::HeaderBuilder;
use crate::intercept::{
    InterceptError, RewriteDecision, append_suffix, content_type_for, decode_request_path,
};
use crate::request::RequestTarget;

/// Per-request half of the pre-compressed asset layer.
///
/// Holds the startup asset index and the resolved options; every call is independent and the
/// struct is never mutated after construction, so one instance is shared by all workers.
#[derive(Debug, Clone)]
pub struct Interceptor {
    assets: AssetIndex,
    index_file: Option<String>,
    preference: Vec<String>,
}

impl Interceptor {
    pub fn new(assets: AssetIndex, index_file: Option<String>, preference: Vec<String>) -> Self {
        Self {
            assets,
            index_file,
            preference,
        }
    }

    /// Decides whether a request should be served from a pre-compressed sibling.
    ///
    /// `path` is the raw (percent-encoded) path relative to the mount point, `query` the raw
    /// query string. The returned target must always be handed to the file server, rewritten or
    /// not.
    pub fn intercept(
        &self,
        path: &str,
        query: Option<&str>,
        accept_encoding: Option<&str>,
    ) -> Result<RewriteDecision, InterceptError> {
        let mut path = path.to_owned();
        if let Some(index_file) = self.index_file.as_deref().filter(|_| path.ends_with('/')) {
            path.push_str(index_file);
        }

        let decoded = decode_request_path(&path)?.into_owned();

        let Some(available) = self.assets.get(&decoded) else {
            return Ok(RewriteDecision::pass_through(RequestTarget::new(path, query)));
        };

        let mut headers = HeaderBuilder::default();
        headers.vary();

        let Some(encoding) = select_encoding(accept_encoding, available, &self.preference) else {
            tracing::trace!(path = %decoded, "no acceptable pre-compressed variant");
            return Ok(RewriteDecision {
                target: RequestTarget::new(path, query),
                encoding: None,
                headers: headers.build(),
            });
        };

        headers.content_encoding(encoding.name());
        headers.content_type(&content_type_for(&decoded));

        tracing::trace!(path = %decoded, encoding = encoding.name(), "serving pre-compressed variant");

        Ok(RewriteDecision {
            target: RequestTarget::new(append_suffix(&path, encoding.suffix()), query),
            encoding: Some(encoding.clone()),
            headers: headers.build(),
        })
    }
}
