use crate::conf::types::{ConfigSpec, CustomCompressionSpec, IndexSpec};
use crate::conf::validation::ValidationReport;
use crate::encoding::{Encoding, IDENTITY, WILDCARD};
use http::{HeaderName, HeaderValue};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

/// Checks a parsed config for semantic problems, collecting all of them.
///
/// `root` is the asset root as it will be used at runtime (already resolved against the config
/// file location).
pub fn validate_spec(spec: &ConfigSpec, root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_server(spec, &mut report);
    validate_assets(spec, root, &mut report);
    validate_compressions(&spec.assets.custom_compressions, &mut report);
    validate_order_preference(spec, &mut report);
    validate_serve(spec, &mut report);

    report
}

fn validate_server(spec: &ConfigSpec, report: &mut ValidationReport) {
    let listen = spec.server.listen.trim();
    if listen.is_empty() {
        report.error(
            "server.listen",
            "listen address is empty".to_string(),
            Some("use a socket address such as \"0.0.0.0:8080\"".to_string()),
        );
    } else if listen.parse::<SocketAddr>().is_err() {
        report.error(
            "server.listen",
            format!("invalid listen address: {listen}"),
            Some("use a socket address such as \"0.0.0.0:8080\"".to_string()),
        );
    }

    if spec.server.threads == Some(0) {
        report.error(
            "server.threads",
            "threads must be greater than zero".to_string(),
            None,
        );
    }
}

fn validate_assets(spec: &ConfigSpec, root: &Path, report: &mut ValidationReport) {
    let assets = &spec.assets;

    if !root.is_dir() {
        report.warning(
            "assets.root",
            format!("asset root does not exist: {}", root.display()),
            Some("nothing pre-compressed will be served until it exists and the server restarts".to_string()),
        );
    }

    if let Some(IndexSpec::File(name)) = &assets.index {
        if name.trim().is_empty() {
            report.error(
                "assets.index",
                "index file name is empty".to_string(),
                Some("use `index = false` to disable index files".to_string()),
            );
        } else if name.contains('/') {
            report.error(
                "assets.index",
                format!("index file name must not contain '/': {name}"),
                None,
            );
        }
    }
}

fn validate_compressions(compressions: &[CustomCompressionSpec], report: &mut ValidationReport) {
    let mut seen = HashSet::new();

    for (i, compression) in compressions.iter().enumerate() {
        let field = format!("assets.custom_compressions[{i}]");
        let name = compression.encoding.trim();
        let extension = compression.extension.trim().trim_start_matches('.');

        if name.is_empty() {
            report.error(
                format!("{field}.encoding"),
                "encoding name is empty".to_string(),
                None,
            );
        } else if name == IDENTITY || name == WILDCARD {
            report.error(
                format!("{field}.encoding"),
                format!("'{name}' is reserved and cannot be registered"),
                None,
            );
        } else if !seen.insert(name) {
            report.warning(
                format!("{field}.encoding"),
                format!("duplicate encoding '{name}' is ignored"),
                Some("the first registration of an encoding name wins".to_string()),
            );
        } else if name == Encoding::GZIP || name == Encoding::BROTLI {
            report.warning(
                format!("{field}.encoding"),
                format!("custom encoding '{name}' replaces the built-in one"),
                None,
            );
        }

        if extension.is_empty() {
            report.error(
                format!("{field}.extension"),
                "file extension is empty".to_string(),
                Some("give the extension without the dot, e.g. \"zst\"".to_string()),
            );
        } else if extension.contains('/') {
            report.error(
                format!("{field}.extension"),
                format!("file extension must not contain '/': {extension}"),
                None,
            );
        }
    }
}

fn validate_order_preference(spec: &ConfigSpec, report: &mut ValidationReport) {
    let assets = &spec.assets;

    for (i, name) in assets.order_preference.iter().enumerate() {
        let registered = name == Encoding::GZIP
            || (assets.enable_brotli && name == Encoding::BROTLI)
            || assets
                .custom_compressions
                .iter()
                .any(|c| c.encoding.trim() == name);

        if !registered {
            report.warning(
                format!("assets.order_preference[{i}]"),
                format!("preferred encoding '{name}' is not registered"),
                None,
            );
        }
    }
}

fn validate_serve(spec: &ConfigSpec, report: &mut ValidationReport) {
    let serve = &spec.assets.serve;

    if serve.max_file_size == 0 {
        report.error(
            "assets.serve.max_file_size",
            "max_file_size must be greater than zero".to_string(),
            None,
        );
    }

    for (name, value) in &serve.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            report.error(
                format!("assets.serve.headers.{name}"),
                format!("invalid header name: {name}"),
                None,
            );
        }
        if HeaderValue::from_str(value).is_err() {
            report.error(
                format!("assets.serve.headers.{name}"),
                format!("invalid header value for {name}"),
                None,
            );
        }
    }
}
