use crate::conf::types::ServeOptions;
use crate::request::{ConditionalHeaders, RequestTarget};
use crate::static_files::{StaticBody, StaticResponse, StaticSite, handle_static_request};
use http::{Method, StatusCode, header};
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};
use tokio::io::AsyncReadExt;

fn site(root: &Path, mount: &str, options: ServeOptions) -> StaticSite {
    StaticSite {
        root: root.to_path_buf(),
        mount: mount.to_string(),
        options,
    }
}

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("hello.txt"), "hello world").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/index.html"), "<p>docs</p>").unwrap();
    dir
}

async fn get(site: &StaticSite, path_and_query: &str) -> StaticResponse {
    get_with(site, path_and_query, ConditionalHeaders::default()).await
}

async fn get_with(
    site: &StaticSite,
    path_and_query: &str,
    conditional: ConditionalHeaders,
) -> StaticResponse {
    let target = RequestTarget::parse(path_and_query);
    handle_static_request(site, &Method::GET, &target, &conditional).await
}

async fn body_bytes(response: StaticResponse) -> Vec<u8> {
    match response.body {
        StaticBody::Empty => Vec::new(),
        StaticBody::Bytes(bytes) => bytes.to_vec(),
        StaticBody::File(mut file) => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).await.unwrap();
            buf
        }
        StaticBody::RangedFile { file, remaining } => {
            let mut buf = Vec::new();
            file.take(remaining).read_to_end(&mut buf).await.unwrap();
            buf
        }
    }
}

#[tokio::test]
async fn serves_small_file_from_memory() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());

    // Act
    let response = get(&site, "/hello.txt").await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_LENGTH], "11");
    assert_eq!(response.headers[header::ACCEPT_RANGES], "bytes");
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(response.headers[header::CACHE_CONTROL], "public, max-age=0");
    assert!(response.headers.contains_key(header::ETAG));
    assert!(response.headers.contains_key(header::LAST_MODIFIED));
    assert!(matches!(response.body, StaticBody::Bytes(_)));
    assert_eq!(body_bytes(response).await, b"hello world");
}

#[tokio::test]
async fn streams_large_file() {
    // Arrange
    let dir = fixture();
    let options = ServeOptions {
        small_file_threshold: 4,
        ..ServeOptions::default()
    };
    let site = site(dir.path(), "/", options);

    // Act
    let response = get(&site, "/hello.txt").await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert!(matches!(response.body, StaticBody::File(_)));
    assert_eq!(body_bytes(response).await, b"hello world");
}

#[tokio::test]
async fn rejects_files_over_max_size() {
    // Arrange
    let dir = fixture();
    let options = ServeOptions {
        max_file_size: 4,
        ..ServeOptions::default()
    };
    let site = site(dir.path(), "/", options);

    // Act
    let response = get(&site, "/hello.txt").await;

    // Assert
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.headers[header::CONTENT_LENGTH], "0");
}

#[tokio::test]
async fn missing_file_is_404() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());

    // Act
    let response = get(&site, "/missing.txt").await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.headers[header::CONTENT_LENGTH], "0");
}

#[tokio::test]
async fn malformed_path_is_400_with_message() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());

    // Act
    let response = get(&site, "/%c0").await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"Bad Request");
}

#[tokio::test]
async fn directory_without_slash_redirects_preserving_query_and_mount() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/static", ServeOptions::default());

    // Act
    let response = get(&site, "/docs?v=1").await;

    // Assert
    assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers[header::LOCATION], "/static/docs/?v=1");
}

#[tokio::test]
async fn directory_is_404_when_redirect_disabled_or_slash_present() {
    // Arrange
    let dir = fixture();
    let options = ServeOptions {
        redirect_directories: false,
        ..ServeOptions::default()
    };
    let no_redirect = site(dir.path(), "/", options);
    let default = site(dir.path(), "/", ServeOptions::default());

    // Act
    let without_slash = get(&no_redirect, "/docs").await;
    let with_slash = get(&default, "/docs/").await;

    // Assert
    assert_eq!(without_slash.status, StatusCode::NOT_FOUND);
    assert_eq!(with_slash.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn if_none_match_yields_304() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());
    let first = get(&site, "/hello.txt").await;
    let etag = first.headers[header::ETAG].to_str().unwrap().to_string();

    // Act
    let response = get_with(
        &site,
        "/hello.txt",
        ConditionalHeaders {
            if_none_match: Some(etag.clone()),
            ..ConditionalHeaders::default()
        },
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers[header::ETAG], etag.as_str());
    assert!(matches!(response.body, StaticBody::Empty));
}

#[tokio::test]
async fn if_modified_since_yields_304() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());
    let first = get(&site, "/hello.txt").await;
    let last_modified = first.headers[header::LAST_MODIFIED]
        .to_str()
        .unwrap()
        .to_string();

    // Act
    let response = get_with(
        &site,
        "/hello.txt",
        ConditionalHeaders {
            if_modified_since: Some(last_modified),
            ..ConditionalHeaders::default()
        },
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn disabled_validators_are_not_emitted() {
    // Arrange
    let dir = fixture();
    let options = ServeOptions {
        etag: false,
        last_modified: false,
        ..ServeOptions::default()
    };
    let site = site(dir.path(), "/", options);

    // Act
    let response = get_with(
        &site,
        "/hello.txt",
        ConditionalHeaders {
            if_none_match: Some("*".to_string()),
            ..ConditionalHeaders::default()
        },
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.headers.contains_key(header::ETAG));
    assert!(!response.headers.contains_key(header::LAST_MODIFIED));
}

#[tokio::test]
async fn range_request_yields_206_in_memory_and_streamed() {
    // Arrange
    let dir = fixture();
    let memory = site(dir.path(), "/", ServeOptions::default());
    let streamed = site(
        dir.path(),
        "/",
        ServeOptions {
            small_file_threshold: 1,
            ..ServeOptions::default()
        },
    );
    let range = || ConditionalHeaders {
        range: Some("bytes=6-10".to_string()),
        ..ConditionalHeaders::default()
    };

    // Act
    let from_memory = get_with(&memory, "/hello.txt", range()).await;
    let from_disk = get_with(&streamed, "/hello.txt", range()).await;

    // Assert
    for response in [from_memory, from_disk] {
        assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(response.headers[header::CONTENT_RANGE], "bytes 6-10/11");
        assert_eq!(response.headers[header::CONTENT_LENGTH], "5");
        assert_eq!(body_bytes(response).await, b"world");
    }
}

#[tokio::test]
async fn head_keeps_headers_and_drops_body() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());
    let target = RequestTarget::parse("/hello.txt");

    // Act
    let response = handle_static_request(
        &site,
        &Method::HEAD,
        &target,
        &ConditionalHeaders::default(),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_LENGTH], "11");
    assert!(matches!(response.body, StaticBody::Empty));
}

#[tokio::test]
async fn other_methods_are_405() {
    // Arrange
    let dir = fixture();
    let site = site(dir.path(), "/", ServeOptions::default());
    let target = RequestTarget::parse("/hello.txt");

    // Act
    let response = handle_static_request(
        &site,
        &Method::POST,
        &target,
        &ConditionalHeaders::default(),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers[header::ALLOW], "GET, HEAD");
}

#[tokio::test]
async fn extra_headers_and_cache_policy_are_applied() {
    // Arrange
    let dir = fixture();
    let mut options = ServeOptions::default();
    options.headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        http::HeaderValue::from_static("nosniff"),
    );
    options.cache_policy.max_age_seconds = 3600;
    options.cache_policy.immutable = true;
    let site = site(dir.path(), "/", options);

    // Act
    let response = get(&site, "/hello.txt").await;

    // Assert
    assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(
        response.headers[header::CACHE_CONTROL],
        "public, max-age=3600, immutable"
    );
}
