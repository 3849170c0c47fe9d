use crate::conf::ConfigError;
use crate::conf::parse_spec;
use crate::conf::types::{DotfilesPolicy, IndexSpec};
use pretty_assertions::assert_eq;
use std::path::Path;

fn parse(source: &str) -> Result<crate::conf::types::ConfigSpec, ConfigError> {
    parse_spec(source, Path::new("gzserve.hcl"))
}

#[test]
fn parse_minimal_config_applies_defaults() {
    // Arrange
    let source = r#"
        assets {
          root = "public"
        }
    "#;

    // Act
    let spec = parse(source).unwrap();

    // Assert
    assert_eq!(spec.server.listen, "0.0.0.0:8080");
    assert_eq!(spec.server.threads, None);
    assert_eq!(spec.assets.mount, "/");
    assert!(!spec.assets.enable_brotli);
    assert_eq!(spec.assets.index, None);
    assert!(spec.assets.order_preference.is_empty());
    assert!(spec.assets.custom_compressions.is_empty());
    assert_eq!(spec.assets.serve.dotfiles, DotfilesPolicy::Ignore);
    assert!(spec.assets.serve.etag);
}

#[test]
fn parse_full_config() {
    // Arrange
    let source = r#"
        server {
          listen  = "127.0.0.1:9000"
          threads = 2
        }

        assets {
          root             = "/srv/www"
          mount            = "/static"
          enable_brotli    = true
          index            = "default.htm"
          order_preference = ["br", "gzip"]

          custom_compressions = [
            { encoding = "zstd", extension = "zst" },
          ]

          serve {
            dotfiles = "deny"
            etag     = false

            headers = {
              "X-Content-Type-Options" = "nosniff"
            }

            cache_policy {
              max_age_seconds = 3600
              immutable       = true
            }
          }
        }
    "#;

    // Act
    let spec = parse(source).unwrap();

    // Assert
    assert_eq!(spec.server.listen, "127.0.0.1:9000");
    assert_eq!(spec.server.threads, Some(2));
    assert_eq!(spec.assets.mount, "/static");
    assert!(spec.assets.enable_brotli);
    assert_eq!(
        spec.assets.index,
        Some(IndexSpec::File("default.htm".to_string()))
    );
    assert_eq!(spec.assets.order_preference, vec!["br", "gzip"]);
    assert_eq!(spec.assets.custom_compressions.len(), 1);
    assert_eq!(spec.assets.custom_compressions[0].encoding, "zstd");
    assert_eq!(spec.assets.custom_compressions[0].extension, "zst");
    assert_eq!(spec.assets.serve.dotfiles, DotfilesPolicy::Deny);
    assert!(!spec.assets.serve.etag);
    assert_eq!(
        spec.assets.serve.headers.get("X-Content-Type-Options"),
        Some(&"nosniff".to_string())
    );
    assert_eq!(spec.assets.serve.cache_policy.max_age_seconds, 3600);
    assert!(spec.assets.serve.cache_policy.public);
    assert!(spec.assets.serve.cache_policy.immutable);
}

#[test]
fn parse_index_false_disables_index() {
    // Arrange
    let source = r#"
        assets {
          root  = "public"
          index = false
        }
    "#;

    // Act
    let spec = parse(source).unwrap();

    // Assert
    assert_eq!(spec.assets.index, Some(IndexSpec::Enabled(false)));
}

#[test]
fn parse_rejects_missing_assets_block() {
    // Arrange
    let source = r#"
        server {
          listen = "127.0.0.1:9000"
        }
    "#;

    // Act
    let err = parse(source).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn parse_rejects_invalid_hcl() {
    // Arrange
    let source = "assets { root = ";

    // Act
    let err = parse(source).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}
