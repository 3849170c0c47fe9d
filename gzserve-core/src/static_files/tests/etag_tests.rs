use crate::static_files::render::etag::{etag_matches, modified_since, weak_etag};
use httpdate::fmt_http_date;
use std::time::{Duration, SystemTime};

#[test]
fn weak_etag_uses_hex_size_and_mtime() {
    // Arrange
    let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(255);

    // Act
    let etag = weak_etag(16, Some(modified));

    // Assert
    assert_eq!(etag, "W/\"10-ff\"");
}

#[test]
fn etag_matches_weak_and_strong_candidates() {
    assert!(etag_matches("W/\"10-ff\"", "W/\"10-ff\""));
    assert!(etag_matches("W/\"10-ff\"", "\"10-ff\""));
    assert!(etag_matches("W/\"10-ff\"", "\"abc\", W/\"10-ff\""));
    assert!(etag_matches("W/\"10-ff\"", " * "));
    assert!(!etag_matches("W/\"10-ff\"", "\"10-fe\""));
}

#[test]
fn modified_since_ignores_sub_second_differences() {
    // Arrange
    let since = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let header = fmt_http_date(since);

    // Assert
    assert!(!modified_since(Some(since + Duration::from_millis(500)), &header));
    assert!(modified_since(Some(since + Duration::from_secs(2)), &header));
    assert!(!modified_since(Some(since - Duration::from_secs(10)), &header));
}

#[test]
fn modified_since_assumes_modified_when_unknown() {
    assert!(modified_since(None, "Wed, 21 Oct 2015 07:28:00 GMT"));
    assert!(modified_since(Some(SystemTime::now()), "not a date"));
}
