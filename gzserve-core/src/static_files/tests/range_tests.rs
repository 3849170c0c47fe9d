use crate::static_files::ByteRange;
use crate::static_files::render::range::parse_range_header;
use pretty_assertions::assert_eq;

#[test]
fn parses_closed_and_open_ranges() {
    assert_eq!(
        parse_range_header("bytes=0-3", 10),
        Some(ByteRange { start: 0, end: 3 })
    );
    assert_eq!(
        parse_range_header("bytes=4-", 10),
        Some(ByteRange { start: 4, end: 9 })
    );
}

#[test]
fn parses_suffix_ranges() {
    assert_eq!(
        parse_range_header("bytes=-3", 10),
        Some(ByteRange { start: 7, end: 9 })
    );
    assert_eq!(
        parse_range_header("bytes=-30", 10),
        Some(ByteRange { start: 0, end: 9 })
    );
}

#[test]
fn clamps_end_to_size() {
    assert_eq!(
        parse_range_header("bytes=5-100", 10),
        Some(ByteRange { start: 5, end: 9 })
    );
}

#[test]
fn rejects_unsatisfiable_or_unsupported_ranges() {
    assert_eq!(parse_range_header("bytes=10-", 10), None);
    assert_eq!(parse_range_header("bytes=5-2", 10), None);
    assert_eq!(parse_range_header("bytes=0-1,4-5", 10), None);
    assert_eq!(parse_range_header("items=0-1", 10), None);
    assert_eq!(parse_range_header("bytes=0-1", 0), None);
    assert_eq!(parse_range_header("bytes=-0", 10), None);
}
