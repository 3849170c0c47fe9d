use crate::intercept::InterceptError;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;

/// Characters that cannot appear raw in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-decodes a request path.
///
/// Strict where the decoder is lenient: a `%` not followed by two hex digits is rejected, as is
/// any escape sequence that does not decode to UTF-8 (e.g. a lone `%c0`).
pub fn decode_request_path(path: &str) -> Result<Cow<'_, str>, InterceptError> {
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(InterceptError::MalformedPath);
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| InterceptError::MalformedPath)
}

/// Appends an encoding suffix to a still-encoded request path.
pub fn append_suffix(path: &str, suffix: &str) -> String {
    format!("{}{}", path, utf8_percent_encode(suffix, PATH_SEGMENT))
}
