use mime_guess::Mime;

/// Media type for a logical (uncompressed) path, with a charset where one is known.
///
/// Unknown extensions fall back to `application/octet-stream`.
pub fn content_type_for(path: &str) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    match charset_for(&mime) {
        Some(charset) => format!("{}; charset={}", mime.essence_str(), charset),
        None => mime.essence_str().to_string(),
    }
}

/// Default charset of a media type: UTF-8 for text and the textual script/data formats.
pub fn charset_for(mime: &Mime) -> Option<&'static str> {
    if mime.type_() == mime_guess::mime::TEXT {
        return Some("UTF-8");
    }

    if mime.type_() == mime_guess::mime::APPLICATION
        && matches!(mime.subtype().as_str(), "javascript" | "json")
    {
        return Some("UTF-8");
    }

    None
}
