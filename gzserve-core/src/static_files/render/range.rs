#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64, // inclusive
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parses a single `bytes=` range against a representation of `size` bytes.
///
/// Supports `a-b`, `a-` and suffix ranges (`-n`). Multiple ranges and unsatisfiable ranges yield
/// `None`, which serves the whole file.
pub(crate) fn parse_range_header(header: &str, size: u64) -> Option<ByteRange> {
    let range = header.trim().strip_prefix("bytes=")?.trim();

    if size == 0 || range.contains(',') {
        return None;
    }

    let (start, end) = range.split_once('-')?;
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() {
        let suffix = end.parse::<u64>().ok().filter(|n| *n > 0)?;
        return Some(ByteRange {
            start: size.saturating_sub(suffix),
            end: size - 1,
        });
    }

    let start = start.parse::<u64>().ok()?;
    let end = match end {
        "" => size - 1,
        v => v.parse::<u64>().ok()?.min(size - 1),
    };

    if start > end {
        return None;
    }

    Some(ByteRange { start, end })
}
