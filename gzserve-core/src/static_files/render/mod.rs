pub(crate) mod etag;
mod file;
pub(crate) mod range;

pub(crate) use file::render_file;
pub use range::ByteRange;
