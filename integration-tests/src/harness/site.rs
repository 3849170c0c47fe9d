use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::TempDir;

/// A temporary asset root populated with originals and real compressed siblings.
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create asset root"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `path` (relative, `/`-separated) with the given bytes.
    pub fn file(self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&full, contents).expect("failed to write fixture");
        self
    }

    /// Writes `path` and `path.gz`.
    pub fn gzipped(self, path: &str, contents: &str) -> Self {
        let compressed = gzip(contents.as_bytes());
        self.file(path, contents).file(&format!("{path}.gz"), compressed)
    }

    /// Writes `path.br` (the original is not touched).
    pub fn brotlied(self, path: &str, contents: &str) -> Self {
        let compressed = brotli_compress(contents.as_bytes());
        self.file(&format!("{path}.br"), compressed)
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip failed");
    encoder.finish().expect("gzip failed")
}

pub fn gunzip(data: &[u8]) -> String {
    let mut out = String::new();
    GzDecoder::new(data)
        .read_to_string(&mut out)
        .expect("body is not valid gzip");
    out
}

fn brotli_compress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut out, 4096, 5, 22);
        writer.write_all(data).expect("brotli failed");
    }
    out
}

pub fn unbrotli(data: &[u8]) -> String {
    let mut out = String::new();
    brotli::Decompressor::new(data, 4096)
        .read_to_string(&mut out)
        .expect("body is not valid brotli");
    out
}
