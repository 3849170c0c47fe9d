use crate::encoding::Encoding;
use serde::Serialize;

/// The ordered set of encodings registered at startup.
///
/// Registration order matters: it decides which suffix wins when a file name matches more than
/// one, and which encoding a wildcard (`*`) resolves to. Names are unique; the first
/// registration of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodingRegistry {
    encodings: Vec<Encoding>,
}

impl EncodingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an encoding, returning `false` if the name is already taken.
    pub fn register(&mut self, encoding: Encoding) -> bool {
        if self.get(encoding.name()).is_some() {
            return false;
        }
        self.encodings.push(encoding);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Encoding> {
        self.encodings.iter().find(|e| e.is_named(name))
    }

    /// Position of an encoding in registration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.encodings.iter().position(|e| e.is_named(name))
    }

    /// Finds the first registered encoding whose suffix ends `file_name`.
    ///
    /// Returns the encoding together with the file name stripped of exactly that suffix. A file
    /// name consisting only of the suffix (`.gz`) has no logical name and never matches.
    pub fn match_file_name<'a>(&self, file_name: &'a str) -> Option<(&Encoding, &'a str)> {
        self.encodings.iter().find_map(|encoding| {
            file_name
                .strip_suffix(encoding.suffix())
                .filter(|stem| !stem.is_empty())
                .map(|stem| (encoding, stem))
        })
    }

    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.encodings.iter().map(Encoding::name).collect()
    }
}
