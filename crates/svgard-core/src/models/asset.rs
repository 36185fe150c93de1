use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Unordered tag set; duplicates collapse and iteration is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a whitespace-separated tag string into a set.
    pub fn explode(tags: &str) -> Self {
        tags.split_whitespace().collect()
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.0.insert(tag.to_string())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

/// An upload as handed over by the host, before any validation.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub data: Vec<u8>,
    /// Declared media type (informational; dispatch uses `extension`).
    pub content_type: String,
    /// Content hash computed by the caller; used as the storage key.
    pub hash: String,
    pub filename: String,
    /// Lower-case extension without the leading dot.
    pub extension: String,
    pub source: Option<String>,
    pub tags: TagSet,
}

impl UploadedAsset {
    /// Build an asset, deriving the extension from `filename`.
    pub fn new(
        data: Vec<u8>,
        hash: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        let extension = extension_of(&filename);
        Self {
            data,
            content_type: content_type.into(),
            hash: hash.into(),
            filename,
            extension,
            source: None,
            tags: TagSet::new(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_lowercase();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.source = if source.trim().is_empty() {
            None
        } else {
            Some(source)
        };
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Lower-case extension of `filename`, or an empty string when there is none.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}
