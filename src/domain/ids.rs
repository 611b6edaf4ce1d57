//! Domain identifier types
//!
//! Newtype wrappers for the identifiers used by the two exports. COCO ids are
//! integers; pages are joined across exports by [`PageKey`], the basename of a
//! page's filename.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric value
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of an image (page) in the structural export
    ImageId
);

numeric_id!(
    /// Identifier of a category in the structural export
    CategoryId
);

numeric_id!(
    /// Identifier of a region annotation in the structural export
    AnnotationId
);

/// Normalized page key shared by both exports
///
/// # Examples
///
/// ```
/// use labelfuse::domain::ids::PageKey;
///
/// let key = PageKey::from_filename("/data/upload/3/a1b2-page_07.png");
/// assert_eq!(key.as_str(), "a1b2-page_07.png");
/// assert_eq!(PageKey::synthetic(4).as_str(), "page_4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    /// Builds a key from a filename or path, keeping only the basename
    pub fn from_filename(filename: &str) -> Self {
        Self(basename(filename).to_string())
    }

    /// Builds the fallback key for a task that names no file
    pub fn synthetic(task_index: usize) -> Self {
        Self(format!("page_{task_index}"))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the key is empty (e.g. an image with an empty file_name)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strips everything up to and including the last `/`
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
