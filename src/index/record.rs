//! Core types for search index records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity tag of a record.
///
/// Serialized as the bare string. Tags other than `page` and `section` are
/// kept verbatim so newer generators still load and round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Page,
    Section,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Other(tag) => tag,
        }
    }

    /// True for the tags the generator is known to emit.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Relative URL of the page or page section (`path[#anchor]`).
    pub location: String,

    /// Title of the containing page.
    pub page: String,

    /// Title of the section; may equal `page` or be empty.
    pub title: String,

    /// Prose excerpt, possibly empty.
    pub text: String,

    pub category: Category,
}

impl IndexRecord {
    /// Create a new record.
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category: category.into(),
        }
    }

    /// Location without its `#anchor`.
    pub fn path(&self) -> &str {
        match self.location.split_once('#') {
            Some((path, _)) => path,
            None => &self.location,
        }
    }

    /// Anchor after `#`, if the location has one.
    pub fn anchor(&self) -> Option<&str> {
        self.location.split_once('#').map(|(_, anchor)| anchor)
    }

    pub fn is_page(&self) -> bool {
        self.category == Category::Page
    }

    pub fn is_section(&self) -> bool {
        self.category == Category::Section
    }

    /// Get a preview of the text (first N bytes, cut on a char boundary).
    pub fn preview(&self, max_chars: usize) -> &str {
        if self.text.len() <= max_chars {
            &self.text
        } else {
            let mut end = max_chars;
            while end > 0 && !self.text.is_char_boundary(end) {
                end -= 1;
            }
            &self.text[..end]
        }
    }

    /// Get the length of the text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
