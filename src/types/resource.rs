use serde::{Deserialize, Serialize};

/// An opaque pagination continuation URL handed out by the API.
///
/// Never constructed from parts; only followed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The next/previous links of a listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    pub next: Option<Cursor>,
    pub previous: Option<Cursor>,
}

/// A `{ name, url }` reference into a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id taken from the last path segment of `url`, if there is one.
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// One page of a paginated listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub next: Option<Cursor>,
    #[serde(default)]
    pub previous: Option<Cursor>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl ResourceList {
    pub fn cursor(&self) -> PaginationCursor {
        PaginationCursor {
            next: self.next.clone(),
            previous: self.previous.clone(),
        }
    }
}
