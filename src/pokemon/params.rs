/// Query parameters for the `GET /pokemon` listing.
///
/// Use the builder pattern via `ListParams::builder()`:
/// ```ignore
/// let params = ListParams::builder().limit(50).offset(100).build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct ListParams {
    /// Maximum number of entries on the page.
    pub limit: Option<u32>,
    /// Number of entries to skip from the start of the collection.
    pub offset: Option<u32>,
}

impl ListParams {
    pub(crate) fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("offset={}", offset));
        }
        parts.join("&")
    }
}
