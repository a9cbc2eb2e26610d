pub mod params;

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::client::Client;
use crate::error::Error;
use crate::types::{Cursor, NamedResource, Pokemon, ResourceList};

pub use self::params::ListParams;

/// Service for the Pokemon endpoints.
///
/// Access via `client.pokemon()`.
pub struct PokemonService<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> PokemonService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List one page of Pokemon.
    ///
    /// Calls `GET /pokemon` with optional `limit`/`offset`. Returns `Ok(None)`
    /// when the server answers with an empty body.
    pub async fn list(&self, params: ListParams) -> Result<Option<ResourceList>, Error> {
        let query = params.to_query_string();
        let path = if query.is_empty() {
            "pokemon".to_string()
        } else {
            format!("pokemon?{}", query)
        };
        self.client.get_optional(&path).await
    }

    /// Follow a pagination cursor from a previous listing.
    pub async fn list_at(&self, cursor: &Cursor) -> Result<Option<ResourceList>, Error> {
        self.client.get_optional(cursor.as_str()).await
    }

    /// Get one Pokemon by name or numeric id.
    ///
    /// Calls `GET /pokemon/{name_or_id}`.
    pub async fn get(&self, name_or_id: &str) -> Result<Pokemon, Error> {
        let path = format!("pokemon/{}", name_or_id);
        self.client.get(&path).await
    }

    /// Fetch the detail record an index entry points at.
    pub async fn get_entry(&self, entry: &NamedResource) -> Result<Pokemon, Error> {
        self.client.get(&entry.url).await
    }

    /// Resolve every index entry to its detail record.
    ///
    /// Requests run concurrently, at most `concurrency` at a time (all at once
    /// when `None`). The output has one slot per entry in listing order; a
    /// failed fetch is logged and leaves its slot empty.
    pub async fn resolve_all(
        &self,
        entries: &[NamedResource],
        concurrency: Option<usize>,
    ) -> Vec<Option<Pokemon>> {
        let limit = concurrency.unwrap_or(entries.len()).max(1);

        stream::iter(entries)
            .map(|entry| async move {
                match self.get_entry(entry).await {
                    Ok(pokemon) => Some(pokemon),
                    Err(e) => {
                        warn!(name = %entry.name, url = %entry.url, error = %e, "detail fetch failed");
                        None
                    }
                }
            })
            .buffered(limit)
            .collect()
            .await
    }
}
