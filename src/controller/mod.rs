pub mod state;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, warn};

use crate::client::Client;
use crate::pokemon::ListParams;
use crate::types::{Cursor, Pokemon};

pub use self::state::{CycleOutcome, CycleTicket, PageList, PageState, Phase, SkipReason};

/// Number of entries requested by `load_initial` unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Tuning knobs for a `PageController`.
#[derive(Debug, Clone, bon::Builder)]
pub struct ControllerOptions {
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    /// Cap on in-flight detail requests per cycle. Unbounded when `None`.
    pub detail_concurrency: Option<usize>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// What a fetch cycle should list.
#[derive(Debug, Clone)]
pub enum PageRequest {
    Initial(ListParams),
    Cursor(Cursor),
}

/// Drives the gallery: fetches pages, resolves their details, and tracks
/// selection.
///
/// All methods take `&self`, so overlapping cycles can be run from one
/// controller. The state lock is never held across an `.await`.
pub struct PageController {
    client: Client,
    options: ControllerOptions,
    state: Mutex<PageState>,
}

impl std::fmt::Debug for PageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("client", &self.client)
            .field("options", &self.options)
            .finish()
    }
}

impl PageController {
    pub fn new(client: Client) -> Self {
        Self::with_options(client, ControllerOptions::default())
    }

    pub fn with_options(client: Client, options: ControllerOptions) -> Self {
        Self {
            client,
            options,
            state: Mutex::new(PageState::new()),
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// A copy of the current state, for rendering.
    pub fn snapshot(&self) -> PageState {
        self.state().clone()
    }

    /// Load the first page, `page_size` entries long.
    pub async fn load_initial(&self) -> CycleOutcome {
        let params = ListParams::builder().limit(self.options.page_size).build();
        self.load_page(PageRequest::Initial(params)).await
    }

    /// Run one fetch cycle: list, resolve every entry, then publish.
    ///
    /// Dropping the returned future before it completes rolls the phase back
    /// to where it was, so an abandoned cycle never leaves the gallery loading.
    pub async fn load_page(&self, request: PageRequest) -> CycleOutcome {
        let Some(ticket) = self.state().begin_cycle() else {
            warn!("gallery is broken; ignoring page request");
            return CycleOutcome::Skipped(SkipReason::Broken);
        };
        let guard = CycleGuard {
            state: &self.state,
            ticket: Some(ticket),
        };

        let service = self.client.pokemon();
        let listing = match &request {
            PageRequest::Initial(params) => service.list(params.clone()).await,
            PageRequest::Cursor(cursor) => service.list_at(cursor).await,
        };

        match listing {
            Err(e) => {
                error!(generation = ticket.generation(), error = %e, "listing request failed");
                guard.finish(|state, ticket| state.apply_failure(ticket, e))
            }
            Ok(None) => {
                error!(generation = ticket.generation(), "listing response had no body");
                guard.finish(PageState::mark_broken)
            }
            Ok(Some(listing)) => {
                let details = service
                    .resolve_all(&listing.results, self.options.detail_concurrency)
                    .await;
                guard.finish(|state, ticket| {
                    state.apply_page(ticket, listing.cursor(), PageList::from(details))
                })
            }
        }
    }

    /// Follow the `next` cursor. No request is sent when there is none.
    pub async fn go_next(&self) -> CycleOutcome {
        let cursor = self.state().next_cursor().cloned();
        self.follow(cursor).await
    }

    /// Follow the `previous` cursor. No request is sent when there is none.
    pub async fn go_previous(&self) -> CycleOutcome {
        let cursor = self.state().previous_cursor().cloned();
        self.follow(cursor).await
    }

    /// Select a loaded record by name and toggle the drawer.
    pub fn select_by_name(&self, name: &str) -> Option<Pokemon> {
        self.state().select_by_name(name).cloned()
    }

    pub fn close_drawer(&self) {
        self.state().close_drawer();
    }

    async fn follow(&self, cursor: Option<Cursor>) -> CycleOutcome {
        // Broken takes precedence over a missing cursor.
        if self.state().broken() {
            return CycleOutcome::Skipped(SkipReason::Broken);
        }
        match cursor {
            Some(cursor) => self.load_page(PageRequest::Cursor(cursor)).await,
            None => CycleOutcome::Skipped(SkipReason::NoCursor),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<PageState>) -> MutexGuard<'_, PageState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns a cycle's ticket until the cycle publishes a result.
struct CycleGuard<'a> {
    state: &'a Mutex<PageState>,
    ticket: Option<CycleTicket>,
}

impl CycleGuard<'_> {
    fn finish(
        mut self,
        apply: impl FnOnce(&mut PageState, CycleTicket) -> CycleOutcome,
    ) -> CycleOutcome {
        match self.ticket.take() {
            Some(ticket) => apply(&mut *lock(self.state), ticket),
            None => CycleOutcome::Superseded,
        }
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take()
            && lock(self.state).abandon_cycle(ticket)
        {
            warn!(
                generation = ticket.generation(),
                "cycle dropped before completion"
            );
        }
    }
}
