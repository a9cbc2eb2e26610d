//! Gallery state and its transitions.
//!
//! Every method here is synchronous and free of I/O; the controller drives
//! them from the outcome of each fetch cycle.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Error;
use crate::types::{Cursor, PaginationCursor, Pokemon};

/// Where the gallery is in its fetch lifecycle.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The most recent cycle failed; the previous page is still shown.
    Failed(Arc<Error>),
    /// The listing came back without a body. Terminal.
    Broken,
}

/// One page of detail records, in listing order.
///
/// A slot is `None` when that entry's detail fetch failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageList {
    slots: Vec<Option<Pokemon>>,
}

impl PageList {
    pub fn new(slots: Vec<Option<Pokemon>>) -> Self {
        Self { slots }
    }

    /// Number of slots, gaps included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<Pokemon>] {
        &self.slots
    }

    /// Iterate the successfully loaded records, skipping gaps.
    pub fn loaded(&self) -> impl Iterator<Item = &Pokemon> {
        self.slots.iter().flatten()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Pokemon> {
        self.loaded().find(|p| p.name == name)
    }
}

impl From<Vec<Option<Pokemon>>> for PageList {
    fn from(slots: Vec<Option<Pokemon>>) -> Self {
        Self::new(slots)
    }
}

/// Proof that a cycle was started; carries its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTicket(u64);

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Why a cycle never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Broken,
    NoCursor,
}

/// How a fetch cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Applied,
    Broken,
    Failed,
    /// A newer cycle was issued before this one finished; its result was dropped.
    Superseded,
    Skipped(SkipReason),
}

/// The full gallery state.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    phase: Phase,
    page_list: PageList,
    selection: Option<Pokemon>,
    cursors: PaginationCursor,
    drawer_open: bool,
    generation: u64,
    /// Phase to fall back to if the current cycle is abandoned.
    settled: Phase,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn broken(&self) -> bool {
        matches!(self.phase, Phase::Broken)
    }

    /// The error from the last cycle, if it failed.
    pub fn error(&self) -> Option<&Error> {
        match &self.phase {
            Phase::Failed(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn page_list(&self) -> &PageList {
        &self.page_list
    }

    pub fn selection(&self) -> Option<&Pokemon> {
        self.selection.as_ref()
    }

    pub fn cursors(&self) -> &PaginationCursor {
        &self.cursors
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.cursors.next.as_ref()
    }

    pub fn previous_cursor(&self) -> Option<&Cursor> {
        self.cursors.previous.as_ref()
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Generation of the most recently issued cycle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new cycle. Returns `None` once the gallery is broken.
    pub fn begin_cycle(&mut self) -> Option<CycleTicket> {
        if self.broken() {
            return None;
        }
        self.generation += 1;
        if !self.loading() {
            self.settled = self.phase.clone();
        }
        self.phase = Phase::Loading;
        debug!(generation = self.generation, "cycle started");
        Some(CycleTicket(self.generation))
    }

    pub fn is_current(&self, ticket: CycleTicket) -> bool {
        ticket.0 == self.generation && !self.broken()
    }

    /// Publish a fully resolved page and its cursors in one step.
    pub fn apply_page(
        &mut self,
        ticket: CycleTicket,
        cursors: PaginationCursor,
        page_list: PageList,
    ) -> CycleOutcome {
        if !self.is_current(ticket) {
            return self.superseded(ticket);
        }

        self.selection = self
            .selection
            .take()
            .and_then(|selected| page_list.find_by_name(&selected.name).cloned());
        info!(
            generation = ticket.0,
            slots = page_list.len(),
            loaded = page_list.loaded().count(),
            "page applied"
        );
        self.page_list = page_list;
        self.cursors = cursors;
        self.phase = Phase::Ready;
        CycleOutcome::Applied
    }

    /// Record a failed listing. Page, cursors and selection are left alone.
    pub fn apply_failure(&mut self, ticket: CycleTicket, error: Error) -> CycleOutcome {
        if !self.is_current(ticket) {
            return self.superseded(ticket);
        }
        self.phase = Phase::Failed(Arc::new(error));
        CycleOutcome::Failed
    }

    /// Record a listing that came back without a body.
    pub fn mark_broken(&mut self, ticket: CycleTicket) -> CycleOutcome {
        if !self.is_current(ticket) {
            return self.superseded(ticket);
        }
        self.phase = Phase::Broken;
        CycleOutcome::Broken
    }

    /// Roll back a cycle that will never publish, e.g. because its future was
    /// dropped mid-flight. Only the latest cycle still loading is affected.
    pub fn abandon_cycle(&mut self, ticket: CycleTicket) -> bool {
        if !self.is_current(ticket) || !self.loading() {
            return false;
        }
        debug!(generation = ticket.0, "cycle abandoned");
        self.phase = self.settled.clone();
        true
    }

    /// Select the loaded record called `name`, or clear the selection when
    /// nothing matches. The drawer toggles either way.
    pub fn select_by_name(&mut self, name: &str) -> Option<&Pokemon> {
        self.selection = self.page_list.find_by_name(name).cloned();
        self.drawer_open = !self.drawer_open;
        self.selection.as_ref()
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    fn superseded(&self, ticket: CycleTicket) -> CycleOutcome {
        debug!(
            generation = ticket.0,
            latest = self.generation,
            "discarding stale cycle result"
        );
        CycleOutcome::Superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon(id: u32, name: &str) -> Pokemon {
        serde_json::from_value(serde_json::json!({"id": id, "name": name})).unwrap()
    }

    fn page(names: &[&str]) -> PageList {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Some(pokemon(i as u32 + 1, n)))
            .collect::<Vec<_>>()
            .into()
    }

    fn cursors(next: Option<&str>, previous: Option<&str>) -> PaginationCursor {
        PaginationCursor {
            next: next.map(Cursor::new),
            previous: previous.map(Cursor::new),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = PageState::new();
        assert!(matches!(state.phase(), Phase::Idle));
        assert!(!state.loading());
        assert!(!state.broken());
        assert!(state.page_list().is_empty());
        assert!(state.selection().is_none());
        assert!(!state.drawer_open());
    }

    #[test]
    fn test_cycle_applies_page() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        assert!(state.loading());

        let outcome = state.apply_page(ticket, cursors(Some("n"), None), page(&["a", "b"]));
        assert_eq!(outcome, CycleOutcome::Applied);
        assert!(matches!(state.phase(), Phase::Ready));
        assert_eq!(state.page_list().len(), 2);
        assert_eq!(state.next_cursor().map(Cursor::as_str), Some("n"));
        assert!(state.previous_cursor().is_none());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut state = PageState::new();
        let first = state.begin_cycle().unwrap();
        let second = state.begin_cycle().unwrap();

        assert_eq!(
            state.apply_page(second, cursors(Some("two"), None), page(&["b"])),
            CycleOutcome::Applied
        );
        assert_eq!(
            state.apply_page(first, cursors(Some("one"), None), page(&["a"])),
            CycleOutcome::Superseded
        );
        assert_eq!(state.page_list().loaded().next().unwrap().name, "b");
        assert_eq!(state.next_cursor().map(Cursor::as_str), Some("two"));
    }

    #[test]
    fn test_failure_keeps_previous_page_and_clears_loading() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        state.apply_page(ticket, cursors(Some("n"), None), page(&["a"]));

        let ticket = state.begin_cycle().unwrap();
        let outcome = state.apply_failure(
            ticket,
            Error::Api {
                status: 500,
                message: "boom".to_string(),
            },
        );
        assert_eq!(outcome, CycleOutcome::Failed);
        assert!(!state.loading());
        assert_eq!(state.error().and_then(Error::status), Some(500));
        assert_eq!(state.page_list().len(), 1);
        assert_eq!(state.next_cursor().map(Cursor::as_str), Some("n"));
    }

    #[test]
    fn test_abandoned_cycle_restores_settled_phase() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        assert!(state.abandon_cycle(ticket));
        assert!(matches!(state.phase(), Phase::Idle));

        let ticket = state.begin_cycle().unwrap();
        state.apply_page(ticket, PaginationCursor::default(), page(&["a"]));
        let first = state.begin_cycle().unwrap();
        let second = state.begin_cycle().unwrap();
        assert!(!state.abandon_cycle(first));
        assert!(state.loading());
        assert!(state.abandon_cycle(second));
        assert!(matches!(state.phase(), Phase::Ready));
        assert_eq!(state.page_list().len(), 1);
    }

    #[test]
    fn test_abandon_after_publish_is_a_no_op() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        state.apply_failure(
            ticket,
            Error::Api {
                status: 500,
                message: "boom".to_string(),
            },
        );
        assert!(!state.abandon_cycle(ticket));
        assert!(state.error().is_some());

        let ticket = state.begin_cycle().unwrap();
        assert!(state.abandon_cycle(ticket));
        assert_eq!(state.error().and_then(Error::status), Some(500));
    }

    #[test]
    fn test_broken_is_terminal() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        assert_eq!(state.mark_broken(ticket), CycleOutcome::Broken);
        assert!(state.broken());
        assert!(state.begin_cycle().is_none());
        assert!(state.broken());
    }

    #[test]
    fn test_stale_cycle_cannot_overwrite_broken() {
        let mut state = PageState::new();
        let first = state.begin_cycle().unwrap();
        let second = state.begin_cycle().unwrap();
        state.mark_broken(second);

        assert_eq!(
            state.apply_page(first, PaginationCursor::default(), page(&["a"])),
            CycleOutcome::Superseded
        );
        assert!(state.broken());
        assert!(state.page_list().is_empty());
    }

    #[test]
    fn test_select_by_name_toggles_drawer() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        state.apply_page(ticket, PaginationCursor::default(), page(&["bulbasaur", "pikachu"]));

        let selected = state.select_by_name("pikachu").cloned();
        assert_eq!(selected.map(|p| p.name), Some("pikachu".to_string()));
        assert!(state.drawer_open());

        assert!(state.select_by_name("mewtwo").is_none());
        assert!(state.selection().is_none());
        assert!(!state.drawer_open());
    }

    #[test]
    fn test_select_skips_gaps() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        let list = PageList::new(vec![None, Some(pokemon(7, "squirtle"))]);
        state.apply_page(ticket, PaginationCursor::default(), list);

        assert_eq!(state.page_list().len(), 2);
        assert_eq!(state.select_by_name("squirtle").map(|p| p.id), Some(7));
    }

    #[test]
    fn test_close_drawer() {
        let mut state = PageState::new();
        state.select_by_name("anything");
        assert!(state.drawer_open());
        state.close_drawer();
        assert!(!state.drawer_open());
        state.close_drawer();
        assert!(!state.drawer_open());
    }

    #[test]
    fn test_selection_follows_new_page() {
        let mut state = PageState::new();
        let ticket = state.begin_cycle().unwrap();
        state.apply_page(ticket, PaginationCursor::default(), page(&["pikachu", "raichu"]));
        state.select_by_name("raichu");

        let ticket = state.begin_cycle().unwrap();
        state.apply_page(ticket, PaginationCursor::default(), page(&["raichu", "sandshrew"]));
        assert_eq!(state.selection().map(|p| p.id), Some(1));

        let ticket = state.begin_cycle().unwrap();
        state.apply_page(ticket, PaginationCursor::default(), page(&["zubat"]));
        assert!(state.selection().is_none());
    }
}
