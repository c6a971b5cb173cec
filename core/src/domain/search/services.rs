use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tracing::warn;

use crate::domain::search::entities::ProductSuggestion;
use crate::domain::search::ports::ProductIndexGateway;

/// Debounced product autocomplete.
///
/// Every keystroke bumps a generation counter; a lookup carries the
/// generation it was issued under and its results are applied only while
/// that generation is still current, the input value still matches, and no
/// selection happened in between. Late responses for old keystrokes are
/// dropped on arrival rather than cancelled in flight.
pub struct Autocomplete<G> {
    gateway: Arc<G>,
    debounce: Duration,
    min_length: usize,
    generation: Arc<AtomicU64>,
    selecting: Arc<AtomicBool>,
    query: String,
    suggestions: Vec<ProductSuggestion>,
    visible: bool,
}

/// Handle for a lookup scheduled by [`Autocomplete::on_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    generation: u64,
    query: String,
}

impl<G: ProductIndexGateway> Autocomplete<G> {
    pub fn new(gateway: Arc<G>, debounce: Duration, min_length: usize) -> Self {
        Self {
            gateway,
            debounce,
            min_length,
            generation: Arc::new(AtomicU64::new(0)),
            selecting: Arc::new(AtomicBool::new(false)),
            query: String::new(),
            suggestions: Vec::new(),
            visible: false,
        }
    }

    pub fn suggestions(&self) -> &[ProductSuggestion] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Registers a new input value. Inputs shorter than the minimum length
    /// clear the dropdown immediately, without waiting for the debounce,
    /// and schedule nothing.
    pub fn on_input(&mut self, value: &str) -> Option<PendingLookup> {
        self.query = value.to_string();
        self.selecting.store(false, Ordering::SeqCst);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if value.chars().count() < self.min_length {
            self.suggestions.clear();
            self.visible = false;
            return None;
        }

        Some(PendingLookup {
            generation,
            query: value.to_string(),
        })
    }

    /// Waits out the debounce window and issues the lookup, unless the
    /// input moved on or a selection landed in the meantime. A fetch
    /// failure degrades to "no suggestions" and is only logged.
    pub async fn fetch(&self, pending: &PendingLookup) -> Option<Vec<ProductSuggestion>> {
        tokio::time::sleep(self.debounce).await;

        if self.generation.load(Ordering::SeqCst) != pending.generation
            || self.selecting.load(Ordering::SeqCst)
        {
            return None;
        }

        match self.gateway.search_products(&pending.query).await {
            Ok(items) => Some(items),
            Err(err) => {
                warn!(query = %pending.query, "suggestion fetch failed: {err}");
                Some(Vec::new())
            }
        }
    }

    /// Applies a completed lookup. Last-request-wins by value: the response
    /// is dropped unless its generation is current and the input still
    /// reads exactly what was queried.
    pub fn apply(&mut self, pending: &PendingLookup, items: Vec<ProductSuggestion>) {
        if self.generation.load(Ordering::SeqCst) != pending.generation
            || self.selecting.load(Ordering::SeqCst)
            || self.query != pending.query
        {
            return;
        }

        self.visible = !items.is_empty();
        self.suggestions = items;
    }

    /// Adopts a suggestion. Sets the selecting guard so any lookup still in
    /// flight or queued behind the debounce is invalidated, then hides the
    /// dropdown.
    pub fn select(&mut self, index: usize) -> Option<ProductSuggestion> {
        let chosen = self.suggestions.get(index).cloned()?;
        self.selecting.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.query = chosen.product_name.clone();
        self.suggestions.clear();
        self.visible = false;
        Some(chosen)
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Convenience driver for non-interactive callers: debounce, fetch and
    /// apply in one await.
    pub async fn lookup(&mut self, value: &str) -> &[ProductSuggestion] {
        if let Some(pending) = self.on_input(value)
            && let Some(items) = self.fetch(&pending).await
        {
            self.apply(&pending, items);
        }
        self.suggestions()
    }
}
