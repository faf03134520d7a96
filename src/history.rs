//! Browser history mirroring of canonical query state.
//!
//! The session's URL manager emits a fragment describing its canonical
//! query state; [`HistorySync`] writes that fragment back into the
//! browser history. Before the first search has executed the current
//! entry is replaced, so the landing URL is canonicalised in place; after
//! that every change pushes a new entry, so back/forward walks the
//! query history.

use crate::location::PageLocation;

/// The browser history API, as far as this crate needs it.
pub trait HistoryBackend {
    /// Replace the current history entry with `url`.
    fn replace_state(&mut self, url: &str);

    /// Push a new history entry for `url`.
    fn push_state(&mut self, url: &str);
}

/// Mirrors session fragments into browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySync {
    enable_history_push: bool,
}

impl HistorySync {
    pub fn new(enable_history_push: bool) -> Self {
        Self {
            enable_history_push,
        }
    }

    /// Write `fragment` into browser history for `location`.
    ///
    /// No-op when history push is disabled (advanced-search pages reload
    /// instead) or when the page was opened from the local filesystem.
    pub fn mirror_fragment(
        &self,
        backend: &mut impl HistoryBackend,
        location: &PageLocation,
        fragment: &str,
        first_search_executed: bool,
    ) {
        if !self.enable_history_push || location.is_file() {
            return;
        }

        let url = format!("{}#{fragment}", location.page_url());
        if first_search_executed {
            backend.push_state(&url);
        } else {
            backend.replace_state(&url);
        }
    }
}
