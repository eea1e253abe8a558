//! Request state for one backend resource.
//!
//! Each async action moves a slice through three phases: requested,
//! succeeded, failed. The reducers here are pure; the `api` crate runs the
//! network call and feeds the outcome in.
//!
//! Edge-case policy:
//! - a delete reduces by id alone, whatever body the server returned;
//! - an update whose id matches nothing leaves the collection unchanged;
//! - a failure never touches the collection.

use std::fmt;

use crate::envelope::{Listing, PageMeta};

/// Error text stored when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// Normalize a failure message, substituting [`FALLBACK_ERROR`] for a
/// missing or blank one.
#[must_use]
pub fn failure_message(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_owned())
}

/// State that moves through the requested / succeeded / failed lifecycle.
///
/// Async actions are written once against this trait: mark the state
/// requested, await the network call, then reduce either the success
/// action or [`Reducer::failed`].
pub trait Reducer {
    /// The transitions this state accepts.
    type Action;

    /// Apply one transition.
    fn reduce(&mut self, action: Self::Action);

    /// The transition for a dispatched request.
    fn requested() -> Self::Action;

    /// The transition for a failed request.
    fn failed(message: Option<String>) -> Self::Action;
}

/// A record with a stable identity, so reducers can match by id.
pub trait Record {
    /// The record's id type.
    type Id: Clone + PartialEq + fmt::Debug;

    /// The record's id.
    fn id(&self) -> &Self::Id;
}

/// Collection state for one resource: `{ items, loading, error }` plus the
/// selected record and the listing's display count.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSlice<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub count: Option<u64>,
    pub meta: Option<PageMeta>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            count: None,
            meta: None,
            loading: false,
            error: None,
        }
    }
}

/// Lifecycle transitions for a [`ResourceSlice`].
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T: Record> {
    /// A request was dispatched.
    Requested,
    /// A listing arrived; replaces the collection, count, and meta.
    Listed(Listing<T>),
    /// A single record arrived; becomes `current`.
    Fetched(T),
    /// A record was created; appended to the collection.
    Created(T),
    /// A record was updated; spliced in by id, ignored if absent.
    Updated(T),
    /// A record was deleted; filtered out by id.
    Deleted(T::Id),
    /// A request that mutates nothing locally succeeded.
    Settled,
    /// The request failed with the given message.
    Failed(String),
}

impl<T: Record + Clone> Reducer for ResourceSlice<T> {
    type Action = SliceAction<T>;

    fn requested() -> SliceAction<T> {
        SliceAction::Requested
    }

    fn failed(message: Option<String>) -> SliceAction<T> {
        SliceAction::Failed(failure_message(message))
    }

    fn reduce(&mut self, action: SliceAction<T>) {
        match action {
            SliceAction::Requested => {
                self.loading = true;
                self.error = None;
                return;
            }
            SliceAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
                return;
            }
            SliceAction::Listed(listing) => {
                self.items = listing.items;
                self.count = listing.count;
                self.meta = listing.meta;
            }
            SliceAction::Fetched(record) => {
                self.current = Some(record);
            }
            SliceAction::Created(record) => {
                self.items.push(record);
                self.count = self.count.map(|c| c.saturating_add(1));
            }
            SliceAction::Updated(record) => {
                if self.current.as_ref().is_some_and(|c| c.id() == record.id()) {
                    self.current = Some(record.clone());
                }
                if let Some(slot) = self.items.iter_mut().find(|item| item.id() == record.id()) {
                    *slot = record;
                }
            }
            SliceAction::Deleted(id) => {
                let before = self.items.len();
                self.items.retain(|item| item.id() != &id);
                if self.items.len() < before {
                    self.count = self.count.map(|c| c.saturating_sub(1));
                }
                if self.current.as_ref().is_some_and(|c| c.id() == &id) {
                    self.current = None;
                }
            }
            SliceAction::Settled => {}
        }
        self.loading = false;
        self.error = None;
    }
}

impl<T: Record> ResourceSlice<T> {
    /// Look up a loaded record by id.
    #[must_use]
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The count to display: the backend's count when sent, else the
    /// number of loaded items.
    #[must_use]
    pub fn display_count(&self) -> u64 {
        self.count.unwrap_or(self.items.len() as u64)
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State for a single value (a profile, a session user).
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSlice<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ValueSlice<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

/// Lifecycle transitions for a [`ValueSlice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueAction<T> {
    Requested,
    Loaded(T),
    Cleared,
    Failed(String),
}

impl<T> Reducer for ValueSlice<T> {
    type Action = ValueAction<T>;

    fn requested() -> ValueAction<T> {
        ValueAction::Requested
    }

    fn failed(message: Option<String>) -> ValueAction<T> {
        ValueAction::Failed(failure_message(message))
    }

    fn reduce(&mut self, action: ValueAction<T>) {
        match action {
            ValueAction::Requested => {
                self.loading = true;
                self.error = None;
            }
            ValueAction::Loaded(value) => {
                self.value = Some(value);
                self.loading = false;
                self.error = None;
            }
            ValueAction::Cleared => *self = Self::default(),
            ValueAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    impl Record for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    fn row(id: u32, label: &'static str) -> Row {
        Row { id, label }
    }

    fn loaded(rows: Vec<Row>) -> ResourceSlice<Row> {
        let mut slice = ResourceSlice::default();
        slice.reduce(SliceAction::Listed(Listing::new(rows)));
        slice
    }

    #[test]
    fn test_requested_sets_loading_and_clears_error() {
        let mut slice = ResourceSlice::<Row>::default();
        slice.error = Some("old".into());
        slice.reduce(SliceAction::Requested);
        assert!(slice.loading);
        assert!(slice.error.is_none());
    }

    #[test]
    fn test_listed_replaces_collection() {
        let mut slice = loaded(vec![row(9, "stale")]);
        slice.reduce(SliceAction::Requested);
        slice.reduce(SliceAction::Listed(Listing {
            items: vec![row(1, "a"), row(2, "b")],
            count: Some(40),
            meta: None,
        }));

        assert!(!slice.loading);
        assert!(slice.error.is_none());
        assert_eq!(slice.items, vec![row(1, "a"), row(2, "b")]);
        assert_eq!(slice.display_count(), 40);
    }

    #[test]
    fn test_failure_keeps_collection() {
        let mut slice = loaded(vec![row(1, "a")]);
        slice.reduce(SliceAction::Requested);
        slice.reduce(ResourceSlice::failed(None));

        assert!(!slice.loading);
        assert_eq!(slice.error.as_deref(), Some(FALLBACK_ERROR));
        assert_eq!(slice.items, vec![row(1, "a")]);
    }

    #[test]
    fn test_failed_uses_backend_message() {
        let action = ResourceSlice::<Row>::failed(Some("Category exists".into()));
        assert_eq!(action, SliceAction::Failed("Category exists".into()));
        let blank = ResourceSlice::<Row>::failed(Some("  ".into()));
        assert_eq!(blank, SliceAction::Failed(FALLBACK_ERROR.into()));
    }

    #[test]
    fn test_delete_removes_only_matching_id() {
        let mut slice = loaded(vec![row(1, "a"), row(2, "b"), row(3, "c")]);
        slice.reduce(SliceAction::Deleted(2));
        assert_eq!(slice.items, vec![row(1, "a"), row(3, "c")]);

        slice.reduce(SliceAction::Deleted(42));
        assert_eq!(slice.items.len(), 2);
    }

    #[test]
    fn test_update_splices_by_id() {
        let mut slice = loaded(vec![row(1, "a"), row(2, "b")]);
        slice.reduce(SliceAction::Fetched(row(2, "b")));
        slice.reduce(SliceAction::Updated(row(2, "B")));

        assert_eq!(slice.items, vec![row(1, "a"), row(2, "B")]);
        assert_eq!(slice.current, Some(row(2, "B")));
    }

    #[test]
    fn test_update_without_match_is_noop() {
        let mut slice = loaded(vec![row(1, "a"), row(2, "b")]);
        slice.reduce(SliceAction::Updated(row(7, "ghost")));
        assert_eq!(slice.items, vec![row(1, "a"), row(2, "b")]);
        assert!(!slice.loading);
    }

    #[test]
    fn test_created_appends() {
        let mut slice = loaded(vec![row(1, "a")]);
        slice.reduce(SliceAction::Created(row(2, "b")));
        assert_eq!(slice.items.len(), 2);
        assert_eq!(slice.find(&2).map(|r| r.label), Some("b"));
    }

    #[test]
    fn test_value_slice_lifecycle() {
        let mut slice = ValueSlice::default();
        slice.reduce(ValueAction::Requested);
        assert!(slice.loading);
        slice.reduce(ValueAction::Loaded("profile"));
        assert_eq!(slice.value, Some("profile"));
        slice.reduce(ValueAction::Failed("nope".into()));
        assert_eq!(slice.value, Some("profile"));
        slice.reduce(ValueAction::Cleared);
        assert_eq!(slice, ValueSlice::default());
    }
}
