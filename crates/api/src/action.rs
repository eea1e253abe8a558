//! Async action runner.
//!
//! Every async action is the same three steps: mark the slice requested,
//! await the service call, reduce the outcome. The slice lock is taken for
//! each reduce and released before the network await, so concurrent
//! actions on one slice interleave and the last response to land wins.

use std::future::Future;

use shopdesk_core::Reducer;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::ApiError;

/// Run `request` as a requested / succeeded / failed transition on `state`.
///
/// On success `fulfil` maps the response to the success action, which is
/// reduced and the call returns `Ok(())`. On failure the slice's `error`
/// is set to [`ApiError::message`] and the typed error is returned as well,
/// for callers that want to react to it.
///
/// # Errors
///
/// Returns the error produced by `request`.
pub async fn dispatch<S, V, Fut, F>(state: &RwLock<S>, request: Fut, fulfil: F) -> Result<(), ApiError>
where
    S: Reducer,
    Fut: Future<Output = Result<V, ApiError>>,
    F: FnOnce(V) -> S::Action,
{
    state.write().await.reduce(S::requested());

    match request.await {
        Ok(value) => {
            state.write().await.reduce(fulfil(value));
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, status = ?err.status(), "action failed");
            state.write().await.reduce(S::failed(Some(err.message())));
            Err(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_core::{FALLBACK_ERROR, Listing, Record, ResourceSlice, SliceAction};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
    }

    impl Record for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[tokio::test]
    async fn test_success_replaces_collection() {
        let state = RwLock::new(ResourceSlice::<Row>::default());
        let rows = vec![Row { id: 1 }, Row { id: 2 }];

        let expected = rows.clone();
        dispatch(&state, async move { Ok(Listing::new(rows)) }, SliceAction::Listed)
            .await
            .unwrap();

        let slice = state.read().await;
        assert!(!slice.loading);
        assert!(slice.error.is_none());
        assert_eq!(slice.items, expected);
    }

    #[tokio::test]
    async fn test_failure_keeps_collection_and_sets_message() {
        let state = RwLock::new(ResourceSlice {
            items: vec![Row { id: 7 }],
            ..ResourceSlice::default()
        });

        let err = dispatch(
            &state,
            async {
                Err::<Listing<Row>, _>(ApiError::Api {
                    status: 500,
                    message: None,
                })
            },
            SliceAction::Listed,
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), Some(500));
        let slice = state.read().await;
        assert!(!slice.loading);
        assert_eq!(slice.error.as_deref(), Some(FALLBACK_ERROR));
        assert_eq!(slice.items, vec![Row { id: 7 }]);
    }

    #[tokio::test]
    async fn test_delete_reduces_by_id_alone() {
        let state = RwLock::new(ResourceSlice {
            items: vec![Row { id: 1 }, Row { id: 2 }, Row { id: 3 }],
            count: Some(3),
            ..ResourceSlice::default()
        });

        dispatch(&state, async { Ok(()) }, |()| SliceAction::Deleted(2))
            .await
            .unwrap();

        let slice = state.read().await;
        assert_eq!(slice.items, vec![Row { id: 1 }, Row { id: 3 }]);
        assert_eq!(slice.count, Some(2));
    }
}
