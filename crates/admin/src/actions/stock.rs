use shopdesk_api::ApiError;
use shopdesk_core::{SliceAction, StockId, StockItem};
use tracing::instrument;

use crate::filters::low_stock;
use crate::services;
use crate::state::AdminState;

impl AdminState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_stock(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.stock(),
            services::stock::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Set the on-hand quantity of one stock item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn set_stock(&self, id: &StockId, quantity: u32) -> Result<(), ApiError> {
        self.dispatch(
            self.stock(),
            services::stock::update(self.client(), id, quantity),
            SliceAction::Updated,
        )
        .await
    }

    /// Loaded items at or under their low-stock threshold.
    pub async fn low_stock(&self, default_threshold: u32) -> Vec<StockItem> {
        let stock = self.stock().read().await;
        low_stock(&stock.items, default_threshold)
            .into_iter()
            .cloned()
            .collect()
    }
}
