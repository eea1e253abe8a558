use shopdesk_api::ApiError;
use shopdesk_core::{Order, OrderId, OrderStatus, SliceAction};
use tracing::instrument;

use crate::services;
use crate::state::StorefrontState;

impl StorefrontState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_orders(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.orders(),
            services::orders::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Open one order; it becomes the order slice's `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn open_order(&self, id: &OrderId) -> Result<(), ApiError> {
        self.dispatch(
            self.orders(),
            services::orders::get(self.client(), id),
            SliceAction::Fetched,
        )
        .await
    }

    /// Cancel an order and splice the cancelled record into the listing.
    ///
    /// A loaded order that can no longer be cancelled is refused locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is past cancellation or the request
    /// fails.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &OrderId) -> Result<(), ApiError> {
        let status = self.orders().read().await.find(id).map(|o| o.status);
        let client = self.client();
        let request = async {
            if let Some(status) = status.filter(|s| !s.is_cancellable()) {
                return Err(ApiError::Validation(format!(
                    "a {status} order can no longer be cancelled"
                )));
            }
            services::orders::cancel(client, id).await
        };
        self.dispatch(self.orders(), request, SliceAction::Updated).await
    }

    /// Loaded orders with the given status.
    pub async fn orders_with_status(&self, status: OrderStatus) -> Vec<Order> {
        self.orders()
            .read()
            .await
            .items
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect()
    }
}
