use shopdesk_api::ApiError;
use shopdesk_core::{
    BookingId, BookingStatus, DriverId, Order, OrderId, OrderStatus, SliceAction,
};
use tracing::instrument;

use crate::filters::orders_with_status;
use crate::services;
use crate::state::AdminState;

impl AdminState {
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

    /// Move an order to `status`; the returned order is spliced in by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.dispatch(
            self.orders(),
            services::orders::update_status(self.client(), id, status),
            SliceAction::Updated,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.orders(),
            services::orders::delete(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// Assign a delivery driver to an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn assign_driver(&self, order: &OrderId, driver: &DriverId) -> Result<(), ApiError> {
        self.dispatch(
            self.orders(),
            services::orders::assign_driver(self.client(), order, driver),
            SliceAction::Updated,
        )
        .await
    }

    /// Loaded orders with the given status.
    pub async fn orders_with_status(&self, status: OrderStatus) -> Vec<Order> {
        let orders = self.orders().read().await;
        orders_with_status(&orders.items, status)
            .into_iter()
            .cloned()
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_bookings(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.bookings(),
            services::bookings::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_booking_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), ApiError> {
        self.dispatch(
            self.bookings(),
            services::bookings::update_status(self.client(), id, status),
            SliceAction::Updated,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_booking(&self, id: &BookingId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.bookings(),
            services::bookings::delete(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }
}
