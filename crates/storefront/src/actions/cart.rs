use shopdesk_api::ApiError;
use shopdesk_core::{
    AddressId, CartAddition, CartItemId, Order, OrderPlacement, Reducer, SliceAction,
};
use tracing::{info, instrument};

use crate::cart::CartAction;
use crate::services;
use crate::state::StorefrontState;

impl StorefrontState {
    /// Fetch the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_cart(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.cart(),
            services::cart::cart(self.client()),
            CartAction::Loaded,
        )
        .await
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is zero or the request fails.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, addition: CartAddition) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            if addition.quantity == 0 {
                return Err(ApiError::Validation("quantity must be at least 1".to_string()));
            }
            services::cart::add(client, &addition).await
        };
        self.dispatch(self.cart(), request, CartAction::Added).await
    }

    /// Change a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is zero or the request fails.
    #[instrument(skip(self))]
    pub async fn update_cart_item(&self, id: &CartItemId, quantity: u32) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            if quantity == 0 {
                return Err(ApiError::Validation("quantity must be at least 1".to_string()));
            }
            services::cart::update_quantity(client, id, quantity).await
        };
        self.dispatch(self.cart(), request, CartAction::Updated).await
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn remove_cart_item(&self, id: &CartItemId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.cart(),
            services::cart::remove(self.client(), id),
            move |_| CartAction::Removed(removed),
        )
        .await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.cart(),
            services::cart::clear(self.client()),
            |_| CartAction::Emptied,
        )
        .await
    }

    pub async fn select_cart_item(&self, id: CartItemId) {
        self.cart().write().await.reduce(CartAction::Select(id));
    }

    pub async fn deselect_cart_item(&self, id: CartItemId) {
        self.cart().write().await.reduce(CartAction::Deselect(id));
    }

    pub async fn toggle_cart_item(&self, id: CartItemId) {
        self.cart().write().await.reduce(CartAction::Toggle(id));
    }

    pub async fn select_all_cart_items(&self) {
        self.cart().write().await.reduce(CartAction::SelectAll);
    }

    /// Place an order for the selected lines, then fetch the cart again.
    ///
    /// The two requests are independent: if the order is placed but the
    /// refresh fails, the order stands and the cart slice carries the
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or either request fails.
    #[instrument(skip(self, payment_method))]
    pub async fn checkout(
        &self,
        address_id: AddressId,
        payment_method: impl Into<String>,
    ) -> Result<Order, ApiError> {
        let placement = OrderPlacement {
            cart_item_ids: self.cart().read().await.selected_ids(),
            address_id,
            payment_method: payment_method.into(),
        };

        let client = self.client();
        let request = async {
            if placement.cart_item_ids.is_empty() {
                return Err(ApiError::Validation(
                    "select at least one cart item to check out".to_string(),
                ));
            }
            services::orders::place(client, &placement).await
        };

        let mut placed = None;
        self.dispatch(self.orders(), request, |order: Order| {
            placed = Some(order.clone());
            SliceAction::Created(order)
        })
        .await?;
        let order = placed.ok_or_else(|| ApiError::Parse("order missing from response".to_string()))?;
        info!(order = order.reference(), total = %order.total_amount, "order placed");

        self.load_cart().await?;
        Ok(order)
    }
}
