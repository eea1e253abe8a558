//! Storefront state container.

use std::future::Future;
use std::sync::Arc;

use shopdesk_api::{ApiClient, ApiError, Role};
use shopdesk_core::{
    Address, Banner, Blog, Booking, Category, Order, Product, Reducer, ResourceSlice, Review,
    User, ValueAction, ValueSlice,
};
use tokio::sync::RwLock;

use crate::cart::CartSlice;

/// Every slice the storefront surface reads, plus the client that feeds
/// them.
///
/// Created once at startup and passed to whatever needs it. Cheap to
/// clone; clones share slices. Each slice has its own lock, held only
/// while reducing, so actions on different slices never wait on each
/// other.
#[derive(Clone)]
pub struct StorefrontState {
    inner: Arc<StorefrontStateInner>,
}

struct StorefrontStateInner {
    client: ApiClient,
    auth: RwLock<ValueSlice<User>>,
    categories: RwLock<ResourceSlice<Category>>,
    products: RwLock<ResourceSlice<Product>>,
    reviews: RwLock<ResourceSlice<Review>>,
    banners: RwLock<ResourceSlice<Banner>>,
    blogs: RwLock<ResourceSlice<Blog>>,
    cart: RwLock<CartSlice>,
    orders: RwLock<ResourceSlice<Order>>,
    bookings: RwLock<ResourceSlice<Booking>>,
    addresses: RwLock<ResourceSlice<Address>>,
    contact: RwLock<ValueSlice<String>>,
}

impl StorefrontState {
    /// Create the container, restoring a persisted sign-in if one exists.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let mut auth = ValueSlice::default();
        let session = client.session();
        if session.is_signed_in(Role::User)
            && let Some(user) = session.record::<User>(Role::User)
        {
            tracing::debug!(user = %user.id, "restored storefront session");
            auth.reduce(ValueAction::Loaded(user));
        }

        Self {
            inner: Arc::new(StorefrontStateInner {
                client,
                auth: RwLock::new(auth),
                categories: RwLock::default(),
                products: RwLock::default(),
                reviews: RwLock::default(),
                banners: RwLock::default(),
                blogs: RwLock::default(),
                cart: RwLock::default(),
                orders: RwLock::default(),
                bookings: RwLock::default(),
                addresses: RwLock::default(),
                contact: RwLock::default(),
            }),
        }
    }

    /// The client actions call through.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Signed-in user.
    #[must_use]
    pub fn auth(&self) -> &RwLock<ValueSlice<User>> {
        &self.inner.auth
    }

    #[must_use]
    pub fn categories(&self) -> &RwLock<ResourceSlice<Category>> {
        &self.inner.categories
    }

    /// Product listing; `current` holds the product last opened.
    #[must_use]
    pub fn products(&self) -> &RwLock<ResourceSlice<Product>> {
        &self.inner.products
    }

    /// Reviews of the product last opened, plus any just submitted.
    #[must_use]
    pub fn reviews(&self) -> &RwLock<ResourceSlice<Review>> {
        &self.inner.reviews
    }

    #[must_use]
    pub fn banners(&self) -> &RwLock<ResourceSlice<Banner>> {
        &self.inner.banners
    }

    #[must_use]
    pub fn blogs(&self) -> &RwLock<ResourceSlice<Blog>> {
        &self.inner.blogs
    }

    #[must_use]
    pub fn cart(&self) -> &RwLock<CartSlice> {
        &self.inner.cart
    }

    #[must_use]
    pub fn orders(&self) -> &RwLock<ResourceSlice<Order>> {
        &self.inner.orders
    }

    #[must_use]
    pub fn bookings(&self) -> &RwLock<ResourceSlice<Booking>> {
        &self.inner.bookings
    }

    #[must_use]
    pub fn addresses(&self) -> &RwLock<ResourceSlice<Address>> {
        &self.inner.addresses
    }

    /// Acknowledgement of the last contact message.
    #[must_use]
    pub fn contact(&self) -> &RwLock<ValueSlice<String>> {
        &self.inner.contact
    }

    /// Whether a user token is stored.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.inner.client.session().is_signed_in(Role::User)
    }

    /// Run one request against `slice` through [`shopdesk_api::dispatch`].
    ///
    /// A 401 means the client already dropped the stored token, so the
    /// signed-in user is cleared as well.
    pub(crate) async fn dispatch<S, V, Fut, F>(
        &self,
        slice: &RwLock<S>,
        request: Fut,
        fulfil: F,
    ) -> Result<(), ApiError>
    where
        S: Reducer,
        Fut: Future<Output = Result<V, ApiError>>,
        F: FnOnce(V) -> S::Action,
    {
        let result = shopdesk_api::dispatch(slice, request, fulfil).await;
        if let Err(err) = &result {
            self.forget_on_unauthorized(err).await;
        }
        result
    }

    /// Clear the signed-in user if `err` is a 401.
    pub(crate) async fn forget_on_unauthorized(&self, err: &ApiError) {
        if matches!(err, ApiError::Unauthorized { .. }) {
            self.inner.auth.write().await.reduce(ValueAction::Cleared);
            tracing::warn!("unauthorized, signed-in user cleared");
        }
    }

    /// Return every slice to its initial value.
    pub async fn reset(&self) {
        let inner = &self.inner;
        inner.auth.write().await.reduce(ValueAction::Cleared);
        inner.categories.write().await.reset();
        inner.products.write().await.reset();
        inner.reviews.write().await.reset();
        inner.banners.write().await.reset();
        inner.blogs.write().await.reset();
        inner.cart.write().await.reset();
        inner.orders.write().await.reset();
        inner.bookings.write().await.reset();
        inner.addresses.write().await.reset();
        inner.contact.write().await.reduce(ValueAction::Cleared);
    }
}
