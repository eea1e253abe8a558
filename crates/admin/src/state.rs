//! Admin state container.

use std::future::Future;
use std::sync::Arc;

use shopdesk_api::{ApiClient, ApiError, Role};
use shopdesk_core::{
    Admin, Banner, Blog, Booking, Category, Contact, Driver, Order, Product, Reducer,
    ResourceSlice, Review, StockItem, User, ValueAction, ValueSlice, VariantId,
};
use tokio::sync::RwLock;

/// Every slice the administrative surface reads.
///
/// Cheap to clone; clones share slices. Created once at startup and reset
/// on logout.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

struct AdminStateInner {
    client: ApiClient,
    auth: RwLock<ValueSlice<Admin>>,
    admins: RwLock<ResourceSlice<Admin>>,
    categories: RwLock<ResourceSlice<Category>>,
    products: RwLock<ResourceSlice<Product>>,
    expanded_variant: RwLock<Option<VariantId>>,
    orders: RwLock<ResourceSlice<Order>>,
    bookings: RwLock<ResourceSlice<Booking>>,
    blogs: RwLock<ResourceSlice<Blog>>,
    banners: RwLock<ResourceSlice<Banner>>,
    drivers: RwLock<ResourceSlice<Driver>>,
    reviews: RwLock<ResourceSlice<Review>>,
    contacts: RwLock<ResourceSlice<Contact>>,
    stock: RwLock<ResourceSlice<StockItem>>,
    users: RwLock<ResourceSlice<User>>,
}

impl AdminState {
    /// Create the container, restoring a persisted admin sign-in.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let mut auth = ValueSlice::default();
        let session = client.session();
        if session.is_signed_in(Role::Admin)
            && let Some(admin) = session.record::<Admin>(Role::Admin)
        {
            tracing::debug!(admin = %admin.id, "restored admin session");
            auth.reduce(ValueAction::Loaded(admin));
        }

        Self {
            inner: Arc::new(AdminStateInner {
                client,
                auth: RwLock::new(auth),
                admins: RwLock::default(),
                categories: RwLock::default(),
                products: RwLock::default(),
                expanded_variant: RwLock::default(),
                orders: RwLock::default(),
                bookings: RwLock::default(),
                blogs: RwLock::default(),
                banners: RwLock::default(),
                drivers: RwLock::default(),
                reviews: RwLock::default(),
                contacts: RwLock::default(),
                stock: RwLock::default(),
                users: RwLock::default(),
            }),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Signed-in admin.
    #[must_use]
    pub fn auth(&self) -> &RwLock<ValueSlice<Admin>> {
        &self.inner.auth
    }

    /// Admin accounts.
    #[must_use]
    pub fn admins(&self) -> &RwLock<ResourceSlice<Admin>> {
        &self.inner.admins
    }

    #[must_use]
    pub fn categories(&self) -> &RwLock<ResourceSlice<Category>> {
        &self.inner.categories
    }

    #[must_use]
    pub fn products(&self) -> &RwLock<ResourceSlice<Product>> {
        &self.inner.products
    }

    /// The one variant row currently expanded in the product table.
    #[must_use]
    pub fn expanded_variant(&self) -> &RwLock<Option<VariantId>> {
        &self.inner.expanded_variant
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
    pub fn blogs(&self) -> &RwLock<ResourceSlice<Blog>> {
        &self.inner.blogs
    }

    #[must_use]
    pub fn banners(&self) -> &RwLock<ResourceSlice<Banner>> {
        &self.inner.banners
    }

    #[must_use]
    pub fn drivers(&self) -> &RwLock<ResourceSlice<Driver>> {
        &self.inner.drivers
    }

    #[must_use]
    pub fn reviews(&self) -> &RwLock<ResourceSlice<Review>> {
        &self.inner.reviews
    }

    #[must_use]
    pub fn contacts(&self) -> &RwLock<ResourceSlice<Contact>> {
        &self.inner.contacts
    }

    #[must_use]
    pub fn stock(&self) -> &RwLock<ResourceSlice<StockItem>> {
        &self.inner.stock
    }

    /// End-user accounts.
    #[must_use]
    pub fn users(&self) -> &RwLock<ResourceSlice<User>> {
        &self.inner.users
    }

    /// Whether an admin token is stored.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.inner.client.session().is_signed_in(Role::Admin)
    }

    /// Run one request against `slice` through [`shopdesk_api::dispatch`].
    ///
    /// A 401 means the client already dropped the stored token, so the
    /// signed-in admin is cleared as well.
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

    /// Clear the signed-in admin if `err` is a 401.
    pub(crate) async fn forget_on_unauthorized(&self, err: &ApiError) {
        if matches!(err, ApiError::Unauthorized { .. }) {
            self.inner.auth.write().await.reduce(ValueAction::Cleared);
            tracing::warn!("unauthorized, signed-in admin cleared");
        }
    }

    /// Return every slice to its initial value.
    pub async fn reset(&self) {
        let inner = &self.inner;
        inner.auth.write().await.reduce(ValueAction::Cleared);
        inner.admins.write().await.reset();
        inner.categories.write().await.reset();
        inner.products.write().await.reset();
        *inner.expanded_variant.write().await = None;
        inner.orders.write().await.reset();
        inner.bookings.write().await.reset();
        inner.blogs.write().await.reset();
        inner.banners.write().await.reset();
        inner.drivers.write().await.reset();
        inner.reviews.write().await.reset();
        inner.contacts.write().await.reset();
        inner.stock.write().await.reset();
        inner.users.write().await.reset();
    }
}
