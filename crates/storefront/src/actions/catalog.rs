use shopdesk_api::ApiError;
use shopdesk_core::{BlogId, Product, ProductId, ProductQuery, SliceAction};
use tracing::instrument;

use crate::services;
use crate::state::StorefrontState;

impl StorefrontState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_categories(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.categories(),
            services::catalog::categories(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Replace the product listing with the products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn load_products(&self, query: &ProductQuery) -> Result<(), ApiError> {
        self.dispatch(
            self.products(),
            services::catalog::products(self.client(), query),
            SliceAction::Listed,
        )
        .await
    }

    /// Open one product; it becomes the product slice's `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn open_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.dispatch(
            self.products(),
            services::catalog::product(self.client(), id),
            SliceAction::Fetched,
        )
        .await
    }

    /// Loaded products whose name contains `needle`, ignoring case.
    pub async fn filter_products(&self, needle: &str) -> Vec<Product> {
        let needle = needle.trim();
        self.products()
            .read()
            .await
            .items
            .iter()
            .filter(|p| p.matches_text(needle))
            .cloned()
            .collect()
    }

    /// Load the reviews of one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_product_reviews(&self, id: &ProductId) -> Result<(), ApiError> {
        self.dispatch(
            self.reviews(),
            services::catalog::product_reviews(self.client(), id),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_banners(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.banners(),
            services::catalog::banners(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_blogs(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.blogs(),
            services::catalog::blogs(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Open one blog post; it becomes the blog slice's `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn open_blog(&self, id: &BlogId) -> Result<(), ApiError> {
        self.dispatch(
            self.blogs(),
            services::catalog::blog(self.client(), id),
            SliceAction::Fetched,
        )
        .await
    }
}
