use shopdesk_api::{ApiError, FilePart};
use shopdesk_core::{
    CategoryDraft, CategoryId, ProductDraft, ProductId, ProductQuery, SliceAction, VariantDraft,
    VariantId,
};
use tracing::instrument;

use crate::filters::toggle_expanded;
use crate::services;
use crate::state::AdminState;

fn require_name(name: &str, what: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation(format!("{what} name is required")));
    }
    Ok(())
}

impl AdminState {
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

    /// # Errors
    ///
    /// Returns an error if the name is empty or the request fails.
    pub async fn create_category(
        &self,
        draft: CategoryDraft,
        image: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_name(&draft.name, "category")?;
            services::catalog::create_category(client, &draft, image).await
        };
        self.dispatch(self.categories(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if the name is empty or the request fails.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        draft: CategoryDraft,
        image: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_name(&draft.name, "category")?;
            services::catalog::update_category(client, id, &draft, image).await
        };
        self.dispatch(self.categories(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.categories(),
            services::catalog::delete_category(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

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
    pub async fn open_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.dispatch(
            self.products(),
            services::catalog::product(self.client(), id),
            SliceAction::Fetched,
        )
        .await
    }

    /// Create a product, uploading `images` alongside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the request fails.
    pub async fn create_product(
        &self,
        draft: ProductDraft,
        images: Vec<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_name(&draft.name, "product")?;
            services::catalog::create_product(client, &draft, images).await
        };
        self.dispatch(self.products(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if the name is empty or the request fails.
    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: ProductDraft,
        images: Vec<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_name(&draft.name, "product")?;
            services::catalog::update_product(client, id, &draft, images).await
        };
        self.dispatch(self.products(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.products(),
            services::catalog::delete_product(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// Edit one variant; the returned product is spliced in by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_variant(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
        draft: VariantDraft,
    ) -> Result<(), ApiError> {
        self.dispatch(
            self.products(),
            services::catalog::update_variant(self.client(), product_id, variant_id, &draft),
            SliceAction::Updated,
        )
        .await
    }

    /// Expand a variant row, collapsing whichever was open. Returns
    /// whether `id` is expanded afterwards.
    pub async fn toggle_variant(&self, id: VariantId) -> bool {
        toggle_expanded(&mut *self.expanded_variant().write().await, id)
    }
}
