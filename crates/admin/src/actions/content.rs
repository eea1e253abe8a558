use shopdesk_api::{ApiError, FilePart};
use shopdesk_core::{BannerDraft, BannerId, BlogDraft, BlogId, SliceAction};

use crate::services;
use crate::state::AdminState;

fn require_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    Ok(())
}

impl AdminState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_blogs(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.blogs(),
            services::content::blogs(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the title is empty or the request fails.
    pub async fn create_blog(&self, draft: BlogDraft, image: Option<FilePart>) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_title(&draft.title)?;
            services::content::create_blog(client, &draft, image).await
        };
        self.dispatch(self.blogs(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if the title is empty or the request fails.
    pub async fn update_blog(
        &self,
        id: &BlogId,
        draft: BlogDraft,
        image: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_title(&draft.title)?;
            services::content::update_blog(client, id, &draft, image).await
        };
        self.dispatch(self.blogs(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_blog(&self, id: &BlogId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.blogs(),
            services::content::delete_blog(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_banners(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.banners(),
            services::content::banners(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the title is empty or the request fails.
    pub async fn create_banner(
        &self,
        draft: BannerDraft,
        image: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_title(&draft.title)?;
            services::content::create_banner(client, &draft, image).await
        };
        self.dispatch(self.banners(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if the title is empty or the request fails.
    pub async fn update_banner(
        &self,
        id: &BannerId,
        draft: BannerDraft,
        image: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            require_title(&draft.title)?;
            services::content::update_banner(client, id, &draft, image).await
        };
        self.dispatch(self.banners(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_banner(&self, id: &BannerId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.banners(),
            services::content::delete_banner(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }
}
