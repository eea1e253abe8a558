//! Blogs and banners.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, FilePart, Payload, Result};
use shopdesk_core::{Banner, BannerDraft, BannerId, Blog, BlogDraft, BlogId, Listing};

pub async fn blogs(client: &ApiClient) -> Result<Listing<Blog>> {
    Ok(client.get(admin::BLOGS).await?.into_listing()?)
}

pub async fn create_blog(client: &ApiClient, draft: &BlogDraft, image: Option<FilePart>) -> Result<Blog> {
    let payload = Payload::with_files(draft, image.into_iter().collect())?;
    Ok(client.post_payload(admin::BLOGS, &payload).await?.into_data()?)
}

pub async fn update_blog(
    client: &ApiClient,
    id: &BlogId,
    draft: &BlogDraft,
    image: Option<FilePart>,
) -> Result<Blog> {
    let payload = Payload::with_files(draft, image.into_iter().collect())?;
    Ok(client
        .put_payload(&admin::blog(id.as_str()), &payload)
        .await?
        .into_data()?)
}

pub async fn delete_blog(client: &ApiClient, id: &BlogId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::blog(id.as_str()))
        .await?
        .into_ack()?)
}

pub async fn banners(client: &ApiClient) -> Result<Listing<Banner>> {
    Ok(client.get(admin::BANNERS).await?.into_listing()?)
}

pub async fn create_banner(
    client: &ApiClient,
    draft: &BannerDraft,
    image: Option<FilePart>,
) -> Result<Banner> {
    let payload = Payload::with_files(draft, image.into_iter().collect())?;
    Ok(client.post_payload(admin::BANNERS, &payload).await?.into_data()?)
}

pub async fn update_banner(
    client: &ApiClient,
    id: &BannerId,
    draft: &BannerDraft,
    image: Option<FilePart>,
) -> Result<Banner> {
    let payload = Payload::with_files(draft, image.into_iter().collect())?;
    Ok(client
        .put_payload(&admin::banner(id.as_str()), &payload)
        .await?
        .into_data()?)
}

pub async fn delete_banner(client: &ApiClient, id: &BannerId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::banner(id.as_str()))
        .await?
        .into_ack()?)
}
