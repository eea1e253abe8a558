//! Review submission.

use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Review, ReviewSubmission};
use tracing::instrument;

/// Submit a review; it stays pending until moderated.
#[instrument(skip(client), fields(product = %submission.product_id, rating = submission.rating))]
pub async fn submit(client: &ApiClient, submission: &ReviewSubmission) -> Result<Review> {
    Ok(client.post(user::REVIEWS, submission).await?.into_data()?)
}
