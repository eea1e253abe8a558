//! Shipping-label downloads.
//!
//! A label is a document served per order. Downloading one writes it to a
//! directory and records the order id in the persisted session so the
//! order table can mark it as already printed.

use std::path::{Path, PathBuf};

use shopdesk_api::ApiError;
use shopdesk_core::OrderId;
use tracing::{info, instrument};

use crate::services;
use crate::state::AdminState;

/// File name a label for `order_id` is saved under.
///
/// ASCII letters, digits and `-` are kept. Every other byte, `_`
/// included, becomes `_` plus two hex digits, so distinct ids never share
/// a file and no id can escape the target directory.
#[must_use]
pub fn label_file_name(order_id: &OrderId) -> String {
    let mut stem = String::with_capacity(order_id.as_str().len());
    for byte in order_id.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02X}"));
        }
    }
    format!("label-{stem}.pdf")
}

impl AdminState {
    /// Fetch the label for an order, write it under `dir`, and remember
    /// the download. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the file cannot be written,
    /// or the session cannot record the download.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub async fn download_label(&self, order_id: &OrderId, dir: &Path) -> Result<PathBuf, ApiError> {
        let bytes = match services::orders::label(self.client(), order_id).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.forget_on_unauthorized(&err).await;
                return Err(err);
            }
        };
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(label_file_name(order_id));
        tokio::fs::write(&path, &bytes).await?;

        let first = self
            .client()
            .session()
            .mark_label_downloaded(order_id.as_str())?;
        info!(path = %path.display(), bytes = bytes.len(), first, "label saved");
        Ok(path)
    }

    /// Whether a label for this order has been downloaded before.
    #[must_use]
    pub fn is_label_downloaded(&self, order_id: &OrderId) -> bool {
        self.client()
            .session()
            .downloaded_labels()
            .iter()
            .any(|id| id == order_id.as_str())
    }

    /// Every order id whose label has been downloaded, oldest first.
    #[must_use]
    pub fn downloaded_labels(&self) -> Vec<OrderId> {
        self.client()
            .session()
            .downloaded_labels()
            .into_iter()
            .map(OrderId::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_file_name_is_sanitized() {
        assert_eq!(
            label_file_name(&OrderId::new("64f0c2a9e1")),
            "label-64f0c2a9e1.pdf"
        );
        assert_eq!(
            label_file_name(&OrderId::new("../etc/passwd")),
            "label-_2E_2E_2Fetc_2Fpasswd.pdf"
        );
    }

    #[test]
    fn test_label_file_names_do_not_collide() {
        let slash = label_file_name(&OrderId::new("a/b"));
        let underscore = label_file_name(&OrderId::new("a_b"));
        assert_eq!(slash, "label-a_2Fb.pdf");
        assert_eq!(underscore, "label-a_5Fb.pdf");
        assert_ne!(slash, underscore);
    }
}
