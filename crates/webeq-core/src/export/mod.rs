//! Filter settings export
//!
//! Formatting is pure; submission goes through the store service and only
//! ever reports a status back to the session.

mod format;

pub use format::{format_export, format_filter_line, format_header, DATE_FORMAT};

use crate::error::{StoreError, StoreResult};
use crate::services::StoreClient;

/// Product version written into the export header
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcome of the last export submission, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportStatus {
    #[default]
    NotSubmitted,
    Saved,
    Failed,
}

impl ExportStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            ExportStatus::Saved
        } else {
            ExportStatus::Failed
        }
    }
}

/// Send export text to the store for a user
///
/// Refused up front without a user id; no retry on failure.
pub async fn submit_export(
    client: &StoreClient,
    user_id: Option<&str>,
    text: &str,
) -> StoreResult<()> {
    let user_id = user_id
        .filter(|id| !id.is_empty())
        .ok_or(StoreError::MissingUserId)?;
    log::info!("submit_export: {} bytes for {}", text.len(), user_id);
    client.submit_export(user_id, text).await
}
