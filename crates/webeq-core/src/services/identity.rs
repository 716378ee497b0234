//! Anonymous user id bootstrap

use super::client::StoreClient;
use crate::error::StoreResult;

/// Reuse a stored id the store still knows, otherwise allocate a new one
pub async fn ensure_user_id(client: &StoreClient, stored: Option<&str>) -> StoreResult<String> {
    if let Some(user_id) = stored.filter(|id| !id.is_empty()) {
        if client.user_exists(user_id).await? {
            log::info!("ensure_user_id: reusing {}", user_id);
            return Ok(user_id.to_string());
        }
        log::warn!("ensure_user_id: {} unknown to the store, allocating a new id", user_id);
    }

    let user_id = client.allocate_user_id().await?;
    log::info!("ensure_user_id: allocated {}", user_id);
    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemoryStore, StoreService};

    #[tokio::test]
    async fn test_known_id_is_reused() {
        let store = MemoryStore::new();
        store.insert_user("0123456789abcdef0123456789abcdef");
        let mut handle = StoreService::spawn(store).unwrap();
        let client = StoreClient::new(&handle);

        let id = ensure_user_id(&client, Some("0123456789abcdef0123456789abcdef"))
            .await
            .unwrap();
        assert_eq!(id, "0123456789abcdef0123456789abcdef");

        client.shutdown().unwrap();
        handle.join();
    }

    #[tokio::test]
    async fn test_missing_or_unknown_id_allocates() {
        let mut handle = StoreService::spawn(MemoryStore::new()).unwrap();
        let client = StoreClient::new(&handle);

        let fresh = ensure_user_id(&client, None).await.unwrap();
        assert_eq!(fresh.len(), 32);

        let replaced = ensure_user_id(&client, Some("stale")).await.unwrap();
        assert_ne!(replaced, "stale");
        assert_ne!(replaced, fresh);
        assert!(client.user_exists(&replaced).await.unwrap());

        client.shutdown().unwrap();
        handle.join();
    }
}
