//! Create trait for POSTing new records.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::record::ItemRef;

/// Create a new entity record.
///
/// Implement this trait for entity types whose endpoint accepts POST.
/// Creates are not idempotent and are never retried.
#[async_trait]
pub trait Create: Entity {
    /// POST the payload, returning the vendor's `{"itemId": N}`
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the
    /// payload.
    async fn create<B>(client: &AutotaskClient, payload: &B) -> Result<ItemRef>
    where
        B: Serialize + Sync + ?Sized,
    {
        client.create(Self::ENDPOINT, payload).await
    }
}
