//! Update trait for PATCHing existing records.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::record::ItemRef;

/// Update an existing entity record.
///
/// The record id travels inside the payload, per the vendor's PATCH
/// contract.
///
/// # Example
///
/// ```ignore
/// use autotask_api::{AutotaskClient, Record, Update, Company};
///
/// let client = AutotaskClient::from_env()?;
/// let mut payload = Record::new();
/// payload.insert("id", 42).insert("isActive", true);
/// Company::update(&client, &payload).await?;
/// ```
#[async_trait]
pub trait Update: Entity {
    /// PATCH the payload, returning the vendor's `{"itemId": N}`
    /// acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the
    /// payload.
    async fn update<B>(client: &AutotaskClient, payload: &B) -> Result<ItemRef>
    where
        B: Serialize + Sync + ?Sized,
    {
        client.update(Self::ENDPOINT, payload).await
    }
}
