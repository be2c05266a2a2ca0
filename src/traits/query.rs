//! Query trait for filtered list reads.

use async_trait::async_trait;

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::Search;
use crate::record::Record;

/// Run filtered list queries against an entity endpoint.
///
/// Implement this trait for entity types whose endpoint supports
/// `/query?search=...`. All pages of the response are fetched and merged
/// in order.
///
/// # Example
///
/// ```ignore
/// use autotask_api::{AutotaskClient, Filter, Query, Search, Ticket};
///
/// let client = AutotaskClient::from_env()?;
/// let open = Ticket::query(&client, &Search::from(Filter::eq("status", "1"))).await?;
/// ```
#[async_trait]
pub trait Query: Entity {
    /// Fetch all records matching the search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or any page fetch fails.
    async fn query(client: &AutotaskClient, search: &Search) -> Result<Vec<Record>> {
        client.query(Self::ENDPOINT, search).await
    }

    /// Fetch records with the implicit `isActive eq 1` filter.
    async fn query_active(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::default()).await
    }
}
