//! Time entry operations.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::{Filter, Search};
use crate::record::Record;
use crate::traits::Query;

/// A logged unit of work against a ticket or task.
#[derive(Debug, Clone, Copy)]
pub struct TimeEntry;

impl Entity for TimeEntry {
    const ENDPOINT: &'static str = "TimeEntries";
}

impl Query for TimeEntry {}

impl TimeEntry {
    /// Entries a resource worked after the given time.
    pub async fn by_resource_since(
        client: &AutotaskClient,
        resource_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Record>> {
        let search = Search::from(Filter::eq("resourceID", resource_id.to_string())).and(
            Filter::gt("dateWorked", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        Self::query(client, &search).await
    }
}
