//! Ticket operations, including deduplicated alert-ticket creation.

use serde::Serialize;

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::{Filter, Search};
use crate::record::{ItemRef, Record};
use crate::traits::{Create, Query};

/// A service ticket.
#[derive(Debug, Clone, Copy)]
pub struct Ticket;

impl Entity for Ticket {
    const ENDPOINT: &'static str = "Tickets";
}

impl Query for Ticket {}
impl Create for Ticket {}

/// Fields for a new ticket.
#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    #[serde(rename = "configurationItemID")]
    pub configuration_item_id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "issueType")]
    pub issue_type: String,
    pub priority: String,
    pub source: String,
    pub status: String,
    #[serde(rename = "queueID")]
    pub queue_id: String,
}

impl NewTicket {
    /// A monitoring-alert ticket with the standard alert classification:
    /// new status, critical priority, monitoring source, on the alert
    /// queue.
    pub fn alert(
        company_id: i64,
        configuration_item_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            company_id,
            configuration_item_id,
            title: title.into(),
            description: description.into(),
            issue_type: "14".to_string(),
            priority: "1".to_string(),
            source: "8".to_string(),
            status: "1".to_string(),
            queue_id: "8".to_string(),
        }
    }
}

/// What a deduplicated alert call did.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// No matching open ticket existed; one was created.
    Created(ItemRef),
    /// A ticket with the same configuration item and title already
    /// existed; it is returned and nothing was created.
    Existing(Record),
}

impl Ticket {
    /// Create a ticket from an arbitrary payload.
    pub async fn add(client: &AutotaskClient, params: &Record) -> Result<ItemRef> {
        Self::create(client, params).await
    }

    /// Create an alert ticket for a configuration item unless one with the
    /// same title already exists.
    ///
    /// Monitoring triggers re-fire while a device stays down; the lookup
    /// costs one query round trip and keeps the queue to a single ticket
    /// per incident.
    pub async fn alert(
        client: &AutotaskClient,
        company_id: i64,
        configuration_item_id: i64,
        title: &str,
        description: &str,
    ) -> Result<AlertOutcome> {
        let search = Search::from(Filter::eq(
            "configurationItemID",
            configuration_item_id.to_string(),
        ))
        .and(Filter::eq("title", title));

        let mut existing = Self::query(client, &search).await?;
        if !existing.is_empty() {
            return Ok(AlertOutcome::Existing(existing.remove(0)));
        }

        let params = NewTicket::alert(company_id, configuration_item_id, title, description);
        let created = Self::create(client, &params).await?;
        Ok(AlertOutcome::Created(created))
    }

    /// Tickets sitting in the new/unassigned status.
    pub async fn new_unassigned(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("status", "1").into()).await
    }

    pub async fn by_id(client: &AutotaskClient, ticket_id: i64) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("id", ticket_id.to_string()).into()).await
    }

    pub async fn by_number(client: &AutotaskClient, ticket_number: &str) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("ticketNumber", ticket_number).into()).await
    }

    /// Fetch the ticket entity's field metadata, e.g. to map issue-type
    /// names to ids.
    pub async fn field_info(client: &AutotaskClient) -> Result<Vec<Record>> {
        client.field_info(Self::ENDPOINT).await
    }
}
