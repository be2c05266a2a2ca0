//! Company operations.

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::{Filter, Search};
use crate::record::{ItemRef, Record, UserDefinedField};
use crate::traits::{Query, Update};

/// A customer organization.
#[derive(Debug, Clone, Copy)]
pub struct Company;

impl Entity for Company {
    const ENDPOINT: &'static str = "Companies";
}

impl Query for Company {}
impl Update for Company {}

impl Company {
    /// Replace a company's user-defined fields, keeping it active.
    pub async fn update_udf(
        client: &AutotaskClient,
        company_id: i64,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        let mut payload = Record::new();
        payload.insert("id", company_id).insert("isActive", true);
        payload.set_user_defined_fields(serde_json::to_value(udf)?);
        Self::update(client, &payload).await
    }

    /// Fetch a company's alerts from the `Companies/{id}/Alerts` child
    /// route.
    pub async fn alerts(client: &AutotaskClient, company_id: i64) -> Result<Vec<Record>> {
        client
            .read(&format!("Companies/{company_id}/Alerts"))
            .await?
            .into_items()
    }

    /// Create an alert on a company, but only when it has none yet.
    ///
    /// Returns `None` when an alert already exists and nothing was sent.
    pub async fn push_alert(
        client: &AutotaskClient,
        company_id: i64,
        alert: &Record,
    ) -> Result<Option<ItemRef>> {
        let existing = Self::alerts(client, company_id).await?;
        if !existing.is_empty() {
            return Ok(None);
        }
        let created = client
            .create(&format!("Companies/{company_id}/Alerts"), alert)
            .await?;
        Ok(Some(created))
    }
}

/// An alert banner attached to a company.
#[derive(Debug, Clone, Copy)]
pub struct CompanyAlert;

impl Entity for CompanyAlert {
    const ENDPOINT: &'static str = "CompanyAlerts";
}

impl Query for CompanyAlert {}

impl CompanyAlert {
    /// Every alert across all companies.
    pub async fn all(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::from(Filter::exist("id"))).await
    }
}
