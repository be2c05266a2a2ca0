//! Configuration item operations, including the upsert-by-natural-key
//! flows used by device inventory automation.

use chrono::Utc;
use serde::Serialize;

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::{AutotaskError, Result};
use crate::filter::Filter;
use crate::record::{ItemRef, Record, UserDefinedField};
use crate::traits::{Create, Query, Update};

/// A tracked device or asset belonging to a company.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationItem;

impl Entity for ConfigurationItem {
    const ENDPOINT: &'static str = "ConfigurationItems";
}

impl Query for ConfigurationItem {}
impl Create for ConfigurationItem {}
impl Update for ConfigurationItem {}

/// Fields for a configuration item being pushed from automation.
#[derive(Debug, Clone, Serialize)]
pub struct NewConfigurationItem {
    #[serde(rename = "configurationItemCategoryID")]
    pub category_id: i64,
    #[serde(rename = "companyID")]
    pub company_id: i64,
    #[serde(rename = "configurationItemType")]
    pub item_type: i64,
    #[serde(rename = "productID")]
    pub product_id: i64,
    #[serde(rename = "referenceTitle")]
    pub reference_title: String,
}

impl NewConfigurationItem {
    fn to_record(&self) -> Result<Record> {
        Record::from_value(serde_json::to_value(self)?)
    }
}

impl ConfigurationItem {
    /// Find configuration items by serial number.
    pub async fn by_serial(client: &AutotaskClient, serial_number: &str) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("serialNumber", serial_number).into()).await
    }

    /// Find a configuration item by id.
    pub async fn by_id(client: &AutotaskClient, id: i64) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("id", id.to_string()).into()).await
    }

    /// Fetch the user-defined-field metadata for configuration items.
    pub async fn udf_info(client: &AutotaskClient) -> Result<Vec<Record>> {
        client.udf_info(Self::ENDPOINT).await
    }

    /// Upsert a raw payload.
    ///
    /// A payload without an `id` is created first (the vendor rejects
    /// creates carrying `userDefinedFields`, so those are held back), then
    /// the UDFs are attached on the closing update along with the id.
    pub async fn push(client: &AutotaskClient, mut item: Record) -> Result<ItemRef> {
        item.insert("isActive", true);
        if item.id().is_none() {
            let udf = item.take_user_defined_fields();
            let created = Self::create(client, &item).await?;
            item.insert("id", created.item_id);
            if let Some(udf) = udf {
                item.set_user_defined_fields(udf);
            }
        }
        Self::update(client, &item).await
    }

    /// Create or update a configuration item keyed by serial number.
    ///
    /// Searches for an existing item with the serial; creates one when
    /// none matches, otherwise reuses the match's id. User-defined fields
    /// are attached on the closing update either way, so repeated
    /// automation runs converge on one record instead of piling up
    /// duplicates.
    pub async fn push_by_serial(
        client: &AutotaskClient,
        item: &NewConfigurationItem,
        serial_number: &str,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        let mut payload = item.to_record()?;
        payload
            .insert("isActive", true)
            .insert("serialNumber", serial_number)
            .insert(
                "installDate",
                Utc::now().format("%Y-%m-%dT%H:%M:%S.000000Z").to_string(),
            );

        let matches = Self::by_serial(client, serial_number).await?;
        Self::finish_push(client, payload, matches, udf).await
    }

    /// Create or update a configuration item keyed by hostname.
    ///
    /// Looks up the `dattoHostname` field first, then falls back to the
    /// user-defined `name` field for devices provisioned without one.
    pub async fn push_by_hostname(
        client: &AutotaskClient,
        item: &NewConfigurationItem,
        hostname: &str,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        let mut payload = item.to_record()?;
        payload.insert("isActive", true);

        let mut matches =
            Self::query(client, &Filter::eq("dattoHostname", hostname).into()).await?;
        if matches.is_empty() {
            matches = Self::query(client, &Filter::eq("name", hostname).udf().into()).await?;
        }
        Self::finish_push(client, payload, matches, udf).await
    }

    async fn finish_push(
        client: &AutotaskClient,
        mut payload: Record,
        matches: Vec<Record>,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        match matches.first() {
            Some(existing) => {
                let id = existing.id().ok_or_else(|| {
                    AutotaskError::UnexpectedResponse(
                        "matched configuration item has no id".to_string(),
                    )
                })?;
                payload.insert("id", id);
            }
            None => {
                let created = Self::create(client, &payload).await?;
                payload.insert("id", created.item_id);
            }
        }
        payload.set_user_defined_fields(serde_json::to_value(udf)?);
        Self::update(client, &payload).await
    }

    /// Replace a configuration item's user-defined fields, keeping it
    /// active and pinned to a product.
    pub async fn update_udf(
        client: &AutotaskClient,
        ci_id: i64,
        product_id: i64,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        let mut payload = Record::new();
        payload
            .insert("id", ci_id)
            .insert("isActive", true)
            .insert("productID", product_id);
        payload.set_user_defined_fields(serde_json::to_value(udf)?);
        Self::update(client, &payload).await
    }

    /// Replace only the user-defined fields, leaving everything else
    /// untouched.
    pub async fn update_udf_only(
        client: &AutotaskClient,
        company_id: i64,
        ci_id: i64,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        let mut payload = Record::new();
        payload.insert("id", ci_id).insert("companyID", company_id);
        payload.set_user_defined_fields(serde_json::to_value(udf)?);
        Self::update(client, &payload).await
    }
}

/// Configuration item type catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationItemType;

impl Entity for ConfigurationItemType {
    const ENDPOINT: &'static str = "ConfigurationItemTypes";
}

impl Query for ConfigurationItemType {}

impl ConfigurationItemType {
    pub async fn by_name(client: &AutotaskClient, name: &str) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("name", name).into()).await
    }
}

/// Configuration item category catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationItemCategory;

impl Entity for ConfigurationItemCategory {
    const ENDPOINT: &'static str = "ConfigurationItemCategories";
}

impl Query for ConfigurationItemCategory {}

impl ConfigurationItemCategory {
    pub async fn by_name(client: &AutotaskClient, name: &str) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("name", name).into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_configuration_item_uses_vendor_field_names() {
        let item = NewConfigurationItem {
            category_id: 3,
            company_id: 42,
            item_type: 1,
            product_id: 900,
            reference_title: "edge-router".to_string(),
        };
        let record = item.to_record().unwrap();

        assert_eq!(record.get_i64("configurationItemCategoryID"), Some(3));
        assert_eq!(record.get_i64("companyID"), Some(42));
        assert_eq!(record.get_i64("configurationItemType"), Some(1));
        assert_eq!(record.get_i64("productID"), Some(900));
        assert_eq!(record.get_str("referenceTitle"), Some("edge-router"));
    }
}
