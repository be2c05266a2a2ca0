//! Product catalog operations.

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::Filter;
use crate::record::Record;
use crate::traits::Query;

/// A product catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Product;

impl Entity for Product {
    const ENDPOINT: &'static str = "Products";
}

impl Query for Product {}

impl Product {
    pub async fn by_name(client: &AutotaskClient, name: &str) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("name", name).into()).await
    }

    pub async fn by_sku(client: &AutotaskClient, sku: &str) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("sku", sku).into()).await
    }
}
