//! Contract operations.

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::{Filter, Search};
use crate::record::Record;
use crate::traits::Query;

/// A service contract.
#[derive(Debug, Clone, Copy)]
pub struct Contract;

impl Entity for Contract {
    const ENDPOINT: &'static str = "Contracts";
}

impl Query for Contract {}

impl Contract {
    /// Contracts belonging to a company.
    pub async fn by_company(client: &AutotaskClient, company_id: i64) -> Result<Vec<Record>> {
        Self::query(client, &Filter::eq("companyID", company_id.to_string()).into()).await
    }

    /// Every contract, active or not.
    pub async fn all(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::from(Filter::exist("id"))).await
    }
}

/// A billing rate attached to a contract.
#[derive(Debug, Clone, Copy)]
pub struct ContractRate;

impl Entity for ContractRate {
    const ENDPOINT: &'static str = "ContractRates";
}

impl Query for ContractRate {}

impl ContractRate {
    /// Every contract rate.
    pub async fn all(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::from(Filter::exist("id"))).await
    }
}
