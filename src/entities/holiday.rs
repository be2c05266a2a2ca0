//! Holiday calendar operations.

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::{Filter, Search};
use crate::record::Record;
use crate::traits::Query;

/// A named set of holidays attached to internal locations.
#[derive(Debug, Clone, Copy)]
pub struct HolidaySet;

impl Entity for HolidaySet {
    const ENDPOINT: &'static str = "HolidaySets";
}

impl Query for HolidaySet {}

impl HolidaySet {
    /// Every holiday set.
    pub async fn all(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::from(Filter::gt("id", "0"))).await
    }
}

/// A single holiday within a set.
#[derive(Debug, Clone, Copy)]
pub struct Holiday;

impl Entity for Holiday {
    const ENDPOINT: &'static str = "Holidays";
}

impl Query for Holiday {}

impl Holiday {
    /// Every holiday.
    pub async fn all(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::from(Filter::gt("id", "0"))).await
    }
}
