//! Dispatch calendar operations: appointments and service calls.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::{Filter, Search};
use crate::record::Record;
use crate::traits::Query;

fn start_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Search {
    Search::from(Filter::gte(
        "startDateTime",
        start.to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
    .and(Filter::lt(
        "startDateTime",
        end.to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}

/// A calendar appointment.
#[derive(Debug, Clone, Copy)]
pub struct Appointment;

impl Entity for Appointment {
    const ENDPOINT: &'static str = "Appointments";
}

impl Query for Appointment {}

impl Appointment {
    /// Appointments starting within `[start, end)`.
    pub async fn between(
        client: &AutotaskClient,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Record>> {
        Self::query(client, &start_date_range(start, end)).await
    }

    /// Every appointment with a start time: past, present, and future.
    pub async fn all(client: &AutotaskClient) -> Result<Vec<Record>> {
        Self::query(client, &Search::from(Filter::exist("startDateTime"))).await
    }
}

/// A scheduled on-site or remote service call.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCall;

impl Entity for ServiceCall {
    const ENDPOINT: &'static str = "ServiceCalls";
}

impl Query for ServiceCall {}

impl ServiceCall {
    /// Service calls starting within `[start, end)`.
    pub async fn between(
        client: &AutotaskClient,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Record>> {
        Self::query(client, &start_date_range(start, end)).await
    }

    /// Incomplete service calls started after the given time.
    pub async fn incomplete_since(
        client: &AutotaskClient,
        since: DateTime<Utc>,
    ) -> Result<Vec<Record>> {
        let search = Search::from(Filter::eq("isComplete", "0")).and(Filter::gt(
            "startDateTime",
            since.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        Self::query(client, &search).await
    }
}
