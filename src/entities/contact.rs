//! Contact operations.

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::record::{ItemRef, Record, UserDefinedField};
use crate::traits::Query;

/// A person at a customer organization.
#[derive(Debug, Clone, Copy)]
pub struct Contact;

impl Entity for Contact {
    const ENDPOINT: &'static str = "Contacts";
}

impl Query for Contact {}

impl Contact {
    /// Replace a contact's user-defined fields.
    ///
    /// Contacts update through the `Companies/{id}/Contacts` child route;
    /// the contact id travels in the payload.
    pub async fn update_udf(
        client: &AutotaskClient,
        company_id: i64,
        contact_id: i64,
        udf: &[UserDefinedField],
    ) -> Result<ItemRef> {
        let mut payload = Record::new();
        payload.insert("id", contact_id);
        payload.set_user_defined_fields(serde_json::to_value(udf)?);
        client
            .update(&format!("Companies/{company_id}/Contacts"), &payload)
            .await
    }
}
