//! Resource (staff member) operations.

use crate::client::AutotaskClient;
use crate::entities::Entity;
use crate::error::Result;
use crate::filter::Filter;
use crate::record::Record;
use crate::traits::Query;

/// A staff member who can be assigned work.
#[derive(Debug, Clone, Copy)]
pub struct Resource;

impl Entity for Resource {
    const ENDPOINT: &'static str = "Resources";
}

impl Query for Resource {}

impl Resource {
    /// Find a resource by email, falling back to the secondary email
    /// field.
    pub async fn by_email(client: &AutotaskClient, email: &str) -> Result<Option<Record>> {
        let mut found = Self::query(client, &Filter::eq("email", email).into()).await?;
        if found.is_empty() {
            found = Self::query(client, &Filter::eq("email2", email).into()).await?;
        }
        Ok(found.into_iter().next())
    }
}
