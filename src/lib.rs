//! Autotask PSA API client library.
//!
//! A Rust library for interacting with the Autotask REST API
//! (`ATServicesRest/V1.0`) using a trait-based architecture where each
//! operation (Query, Create, Update) is defined as a trait that entity
//! types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use autotask_api::{AutotaskClient, ConfigurationItem, Ticket};
//!
//! #[tokio::main]
//! async fn main() -> autotask_api::Result<()> {
//!     // Create client from environment variables
//!     let client = AutotaskClient::from_env()?;
//!
//!     // Find a device by serial number
//!     let items = ConfigurationItem::by_serial(&client, "C02XK1JGJGH5").await?;
//!     for item in &items {
//!         println!("CI {}: {:?}", item.id().unwrap_or(0), item.get_str("referenceTitle"));
//!     }
//!
//!     // List tickets waiting for triage
//!     let open = Ticket::new_unassigned(&client).await?;
//!     println!("{} tickets waiting", open.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three core traits:
//!
//! - [`Query`] - Run filtered list queries, merging all pages
//! - [`Create`] - POST a new entity record
//! - [`Update`] - PATCH an existing entity record
//!
//! Each entity type (like [`Company`] or [`Ticket`]) implements the traits
//! its endpoints support. Entities are [`Record`]s: ordered field-name to
//! value mappings, because the vendor's field set is open-ended and never
//! validated client-side. Filters are structured [`Filter`] values
//! serialized through serde, so no field or value text can corrupt a
//! query.
//!
//! # Configuration
//!
//! [`AutotaskClient::from_env`] reads:
//!
//! - `AUTOTASK_HOST` - zone host, e.g. `webservices5.autotask.net`
//! - `AUTOTASK_USERNAME` - API user
//! - `AUTOTASK_SECRET` - API secret
//! - `AUTOTASK_INTEGRATION_CODE` - integration code issued by Autotask

mod client;
mod entities;
mod error;
mod filter;
mod record;
mod traits;

// Re-export core types
pub use client::{AutotaskClient, Credentials, Payload};
pub use error::{AutotaskError, Result};
pub use filter::{Filter, FilterOp, Search};
pub use record::{ItemRef, Record, UserDefinedField};

// Re-export traits
pub use traits::{Create, Query, Update};

// Re-export entity types
pub use entities::{
    AlertOutcome, Appointment, Company, CompanyAlert, ConfigurationItem,
    ConfigurationItemCategory, ConfigurationItemType, Contact, Contract, ContractRate, Entity,
    Holiday, HolidaySet, NewConfigurationItem, NewTicket, Product, Resource, Role, ServiceCall,
    Ticket, TimeEntry,
};
