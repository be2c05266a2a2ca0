//! Autotask entity types and their high-level operations.

mod appointment;
mod company;
mod configuration_item;
mod contact;
mod contract;
mod holiday;
mod product;
mod resource;
mod role;
mod ticket;
mod time_entry;

pub use appointment::*;
pub use company::*;
pub use configuration_item::*;
pub use contact::*;
pub use contract::*;
pub use holiday::*;
pub use product::*;
pub use resource::*;
pub use role::*;
pub use ticket::*;
pub use time_entry::*;

/// A vendor-side business record type, identified by its REST endpoint
/// path segment under the API root.
pub trait Entity {
    /// Endpoint path segment (e.g. `Companies`).
    const ENDPOINT: &'static str;
}
