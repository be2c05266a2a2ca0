//! Role operations.

use crate::entities::Entity;
use crate::traits::Query;

/// A billing role resources work under.
#[derive(Debug, Clone, Copy)]
pub struct Role;

impl Entity for Role {
    const ENDPOINT: &'static str = "Roles";
}

impl Query for Role {}
