//! Users
//!
//! Users are owned by the identity provider; carts and API tokens only refer
//! to them by identifier.

use crate::uuids::TypedUuid;

/// User marker
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;
