//! Identity-collaborator currency.
//!
//! Authentication itself lives in the surrounding application; the core only
//! consumes an already-established [`Actor`] and checks ownership and role
//! where an operation is gated.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Role granted to a user by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Ordinary customer browsing and ordering.
    Client,
    /// Restaurant owner managing a profile and menu.
    RestaurantOwner,
    /// Administrator reviewing submissions.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::RestaurantOwner => "RestaurantOwner",
            Role::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated caller: identity plus granted role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Convenience constructor for a fresh owner actor.
    pub fn owner() -> Self {
        Self::new(UserId::new(), Role::RestaurantOwner)
    }

    /// Convenience constructor for a fresh admin actor.
    pub fn admin() -> Self {
        Self::new(UserId::new(), Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_owner_role(&self) -> bool {
        self.role == Role::RestaurantOwner
    }
}
