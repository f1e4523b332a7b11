//! Typed identifiers.
//!
//! Each entity gets its own UUID newtype so a restaurant id can never be
//! passed where a menu item id is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Identifier of a registered user (client, owner or administrator).
    UserId
}

uuid_id! {
    /// Identifier of a restaurant.
    RestaurantId
}

uuid_id! {
    /// Identifier of a menu item.
    MenuItemId
}

uuid_id! {
    /// Identifier of a persisted order.
    OrderId
}

uuid_id! {
    /// Opaque token identifying a visitor session.
    ///
    /// Cart state is keyed by this token; the surrounding application is
    /// responsible for minting one per browser session.
    SessionToken
}
