//! Domain model (ids, pantry/basket views, TTL, deep merge, errors).

pub mod basket;
pub mod errors;
pub mod ids;
pub mod merge;
pub mod pantry;
pub mod ttl;

pub use self::basket::Basket;
pub use self::errors::PantryError;
pub use self::ids::{BasketName, DETAILS_KEY, PantryId, RequestId};
pub use self::merge::{deep_merge, merged};
pub use self::pantry::{BasketSummary, PantryDetails, UpdatePantryDetails};
pub use self::ttl::{BasketTtl, NO_EXPIRATION, expiration_after, remaining_ttl};
