pub mod user;
pub mod product;
pub mod order;
pub mod payment;

pub use user::*;
pub use product::*;
pub use order::*;
pub use payment::*;

/// Money and point amounts, in minor currency units.
///
/// Signed so that untrusted inputs such as a negative points request can be
/// represented and rejected.
pub type Amount = i64;

/// Declares a typed row id. Ids print as `<prefix>_<seq>`; sequence `0` marks
/// an entity that has not been saved yet.
macro_rules! entity_id {
    ($name:ident, $entity:ty, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl crate::actor_framework::EntityId for $name {
            type Entity = $entity;
            const UNSAVED: Self = Self(0);

            fn from_seq(seq: u64) -> Self {
                Self(seq)
            }
        }
    };
}

entity_id!(UserId, User, "user");
entity_id!(ProductId, Product, "product");
entity_id!(OrderId, Order, "order");
entity_id!(PaymentId, Payment, "payment");
