//! Records mirrored from the backend.
//!
//! The backend owns every schema. These types name the fields the client
//! reads or renders and keep everything else in an `extra` map, so a record
//! sent back to the server after an edit loses nothing it arrived with.
//!
//! Identifiers are accepted as either `id` or `_id` on the wire.

mod catalog;
mod commerce;
mod feedback;
mod people;

pub use catalog::*;
pub use commerce::*;
pub use feedback::*;
pub use people::*;

use serde::{Deserialize, Serialize};

use crate::slice::Record;

/// Unrecognized fields carried along with a record.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// A reference to another record that the backend may or may not populate.
///
/// Depending on the endpoint the backend sends either the bare id or the
/// full embedded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<I, T> {
    /// Only the identifier was sent.
    Id(I),
    /// The record was populated in place.
    Record(Box<T>),
}

impl<I, T> Related<I, T>
where
    T: Record<Id = I>,
{
    /// The referenced record's id, whichever form was sent.
    #[must_use]
    pub fn id(&self) -> &I {
        match self {
            Self::Id(id) => id,
            Self::Record(record) => record.id(),
        }
    }

    /// The populated record, if the backend embedded it.
    #[must_use]
    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Record(record) => Some(record),
        }
    }
}

/// Implements [`Record`] for resources keyed by an `id` field.
macro_rules! impl_record {
    ($($ty:ty => $id:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                type Id = $id;

                fn id(&self) -> &Self::Id {
                    &self.id
                }
            }
        )+
    };
}

use crate::types::{
    AddressId, AdminId, BannerId, BlogId, BookingId, CartItemId, CategoryId, ContactId, DriverId,
    OrderId, ProductId, ReviewId, StockId, UserId, VariantId,
};

impl_record!(
    Category => CategoryId,
    Product => ProductId,
    Variant => VariantId,
    Banner => BannerId,
    Blog => BlogId,
    CartItem => CartItemId,
    Order => OrderId,
    Booking => BookingId,
    StockItem => StockId,
    User => UserId,
    Address => AddressId,
    Admin => AdminId,
    Driver => DriverId,
    Review => ReviewId,
    Contact => ContactId,
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_related_accepts_id_or_record() {
        let by_id: Related<ProductId, Product> = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(by_id.id().as_str(), "p1");
        assert!(by_id.record().is_none());

        let populated: Related<ProductId, Product> =
            serde_json::from_str(r#"{"_id":"p2","name":"Mango Jam","price":120}"#).unwrap();
        assert_eq!(populated.id().as_str(), "p2");
        assert_eq!(populated.record().unwrap().name, "Mango Jam");
    }
}
