//! Transport records exchanged with the backend.

/// Declares a resource that is a transparent wrapper over a shared shape.
///
/// Customers and vendors share one record shape, as do sales and
/// purchases; only the collection they are served from differs.
macro_rules! record_newtype {
    ($(#[$meta:meta])* $name:ident($inner:ty), $collection:literal, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl std::ops::Deref for $name {
            type Target = $inner;
            fn deref(&self) -> &$inner {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $inner {
                &mut self.0
            }
        }

        impl From<$inner> for $name {
            fn from(inner: $inner) -> Self {
                Self(inner)
            }
        }

        impl $crate::resource::Resource for $name {
            const COLLECTION: &'static str = $collection;
            const LABEL: &'static str = $label;

            fn id(&self) -> &str {
                self.0.record_id()
            }

            fn clear_id(&mut self) {
                self.0.clear_record_id();
            }
        }

        impl $crate::resource::Searchable for $name {
            fn search_fields(&self) -> Vec<&str> {
                $crate::resource::Searchable::search_fields(&self.0)
            }
        }
    };
}

pub(crate) use record_newtype;

mod due;
mod lookup;
mod party;
mod product;
mod transaction;
mod user;

pub use due::{DueRecord, Payment};
pub use lookup::{Category, Company, Unit};
pub use party::{Customer, Party, Vendor};
pub use product::{Product, ProductInfo};
pub use transaction::{LineItem, Purchase, Sale, Transaction, TransactionKind};
pub use user::{Profile, Role, User};
