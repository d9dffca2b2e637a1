//! # Booking Repository
//!
//! Outbound adapters for the booking checkout service:
//! - `razorpay` - `PaymentGateway` over Razorpay's Orders API
//! - `supabase` - `BookingStore` over Supabase's REST interface
//! - `sqlite` - `BookingStore` over a local SQLite file (feature `sqlite`)
//! - `security` - payment signature and verification token helpers

use async_trait::async_trait;
use booking_types::{BookingRecord, BookingStore, StoreAck, StoreError};

pub mod razorpay;
pub mod security;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod supabase;


pub use razorpay::{RazorpayGateway, RazorpaySettings};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use supabase::{SupabaseSettings, SupabaseStore};

/// Table names are interpolated into URLs and SQL, so only plain
/// identifiers are accepted.
pub(crate) fn validate_table(table: &str) -> Result<(), StoreError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

/// Where bookings are persisted.
#[derive(Clone, Debug)]
pub enum StoreSettings {
    Supabase(SupabaseSettings),
    #[cfg(feature = "sqlite")]
    Sqlite { database_url: String },
}

/// Unified store wrapper over the configured backend.
pub enum Store {
    Supabase(SupabaseStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build and initialize a store from settings.
///
/// # Examples
///
/// ```ignore
/// let store = build_store(StoreSettings::Sqlite {
///     database_url: "sqlite://bookings.db?mode=rwc".into(),
/// })
/// .await?;
/// ```
pub async fn build_store(settings: StoreSettings) -> anyhow::Result<Store> {
    match settings {
        StoreSettings::Supabase(s) => Ok(Store::Supabase(SupabaseStore::new(s)?)),
        #[cfg(feature = "sqlite")]
        StoreSettings::Sqlite { database_url } => {
            Ok(Store::Sqlite(SqliteStore::new(&database_url).await?))
        }
    }
}

#[async_trait]
impl BookingStore for Store {
    async fn insert(&self, table: &str, record: &BookingRecord) -> Result<StoreAck, StoreError> {
        match self {
            Store::Supabase(inner) => inner.insert(table, record).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.insert(table, record).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_table() {
        assert!(validate_table("bookings").is_ok());
        assert!(validate_table("_bookings_2025").is_ok());
        assert!(validate_table("").is_err());
        assert!(validate_table("2025_bookings").is_err());
        assert!(validate_table("bookings?select=*").is_err());
        assert!(validate_table("public.bookings").is_err());
    }
}
