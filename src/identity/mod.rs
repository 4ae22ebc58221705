//
//  topsort-sdk
//  identity/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Opaque User Identifiers
//!
//! Events reported to Topsort carry an `opaqueUserId`: a pseudonymous,
//! stable identifier for the visitor. This module defines where that
//! identifier comes from.
//!
//! ## Overview
//!
//! - [`OpaqueUserIdProvider`]: the capability the client depends on
//! - [`StoredIdentifierProvider`]: reads the id from an [`IdentifierStore`],
//!   generating and persisting a new one (30 days, path `/`) when absent
//! - [`FixedIdentifier`]: a provider for backends that already know the id
//! - [`MemoryStore`] and [`FileStore`]: store implementations
//!
//! ## Example
//!
//! ```rust
//! use topsort::identity::{MemoryStore, OpaqueUserIdProvider, StoredIdentifierProvider};
//!
//! let provider = StoredIdentifierProvider::new(MemoryStore::new());
//! let first = provider.opaque_user_id();
//! assert_eq!(first, provider.opaque_user_id());
//! ```

mod store;

pub use store::*;

use chrono::{Duration, Utc};
use uuid::Uuid;

/// Name under which the identifier is stored.
pub const OPAQUE_USER_ID_KEY: &str = "tsuid";

/// Lifetime of a freshly generated identifier, in days.
pub const OPAQUE_USER_ID_TTL_DAYS: i64 = 30;

/// Supplies the opaque user id attached to outgoing events.
///
/// Generation never fails; implementations that persist the id must not
/// surface persistence failures through this call.
pub trait OpaqueUserIdProvider: Send + Sync {
    /// Returns the identifier for the current visitor.
    fn opaque_user_id(&self) -> String;
}

/// Generates a new unique identifier.
pub fn new_identifier() -> String {
    Uuid::now_v7().simple().to_string()
}

/// A provider that always returns the same identifier.
#[derive(Debug, Clone)]
pub struct FixedIdentifier(pub String);

impl FixedIdentifier {
    /// Creates a provider for a known identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl OpaqueUserIdProvider for FixedIdentifier {
    fn opaque_user_id(&self) -> String {
        self.0.clone()
    }
}

/// Cookie-style provider backed by an [`IdentifierStore`].
///
/// On each call it reads [`OPAQUE_USER_ID_KEY`] from the store. A missing
/// or expired record is replaced by a newly generated identifier, saved with
/// an expiry [`OPAQUE_USER_ID_TTL_DAYS`] days out and path `/`.
#[derive(Debug)]
pub struct StoredIdentifierProvider<S> {
    store: S,
}

impl<S: IdentifierStore> StoredIdentifierProvider<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn current(&self) -> Option<String> {
        match self.store.load(OPAQUE_USER_ID_KEY) {
            Ok(Some(record)) if !record.is_expired(Utc::now()) && !record.value.is_empty() => {
                Some(record.value)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Could not read opaque user id: {}", e);
                None
            }
        }
    }
}

impl<S: IdentifierStore> OpaqueUserIdProvider for StoredIdentifierProvider<S> {
    fn opaque_user_id(&self) -> String {
        if let Some(id) = self.current() {
            return id;
        }

        let id = new_identifier();
        let record = StoredIdentifier {
            value: id.clone(),
            expires_at: Utc::now() + Duration::days(OPAQUE_USER_ID_TTL_DAYS),
            path: "/".to_string(),
        };

        // Persistence is best effort
        if let Err(e) = self.store.save(OPAQUE_USER_ID_KEY, record) {
            tracing::warn!("Could not persist opaque user id: {}", e);
        }

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl IdentifierStore for BrokenStore {
        fn load(&self, _name: &str) -> anyhow::Result<Option<StoredIdentifier>> {
            anyhow::bail!("store unavailable")
        }

        fn save(&self, _name: &str, _record: StoredIdentifier) -> anyhow::Result<()> {
            anyhow::bail!("store unavailable")
        }
    }

    #[test]
    fn test_generates_and_persists() {
        let provider = StoredIdentifierProvider::new(MemoryStore::new());
        let id = provider.opaque_user_id();
        assert!(!id.is_empty());

        let record = provider.store().load(OPAQUE_USER_ID_KEY).unwrap().unwrap();
        assert_eq!(record.value, id);
        assert_eq!(record.path, "/");

        let ttl = record.expires_at - Utc::now();
        assert!(ttl > Duration::days(29));
        assert!(ttl <= Duration::days(30));
    }

    #[test]
    fn test_reuses_stored_identifier() {
        let provider = StoredIdentifierProvider::new(MemoryStore::new());
        let first = provider.opaque_user_id();
        assert_eq!(provider.opaque_user_id(), first);
    }

    #[test]
    fn test_expired_identifier_is_replaced() {
        let store = MemoryStore::new();
        store
            .save(
                OPAQUE_USER_ID_KEY,
                StoredIdentifier {
                    value: "old".to_string(),
                    expires_at: Utc::now() - Duration::days(1),
                    path: "/".to_string(),
                },
            )
            .unwrap();

        let provider = StoredIdentifierProvider::new(store);
        let id = provider.opaque_user_id();
        assert_ne!(id, "old");
    }

    #[test]
    fn test_corrupt_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identifiers.json");
        std::fs::write(&path, "garbage").unwrap();

        let provider = StoredIdentifierProvider::new(FileStore::new(&path));
        assert!(!provider.opaque_user_id().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[test]
    fn test_store_failure_still_returns_identifier() {
        let provider = StoredIdentifierProvider::new(BrokenStore);
        let first = provider.opaque_user_id();
        assert!(!first.is_empty());
        // Nothing was persisted, so every call generates a fresh id
        assert_ne!(provider.opaque_user_id(), first);
    }

    #[test]
    fn test_fixed_identifier() {
        let provider = FixedIdentifier::new("visitor-1");
        assert_eq!(provider.opaque_user_id(), "visitor-1");
    }
}
