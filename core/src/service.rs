//! Everything wired over one store.

use crate::accounts::Accounts;
use crate::catalog::EventCatalog;
use crate::query::EventQueries;
use crate::registration::{RegistrationEngine, WriteGate};
use crate::storage::Storage;
use std::sync::Arc;

/// The catalog, registration engine, queries and accounts sharing one store.
///
/// Build one per store and share it (`Arc<CampusEvents>`); the write gate
/// and the account lock only exclude callers going through the same
/// instance.
pub struct CampusEvents {
    storage: Arc<dyn Storage>,
    catalog: EventCatalog,
    registrations: RegistrationEngine,
    queries: EventQueries,
    accounts: Accounts,
}

impl CampusEvents {
    /// Wire every service over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let gate = WriteGate::default();
        Self {
            catalog: EventCatalog::new(Arc::clone(&storage), Arc::clone(&gate)),
            registrations: RegistrationEngine::new(Arc::clone(&storage), gate),
            queries: EventQueries::new(Arc::clone(&storage)),
            accounts: Accounts::new(Arc::clone(&storage)),
            storage,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Event management.
    #[must_use]
    pub const fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Registration and cancellation.
    #[must_use]
    pub const fn registrations(&self) -> &RegistrationEngine {
        &self.registrations
    }

    /// Read-side queries.
    #[must_use]
    pub const fn queries(&self) -> &EventQueries {
        &self.queries
    }

    /// Sign-up and login.
    #[must_use]
    pub const fn accounts(&self) -> &Accounts {
        &self.accounts
    }
}

impl std::fmt::Debug for CampusEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampusEvents").finish_non_exhaustive()
    }
}
