//! Registration engine.
//!
//! Enforces the rules that span entities: a registration needs an existing
//! event and user, a `(user, event)` pair registers at most once, and an
//! event never takes more registrations than its capacity allows.
//!
//! **Concurrency Strategy**: the whole check-then-insert sequence of
//! [`RegistrationEngine::register`] runs while holding a [`WriteGate`].
//! [`RegistrationEngine::cancel`] and the event writes of
//! [`EventCatalog`](crate::catalog::EventCatalog) take the same gate, so
//! neither a second registration nor a capacity edit can land between the
//! capacity check and the insert.

use crate::error::{CatalogError, EntityKind, Result};
use crate::metrics::{CANCELLATIONS, REGISTRATIONS};
use crate::storage::Storage;
use crate::types::{EventId, Registration, UserId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Lock serializing every write that can move an event's registration
/// count or capacity.
///
/// Components only exclude each other when they hold clones of the same
/// gate; [`CampusEvents`](crate::service::CampusEvents) hands one gate to
/// both the engine and the catalog.
pub type WriteGate = Arc<Mutex<()>>;

/// Creates and cancels registrations.
pub struct RegistrationEngine {
    storage: Arc<dyn Storage>,
    gate: WriteGate,
}

impl RegistrationEngine {
    /// Create an engine over `storage` that writes under `gate`.
    #[must_use]
    pub const fn new(storage: Arc<dyn Storage>, gate: WriteGate) -> Self {
        Self { storage, gate }
    }

    /// Register `user_id` for `event_id`.
    ///
    /// Checks run in a fixed order so the reported error is deterministic:
    /// event exists, user exists, pair not yet registered, seats left.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] with [`EntityKind::Event`] or [`EntityKind::User`]
    /// - [`CatalogError::DuplicateRegistration`] if the pair is already registered
    /// - [`CatalogError::CapacityExceeded`] if the event is full
    /// - [`CatalogError::Storage`] if the backend fails
    #[tracing::instrument(skip_all, fields(user_id = %user_id, event_id = %event_id))]
    pub async fn register(&self, user_id: UserId, event_id: EventId) -> Result<Registration> {
        let _guard = self.gate.lock().await;

        let outcome = self.register_locked(user_id, event_id).await;
        match &outcome {
            Ok(registration) => {
                metrics::counter!(REGISTRATIONS, "outcome" => "created").increment(1);
                tracing::info!(registration_id = %registration.id, "Registration created");
            }
            Err(error) => {
                metrics::counter!(REGISTRATIONS, "outcome" => outcome_label(error)).increment(1);
                tracing::debug!(%error, "Registration rejected");
            }
        }
        outcome
    }

    async fn register_locked(&self, user_id: UserId, event_id: EventId) -> Result<Registration> {
        let Some(event) = self.storage.get_event(event_id).await? else {
            return Err(CatalogError::NotFound(EntityKind::Event));
        };

        if self.storage.get_user(user_id).await?.is_none() {
            return Err(CatalogError::NotFound(EntityKind::User));
        }

        if self
            .storage
            .find_registration(user_id, event_id)
            .await?
            .is_some()
        {
            return Err(CatalogError::DuplicateRegistration);
        }

        let registered = self.storage.count_registrations(event_id).await?;
        if event.capacity.is_full(registered) {
            return Err(CatalogError::CapacityExceeded);
        }

        Ok(self.storage.insert_registration(user_id, event_id).await?)
    }

    /// Cancel the registration of `user_id` for `event_id`.
    ///
    /// Only the registration row is removed; the event and user are not
    /// touched.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] with [`EntityKind::Registration`] if the
    ///   pair is not registered
    /// - [`CatalogError::Storage`] if the backend fails
    #[tracing::instrument(skip_all, fields(user_id = %user_id, event_id = %event_id))]
    pub async fn cancel(&self, user_id: UserId, event_id: EventId) -> Result<()> {
        let _guard = self.gate.lock().await;

        let Some(registration) = self.storage.find_registration(user_id, event_id).await? else {
            metrics::counter!(CANCELLATIONS, "outcome" => "not_found").increment(1);
            return Err(CatalogError::NotFound(EntityKind::Registration));
        };

        if !self.storage.delete_registration(registration.id).await? {
            metrics::counter!(CANCELLATIONS, "outcome" => "not_found").increment(1);
            return Err(CatalogError::NotFound(EntityKind::Registration));
        }

        metrics::counter!(CANCELLATIONS, "outcome" => "cancelled").increment(1);
        tracing::info!(registration_id = %registration.id, "Registration cancelled");
        Ok(())
    }
}

impl std::fmt::Debug for RegistrationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationEngine").finish_non_exhaustive()
    }
}

const fn outcome_label(error: &CatalogError) -> &'static str {
    match error {
        CatalogError::NotFound(EntityKind::Event) => "event_not_found",
        CatalogError::NotFound(EntityKind::User) => "user_not_found",
        CatalogError::DuplicateRegistration => "duplicate",
        CatalogError::CapacityExceeded => "full",
        _ => "error",
    }
}
